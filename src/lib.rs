//! A headless engine for calendar date-range pickers.
//!
//! The crate computes everything a date-range picker shows and decides,
//! leaving rendering to the host:
//!
//! - [`date`]: timezone-naive calendar arithmetic on wall-clock values.
//! - [`tz`]: IANA zone lookups, offsets, DST detection and instant-preserving
//!   conversion between zones.
//! - [`validate`]: min/max/blackout/duration constraints, reported as values.
//! - [`grid`]: week-major month grids of classified day cells.
//! - [`DateRangeState`]: the two-click selection state machine, plus
//!   [`preset`] ranges resolved against an injected "now".
//! - [`keyboard`]: key presses mapped to focus moves.
//! - [`time`]: 12h/24h time-of-day entry.
//! - [`picker`]: configuration and the operations that tie it all together.
//!
//! Nothing here reads the system clock. Callers pass "now" and "today"
//! explicitly, so every result is deterministic.
//!
//! ```
//! use range_picker::{DateRangeState, SelectionPhase};
//! use jiff::civil::date;
//!
//! let state = DateRangeState::empty()
//!     .pick(date(2024, 6, 15).at(0, 0, 0, 0))
//!     .pick(date(2024, 6, 10).at(0, 0, 0, 0));
//! assert_eq!(state.phase(), SelectionPhase::Complete);
//! assert_eq!(state.start(), Some(date(2024, 6, 10).at(0, 0, 0, 0)));
//! ```

#[macro_use]
mod logging;

mod consts;
mod error;
mod prelude;
mod range;
mod types;

pub mod date;
pub mod grid;
pub mod keyboard;
pub mod picker;
pub mod preset;
pub mod time;
pub mod tz;
pub mod validate;

pub use consts::*;
pub use date::days_in_month;
pub use error::{Error, ParseError};
pub use grid::{CalendarGrid, CalendarView, DayCell};
pub use keyboard::{NavAction, NavKey};
pub use picker::{DateRangePicker, FnObserver, PickerConfig, RangeObserver};
pub use preset::{DEFAULT_PRESETS, Preset};
pub use range::{CompleteRange, DateRangeState, RangeError, SelectionPhase};
pub use time::{Period, TimeFormat, TimeState};
pub use types::{Month, Year, is_leap_year};
pub use tz::{COMMON_TIME_ZONES, CommonTimeZone, TimeZoneId};
pub use validate::{DateRangeConstraints, ErrorField, ValidationError, Violation};
