//! The picker: configuration plus the operations a host drives it with.
//!
//! The picker never owns the selection. Every operation takes the caller's
//! current [`DateRangeState`] and returns the next one, validating the final
//! state and reporting it through a [`RangeObserver`].

use jiff::Timestamp;
use jiff::civil::{Date, DateTime};
use serde::{Deserialize, Serialize};

use crate::grid::{CalendarGrid, CalendarView};
use crate::keyboard::{NavAction, NavKey, navigate};
use crate::preset::{DEFAULT_PRESETS, Preset};
use crate::time::{TimeFormat, TimeState};
use crate::tz::{self, TimeZoneId};
use crate::validate::{DateRangeConstraints, ValidationError, validate_range};
use crate::{DateRangeState, Error};

/// Picker settings, as read from host configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PickerConfig {
    /// Zone the wall-clock selection is interpreted in.
    pub time_zone:        TimeZoneId,
    pub time_format:      TimeFormat,
    pub constraints:      DateRangeConstraints,
    pub show_time_picker: bool,
    pub show_presets:     bool,
    pub presets:          Vec<Preset>,
    pub disabled:         bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            time_zone:        TimeZoneId::utc(),
            time_format:      TimeFormat::default(),
            constraints:      DateRangeConstraints::default(),
            show_time_picker: false,
            show_presets:     true,
            presets:          DEFAULT_PRESETS.to_vec(),
            disabled:         false,
        }
    }
}

/// Receives selection changes and the validation result of every change.
pub trait RangeObserver {
    /// A user action produced a new selection.
    fn on_change(&mut self, _state: &DateRangeState) {}

    /// The full current error list; empty once errors clear.
    fn on_error(&mut self, _errors: &[ValidationError]) {}
}

impl RangeObserver for () {}

/// Adapts a pair of closures into a [`RangeObserver`].
pub struct FnObserver<C, E> {
    on_change: C,
    on_error:  E,
}

impl<C, E> FnObserver<C, E>
where
    C: FnMut(&DateRangeState),
    E: FnMut(&[ValidationError]),
{
    pub const fn new(on_change: C, on_error: E) -> Self {
        Self { on_change, on_error }
    }
}

impl<C, E> RangeObserver for FnObserver<C, E>
where
    C: FnMut(&DateRangeState),
    E: FnMut(&[ValidationError]),
{
    fn on_change(&mut self, state: &DateRangeState) {
        (self.on_change)(state);
    }

    fn on_error(&mut self, errors: &[ValidationError]) {
        (self.on_error)(errors);
    }
}

/// Drives a selection according to a [`PickerConfig`].
#[derive(Debug, Clone)]
pub struct DateRangePicker<O = ()> {
    config:   PickerConfig,
    observer: O,
}

impl DateRangePicker {
    pub const fn new(config: PickerConfig) -> Self {
        Self { config, observer: () }
    }
}

impl<O: RangeObserver> DateRangePicker<O> {
    pub const fn with_observer(config: PickerConfig, observer: O) -> Self {
        Self { config, observer }
    }

    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub const fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Presets to offer, or none when presets are hidden.
    pub fn presets(&self) -> &[Preset] {
        if self.config.show_presets {
            &self.config.presets
        } else {
            &[]
        }
    }

    /// Switches the display zone. The selection is wall-clock and unaffected.
    pub fn set_time_zone(&mut self, time_zone: TimeZoneId) {
        debug!("time zone {} -> {}", self.config.time_zone, time_zone);
        self.config.time_zone = time_zone;
    }

    /// Replaces the constraints and revalidates `state` against them.
    pub fn set_constraints(&mut self, constraints: DateRangeConstraints, state: &DateRangeState) {
        self.config.constraints = constraints;
        if !self.config.disabled {
            self.report(state);
        }
    }

    /// Applies a date pick from the calendar.
    pub fn pick(&mut self, state: DateRangeState, dt: DateTime) -> DateRangeState {
        if self.config.disabled {
            return state;
        }
        self.commit(state.pick(dt))
    }

    /// Assigns a complete range directly from `preset`.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the preset cannot be resolved at `now`.
    pub fn apply_preset(
        &mut self,
        state: DateRangeState,
        preset: &Preset,
        now: DateTime,
    ) -> Result<DateRangeState, Error> {
        if self.config.disabled {
            return Ok(state);
        }
        debug!("applying preset {:?}", preset.label());
        let range = preset.resolve(now)?;
        Ok(self.commit(range.into()))
    }

    /// Sets the time of day of the start. A no-op without a start, with the
    /// time picker hidden, or when the time is unchanged.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the new start is not representable.
    pub fn set_start_time(&mut self, state: DateRangeState, time: &TimeState) -> Result<DateRangeState, Error> {
        let Some(start) = state.start().filter(|_| self.accepts_time()) else {
            return Ok(state);
        };
        let next = time.combine(start)?;
        if next == start {
            return Ok(state);
        }
        Ok(self.commit(state.with_start(next)))
    }

    /// Sets the time of day of the end, under the same rules as
    /// [`set_start_time`](Self::set_start_time).
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the new end is not representable.
    pub fn set_end_time(&mut self, state: DateRangeState, time: &TimeState) -> Result<DateRangeState, Error> {
        let Some(end) = state.end().filter(|_| self.accepts_time()) else {
            return Ok(state);
        };
        let next = time.combine(end)?;
        if next == end {
            return Ok(state);
        }
        Ok(self.commit(state.with_end(next)?))
    }

    /// Resolves a key press at `focus`. Enter and Space pick the focused day.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the new focus leaves the calendar.
    pub fn handle_key(
        &mut self,
        state: DateRangeState,
        key: NavKey,
        focus: DateTime,
    ) -> Result<(DateRangeState, NavAction), Error> {
        if self.config.disabled {
            return Ok((state, NavAction::Ignored));
        }
        let action = navigate(key, focus)?;
        let state = match action {
            NavAction::Select(dt) => self.pick(state, dt),
            NavAction::Focus(_) | NavAction::Close | NavAction::Ignored => state,
        };
        Ok((state, action))
    }

    /// Accepts a selection supplied by the host and revalidates it.
    /// Only errors are reported, never a change.
    pub fn update(&mut self, state: DateRangeState) -> DateRangeState {
        if !self.config.disabled {
            self.report(&state);
        }
        state
    }

    /// The hour and minute of the start, in the configured format.
    pub fn start_time(&self, state: &DateRangeState) -> Option<TimeState> {
        state.start().map(|dt| TimeState::from_wall_clock(dt, self.config.time_format))
    }

    /// The hour and minute of the end, in the configured format.
    pub fn end_time(&self, state: &DateRangeState) -> Option<TimeState> {
        state.end().map(|dt| TimeState::from_wall_clock(dt, self.config.time_format))
    }

    /// The selection's endpoints as instants in the configured zone.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if an endpoint is not representable.
    pub fn instants(&self, state: &DateRangeState) -> Result<(Option<Timestamp>, Option<Timestamp>), Error> {
        let zone = &self.config.time_zone;
        let start = state.start().map(|dt| tz::to_instant(dt, zone)).transpose()?;
        let end = state.end().map(|dt| tz::to_instant(dt, zone)).transpose()?;
        Ok((start, end))
    }

    /// # Errors
    /// Returns `Error::OutOfRange` if the grid padding leaves the calendar.
    pub fn grid(&self, state: &DateRangeState, view: CalendarView, today: Date) -> Result<CalendarGrid, Error> {
        CalendarGrid::build(view, state, &self.config.constraints, today)
    }

    pub fn validate(&self, state: &DateRangeState) -> Vec<ValidationError> {
        validate_range(state.start(), state.end(), &self.config.constraints)
    }

    const fn accepts_time(&self) -> bool {
        self.config.show_time_picker && !self.config.disabled
    }

    fn commit(&mut self, state: DateRangeState) -> DateRangeState {
        debug!("selection {} ({:?} .. {:?})", state.phase(), state.start(), state.end());
        self.observer.on_change(&state);
        self.report(&state);
        state
    }

    fn report(&mut self, state: &DateRangeState) {
        let errors = self.validate(state);
        self.observer.on_error(&errors);
    }
}
