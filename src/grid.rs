//! Month grids of classified day cells.
//!
//! A grid is a pure function of the displayed month, the selection, the
//! constraints and the injected current day. Callers rebuild it wholesale
//! whenever any of those change.

use jiff::Span;
use jiff::civil::{Date, DateTime, Time};
use serde::{Deserialize, Serialize};

use crate::consts::{DAYS_PER_WEEK, DECEMBER, JANUARY};
use crate::date::{self, days_in_month, first_weekday_of_month, same_day};
use crate::validate::{DateRangeConstraints, is_selectable};
use crate::{DateRangeState, Error, Month, Year};

/// The month a calendar is showing.
///
/// Any month from January of year 1 through December 9999 is a valid view, but
/// December 9999 cannot be rendered: its last week would be padded with days
/// of year 10000, so [`CalendarGrid::build`] rejects it. November 9999 is the
/// last month with a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarView {
    year:  Year,
    month: Month,
}

impl CalendarView {
    pub const fn new(year: Year, month: Month) -> Self {
        Self { year, month }
    }

    /// The month containing `dt`.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` for years before 1.
    pub fn containing(dt: DateTime) -> Result<Self, Error> {
        Ok(Self {
            year:  Year::from_civil(dt.year())?,
            month: Month::from_civil(dt.month())?,
        })
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    /// # Errors
    /// Returns `ParseError::InvalidYear` past December 9999.
    pub fn next(self) -> Result<Self, Error> {
        if self.month.get() == DECEMBER {
            Ok(Self::new(Year::new(self.year.get() + 1)?, Month::new(JANUARY)?))
        } else {
            Ok(Self::new(self.year, Month::new(self.month.get() + 1)?))
        }
    }

    /// # Errors
    /// Returns `ParseError::InvalidYear` before January of year 1.
    pub fn previous(self) -> Result<Self, Error> {
        if self.month.get() == JANUARY {
            Ok(Self::new(Year::new(self.year.get() - 1)?, Month::new(DECEMBER)?))
        } else {
            Ok(Self::new(self.year, Month::new(self.month.get() - 1)?))
        }
    }

    /// Heading such as `February 2024`.
    pub fn title(&self) -> String {
        format!("{} {}", self.month.name(), self.year)
    }

    fn first_day(self) -> Result<Date, Error> {
        Ok(Date::new(self.year.to_civil(), self.month.to_civil(), 1)?)
    }
}

/// One classified day of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date:             Date,
    pub is_current_month: bool,
    pub is_today:         bool,
    pub is_selected:      bool,
    pub is_in_range:      bool,
    pub is_disabled:      bool,
    pub is_blackout:      bool,
}

impl DayCell {
    fn classify(
        day: Date,
        is_current_month: bool,
        selection: &DateRangeState,
        constraints: &DateRangeConstraints,
        today: Date,
    ) -> Self {
        let dt = day.to_datetime(Time::midnight());
        let is_endpoint = |endpoint: Option<DateTime>| endpoint.is_some_and(|e| same_day(dt, e));
        let is_selected = is_endpoint(selection.start()) || is_endpoint(selection.end());

        let is_in_range = match (selection.start(), selection.end()) {
            (Some(start), Some(end)) if !same_day(start, end) => {
                date::in_range(dt, start, end) && !is_selected
            },
            _ => false,
        };

        Self {
            date: day,
            is_current_month,
            is_today: date::is_today(dt, today),
            is_selected,
            is_in_range,
            is_disabled: !is_selectable(dt, constraints),
            is_blackout: constraints.is_blackout(dt),
        }
    }
}

/// Week-major grid for one month: every row holds exactly seven days,
/// Sunday first, padded with days of the adjacent months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    view:  CalendarView,
    weeks: Vec<[DayCell; DAYS_PER_WEEK]>,
}

impl CalendarGrid {
    /// Builds the grid for `view`.
    ///
    /// The selection is normalized first, so an out-of-order pair still
    /// highlights the span between its endpoints.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the padding days fall outside the
    /// supported calendar, which only happens for December 9999.
    pub fn build(
        view: CalendarView,
        selection: &DateRangeState,
        constraints: &DateRangeConstraints,
        today: Date,
    ) -> Result<Self, Error> {
        let selection = selection.normalized();
        let leading = i64::from(first_weekday_of_month(view.year, view.month));
        let month_days = i64::from(days_in_month(view.year, view.month));
        let week = DAYS_PER_WEEK as i64;
        let total = (leading + month_days + week - 1) / week * week;

        let first = view.first_day()?;
        let grid_start = first.checked_sub(Span::new().try_days(leading)?)?;

        let mut cells = Vec::with_capacity(DAYS_PER_WEEK * 6);
        for offset in 0..total {
            let day = grid_start.checked_add(Span::new().try_days(offset)?)?;
            let is_current_month = (leading..leading + month_days).contains(&offset);
            cells.push(DayCell::classify(day, is_current_month, &selection, constraints, today));
        }

        let weeks = cells
            .chunks_exact(DAYS_PER_WEEK)
            .map(|week| std::array::from_fn(|i| week[i]))
            .collect();

        Ok(Self { view, weeks })
    }

    pub const fn view(&self) -> CalendarView {
        self.view
    }

    pub const fn year(&self) -> Year {
        self.view.year
    }

    pub const fn month(&self) -> Month {
        self.view.month
    }

    pub fn title(&self) -> String {
        self.view.title()
    }

    pub fn weeks(&self) -> &[[DayCell; DAYS_PER_WEEK]] {
        &self.weeks
    }

    /// All cells in display order.
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten()
    }

    pub fn current_month_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells().filter(|cell| cell.is_current_month)
    }

    /// The cell for `day`, if the grid shows it.
    pub fn find(&self, day: Date) -> Option<&DayCell> {
        self.cells().find(|cell| cell.date == day)
    }
}
