//! Keyboard navigation over the calendar grid.

use std::fmt;
use std::str::FromStr;

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::consts::DAYS_PER_WEEK;
use crate::date::{add_days, add_months, weekday_index};
use crate::{Error, ParseError};

/// Keys that move the focused day or act on it.
///
/// Names follow the DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    #[serde(rename = " ")]
    Space,
    Escape,
}

impl NavKey {
    /// Maps a key name to a navigation key. Unrecognized keys yield `None`.
    pub fn from_key_name(name: &str) -> Option<Self> {
        let key = match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            _ => return None,
        };
        Some(key)
    }

    pub const fn key_name(self) -> &'static str {
        match self {
            Self::ArrowLeft => "ArrowLeft",
            Self::ArrowRight => "ArrowRight",
            Self::ArrowUp => "ArrowUp",
            Self::ArrowDown => "ArrowDown",
            Self::Home => "Home",
            Self::End => "End",
            Self::PageUp => "PageUp",
            Self::PageDown => "PageDown",
            Self::Enter => "Enter",
            Self::Space => " ",
            Self::Escape => "Escape",
        }
    }
}

impl FromStr for NavKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key_name(s).ok_or_else(|| ParseError::InvalidFormat(format!("unknown key {s:?}")))
    }
}

impl fmt::Display for NavKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_name())
    }
}

/// Outcome of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    /// Move focus to the given day.
    Focus(DateTime),
    /// Select the focused day.
    Select(DateTime),
    /// Dismiss the calendar.
    Close,
    /// The key has no meaning here and should be left to the host.
    Ignored,
}

impl NavAction {
    /// Whether the host should suppress the key's default behavior.
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Resolves a key press against the focused day.
///
/// Arrow keys move by a day or a week, Home and End jump to the bounds of
/// the focused week (Sunday first), and PageUp/PageDown move by a month,
/// clamping to the last day of shorter months.
///
/// # Errors
/// Returns `Error::OutOfRange` if the new focus leaves the calendar.
pub fn navigate(key: NavKey, focus: DateTime) -> Result<NavAction, Error> {
    let week = DAYS_PER_WEEK as i64;
    let weekday = i64::from(weekday_index(focus));

    let action = match key {
        NavKey::ArrowLeft => NavAction::Focus(add_days(focus, -1)?),
        NavKey::ArrowRight => NavAction::Focus(add_days(focus, 1)?),
        NavKey::ArrowUp => NavAction::Focus(add_days(focus, -week)?),
        NavKey::ArrowDown => NavAction::Focus(add_days(focus, week)?),
        NavKey::Home => NavAction::Focus(add_days(focus, -weekday)?),
        NavKey::End => NavAction::Focus(add_days(focus, week - 1 - weekday)?),
        NavKey::PageUp => NavAction::Focus(add_months(focus, -1)?),
        NavKey::PageDown => NavAction::Focus(add_months(focus, 1)?),
        NavKey::Enter | NavKey::Space => NavAction::Select(focus),
        NavKey::Escape => NavAction::Close,
    };
    Ok(action)
}

/// Like [`navigate`], but takes a raw key name and ignores unknown keys.
///
/// # Errors
/// Returns `Error::OutOfRange` if the new focus leaves the calendar.
pub fn navigate_key_name(name: &str, focus: DateTime) -> Result<NavAction, Error> {
    match NavKey::from_key_name(name) {
        Some(key) => navigate(key, focus),
        None => Ok(NavAction::Ignored),
    }
}
