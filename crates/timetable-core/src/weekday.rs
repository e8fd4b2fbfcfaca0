//! Weekday dictionary.
//!
//! Provides [`Weekday`] with a bidirectional mapping between the seven days
//! and the names printed in timetable headers, full or abbreviated.

use std::fmt;

/// A day of the week, ordered Monday (0) through Sunday (6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// All weekdays in ordinal order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

impl Weekday {
    /// Ordinal of the day, Monday = 0 … Sunday = 6.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Returns the weekday with the given ordinal, if it is in `0..7`.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        WEEKDAYS.get(usize::from(ordinal)).copied()
    }

    /// Canonical label, the full name as printed in headers.
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "Понедельник",
            Weekday::Tuesday => "Вторник",
            Weekday::Wednesday => "Среда",
            Weekday::Thursday => "Четверг",
            Weekday::Friday => "Пятница",
            Weekday::Saturday => "Суббота",
            Weekday::Sunday => "Воскресенье",
        }
    }

    /// Two-letter abbreviation.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Weekday::Monday => "Пн",
            Weekday::Tuesday => "Вт",
            Weekday::Wednesday => "Ср",
            Weekday::Thursday => "Чт",
            Weekday::Friday => "Пт",
            Weekday::Saturday => "Сб",
            Weekday::Sunday => "Вс",
        }
    }

    /// Look up a weekday by its full or abbreviated name.
    ///
    /// Matching is case-insensitive, ignores surrounding whitespace and
    /// accepts one trailing period (`"пн."`). Any other text, including a
    /// weekday name embedded in a longer sentence, yields `None`.
    pub fn from_label(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed).trim_end();
        if trimmed.is_empty() {
            return None;
        }
        let lowered = trimmed.to_lowercase();
        WEEKDAYS.into_iter().find(|day| {
            day.label().to_lowercase() == lowered || day.abbreviation().to_lowercase() == lowered
        })
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
