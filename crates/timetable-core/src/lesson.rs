//! Lesson records and their slot identity.

use std::fmt;

use crate::cell::ParsedCell;
use crate::weekday::Weekday;

/// Identity of a timetable slot: week parity, hour-start label and weekday.
///
/// This tuple is the only key used for equality and lookup. The weekday
/// contributes its label to identity; its ordinal is used for ordering only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LessonIdent {
    /// Week parity (1, 2, …) on an alternating timetable.
    pub week: u32,
    /// Label of the hour the lesson starts in ("1", "8:30", …).
    pub hour_start: String,
    /// Day of the week.
    pub day: Weekday,
}

impl LessonIdent {
    /// Create an ident.
    pub fn new(week: u32, hour_start: impl Into<String>, day: Weekday) -> Self {
        Self {
            week,
            hour_start: hour_start.into(),
            day,
        }
    }

    /// Weekday label ("Понедельник").
    pub fn day_label(&self) -> &'static str {
        self.day.label()
    }

    /// Weekday ordinal, Monday = 0.
    pub fn day_ordinal(&self) -> u8 {
        self.day.ordinal()
    }
}

impl fmt::Display for LessonIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week {} {} hour {}", self.week, self.day, self.hour_start)
    }
}

/// One lesson parsed from a timetable cell.
///
/// Lessons taught in parallel to parts of a class share the parent's
/// [`LessonIdent`] and live in [`groups`](Lesson::groups); they are never
/// top-level index entries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lesson {
    /// Slot identity.
    pub ident: LessonIdent,
    /// Label of the last hour the lesson occupies.
    pub hour_end: String,
    /// Subject name.
    pub subject: String,
    /// Room number(s), empty when not printed.
    pub room: String,
    /// Group marker ("10А.1", "1 группа"), empty for the whole class.
    pub group: String,
    /// Teacher surname with initials, empty when not printed.
    pub teacher: String,
    /// Unmodified text of the source cell.
    pub raw: String,
    /// Simultaneous group splits, in discovery order.
    pub groups: Vec<Lesson>,
    /// Content-derived identifier for external cache addressing.
    pub content_id: u32,
}

impl Lesson {
    /// Build a lesson for `ident` from a parsed cell. The hour-end starts
    /// equal to the hour-start.
    pub fn new(ident: LessonIdent, cell: ParsedCell) -> Self {
        let content_id = content_id(&ident, &cell);
        Self {
            hour_end: ident.hour_start.clone(),
            ident,
            subject: cell.subject,
            room: cell.room,
            group: cell.group,
            teacher: cell.teacher,
            raw: cell.raw,
            groups: Vec::new(),
            content_id,
        }
    }

    /// Whether the lesson spans more than one hour slot.
    pub fn is_multi_hour(&self) -> bool {
        self.hour_end != self.ident.hour_start
    }

    /// Hex form of [`content_id`](Lesson::content_id).
    pub fn content_key(&self) -> String {
        format!("{:08x}", self.content_id)
    }

    /// Extend this lesson, or the group child with the same raw text, to end
    /// at `hour`. Returns `false` if neither matches `raw`.
    pub(crate) fn extend_matching(&mut self, raw: &str, hour: &str) -> bool {
        if self.raw == raw {
            self.hour_end = hour.to_string();
            return true;
        }
        match self.groups.iter_mut().find(|child| child.raw == raw) {
            Some(child) => {
                child.hour_end = hour.to_string();
                true
            }
            None => false,
        }
    }
}

/// 32-bit djb2 hash over the lesson's content fields.
fn content_id(ident: &LessonIdent, cell: &ParsedCell) -> u32 {
    let week = ident.week.to_string();
    let fields = [
        cell.subject.as_str(),
        week.as_str(),
        ident.hour_start.as_str(),
        ident.day.label(),
        cell.room.as_str(),
        cell.group.as_str(),
        cell.teacher.as_str(),
    ];
    let mut hash: u32 = 5381;
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            hash = djb2_step(hash, 0x1f);
        }
        for byte in field.bytes() {
            hash = djb2_step(hash, byte);
        }
    }
    hash
}

fn djb2_step(hash: u32, byte: u8) -> u32 {
    (hash << 5).wrapping_add(hash).wrapping_add(u32::from(byte))
}
