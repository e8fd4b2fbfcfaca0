//! Schedule index: lessons keyed by (week, weekday, hour).
//!
//! A [`ScheduleIndexBuilder`] is filled during one assembly pass and then
//! frozen into an immutable [`ScheduleIndex`]. Readers only ever see frozen
//! indexes.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::lesson::{Lesson, LessonIdent};
use crate::weekday::Weekday;

/// Where [`ScheduleIndexBuilder::insert`] placed a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// First lesson for its ident.
    TopLevel,
    /// Attached as a group split of the lesson already holding the ident.
    GroupChild,
}

/// Mutable index used while one document is being assembled.
#[derive(Debug, Default)]
pub struct ScheduleIndexBuilder {
    lessons: HashMap<LessonIdent, Lesson>,
}

impl ScheduleIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `lesson` as the top-level entry for its ident, or attach it as
    /// a group child when the ident is already taken.
    pub fn insert(&mut self, lesson: Lesson) -> Placement {
        match self.lessons.get_mut(&lesson.ident) {
            Some(existing) => {
                existing.groups.push(lesson);
                Placement::GroupChild
            }
            None => {
                self.lessons.insert(lesson.ident.clone(), lesson);
                Placement::TopLevel
            }
        }
    }

    /// Extend the lesson at `ident` whose raw cell text equals `raw` (the
    /// top-level lesson or one of its group children) so that it ends at
    /// `hour`. Never creates a lesson. Returns whether one was extended.
    pub fn extend(&mut self, ident: &LessonIdent, raw: &str, hour: &str) -> bool {
        self.lessons
            .get_mut(ident)
            .is_some_and(|lesson| lesson.extend_matching(raw, hour))
    }

    pub fn get(&self, ident: &LessonIdent) -> Option<&Lesson> {
        self.lessons.get(ident)
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Freeze into an immutable index.
    pub fn freeze(self) -> ScheduleIndex {
        ScheduleIndex {
            lessons: self.lessons,
        }
    }
}

/// Immutable mapping from [`LessonIdent`] to [`Lesson`].
///
/// Serializes as a flat list of top-level lessons (with their group
/// children nested).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<Lesson>", into = "Vec<Lesson>")
)]
pub struct ScheduleIndex {
    lessons: HashMap<LessonIdent, Lesson>,
}

impl ScheduleIndex {
    /// Distinct week-parity values, ascending.
    pub fn week_list(&self) -> Vec<u32> {
        self.lessons
            .keys()
            .map(|ident| ident.week)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Weekdays with at least one lesson in `week`, Monday first.
    pub fn day_of_week_list(&self, week: u32) -> Vec<Weekday> {
        self.lessons
            .keys()
            .filter(|ident| ident.week == week)
            .map(|ident| ident.day)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Lessons of one (week, day) slot, ordered by hour-start.
    ///
    /// Hour labels are compared as numbers when every label in the slot is
    /// purely numeric ("1", "2", …, "10"), and as strings otherwise.
    pub fn lesson_list(&self, week: u32, day: Weekday) -> Vec<&Lesson> {
        let mut lessons: Vec<&Lesson> = self
            .lessons
            .values()
            .filter(|lesson| lesson.ident.week == week && lesson.ident.day == day)
            .collect();
        let numeric = lessons
            .iter()
            .all(|lesson| hour_number(&lesson.ident.hour_start).is_some());
        lessons.sort_by(|a, b| compare_hours(&a.ident.hour_start, &b.ident.hour_start, numeric));
        lessons
    }

    pub fn get(&self, ident: &LessonIdent) -> Option<&Lesson> {
        self.lessons.get(ident)
    }

    /// Number of top-level lessons.
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Top-level lessons in unspecified order.
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.lessons.values()
    }
}

impl From<Vec<Lesson>> for ScheduleIndex {
    fn from(lessons: Vec<Lesson>) -> Self {
        let mut builder = ScheduleIndexBuilder::new();
        for lesson in lessons {
            builder.insert(lesson);
        }
        builder.freeze()
    }
}

impl From<ScheduleIndex> for Vec<Lesson> {
    fn from(index: ScheduleIndex) -> Self {
        let mut lessons: Vec<Lesson> = index.lessons.into_values().collect();
        lessons.sort_by(|a, b| {
            a.ident
                .week
                .cmp(&b.ident.week)
                .then(a.ident.day.cmp(&b.ident.day))
                .then_with(|| compare_hours(&a.ident.hour_start, &b.ident.hour_start, true))
        });
        lessons
    }
}

fn hour_number(label: &str) -> Option<u64> {
    let label = label.trim();
    if label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    label.parse().ok()
}

/// Numeric comparison when requested and both labels are numbers,
/// lexicographic otherwise.
fn compare_hours(a: &str, b: &str, numeric: bool) -> Ordering {
    if numeric {
        if let (Some(x), Some(y)) = (hour_number(a), hour_number(b)) {
            return x.cmp(&y).then_with(|| a.cmp(b));
        }
    }
    a.cmp(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::ParsedCell;

    fn lesson(week: u32, hour: &str, day: Weekday, subject: &str) -> Lesson {
        Lesson::new(
            LessonIdent::new(week, hour, day),
            ParsedCell {
                subject: subject.to_string(),
                raw: subject.to_string(),
                ..ParsedCell::default()
            },
        )
    }

    #[test]
    fn insert_same_ident_attaches_group_child() {
        let mut builder = ScheduleIndexBuilder::new();
        assert_eq!(
            builder.insert(lesson(1, "1", Weekday::Monday, "Английский")),
            Placement::TopLevel
        );
        assert_eq!(
            builder.insert(lesson(1, "1", Weekday::Monday, "Немецкий")),
            Placement::GroupChild
        );
        assert_eq!(builder.len(), 1);
        let index = builder.freeze();
        let top = index
            .get(&LessonIdent::new(1, "1", Weekday::Monday))
            .unwrap();
        assert_eq!(top.subject, "Английский");
        assert_eq!(top.groups.len(), 1);
        assert_eq!(top.groups[0].subject, "Немецкий");
    }

    #[test]
    fn extend_never_creates_lessons() {
        let mut builder = ScheduleIndexBuilder::new();
        let ident = LessonIdent::new(1, "1", Weekday::Monday);
        assert!(!builder.extend(&ident, "Химия", "2"));
        assert!(builder.is_empty());

        builder.insert(lesson(1, "1", Weekday::Monday, "Химия"));
        assert!(!builder.extend(&ident, "Физика", "2"));
        assert!(builder.extend(&ident, "Химия", "2"));
        assert_eq!(builder.get(&ident).unwrap().hour_end, "2");
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn week_list_is_distinct_and_ascending() {
        let mut builder = ScheduleIndexBuilder::new();
        builder.insert(lesson(2, "1", Weekday::Monday, "a"));
        builder.insert(lesson(1, "1", Weekday::Monday, "b"));
        builder.insert(lesson(2, "2", Weekday::Friday, "c"));
        assert_eq!(builder.freeze().week_list(), vec![1, 2]);
    }

    #[test]
    fn day_list_ordered_by_ordinal() {
        let mut builder = ScheduleIndexBuilder::new();
        builder.insert(lesson(1, "1", Weekday::Wednesday, "a"));
        builder.insert(lesson(1, "1", Weekday::Monday, "b"));
        builder.insert(lesson(1, "1", Weekday::Friday, "c"));
        builder.insert(lesson(2, "1", Weekday::Sunday, "d"));
        let index = builder.freeze();
        assert_eq!(
            index.day_of_week_list(1),
            vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]
        );
        assert_eq!(index.day_of_week_list(2), vec![Weekday::Sunday]);
        assert!(index.day_of_week_list(3).is_empty());
    }

    #[test]
    fn numeric_hours_sort_numerically() {
        let mut builder = ScheduleIndexBuilder::new();
        for hour in ["10", "2", "1", "9"] {
            builder.insert(lesson(1, hour, Weekday::Monday, hour));
        }
        let index = builder.freeze();
        let hours: Vec<&str> = index
            .lesson_list(1, Weekday::Monday)
            .iter()
            .map(|l| l.ident.hour_start.as_str())
            .collect();
        assert_eq!(hours, ["1", "2", "9", "10"]);
    }

    #[test]
    fn time_labels_sort_lexicographically() {
        let mut builder = ScheduleIndexBuilder::new();
        for hour in ["09:30", "08:30", "12:10"] {
            builder.insert(lesson(1, hour, Weekday::Tuesday, hour));
        }
        let index = builder.freeze();
        let hours: Vec<&str> = index
            .lesson_list(1, Weekday::Tuesday)
            .iter()
            .map(|l| l.ident.hour_start.as_str())
            .collect();
        assert_eq!(hours, ["08:30", "09:30", "12:10"]);
        assert!(index.lesson_list(2, Weekday::Tuesday).is_empty());
    }

    #[test]
    fn from_lesson_list_rebuilds_same_index() {
        let mut builder = ScheduleIndexBuilder::new();
        builder.insert(lesson(1, "1", Weekday::Monday, "a"));
        builder.insert(lesson(1, "1", Weekday::Monday, "b"));
        builder.insert(lesson(2, "3", Weekday::Thursday, "c"));
        let index = builder.freeze();

        let flat: Vec<Lesson> = index.clone().into();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].ident.week, 1);
        assert_eq!(ScheduleIndex::from(flat), index);
    }
}
