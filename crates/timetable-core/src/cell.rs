//! Cell parser: decomposes the free text of one timetable cell into lesson
//! fields.
//!
//! Extraction is an ordered pipeline of [`Step`]s over an [`Accumulator`].
//! Each step searches the text left behind by the previous steps, records
//! the value it finds, and cuts the matched span out of the working string:
//!
//! 1. group marker (`"10А.1"`, `"10А1"`, `"1 группа"`)
//! 2. room (`"204"`, `"305а"`, `"204, 205"`)
//! 3. teacher (`"Иванов И.И."`), anchored at the end of what is left
//! 4. subject: whatever remains
//!
//! The order matters: a group marker such as `"10А.1"` would otherwise be
//! taken for a room, and the teacher is only at the end of the text once the
//! room has been removed.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static GROUP_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[12] группа").expect("group marker pattern compiles"));

static ROOM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\D?").expect("room pattern compiles"));

static ROOM_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+").expect("room tail pattern compiles"));

static TEACHER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)(?P<value>\p{Lu}\p{Ll}+(?:-\p{Lu}\p{Ll}+)?\s+\p{Lu}\.\s?\p{Lu}\.)\s*$")
        .expect("teacher pattern compiles")
});

/// Fields decoded from one cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCell {
    pub subject: String,
    pub room: String,
    pub teacher: String,
    pub group: String,
    /// The cell text exactly as it appeared in the grid.
    pub raw: String,
}

impl ParsedCell {
    /// A cell with no subject left after extraction carries no lesson.
    pub fn is_lesson(&self) -> bool {
        !self.subject.is_empty()
    }
}

/// Which field a [`Step`] fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Group,
    Room,
    Teacher,
}

/// Working state threaded through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulator {
    /// Text not yet claimed by any step (NFC-normalized).
    pub rest: String,
    /// Fields found so far.
    pub cell: ParsedCell,
}

impl Accumulator {
    pub fn new(raw: &str) -> Self {
        Self {
            rest: raw.nfc().collect(),
            cell: ParsedCell {
                raw: raw.to_string(),
                ..ParsedCell::default()
            },
        }
    }

    /// Cut `range` out of the working text, leaving a space so the words on
    /// either side stay apart.
    fn remove(&mut self, range: Range<usize>) {
        self.rest.replace_range(range, " ");
    }

    /// Finish the pipeline: the remaining text becomes the subject.
    pub fn finish(mut self) -> ParsedCell {
        self.cell.subject = self.rest.split_whitespace().collect::<Vec<_>>().join(" ");
        self.cell
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    /// First pattern that matches anywhere wins.
    FirstOf(Vec<Regex>),
    /// Digit run, optionally continued by an adjoining run after a comma.
    Room,
    /// Named `value` capture of a pattern anchored at the end of the text.
    Trailing(&'static LazyLock<Regex>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Extraction {
    span: Range<usize>,
    value: String,
}

/// One (field, matcher) stage of the pipeline.
#[derive(Debug, Clone)]
pub struct Step {
    field: Field,
    matcher: Matcher,
}

impl Step {
    /// Group marker step. With a class token (`"10А"`), `"10А.<digit>"` is
    /// tried before `"10А<digit>"`; the literal `"1 группа"` / `"2 группа"`
    /// markers are tried last.
    pub fn group(class_token: Option<&str>) -> Self {
        let mut patterns = Vec::new();
        if let Some(token) = class_token.map(str::trim).filter(|t| !t.is_empty()) {
            let token: String = token.nfc().collect();
            let escaped = regex::escape(&token);
            for pattern in [format!(r"(?i){escaped}\.\d"), format!(r"(?i){escaped}\d")] {
                if let Ok(re) = Regex::new(&pattern) {
                    patterns.push(re);
                }
            }
        }
        patterns.push(Regex::clone(&GROUP_MARKER));
        Self {
            field: Field::Group,
            matcher: Matcher::FirstOf(patterns),
        }
    }

    /// Room step.
    pub fn room() -> Self {
        Self {
            field: Field::Room,
            matcher: Matcher::Room,
        }
    }

    /// Teacher step.
    pub fn teacher() -> Self {
        Self {
            field: Field::Teacher,
            matcher: Matcher::Trailing(&TEACHER),
        }
    }

    /// The field this step fills.
    pub fn field(&self) -> Field {
        self.field
    }

    fn find(&self, text: &str) -> Option<Extraction> {
        match &self.matcher {
            Matcher::FirstOf(patterns) => patterns.iter().find_map(|re| {
                re.find(text).map(|m| Extraction {
                    span: m.range(),
                    value: m.as_str().to_string(),
                })
            }),
            Matcher::Room => {
                let run = ROOM_RUN.find(text)?;
                let mut end = run.end();
                if run.as_str().ends_with(',') {
                    if let Some(tail) = ROOM_TAIL.find(&text[end..]) {
                        end += tail.end();
                    }
                }
                Some(Extraction {
                    span: run.start()..end,
                    value: text[run.start()..end].trim().to_string(),
                })
            }
            Matcher::Trailing(re) => {
                let caps = re.captures(text)?;
                let whole = caps.get(0)?;
                let value = caps.name("value")?;
                Some(Extraction {
                    span: whole.range(),
                    value: value.as_str().trim().to_string(),
                })
            }
        }
    }

    /// Run this step against the accumulator. Returns `true` if the field
    /// was found (and removed from the working text).
    pub fn apply(&self, acc: &mut Accumulator) -> bool {
        let Some(found) = self.find(&acc.rest) else {
            return false;
        };
        acc.remove(found.span);
        let slot = match self.field {
            Field::Group => &mut acc.cell.group,
            Field::Room => &mut acc.cell.room,
            Field::Teacher => &mut acc.cell.teacher,
        };
        *slot = found.value;
        true
    }
}

/// Parses cell text into [`ParsedCell`]s.
#[derive(Debug, Clone)]
pub struct CellParser {
    steps: Vec<Step>,
}

impl CellParser {
    /// Create a parser. `class_token` is the class name (`"10А"`) used to
    /// recognize group markers such as `"10А.1"`.
    pub fn new(class_token: Option<&str>) -> Self {
        Self {
            steps: vec![Step::group(class_token), Step::room(), Step::teacher()],
        }
    }

    /// The pipeline stages in application order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Parse one cell. The returned value may have an empty subject, in which
    /// case the cell is decorative and carries no lesson.
    pub fn parse(&self, raw: &str) -> ParsedCell {
        let mut acc = Accumulator::new(raw);
        for step in &self.steps {
            step.apply(&mut acc);
        }
        acc.finish()
    }
}

impl Default for CellParser {
    fn default() -> Self {
        Self::new(None)
    }
}
