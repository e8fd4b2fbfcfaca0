//! Plain or rich-text rendering of lessons for a chat surface.

use crate::lesson::Lesson;

/// Options for [`render_lesson`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wrap the hour range in `<b>…</b>` and escape the rest as HTML.
    pub emphasis: bool,
}

/// Render one lesson and its group splits.
///
/// The first line reads `"<hours> <subject>, каб. <room>, <group>, <teacher>"`
/// with empty fields left out; `<hours>` is `"3"` or `"3-4"`. Each group
/// split follows on its own line, indented by two spaces.
pub fn render_lesson(lesson: &Lesson, options: &RenderOptions) -> String {
    let mut out = String::new();
    render_into(&mut out, lesson, options, 0);
    out
}

/// Render a slot's lessons, one block per lesson.
pub fn render_day(lessons: &[&Lesson], options: &RenderOptions) -> String {
    lessons
        .iter()
        .map(|lesson| render_lesson(lesson, options))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_into(out: &mut String, lesson: &Lesson, options: &RenderOptions, depth: usize) {
    if depth > 0 {
        out.push('\n');
        out.push_str(&"  ".repeat(depth));
    }

    let hours = hour_range(lesson);
    if options.emphasis {
        out.push_str("<b>");
        out.push_str(&escape_html(&hours));
        out.push_str("</b>");
    } else {
        out.push_str(&hours);
    }

    let room = (!lesson.room.is_empty()).then(|| format!("каб. {}", lesson.room));
    let fields: Vec<&str> = [
        Some(lesson.subject.as_str()),
        room.as_deref(),
        Some(lesson.group.as_str()),
        Some(lesson.teacher.as_str()),
    ]
    .into_iter()
    .flatten()
    .filter(|field| !field.is_empty())
    .collect();

    if !fields.is_empty() {
        out.push(' ');
        let body = fields.join(", ");
        if options.emphasis {
            out.push_str(&escape_html(&body));
        } else {
            out.push_str(&body);
        }
    }

    for child in &lesson.groups {
        render_into(out, child, options, depth + 1);
    }
}

/// Hour range of a lesson: `"3"` or `"3-4"`.
pub fn hour_range(lesson: &Lesson) -> String {
    if lesson.is_multi_hour() {
        format!("{}-{}", lesson.ident.hour_start, lesson.hour_end)
    } else {
        lesson.ident.hour_start.clone()
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
