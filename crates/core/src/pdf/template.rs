use crate::lesson::Lesson;

/// Substitute `{id}` and lesson field placeholders in `template`.
///
/// Without a lesson, or with an absent field, placeholders render empty.
/// Unknown placeholders are left as written.
pub fn render_template(template: &str, id: i64, lesson: Option<&Lesson>) -> String {
    let field = |f: fn(&Lesson) -> Option<&String>| -> &str {
        lesson.and_then(f).map(String::as_str).unwrap_or("")
    };

    let replacements = [
        ("{id}", id.to_string()),
        ("{lesson_number}", field(|l| l.lesson_number.as_ref()).to_string()),
        ("{lesson_name}", field(|l| l.lesson_name.as_ref()).to_string()),
        ("{category}", field(|l| l.category.as_ref()).to_string()),
        ("{summary}", field(|l| l.summary.as_ref()).to_string()),
        ("{url}", field(|l| l.url.as_ref()).to_string()),
    ];

    let mut out = template.to_string();
    for (placeholder, value) in replacements {
        out = out.replace(placeholder, &value);
    }
    out
}
