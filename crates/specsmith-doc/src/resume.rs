//! Resume Context section
//!
//! The section is a `## Resume Context` heading followed by blockquote lines,
//! running until the next `## ` heading.

/// Heading text introducing the section
pub const RESUME_HEADING: &str = "Resume Context";

/// Shown when a document has no saved context
pub const NO_CONTEXT: &str = "No resume context saved.";

/// Longest summary returned by [`resume_context`], in characters
pub const CONTEXT_LIMIT: usize = 200;

/// One-line summary of the Resume Context section
///
/// Non-blank lines are stripped of their `>` markers and joined with single
/// spaces, then cut to [`CONTEXT_LIMIT`] characters.
#[must_use]
pub fn resume_context(body: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut in_section = false;

    for line in body.lines() {
        if is_resume_heading(line) {
            in_section = true;
            continue;
        }
        if !in_section {
            continue;
        }
        if line.starts_with("## ") {
            break;
        }
        let text = line.trim_start_matches(['>', ' ']).trim();
        if !text.is_empty() {
            lines.push(text);
        }
    }

    if lines.is_empty() {
        return NO_CONTEXT.to_string();
    }
    lines.join(" ").chars().take(CONTEXT_LIMIT).collect()
}

/// Insert `> note` at the top of the Resume Context section
///
/// When a blank line follows the heading the note goes right after it, so
/// the newest note comes first. Otherwise it goes before the next `## `
/// heading, or at the end of the document. Returns `None` if the body has no
/// such section.
#[must_use]
pub fn append_resume_note(body: &str, note: &str) -> Option<String> {
    let quoted = format!("> {}", note.trim());
    let mut lines: Vec<&str> = body.split('\n').collect();
    let heading = lines.iter().position(|line| is_resume_heading(line))?;

    let insert_at = match lines.get(heading + 1) {
        Some(next) if next.trim().is_empty() => heading + 2,
        _ => lines[heading + 1..]
            .iter()
            .position(|line| line.starts_with("## "))
            .map_or(lines.len(), |offset| heading + 1 + offset),
    };

    lines.insert(insert_at, "");
    lines.insert(insert_at, &quoted);
    Some(lines.join("\n"))
}

fn is_resume_heading(line: &str) -> bool {
    line.strip_prefix("##")
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .is_some_and(|rest| rest.trim_start().starts_with(RESUME_HEADING))
}
