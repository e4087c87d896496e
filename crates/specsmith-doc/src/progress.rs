//! Phase and task extraction from a document body
//!
//! The body is scanned line by line. Two constructs are recognized:
//!
//! ```text
//! ## Phase 2: Implementation [in-progress]     phase heading
//! ## Cleanup [pending]                         phase heading, no prefix
//! - [x] Wire the parser                        done task
//! - [ ] Add tests ← current                    pending task, current
//! ```
//!
//! Any other line is ignored. Task lines before the first phase heading do
//! not count.

use crate::model::{Phase, Progress, Task};

/// Token marking a pending task as the phase's current one
pub const CURRENT_MARKER: &str = "\u{2190} current";

/// Parse phases and tasks from a body
#[must_use]
pub fn parse_progress(body: &str) -> Progress {
    let mut phases: Vec<Phase> = Vec::new();

    for line in body.lines() {
        if let Some(phase) = parse_phase_heading(line) {
            phases.push(phase);
            continue;
        }

        let Some(phase) = phases.last_mut() else {
            continue;
        };

        if let Some(task) = parse_task_line(line) {
            phase.push_task(task);
        }
    }

    Progress { phases }
}

/// Recognize `## [Phase N:] name [status]`
#[must_use]
pub fn parse_phase_heading(line: &str) -> Option<Phase> {
    let rest = line.strip_prefix("##")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let inner = rest.trim().strip_suffix(']')?;
    let open = inner.rfind('[')?;
    let status = &inner[open + 1..];
    if !is_status_token(status) {
        return None;
    }

    let full_name = inner[..open].trim();
    if full_name.is_empty() {
        return None;
    }
    let name = match strip_phase_prefix(full_name) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => full_name,
    };

    Some(Phase::new(name, status))
}

/// Recognize `- [x] description` and `- [ ] description`
#[must_use]
pub fn parse_task_line(line: &str) -> Option<Task> {
    let rest = line.trim_start().strip_prefix('-')?.trim_start();
    let rest = rest.strip_prefix('[')?;

    let (done, rest) = if let Some(after) = rest.strip_prefix("x]") {
        (true, after)
    } else {
        let mut chars = rest.chars();
        if !chars.next()?.is_whitespace() {
            return None;
        }
        (false, chars.as_str().strip_prefix(']')?)
    };

    let mut chars = rest.chars();
    if !chars.next()?.is_whitespace() {
        return None;
    }
    let raw = chars.as_str();
    if raw.is_empty() {
        return None;
    }

    let description = raw.trim();
    if !done && description.contains(CURRENT_MARKER) {
        return Some(Task {
            description: description.replace(CURRENT_MARKER, "").trim().to_string(),
            done,
            is_current: true,
        });
    }

    Some(Task {
        description: description.to_string(),
        done,
        is_current: false,
    })
}

/// `[A-Za-z0-9_]` start, then word characters or hyphens
fn is_status_token(token: &str) -> bool {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_word(first) && chars.all(|c| is_word(c) || c == '-')
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Strip a leading `Phase <digits>:` label
fn strip_phase_prefix(name: &str) -> Option<&str> {
    let rest = name.strip_prefix("Phase")?;
    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() {
        return None;
    }
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if digits_end == 0 {
        return None;
    }
    Some(trimmed[digits_end..].strip_prefix(':')?.trim_start())
}
