//! SPEC.md template for new specs

use crate::error::DocResult;
use crate::frontmatter::{self, Metadata};
use crate::model::{Priority, SpecStatus};
use crate::progress::CURRENT_MARKER;
use serde_yaml::Value;

/// Header for a freshly created spec
///
/// Field order is `id, title, status, created, updated, priority, tags`.
#[must_use]
pub fn new_spec_metadata(id: &str, title: &str, date: &str, priority: Priority) -> Metadata {
    Metadata::new()
        .with("id", id)
        .with("title", title)
        .with("status", SpecStatus::Active.as_str())
        .with("created", date)
        .with("updated", date)
        .with("priority", priority.as_str())
        .with("tags", Value::Sequence(Vec::new()))
}

/// Render a new SPEC.md
///
/// # Errors
/// Returns `DocError::Serialize` if the header cannot be emitted.
pub fn render_template(id: &str, title: &str, date: &str, priority: Priority) -> DocResult<String> {
    let metadata = new_spec_metadata(id, title, date, priority);
    frontmatter::compose(&metadata, &template_body(title), true)
}

fn template_body(title: &str) -> String {
    format!(
        "

# {title}

## Overview

<!-- Describe what this spec accomplishes and why. -->

## Requirements

- <!-- When X happens, the system shall Y -->

## Phase 1: Setup [in-progress]

- [ ] Task 1 {CURRENT_MARKER}
- [ ] Task 2
- [ ] Task 3

## Phase 2: Implementation [pending]

- [ ] Task 1
- [ ] Task 2
- [ ] Task 3

## Phase 3: Testing & Polish [pending]

- [ ] Task 1
- [ ] Task 2

---

## Resume Context

> Spec just created. No work started yet.

## Decision Log

| Date | Decision | Rationale |
|------|----------|-----------|
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::parse_progress;
    use crate::resume::resume_context;

    #[test]
    fn template_parses_back() {
        let text = render_template("my-feature", "My Feature", "2026-01-01", Priority::High).unwrap();
        let (meta, body) = frontmatter::parse(&text);

        assert_eq!(meta.get_str("id").as_deref(), Some("my-feature"));
        assert_eq!(meta.get_str("status").as_deref(), Some("active"));
        assert_eq!(meta.get_str("priority").as_deref(), Some("high"));
        assert!(meta.get_list("tags").is_empty());

        let progress = parse_progress(body);
        assert_eq!(progress.phases.len(), 3);
        assert_eq!(progress.total_tasks(), 8);
        assert_eq!(progress.total_done(), 0);
        assert_eq!(
            progress.phases[0].current_task().map(|t| t.description.as_str()),
            Some("Task 1")
        );
        assert_eq!(resume_context(body), "Spec just created. No work started yet.");
    }

    #[test]
    fn title_with_colon_stays_valid_yaml() {
        let text = render_template("fix-bug", "Fix: the bug", "2026-01-01", Priority::Medium).unwrap();
        let (meta, _) = frontmatter::parse(&text);
        assert_eq!(meta.get_str("title").as_deref(), Some("Fix: the bug"));
    }
}
