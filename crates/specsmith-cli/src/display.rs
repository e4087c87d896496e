//! Plain-text rendering of specs and listings

use specsmith_core::{Listing, SpecStatusReport};
use std::fmt::Write as _;

/// Icon for a spec or phase status
#[must_use]
pub fn status_icon(status: &str) -> &'static str {
    match status {
        "active" | "in-progress" => "\u{2192}",
        "paused" => "\u{23f8}",
        "completed" => "\u{2713}",
        "archived" => "\u{1f4e6}",
        "pending" => "\u{25cb}",
        "blocked" => "\u{2715}",
        _ => "?",
    }
}

/// Header line, phases with their current task, and the resume context
#[must_use]
pub fn render_status(report: &SpecStatusReport) -> String {
    let spec = &report.spec;
    let mut out = String::new();

    let marker = if report.is_active { " (active)" } else { "" };
    let _ = writeln!(out, "{}{marker}", spec.title);
    let _ = writeln!(
        out,
        "Status: {}  |  Priority: {}  |  Progress: {}/{} tasks ({:.0}%)",
        spec.status_label(),
        spec.priority,
        spec.total_done(),
        spec.total_tasks(),
        spec.progress_pct(),
    );

    for phase in &spec.phases {
        let _ = writeln!(
            out,
            "  {} {} [{}/{}]",
            status_icon(&phase.status),
            phase.name,
            phase.tasks_done(),
            phase.tasks_total()
        );
        if let Some(task) = phase.current_task() {
            let _ = writeln!(out, "    \u{21b3} Current: {}", task.description);
        }
    }

    let _ = writeln!(out, "\n  Context: {}", report.context);
    out
}

/// Specs grouped by status, the active one marked
#[must_use]
pub fn render_listing(listing: &Listing) -> String {
    if listing.specs.is_empty() {
        return "No specs found.\n".to_string();
    }

    let mut out = String::new();
    for (status, specs) in listing.grouped() {
        let _ = writeln!(out, "\n{}:", capitalize(status));
        for spec in specs {
            let marker = if listing.is_active(&spec.id) { " (active)" } else { "" };
            let _ = writeln!(
                out,
                "  {} {}: {} ({}/{} tasks){marker}",
                status_icon(status),
                spec.id,
                spec.title,
                spec.done,
                spec.total
            );
        }
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
