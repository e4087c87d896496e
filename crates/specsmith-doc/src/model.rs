//! Spec, phase and task types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecStatus {
    /// Being worked on
    Active,
    /// Set aside with resume context
    Paused,
    /// All work done
    Completed,
    /// Retired from listings
    Archived,
}

impl SpecStatus {
    /// All statuses in display order
    pub const ALL: [SpecStatus; 4] = [
        SpecStatus::Active,
        SpecStatus::Paused,
        SpecStatus::Completed,
        SpecStatus::Archived,
    ];

    /// Label used in documents
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for SpecStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpecStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

/// Spec priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Urgent
    High,
    /// Normal
    #[default]
    Medium,
    /// Whenever
    Low,
}

impl Priority {
    /// Label used in documents
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(UnknownValue(s.to_string())),
        }
    }
}

/// Well-known phase statuses
///
/// Phase status tokens are free-form in documents; this only names the
/// conventional ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseStatus {
    /// Not started
    Pending,
    /// Being worked on
    InProgress,
    /// Done
    Completed,
    /// Waiting on something
    Blocked,
}

impl PhaseStatus {
    /// Recognize a status token
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "pending" => Some(Self::Pending),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "blocked" => Some(Self::Blocked),
            _ => None,
        }
    }
}

/// Unrecognized enum label
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized value: '{0}'")]
pub struct UnknownValue(pub String);

/// Smallest unit of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Description with the checkbox and current marker removed
    pub description: String,
    /// Checked off
    pub done: bool,
    /// Designated as the phase's current task
    pub is_current: bool,
}

/// Named stage of a spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Phase name without the `Phase N:` prefix
    pub name: String,
    /// Bracketed status token, as written
    pub status: String,
    /// Tasks in document order
    pub tasks: Vec<Task>,
}

impl Phase {
    /// Create a phase without tasks
    #[must_use]
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
            tasks: Vec::new(),
        }
    }

    /// Append a task
    ///
    /// A task flagged current takes the designation from any earlier one.
    pub fn push_task(&mut self, task: Task) {
        if task.is_current {
            for existing in &mut self.tasks {
                existing.is_current = false;
            }
        }
        self.tasks.push(task);
    }

    /// Checked tasks
    #[must_use]
    pub fn tasks_done(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    /// All tasks
    #[inline]
    #[must_use]
    pub fn tasks_total(&self) -> usize {
        self.tasks.len()
    }

    /// Task carrying the current marker
    #[must_use]
    pub fn current_task(&self) -> Option<&Task> {
        self.tasks.iter().find(|t| t.is_current)
    }

    /// Conventional status, if the token is one
    #[inline]
    #[must_use]
    pub fn known_status(&self) -> Option<PhaseStatus> {
        PhaseStatus::from_token(&self.status)
    }
}

/// Phases and task counts of a document body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Phases in document order
    pub phases: Vec<Phase>,
}

impl Progress {
    /// Checked tasks across all phases
    #[must_use]
    pub fn total_done(&self) -> usize {
        self.phases.iter().map(Phase::tasks_done).sum()
    }

    /// All tasks across all phases
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.phases.iter().map(Phase::tasks_total).sum()
    }

    /// Unchecked tasks across all phases
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total_tasks() - self.total_done()
    }

    /// Whether every task is checked (vacuously true with no tasks)
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_done() == self.total_tasks()
    }
}

/// One unit of planned work, as read from its document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    /// Stable slug
    pub id: String,
    /// Human title
    pub title: String,
    /// Lifecycle status; `None` when missing or unrecognized
    pub status: Option<SpecStatus>,
    /// Creation date (`YYYY-MM-DD`), empty if missing
    pub created: String,
    /// Last transition date (`YYYY-MM-DD`), empty if missing
    pub updated: String,
    /// Priority, medium when missing
    pub priority: Priority,
    /// Tags in header order
    pub tags: Vec<String>,
    /// Phases in body order
    pub phases: Vec<Phase>,
}

impl Spec {
    /// Status label, `unknown` when absent
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        self.status.map_or("unknown", SpecStatus::as_str)
    }

    /// Checked tasks
    #[must_use]
    pub fn total_done(&self) -> usize {
        self.phases.iter().map(Phase::tasks_done).sum()
    }

    /// All tasks
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.phases.iter().map(Phase::tasks_total).sum()
    }

    /// Completion percentage, 0 with no tasks
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_pct(&self) -> f64 {
        let total = self.total_tasks();
        if total == 0 {
            return 0.0;
        }
        self.total_done() as f64 / total as f64 * 100.0
    }
}

/// Listing row for a spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecSummary {
    /// Spec id
    pub id: String,
    /// Title
    pub title: String,
    /// Status label (`unknown` when absent)
    pub status: String,
    /// Priority label
    pub priority: String,
    /// Checked tasks
    pub done: usize,
    /// All tasks
    pub total: usize,
}

impl From<&Spec> for SpecSummary {
    fn from(spec: &Spec) -> Self {
        Self {
            id: spec.id.clone(),
            title: spec.title.clone(),
            status: spec.status_label().to_string(),
            priority: spec.priority.to_string(),
            done: spec.total_done(),
            total: spec.total_tasks(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(description: &str, done: bool, is_current: bool) -> Task {
        Task {
            description: description.to_string(),
            done,
            is_current,
        }
    }

    #[test]
    fn status_labels_roundtrip() {
        for status in SpecStatus::ALL {
            assert_eq!(status.as_str().parse::<SpecStatus>(), Ok(status));
        }
        assert!("draft".parse::<SpecStatus>().is_err());
    }

    #[test]
    fn priority_parse_is_case_insensitive() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!(Priority::default(), Priority::Medium);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn later_current_task_wins() {
        let mut phase = Phase::new("Build", "in-progress");
        phase.push_task(task("first", false, true));
        phase.push_task(task("second", false, true));

        assert_eq!(phase.current_task().map(|t| t.description.as_str()), Some("second"));
        assert_eq!(phase.tasks.iter().filter(|t| t.is_current).count(), 1);
    }

    #[test]
    fn progress_sums_phases() {
        let mut a = Phase::new("A", "completed");
        a.push_task(task("x", true, false));
        let mut b = Phase::new("B", "pending");
        b.push_task(task("y", false, false));
        b.push_task(task("z", true, false));

        let progress = Progress { phases: vec![a, b] };
        assert_eq!(progress.total_done(), 2);
        assert_eq!(progress.total_tasks(), 3);
        assert_eq!(progress.remaining(), 1);
        assert!(!progress.is_complete());
        assert!(Progress::default().is_complete());
    }

    #[test]
    fn phase_status_tokens() {
        assert_eq!(PhaseStatus::from_token("in-progress"), Some(PhaseStatus::InProgress));
        assert_eq!(PhaseStatus::from_token("review"), None);
    }
}
