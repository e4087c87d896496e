//! Status transition table and transition results

use specsmith_doc::{Spec, SpecStatus, SpecSummary};
use std::path::PathBuf;

/// Statuses reachable from `from` by rewriting the document
///
/// `pause` on a paused spec and `resume` on an active one leave the document
/// alone; `complete` and `archive` always rewrite it. A missing or
/// unrecognized status (`None`) can move anywhere.
#[must_use]
pub fn allowed_transitions(from: Option<SpecStatus>) -> Vec<SpecStatus> {
    use SpecStatus::{Active, Archived, Completed, Paused};
    match from {
        Some(Active) => vec![Paused, Completed, Archived],
        Some(Paused) => vec![Active, Completed, Archived],
        Some(Completed | Archived) | None => vec![Active, Paused, Completed, Archived],
    }
}

/// Whether moving `from` to `to` rewrites the document
#[inline]
#[must_use]
pub fn rewrites(from: Option<SpecStatus>, to: SpecStatus) -> bool {
    allowed_transitions(from).contains(&to)
}

/// A status change written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Spec id
    pub id: String,
    /// Previous status label (`unknown` when missing)
    pub from: String,
    /// New status
    pub to: SpecStatus,
    /// Date written to `updated`
    pub date: String,
    /// A resume note was requested and stored
    pub note_saved: bool,
}

/// Result of `pause`, `resume`, `complete` or `archive`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Document rewritten
    Changed(Transition),
    /// Already in the requested status; document untouched
    Unchanged {
        /// Spec id
        id: String,
        /// Status it already had
        status: SpecStatus,
    },
}

impl Outcome {
    /// Spec id
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Changed(t) => &t.id,
            Self::Unchanged { id, .. } => id,
        }
    }

    /// Whether the document was rewritten
    #[inline]
    #[must_use]
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }
}

/// Result of `switch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Target was already the active pointer
    AlreadyActive {
        /// Spec id
        id: String,
    },
    /// Pointer moved to the target
    Switched {
        /// Pause applied to the previously active spec, if it changed anything
        paused: Option<Outcome>,
        /// Pointer value that named no document and was left unpaused
        stale_pointer: Option<String>,
        /// Resume applied to the target
        resumed: Outcome,
    },
}

/// Result of `create`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    /// Derived id
    pub id: String,
    /// Title as given
    pub title: String,
    /// Document path
    pub path: PathBuf,
    /// Pointer was empty and now names this spec
    pub activated: bool,
    /// Spec the pointer still names when it was not empty
    pub still_active: Option<String>,
}

/// Result of importing a generated document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Imported {
    /// Spec id
    pub id: String,
    /// Document path
    pub path: PathBuf,
    /// An existing document was replaced
    pub overwritten: bool,
}

/// Full view of one spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecStatusReport {
    /// Parsed spec
    pub spec: Spec,
    /// Resume Context summary
    pub context: String,
    /// Document path
    pub path: PathBuf,
    /// Pointer names this spec
    pub is_active: bool,
}

/// All specs plus the pointer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// One summary per spec directory, by directory name
    pub specs: Vec<SpecSummary>,
    /// Active pointer value
    pub active: Option<String>,
}

impl Listing {
    /// Specs grouped by status: active, paused, completed, archived, then
    /// any other label in first-seen order. Empty groups are omitted.
    #[must_use]
    pub fn grouped(&self) -> Vec<(&str, Vec<&SpecSummary>)> {
        let mut labels: Vec<&str> = SpecStatus::ALL.iter().map(|s| s.as_str()).collect();
        for spec in &self.specs {
            if !labels.contains(&spec.status.as_str()) {
                labels.push(&spec.status);
            }
        }

        labels
            .into_iter()
            .filter_map(|label| {
                let group: Vec<_> = self.specs.iter().filter(|s| s.status == label).collect();
                (!group.is_empty()).then_some((label, group))
            })
            .collect()
    }

    /// Whether `id` is the active pointer value
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, status: &str) -> SpecSummary {
        SpecSummary {
            id: id.into(),
            title: id.into(),
            status: status.into(),
            priority: "medium".into(),
            done: 0,
            total: 0,
        }
    }

    #[test]
    fn idle_self_transitions_do_not_rewrite() {
        assert!(!rewrites(Some(SpecStatus::Paused), SpecStatus::Paused));
        assert!(!rewrites(Some(SpecStatus::Active), SpecStatus::Active));
        assert!(rewrites(Some(SpecStatus::Completed), SpecStatus::Completed));
        assert!(rewrites(Some(SpecStatus::Archived), SpecStatus::Active));
        assert!(rewrites(None, SpecStatus::Paused));
    }

    #[test]
    fn every_status_can_be_archived() {
        for from in SpecStatus::ALL.map(Some).into_iter().chain([None]) {
            assert!(allowed_transitions(from).contains(&SpecStatus::Archived));
        }
    }

    #[test]
    fn listing_groups_in_lifecycle_order() {
        let listing = Listing {
            specs: vec![
                summary("a", "archived"),
                summary("b", "draft"),
                summary("c", "active"),
                summary("d", "active"),
            ],
            active: Some("c".into()),
        };
        let groups: Vec<_> = listing
            .grouped()
            .into_iter()
            .map(|(label, specs)| (label, specs.len()))
            .collect();
        assert_eq!(groups, vec![("active", 2), ("archived", 1), ("draft", 1)]);
        assert!(listing.is_active("c"));
    }
}
