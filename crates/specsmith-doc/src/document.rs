//! A SPEC.md held in memory

use crate::error::DocResult;
use crate::frontmatter::{self, Metadata};
use crate::model::{Priority, Progress, Spec};
use crate::progress::parse_progress;
use crate::resume::{append_resume_note, resume_context};

/// Header keys read by the model
pub mod keys {
    /// Spec id
    pub const ID: &str = "id";
    /// Title
    pub const TITLE: &str = "title";
    /// Lifecycle status
    pub const STATUS: &str = "status";
    /// Creation date
    pub const CREATED: &str = "created";
    /// Last transition date
    pub const UPDATED: &str = "updated";
    /// Priority
    pub const PRIORITY: &str = "priority";
    /// Tags
    pub const TAGS: &str = "tags";
}

/// Parsed document: header plus untouched body
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDocument {
    metadata: Metadata,
    body: String,
    framed: bool,
}

impl SpecDocument {
    /// Parse document text; never fails
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let parsed = frontmatter::split(content);
        Self {
            metadata: parsed.metadata,
            body: parsed.body.to_string(),
            framed: parsed.framed,
        }
    }

    /// Header
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Body text
    #[inline]
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether the source had a well-formed header
    #[inline]
    #[must_use]
    pub fn is_framed(&self) -> bool {
        self.framed
    }

    /// Status as written, if any
    #[must_use]
    pub fn status_raw(&self) -> Option<String> {
        self.metadata.get_str(keys::STATUS)
    }

    /// Merge header changes
    pub fn apply(&mut self, changes: &Metadata) {
        self.metadata.merge(changes);
    }

    /// Append a Resume Context note
    ///
    /// Returns `false` and leaves the body alone when the section is absent.
    pub fn add_resume_note(&mut self, note: &str) -> bool {
        match append_resume_note(&self.body, note) {
            Some(body) => {
                self.body = body;
                true
            }
            None => false,
        }
    }

    /// Phases and task counts
    #[must_use]
    pub fn progress(&self) -> Progress {
        parse_progress(&self.body)
    }

    /// Resume Context summary
    #[must_use]
    pub fn resume_context(&self) -> String {
        resume_context(&self.body)
    }

    /// Build the spec model, filling gaps with defaults
    ///
    /// `fallback_id` (normally the directory name) stands in for a missing
    /// `id`; the id stands in for a missing `title`.
    #[must_use]
    pub fn to_spec(&self, fallback_id: &str) -> Spec {
        let meta = &self.metadata;
        let id = meta.get_str(keys::ID).unwrap_or_else(|| fallback_id.to_string());
        let title = meta.get_str(keys::TITLE).unwrap_or_else(|| id.clone());

        Spec {
            status: meta.get_str(keys::STATUS).and_then(|s| s.parse().ok()),
            created: meta.get_str(keys::CREATED).unwrap_or_default(),
            updated: meta.get_str(keys::UPDATED).unwrap_or_default(),
            priority: meta
                .get_str(keys::PRIORITY)
                .and_then(|p| p.parse().ok())
                .unwrap_or(Priority::Medium),
            tags: meta.get_list(keys::TAGS),
            phases: self.progress().phases,
            id,
            title,
        }
    }

    /// Render back to text
    ///
    /// # Errors
    /// Returns `DocError::Serialize` if the header cannot be emitted.
    pub fn render(&self) -> DocResult<String> {
        frontmatter::compose(&self.metadata, &self.body, self.framed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpecStatus;
    use pretty_assertions::assert_eq;

    const DOC: &str = "---\nid: demo\ntitle: Demo\nstatus: paused\npriority: low\ntags:\n- cli\n---\n\n## Work [in-progress]\n- [x] a\n- [ ] b\n\n## Resume Context\n\n> left off at b\n";

    #[test]
    fn spec_from_document() {
        let spec = SpecDocument::parse(DOC).to_spec("ignored");
        assert_eq!(spec.id, "demo");
        assert_eq!(spec.status, Some(SpecStatus::Paused));
        assert_eq!(spec.priority, Priority::Low);
        assert_eq!(spec.tags, vec!["cli"]);
        assert_eq!((spec.total_done(), spec.total_tasks()), (1, 2));
        assert!((spec.progress_pct() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn defaults_for_malformed_header() {
        let doc = SpecDocument::parse("no header at all\n");
        assert!(!doc.is_framed());
        let spec = doc.to_spec("dir-name");
        assert_eq!(spec.id, "dir-name");
        assert_eq!(spec.title, "dir-name");
        assert_eq!(spec.status_label(), "unknown");
        assert_eq!(spec.priority, Priority::Medium);
    }

    #[test]
    fn render_unchanged_document_keeps_body() {
        let doc = SpecDocument::parse(DOC);
        let rendered = doc.render().unwrap();
        assert_eq!(SpecDocument::parse(&rendered), doc);
    }

    #[test]
    fn resume_note_and_status_change() {
        let mut doc = SpecDocument::parse(DOC);
        doc.apply(&Metadata::new().with(keys::STATUS, "active"));
        assert!(doc.add_resume_note("picked back up"));

        let rendered = doc.render().unwrap();
        let reparsed = SpecDocument::parse(&rendered);
        assert_eq!(reparsed.status_raw().as_deref(), Some("active"));
        assert_eq!(reparsed.resume_context(), "picked back up left off at b");
    }
}
