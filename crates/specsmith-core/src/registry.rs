//! Registry builder
//!
//! `registry.md` is a table derived from every spec document. It is rewritten
//! in full on each rebuild and never read back by the engine.

use crate::error::{SpecError, SpecResult};
use crate::layout::ProjectLayout;
use crate::store::SpecStore;
use specsmith_doc::document::keys;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

/// Fixed registry preamble, ending with the table's separator row
pub const REGISTRY_HEADER: &str = "# Spec Registry\n\n| ID | Title | Status | Priority | Updated |\n|----|-------|--------|----------|---------|\n";

/// One registry row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Spec id (header `id`, else directory name)
    pub id: String,
    /// Title (header `title`, else id)
    pub title: String,
    /// Status label, `unknown` when missing
    pub status: String,
    /// Priority label, `medium` when missing
    pub priority: String,
    /// Last update date, empty when missing
    pub updated: String,
}

/// Derives `registry.md` from the spec documents
#[derive(Debug, Clone)]
pub struct Registry {
    path: PathBuf,
    store: SpecStore,
}

impl Registry {
    /// Registry for a project layout
    #[must_use]
    pub fn new(layout: &ProjectLayout) -> Self {
        Self {
            path: layout.registry_path(),
            store: SpecStore::new(layout.clone()),
        }
    }

    /// Read one row per spec directory, ordered by id
    ///
    /// Directories without a SPEC.md, with a document that is not UTF-8, or
    /// whose header is missing or malformed, are skipped.
    ///
    /// # Errors
    /// Returns `SpecError::Io` if the specs directory or a document cannot be
    /// read.
    pub fn entries(&self) -> SpecResult<Vec<RegistryEntry>> {
        let mut entries = Vec::new();

        for dir in self.store.dir_names()? {
            if !self.store.exists(&dir) {
                tracing::warn!(dir = %dir, "skipping spec directory without SPEC.md");
                continue;
            }
            let doc = match self.store.load(&dir) {
                Ok(doc) => doc,
                Err(err) if err.is_invalid_data() => {
                    tracing::warn!(dir = %dir, error = %err, "skipping spec that is not valid UTF-8");
                    continue;
                }
                Err(err) => return Err(err),
            };
            if !doc.is_framed() {
                tracing::warn!(dir = %dir, "skipping spec with unreadable header");
                continue;
            }

            let meta = doc.metadata();
            let id = meta.get_str(keys::ID).unwrap_or_else(|| dir.clone());
            entries.push(RegistryEntry {
                title: meta.get_str(keys::TITLE).unwrap_or_else(|| id.clone()),
                status: meta.get_str(keys::STATUS).unwrap_or_else(|| "unknown".to_string()),
                priority: meta.get_str(keys::PRIORITY).unwrap_or_else(|| "medium".to_string()),
                updated: meta.get_str(keys::UPDATED).unwrap_or_default(),
                id,
            });
        }

        entries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(entries)
    }

    /// Rewrite `registry.md` from the documents on disk
    ///
    /// # Errors
    /// Returns `SpecError::Io` if reading documents or writing the file fails.
    pub fn rebuild(&self) -> SpecResult<Vec<RegistryEntry>> {
        let entries = self.entries()?;
        let content = render(&entries);
        fs::write(&self.path, content).map_err(|e| SpecError::io_error(&self.path, e))?;
        tracing::debug!(rows = entries.len(), "registry rebuilt");
        Ok(entries)
    }
}

/// Render the registry table
#[must_use]
pub fn render(entries: &[RegistryEntry]) -> String {
    let mut out = String::from(REGISTRY_HEADER);
    for entry in entries {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            cell(&entry.id),
            cell(&entry.title),
            cell(&entry.status),
            cell(&entry.priority),
            cell(&entry.updated),
        );
    }
    out
}

/// Keep a value on one line inside its table cell
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn project() -> (TempDir, ProjectLayout) {
        let tmp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(tmp.path());
        layout.init().unwrap();
        (tmp, layout)
    }

    #[test]
    fn render_rows() {
        let rows = vec![RegistryEntry {
            id: "a".into(),
            title: "A | B".into(),
            status: "active".into(),
            priority: "high".into(),
            updated: "2026-01-01".into(),
        }];
        assert_eq!(
            render(&rows),
            format!("{REGISTRY_HEADER}| a | A \\| B | active | high | 2026-01-01 |\n")
        );
        assert_eq!(render(&[]), REGISTRY_HEADER);
    }

    #[test]
    fn rebuild_skips_unusable_directories() {
        let (_tmp, layout) = project();
        let store = SpecStore::new(layout.clone());
        store.write("zeta", "---\nid: zeta\ntitle: Zeta\nstatus: paused\n---\n").unwrap();
        store.write("alpha", "---\nstatus: active\n---\n").unwrap();
        store.write("broken", "no header here\n").unwrap();
        fs::create_dir_all(layout.spec_dir("empty")).unwrap();
        fs::create_dir_all(layout.spec_dir("binary")).unwrap();
        fs::write(layout.spec_path("binary"), [0xff, 0xfe, b'-', b'-']).unwrap();

        let entries = Registry::new(&layout).rebuild().unwrap();
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
        assert_eq!(entries[0].title, "alpha");
        assert_eq!(entries[0].priority, "medium");
    }

    #[test]
    fn rebuild_is_idempotent() {
        let (_tmp, layout) = project();
        SpecStore::new(layout.clone())
            .write("x", "---\nid: x\ntitle: X\nstatus: active\nupdated: 2026-03-01\n---\n")
            .unwrap();
        let registry = Registry::new(&layout);

        registry.rebuild().unwrap();
        let first = fs::read(layout.registry_path()).unwrap();
        registry.rebuild().unwrap();
        let second = fs::read(layout.registry_path()).unwrap();
        assert_eq!(first, second);
    }
}
