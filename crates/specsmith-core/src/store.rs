//! Reading and writing spec documents

use crate::error::{SpecError, SpecResult};
use crate::layout::ProjectLayout;
use specsmith_doc::SpecDocument;
use std::fs;
use std::path::PathBuf;

/// Document storage under `.specs/specs/`
#[derive(Debug, Clone)]
pub struct SpecStore {
    layout: ProjectLayout,
}

impl SpecStore {
    /// Store for a project layout
    #[must_use]
    pub fn new(layout: ProjectLayout) -> Self {
        Self { layout }
    }

    /// Path of the document for `id`
    #[must_use]
    pub fn path(&self, id: &str) -> PathBuf {
        self.layout.spec_path(id)
    }

    /// Whether `id` has a document
    #[must_use]
    pub fn exists(&self, id: &str) -> bool {
        is_plain_id(id) && self.path(id).is_file()
    }

    /// Whether `id` has a directory, with or without a document
    #[must_use]
    pub fn dir_exists(&self, id: &str) -> bool {
        is_plain_id(id) && self.layout.spec_dir(id).exists()
    }

    /// Raw document text
    ///
    /// # Errors
    /// `NotFound` if the document is missing, `Io` if it cannot be read.
    pub fn read(&self, id: &str) -> SpecResult<String> {
        if !self.exists(id) {
            return Err(SpecError::not_found(id));
        }
        let path = self.path(id);
        fs::read_to_string(&path).map_err(|e| SpecError::io_error(path, e))
    }

    /// Parsed document
    ///
    /// # Errors
    /// `NotFound` if the document is missing, `Io` if it cannot be read.
    pub fn load(&self, id: &str) -> SpecResult<SpecDocument> {
        self.read(id).map(|content| SpecDocument::parse(&content))
    }

    /// Render and write a document
    ///
    /// # Errors
    /// `Document` if the header cannot be rendered, `Io` if writing fails.
    pub fn save(&self, id: &str, doc: &SpecDocument) -> SpecResult<()> {
        let content = doc.render()?;
        self.write(id, &content)
    }

    /// Write raw text, creating the spec directory if needed
    ///
    /// # Errors
    /// `InvalidOperation` for ids that are not a single path segment, `Io`
    /// if the directory or file cannot be written.
    pub fn write(&self, id: &str, content: &str) -> SpecResult<()> {
        if !is_plain_id(id) {
            return Err(SpecError::InvalidOperation(format!(
                "'{id}' is not a valid spec id"
            )));
        }
        let dir = self.layout.spec_dir(id);
        fs::create_dir_all(&dir).map_err(|e| SpecError::io_error(&dir, e))?;
        let path = self.path(id);
        fs::write(&path, content).map_err(|e| SpecError::io_error(path, e))
    }

    /// Names of all spec directories, sorted
    ///
    /// A missing `.specs/specs/` yields an empty list.
    ///
    /// # Errors
    /// `Io` if the directory exists but cannot be listed.
    pub fn dir_names(&self) -> SpecResult<Vec<String>> {
        let root = self.layout.specs_subdir();
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&root).map_err(|e| SpecError::io_error(&root, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SpecError::io_error(&root, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Ids must name a single directory under `.specs/specs/`
fn is_plain_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\'])
}
