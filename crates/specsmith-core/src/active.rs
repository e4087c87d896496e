//! Active pointer
//!
//! One file holding the id of the spec being worked on, or nothing. Reads and
//! writes are whole-value and unconditional.

use crate::error::{SpecError, SpecResult};
use crate::layout::ProjectLayout;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Persisted single-slot reference to the active spec
#[derive(Debug, Clone)]
pub struct ActivePointer {
    path: PathBuf,
}

impl ActivePointer {
    /// Pointer stored at the layout's `active` file
    #[must_use]
    pub fn new(layout: &ProjectLayout) -> Self {
        Self {
            path: layout.active_path(),
        }
    }

    /// Current id, `None` when the file is missing or blank
    ///
    /// # Errors
    /// Returns `SpecError::Io` if the file exists but cannot be read.
    pub fn get(&self) -> SpecResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let id = text.trim();
                Ok((!id.is_empty()).then(|| id.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SpecError::io_error(&self.path, e)),
        }
    }

    /// Whether the pointer names `id`
    ///
    /// # Errors
    /// Returns `SpecError::Io` if the file cannot be read.
    pub fn is(&self, id: &str) -> SpecResult<bool> {
        Ok(self.get()?.as_deref() == Some(id))
    }

    /// Point at `id`
    ///
    /// # Errors
    /// Returns `SpecError::Io` if the file cannot be written.
    pub fn set(&self, id: &str) -> SpecResult<()> {
        tracing::debug!(spec_id = %id, "active pointer set");
        fs::write(&self.path, id).map_err(|e| SpecError::io_error(&self.path, e))
    }

    /// Empty the pointer
    ///
    /// # Errors
    /// Returns `SpecError::Io` if the file cannot be written.
    pub fn clear(&self) -> SpecResult<()> {
        tracing::debug!("active pointer cleared");
        fs::write(&self.path, "").map_err(|e| SpecError::io_error(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn set_get_clear() {
        let tmp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(tmp.path());
        let pointer = ActivePointer::new(&layout);
        assert_eq!(pointer.get().unwrap(), None);

        layout.init().unwrap();
        pointer.set("feature-a").unwrap();
        assert_eq!(pointer.get().unwrap().as_deref(), Some("feature-a"));
        assert!(pointer.is("feature-a").unwrap());

        pointer.clear().unwrap();
        assert_eq!(pointer.get().unwrap(), None);
    }

    #[test]
    fn whitespace_is_trimmed() {
        let tmp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(tmp.path());
        layout.init().unwrap();
        fs::write(layout.active_path(), "  spec-x\n").unwrap();
        assert_eq!(ActivePointer::new(&layout).get().unwrap().as_deref(), Some("spec-x"));
    }

    #[test]
    fn write_without_specs_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let pointer = ActivePointer::new(&ProjectLayout::new(tmp.path()));
        assert!(matches!(pointer.set("x"), Err(SpecError::Io { .. })));
    }
}
