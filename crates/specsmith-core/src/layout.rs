//! Paths inside a project's `.specs/` directory
//!
//! ```text
//! <root>/.specs/
//!   active              active spec id, or empty
//!   registry.md         derived index
//!   config.toml         optional settings
//!   specs/<id>/SPEC.md  one document per spec
//! ```

use crate::error::{SpecError, SpecResult};
use crate::registry::REGISTRY_HEADER;
use std::fs;
use std::path::{Path, PathBuf};

/// Project state directory
pub const SPECS_DIR: &str = ".specs";
/// Directory holding one subdirectory per spec
pub const SPECS_SUBDIR: &str = "specs";
/// Document file name inside a spec directory
pub const SPEC_FILE: &str = "SPEC.md";
/// Active pointer file
pub const ACTIVE_FILE: &str = "active";
/// Registry file
pub const REGISTRY_FILE: &str = "registry.md";
/// Optional configuration file
pub const CONFIG_FILE: &str = "config.toml";

/// Resolved paths for one project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

/// What [`ProjectLayout::init`] did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    /// `.specs/` was already present before the call
    pub already_initialized: bool,
    /// Paths created by this call, in creation order
    pub created: Vec<PathBuf>,
}

impl ProjectLayout {
    /// Layout rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walk up from `start` to the first directory containing `.specs/`
    #[must_use]
    pub fn discover(start: &Path) -> Option<Self> {
        start
            .ancestors()
            .find(|dir| dir.join(SPECS_DIR).is_dir())
            .map(Self::new)
    }

    /// Project root
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/.specs`
    #[must_use]
    pub fn specs_dir(&self) -> PathBuf {
        self.root.join(SPECS_DIR)
    }

    /// `<root>/.specs/specs`
    #[must_use]
    pub fn specs_subdir(&self) -> PathBuf {
        self.specs_dir().join(SPECS_SUBDIR)
    }

    /// `<root>/.specs/specs/<id>`
    #[must_use]
    pub fn spec_dir(&self, id: &str) -> PathBuf {
        self.specs_subdir().join(id)
    }

    /// `<root>/.specs/specs/<id>/SPEC.md`
    #[must_use]
    pub fn spec_path(&self, id: &str) -> PathBuf {
        self.spec_dir(id).join(SPEC_FILE)
    }

    /// `<root>/.specs/active`
    #[must_use]
    pub fn active_path(&self) -> PathBuf {
        self.specs_dir().join(ACTIVE_FILE)
    }

    /// `<root>/.specs/registry.md`
    #[must_use]
    pub fn registry_path(&self) -> PathBuf {
        self.specs_dir().join(REGISTRY_FILE)
    }

    /// `<root>/.specs/config.toml`
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.specs_dir().join(CONFIG_FILE)
    }

    /// Whether `.specs/` exists
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.specs_dir().is_dir()
    }

    /// Fail with `NotInitialized` unless `.specs/` exists
    ///
    /// # Errors
    /// Returns `SpecError::NotInitialized` when the directory is missing.
    pub fn ensure_initialized(&self) -> SpecResult<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(SpecError::NotInitialized {
                path: self.root.clone(),
            })
        }
    }

    /// Create whatever part of the `.specs/` structure is missing
    ///
    /// Existing files are never touched, so calling this twice is safe.
    ///
    /// # Errors
    /// Returns `SpecError::Io` if a directory or file cannot be created.
    pub fn init(&self) -> SpecResult<InitReport> {
        let mut report = InitReport {
            already_initialized: self.is_initialized(),
            created: Vec::new(),
        };

        for dir in [self.specs_dir(), self.specs_subdir()] {
            if !dir.is_dir() {
                fs::create_dir_all(&dir).map_err(|e| SpecError::io_error(&dir, e))?;
                report.created.push(dir);
            }
        }

        for (path, content) in [
            (self.active_path(), ""),
            (self.registry_path(), REGISTRY_HEADER),
        ] {
            if !path.exists() {
                fs::write(&path, content).map_err(|e| SpecError::io_error(&path, e))?;
                report.created.push(path);
            }
        }

        tracing::debug!(root = %self.root.display(), created = report.created.len(), "project initialized");
        Ok(report)
    }
}
