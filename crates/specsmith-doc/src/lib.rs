//! Specsmith document layer
//!
//! Pure text handling for SPEC.md files. Nothing here touches the
//! filesystem.
//!
//! # Document shape
//!
//! ```text
//! ---
//! id: my-feature            ← Frontmatter (flat YAML, order preserved)
//! status: active
//! ---
//! # My Feature
//! ## Phase 1: Setup [in-progress]
//! - [x] done task           ← Progress (phases, tasks, current marker)
//! - [ ] next task ← current
//! ## Resume Context
//! > where work stopped      ← Resume context
//! ```
//!
//! # Example
//!
//! ```rust
//! use specsmith_doc::{frontmatter, Metadata, SpecDocument};
//!
//! let text = "---\nid: demo\nstatus: active\n---\n## Work [pending]\n- [ ] one\n";
//! let doc = SpecDocument::parse(text);
//! assert_eq!(doc.progress().total_tasks(), 1);
//!
//! let paused = frontmatter::update(text, &Metadata::new().with("status", "paused")).unwrap();
//! assert!(paused.ends_with("## Work [pending]\n- [ ] one\n"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod document;
pub mod error;
pub mod frontmatter;
pub mod model;
pub mod progress;
pub mod resume;
pub mod slug;
pub mod template;

pub use document::SpecDocument;
pub use error::{DocError, DocResult};
pub use frontmatter::Metadata;
pub use model::{Phase, PhaseStatus, Priority, Progress, Spec, SpecStatus, SpecSummary, Task, UnknownValue};
pub use progress::{parse_progress, CURRENT_MARKER};
pub use resume::{append_resume_note, resume_context};
pub use slug::slugify;
pub use template::render_template;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with SPEC.md documents
    pub use crate::document::SpecDocument;
    pub use crate::frontmatter::{self, Metadata};
    pub use crate::model::{Phase, Priority, Progress, Spec, SpecStatus, SpecSummary, Task};
    pub use crate::progress::parse_progress;
    pub use crate::slug::slugify;
}
