//! Specsmith lifecycle engine
//!
//! Filesystem side of spec tracking. A project keeps its state under
//! `.specs/`: one SPEC.md per spec, a single active pointer, and a registry
//! table derived from the documents.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │                Lifecycle                  │
//! │  create pause resume switch complete ...  │
//! └─────┬───────────────┬───────────────┬─────┘
//!       │               │               │
//! ┌─────▼─────┐  ┌──────▼──────┐  ┌─────▼─────┐
//! │ SpecStore │  │ActivePointer│  │ Registry  │
//! │  SPEC.md  │  │   active    │  │registry.md│
//! └───────────┘  └─────────────┘  └───────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use specsmith_core::{Lifecycle, ProjectLayout};
//!
//! let layout = ProjectLayout::new(".");
//! layout.init()?;
//! let engine = Lifecycle::open(layout)?;
//! let created = engine.create("My Feature", None)?;
//! assert_eq!(created.id, "my-feature");
//! engine.pause("my-feature", Some("waiting on review"))?;
//! # Ok::<(), specsmith_core::SpecError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod active;
pub mod clock;
pub mod config;
pub mod error;
pub mod layout;
pub mod lifecycle;
pub mod registry;
pub mod store;
pub mod transition;

pub use active::ActivePointer;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ForgeConfig, SpecsmithConfig};
pub use error::{SpecError, SpecResult};
pub use layout::{InitReport, ProjectLayout};
pub use lifecycle::Lifecycle;
pub use registry::{Registry, RegistryEntry, REGISTRY_HEADER};
pub use store::SpecStore;
pub use transition::{
    allowed_transitions, Created, Imported, Listing, Outcome, SpecStatusReport, SwitchOutcome,
    Transition,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the engine
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::error::{SpecError, SpecResult};
    pub use crate::layout::ProjectLayout;
    pub use crate::lifecycle::Lifecycle;
    pub use crate::transition::{Outcome, SwitchOutcome};
    pub use specsmith_doc::{Priority, SpecStatus};
}
