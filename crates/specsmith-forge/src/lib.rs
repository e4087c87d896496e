//! AI-assisted spec creation
//!
//! Collects a markdown snapshot of the project, asks a [`SpecGenerator`] for
//! a SPEC.md, and stores the result through the lifecycle engine. The engine
//! only parses what comes back; it does not judge its quality.
//!
//! # Example
//!
//! ```rust,no_run
//! use specsmith_core::{Lifecycle, ProjectLayout};
//! use specsmith_forge::{forge, AnthropicGenerator, ForgeOptions};
//!
//! # async fn run() -> Result<(), specsmith_forge::ForgeError> {
//! let engine = Lifecycle::open(ProjectLayout::new("."))?;
//! let generator = AnthropicGenerator::from_env(None, &engine.config().forge)?;
//! let outcome = forge(&engine, &generator, "CSV export for invoices", &ForgeOptions::default()).await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod context;
pub mod error;
pub mod forge;
pub mod generator;
pub mod prompt;

pub use context::gather_context;
pub use error::{ForgeError, ForgeResult};
pub use forge::{forge, ForgeOptions, ForgeOutcome};
pub use generator::{AnthropicGenerator, GenerationRequest, SpecGenerator};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
