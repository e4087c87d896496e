//! specsmith command-line interface
//!
//! Argument parsing, plain-text rendering, editor launch and tool setup
//! around the lifecycle engine. `main.rs` only wires these together.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cli;
pub mod commands;
pub mod display;
pub mod editor;
pub mod logging;
pub mod setup;

pub use cli::build_cli;
pub use commands::run;
pub use logging::init_tracing;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
