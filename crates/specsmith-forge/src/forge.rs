//! Generate a spec and hand it to the lifecycle engine

use crate::context::gather_context;
use crate::error::ForgeResult;
use crate::generator::{GenerationRequest, SpecGenerator};
use specsmith_core::{Imported, Lifecycle};

/// Options for one forge run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForgeOptions {
    /// Files to include in the context, relative to the project root
    pub includes: Vec<String>,
    /// Return the text without saving it
    pub dry_run: bool,
}

/// What a forge run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForgeOutcome {
    /// Dry run: generated text only
    Preview {
        /// Generated document
        content: String,
    },
    /// Document saved and made active
    Saved {
        /// Generated document
        content: String,
        /// Where it was stored
        imported: Imported,
    },
}

/// Gather context, generate, and store the result
///
/// # Errors
/// `Spec(NotInitialized)` before any request when `.specs/` is missing,
/// provider errors from the generator, and storage errors from the engine.
pub async fn forge<G>(
    engine: &Lifecycle,
    generator: &G,
    description: &str,
    options: &ForgeOptions,
) -> ForgeResult<ForgeOutcome>
where
    G: SpecGenerator + ?Sized,
{
    engine.layout().ensure_initialized()?;

    let context = gather_context(engine.layout(), &options.includes, &engine.config().forge);
    let request = GenerationRequest {
        description: description.to_string(),
        context,
        today: engine.clock().today_string(),
    };

    tracing::info!(model = %generator.model(), "generating spec");
    let content = generator.generate(&request).await?;

    if options.dry_run {
        return Ok(ForgeOutcome::Preview { content });
    }

    let imported = engine.import_generated(&content, description)?;
    Ok(ForgeOutcome::Saved { content, imported })
}
