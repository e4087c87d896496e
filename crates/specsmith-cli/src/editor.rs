//! External editor launch

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// Run `command` on `path` and wait for it to exit
///
/// `command` may carry arguments (`code --wait`); they are split on
/// whitespace and placed before the path.
///
/// # Errors
/// Fails on an empty command, a spawn failure, or a non-zero exit.
pub fn open_in_editor(command: &str, path: &Path) -> Result<()> {
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        bail!("editor command is empty");
    };

    tracing::debug!(editor = %command, path = %path.display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .with_context(|| format!("failed to launch editor '{program}'"))?;

    if !status.success() {
        bail!("editor '{program}' exited with {status}");
    }
    Ok(())
}
