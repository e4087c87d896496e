//! Coding-tool configuration snippets
//!
//! Each supported tool reads project instructions from a known file. Setup
//! appends a short section telling the tool how to work with `.specs/`,
//! guarded by [`MARKER`] so it is only added once.

use std::fs;
use std::path::{Path, PathBuf};

/// Text identifying an installed snippet
pub const MARKER: &str = "Spec Management (Spec Smith)";

/// Tool name and its config file candidates, most preferred first
pub const TOOLS: &[(&str, &[&str])] = &[
    ("aider", &[".aider/conventions.md"]),
    ("cline", &[".clinerules"]),
    ("codex", &["AGENTS.md", "codex.md"]),
    ("cursor", &[".cursor/rules", ".cursorrules"]),
    ("gemini", &["GEMINI.md"]),
    ("windsurf", &[".windsurfrules"]),
];

/// Tool handled through its plugin system instead of a config file
pub const PLUGIN_TOOL: &str = "claude-code";

/// Install steps for [`PLUGIN_TOOL`]
pub const PLUGIN_INSTRUCTIONS: &str = "\
Claude Code uses the plugin system. Install SpecSmith as a plugin:

  /plugin marketplace add ngvoicu/specsmith-forge
  /plugin install spec-smith

Or install the skill only:
  npx skills add ngvoicu/specsmith-forge -a claude-code
";

/// Setup failure
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// Tool name not recognized
    #[error("unknown tool: {tool}; supported tools: {supported}")]
    UnknownTool {
        /// Requested name
        tool: String,
        /// Comma-separated supported names
        supported: String,
    },

    /// Config file could not be read or written
    #[error("io error at {}: {source}", path.display())]
    Io {
        /// File being touched
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// What setup did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// Plugin-based tool; nothing written
    PluginInstructions,
    /// Dry run
    Preview {
        /// Snippet that would be written
        snippet: String,
    },
    /// Marker already present
    AlreadyConfigured {
        /// Config file
        path: PathBuf,
    },
    /// Snippet appended to an existing file
    Appended {
        /// Config file
        path: PathBuf,
    },
    /// Config file created with the snippet
    Created {
        /// Config file
        path: PathBuf,
    },
}

/// Snippet text for a tool
#[must_use]
pub fn snippet(tool: &str) -> String {
    format!(
        "## {MARKER}

This project tracks work as specs under `.specs/` ({tool} instructions).

- Before starting, read `.specs/active` and open `.specs/specs/<id>/SPEC.md`.
- Work through the current phase; the task marked `\u{2190} current` is next.
- Check off tasks (`- [x]`) as they are done and move the current marker.
- Record decisions in the Decision Log table.
- Before stopping, update the Resume Context section with where work left off.
- Use `specsmith status`, `specsmith pause --context \"...\"` and
  `specsmith switch <id>` to manage specs.
"
    )
}

/// Names accepted by [`setup`], sorted
#[must_use]
pub fn supported_tools() -> Vec<&'static str> {
    let mut names: Vec<_> = TOOLS.iter().map(|(name, _)| *name).collect();
    names.push(PLUGIN_TOOL);
    names.sort_unstable();
    names
}

/// Install the snippet for `tool` under `root`
///
/// The first existing candidate file is used; if none exists the first
/// candidate is created.
///
/// # Errors
/// `UnknownTool` for unrecognized names, `Io` if the file cannot be read or
/// written.
pub fn setup(root: &Path, tool: &str, dry_run: bool) -> Result<SetupOutcome, SetupError> {
    let tool = tool.to_lowercase();
    if tool == PLUGIN_TOOL {
        return Ok(SetupOutcome::PluginInstructions);
    }

    let Some((_, candidates)) = TOOLS.iter().find(|(name, _)| *name == tool) else {
        return Err(SetupError::UnknownTool {
            tool,
            supported: supported_tools().join(", "),
        });
    };

    let text = snippet(&tool);
    if dry_run {
        return Ok(SetupOutcome::Preview { snippet: text });
    }

    let existing = candidates
        .iter()
        .map(|c| root.join(c))
        .find(|path| path.exists());

    let Some(path) = existing else {
        let path = root.join(candidates[0]);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        fs::write(&path, text).map_err(|e| io_error(&path, e))?;
        tracing::debug!(path = %path.display(), "tool config created");
        return Ok(SetupOutcome::Created { path });
    };

    let current = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
    if current.contains(MARKER) {
        return Ok(SetupOutcome::AlreadyConfigured { path });
    }

    fs::write(&path, format!("{current}\n\n{text}")).map_err(|e| io_error(&path, e))?;
    tracing::debug!(path = %path.display(), "tool config appended");
    Ok(SetupOutcome::Appended { path })
}

fn io_error(path: &Path, source: std::io::Error) -> SetupError {
    SetupError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_first_candidate() {
        let tmp = TempDir::new().unwrap();
        let outcome = setup(tmp.path(), "cursor", false).unwrap();
        let path = tmp.path().join(".cursor/rules");
        assert_eq!(outcome, SetupOutcome::Created { path: path.clone() });
        assert!(fs::read_to_string(path).unwrap().contains(MARKER));
    }

    #[test]
    fn prefers_existing_candidate_and_appends_once() {
        let tmp = TempDir::new().unwrap();
        let legacy = tmp.path().join(".cursorrules");
        fs::write(&legacy, "Use tabs.").unwrap();

        let first = setup(tmp.path(), "Cursor", false).unwrap();
        assert_eq!(first, SetupOutcome::Appended { path: legacy.clone() });
        let text = fs::read_to_string(&legacy).unwrap();
        assert!(text.starts_with("Use tabs.\n\n## "));

        let second = setup(tmp.path(), "cursor", false).unwrap();
        assert_eq!(second, SetupOutcome::AlreadyConfigured { path: legacy.clone() });
        assert_eq!(fs::read_to_string(&legacy).unwrap(), text);
    }

    #[test]
    fn unknown_tool_lists_supported() {
        let tmp = TempDir::new().unwrap();
        let err = setup(tmp.path(), "notepad", false).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("notepad"));
        assert!(message.contains("aider, claude-code, cline, codex, cursor, gemini, windsurf"));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let outcome = setup(tmp.path(), "codex", true).unwrap();
        assert!(matches!(outcome, SetupOutcome::Preview { ref snippet } if snippet.contains(MARKER)));
        assert!(!tmp.path().join("AGENTS.md").exists());
    }
}
