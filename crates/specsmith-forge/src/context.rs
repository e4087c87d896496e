//! Project context sent alongside a generation request
//!
//! The context is plain markdown: a shallow directory tree, package
//! manifests, the names of existing specs, and any files the user asked to
//! include. Gathering is best-effort; unreadable entries are skipped.

use specsmith_core::{ForgeConfig, ProjectLayout, SpecStore};
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Directories never listed in the tree
pub const SKIPPED_DIRS: &[&str] = &["node_modules", "__pycache__", "venv", ".venv", "dist", "build"];

/// Manifests copied into the context when present at the root
pub const MANIFESTS: &[&str] = &[
    "package.json",
    "pyproject.toml",
    "Cargo.toml",
    "go.mod",
    "Gemfile",
    "pom.xml",
];

/// Files listed per directory
pub const MAX_FILES_PER_DIR: usize = 20;

/// Build the context block for a project
///
/// `includes` are paths relative to the project root.
#[must_use]
pub fn gather_context(layout: &ProjectLayout, includes: &[String], config: &ForgeConfig) -> String {
    let root = layout.root();
    let mut parts = vec!["## Project Structure\n".to_string()];
    parts.extend(project_tree(root, config.context_depth));

    for manifest in MANIFESTS {
        if let Some(text) = read_prefix(&root.join(manifest), config.manifest_limit) {
            parts.push(format!("\n## {manifest}\n```\n{text}\n```"));
        }
    }

    let store = SpecStore::new(layout.clone());
    let existing: Vec<String> = store
        .dir_names()
        .unwrap_or_default()
        .into_iter()
        .filter(|id| store.exists(id))
        .collect();
    if !existing.is_empty() {
        parts.push("\n## Existing Specs".to_string());
        parts.extend(existing.iter().map(|id| format!("- {id}")));
    }

    for include in includes {
        let path = root.join(include);
        if !path.is_file() {
            tracing::warn!(path = %include, "include file not found, skipping");
            continue;
        }
        if let Some(text) = read_prefix(&path, config.include_limit) {
            parts.push(format!("\n## {include}\n```\n{text}\n```"));
        }
    }

    parts.join("\n")
}

/// Directories down to `depth` levels, each followed by its first files
fn project_tree(root: &Path, depth: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if depth == 0 {
        return lines;
    }

    let walker = WalkDir::new(root)
        .max_depth(depth - 1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_type().is_dir() && (e.depth() == 0 || !is_skipped(e.file_name())));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable directory");
                continue;
            }
        };

        let indent = "  ".repeat(entry.depth());
        let name = if entry.depth() == 0 {
            root.file_name().unwrap_or(root.as_os_str())
        } else {
            entry.file_name()
        };
        lines.push(format!("{indent}{}/", name.to_string_lossy()));

        for file in file_names(entry.path()).into_iter().take(MAX_FILES_PER_DIR) {
            lines.push(format!("{indent}  {file}"));
        }
    }
    lines
}

fn is_skipped(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}

/// Sorted names of the regular files directly inside `dir`
fn file_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// First `limit` characters of a UTF-8 file
fn read_prefix(path: &Path, limit: usize) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text.chars().take(limit).collect()),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn tree_skips_noise_and_stops_at_depth() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(root, "src/main.rs", "");
        touch(root, "src/a/b/deep.rs", "");
        touch(root, "node_modules/x/index.js", "");
        touch(root, ".git/HEAD", "");

        let lines = project_tree(root, 3);
        let text = lines.join("\n");
        assert!(text.contains("  src/\n    main.rs"));
        assert!(text.contains("    a/"));
        assert!(!lines.iter().any(|l| l.trim() == "b/"));
        assert!(!text.contains("node_modules"));
        assert!(!text.contains(".git"));
    }

    #[test]
    fn files_per_directory_are_capped() {
        let tmp = TempDir::new().unwrap();
        for i in 0..30 {
            touch(tmp.path(), &format!("f{i:02}.txt"), "");
        }
        let lines = project_tree(tmp.path(), 1);
        assert_eq!(lines.len(), 1 + MAX_FILES_PER_DIR);
        assert_eq!(lines[1], "  f00.txt");
    }

    #[test]
    fn manifests_are_truncated() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "Cargo.toml", &"x".repeat(5000));
        let config = ForgeConfig::default();
        let context = gather_context(&ProjectLayout::new(tmp.path()), &[], &config);
        assert!(context.contains("## Cargo.toml\n```\n"));
        assert!(context.contains(&format!("```\n{}\n```", "x".repeat(config.manifest_limit))));
        assert!(!context.contains(&"x".repeat(config.manifest_limit + 1)));
    }
}
