//! Subcommand handlers
//!
//! Handlers write human-readable output to the given writer and return
//! errors for the caller to print. Informational no-ops ("already paused")
//! are successes.

use crate::display::{render_listing, render_status};
use crate::editor::open_in_editor;
use crate::setup::{setup, SetupOutcome, PLUGIN_INSTRUCTIONS};
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use specsmith_core::{Lifecycle, Outcome, ProjectLayout, SpecError, SwitchOutcome};
use specsmith_doc::Priority;
use specsmith_forge::{forge, AnthropicGenerator, ForgeOptions, ForgeOutcome, SpecGenerator};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Dispatch parsed arguments
///
/// # Errors
/// Any engine, setup, forge or output failure.
pub async fn run(matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let explicit = matches.get_one::<PathBuf>("path").map(PathBuf::as_path);

    match matches.subcommand() {
        Some(("init", _)) => init(&direct_root(explicit)?, out),
        Some(("new", args)) => {
            let title = required(args, "title")?;
            let priority = args
                .get_one::<String>("priority")
                .map(|p| p.parse::<Priority>())
                .transpose()?;
            new(&open(explicit)?, title, priority, out)
        }
        Some(("status", args)) => status(&open(explicit)?, optional(args, "id"), out),
        Some(("list", _)) => list(&open(explicit)?, out),
        Some(("switch", args)) => switch(&open(explicit)?, required(args, "id")?, out),
        Some(("pause", args)) => pause(
            &open(explicit)?,
            optional(args, "id"),
            optional(args, "context"),
            out,
        ),
        Some(("resume", args)) => resume(&open(explicit)?, optional(args, "id"), out),
        Some(("complete", args)) => complete(
            &open(explicit)?,
            optional(args, "id"),
            args.get_flag("force"),
            out,
        ),
        Some(("archive", args)) => archive(&open(explicit)?, required(args, "id")?, out),
        Some(("edit", args)) => edit(&open(explicit)?, optional(args, "id")),
        Some(("setup", args)) => setup_tool(
            &direct_root(explicit)?,
            required(args, "tool")?,
            args.get_flag("dry-run"),
            out,
        ),
        Some(("forge", args)) => forge_spec(&open(explicit)?, args, out).await,
        Some(("version", _)) => {
            writeln!(out, "specsmith {}", crate::VERSION)?;
            Ok(())
        }
        Some((other, _)) => bail!("unknown command: {other}"),
        None => bail!("no command given; see --help"),
    }
}

/// `--path` as given, else the current directory
fn direct_root(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => std::env::current_dir().context("cannot read current directory"),
    }
}

/// `--path`, else the nearest ancestor holding `.specs/`, else the current
/// directory
fn project_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("cannot read current directory")?;
    Ok(ProjectLayout::discover(&cwd).map_or(cwd, |layout| layout.root().to_path_buf()))
}

fn open(explicit: Option<&Path>) -> Result<Lifecycle> {
    let layout = ProjectLayout::new(project_root(explicit)?);
    Ok(Lifecycle::open(layout)?)
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str> {
    optional(args, name).with_context(|| format!("missing argument: {name}"))
}

fn optional<'a>(args: &'a ArgMatches, name: &str) -> Option<&'a str> {
    args.get_one::<String>(name).map(String::as_str)
}

fn init(root: &Path, out: &mut dyn Write) -> Result<()> {
    let layout = ProjectLayout::new(root);
    let report = layout.init()?;

    if report.already_initialized {
        writeln!(out, ".specs/ already exists at {}", layout.specs_dir().display())?;
        writeln!(out, "Checking for missing files...")?;
    }
    for path in &report.created {
        writeln!(out, "Created {}", path.display())?;
    }
    writeln!(out, "\n.specs/ initialized successfully.")?;
    Ok(())
}

fn new(engine: &Lifecycle, title: &str, priority: Option<Priority>, out: &mut dyn Write) -> Result<()> {
    let created = engine.create(title, priority)?;
    writeln!(out, "Created {}", created.path.display())?;

    match created.still_active {
        None => writeln!(out, "Set '{}' as active spec", created.id)?,
        Some(current) => {
            writeln!(out, "Note: '{current}' is still the active spec")?;
            writeln!(out, "Run: specsmith switch {} to switch", created.id)?;
        }
    }
    Ok(())
}

fn status(engine: &Lifecycle, id: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let id = engine.resolve(id).map_err(hint_list)?;
    let report = engine.status(&id)?;
    write!(out, "{}", render_status(&report))?;
    Ok(())
}

fn list(engine: &Lifecycle, out: &mut dyn Write) -> Result<()> {
    if !engine.layout().specs_subdir().is_dir() {
        bail!("no specs found; run `specsmith init` first");
    }
    let listing = engine.list()?;
    write!(out, "{}", render_listing(&listing))?;
    Ok(())
}

fn switch(engine: &Lifecycle, target: &str, out: &mut dyn Write) -> Result<()> {
    match engine.switch(target)? {
        SwitchOutcome::AlreadyActive { id } => {
            writeln!(out, "'{id}' is already the active spec.")?;
        }
        SwitchOutcome::Switched {
            paused,
            stale_pointer,
            resumed,
        } => {
            if let Some(stale) = stale_pointer {
                writeln!(out, "Note: previous active spec '{stale}' no longer exists")?;
            }
            if let Some(paused) = paused {
                report_pause(&paused, None, out)?;
            }
            report_resume(&resumed, out)?;
            writeln!(out, "\nSwitched to {target}")?;
        }
    }
    Ok(())
}

fn pause(engine: &Lifecycle, id: Option<&str>, note: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let id = engine.resolve(id)?;
    let outcome = engine.pause(&id, note)?;
    report_pause(&outcome, note, out)
}

fn resume(engine: &Lifecycle, id: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let id = engine.resolve(id)?;
    let outcome = engine.resume(&id)?;
    report_resume(&outcome, out)
}

fn complete(engine: &Lifecycle, id: Option<&str>, force: bool, out: &mut dyn Write) -> Result<()> {
    let id = engine.resolve(id)?;
    engine.complete(&id, force)?;
    writeln!(out, "Completed {id} \u{2713}")?;
    Ok(())
}

fn archive(engine: &Lifecycle, id: &str, out: &mut dyn Write) -> Result<()> {
    engine.archive(id)?;
    writeln!(out, "Archived {id} \u{1f4e6}")?;
    Ok(())
}

fn edit(engine: &Lifecycle, id: Option<&str>) -> Result<()> {
    let id = engine.resolve(id)?;
    if !engine.store().exists(&id) {
        return Err(SpecError::not_found(id).into());
    }
    open_in_editor(&engine.config().editor_command(), &engine.store().path(&id))
}

fn setup_tool(root: &Path, tool: &str, dry_run: bool, out: &mut dyn Write) -> Result<()> {
    match setup(root, tool, dry_run)? {
        SetupOutcome::PluginInstructions => write!(out, "{PLUGIN_INSTRUCTIONS}")?,
        SetupOutcome::Preview { snippet } => {
            writeln!(out, "Would append to config file for {tool}:\n")?;
            write!(out, "{snippet}")?;
        }
        SetupOutcome::AlreadyConfigured { path } => {
            writeln!(out, "SpecSmith is already configured in {}", path.display())?;
        }
        SetupOutcome::Appended { path } | SetupOutcome::Created { path } => {
            writeln!(out, "Configured {tool}: {}", path.display())?;
        }
    }
    Ok(())
}

async fn forge_spec(engine: &Lifecycle, args: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let description = required(args, "description")?;
    let api_key = args.get_one::<String>("api-key").cloned();

    let mut generator = AnthropicGenerator::from_env(api_key, &engine.config().forge)?;
    if let Some(model) = args.get_one::<String>("model") {
        generator = generator.with_model(model);
    }
    let options = ForgeOptions {
        includes: args
            .get_many::<String>("include")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        dry_run: args.get_flag("dry-run"),
    };

    writeln!(out, "Forging spec: {description} (model {})\n", generator.model())?;
    match forge(engine, &generator, description, &options).await? {
        ForgeOutcome::Preview { content } => {
            writeln!(out, "Generated SPEC.md:\n")?;
            writeln!(out, "{content}")?;
        }
        ForgeOutcome::Saved { imported, .. } => {
            if imported.overwritten {
                writeln!(out, "Warning: spec '{}' already existed and was overwritten.", imported.id)?;
            }
            writeln!(out, "Created spec: {}", imported.id)?;
            writeln!(out, "  {}", imported.path.display())?;
            if args.get_flag("edit") {
                open_in_editor(&engine.config().editor_command(), &imported.path)?;
            }
        }
    }
    Ok(())
}

fn report_pause(outcome: &Outcome, note: Option<&str>, out: &mut dyn Write) -> Result<()> {
    match outcome {
        Outcome::Changed(transition) => {
            writeln!(out, "Paused {}", transition.id)?;
            if note.is_some() && !transition.note_saved {
                writeln!(
                    out,
                    "Note: '{}' has no Resume Context section; context not saved",
                    transition.id
                )?;
            }
        }
        Outcome::Unchanged { id, .. } => writeln!(out, "'{id}' is already paused.")?,
    }
    Ok(())
}

fn report_resume(outcome: &Outcome, out: &mut dyn Write) -> Result<()> {
    match outcome {
        Outcome::Changed(transition) => writeln!(out, "Resumed {}", transition.id)?,
        Outcome::Unchanged { id, .. } => writeln!(out, "'{id}' is already active.")?,
    }
    Ok(())
}

fn hint_list(err: SpecError) -> anyhow::Error {
    match err {
        SpecError::NoActiveSpec => anyhow::anyhow!("no active spec; use `specsmith list` to see all specs"),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::build_cli;
    use tempfile::TempDir;

    async fn invoke(root: &Path, args: &[&str]) -> (Result<()>, String) {
        let mut argv = vec!["specsmith"];
        argv.extend_from_slice(args);
        let root = root.to_string_lossy().into_owned();
        argv.extend_from_slice(&["--path", root.as_str()]);

        let matches = build_cli().try_get_matches_from(argv).unwrap();
        let mut out = Vec::new();
        let result = run(&matches, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn lifecycle_through_handlers() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        let (result, output) = invoke(root, &["init"]).await;
        result.unwrap();
        assert!(output.contains("initialized successfully"));

        let (result, output) = invoke(root, &["new", "Feature A"]).await;
        result.unwrap();
        assert!(output.contains("Set 'feature-a' as active spec"));

        let (result, output) = invoke(root, &["new", "Feature B", "--priority", "high"]).await;
        result.unwrap();
        assert!(output.contains("Note: 'feature-a' is still the active spec"));

        let (result, output) = invoke(root, &["switch", "feature-b"]).await;
        result.unwrap();
        assert!(output.contains("Paused feature-a"));
        assert!(output.contains("'feature-b' is already active."));
        assert!(output.contains("Switched to feature-b"));

        let (result, output) = invoke(root, &["pause", "--context", "half way"]).await;
        result.unwrap();
        assert_eq!(output, "Paused feature-b\n");

        let (result, output) = invoke(root, &["pause", "feature-b"]).await;
        result.unwrap();
        assert_eq!(output, "'feature-b' is already paused.\n");

        let (result, _) = invoke(root, &["status"]).await;
        assert!(result.unwrap_err().to_string().contains("specsmith list"));
    }

    #[tokio::test]
    async fn complete_without_force_fails() {
        let tmp = TempDir::new().unwrap();
        invoke(tmp.path(), &["init"]).await.0.unwrap();
        invoke(tmp.path(), &["new", "Work"]).await.0.unwrap();

        let (result, output) = invoke(tmp.path(), &["complete"]).await;
        let message = result.unwrap_err().to_string();
        assert!(message.contains("8 task(s)"));
        assert!(output.is_empty());
    }
}
