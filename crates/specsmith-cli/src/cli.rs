//! Argument definitions

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

fn spec_id(help: &'static str) -> Arg {
    Arg::new("id").value_name("SPEC_ID").help(help)
}

/// Full command tree
#[must_use]
pub fn build_cli() -> Command {
    Command::new("specsmith")
        .version(crate::VERSION)
        .about("Spec-driven development from the terminal")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .long("path")
                .short('p')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Project root directory"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr"),
        )
        .subcommand(Command::new("init").about("Initialize .specs/ in the current project"))
        .subcommand(
            Command::new("new")
                .about("Create a new spec from a title")
                .arg(Arg::new("title").required(true).help("Spec title"))
                .arg(
                    Arg::new("priority")
                        .long("priority")
                        .value_parser(["high", "medium", "low"])
                        .help("Priority (default from config, else medium)"),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Show progress of a spec")
                .arg(spec_id("Spec ID (default: active spec)")),
        )
        .subcommand(Command::new("list").about("List all specs grouped by status"))
        .subcommand(
            Command::new("switch")
                .about("Switch active spec (pauses current, resumes target)")
                .arg(spec_id("Spec ID to switch to").required(true)),
        )
        .subcommand(
            Command::new("pause")
                .about("Mark a spec as paused")
                .arg(spec_id("Spec ID (default: active spec)"))
                .arg(
                    Arg::new("context")
                        .long("context")
                        .value_name("MESSAGE")
                        .help("Add a note to the Resume Context section"),
                ),
        )
        .subcommand(
            Command::new("resume")
                .about("Reactivate a paused spec")
                .arg(spec_id("Spec ID (default: active spec)")),
        )
        .subcommand(
            Command::new("complete")
                .about("Mark a spec as completed")
                .arg(spec_id("Spec ID (default: active spec)"))
                .arg(
                    Arg::new("force")
                        .long("force")
                        .action(ArgAction::SetTrue)
                        .help("Complete even with unchecked tasks"),
                ),
        )
        .subcommand(
            Command::new("archive")
                .about("Archive a spec")
                .arg(spec_id("Spec ID to archive").required(true)),
        )
        .subcommand(
            Command::new("edit")
                .about("Open SPEC.md in $EDITOR")
                .arg(spec_id("Spec ID (default: active spec)")),
        )
        .subcommand(
            Command::new("setup")
                .about("Configure a coding tool to follow specsmith specs")
                .arg(
                    Arg::new("tool")
                        .required(true)
                        .help("cursor, windsurf, cline, codex, aider, gemini or claude-code"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Show what would be appended"),
                ),
        )
        .subcommand(
            Command::new("forge")
                .about("AI-assisted spec creation (needs ANTHROPIC_API_KEY)")
                .arg(Arg::new("description").required(true).help("What to build"))
                .arg(Arg::new("model").long("model").help("Model to use"))
                .arg(
                    Arg::new("include")
                        .long("include")
                        .action(ArgAction::Append)
                        .help("Extra file to include in the context (repeatable)"),
                )
                .arg(
                    Arg::new("edit")
                        .long("edit")
                        .action(ArgAction::SetTrue)
                        .help("Open in $EDITOR after creation"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Print instead of saving"),
                )
                .arg(Arg::new("api-key").long("api-key").help("Anthropic API key")),
        )
        .subcommand(Command::new("version").about("Show version"))
}
