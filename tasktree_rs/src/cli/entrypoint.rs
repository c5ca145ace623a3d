//! Shared CLI entry point for both `tasktree` and `tt` binaries.
//!
//! Both binaries are thin wrappers; everything from argv parsing to the exit
//! code lives here.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use tracing::debug;

use super::options::{Action, ParsedCommand, parse_command};
use super::reporter::TerminalReporter;
use crate::colors::Painter;
use crate::context::TaskContext;
use crate::error::TaskError;
use crate::route::route;
use crate::task::{Resolution, resolve};
use crate::types::{EXIT_USAGE, OutputMode};
use crate::{logging, system};

/// Options controlling binary-specific behavior.
pub struct EntryOptions {
    /// Name shown in `--version` output (e.g. "tasktree" or "tt").
    pub binary_name: &'static str,
}

/// Run the CLI with the given options. This is the shared main() body.
pub fn run(opts: &EntryOptions) -> ExitCode {
    let raw_args: Vec<String> = std::env::args().skip(1).collect();
    ExitCode::from(exit_code_to_u8(run_with_args(opts, &raw_args)))
}

/// Run with explicit arguments and return the process exit code.
pub fn run_with_args(opts: &EntryOptions, args: &[String]) -> i32 {
    let parsed = match parse_command(args) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("[{}][error] {}", opts.binary_name, err);
            return 1;
        }
    };

    logging::init(parsed.global.verbose, parsed.global.quiet);

    match execute(opts, &parsed) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("[{}][error] {:#}", opts.binary_name, err);
            1
        }
    }
}

fn execute(opts: &EntryOptions, parsed: &ParsedCommand) -> Result<i32> {
    if parsed.action == Action::Version {
        println!("{} {}", opts.binary_name, env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    let root = project_root(parsed.global.root.as_deref())?;
    let ctx = TaskContext::load(&root)
        .with_context(|| format!("failed to load tasks for {}", root.display()))?;
    let color = parsed
        .global
        .color
        .or(ctx.config.color)
        .unwrap_or_default();
    let painter = Painter::new(color);
    debug!(
        "root {} with {} tasks, running as root: {}",
        root.display(),
        ctx.registry().len(),
        system::is_root()
    );

    match &parsed.action {
        Action::Help => {
            println!("{}", ctx.renderer(painter).full_usage(ctx.registry()));
            println!("\n{}", runner_help(opts.binary_name));
            Ok(0)
        }
        Action::List => {
            list_tasks(&ctx, parsed.global.output_mode())?;
            Ok(0)
        }
        Action::Which(token) => which(&ctx, token, parsed.global.output_mode()),
        Action::Version => Ok(0),
        Action::Run => {
            let mut reporter = TerminalReporter::new(&ctx, painter, parsed.global.quiet);
            match route(&parsed.input, &ctx, &mut reporter) {
                Ok(outcome) => Ok(outcome.exit_code()),
                Err(TaskError::UsageViolation { task, reason }) => {
                    eprintln!("[{}][error] '{}' {}", opts.binary_name, task, reason);
                    match ctx.renderer(painter).task_usage(task.as_str()) {
                        Ok(usage) => print!("{}", usage),
                        Err(e) => debug!("{}", e),
                    }
                    Ok(EXIT_USAGE)
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}

fn project_root(requested: Option<&Path>) -> Result<PathBuf> {
    let root = match requested {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    if !root.is_dir() {
        bail!("Root \"{}\" is not a directory", root.display());
    }
    Ok(root.canonicalize().unwrap_or(root))
}

fn list_tasks(ctx: &TaskContext, mode: OutputMode) -> Result<()> {
    match mode {
        OutputMode::Json => {
            let ids: Vec<_> = ctx.registry().iter().collect();
            println!("{}", serde_json::to_string_pretty(&ids)?);
        }
        OutputMode::Human => {
            for id in ctx.registry() {
                println!("{}", id);
            }
        }
    }
    Ok(())
}

/// Print what `token` resolves to. Exits 2 when nothing matches.
fn which(ctx: &TaskContext, token: &str, mode: OutputMode) -> Result<i32> {
    let resolution = resolve(Some(token), ctx.registry());
    match mode {
        OutputMode::Json => {
            let report = serde_json::json!({
                "token": token,
                "resolution": resolution,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputMode::Human => match &resolution {
            Resolution::UseDefault => println!("{}", ctx.config.default_task),
            Resolution::Resolved(id) => println!("{}", id),
            Resolution::Ambiguous(candidates) => {
                println!("{} is ambiguous:", token);
                for id in candidates {
                    println!("{}", id);
                }
            }
            Resolution::NotFound => println!("{} matches no task", token),
        },
    }

    Ok(if resolution == Resolution::NotFound {
        EXIT_USAGE
    } else {
        0
    })
}

fn runner_help(binary_name: &str) -> String {
    format!(
        "Runner options (before the task name):\n  \
  -h, --help              Show this help\n  \
  -V, --version           Show version\n  \
  --list                  List task identifiers\n  \
  --which <TOKEN>         Show what TOKEN resolves to without running it\n  \
  --root <DIR>            Project root (default: current directory)\n  \
  --color <MODE>          auto, always or never\n  \
  -q, --quiet             No 'executing task' notice, errors only on stderr\n  \
  -v, --verbose           Debug logging on stderr\n  \
  --json                  JSON output for --list and --which\n  \
  --                      End of runner options\n\n\
Tasks are matched by prefix: '{0} bu' runs 'build' if nothing else starts\n\
with 'bu', and '{0} d:m' runs 'db:migrate'. Set TASKTREE_LOG to override the\n\
log filter.",
        binary_name
    )
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
