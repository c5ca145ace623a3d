//! Global option parsing for `tasktree [GLOBAL OPTIONS] [TASK] [ARGS...]`.
//!
//! Options are only read before the task token; the token and everything
//! after it belong to the task and are handed over as a [`ParsedInput`].

use std::path::PathBuf;

use strsim::levenshtein;

use crate::input::ParsedInput;
use crate::types::{ColorMode, OutputMode};

/// Flags recognized before the task token, used for suggestions.
const GLOBAL_FLAGS: &[&str] = &[
    "--help",
    "--version",
    "--list",
    "--which",
    "--root",
    "--color",
    "--quiet",
    "--verbose",
    "--json",
];

/// Global options that apply to every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    /// Output as JSON (only `--list` and `--which` produce JSON)
    pub json: bool,

    /// Suppress the "executing task" notice and lower logging to errors
    pub quiet: bool,

    /// Debug logging on stderr
    pub verbose: bool,

    /// Overrides the config file's `color`
    pub color: Option<ColorMode>,

    /// Project root; defaults to the current directory
    pub root: Option<PathBuf>,
}

impl GlobalOptions {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

/// What the runner was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Help,
    Version,
    List,
    /// Print the resolution of a token without running anything.
    Which(String),
    /// Route the task input.
    Run,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub global: GlobalOptions,
    pub action: Action,
    /// Task token and arguments.
    pub input: ParsedInput,
}

fn parse_color_mode(value: &str) -> Result<ColorMode, String> {
    match value.to_lowercase().as_str() {
        "auto" => Ok(ColorMode::Auto),
        "always" | "yes" | "true" => Ok(ColorMode::Always),
        "never" | "no" | "false" => Ok(ColorMode::Never),
        _ => Err(format!(
            "Invalid color mode '{}'. Use: auto, always, or never.",
            value
        )),
    }
}

fn suggest_similar_flag(input: &str) -> Option<&'static str> {
    let name = input.split('=').next().unwrap_or(input);
    let mut best_match: Option<(&str, usize)> = None;

    for &flag in GLOBAL_FLAGS {
        let distance = levenshtein(name, flag);
        if distance <= 2 && best_match.is_none_or(|(_, best)| distance < best) {
            best_match = Some((flag, distance));
        }
    }

    best_match.map(|(flag, _)| flag)
}

fn required_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{} requires a value", flag))
}

/// Split argv (without the program name) into global options and task input.
pub fn parse_command(args: &[String]) -> Result<ParsedCommand, String> {
    let mut global = GlobalOptions::default();
    let mut help = false;
    let mut version = false;
    let mut list = false;
    let mut which: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];

        match arg.as_str() {
            "--help" | "-h" => {
                help = true;
                i += 1;
            }
            "--version" | "-V" => {
                version = true;
                i += 1;
            }
            "--list" => {
                list = true;
                i += 1;
            }
            "--json" => {
                global.json = true;
                i += 1;
            }
            "--quiet" | "-q" => {
                global.quiet = true;
                i += 1;
            }
            "--verbose" | "-v" => {
                global.verbose = true;
                i += 1;
            }
            "--which" => {
                which = Some(required_value(args, i, "--which")?.to_string());
                i += 2;
            }
            _ if arg.starts_with("--which=") => {
                which = Some(arg.trim_start_matches("--which=").to_string());
                i += 1;
            }
            "--root" => {
                global.root = Some(PathBuf::from(required_value(args, i, "--root")?));
                i += 2;
            }
            _ if arg.starts_with("--root=") => {
                global.root = Some(PathBuf::from(arg.trim_start_matches("--root=")));
                i += 1;
            }
            "--color" => {
                // A bare `--color` leaves a following non-mode word as the task token
                match args.get(i + 1).map(|value| parse_color_mode(value)) {
                    Some(Ok(mode)) => {
                        global.color = Some(mode);
                        i += 2;
                    }
                    _ => {
                        global.color = Some(ColorMode::Always);
                        i += 1;
                    }
                }
            }
            _ if arg.starts_with("--color=") => {
                global.color = Some(parse_color_mode(arg.trim_start_matches("--color="))?);
                i += 1;
            }
            "--" => {
                i += 1;
                break;
            }
            _ if arg.starts_with('-') && arg != "-" => {
                let suggestion = suggest_similar_flag(arg);
                return Err(format!(
                    "Unknown option '{}'. {}Run with --help for usage.",
                    arg,
                    suggestion.map_or(String::new(), |s| format!("Did you mean: {}?\n", s))
                ));
            }
            // First positional: the task token
            _ => break,
        }
    }

    let input = ParsedInput::from_args(args[i..].iter().cloned());
    let action = if help {
        Action::Help
    } else if version {
        Action::Version
    } else if let Some(token) = which {
        Action::Which(token)
    } else if list {
        Action::List
    } else {
        Action::Run
    };

    Ok(ParsedCommand {
        global,
        action,
        input,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_runs_default() {
        let parsed = parse_command(&[]).unwrap();
        assert_eq!(parsed.action, Action::Run);
        assert_eq!(parsed.input.task_token(), None);
    }

    #[test]
    fn test_options_stop_at_task_token() {
        let parsed = parse_command(&args(&["-q", "build", "--verbose", "-h"])).unwrap();
        assert_eq!(parsed.action, Action::Run);
        assert!(parsed.global.quiet);
        assert!(!parsed.global.verbose);
        assert_eq!(parsed.input.task_token(), Some("build"));
        assert_eq!(parsed.input.task_arguments(), ["--verbose", "-h"]);
    }

    #[test]
    fn test_double_dash_ends_options() {
        let parsed = parse_command(&args(&["--", "db:m", "x"])).unwrap();
        assert_eq!(parsed.input.task_token(), Some("db:m"));
        assert_eq!(parsed.input.raw_arguments(), "x");
    }

    #[test]
    fn test_help_wins_over_other_actions() {
        let parsed = parse_command(&args(&["--list", "--version", "--help"])).unwrap();
        assert_eq!(parsed.action, Action::Help);
        let parsed = parse_command(&args(&["--list", "--version"])).unwrap();
        assert_eq!(parsed.action, Action::Version);
    }

    #[test]
    fn test_which_and_list() {
        let parsed = parse_command(&args(&["--which", "db:m", "--json"])).unwrap();
        assert_eq!(parsed.action, Action::Which("db:m".to_string()));
        assert_eq!(parsed.global.output_mode(), OutputMode::Json);

        let parsed = parse_command(&args(&["--which=bu"])).unwrap();
        assert_eq!(parsed.action, Action::Which("bu".to_string()));

        let parsed = parse_command(&args(&["--list"])).unwrap();
        assert_eq!(parsed.action, Action::List);

        assert!(parse_command(&args(&["--which"])).is_err());
    }

    #[test]
    fn test_root_and_color() {
        let parsed =
            parse_command(&args(&["--root", "/tmp/p", "--color=never", "test"])).unwrap();
        assert_eq!(parsed.global.root, Some(PathBuf::from("/tmp/p")));
        assert_eq!(parsed.global.color, Some(ColorMode::Never));

        let parsed = parse_command(&args(&["--color"])).unwrap();
        assert_eq!(parsed.global.color, Some(ColorMode::Always));

        let err = parse_command(&args(&["--color=purple"])).unwrap_err();
        assert!(err.contains("Invalid color mode"));
    }

    #[test]
    fn test_bare_color_keeps_task_token() {
        let parsed = parse_command(&args(&["--color", "never", "build"])).unwrap();
        assert_eq!(parsed.global.color, Some(ColorMode::Never));
        assert_eq!(parsed.input.task_token(), Some("build"));

        let parsed = parse_command(&args(&["--color", "build", "release"])).unwrap();
        assert_eq!(parsed.global.color, Some(ColorMode::Always));
        assert_eq!(parsed.input.task_token(), Some("build"));
        assert_eq!(parsed.input.task_arguments(), ["release"]);
    }

    #[test]
    fn test_unknown_option_suggests() {
        let err = parse_command(&args(&["--lsit"])).unwrap_err();
        assert!(err.contains("Unknown option '--lsit'"));
        assert!(err.contains("Did you mean: --list?"));

        let err = parse_command(&args(&["--frobnicate"])).unwrap_err();
        assert!(!err.contains("Did you mean"));
    }
}
