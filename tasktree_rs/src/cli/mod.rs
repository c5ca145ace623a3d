//! Command-line front end shared by the `tasktree` and `tt` binaries.
//!
//! ```text
//! argv ─▶ options::parse_command ─▶ GlobalOptions + ParsedInput
//!                                          │
//!                       TaskContext::load ◀┘
//!                                │
//!           --help / --list / --which / route ─▶ exit code
//! ```
//!
//! - [`options`] - runner options read before the task token
//! - [`reporter`] - terminal [`Reporter`](crate::route::Reporter)
//! - [`entrypoint`] - the shared `main` body

pub mod entrypoint;
pub mod options;
pub mod reporter;

pub use entrypoint::{EntryOptions, run, run_with_args};
pub use options::{Action, GlobalOptions, ParsedCommand, parse_command};
pub use reporter::TerminalReporter;
