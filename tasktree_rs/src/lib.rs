//! # tasktree
//!
//! **Task routing for command-line runners** - resolve a typed, possibly
//! abbreviated task name to exactly one registered task, and render the
//! usage help for those tasks.
//!
//! Tasks are files under `tasks/`: `tasks/build.sh` is `build`,
//! `tasks/db/migrate.sh` is `db:migrate`. A user can type any unambiguous
//! prefix, per scope component:
//!
//! ```text
//! tasktree bu        # build (if nothing else starts with "bu")
//! tasktree db:m      # db:migrate
//! tasktree d:m       # ambiguous if deploy:main also exists
//! ```
//!
//! ## Library Usage
//!
//! ```rust
//! use tasktree::{Resolution, TaskRegistry, resolve};
//!
//! let registry = TaskRegistry::from_names(["build", "bundle", "db:migrate"]).unwrap();
//!
//! assert!(matches!(resolve(Some("db:m"), &registry), Resolution::Resolved(_)));
//! assert!(matches!(resolve(Some("b"), &registry), Resolution::Ambiguous(_)));
//! assert_eq!(resolve(None, &registry), Resolution::UseDefault);
//! ```
//!
//! Routing with handlers bound in code:
//!
//! ```rust,no_run
//! use tasktree::{FnTask, Invocation, ParsedInput, TaskTable};
//!
//! let table = TaskTable::builder()
//!     .task("build", FnTask::new(|inv: &Invocation<'_>| {
//!         println!("building with {:?}", inv.input.task_arguments());
//!         Ok(0)
//!     }))
//!     .unwrap()
//!     .build();
//! # let _ = (table, ParsedInput::default());
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// Task identifiers, registry, resolution and handlers.
///
/// # Submodules
///
/// - [`task::identifier`] - flat and scoped identifiers
/// - [`task::registry`] - ordered identifier set and tasks-directory loader
/// - [`task::resolve`] - the prefix / scope matching algorithm
/// - [`task::handler`] - script and closure handlers, the task table
pub mod task;

/// Routing policy on top of resolution: run, report ambiguity, or help.
pub mod route;

/// Usage table (from config) and its rendering.
pub mod usage;

/// Refusal of flags and extra arguments.
pub mod validate;

/// Pre-parsed positionals and flags.
pub mod input;

// ============================================================================
// Project & Environment
// ============================================================================

/// Per-run context: root, config, package, task table.
pub mod context;

/// `.tasktree/config.toml` loading.
pub mod config;

/// Name and version of the hosting project.
pub mod package;

/// Root-user detection.
pub mod system;

// ============================================================================
// Support
// ============================================================================

/// Command-line front end.
pub mod cli;

/// ANSI colors and visible-width padding.
pub mod colors;

/// Library error type.
pub mod error;

/// `tracing` subscriber setup.
pub mod logging;

/// Shared constants and modes.
pub mod types;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use context::TaskContext;
pub use error::{Result, TaskError};
pub use input::{FlagValue, ParsedInput};
pub use route::{Reporter, RouteOutcome, route};
pub use task::{
    FnTask, Invocation, Resolution, ScriptTask, TaskHandler, TaskId, TaskRegistry, TaskTable,
    resolve,
};
pub use types::{ColorMode, OutputMode};
pub use usage::{UsageRenderer, UsageTable};
