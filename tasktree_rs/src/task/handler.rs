//! Task handlers and the identifier -> handler table.
//!
//! The table is built once at startup, either from a tasks directory
//! ([`TaskTable::from_dir`]) or programmatically ([`TaskTable::builder`]).
//! The router never touches the filesystem to find a handler.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use super::identifier::TaskId;
use super::registry::{TaskRegistry, discover};
use crate::error::{Result, TaskError};
use crate::input::ParsedInput;

/// Everything a handler gets when invoked.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    /// The resolved task (for the default task: the configured default name).
    pub task: &'a TaskId,
    /// The original input, unchanged by resolution.
    pub input: &'a ParsedInput,
    /// Project root; tasks run from here.
    pub root: &'a Path,
}

/// A runnable task. Returns the exit code to report.
pub trait TaskHandler: Send + Sync {
    fn run(&self, invocation: &Invocation<'_>) -> Result<i32>;

    /// Short human description of what backs this handler.
    fn describe(&self) -> String {
        "builtin".to_string()
    }
}

/// Handler backed by a closure.
pub struct FnTask<F>(F);

impl<F> FnTask<F>
where
    F: Fn(&Invocation<'_>) -> Result<i32> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> TaskHandler for FnTask<F>
where
    F: Fn(&Invocation<'_>) -> Result<i32> + Send + Sync,
{
    fn run(&self, invocation: &Invocation<'_>) -> Result<i32> {
        (self.0)(invocation)
    }
}

// ============================================================================
// Script tasks
// ============================================================================

/// Built-in interpreters by file extension.
const BUILTIN_INTERPRETERS: &[(&str, &str)] =
    &[("sh", "sh"), ("bash", "bash"), ("py", "python3")];

/// Interpreter for `path`: user mapping first, then built-ins. `None` means
/// execute the file directly.
pub fn interpreter_for(path: &Path, user: &BTreeMap<String, String>) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    user.get(ext).cloned().or_else(|| {
        BUILTIN_INTERPRETERS
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|(_, program)| program.to_string())
    })
}

/// A task file run as a child process.
///
/// The child gets the raw arguments that followed the task token, runs from
/// the project root, and sees `TASKTREE_TASK`, `TASKTREE_ROOT` and
/// `TASKTREE_FLAGS` (flags as a JSON object) in its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTask {
    path: PathBuf,
    interpreter: Option<String>,
}

impl ScriptTask {
    pub fn new(path: impl Into<PathBuf>, interpreter: Option<String>) -> Self {
        Self {
            path: path.into(),
            interpreter,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn command(&self) -> Command {
        match &self.interpreter {
            Some(program) => {
                let mut cmd = Command::new(program);
                cmd.arg(&self.path);
                cmd
            }
            None => Command::new(&self.path),
        }
    }
}

impl TaskHandler for ScriptTask {
    fn run(&self, invocation: &Invocation<'_>) -> Result<i32> {
        let mut cmd = self.command();
        cmd.args(invocation.input.task_arguments())
            .current_dir(invocation.root)
            .env("TASKTREE_TASK", invocation.task.as_str())
            .env("TASKTREE_ROOT", invocation.root)
            .env("TASKTREE_FLAGS", invocation.input.flags_json().to_string());
        if crate::system::is_root() {
            cmd.env("TASKTREE_IS_ROOT", "1");
        }

        debug!("running {:?}", cmd);
        let status = cmd.status().map_err(|source| TaskError::Spawn {
            task: invocation.task.clone(),
            source,
        })?;

        // Killed by a signal: no code
        Ok(status.code().unwrap_or(1))
    }

    fn describe(&self) -> String {
        match &self.interpreter {
            Some(program) => format!("{} {}", program, self.path.display()),
            None => self.path.display().to_string(),
        }
    }
}

// ============================================================================
// Table
// ============================================================================

/// Registry plus the handler bound to each identifier.
pub struct TaskTable {
    registry: TaskRegistry,
    handlers: HashMap<TaskId, Box<dyn TaskHandler>>,
    default: Option<Box<dyn TaskHandler>>,
}

impl fmt::Debug for TaskTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskTable")
            .field("registry", &self.registry)
            .field("has_default", &self.default.is_some())
            .finish()
    }
}

impl TaskTable {
    pub fn builder() -> TaskTableBuilder {
        TaskTableBuilder::default()
    }

    /// Bind every task file under `dir` to a [`ScriptTask`].
    pub fn from_dir(
        dir: &Path,
        default_task: &str,
        interpreters: &BTreeMap<String, String>,
    ) -> Result<Self> {
        let discovered = discover(dir, default_task)?;
        let mut builder = Self::builder();
        for file in discovered.tasks {
            let interpreter = interpreter_for(&file.path, interpreters);
            builder = builder.bind(file.id, ScriptTask::new(file.path, interpreter));
        }
        if let Some(path) = discovered.default {
            let interpreter = interpreter_for(&path, interpreters);
            builder = builder.with_default(ScriptTask::new(path, interpreter));
        }

        let table = builder.build();
        info!(
            "loaded {} tasks from {}{}",
            table.registry.len(),
            dir.display(),
            if table.default.is_some() {
                " (with default)"
            } else {
                ""
            }
        );
        Ok(table)
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    pub fn handler(&self, id: &TaskId) -> Option<&dyn TaskHandler> {
        self.handlers.get(id).map(Box::as_ref)
    }

    pub fn default_handler(&self) -> Option<&dyn TaskHandler> {
        self.default.as_deref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Collects bindings; later bindings of the same identifier are ignored, as
/// in [`TaskRegistry::from_ids`].
#[derive(Default)]
pub struct TaskTableBuilder {
    order: Vec<TaskId>,
    handlers: HashMap<TaskId, Box<dyn TaskHandler>>,
    default: Option<Box<dyn TaskHandler>>,
}

impl TaskTableBuilder {
    pub fn bind(mut self, id: TaskId, handler: impl TaskHandler + 'static) -> Self {
        if !self.handlers.contains_key(&id) {
            self.order.push(id.clone());
            self.handlers.insert(id, Box::new(handler));
        }
        self
    }

    /// Parse `name` and bind it.
    pub fn task(self, name: &str, handler: impl TaskHandler + 'static) -> Result<Self> {
        let id = TaskId::parse(name)?;
        Ok(self.bind(id, handler))
    }

    pub fn with_default(mut self, handler: impl TaskHandler + 'static) -> Self {
        self.default = Some(Box::new(handler));
        self
    }

    pub fn build(self) -> TaskTable {
        TaskTable {
            registry: TaskRegistry::from_ids(self.order),
            handlers: self.handlers,
            default: self.default,
        }
    }
}
