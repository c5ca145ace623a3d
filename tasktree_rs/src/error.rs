//! Error type shared by the library modules.

use std::path::PathBuf;

use thiserror::Error;

use crate::task::TaskId;

/// Errors raised while loading, rendering or invoking tasks.
///
/// Resolution itself never fails; see [`crate::task::resolve`].
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("invalid task identifier '{id}': {reason}")]
    InvalidId { id: String, reason: &'static str },

    #[error("tasks directory {} does not exist", .0.display())]
    MissingTasksDir(PathBuf),

    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("'{task}' {reason}")]
    UsageViolation { task: TaskId, reason: &'static str },

    #[error("no usage entry for task '{0}'")]
    UnknownUsage(String),

    #[error("no handler bound to task '{0}'")]
    Unbound(TaskId),

    #[error("failed to start task '{task}': {source}")]
    Spawn {
        task: TaskId,
        #[source]
        source: std::io::Error,
    },

    #[error("task '{task}' failed: {message}")]
    Failed { task: TaskId, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TaskError {
    /// Convenience constructor for handlers reporting their own failure.
    pub fn failed(task: &TaskId, message: impl Into<String>) -> Self {
        TaskError::Failed {
            task: task.clone(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
