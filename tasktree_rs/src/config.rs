//! Configuration file support for tasktree.
//!
//! Loads optional `.tasktree/config.toml` from project root.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Result, TaskError};
use crate::types::{ColorMode, DEFAULT_TASK, DEFAULT_TASKS_DIR};
use crate::usage::UsageTable;

/// Directory holding the config file, relative to the project root.
pub const CONFIG_DIR: &str = ".tasktree";

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TasktreeConfig {
    /// Where task files live, relative to the project root.
    pub tasks_dir: PathBuf,
    /// Root-level task file run when no task is named.
    pub default_task: String,
    /// Overridden by `--color`.
    pub color: Option<ColorMode>,
    /// File extension to interpreter program, on top of the built-ins.
    /// Example: `{ rb = "ruby", js = "node" }`
    pub interpreters: BTreeMap<String, String>,
    pub usage: UsageTable,
}

impl Default for TasktreeConfig {
    fn default() -> Self {
        Self {
            tasks_dir: PathBuf::from(DEFAULT_TASKS_DIR),
            default_task: DEFAULT_TASK.to_string(),
            color: None,
            interpreters: BTreeMap::new(),
            usage: UsageTable::default(),
        }
    }
}

impl TasktreeConfig {
    /// Load config from `.tasktree/config.toml` in the given root directory.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        Self::load_from_path(&Self::path_in(root))
    }

    pub fn path_in(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join("config.toml")
    }

    /// Load config from a specific path, warning and falling back to
    /// defaults on any problem.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            debug!("no config at {}", path.display());
            return Self::default();
        }

        match Self::try_load_from_path(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Strict variant of [`load_from_path`](Self::load_from_path).
    pub fn try_load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| TaskError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Absolute tasks directory for a project root.
    pub fn tasks_dir_in(&self, root: &Path) -> PathBuf {
        root.join(&self.tasks_dir)
    }
}
