//! Everything a run needs, built once and passed by reference.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::colors::Painter;
use crate::config::TasktreeConfig;
use crate::error::{Result, TaskError};
use crate::package::PackageInfo;
use crate::task::{TaskRegistry, TaskTable};
use crate::usage::UsageRenderer;

/// Project root, config, package metadata and the task table.
#[derive(Debug)]
pub struct TaskContext {
    pub root: PathBuf,
    pub config: TasktreeConfig,
    pub package: PackageInfo,
    pub table: TaskTable,
}

impl TaskContext {
    pub fn new(
        root: PathBuf,
        config: TasktreeConfig,
        package: PackageInfo,
        table: TaskTable,
    ) -> Self {
        Self {
            root,
            config,
            package,
            table,
        }
    }

    /// Read config and package metadata for `root` and bind the task files
    /// found in its tasks directory.
    ///
    /// A missing tasks directory yields an empty table, so help and version
    /// still work outside a project.
    pub fn load(root: &Path) -> Result<Self> {
        let config = TasktreeConfig::load(root);
        let package = PackageInfo::discover(root);
        let tasks_dir = config.tasks_dir_in(root);

        let bound = TaskTable::from_dir(&tasks_dir, &config.default_task, &config.interpreters);
        let table = match bound {
            Ok(table) => table,
            Err(TaskError::MissingTasksDir(dir)) => {
                warn!("tasks directory {} does not exist", dir.display());
                TaskTable::builder().build()
            }
            Err(e) => return Err(e),
        };

        Ok(Self::new(root.to_path_buf(), config, package, table))
    }

    pub fn registry(&self) -> &TaskRegistry {
        self.table.registry()
    }

    pub fn renderer(&self, painter: Painter) -> UsageRenderer<'_> {
        UsageRenderer::new(&self.config.usage, &self.package, painter)
    }
}
