//! The set of task identifiers known for one run, and the loader that builds
//! it from a tasks directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::identifier::TaskId;
use crate::error::{Result, TaskError};

/// Immutable, ordered, de-duplicated set of task identifiers.
///
/// Order is insertion order. [`TaskRegistry::load`] inserts in sorted path
/// order so registries built from the same directory always compare equal.
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    ids: Vec<TaskId>,
    index: HashSet<TaskId>,
}

impl PartialEq for TaskRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl Eq for TaskRegistry {}

impl TaskRegistry {
    /// Build a registry from identifiers, keeping the first of any duplicates.
    pub fn from_ids<I: IntoIterator<Item = TaskId>>(ids: I) -> Self {
        let mut registry = Self::default();
        for id in ids {
            registry.insert(id);
        }
        registry
    }

    /// Parse and collect raw names. Fails on the first invalid name.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = names
            .into_iter()
            .map(|name| TaskId::parse(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_ids(ids))
    }

    /// Scan `dir` for task files. See [`discover`].
    pub fn load(dir: &Path, default_task: &str) -> Result<Self> {
        let discovered = discover(dir, default_task)?;
        Ok(Self::from_ids(discovered.tasks.into_iter().map(|t| t.id)))
    }

    fn insert(&mut self, id: TaskId) -> bool {
        if self.index.contains(&id) {
            return false;
        }
        self.index.insert(id.clone());
        self.ids.push(id);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&TaskId> {
        self.index.get(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaskId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identifiers without a scope, in registry order.
    pub fn flat(&self) -> impl Iterator<Item = &TaskId> {
        self.ids.iter().filter(|id| !id.is_scoped())
    }

    /// Identifiers with at least one scope, in registry order.
    pub fn scoped(&self) -> impl Iterator<Item = &TaskId> {
        self.ids.iter().filter(|id| id.is_scoped())
    }

}

impl<'a> IntoIterator for &'a TaskRegistry {
    type Item = &'a TaskId;
    type IntoIter = std::slice::Iter<'a, TaskId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

// ============================================================================
// Loader
// ============================================================================

/// A task file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFile {
    pub id: TaskId,
    pub path: PathBuf,
}

/// Result of scanning a tasks directory.
#[derive(Debug, Clone, Default)]
pub struct DiscoveredTasks {
    /// Tasks in sorted path order, `default` excluded.
    pub tasks: Vec<TaskFile>,
    /// The reserved root-level default task, if present.
    pub default: Option<PathBuf>,
}

/// Recursively enumerate task files under `dir`.
///
/// `tasks/build.sh` becomes `build`, `tasks/db/migrate.sh` becomes
/// `db:migrate`. Hidden files and directories are skipped, as are entries
/// that cannot be read (broken links, link loops). A root-level file whose
/// stem is `default_task` is reported separately and never enters the task
/// list. When two files map to the same identifier (`build.sh` and
/// `build.py`) the first in sorted order wins.
pub fn discover(dir: &Path, default_task: &str) -> Result<DiscoveredTasks> {
    if !dir.is_dir() {
        return Err(TaskError::MissingTasksDir(dir.to_path_buf()));
    }

    let mut discovered = DiscoveredTasks::default();
    let mut seen: HashSet<TaskId> = HashSet::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() > 0 => {
                let path = err.path().unwrap_or(dir);
                warn!("skipping {}: {}", path.display(), err);
                continue;
            }
            Err(source) => {
                return Err(TaskError::Walk {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };

        let id = match task_id_for(relative) {
            Ok(id) => id,
            Err(e) => {
                warn!("skipping {}: {}", entry.path().display(), e);
                continue;
            }
        };

        if entry.depth() == 1 && id.as_str() == default_task {
            if discovered.default.is_none() {
                discovered.default = Some(entry.path().to_path_buf());
            }
            continue;
        }

        if !seen.insert(id.clone()) {
            warn!(
                "{} maps to task '{}' which is already defined, ignoring",
                entry.path().display(),
                id
            );
            continue;
        }

        debug!("task {} -> {}", id, entry.path().display());
        discovered.tasks.push(TaskFile {
            id,
            path: entry.path().to_path_buf(),
        });
    }

    Ok(discovered)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// `db/migrate.sh` -> `db:migrate`
fn task_id_for(relative: &Path) -> Result<TaskId> {
    let mut components: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    components.push(stem);

    TaskId::from_components(components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(&path, "#!/bin/sh\n").expect("write task");
    }

    fn names(registry: &TaskRegistry) -> Vec<&str> {
        registry.iter().map(TaskId::as_str).collect()
    }

    #[test]
    fn test_from_names_dedups_and_keeps_order() {
        let registry = TaskRegistry::from_names(["test", "build", "test", "db:seed"]).unwrap();
        assert_eq!(names(&registry), vec!["test", "build", "db:seed"]);
        assert!(registry.contains("build"));
        assert!(!registry.contains("bui"));
    }

    #[test]
    fn test_from_names_rejects_invalid() {
        assert!(TaskRegistry::from_names(["build", "db:"]).is_err());
    }

    #[test]
    fn test_flat_and_scoped() {
        let registry =
            TaskRegistry::from_names(["build", "db:migrate", "db:seed", "web:build"]).unwrap();
        assert_eq!(registry.flat().count(), 1);
        assert_eq!(registry.scoped().count(), 3);
    }

    #[test]
    fn test_load_maps_paths_to_identifiers() {
        let temp = TempDir::new().expect("temp dir");
        touch(temp.path(), "build.sh");
        touch(temp.path(), "test.sh");
        touch(temp.path(), "default.sh");
        touch(temp.path(), "db/migrate.sh");
        touch(temp.path(), "db/seed.py");
        touch(temp.path(), "infra/db/backup.sh");

        let registry = TaskRegistry::load(temp.path(), "default").unwrap();
        assert_eq!(
            names(&registry),
            vec!["build", "db:migrate", "db:seed", "infra:db:backup", "test"]
        );
    }

    #[test]
    fn test_discover_reports_default_separately() {
        let temp = TempDir::new().expect("temp dir");
        touch(temp.path(), "default.sh");
        touch(temp.path(), "lint.sh");

        let discovered = discover(temp.path(), "default").unwrap();
        assert_eq!(discovered.tasks.len(), 1);
        assert_eq!(discovered.tasks[0].id, "lint");
        assert_eq!(discovered.default, Some(temp.path().join("default.sh")));
    }

    #[test]
    fn test_discover_skips_hidden_and_duplicates() {
        let temp = TempDir::new().expect("temp dir");
        touch(temp.path(), ".secret.sh");
        touch(temp.path(), ".cache/build.sh");
        touch(temp.path(), "build.py");
        touch(temp.path(), "build.sh");

        let discovered = discover(temp.path(), "default").unwrap();
        assert_eq!(discovered.tasks.len(), 1);
        assert_eq!(discovered.tasks[0].path, temp.path().join("build.py"));
    }

    #[test]
    fn test_scoped_default_is_a_regular_task() {
        let temp = TempDir::new().expect("temp dir");
        touch(temp.path(), "db/default.sh");

        let registry = TaskRegistry::load(temp.path(), "default").unwrap();
        assert_eq!(names(&registry), vec!["db:default"]);
    }

    #[test]
    fn test_scoped_default_task_name_is_not_reserved() {
        let temp = TempDir::new().expect("temp dir");
        touch(temp.path(), "db/default.sh");
        touch(temp.path(), "db/seed.sh");

        let discovered = discover(temp.path(), "db:default").unwrap();
        assert_eq!(discovered.default, None);
        let ids: Vec<&str> = discovered.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["db:default", "db:seed"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_link_loop_is_skipped() {
        let temp = TempDir::new().expect("temp dir");
        touch(temp.path(), "build.sh");
        touch(temp.path(), "db/seed.sh");
        std::os::unix::fs::symlink(temp.path(), temp.path().join("db/loop")).expect("symlink");

        let registry = TaskRegistry::load(temp.path(), "default").unwrap();
        assert_eq!(names(&registry), vec!["build", "db:seed"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_link_is_skipped() {
        let temp = TempDir::new().expect("temp dir");
        touch(temp.path(), "lint.sh");
        std::os::unix::fs::symlink(temp.path().join("gone.sh"), temp.path().join("stale.sh"))
            .expect("symlink");

        let registry = TaskRegistry::load(temp.path(), "default").unwrap();
        assert_eq!(names(&registry), vec!["lint"]);
    }

    #[test]
    fn test_missing_dir_is_an_error() {
        let temp = TempDir::new().expect("temp dir");
        let err = TaskRegistry::load(&temp.path().join("nope"), "default").unwrap_err();
        assert!(matches!(err, TaskError::MissingTasksDir(_)));
    }
}
