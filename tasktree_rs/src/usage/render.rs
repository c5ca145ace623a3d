//! Rendering of the full usage listing and of per-task usage.

use tracing::debug;

use super::table::{CallSpec, UsageEntry, UsageTable, split_command};
use crate::colors::{Painter, pad_visible};
use crate::error::{Result, TaskError};
use crate::package::PackageInfo;
use crate::task::TaskRegistry;

/// Title used when the config defines no groups.
const FALLBACK_GROUP: &str = "Tasks";

/// Renders usage text for one project.
#[derive(Debug, Clone, Copy)]
pub struct UsageRenderer<'a> {
    table: &'a UsageTable,
    package: &'a PackageInfo,
    painter: Painter,
}

impl<'a> UsageRenderer<'a> {
    pub fn new(table: &'a UsageTable, package: &'a PackageInfo, painter: Painter) -> Self {
        Self {
            table,
            package,
            painter,
        }
    }

    /// Color the words of a call: `<x>` as a placeholder, `[x]` as an
    /// optional placeholder, anything else as a task name.
    pub fn paint_call(&self, call: &str) -> String {
        call.split(' ')
            .map(|word| {
                if word.len() > 2 && word.starts_with('[') && word.ends_with(']') {
                    self.painter.optional_placeholder(&word[1..word.len() - 1])
                } else if word.len() > 2 && word.starts_with('<') && word.ends_with('>') {
                    self.painter.placeholder(word)
                } else {
                    self.painter.task(word)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One usage line: the call padded to `width + delta` visible columns,
    /// `spacer` spaces, then the description.
    pub fn format_command(&self, spec: &CallSpec, width: usize, spacer: usize) -> String {
        let width = (width as i64 + i64::from(spec.delta)).max(0) as usize;
        let line = format!(
            "{}{}{}",
            pad_visible(&self.paint_call(&spec.call), width),
            " ".repeat(spacer),
            spec.description
        );
        line.trim_end().to_string()
    }

    /// Full listing: header, one section per group, package footer.
    ///
    /// Without configured groups every registered task is listed under a
    /// single section, using its usage entry when there is one.
    pub fn full_usage(&self, registry: &TaskRegistry) -> String {
        let mut usage = format!(
            "Usage: {} {}\n",
            self.painter.task(&self.package.name),
            self.painter.hint("<command>")
        );

        if self.table.groups.is_empty() {
            let tasks: Vec<String> = registry.iter().map(|id| id.to_string()).collect();
            self.push_group(&mut usage, FALLBACK_GROUP, &tasks);
        } else {
            for group in &self.table.groups {
                self.push_group(&mut usage, &group.title, &group.tasks);
            }
        }

        usage.push_str(&format!(
            "\n{} {}",
            self.package.label(),
            self.package.root.display()
        ));
        usage
    }

    fn push_group(&self, usage: &mut String, title: &str, tasks: &[String]) {
        usage.push_str(&format!("\n{}\n", self.painter.underline(title)));
        for task in tasks {
            let spec = match self.table.lookup(task) {
                Some(spec) => spec.clone(),
                None => {
                    debug!("no usage entry for '{}', listing bare name", task);
                    CallSpec::new(task.as_str(), "")
                }
            };
            usage.push_str(&self.format_command(&spec, self.table.base_width, 1));
            usage.push('\n');
        }
    }

    /// Usage of one task. `db`, `db:migrate` and `db migrate` all show the
    /// whole `db` group.
    pub fn task_usage(&self, task: &str) -> Result<String> {
        let (head, _) = split_command(task);
        let entry = self
            .table
            .entry(head)
            .ok_or_else(|| TaskError::UnknownUsage(head.to_string()))?;

        let mut usage = format!("  {}\n", self.painter.underline("Usage:"));
        match entry {
            UsageEntry::Grouped { subtasks, .. } => {
                let width = entry.group_width();
                let prefix = self.painter.task(&format!("{} {}", self.package.name, head));
                for sub in subtasks {
                    usage.push_str(&format!(
                        "  {} {}\n",
                        prefix,
                        self.format_command(sub, width, 1)
                    ));
                }
            }
            UsageEntry::Flat(spec) => {
                usage.push_str(&format!(
                    "  {} {}\n",
                    self.painter.task(&self.package.name),
                    self.format_command(spec, 0, 3)
                ));
            }
        }
        Ok(usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::visible_width;
    use std::path::PathBuf;

    fn package() -> PackageInfo {
        PackageInfo {
            name: "acme".to_string(),
            version: "1.0.0".to_string(),
            root: PathBuf::from("/work/acme"),
        }
    }

    fn table() -> UsageTable {
        toml::from_str(
            r#"
base_width = 16

[[groups]]
title = "Build"
tasks = ["build", "db migrate"]

[[groups]]
title = "Other"
tasks = ["mystery"]

[commands.build]
call = "build [target]"
description = "Compile"

[commands.db]
subtasks = [
    { call = "migrate <env>", description = "Run migrations" },
    { call = "seed", description = "Load fixtures" },
]
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_full_usage_layout() {
        let table = table();
        let pkg = package();
        let renderer = UsageRenderer::new(&table, &pkg, Painter::plain());
        let registry = TaskRegistry::default();

        let expected = "Usage: acme <command>\n\
\n\
Build\n\
build [target]   Compile\n\
migrate <env>    Run migrations\n\
\n\
Other\n\
mystery\n\
\n\
acme@1.0.0 /work/acme";
        assert_eq!(renderer.full_usage(&registry), expected);
    }

    #[test]
    fn test_full_usage_without_groups_lists_registry() {
        let table = UsageTable::default();
        let pkg = package();
        let renderer = UsageRenderer::new(&table, &pkg, Painter::plain());
        let registry = TaskRegistry::from_names(["build", "db:seed"]).unwrap();

        let usage = renderer.full_usage(&registry);
        assert!(usage.contains("\nTasks\nbuild\ndb:seed\n"));
    }

    #[test]
    fn test_grouped_task_usage() {
        let table = table();
        let pkg = package();
        let renderer = UsageRenderer::new(&table, &pkg, Painter::plain());

        let expected = "  Usage:\n  \
acme db migrate <env> Run migrations\n  \
acme db seed          Load fixtures\n";
        assert_eq!(renderer.task_usage("db").unwrap(), expected);
        assert_eq!(renderer.task_usage("db:seed").unwrap(), expected);
    }

    #[test]
    fn test_flat_task_usage_uses_wide_spacer() {
        let table = table();
        let pkg = package();
        let renderer = UsageRenderer::new(&table, &pkg, Painter::plain());
        assert_eq!(
            renderer.task_usage("build").unwrap(),
            "  Usage:\n  acme build [target]   Compile\n"
        );
    }

    #[test]
    fn test_unknown_task_usage() {
        let table = table();
        let pkg = package();
        let renderer = UsageRenderer::new(&table, &pkg, Painter::plain());
        assert!(matches!(
            renderer.task_usage("nope"),
            Err(TaskError::UnknownUsage(_))
        ));
    }

    #[test]
    fn test_alignment_is_color_independent() {
        let table = table();
        let pkg = package();
        let plain = UsageRenderer::new(&table, &pkg, Painter::plain());
        let colored =
            UsageRenderer::new(&table, &pkg, Painter::new(crate::types::ColorMode::Always));

        let spec = table.lookup("db migrate").unwrap();
        let a = plain.format_command(spec, 20, 1);
        let b = colored.format_command(spec, 20, 1);
        assert_ne!(a, b);
        assert_eq!(visible_width(&a), visible_width(&b));
    }

    #[test]
    fn test_delta_shifts_column() {
        let table = UsageTable::default();
        let pkg = package();
        let renderer = UsageRenderer::new(&table, &pkg, Painter::plain());
        let mut spec = CallSpec::new("x", "desc");
        spec.delta = 2;
        assert_eq!(renderer.format_command(&spec, 4, 1), "x      desc");
        spec.delta = -10;
        assert_eq!(renderer.format_command(&spec, 4, 1), "x desc");
    }

    #[test]
    fn test_paint_call_placeholders() {
        let table = UsageTable::default();
        let pkg = package();
        let renderer =
            UsageRenderer::new(&table, &pkg, Painter::new(crate::types::ColorMode::Always));
        let painted = renderer.paint_call("deploy <env> [tag]");
        assert!(painted.contains("\x1b[32m<env>\x1b[0m"));
        assert!(painted.contains("[\x1b[32mtag\x1b[0m\x1b[0m]"));
        assert_eq!(visible_width(&painted), "deploy <env> [tag]".len());
    }
}
