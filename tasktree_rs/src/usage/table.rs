//! Usage table: how each task is presented in help output.
//!
//! Deserialized from the `[usage]` section of the config:
//!
//! ```toml
//! [usage]
//! base_width = 24
//!
//! [[usage.groups]]
//! title = "Build"
//! tasks = ["build", "db migrate"]
//!
//! [usage.commands.build]
//! call = "build [target]"
//! description = "Compile the project"
//!
//! [usage.commands.db]
//! width = 16
//! subtasks = [
//!     { call = "migrate <env>", description = "Run migrations" },
//!     { call = "seed", description = "Load fixtures", refuse = "flags" },
//! ]
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::colors::visible_width;
use crate::task::{SCOPE_SEPARATOR, TaskId};
use crate::types::DEFAULT_BASE_WIDTH;

/// Input a task refuses to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Refusal {
    /// Any flag.
    Flags,
    /// Any flag, or any positional beyond the task token.
    FlagsAndArguments,
}

/// One displayed invocation: `migrate <env>`, plus its description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallSpec {
    pub call: String,
    #[serde(default)]
    pub description: String,
    /// Column adjustment for this line, may be negative.
    #[serde(default)]
    pub delta: i32,
    #[serde(default)]
    pub refuse: Option<Refusal>,
}

impl CallSpec {
    pub fn new(call: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            call: call.into(),
            description: description.into(),
            delta: 0,
            refuse: None,
        }
    }

    /// First word of the call: the task or subtask name.
    pub fn name(&self) -> &str {
        self.call.split_whitespace().next().unwrap_or("")
    }
}

/// A task is either a single invocation or a group of subtasks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum UsageEntry {
    Grouped {
        #[serde(default)]
        width: Option<usize>,
        subtasks: Vec<CallSpec>,
    },
    Flat(CallSpec),
}

impl UsageEntry {
    /// Column width used for subtask lines: configured, or the widest call.
    pub fn group_width(&self) -> usize {
        match self {
            UsageEntry::Grouped { width: Some(w), .. } => *w,
            UsageEntry::Grouped { subtasks, .. } => subtasks
                .iter()
                .map(|s| visible_width(&s.call))
                .max()
                .unwrap_or(0),
            UsageEntry::Flat(_) => 0,
        }
    }

    pub fn subtask(&self, name: &str) -> Option<&CallSpec> {
        match self {
            UsageEntry::Grouped { subtasks, .. } => subtasks.iter().find(|s| s.name() == name),
            UsageEntry::Flat(_) => None,
        }
    }
}

/// A titled section of the full usage listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UsageGroup {
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UsageTable {
    pub base_width: usize,
    pub groups: Vec<UsageGroup>,
    pub commands: BTreeMap<String, UsageEntry>,
}

impl Default for UsageTable {
    fn default() -> Self {
        Self {
            base_width: DEFAULT_BASE_WIDTH,
            groups: Vec::new(),
            commands: BTreeMap::new(),
        }
    }
}

/// Split `db migrate`, `db:migrate` or `build` into task and subtask.
pub fn split_command(command: &str) -> (&str, Option<&str>) {
    let command = command.trim();
    match command.split_once([' ', SCOPE_SEPARATOR]) {
        Some((task, sub)) => (task, Some(sub.trim())),
        None => (command, None),
    }
}

impl UsageTable {
    pub fn entry(&self, task: &str) -> Option<&UsageEntry> {
        self.commands.get(task)
    }

    /// Call spec for `build` or `db migrate` / `db:migrate`.
    pub fn lookup(&self, command: &str) -> Option<&CallSpec> {
        let (task, sub) = split_command(command);
        match (self.entry(task)?, sub) {
            (UsageEntry::Flat(spec), None) => Some(spec),
            (entry @ UsageEntry::Grouped { .. }, Some(sub)) => entry.subtask(sub),
            _ => None,
        }
    }

    /// What a resolved task refuses, if anything.
    pub fn refusal_for(&self, id: &TaskId) -> Option<Refusal> {
        self.lookup(id.as_str()).and_then(|spec| spec.refuse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
base_width = 20

[[groups]]
title = "Build"
tasks = ["build", "db migrate"]

[commands.build]
call = "build [target]"
description = "Compile"

[commands.lint]
call = "lint"
refuse = "flags_and_arguments"

[commands.db]
subtasks = [
    { call = "migrate <env>", description = "Run migrations" },
    { call = "seed", description = "Load fixtures", refuse = "flags", delta = -2 },
]
"#;

    fn sample() -> UsageTable {
        toml::from_str(SAMPLE).expect("valid usage table")
    }

    #[test]
    fn test_entries_are_tagged_once() {
        let table = sample();
        assert!(matches!(table.entry("build"), Some(UsageEntry::Flat(_))));
        assert!(matches!(
            table.entry("db"),
            Some(UsageEntry::Grouped { .. })
        ));
        assert_eq!(table.base_width, 20);
        assert_eq!(table.groups[0].tasks, vec!["build", "db migrate"]);
    }

    #[test]
    fn test_lookup_accepts_space_and_colon() {
        let table = sample();
        assert_eq!(table.lookup("build").unwrap().name(), "build");
        assert_eq!(table.lookup("db migrate").unwrap().call, "migrate <env>");
        assert_eq!(table.lookup("db:seed").unwrap().delta, -2);
        assert!(table.lookup("db").is_none());
        assert!(table.lookup("build extra").is_none());
        assert!(table.lookup("nope").is_none());
    }

    #[test]
    fn test_refusals() {
        let table = sample();
        let id = |s: &str| TaskId::parse(s).unwrap();
        assert_eq!(
            table.refusal_for(&id("lint")),
            Some(Refusal::FlagsAndArguments)
        );
        assert_eq!(table.refusal_for(&id("db:seed")), Some(Refusal::Flags));
        assert_eq!(table.refusal_for(&id("db:migrate")), None);
        assert_eq!(table.refusal_for(&id("unknown")), None);
    }

    #[test]
    fn test_group_width_defaults_to_widest_call() {
        let table = sample();
        assert_eq!(table.entry("db").unwrap().group_width(), "migrate <env>".len());
        let fixed = UsageEntry::Grouped {
            width: Some(30),
            subtasks: vec![],
        };
        assert_eq!(fixed.group_width(), 30);
    }

    #[test]
    fn test_defaults() {
        let table = UsageTable::default();
        assert!(table.groups.is_empty());
        assert!(table.commands.is_empty());
        assert_eq!(table.base_width, DEFAULT_BASE_WIDTH);
    }

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("build"), ("build", None));
        assert_eq!(split_command("db migrate"), ("db", Some("migrate")));
        assert_eq!(split_command("db:migrate"), ("db", Some("migrate")));
    }
}
