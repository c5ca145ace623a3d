use serde::Deserialize;

/// Name of the reserved task run when no task token is given.
pub const DEFAULT_TASK: &str = "default";

/// Directory (relative to the project root) scanned for task files.
pub const DEFAULT_TASKS_DIR: &str = "tasks";

/// Column the task descriptions start at in the full usage listing.
pub const DEFAULT_BASE_WIDTH: usize = 24;

/// Exit code used when the user asked for something we can't route.
pub const EXIT_USAGE: i32 = 2;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum OutputMode {
    #[default]
    Human,
    Json,
}
