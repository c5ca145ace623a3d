//! Usage help: the configured table of calls and descriptions, and its
//! rendering as the full listing or as one task's usage.

pub mod render;
pub mod table;

pub use render::UsageRenderer;
pub use table::{CallSpec, Refusal, UsageEntry, UsageGroup, UsageTable, split_command};
