//! Tasks: identifiers, the registry, resolution of user tokens, and the
//! handlers bound to each identifier.
//!
//! - [`identifier`] - `TaskId` (flat `build` or scoped `db:migrate`)
//! - [`registry`] - `TaskRegistry` and the tasks-directory loader
//! - [`resolve`] - prefix / scoped matching of a user token
//! - [`handler`] - `TaskHandler`, script and closure tasks, `TaskTable`

pub mod handler;
pub mod identifier;
pub mod registry;
pub mod resolve;

pub use handler::{FnTask, Invocation, ScriptTask, TaskHandler, TaskTable, TaskTableBuilder};
pub use identifier::{SCOPE_SEPARATOR, TaskId};
pub use registry::{DiscoveredTasks, TaskFile, TaskRegistry, discover};
pub use resolve::{Resolution, resolve, task_name_of};
