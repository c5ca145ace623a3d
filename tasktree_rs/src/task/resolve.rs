//! Task-name resolution: map a user token to zero, one or many registered
//! tasks.
//!
//! The matching contract:
//!
//! 1. No token (or an empty one) means "run the default task".
//! 2. The token is cut at its first space; the rest belongs to the task.
//! 3. An exact registry hit always wins.
//! 4. Otherwise a token without `:` matches flat tasks by prefix, and a token
//!    with `:` matches scoped tasks component by component, left to right,
//!    each token component being a prefix of the task's component at the same
//!    position.
//! 5. Exactly one survivor resolves; none is not-found; more is ambiguous.
//!    There is no tie-break.
//!
//! [`resolve`] is a pure function of its inputs.

use serde::Serialize;

use super::identifier::{SCOPE_SEPARATOR, TaskId};
use super::registry::TaskRegistry;

/// Outcome of resolving a user token against a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "tasks", rename_all = "snake_case")]
pub enum Resolution {
    /// No token was supplied.
    UseDefault,
    /// Exactly one task matches.
    Resolved(TaskId),
    /// More than one task matches; candidates keep registry order.
    Ambiguous(Vec<TaskId>),
    /// Nothing matches.
    NotFound,
}

impl Resolution {
    /// Tasks consistent with the token (empty for `UseDefault`/`NotFound`).
    pub fn tasks(&self) -> &[TaskId] {
        match self {
            Resolution::Resolved(id) => std::slice::from_ref(id),
            Resolution::Ambiguous(candidates) => candidates,
            Resolution::UseDefault | Resolution::NotFound => &[],
        }
    }
}

/// The part of a raw token that names the task: everything before the first
/// space.
pub fn task_name_of(token: &str) -> &str {
    token.split(' ').next().unwrap_or(token)
}

/// Resolve `token` against `registry`.
pub fn resolve(token: Option<&str>, registry: &TaskRegistry) -> Resolution {
    let Some(raw) = token.filter(|t| !t.is_empty()) else {
        return Resolution::UseDefault;
    };
    let candidate = task_name_of(raw);

    if let Some(id) = registry.get(candidate) {
        return Resolution::Resolved(id.clone());
    }

    let wanted: Vec<&str> = candidate.split(SCOPE_SEPARATOR).collect();
    let mut matches = if wanted.len() == 1 {
        match_flat(candidate, registry)
    } else {
        match_scoped(&wanted, registry)
    };

    match matches.len() {
        0 => Resolution::NotFound,
        1 => Resolution::Resolved(matches.remove(0)),
        _ => Resolution::Ambiguous(matches),
    }
}

fn match_flat(prefix: &str, registry: &TaskRegistry) -> Vec<TaskId> {
    registry
        .flat()
        .filter(|id| id.as_str().starts_with(prefix))
        .cloned()
        .collect()
}

/// Narrow scoped tasks one component at a time, in token order, with no
/// backtracking. A task with fewer components than the token drops out.
fn match_scoped(wanted: &[&str], registry: &TaskRegistry) -> Vec<TaskId> {
    let mut candidates: Vec<(&TaskId, Vec<&str>)> = registry
        .scoped()
        .map(|id| (id, id.components().collect()))
        .collect();

    for (position, prefix) in wanted.iter().enumerate() {
        candidates.retain(|(_, components)| {
            components
                .get(position)
                .is_some_and(|component| component.starts_with(prefix))
        });
        if candidates.is_empty() {
            break;
        }
    }

    candidates.into_iter().map(|(id, _)| id.clone()).collect()
}
