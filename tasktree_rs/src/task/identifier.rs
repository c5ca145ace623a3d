//! Task identifiers: `build`, `db:migrate`, `infra:db:migrate`.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Result, TaskError};

/// Separator between scope components of a task identifier.
pub const SCOPE_SEPARATOR: char = ':';

/// Canonical name of a runnable task.
///
/// Either flat (`build`) or scoped (`db:migrate`). Every component is
/// non-empty and free of whitespace, which is what lets the resolver treat
/// the first space of a user token as the end of the task name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason| TaskError::InvalidId {
            id: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(invalid("identifier is empty"));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(invalid("identifier contains whitespace"));
        }
        if raw.split(SCOPE_SEPARATOR).any(str::is_empty) {
            return Err(invalid("identifier has an empty scope component"));
        }
        Ok(Self(raw.to_string()))
    }

    /// Build an identifier from already split components.
    pub fn from_components<I, S>(components: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let separator = SCOPE_SEPARATOR.to_string();
        let joined = components
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(separator.as_str());
        Self::parse(&joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_scoped(&self) -> bool {
        self.0.contains(SCOPE_SEPARATOR)
    }

    pub fn components(&self) -> std::str::Split<'_, char> {
        self.0.split(SCOPE_SEPARATOR)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TaskId {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TaskId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TaskId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TaskId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
