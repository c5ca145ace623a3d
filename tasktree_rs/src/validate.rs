//! Input checks for tasks that accept no flags, or no flags and no extra
//! arguments.

use crate::error::{Result, TaskError};
use crate::input::ParsedInput;
use crate::task::TaskId;
use crate::usage::Refusal;

/// Fail when any flag was given.
pub fn refuse_flags(input: &ParsedInput, task: &TaskId) -> Result<()> {
    if input.has_flags() {
        return Err(TaskError::UsageViolation {
            task: task.clone(),
            reason: "does not accept flags",
        });
    }
    Ok(())
}

/// Fail when any flag, or any positional after the task token, was given.
pub fn refuse_flags_and_arguments(input: &ParsedInput, task: &TaskId) -> Result<()> {
    refuse_flags(input, task)?;
    if input.positionals().len() > 1 {
        return Err(TaskError::UsageViolation {
            task: task.clone(),
            reason: "does not accept arguments",
        });
    }
    Ok(())
}

/// Apply a configured refusal.
pub fn check(refusal: Refusal, input: &ParsedInput, task: &TaskId) -> Result<()> {
    match refusal {
        Refusal::Flags => refuse_flags(input, task),
        Refusal::FlagsAndArguments => refuse_flags_and_arguments(input, task),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lint() -> TaskId {
        TaskId::parse("lint").unwrap()
    }

    #[test]
    fn test_refuse_flags() {
        assert!(refuse_flags(&ParsedInput::from_args(["lint", "src"]), &lint()).is_ok());

        let err = refuse_flags(&ParsedInput::from_args(["lint", "--fix"]), &lint()).unwrap_err();
        assert!(matches!(err, TaskError::UsageViolation { .. }));
        assert_eq!(err.to_string(), "'lint' does not accept flags");
    }

    #[test]
    fn test_refuse_flags_and_arguments() {
        let ok = ParsedInput::from_args(["lint"]);
        assert!(refuse_flags_and_arguments(&ok, &lint()).is_ok());

        let extra = ParsedInput::from_args(["lint", "src"]);
        let err = refuse_flags_and_arguments(&extra, &lint()).unwrap_err();
        assert_eq!(err.to_string(), "'lint' does not accept arguments");

        let flagged = ParsedInput::from_args(["lint", "-q"]);
        assert!(refuse_flags_and_arguments(&flagged, &lint()).is_err());
    }

    #[test]
    fn test_check_dispatches_on_refusal() {
        let input = ParsedInput::from_args(["lint", "src"]);
        assert!(check(Refusal::Flags, &input, &lint()).is_ok());
        assert!(check(Refusal::FlagsAndArguments, &input, &lint()).is_err());
    }
}
