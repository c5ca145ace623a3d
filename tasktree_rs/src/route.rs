//! Routing: resolve the task token, then invoke, report or show help.

use strsim::levenshtein;
use tracing::debug;

use crate::context::TaskContext;
use crate::error::{Result, TaskError};
use crate::input::ParsedInput;
use crate::task::{Invocation, Resolution, TaskHandler, TaskId, TaskRegistry, resolve, task_name_of};
use crate::types::EXIT_USAGE;
use crate::validate;

/// Where routing messages go.
pub trait Reporter {
    fn report(&mut self, message: &str);

    /// The "executing task <id>" line printed before an expanded token runs.
    fn notice(&mut self, message: &str) {
        self.report(message);
    }

    fn show_generic_help(&mut self);
}

/// What routing did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Invoked { task: TaskId, exit_code: i32 },
    DefaultInvoked { exit_code: i32 },
    /// No token and no default task.
    HelpShown,
    Ambiguous { token: String, candidates: Vec<TaskId> },
    NotFound { token: String },
}

impl RouteOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RouteOutcome::Invoked { exit_code, .. }
            | RouteOutcome::DefaultInvoked { exit_code } => *exit_code,
            RouteOutcome::HelpShown | RouteOutcome::Ambiguous { .. } => 0,
            RouteOutcome::NotFound { .. } => EXIT_USAGE,
        }
    }
}

/// Route `input` through the task table of `ctx`.
///
/// The handler receives `input` unchanged. Configured refusals are checked
/// after resolution and before the handler runs.
pub fn route(
    input: &ParsedInput,
    ctx: &TaskContext,
    reporter: &mut dyn Reporter,
) -> Result<RouteOutcome> {
    let token = input.task_token();
    let resolution = resolve(token, ctx.registry());
    debug!("token {:?} resolved as {:?}", token, resolution);

    match resolution {
        Resolution::UseDefault => {
            let Some(handler) = ctx.table.default_handler() else {
                reporter.show_generic_help();
                return Ok(RouteOutcome::HelpShown);
            };
            let task = TaskId::parse(&ctx.config.default_task)?;
            let exit_code = invoke(handler, &task, input, ctx)?;
            Ok(RouteOutcome::DefaultInvoked { exit_code })
        }
        Resolution::Resolved(task) => {
            if let Some(refusal) = ctx.config.usage.refusal_for(&task) {
                validate::check(refusal, input, &task)?;
            }
            if token != Some(task.as_str()) {
                reporter.notice(&format!("executing task {task}"));
            }
            let handler = ctx
                .table
                .handler(&task)
                .ok_or_else(|| TaskError::Unbound(task.clone()))?;
            let exit_code = invoke(handler, &task, input, ctx)?;
            Ok(RouteOutcome::Invoked { task, exit_code })
        }
        Resolution::Ambiguous(candidates) => {
            let token = token.unwrap_or_default().to_string();
            let list = candidates
                .iter()
                .map(TaskId::as_str)
                .collect::<Vec<_>>()
                .join("\n");
            reporter.report(&format!("{token} is ambiguous:\n{list}"));
            Ok(RouteOutcome::Ambiguous { token, candidates })
        }
        Resolution::NotFound => {
            let token = token.unwrap_or_default().to_string();
            if let Some(similar) = suggest_similar(task_name_of(&token), ctx.registry()) {
                reporter.report(&format!("Did you mean: {similar}?"));
            }
            reporter.show_generic_help();
            Ok(RouteOutcome::NotFound { token })
        }
    }
}

fn invoke(
    handler: &dyn TaskHandler,
    task: &TaskId,
    input: &ParsedInput,
    ctx: &TaskContext,
) -> Result<i32> {
    debug!("invoking {} ({})", task, handler.describe());
    handler.run(&Invocation {
        task,
        input,
        root: &ctx.root,
    })
}

/// Closest registered task within edit distance 2, if any.
pub fn suggest_similar<'a>(candidate: &str, registry: &'a TaskRegistry) -> Option<&'a TaskId> {
    let mut best_match: Option<(&TaskId, usize)> = None;

    for id in registry {
        let distance = levenshtein(candidate, id.as_str());
        if distance <= 2 && best_match.is_none_or(|(_, best)| distance < best) {
            best_match = Some((id, distance));
        }
    }

    best_match.map(|(id, _)| id)
}
