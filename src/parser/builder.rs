use crate::ast::{Command, PipelineSpec, RedirectKind, RedirectSpec};
use crate::error::{ParseError, PipeSide};
use super::scanner::find_redirect;

/// Outcome of looking for a redirection in a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectMatch {
    NotFound,
    Found {
        command: Command,
        redirect: RedirectSpec,
    },
    MissingOperand {
        operator: RedirectKind,
    },
}

pub fn extract_redirect(command: &Command) -> RedirectMatch {
    match find_redirect(command) {
        Some(idx) => build_redirect(command, idx),
        None => RedirectMatch::NotFound,
    }
}

/// Excises the operator at `idx` and its operand. Any tokens after the operand
/// stay in the residual command.
pub fn build_redirect(command: &Command, idx: usize) -> RedirectMatch {
    let Some(kind) = command.get(idx).and_then(RedirectKind::from_token) else {
        return RedirectMatch::NotFound;
    };
    match command.get(idx + 1) {
        Some(target) => RedirectMatch::Found {
            command: command.without(idx, 2),
            redirect: RedirectSpec {
                kind,
                target: target.to_string(),
            },
        },
        None => RedirectMatch::MissingOperand { operator: kind },
    }
}

/// Splits around the `|` at `idx`; both sides must be non-empty.
pub fn build_pipeline(command: &Command, idx: usize) -> Result<PipelineSpec, ParseError> {
    let left = command.slice(0..idx.min(command.len()));
    let right = command.slice((idx + 1).min(command.len())..command.len());
    if left.is_empty() {
        return Err(ParseError::EmptyPipelineSide {
            side: PipeSide::Left,
        });
    }
    if right.is_empty() {
        return Err(ParseError::EmptyPipelineSide {
            side: PipeSide::Right,
        });
    }
    Ok(PipelineSpec { left, right })
}
