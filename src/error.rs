use std::ffi::NulError;
use std::{fmt, io};

use nix::unistd::Pid;
use thiserror::Error;

use crate::ast::RedirectKind;
use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeSide {
    Left,
    Right,
}

impl fmt::Display for PipeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipeSide::Left => f.write_str("left"),
            PipeSide::Right => f.write_str("right"),
        }
    }
}

/// Malformed operator usage. Aborts the current dispatch cycle only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing operand after '{operator}'")]
    MissingOperand { operator: RedirectKind },
    #[error("missing command before '{operator}'")]
    MissingCommand { operator: RedirectKind },
    #[error("empty command on the {side} side of '|'")]
    EmptyPipelineSide { side: PipeSide },
}

#[derive(Debug, Error)]
pub enum BuiltinError {
    #[error("{builtin}: expected an argument")]
    MissingArgument { builtin: &'static str },
    #[error("cd: {path}: {source}")]
    ChangeDir {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("help: no help topic for '{0}'")]
    UnknownTopic(String),
    #[error("no commands in history")]
    EmptyHistory,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to create process: {0}")]
    Fork(#[source] nix::Error),
    #[error("failed to create pipe: {0}")]
    Pipe(#[source] nix::Error),
    #[error("failed to wait for process {pid}: {source}")]
    Wait {
        pid: Pid,
        #[source]
        source: nix::Error,
    },
    #[error("argument contains a NUL byte: {0}")]
    NulByte(#[from] NulError),
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Builtin(#[from] BuiltinError),
    #[error("{0}")]
    Exec(#[from] ExecError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Only a failed fork takes the interpreter down; everything else aborts
    /// the current line.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Exec(ExecError::Fork(_)))
    }
}
