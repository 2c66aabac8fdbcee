use std::fmt;

use nix::sys::signal::Signal;
use nix::unistd::Pid;

use crate::ast::Job;
use crate::error::ExecError;

pub type ExecStatus = Result<Completion, ExecError>;

/// How a child left the running state, as seen by the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStatus {
    Exited(i32),
    Signaled(Signal),
    /// Suspended. Nothing can resume it, so the loop treats it as done.
    Stopped(Signal),
}

impl ChildStatus {
    pub fn code(&self) -> i32 {
        match self {
            ChildStatus::Exited(code) => *code,
            ChildStatus::Signaled(sig) | ChildStatus::Stopped(sig) => 128 + *sig as i32,
        }
    }

    pub fn success(&self) -> bool {
        matches!(self, ChildStatus::Exited(0))
    }
}

impl fmt::Display for ChildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildStatus::Exited(code) => write!(f, "exit {}", code),
            ChildStatus::Signaled(sig) => write!(f, "killed by {}", sig),
            ChildStatus::Stopped(sig) => write!(f, "stopped by {}", sig),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Finished(ChildStatus),
    Pipeline {
        left: ChildStatus,
        right: ChildStatus,
    },
    Detached(Pid),
}

/// A background child collected by a non-blocking wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reaped {
    pub pid: Pid,
    pub status: ChildStatus,
}

pub trait Executor {
    fn exec(&mut self, job: &Job) -> ExecStatus;

    /// Collects background children that have finished, without blocking.
    fn reap(&mut self) -> Vec<Reaped> {
        Vec::new()
    }
}
