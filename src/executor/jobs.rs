use nix::errno::Errno;
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::Pid;
use tracing::{info, warn};

use super::executor::{ChildStatus, Reaped};

/// Children started with a trailing `&`, waiting to be collected.
#[derive(Debug, Default)]
pub struct BackgroundJobs {
    pids: Vec<Pid>,
}

impl BackgroundJobs {
    pub fn new() -> Self {
        Self { pids: Vec::new() }
    }

    pub fn track(&mut self, pid: Pid) {
        self.pids.push(pid);
    }

    pub fn len(&self) -> usize {
        self.pids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pids.is_empty()
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.pids.contains(&pid)
    }

    /// Non-blocking wait on every tracked child. Finished children are
    /// returned and forgotten; running ones stay tracked.
    pub fn reap(&mut self) -> Vec<Reaped> {
        let mut reaped = Vec::new();
        self.pids.retain(|&pid| match waitpid(pid, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(_, code)) => {
                reaped.push(Reaped {
                    pid,
                    status: ChildStatus::Exited(code),
                });
                false
            }
            Ok(WaitStatus::Signaled(_, sig, _)) => {
                reaped.push(Reaped {
                    pid,
                    status: ChildStatus::Signaled(sig),
                });
                false
            }
            Ok(_) | Err(Errno::EINTR) => true,
            Err(Errno::ECHILD) => {
                warn!(%pid, "background child vanished before it was reaped");
                false
            }
            Err(e) => {
                warn!(%pid, error = %e, "failed to poll background child");
                true
            }
        });
        for r in &reaped {
            info!(pid = %r.pid, status = %r.status, "reaped background child");
        }
        reaped
    }
}
