use std::os::fd::{AsRawFd, OwnedFd};

use nix::fcntl::{FcntlArg, FdFlag, fcntl};
use nix::unistd::pipe;
use tracing::debug;

use crate::ast::PipelineSpec;
use crate::error::ExecError;
use super::executor::{Completion, ExecStatus};
use super::process::{ExecImage, close_quietly, remap, spawn, wait_for};

pub struct PipelineHandler;

impl PipelineHandler {
    /// Runs `left | right` and blocks until both sides have terminated.
    pub fn exec_pipeline(spec: &PipelineSpec) -> ExecStatus {
        let left = ExecImage::new(&spec.left)?;
        let right = ExecImage::new(&spec.right)?;

        let (read_end, write_end) = pipe().map_err(ExecError::Pipe)?;
        set_cloexec(&read_end)?;
        set_cloexec(&write_end)?;
        let (read_fd, write_fd) = (read_end.as_raw_fd(), write_end.as_raw_fd());

        let writer = spawn(&left, || {
            remap(write_fd, libc::STDOUT_FILENO);
            close_quietly(read_fd);
            close_quietly(write_fd);
        })?;
        let reader = spawn(&right, || {
            remap(read_fd, libc::STDIN_FILENO);
            close_quietly(read_fd);
            close_quietly(write_fd);
        })?;

        // The reader only sees end-of-input once every write end is closed,
        // including ours.
        drop(read_end);
        drop(write_end);
        debug!(%writer, %reader, "pipeline running");

        let left_status = wait_for(writer);
        let right_status = wait_for(reader);
        Ok(Completion::Pipeline {
            left: left_status?,
            right: right_status?,
        })
    }
}

fn set_cloexec(fd: &OwnedFd) -> Result<(), ExecError> {
    fcntl(fd.as_raw_fd(), FcntlArg::F_SETFD(FdFlag::FD_CLOEXEC))
        .map(|_| ())
        .map_err(ExecError::Pipe)
}
