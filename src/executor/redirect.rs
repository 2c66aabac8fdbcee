use std::ffi::CString;
use std::os::unix::io::RawFd;

use nix::fcntl::{OFlag, open};
use nix::sys::stat::Mode;

use crate::ast::{RedirectKind, RedirectSpec};
use crate::error::ExecError;
use super::process::{EXIT_SETUP_FAILED, child_fail, close_quietly, remap, retry_eintr};

/// A redirection resolved to open(2) arguments before the fork.
#[derive(Debug)]
pub struct PreparedRedirect {
    path: CString,
    flags: OFlag,
    mode: Mode,
    stream: RawFd,
    failure_prefix: Vec<u8>,
}

impl PreparedRedirect {
    pub fn new(spec: &RedirectSpec) -> Result<Self, ExecError> {
        let (flags, stream) = match spec.kind {
            RedirectKind::In => (OFlag::O_RDONLY, libc::STDIN_FILENO),
            RedirectKind::Out => (
                OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
                libc::STDOUT_FILENO,
            ),
            RedirectKind::Append => (
                OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_APPEND,
                libc::STDOUT_FILENO,
            ),
        };
        Ok(PreparedRedirect {
            path: CString::new(spec.target.as_str())?,
            flags,
            mode: Mode::from_bits_truncate(0o644),
            stream,
            failure_prefix: format!("simsh: {}: ", spec.target).into_bytes(),
        })
    }

    /// Child side: opens the target and moves it onto stdin or stdout.
    /// Exits the child if the file cannot be opened.
    pub fn apply(&self) {
        let fd = match retry_eintr(|| open(self.path.as_c_str(), self.flags, self.mode)) {
            Ok(fd) => fd,
            Err(e) => child_fail(
                &[self.failure_prefix.as_slice(), e.desc().as_bytes(), &b"\n"[..]],
                EXIT_SETUP_FAILED,
            ),
        };
        if fd != self.stream {
            remap(fd, self.stream);
            close_quietly(fd);
        }
    }
}
