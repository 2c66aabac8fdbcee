use std::ffi::CString;
use std::os::unix::io::RawFd;

use nix::errno::Errno;
use nix::sys::signal::{SigHandler, Signal, signal};
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::{ForkResult, Pid, close, dup2, execvp, fork};
use tracing::debug;

use crate::ast::Command;
use crate::error::ExecError;
use super::executor::ChildStatus;

pub const EXIT_NOT_FOUND: i32 = 127;
pub const EXIT_NOT_EXECUTABLE: i32 = 126;
pub const EXIT_SETUP_FAILED: i32 = 1;

/// Retries a system call interrupted by a signal.
pub fn retry_eintr<F, T>(f: F) -> nix::Result<T>
where
    F: Fn() -> nix::Result<T>,
{
    loop {
        match f() {
            Err(Errno::EINTR) => (),
            result => return result,
        }
    }
}

/// A command converted ahead of `fork`, so the child never allocates.
#[derive(Debug)]
pub struct ExecImage {
    program: CString,
    argv: Vec<CString>,
    failure_prefix: Vec<u8>,
}

impl ExecImage {
    pub fn new(command: &Command) -> Result<Self, ExecError> {
        let argv = command
            .argv()
            .iter()
            .map(|arg| CString::new(arg.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let program = argv.first().cloned().unwrap_or_default();
        let failure_prefix =
            format!("simsh: {}: ", command.program().unwrap_or_default()).into_bytes();
        Ok(ExecImage {
            program,
            argv,
            failure_prefix,
        })
    }

    /// Replaces the calling process image. Only returns by exiting.
    pub fn exec(&self) -> ! {
        let err = match execvp(&self.program, &self.argv) {
            Err(e) => e,
            Ok(never) => match never {},
        };
        let code = match err {
            Errno::ENOENT => EXIT_NOT_FOUND,
            _ => EXIT_NOT_EXECUTABLE,
        };
        child_fail(
            &[self.failure_prefix.as_slice(), err.desc().as_bytes(), &b"\n"[..]],
            code,
        )
    }
}

/// Writes the message pieces to stderr and exits without running destructors.
/// Safe to call between `fork` and `exec`.
pub fn child_fail(parts: &[&[u8]], code: i32) -> ! {
    for part in parts {
        // SAFETY: the buffer is valid for `part.len()` bytes.
        unsafe {
            libc::write(libc::STDERR_FILENO, part.as_ptr().cast(), part.len());
        }
    }
    // SAFETY: _exit never returns and touches no Rust state.
    unsafe { libc::_exit(code) }
}

/// Points `target` at `fd` in the child, exiting the child on failure.
pub fn remap(fd: RawFd, target: RawFd) {
    if fd == target {
        return;
    }
    if let Err(e) = retry_eintr(|| dup2(fd, target)) {
        child_fail(
            &[&b"simsh: cannot remap descriptor: "[..], e.desc().as_bytes(), &b"\n"[..]],
            EXIT_SETUP_FAILED,
        );
    }
}

/// Closes a descriptor in the child; failures are not interesting there.
pub fn close_quietly(fd: RawFd) {
    let _ = close(fd);
}

/// Forks a child that runs `setup` and then executes `image`.
///
/// `setup` runs in the child: it must only make raw system calls and must
/// exit through [`child_fail`] rather than return an error.
pub fn spawn<F>(image: &ExecImage, setup: F) -> Result<Pid, ExecError>
where
    F: FnOnce(),
{
    // SAFETY: the child only performs async-signal-safe calls (signal, open,
    // dup2, close, execvp, write, _exit) on data prepared before the fork.
    match unsafe { fork() }.map_err(ExecError::Fork)? {
        ForkResult::Parent { child } => {
            debug!(pid = %child, program = ?image.program, "spawned child");
            Ok(child)
        }
        ForkResult::Child => {
            // SAFETY: restoring the default disposition installs no handler.
            unsafe {
                let _ = signal(Signal::SIGPIPE, SigHandler::SigDfl);
            }
            setup();
            image.exec()
        }
    }
}

/// Blocks until `pid` exits, is killed or stops.
pub fn wait_for(pid: Pid) -> Result<ChildStatus, ExecError> {
    loop {
        match retry_eintr(|| waitpid(pid, Some(WaitPidFlag::WUNTRACED))) {
            Ok(WaitStatus::Exited(_, code)) => return Ok(ChildStatus::Exited(code)),
            Ok(WaitStatus::Signaled(_, sig, _)) => return Ok(ChildStatus::Signaled(sig)),
            Ok(WaitStatus::Stopped(_, sig)) => return Ok(ChildStatus::Stopped(sig)),
            Ok(_) => continue,
            Err(source) => return Err(ExecError::Wait { pid, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_image_rejects_nul() {
        let cmd = Command::new(["echo", "bad\0arg"]);
        assert!(matches!(ExecImage::new(&cmd), Err(ExecError::NulByte(_))));
    }

    #[test]
    fn test_spawn_and_wait_exit_code() {
        let image = ExecImage::new(&Command::new(["sh", "-c", "exit 7"])).unwrap();
        let pid = spawn(&image, || {}).unwrap();
        assert_eq!(wait_for(pid).unwrap(), ChildStatus::Exited(7));
    }

    #[test]
    fn test_unknown_program_exits_not_found() {
        let image = ExecImage::new(&Command::new(["simsh-no-such-program-xyz"])).unwrap();
        let pid = spawn(&image, || {}).unwrap();
        assert_eq!(wait_for(pid).unwrap(), ChildStatus::Exited(EXIT_NOT_FOUND));
    }

    #[test]
    fn test_retry_eintr_passes_through_other_results() {
        assert_eq!(retry_eintr(|| Ok::<_, Errno>(5)), Ok(5));
        assert_eq!(retry_eintr(|| Err::<i32, _>(Errno::EBADF)), Err(Errno::EBADF));
    }
}
