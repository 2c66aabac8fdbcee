use tracing::{debug, warn};

use crate::ast::{Command, Job, Plan, RedirectSpec};
use crate::executor::{Executor, ExecStatus};
use super::executor::{Completion, Reaped};
use super::jobs::BackgroundJobs;
use super::pipeline::PipelineHandler;
use super::process::{ExecImage, spawn, wait_for};
use super::redirect::PreparedRedirect;

/// Launches jobs as real processes with fork/exec and waits on them.
#[derive(Debug, Default)]
pub struct ForkExecutor {
    background: BackgroundJobs,
}

impl ForkExecutor {
    pub fn new() -> Self {
        ForkExecutor {
            background: BackgroundJobs::new(),
        }
    }

    pub fn background_jobs(&self) -> &BackgroundJobs {
        &self.background
    }

    fn exec_command(
        &mut self,
        cmd: &Command,
        redirect: Option<&RedirectSpec>,
        background: bool,
    ) -> ExecStatus {
        let image = ExecImage::new(cmd)?;
        let redirect = redirect.map(PreparedRedirect::new).transpose()?;

        let pid = spawn(&image, || {
            if let Some(r) = &redirect {
                r.apply();
            }
        })?;

        if background {
            self.background.track(pid);
            return Ok(Completion::Detached(pid));
        }
        let status = wait_for(pid)?;
        debug!(%pid, %status, "foreground child finished");
        Ok(Completion::Finished(status))
    }
}

impl Executor for ForkExecutor {
    fn exec(&mut self, job: &Job) -> ExecStatus {
        match &job.plan {
            Plan::Simple(cmd) => self.exec_command(cmd, None, job.background),
            Plan::Redirect { command, redirect } => {
                self.exec_command(command, Some(redirect), job.background)
            }
            Plan::Pipeline(spec) => {
                if job.background {
                    warn!("pipelines always run in the foreground; ignoring '&'");
                }
                PipelineHandler::exec_pipeline(spec)
            }
        }
    }

    fn reap(&mut self) -> Vec<Reaped> {
        self.background.reap()
    }
}
