mod executor;
mod fork_executor;
mod jobs;
mod pipeline;
mod process;
mod redirect;
pub mod builtin;

pub use executor::{ChildStatus, Completion, ExecStatus, Executor, Reaped};
pub use fork_executor::ForkExecutor;
pub use jobs::BackgroundJobs;
