/*!
 * Job Shell Library
 * Line-oriented shell with job control: process table, pipelines and signals
 */

pub mod core;
pub mod monitoring;
pub mod process;
pub mod shell;
pub mod signals;

// Re-exports
pub use crate::core::{Pid, ShellError, ShellResult};
pub use monitoring::init_tracing;
pub use process::{
    render_table, CommandSpec, JobManager, PipelineRequest, ProcessControl, ProcessEntry,
    ProcessError, ProcessStatus, ProcessTable, UnixProcessControl,
};
pub use shell::{Shell, ShellConfig};
pub use signals::{SignalError, SignalIntent};
