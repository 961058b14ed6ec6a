/*!
 * Process Module
 * Job control: process table, reconciliation, launching and pipelines
 */

pub mod control;
pub mod executor;
pub mod manager;
pub mod pipeline;
pub mod reconciler;
pub mod table;
pub mod types;

// Re-export for convenience
pub use control::{ProcessControl, UnixProcessControl, EXEC_FAILURE_STATUS};
pub use manager::{render_table, JobManager};
pub use pipeline::PipelineRequest;
pub use table::ProcessTable;
pub use types::{
    CommandSpec, Endpoint, ProbeOutcome, ProcessEntry, ProcessError, ProcessRecord,
    ProcessResult, ProcessStatus, SpawnRequest,
};
