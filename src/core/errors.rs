/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use thiserror::Error;

pub use crate::process::types::ProcessError;
pub use crate::shell::parser::ParseError;
pub use crate::signals::types::SignalError;

/// Top-level shell error
///
/// Core failures are absorbed by the read loop; this type only surfaces
/// from the binary's entry point and from session setup.
#[derive(Error, Debug, Diagnostic)]
pub enum ShellError {
    #[error(transparent)]
    #[diagnostic(
        code(shell::process),
        help("Run with -d to see the failing operation on the debug channel.")
    )]
    Process(#[from] ProcessError),

    #[error(transparent)]
    #[diagnostic(code(shell::signal), help("Check that the pid is tracked by `procs`."))]
    Signal(#[from] SignalError),

    #[error(transparent)]
    #[diagnostic(code(shell::parse))]
    Parse(#[from] ParseError),

    #[error("I/O error on {context}: {source}")]
    #[diagnostic(code(shell::io))]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Shell operation result
pub type ShellResult<T> = Result<T, ShellError>;
