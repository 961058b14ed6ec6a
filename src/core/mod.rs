/*!
 * Core Module
 * Shared types and error definitions
 */

pub mod errors;
pub mod types;

pub use errors::{ShellError, ShellResult};
pub use types::Pid;
