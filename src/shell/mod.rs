/*!
 * Shell Module
 * Interactive front end: configuration, parsing, history, builtins and the read loop
 */

pub mod builtins;
pub mod config;
pub mod history;
pub mod parser;
pub mod session;

pub use builtins::Builtin;
pub use config::ShellConfig;
pub use history::{History, HistoryError};
pub use parser::{parse_line, CommandLine, ParseError};
pub use session::{Flow, Shell};
