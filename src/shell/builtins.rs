/*!
 * Builtin Commands
 */

use crate::process::types::CommandSpec;
use crate::signals::SignalIntent;

/// Commands handled by the shell itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Builtin {
    Quit,
    Cd(Option<String>),
    Signal(SignalIntent, Option<String>),
    Procs { json: bool },
    History,
}

impl Builtin {
    /// Match a single parsed command against the builtin names
    pub fn recognize(command: &CommandSpec) -> Option<Self> {
        let first_arg = command.args.first().cloned();
        let builtin = match command.program.as_str() {
            "quit" => Builtin::Quit,
            "cd" => Builtin::Cd(first_arg),
            "halt" => Builtin::Signal(SignalIntent::Halt, first_arg),
            "wakeup" => Builtin::Signal(SignalIntent::Wakeup, first_arg),
            "ice" => Builtin::Signal(SignalIntent::Interrupt, first_arg),
            "procs" => Builtin::Procs {
                json: command.args.iter().any(|a| a == "--json"),
            },
            "history" => Builtin::History,
            _ => return None,
        };
        Some(builtin)
    }
}
