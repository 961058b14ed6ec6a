/*!
 * Job Shell - Main Entry Point
 *
 * Interactive shell with:
 * - Foreground and background commands
 * - Two-stage pipelines with redirection
 * - halt / wakeup / ice process control
 * - procs listing
 */

use clap::Parser;
use jobshell::{init_tracing, Shell, ShellConfig};
use std::io;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "jobshell", version, about = "Line-oriented shell with job control")]
struct Args {
    /// Print debug information to stderr
    #[arg(short, long, env = "JOBSHELL_DEBUG")]
    debug: bool,

    /// Number of command lines kept for `!!` / `!n`
    #[arg(long, default_value_t = 20, env = "JOBSHELL_HISTORY")]
    history: usize,

    /// Pause after each command, in milliseconds
    #[arg(long, default_value_t = 500, env = "JOBSHELL_SETTLE_MS")]
    settle_ms: u64,

    /// Emit debug output as JSON
    #[arg(long, env = "JOBSHELL_TRACE_JSON")]
    trace_json: bool,
}

impl From<Args> for ShellConfig {
    fn from(args: Args) -> Self {
        ShellConfig::new()
            .with_debug(args.debug)
            .with_trace_json(args.trace_json)
            .with_history_capacity(args.history)
            .with_settle_delay(Duration::from_millis(args.settle_ms))
    }
}

fn main() -> miette::Result<()> {
    let config = ShellConfig::from(Args::parse());
    init_tracing(config.debug, config.trace_json);
    info!(?config, "jobshell starting");

    let mut shell = Shell::new(config)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    shell.run(stdin.lock(), &mut stdout)?;
    Ok(())
}
