/*!
 * Interactive Session
 * Prompt, read, dispatch. Hands each parsed line to the job-control core.
 */

use super::builtins::Builtin;
use super::config::ShellConfig;
use super::history::History;
use super::parser::{parse_line, CommandLine};
use crate::core::errors::{ShellError, ShellResult};
use crate::monitoring::span_command;
use crate::process::control::{ProcessControl, UnixProcessControl};
use crate::process::manager::{render_table, JobManager};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{debug, info, warn};

/// What the loop does after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

fn io_error(context: &'static str) -> impl FnOnce(io::Error) -> ShellError {
    move |source| ShellError::Io { context, source }
}

pub struct Shell<C: ProcessControl = UnixProcessControl> {
    config: ShellConfig,
    jobs: JobManager<C>,
    history: History,
    cwd: PathBuf,
}

impl Shell<UnixProcessControl> {
    pub fn new(config: ShellConfig) -> ShellResult<Self> {
        Self::with_jobs(config, JobManager::new())
    }
}

impl<C: ProcessControl> Shell<C> {
    pub fn with_jobs(config: ShellConfig, jobs: JobManager<C>) -> ShellResult<Self> {
        let cwd = env::current_dir().map_err(io_error("current directory"))?;
        let history = History::new(config.history_capacity);
        Ok(Self {
            config,
            jobs,
            history,
            cwd,
        })
    }

    pub fn jobs(&self) -> &JobManager<C> {
        &self.jobs
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn prompt(&self) -> String {
        format!("{}: ", self.cwd.display())
    }

    /// Run until `quit` or end of input, then shut the job table down
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> ShellResult<()> {
        info!("Shell session started");
        let result = self.read_loop(input, out);
        self.jobs.shutdown();
        result
    }

    fn read_loop<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> ShellResult<()> {
        let mut line = String::new();
        loop {
            write!(out, "{}", self.prompt()).map_err(io_error("prompt"))?;
            out.flush().map_err(io_error("prompt"))?;

            line.clear();
            if input.read_line(&mut line).map_err(io_error("input"))? == 0 {
                debug!("end of input");
                return Ok(());
            }
            if line.trim().is_empty() {
                continue;
            }

            if self.execute_line(&line, out)? == Flow::Quit {
                return Ok(());
            }

            if !self.config.settle_delay.is_zero() {
                thread::sleep(self.config.settle_delay);
            }
        }
    }

    /// Handle one input line.
    ///
    /// Only output failures are returned; everything else is reported on
    /// the debug channel and the shell moves on.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> ShellResult<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        let span = span_command(line);
        let _entered = span.enter();

        let line = match self.history.expand(line) {
            Ok(expanded) => {
                if expanded != line {
                    writeln!(out, "{}", expanded).map_err(io_error("history recall"))?;
                }
                expanded
            }
            Err(e) => {
                warn!(error = %e, "history recall failed");
                return Ok(Flow::Continue);
            }
        };
        self.history.push(line.clone());

        let parsed = match parse_line(&line) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                warn!(error = %e, "parse failed");
                return Ok(Flow::Continue);
            }
        };

        // Failures below were already reported by the job manager
        match parsed {
            CommandLine::Pipeline(request) => {
                let _ = self.jobs.run_pipeline(request);
            }
            CommandLine::Single(command) => match Builtin::recognize(&command) {
                Some(builtin) => return self.run_builtin(builtin, out),
                None => {
                    let _ = self.jobs.launch(command);
                }
            },
        }
        Ok(Flow::Continue)
    }

    fn run_builtin<W: Write>(&mut self, builtin: Builtin, out: &mut W) -> ShellResult<Flow> {
        match builtin {
            Builtin::Quit => return Ok(Flow::Quit),
            Builtin::Cd(target) => self.change_dir(target.as_deref()),
            Builtin::Signal(intent, pid) => {
                let _ = self.jobs.signal(pid.as_deref(), intent);
            }
            Builtin::Procs { json } => {
                let entries = self.jobs.list();
                if json {
                    serde_json::to_writer(&mut *out, &entries)
                        .map_err(|e| ShellError::Io {
                            context: "procs",
                            source: e.into(),
                        })?;
                    writeln!(out).map_err(io_error("procs"))?;
                } else {
                    write!(out, "{}", render_table(&entries)).map_err(io_error("procs"))?;
                }
                self.jobs.remove_terminated();
            }
            Builtin::History => {
                for (i, entry) in self.history.iter().enumerate() {
                    writeln!(out, "{:>4}  {}", i + 1, entry).map_err(io_error("history"))?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn change_dir(&mut self, target: Option<&str>) {
        let Some(target) = target else {
            warn!("cd: missing operand");
            return;
        };
        match env::set_current_dir(target) {
            Ok(()) => {
                self.cwd = env::current_dir().unwrap_or_else(|_| self.cwd.join(target));
                debug!(cwd = %self.cwd.display(), "changed directory");
            }
            Err(e) => warn!(path = target, error = %e, "chdir failed"),
        }
    }
}
