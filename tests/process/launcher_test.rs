/*!
 * Launcher Tests
 * Real child processes: foreground blocking, background tracking, redirection
 */

use jobshell::{CommandSpec, JobManager, ProcessControl, ProcessError, ProcessStatus, SignalIntent};
use pretty_assertions::assert_eq;
use std::fs;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_foreground_command_is_terminated_on_return() {
    let mut jobs = JobManager::new();
    let pid = jobs.launch(CommandSpec::new("true")).unwrap();

    let listing = jobs.list();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].pid, pid);
    assert_eq!(listing[0].command, "true");
    assert_eq!(listing[0].status, ProcessStatus::Terminated);
}

#[test]
fn test_background_command_is_running() {
    let mut jobs = JobManager::new();
    let cmd = CommandSpec::new("sleep").with_args(["30"]).with_blocking(false);
    let pid = jobs.launch(cmd).unwrap();

    let listing = jobs.list();
    assert_eq!(listing[0].pid, pid);
    assert_eq!(listing[0].status, ProcessStatus::Running);

    // Idempotent without intervening state changes
    assert_eq!(jobs.list(), listing);

    jobs.signal(Some(&pid.to_string()), SignalIntent::Interrupt).unwrap();
    jobs.control().wait(pid).unwrap();
}

#[test]
fn test_missing_program_is_tracked_as_terminated() {
    let mut jobs = JobManager::new();
    let pid = jobs
        .launch(CommandSpec::new("jobshell-no-such-program"))
        .unwrap();

    let listing = jobs.list();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].pid, pid);
    assert_eq!(listing[0].command, "jobshell-no-such-program");
    assert_eq!(listing[0].status, ProcessStatus::Terminated);
}

#[test]
fn test_missing_background_program_terminates_on_listing() {
    let mut jobs = JobManager::new();
    let cmd = CommandSpec::new("jobshell-no-such-program").with_blocking(false);
    let pid = jobs.launch(cmd).unwrap();

    // The child exits on its own; poll until a listing observes it
    let mut status = ProcessStatus::Running;
    for _ in 0..200 {
        status = jobs.list()[0].status;
        if status == ProcessStatus::Terminated {
            break;
        }
        thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(status, ProcessStatus::Terminated);
    assert_eq!(jobs.table().find(pid).unwrap().status, ProcessStatus::Terminated);
}

#[test]
fn test_argument_with_nul_registers_nothing() {
    let mut jobs = JobManager::new();
    let result = jobs.launch(CommandSpec::new("echo").with_args(["a\0b"]));
    assert!(matches!(result, Err(ProcessError::SpawnFailed { .. })));
    assert!(jobs.list().is_empty());
}

#[test]
fn test_output_redirect() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("out.txt");

    let mut jobs = JobManager::new();
    let cmd = CommandSpec::new("echo")
        .with_args(["redirected"])
        .with_output(&target);
    jobs.launch(cmd).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "redirected\n");
}

#[test]
fn test_input_and_output_redirect() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("in.txt");
    let target = dir.path().join("out.txt");
    fs::write(&source, "one\ntwo\nthree\n").unwrap();

    let mut jobs = JobManager::new();
    let cmd = CommandSpec::new("wc")
        .with_args(["-l"])
        .with_input(&source)
        .with_output(&target);
    jobs.launch(cmd).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap().trim(), "3");
}

#[test]
fn test_missing_input_redirect_is_best_effort() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.txt");

    let mut jobs = JobManager::new();
    // `true` ignores stdin, so the fallback to the inherited stream is harmless
    let pid = jobs
        .launch(CommandSpec::new("true").with_input(&missing))
        .unwrap();
    assert_eq!(jobs.table().find(pid).unwrap().status, ProcessStatus::Terminated);
}
