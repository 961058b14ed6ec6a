/*!
 * Pipeline Tests
 * Two real stages joined by a pipe, with end-of-stream propagation
 */

use jobshell::{CommandSpec, JobManager, PipelineRequest, ProcessError, ProcessStatus};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

fn expected_lines(n: usize) -> String {
    (1..=n).map(|i| format!("{}\n", i)).collect()
}

#[test]
fn test_pipeline_passes_exact_bytes() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("copy.txt");

    let mut jobs = JobManager::new();
    let request = PipelineRequest::new(
        CommandSpec::new("seq").with_args(["1", "2000"]),
        // `cat` only finishes once it sees end-of-stream on the pipe
        CommandSpec::new("cat").with_output(&target),
    );
    let (left, right) = jobs.run_pipeline(request).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), expected_lines(2000));

    let listing = jobs.list();
    assert_eq!(listing.len(), 2);
    for entry in &listing {
        assert!(entry.pid == left || entry.pid == right);
        assert_eq!(entry.status, ProcessStatus::Terminated);
    }
}

#[test]
fn test_pipeline_line_count() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("count.txt");

    let mut jobs = JobManager::new();
    let request = PipelineRequest::new(
        CommandSpec::new("seq").with_args(["1", "250"]),
        CommandSpec::new("wc").with_args(["-l"]).with_output(&target),
    );
    jobs.run_pipeline(request).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap().trim(), "250");
}

#[test]
fn test_pipeline_left_input_redirect() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("in.txt");
    let target = dir.path().join("out.txt");
    fs::write(&source, "alpha\nbeta\n").unwrap();

    let mut jobs = JobManager::new();
    let request = PipelineRequest::new(
        CommandSpec::new("cat").with_input(&source),
        CommandSpec::new("cat").with_output(&target),
    );
    jobs.run_pipeline(request).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "alpha\nbeta\n");
}

#[test]
fn test_conflicting_redirect_spawns_nothing() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("never.txt");

    let mut jobs = JobManager::new();
    let request = PipelineRequest::new(
        CommandSpec::new("seq").with_args(["3"]).with_output(&target),
        CommandSpec::new("wc"),
    );
    assert!(matches!(
        jobs.run_pipeline(request),
        Err(ProcessError::RedirectConflict(_))
    ));
    assert!(jobs.table().is_empty());
    assert!(!target.exists());
}

#[test]
fn test_listing_evicts_finished_pipeline() {
    let mut jobs = JobManager::new();
    let request = PipelineRequest::new(
        CommandSpec::new("true"),
        CommandSpec::new("true"),
    );
    jobs.run_pipeline(request).unwrap();

    assert_eq!(jobs.list().len(), 2);
    assert_eq!(jobs.remove_terminated(), 2);
    assert!(jobs.list().is_empty());
}
