/*!
 * Shell Session Tests
 * Full read loop over scripted input with real children
 */

use jobshell::{Shell, ShellConfig};
use serial_test::serial;
use std::env;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn config() -> ShellConfig {
    ShellConfig::new().with_settle_delay(Duration::ZERO)
}

fn run_script(script: &str) -> String {
    let mut shell = Shell::new(config()).unwrap();
    let mut out = Vec::new();
    shell.run(script.as_bytes(), &mut out).unwrap();
    assert!(shell.jobs().table().is_empty());
    String::from_utf8(out).unwrap()
}

#[test]
#[serial]
fn test_pipeline_and_redirect_from_script() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("count.txt");
    let script = format!("seq 1 42 | wc -l > {}\nquit\n", target.display());

    run_script(&script);
    assert_eq!(fs::read_to_string(&target).unwrap().trim(), "42");
}

#[test]
#[serial]
fn test_procs_lists_foreground_command_once() {
    let output = run_script("true\nprocs\nprocs\n");

    let tables: Vec<&str> = output
        .split("PID          Command      STATUS\n")
        .skip(1)
        .collect();
    assert_eq!(tables.len(), 2);
    assert!(tables[0].contains("true        Terminated"));
    // Evicted after the first listing
    assert!(!tables[1].contains("true"));
}

#[test]
#[serial]
fn test_cd_updates_prompt() {
    let original = env::current_dir().unwrap();
    let dir = tempdir().unwrap();
    let canonical = dir.path().canonicalize().unwrap();

    let mut shell = Shell::new(config()).unwrap();
    let mut out = Vec::new();
    let script = format!("cd {}\ncd /definitely/not/here\n", canonical.display());
    shell.run(script.as_bytes(), &mut out).unwrap();
    env::set_current_dir(&original).unwrap();

    assert_eq!(shell.cwd(), canonical.as_path());
    let output = String::from_utf8(out).unwrap();
    assert!(output.ends_with(&format!("{}: ", canonical.display())));
}

#[test]
#[serial]
fn test_end_of_input_shuts_down() {
    let output = run_script("sleep 0 &\n");
    // Two prompts: one before the command, one before end of input
    assert_eq!(output.matches(": ").count(), 2);
}

#[test]
#[serial]
fn test_quoted_redirect_leaves_file_intact() {
    let dir = tempdir().unwrap();
    let notes = dir.path().join("notes.txt");
    let matches = dir.path().join("matches.txt");
    fs::write(&notes, "a > b\nplain\n").unwrap();

    let script = format!("grep '>' {} > {}\n", notes.display(), matches.display());
    run_script(&script);

    assert_eq!(fs::read_to_string(&notes).unwrap(), "a > b\nplain\n");
    assert_eq!(fs::read_to_string(&matches).unwrap(), "a > b\n");
}
