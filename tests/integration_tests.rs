//! Integration Tests

#[macro_use]
extern crate lazy_static;


use std::collections::HashMap;
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::process;

use workdir::WorkDir;

const PROMPT: &str = "PROMPT> ";

struct ScriptData<'a> {
    pub stdout: &'a str,
    pub exit_status: i32,
}

lazy_static! {
    /// Builtin-only scripts, whose output is fully deterministic.
    static ref SCRIPTS_MAP: HashMap<&'static str, ScriptData<'static>> = {
        let mut map = HashMap::new();
        map.insert("", ScriptData { stdout: "PROMPT> exit\n", exit_status: 0 });
        map.insert("\n  \n", ScriptData {
            stdout: "PROMPT> PROMPT> PROMPT> exit\n",
            exit_status: 0
        });
        map.insert("&\n", ScriptData { stdout: "PROMPT> PROMPT> exit\n", exit_status: 0 });
        map.insert("jobs\n", ScriptData {
            stdout: "PROMPT> Not implemented, extra credit if you do\nPROMPT> exit\n",
            exit_status: 0
        });
        map.insert("jobs &\n", ScriptData {
            stdout: "PROMPT> Not implemented, extra credit if you do\nPROMPT> exit\n",
            exit_status: 0
        });
        map.insert("exit\njobs\n", ScriptData { stdout: "PROMPT> ", exit_status: 0 });
        map.insert("exit 3\n", ScriptData { stdout: "PROMPT> ", exit_status: 0 });
        map
    };
}

fn run<B: AsRef<[u8]>>(stdin: B) -> workdir::Run {
    WorkDir::new("sh308").run(&["-p", PROMPT], stdin)
}

#[test]
fn test_builtin_scripts() {
    for (stdin, expected) in SCRIPTS_MAP.iter() {
        let run = run(stdin);
        assert_eq!(run.stdout, expected.stdout, "script: {:?}", stdin);
        assert_eq!(
            run.status.code(),
            Some(expected.exit_status),
            "script: {:?}",
            stdin
        );
    }
}

#[test]
fn test_default_prompt() {
    let run = WorkDir::new("sh308").run(&[] as &[&str], "");
    run.assert_success();
    assert_eq!(run.stdout, "308sh> exit\n");
}

#[test]
fn test_foreground_exit_codes() {
    let run = run("true\nfalse\n");
    run.assert_success();

    let reports = run.reports();
    assert_eq!(reports.len(), 2, "stdout: {}", run.stdout);
    assert_eq!(reports[0].1, "true");
    assert_eq!(reports[0].2, 0);
    assert_eq!(reports[1].1, "false");
    assert_eq!(reports[1].2, 1);

    let announcements = run.announcements();
    assert_eq!(announcements.len(), 2);
    assert_eq!(announcements[0].0, reports[0].0);
    assert_eq!(announcements[1].0, reports[1].0);
}

#[test]
fn test_report_follows_program_output() {
    let run = run(r#"echo "hello world" foo"#);
    run.assert_success();

    assert_eq!(run.announcements().len(), 1, "stdout: {}", run.stdout);
    let output = run.stdout.find("hello world foo\n").expect("echo output");
    let report = run.stdout.find("] echo Exit 0\n").expect("report");
    assert!(output < report, "stdout: {}", run.stdout);
}

#[test]
fn test_non_utf8_arguments_reach_the_program_unchanged() {
    let workdir = WorkDir::new("sh308");
    let run = workdir.run(&["-p", PROMPT], &b"touch caf\xe9 '\xff \xfe'\n"[..]);
    run.assert_success();

    for name in &[&b"caf\xe9"[..], &b"\xff \xfe"[..]] {
        let path = workdir.path().join(OsStr::from_bytes(name));
        assert!(path.exists(), "missing {:?}, stdout: {}", path, run.stdout);
    }
}

#[test]
fn test_quoted_argument_is_one_argument() {
    let run = run("printf '%s|' 'a  b' c\n");
    run.assert_success();
    assert!(run.stdout.contains("\na b|c|"), "stdout: {}", run.stdout);
}

#[test]
fn test_terminated_by_signal_reports_signal_number() {
    let run = run("sh -c 'kill -9 $$'\n");
    run.assert_success();

    let reports = run.reports();
    assert_eq!(reports.len(), 1, "stdout: {}", run.stdout);
    assert_eq!(reports[0].1, "sh");
    assert_eq!(reports[0].2, 9);
}

#[test]
fn test_command_not_found() {
    let run = run("sh308_no_such_program arg\njobs\n");
    run.assert_success();

    assert!(
        run.stderr
            .contains("Cannot exec sh308_no_such_program: No such file or directory"),
        "stderr: {}",
        run.stderr
    );
    let reports = run.reports();
    assert_eq!(reports.len(), 1, "stdout: {}", run.stdout);
    assert_eq!(reports[0].1, "sh308_no_such_program");
    assert_eq!(reports[0].2, 15);

    // the shell keeps going
    assert!(run.stdout.contains("Not implemented, extra credit if you do\n"));
    assert!(run.stdout.ends_with("PROMPT> exit\n"));
}

#[test]
fn test_background_job_is_supervised() {
    let run = run("true &\njobs\n");
    run.assert_success();

    let announcements = run.announcements();
    assert_eq!(announcements.len(), 1, "stdout: {}", run.stdout);
    assert_eq!(announcements[0].1, "true");

    let reports = run.reports();
    assert_eq!(reports.len(), 1, "stdout: {}", run.stdout);
    assert_eq!(reports[0], (announcements[0].0, "true".to_string(), 0));

    // the announcement is written before the shell prompts again
    let announce = run.stdout.find("] true\n").expect("announcement");
    let jobs = run
        .stdout
        .find("Not implemented")
        .expect("jobs output");
    assert!(announce < jobs, "stdout: {}", run.stdout);
}

#[test]
fn test_background_does_not_block() {
    let run = run("sleep 1 &\njobs\n");
    run.assert_success();

    // `jobs` ran while `sleep` was still going, so its report comes last
    let jobs = run.stdout.find("Not implemented").expect("jobs output");
    let report = run.stdout.find("] sleep Exit 0").expect("report");
    assert!(jobs < report, "stdout: {}", run.stdout);
}

#[test]
fn test_background_exit_code_and_not_found() {
    let run = run("false &\nsh308_no_such_program &\n");
    run.assert_success();

    let mut reports: Vec<(String, i32)> = run
        .reports()
        .into_iter()
        .map(|(_, command, code)| (command, code))
        .collect();
    reports.sort();
    assert_eq!(
        reports,
        vec![
            ("false".to_string(), 1),
            ("sh308_no_such_program".to_string(), 15),
        ]
    );
}

#[test]
fn test_pid_and_ppid() {
    let run = run("pid\nppid\n");
    run.assert_success();
    assert!(
        run.stdout.contains(&format!("pid: {}\n", run.pid)),
        "stdout: {}",
        run.stdout
    );
    assert!(
        run.stdout.contains(&format!("ppid: {}\n", process::id())),
        "stdout: {}",
        run.stdout
    );
}

#[test]
fn test_pwd_is_idempotent() {
    let workdir = WorkDir::new("sh308");
    let run = workdir.run(&["-p", PROMPT], "pwd\npwd\n");
    run.assert_success();

    let expected = format!("{}/\n", workdir.path().display());
    assert_eq!(run.stdout.matches(&expected).count(), 2, "stdout: {}", run.stdout);
}

#[test]
fn test_cd_without_argument_goes_home() {
    let workdir = WorkDir::new("sh308");
    let home = WorkDir::new("sh308_home");

    let mut cmd = workdir.command(&["-p", PROMPT]);
    cmd.env("HOME", home.path());
    let run = workdir.run_command(&mut cmd, "cd\npwd\n");
    run.assert_success();

    let expected = format!("PROMPT> {}/\n", home.path().display());
    assert!(run.stdout.contains(&expected), "stdout: {}", run.stdout);
}

#[test]
fn test_cd_to_missing_directory() {
    let workdir = WorkDir::new("sh308");
    let run = workdir.run(&["-p", PROMPT], "cd /nonexistent\npwd\n");
    run.assert_success();

    assert_eq!(run.stderr, "cd: /nonexistent no such file or directory\n");
    let expected = format!("{}/\n", workdir.path().display());
    assert!(run.stdout.contains(&expected), "stdout: {}", run.stdout);
}

#[test]
fn test_cd_is_seen_by_children() {
    let workdir = WorkDir::new("sh308");
    let run = workdir.run(&["-p", PROMPT], "cd /\nsh -c pwd\n");
    run.assert_success();
    assert!(run.stdout.contains("\n/\n"), "stdout: {}", run.stdout);
}

#[test]
fn test_command_string() {
    let run = WorkDir::new("sh308").run(&["-c", "echo hi"], "");
    run.assert_success();

    assert!(!run.stdout.contains("308sh> "));
    assert!(!run.stdout.contains("exit"));
    assert!(run.stdout.contains("\nhi\n"), "stdout: {}", run.stdout);
    assert_eq!(run.reports().len(), 1);
}

#[test]
fn test_version() {
    let run = WorkDir::new("sh308").run(&["--version"], "");
    run.assert_success();
    assert!(run.stdout.starts_with("sh308 version "));
}
