use std::{
    env, fs,
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

fn norm_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "")
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("solfege_cli_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn history_file(dir: &Path) -> PathBuf {
    dir.join("solfege_performance_v1.json")
}

fn run(args: &[&str], stdin: &str) -> Output {
    let exe = env!("CARGO_BIN_EXE_solfege");
    let mut child = Command::new(exe)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout_of(output: &Output) -> String {
    norm_newlines(&String::from_utf8_lossy(&output.stdout))
}

#[test]
fn help_mentions_subcommands() {
    let output = run(&["--help"], "");

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    for cmd in ["play", "stats", "chart", "reset"] {
        assert!(stdout.contains(cmd), "missing {cmd}");
    }
}

#[test]
fn stats_on_fresh_history_are_empty() {
    let dir = temp_dir("fresh");
    let output = run(&["stats", "--data-dir", dir.to_str().unwrap()], "");

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("relative"));
    assert!(stdout.contains("ordinance"));
    assert!(stdout.contains("Total:        0"));
    assert!(stdout.contains("Accuracy:     0%"));
    assert!(stdout.contains("No data"));
}

#[test]
fn chart_without_history_prints_no_data() {
    let dir = temp_dir("chart_empty");
    let svg = dir.join("chart.svg");
    let output = run(
        &[
            "chart",
            "--mode",
            "relative",
            "--metric",
            "time",
            "--data-dir",
            dir.to_str().unwrap(),
            "--svg",
            svg.to_str().unwrap(),
        ],
        "",
    );

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "No data\n");
    let contents = fs::read_to_string(&svg).unwrap();
    assert!(contents.contains("No data"));
    assert!(!contents.contains("NaN"));
}

#[test]
fn relative_rounds_record_every_answer() {
    let dir = temp_dir("relative");
    let output = run(
        &[
            "play",
            "relative",
            "--rounds",
            "2",
            "--seed",
            "1",
            "--advance-ms",
            "0",
            "--data-dir",
            dir.to_str().unwrap(),
        ],
        "nonsense\ndo\nre\n",
    );

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("unknown solfège degree"));
    assert!(stdout.contains("The first one is"));
    assert!(stdout.contains("Options: Do  Ré  Mi  Fa  Sol  La  Si"));
    assert!(stdout.contains("Total:        2"));

    let json = fs::read_to_string(history_file(&dir)).unwrap();
    let log: serde_json::Value = serde_json::from_str(&json).unwrap();
    let entries = log.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e["mode"] == "relative"));
    assert!(entries.iter().all(|e| e.get("timeMs").is_some()));
}

#[test]
fn ordinance_round_completes_by_trying_every_degree() {
    let dir = temp_dir("ordinance");
    let sweep = "do\nre\nmi\nfa\nsol\nla\nsi\n".repeat(5);
    let output = run(
        &[
            "play",
            "ordinance",
            "--rounds",
            "1",
            "--seed",
            "2",
            "--advance-ms",
            "0",
            "--data-dir",
            dir.to_str().unwrap(),
        ],
        &sweep,
    );

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Sequence complete!"));
    assert!(stdout.contains("[ ? ]"));

    let json = fs::read_to_string(history_file(&dir)).unwrap();
    let log: serde_json::Value = serde_json::from_str(&json).unwrap();
    let entries = log.as_array().unwrap();
    let correct: Vec<_> = entries.iter().filter(|e| e["correct"] == true).collect();
    assert_eq!(correct.len(), 1);
    assert!(entries.iter().all(|e| e["mode"] == "ordinance"));
    assert!(entries
        .iter()
        .filter(|e| e["correct"] == false)
        .all(|e| e["timeMs"] == 0));
}

#[test]
fn reset_clears_history_file() {
    let dir = temp_dir("reset");
    fs::write(
        history_file(&dir),
        r#"[{"timestamp":1704067200000,"mode":"relative","correct":true,"timeMs":900}]"#,
    )
    .unwrap();

    let before = run(&["stats", "--mode", "relative", "--data-dir", dir.to_str().unwrap()], "");
    assert!(stdout_of(&before).contains("Total:        1"));
    assert!(stdout_of(&before).contains("Median time:  0.9s"));

    let output = run(&["reset", "--data-dir", dir.to_str().unwrap()], "");
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("History cleared."));
    assert_eq!(fs::read_to_string(history_file(&dir)).unwrap(), "[]");
}

#[test]
fn stats_recent_lists_limited_attempts() {
    let dir = temp_dir("recent");
    fs::write(
        history_file(&dir),
        r#"[{"timestamp":1704067200000,"mode":"relative","correct":true,"timeMs":900},
            {"timestamp":1704067260000,"mode":"relative","correct":false,"timeMs":700},
            {"timestamp":1704067320000,"mode":"relative","correct":true,"timeMs":1200}]"#,
    )
    .unwrap();
    let config = dir.join("solfege.toml");
    fs::write(&config, "recent_limit = 2\n").unwrap();

    let output = run(
        &[
            "stats",
            "--mode",
            "relative",
            "--recent",
            "--config",
            config.to_str().unwrap(),
            "--data-dir",
            dir.to_str().unwrap(),
        ],
        "",
    );

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Recent attempts:"));
    assert!(stdout.contains("wrong         -"));
    assert!(stdout.contains("correct    1.2s"));
    let listed = stdout
        .lines()
        .filter(|l| l.contains("correct") || l.contains("wrong"))
        .count();
    assert_eq!(listed, 2);
}

#[test]
fn malformed_history_is_treated_as_empty() {
    let dir = temp_dir("malformed");
    fs::write(history_file(&dir), "{broken").unwrap();

    let output = run(&["stats", "--mode", "ordinance", "--data-dir", dir.to_str().unwrap()], "");
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Total:        0"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = temp_dir("bad_config");
    let config = dir.join("solfege.toml");
    fs::write(&config, "staff_min = 5\nstaff_max = 1\n").unwrap();

    let output = run(&["stats", "--config", config.to_str().unwrap(), "--memory"], "");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = norm_newlines(&String::from_utf8_lossy(&output.stderr));
    assert!(stderr.contains("Error: failed to load config"));
    assert!(stderr.contains("Caused by:"));
    assert!(stderr.contains("staff_min (5) is above staff_max (1)"));
}
