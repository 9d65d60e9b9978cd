//! Integration tests for the `pl` binary.
//!
//! Each test runs the real CLI against its own data directory. The
//! config lookup is pointed at paths that do not exist so a developer's
//! own config never leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Fixtures
// =============================================================================

struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// A `pl` command bound to this environment's data directory.
    fn pl(&self) -> Command {
        let mut cmd = Command::cargo_bin("pl").unwrap();
        cmd.env("PASTELINE_CONFIG", self.dir.path().join("no-config.toml"))
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg"))
            .env("HOME", self.dir.path().join("home"))
            .env_remove("RUST_LOG")
            .arg("--data-dir")
            .arg(self.dir.path().join("data"));
        cmd
    }

    /// Create a paste from `body` on stdin.
    fn new_paste(&self, title: &str, author: &str, body: &str) {
        self.pl()
            .args(["new", "--title", title, "--author", author])
            .write_stdin(body)
            .assert()
            .success();
    }

    fn body_path(&self, id: i64) -> std::path::PathBuf {
        self.dir.path().join("data").join("pastes").join(id.to_string())
    }
}

// =============================================================================
// new / show
// =============================================================================

#[test]
fn new_then_show() {
    let env = TestEnv::new();

    env.pl()
        .args(["new", "--title", "notes", "--author", "ada"])
        .write_stdin("hello world\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created paste #1"));

    env.pl()
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 notes"))
        .stdout(predicate::str::contains("author:  ada"))
        .stdout(predicate::str::contains("hello world"))
        .stdout(predicate::str::contains("edited from").not());
}

#[test]
fn new_reads_body_from_file() {
    let env = TestEnv::new();
    let file = env.dir.path().join("body.txt");
    std::fs::write(&file, "from a file").unwrap();

    env.pl()
        .args(["new", "--title", "t", "--author", "a", "--file"])
        .arg(&file)
        .assert()
        .success();

    env.pl()
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from a file"));
}

#[test]
fn new_trims_title_and_author() {
    let env = TestEnv::new();
    env.new_paste("  spaced  ", "\tada ", "x");

    env.pl()
        .args(["--json", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"spaced\""))
        .stdout(predicate::str::contains("\"author\": \"ada\""));
}

#[test]
fn new_rejects_blank_title() {
    let env = TestEnv::new();

    env.pl()
        .args(["new", "--title", "   ", "--author", "ada"])
        .write_stdin("body")
        .assert()
        .failure()
        .stderr(predicate::str::contains("title cannot be empty"));
}

#[test]
fn new_json_prints_id() {
    let env = TestEnv::new();

    env.pl()
        .args(["new", "--json", "--title", "t", "--author", "a"])
        .write_stdin("b")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": 1"));
}

#[test]
fn show_unknown_id_fails() {
    let env = TestEnv::new();

    env.pl()
        .args(["show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("paste 42 not found"));
}

#[test]
fn show_rejects_invalid_id() {
    let env = TestEnv::new();
    env.pl().args(["show", "0"]).assert().failure();
    env.pl().args(["show", "abc"]).assert().failure();
}

// =============================================================================
// edit / family / search
// =============================================================================

#[test]
fn edit_inherits_unspecified_fields() {
    let env = TestEnv::new();
    env.new_paste("notes", "ada", "original body");

    env.pl()
        .args(["edit", "1", "--author", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created paste #2 (edited from #1)"));

    env.pl()
        .args(["show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#2 notes"))
        .stdout(predicate::str::contains("author:  bob"))
        .stdout(predicate::str::contains("edited from: #1"))
        .stdout(predicate::str::contains("original body"));

    // The source is untouched.
    env.pl()
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("author:  ada"));
}

#[test]
fn edit_with_new_body_from_stdin() {
    let env = TestEnv::new();
    env.new_paste("notes", "ada", "v1");

    env.pl()
        .args(["edit", "1", "--title", "notes, fixed", "--stdin"])
        .write_stdin("v2")
        .assert()
        .success();

    env.pl()
        .args(["show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notes, fixed"))
        .stdout(predicate::str::contains("v2"));
}

#[test]
fn edit_unknown_source_fails() {
    let env = TestEnv::new();

    env.pl()
        .args(["edit", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot edit paste #9"));
}

#[test]
fn family_shows_whole_tree() {
    let env = TestEnv::new();
    env.new_paste("A", "x", "1");
    env.pl().args(["edit", "1", "--title", "B"]).assert().success();
    env.pl().args(["edit", "2", "--title", "C"]).assert().success();
    env.pl().args(["edit", "1", "--title", "D"]).assert().success();

    env.pl()
        .args(["family", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  #1 A by x"))
        .stdout(predicate::str::contains("    #2 B by x"))
        .stdout(predicate::str::contains("*     #3 C by x"))
        .stdout(predicate::str::contains("    #4 D by x"))
        .stdout(predicate::str::contains("(4 paste(s), root #1)"));
}

#[test]
fn family_json_nests_children() {
    let env = TestEnv::new();
    env.new_paste("A", "x", "1");
    env.pl().args(["edit", "1", "--title", "B"]).assert().success();

    env.pl()
        .args(["--json", "family", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"children\""))
        .stdout(predicate::str::contains("\"edited_from\": 1"));
}

#[test]
fn search_matches_title_or_author() {
    let env = TestEnv::new();
    env.new_paste("notes", "ada", "1");
    env.new_paste("todo", "bob", "2");
    env.new_paste("misc", "cy", "3");
    env.pl().args(["edit", "1"]).assert().success();

    env.pl()
        .args(["search", "--title", "notes", "--author", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1\t"))
        .stdout(predicate::str::contains("#2\t"))
        .stdout(predicate::str::contains("#4\t"))
        .stdout(predicate::str::contains("#3\t").not())
        .stdout(predicate::str::contains("notes by ada [family]"))
        .stdout(predicate::str::contains("todo by bob\n"));
}

#[test]
fn search_without_matches() {
    let env = TestEnv::new();
    env.new_paste("notes", "ada", "1");

    env.pl()
        .args(["search", "--title", "Notes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching pastes."));
}

// =============================================================================
// check / restore
// =============================================================================

#[test]
fn check_passes_on_healthy_store() {
    let env = TestEnv::new();
    env.new_paste("t", "a", "b");

    env.pl()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked 1 paste(s)."));
}

#[test]
fn missing_body_fails_check_and_can_be_restored() {
    let env = TestEnv::new();
    env.new_paste("t", "a", "b");
    std::fs::remove_file(env.body_path(1)).unwrap();

    env.pl()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("paste 1 has metadata but no body"));

    env.pl()
        .args(["show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    env.pl()
        .args(["restore", "1"])
        .write_stdin("restored")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored body of paste #1"));

    env.pl()
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("restored"));
    env.pl().arg("check").assert().success();
}

#[test]
fn restore_refuses_existing_body() {
    let env = TestEnv::new();
    env.new_paste("t", "a", "keep me");

    env.pl()
        .args(["restore", "1"])
        .write_stdin("other")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already has a body"));
}

// =============================================================================
// Configuration and misc
// =============================================================================

#[test]
fn config_time_format_is_used() {
    let env = TestEnv::new();
    let config = env.dir.path().join("config.toml");
    std::fs::write(&config, "time_format = \"year %Y\"\n").unwrap();
    env.new_paste("t", "a", "b");

    env.pl()
        .env("PASTELINE_CONFIG", &config)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created: year 2"));
}

#[test]
fn invalid_config_is_reported() {
    let env = TestEnv::new();
    let config = env.dir.path().join("config.toml");
    std::fs::write(&config, "unknown_key = 1\n").unwrap();

    env.pl()
        .env("PASTELINE_CONFIG", &config)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn quiet_suppresses_status_lines() {
    let env = TestEnv::new();

    env.pl()
        .args(["-q", "new", "--title", "t", "--author", "a"])
        .write_stdin("b")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn completion_generates_script() {
    let env = TestEnv::new();

    env.pl()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pl"));
}

#[test]
fn version_flag_works() {
    Command::cargo_bin("pl")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pl"));
}
