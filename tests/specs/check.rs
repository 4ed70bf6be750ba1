//! Whole-project checks and formatter resolution.

use crate::prelude::*;

// =============================================================================
// WHOLE PROJECT
// =============================================================================

/// > Without filtering, prettier runs once against "."
#[test]
fn whole_project_is_checked_once() {
    let temp = Project::with_prettier();
    temp.file("src/app.js", "ugly");

    check().pwd(temp.path()).passes();
    assert_eq!(temp.prettier_calls(), vec!["--list-different ."]);
}

/// > Empty formatter output reports nothing
#[test]
fn clean_project_passes() {
    let temp = Project::with_prettier();

    check()
        .pwd(temp.path())
        .passes()
        .stdout_eq("PASS: 1 invocation, all files formatted\n");
}

/// > One failure per listed file, each at line 0
#[test]
fn listed_files_are_reported() {
    let temp = Project::with_prettier();
    temp.file("unformatted.txt", "src/a.js\nsrc/b.js\n");

    check().pwd(temp.path()).exits(1).stdout_eq(
        "prettier: FAIL
  src/a.js: File not formatted with Prettier
  src/b.js: File not formatted with Prettier
FAIL: 1 invocation, 2 files not formatted
",
    );
}

/// > Blank lines in formatter output are ignored
#[test]
fn blank_output_lines_are_ignored() {
    let temp = Project::with_prettier();
    temp.file("unformatted.txt", "\nsrc/a.js\n\n   \n");

    let json = check().pwd(temp.path()).json().fails();
    assert_eq!(json.violation_files(), vec!["src/a.js"]);
}

/// > Absolute paths under the project root are reported relative to it
#[test]
fn absolute_output_paths_are_made_relative() {
    let temp = Project::with_prettier();
    let root = std::fs::canonicalize(temp.path()).unwrap();
    temp.file(
        "unformatted.txt",
        &format!("{}\n", root.join("src/a.js").display()),
    );

    let json = check().pwd(temp.path()).json().fails();
    assert_eq!(json.violation_files(), vec!["src/a.js"]);
    assert_eq!(json.violations()[0]["line"], 0);
}

/// > A PATH argument selects the project root
#[test]
fn path_argument_sets_root() {
    let temp = Project::empty();
    temp.executable("web/node_modules/.bin/prettier", FAKE_PRETTIER);
    temp.file("web/unformatted.txt", "index.js\n");

    let json = check().pwd(temp.path()).args(&["web"]).json().fails();
    assert_eq!(json.violation_files(), vec!["index.js"]);
}

// =============================================================================
// FORMATTER CONFIG
// =============================================================================

/// > --config-file is passed through as --config <path>
#[test]
fn config_file_flag_is_passed_through() {
    let temp = Project::with_prettier();

    check()
        .pwd(temp.path())
        .args(&["--config-file", ".prettierrc.json"])
        .passes();
    assert_eq!(
        temp.prettier_calls(),
        vec!["--list-different --config .prettierrc.json ."]
    );
}

/// > Without a config file no --config argument is added
#[test]
fn no_config_argument_by_default() {
    let temp = Project::with_prettier();

    check().pwd(temp.path()).passes();
    assert!(!temp.prettier_calls()[0].contains("--config"));
}

// =============================================================================
// FORMATTER RESOLUTION
// =============================================================================

/// > Missing formatter is fatal: exit 2, nothing reported
#[test]
fn missing_formatter_exits_2() {
    let temp = Project::empty();

    check()
        .pwd(temp.path())
        .env("PATH", "")
        .exits(2)
        .stderr_has("prettier is not installed")
        .stdout_lacks("FAIL");
}

/// > A nonexistent --executable with nothing on PATH is fatal
#[test]
fn missing_configured_executable_exits_2() {
    let temp = Project::with_prettier();
    std::fs::remove_file(temp.path().join("node_modules/.bin/prettier")).unwrap();

    check()
        .pwd(temp.path())
        .args(&["--executable", "bin/nope"])
        .env("PATH", "")
        .exits(2)
        .stderr_has("prettier is not installed");
}

/// > --executable replaces the local node_modules install
#[test]
fn configured_executable_is_used() {
    let temp = Project::empty();
    temp.executable("tools/fmt", FAKE_PRETTIER);
    temp.file("unformatted.txt", "a.js\n");

    check()
        .pwd(temp.path())
        .args(&["--executable", "tools/fmt"])
        .exits(1)
        .stdout_has("a.js: File not formatted with Prettier");
}

/// > prettier on PATH is used when no local install exists
#[test]
fn formatter_on_path_is_used() {
    let temp = Project::empty();
    let bin = Project::empty();
    bin.executable("prettier", FAKE_PRETTIER);
    temp.file("unformatted.txt", "a.js\n");

    let path = format!(
        "{}:{}",
        bin.path().display(),
        std::env::var("PATH").unwrap_or_default()
    );
    check()
        .pwd(temp.path())
        .env("PATH", &path)
        .exits(1)
        .stdout_has("a.js");
}

// =============================================================================
// TOOL FAILURES
// =============================================================================

/// > A non-zero exit with no listing is a warning, not a violation
#[test]
fn formatter_error_is_a_warning() {
    let temp = Project::empty();
    temp.executable(
        "node_modules/.bin/prettier",
        "#!/bin/sh\necho '[error] No parser could be inferred' >&2\nexit 2\n",
    );

    check().pwd(temp.path()).passes().stdout_eq(
        "prettier: WARN
  .: exited with status 2
    [error] No parser could be inferred
PASS: 1 invocation, all files formatted
",
    );
}

/// > --timeout kills a hanging formatter
#[test]
fn hanging_formatter_times_out() {
    let temp = Project::empty();
    temp.executable("node_modules/.bin/prettier", "#!/bin/sh\nexec sleep 10\n");

    let json = check()
        .pwd(temp.path())
        .args(&["--timeout", "200ms"])
        .json()
        .passes();
    let failures = json.tool_failures();
    assert_eq!(failures.len(), 1);
    assert!(failures[0]["reason"].as_str().unwrap().contains("timed out"));
}
