//! Text and JSON output.

use crate::prelude::*;

fn project_with(files: &[&str]) -> Project {
    let temp = Project::with_prettier();
    let mut listing = files.join("\n");
    listing.push('\n');
    temp.file("unformatted.txt", &listing);
    temp
}

// =============================================================================
// JSON
// =============================================================================

/// > -o json produces a single JSON document
#[test]
fn json_output_structure() {
    let temp = project_with(&["src/a.js"]);

    let json = check().pwd(temp.path()).json().fails();
    let root = json.value();
    assert_eq!(root["name"], "prettier");
    assert_eq!(root["passed"], false);
    assert_eq!(root["invocations"], 1);
    assert!(root["timestamp"].as_str().unwrap().ends_with('Z'));

    let violation = &json.violations()[0];
    assert_eq!(violation["file"], "src/a.js");
    assert_eq!(violation["line"], 0);
    assert_eq!(violation["message"], "File not formatted with Prettier");
}

/// > Passing JSON omits empty lists
#[test]
fn json_pass_omits_empty_lists() {
    let temp = Project::with_prettier();

    let json = check().pwd(temp.path()).json().passes();
    assert_eq!(json.require("passed"), true);
    assert!(json.value().get("violations").is_none());
    assert!(json.value().get("tool_failures").is_none());
}

/// > JSON output is not truncated by --limit
#[test]
fn json_ignores_limit() {
    let temp = project_with(&["a.js", "b.js", "c.js"]);

    let json = check()
        .pwd(temp.path())
        .args(&["--limit", "1"])
        .json()
        .fails();
    assert_eq!(json.violation_files(), vec!["a.js", "b.js", "c.js"]);
}

// =============================================================================
// TEXT
// =============================================================================

/// > --limit truncates text output with a hint
#[test]
fn text_limit_truncates() {
    let temp = project_with(&["a.js", "b.js", "c.js"]);

    check()
        .pwd(temp.path())
        .args(&["--limit", "2"])
        .exits(1)
        .stdout_eq(
            "prettier: FAIL
  a.js: File not formatted with Prettier
  b.js: File not formatted with Prettier
Stopped after 2 violations. Use --no-limit to see all.
FAIL: 1 invocation, 3 files not formatted
",
        );
}

/// > --no-limit shows every violation
#[test]
fn text_no_limit_shows_all() {
    let files: Vec<String> = (0..20).map(|i| format!("f{i}.js")).collect();
    let refs: Vec<&str> = files.iter().map(String::as_str).collect();
    let temp = project_with(&refs);

    check()
        .pwd(temp.path())
        .args(&["--no-limit"])
        .exits(1)
        .stdout_has("f19.js")
        .stdout_lacks("Stopped after");
}

/// > NO_COLOR disables color output
#[test]
fn no_color_env_disables_color() {
    let temp = project_with(&["a.js"]);

    check()
        .pwd(temp.path())
        .env("NO_COLOR", "1")
        .exits(1)
        .stdout_lacks("\x1b[");
}

/// > --color forces color output
#[test]
fn color_flag_forces_color() {
    let temp = project_with(&["a.js"]);

    check()
        .pwd(temp.path())
        .args(&["--color"])
        .exits(1)
        .stdout_has("\x1b[");
}

/// > --no-color wins over COLOR
#[test]
fn no_color_flag_wins_over_env() {
    let temp = project_with(&["a.js"]);

    check()
        .pwd(temp.path())
        .args(&["--no-color"])
        .env("COLOR", "1")
        .exits(1)
        .stdout_lacks("\x1b[");
}
