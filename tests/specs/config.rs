//! Settings file, precedence, and environment variables.

use crate::prelude::*;

/// > [prettier] settings apply when no flag overrides them
#[test]
fn settings_file_configures_check() {
    let temp = Project::with_prettier();
    temp.config(
        r#"
[prettier]
config_file = "cfg/.prettierrc"
"#,
    );

    check().pwd(temp.path()).passes();
    assert_eq!(
        temp.prettier_calls(),
        vec!["--list-different --config cfg/.prettierrc ."]
    );
}

/// > Command-line flags take precedence over the settings file
#[test]
fn flags_override_settings_file() {
    let temp = Project::with_prettier();
    temp.config(
        r#"
[prettier]
config_file = "from-file.json"
"#,
    );

    check()
        .pwd(temp.path())
        .args(&["--config-file", "from-flag.json"])
        .passes();
    assert_eq!(
        temp.prettier_calls(),
        vec!["--list-different --config from-flag.json ."]
    );
}

/// > filtering = true in the settings file enables change-set mode
#[test]
fn settings_file_enables_filtering() {
    let temp = Project::with_prettier();
    git_init(&temp);
    temp.config("[prettier]\nfiltering = true\n");
    git_initial_commit(&temp);
    temp.file("src/new.js", "ugly\n");

    let json = check().pwd(temp.path()).json().fails();
    assert_eq!(json.violation_files(), vec!["src/new.js"]);
    assert_eq!(temp.prettier_calls(), vec!["--list-different src/new.js"]);
}

/// > executable_path in the settings file locates the formatter
#[test]
fn settings_file_executable_path() {
    let temp = Project::empty();
    temp.executable("tools/prettier", FAKE_PRETTIER);
    temp.config("[prettier]\nexecutable_path = \"tools/prettier\"\n");
    temp.file("unformatted.txt", "a.js\n");

    check()
        .pwd(temp.path())
        .env("PATH", "")
        .exits(1)
        .stdout_has("a.js");
}

/// > Unknown keys are warnings (forward compatibility)
#[test]
fn unknown_keys_warn() {
    let temp = Project::with_prettier();
    temp.config("unknown_key = true\n[prettier]\nparser = \"babel\"\n");

    check()
        .pwd(temp.path())
        .passes()
        .stderr_has("unrecognized field `unknown_key` (ignored)")
        .stderr_has("unrecognized field `prettier.parser` (ignored)");
}

/// > Valid config produces no warnings
#[test]
fn valid_config_no_warnings() {
    let temp = Project::with_prettier();
    temp.config("[prettier]\nfiltering = false\ntimeout = \"30s\"\n");

    check().pwd(temp.path()).passes().stderr_lacks("warning");
}

/// > Unsupported version is a config error
#[test]
fn unsupported_version_exits_2() {
    let temp = Project::with_prettier();
    temp.config("version = 2\n");

    check()
        .pwd(temp.path())
        .exits(2)
        .stderr_has("unsupported config version 2");
}

/// > An invalid file_regex is a config error
#[test]
fn invalid_file_regex_exits_2() {
    let temp = Project::with_prettier();
    temp.config("[prettier]\nfile_regex = \"(unclosed\"\n");

    check()
        .pwd(temp.path())
        .exits(2)
        .stderr_has("invalid file pattern `(unclosed`");
}

/// > An invalid timeout is a config error
#[test]
fn invalid_timeout_exits_2() {
    let temp = Project::with_prettier();
    temp.config("[prettier]\ntimeout = \"forever\"\n");

    check().pwd(temp.path()).exits(2).stderr_has("config error");
}

/// > -C points at an explicit settings file
#[test]
fn explicit_config_flag() {
    let temp = Project::with_prettier();
    temp.file("ci.toml", "version = 1\n[prettier]\nconfig_file = \"ci.json\"\n");

    check().pwd(temp.path()).args(&["-C", "ci.toml"]).passes();
    assert_eq!(
        temp.prettier_calls(),
        vec!["--list-different --config ci.json ."]
    );
}

/// > A missing -C file is a config error
#[test]
fn missing_explicit_config_exits_2() {
    let temp = Project::with_prettier();

    check()
        .pwd(temp.path())
        .args(&["-C", "nope.toml"])
        .exits(2)
        .stderr_has("config file not found");
}

/// > PRETTIER_REVIEW_CONFIG sets the settings file location
#[test]
fn env_config_sets_path() {
    let temp = Project::with_prettier();
    temp.file("env.toml", "version = 1\n[prettier]\nconfig_file = \"env.json\"\n");

    check()
        .pwd(temp.path())
        .env("PRETTIER_REVIEW_CONFIG", "env.toml")
        .passes();
    assert_eq!(
        temp.prettier_calls(),
        vec!["--list-different --config env.json ."]
    );
}

/// > PRETTIER_REVIEW_LOG enables debug logging to stderr
#[test]
fn env_log_enables_debug() {
    let temp = Project::with_prettier();

    check()
        .pwd(temp.path())
        .env("PRETTIER_REVIEW_LOG", "debug")
        .passes()
        .stderr_has("DEBUG")
        .stderr_has("running");
}

/// > Logging is off by default
#[test]
fn logging_off_by_default() {
    let temp = Project::with_prettier();

    check().pwd(temp.path()).passes().stderr_lacks("DEBUG");
}
