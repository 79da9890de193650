//! End-to-end tests driving the `lks` binary against a temp database.
//!
//! Everything here runs offline: no API key is configured, so save
//! degrades to the placeholder summary and ask fails with a credential
//! error before any network call.

use assert_cmd::Command;
use std::path::Path;

const PLACEHOLDER: &str = "No summary available (API key not configured)";

fn lks(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lks").unwrap();
    cmd.arg("--db").arg(db);
    // Shield the run from ambient configuration
    cmd.env_remove("LINKSTASH_DB");
    cmd.env_remove("LKS_TEST_DB");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout should be JSON when piped")
}

fn stderr_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stderr should be JSON when piped")
}

#[test]
fn save_list_delete_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("lks.db");

    lks(&db).arg("init").assert().success();

    // First save: id 1, placeholder summary
    let out = lks(&db)
        .args([
            "save",
            "https://a.example",
            "--title",
            "A",
            "--content",
            "hello world",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let saved = stdout_json(&out);
    assert_eq!(saved["ok"], true);
    assert_eq!(saved["id"], 1);
    assert_eq!(saved["summary"], PLACEHOLDER);

    // List: exactly that one entry, id 1
    let out = lks(&db)
        .arg("list")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let listed = stdout_json(&out);
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["links"][0]["id"], 1);
    assert_eq!(listed["links"][0]["url"], "https://a.example");

    // Delete then list: empty
    lks(&db).args(["delete", "1"]).assert().success();
    let out = lks(&db)
        .arg("list")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(stdout_json(&out)["count"], 0);

    // Deleting the same id again is still a success
    lks(&db).args(["delete", "1"]).assert().success();
}

#[test]
fn duplicate_url_is_rejected_with_conflict_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("lks.db");

    lks(&db).arg("init").assert().success();
    lks(&db)
        .args(["save", "https://a.example", "--title", "A", "--content", "x"])
        .assert()
        .success();

    let assert = lks(&db)
        .args(["save", "https://a.example", "--title", "A", "--content", "x"])
        .assert()
        .code(3);
    let err = stderr_json(&assert.get_output().stderr);
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"]["code"], "DUPLICATE_URL");
    assert_eq!(err["error"]["message"], "URL already saved");

    // Still exactly one record
    let out = lks(&db)
        .arg("list")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(stdout_json(&out)["count"], 1);
}

#[test]
fn ask_without_key_fails_with_credential_error() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("lks.db");

    lks(&db).arg("init").assert().success();

    let assert = lks(&db).args(["ask", "what did I save?"]).assert().code(6);
    let err = stderr_json(&assert.get_output().stderr);
    assert_eq!(err["error"]["code"], "API_KEY_MISSING");
    assert_eq!(err["error"]["message"], "API key not configured");
}

#[test]
fn key_set_show_roundtrip_and_format_check() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("lks.db");

    lks(&db).arg("init").assert().success();

    // Wrong prefix is refused with the validation exit code
    let assert = lks(&db).args(["key", "set", "nope"]).assert().code(4);
    let err = stderr_json(&assert.get_output().stderr);
    assert_eq!(err["error"]["code"], "INVALID_API_KEY");

    lks(&db).args(["key", "set", "sk-test123"]).assert().success();

    let out = lks(&db)
        .args(["key", "show"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(stdout_json(&out)["api_key"], "sk-test123");
}

#[test]
fn browser_internal_pages_are_refused() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("lks.db");

    lks(&db).arg("init").assert().success();

    let assert = lks(&db).args(["save", "chrome://settings"]).assert().code(5);
    let err = stderr_json(&assert.get_output().stderr);
    assert_eq!(err["error"]["code"], "UNSUPPORTED_SCHEME");
}

#[test]
fn commands_require_init() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("never-created.db");

    let assert = lks(&db).arg("list").assert().code(2);
    let err = stderr_json(&assert.get_output().stderr);
    assert_eq!(err["error"]["code"], "NOT_INITIALIZED");
}

#[test]
fn silent_save_prints_only_the_id() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("lks.db");

    lks(&db).arg("init").assert().success();

    let out = lks(&db)
        .args([
            "--silent",
            "save",
            "https://a.example",
            "--title",
            "A",
            "--content",
            "x",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(String::from_utf8(out).unwrap().trim(), "1");
}

#[test]
fn positional_flag_aliases_are_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("lks.db");

    lks(&db).arg("init").assert().success();

    // --url is not a real clap flag; the preprocessor turns it positional
    lks(&db)
        .args([
            "save",
            "--url",
            "https://aliased.example",
            "--title",
            "A",
            "--content",
            "x",
        ])
        .assert()
        .success();

    let out = lks(&db)
        .arg("list")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(
        stdout_json(&out)["links"][0]["url"],
        "https://aliased.example"
    );
}
