//! CLI integration tests against an isolated file-backed cache.

mod common;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use common::{GEMS_URL, Sandbox, path_str};

fn list_json(sandbox: &Sandbox) -> Value {
    let stdout = sandbox.run_success(&["list", "--json"]);
    serde_json::from_str(stdout.trim()).expect("list --json prints JSON")
}

fn names(entries: &Value) -> Vec<&str> {
    entries
        .as_array()
        .expect("entries are an array")
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect()
}

#[test]
fn parse_prints_valid_records() {
    let sandbox = Sandbox::new();
    let body = sandbox.body();

    let stdout = sandbox.run_success(&["parse", path_str(&body)]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);

    let records: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(
        records,
        json!([
            {"id": "gem-writer", "name": "Writer", "description": "Drafts blog posts"},
            {"id": "gem-coder", "name": "Coder", "description": "Reviews code"}
        ])
    );
}

#[test]
fn parse_with_other_rpc_id_finds_nothing() {
    let sandbox = Sandbox::new();
    let body = sandbox.body();

    let output = sandbox.run(&["parse", path_str(&body), "--rpc-id", "otherId"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No Gem list found"));
}

#[test]
fn parse_gate_rejects_short_ids() {
    let sandbox = Sandbox::new();
    let body = sandbox.body();

    let output = sandbox.run(&["parse", path_str(&body), "--min-id-len", "20"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn parse_missing_file_fails() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["parse", "/nonexistent/body.txt"]);
    assert!(!output.status.success());
}

#[test]
fn ingest_then_list() {
    let sandbox = Sandbox::new();

    let stdout = sandbox.ingest();
    assert!(stdout.contains("Stored 2 Gems"), "stdout: {}", stdout);

    let entries = list_json(&sandbox);
    assert_eq!(names(&entries), ["Coder", "Writer"]);
    assert_eq!(entries[0]["emoji"], "💎");
    assert_eq!(entries[0]["isFavorite"], false);
    assert!(sandbox.store().join("storage.json").exists());
}

#[test]
fn ingest_is_idempotent() {
    let sandbox = Sandbox::new();
    sandbox.ingest();

    let stdout = sandbox.ingest();
    assert!(stdout.contains("unchanged"), "stdout: {}", stdout);
    assert_eq!(names(&list_json(&sandbox)), ["Coder", "Writer"]);
}

#[test]
fn ingest_through_xhr() {
    let sandbox = Sandbox::new();
    let body = sandbox.body();

    let stdout =
        sandbox.run_success(&["ingest", path_str(&body), "--url", GEMS_URL, "--xhr"]);
    assert!(stdout.contains("Stored 2 Gems"), "stdout: {}", stdout);
}

#[test]
fn ingest_replaces_previous_list() {
    let sandbox = Sandbox::new();
    sandbox.ingest();

    let smaller = sandbox.write(
        "smaller.txt",
        r#")]}'
90
[["wrb.fr","CNgdBe","[null,null,[[\"gem-new\",[\"Researcher\"],\"Finds papers\"]]]"]]
"#,
    );
    sandbox.run_success(&["ingest", path_str(&smaller), "--url", GEMS_URL]);

    assert_eq!(names(&list_json(&sandbox)), ["Researcher"]);
}

#[test]
fn ingest_ignores_unmatched_url() {
    let sandbox = Sandbox::new();
    let body = sandbox.body();

    let output = sandbox.run(&[
        "ingest",
        path_str(&body),
        "--url",
        "https://gemini.google.com/_/BardChatUi/data/batchexecute?rpcids=otherId",
    ]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No Gem list found"));
    assert_eq!(list_json(&sandbox), json!([]));
}

#[test]
fn favorites_sort_first_and_emoji_shows() {
    let sandbox = Sandbox::new();
    sandbox.ingest();

    sandbox.run_success(&["favorite", "gem-writer"]);
    sandbox.run_success(&["emoji", "gem-coder", "🤖"]);

    let entries = list_json(&sandbox);
    assert_eq!(names(&entries), ["Writer", "Coder"]);
    assert_eq!(entries[0]["isFavorite"], true);
    assert_eq!(entries[1]["emoji"], "🤖");

    sandbox.run_success(&["favorite", "gem-writer"]);
    sandbox.run_success(&["emoji", "gem-coder"]);

    let entries = list_json(&sandbox);
    assert_eq!(names(&entries), ["Coder", "Writer"]);
    assert_eq!(entries[0]["emoji"], "💎");
}

#[test]
fn preferences_survive_reingest() {
    let sandbox = Sandbox::new();
    sandbox.ingest();
    sandbox.run_success(&["favorite", "gem-coder"]);

    sandbox.ingest();

    let entries = list_json(&sandbox);
    assert_eq!(entries[0]["id"], "gem-coder");
    assert_eq!(entries[0]["isFavorite"], true);
}

#[test]
fn list_query_filters() {
    let sandbox = Sandbox::new();
    sandbox.ingest();

    let stdout = sandbox.run_success(&["list", "--json", "--query", "BLOG"]);
    let entries: Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(names(&entries), ["Writer"]);
}

#[test]
fn list_empty_store() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["list"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No Gems found"));
}

#[test]
fn invalid_emoji_is_rejected() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["emoji", "gem-coder", "abc"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid emoji"));
}

#[test]
fn options_pin_round_trip() {
    let sandbox = Sandbox::new();

    let defaults: Value =
        serde_json::from_str(sandbox.run_success(&["options", "--json"]).trim()).unwrap();
    assert_eq!(
        defaults,
        json!({"pinned": false, "showInEmptyState": true, "showInChat": true})
    );

    sandbox.run_success(&["options", "--pin"]);
    let pinned: Value =
        serde_json::from_str(sandbox.run_success(&["options", "--json"]).trim()).unwrap();
    assert_eq!(pinned["pinned"], true);

    let output = sandbox.run(&["options", "--pin", "--unpin"]);
    assert!(!output.status.success());
}

#[test]
fn list_renders_entries() {
    let sandbox = Sandbox::new();
    sandbox.ingest();
    sandbox.run_success(&["favorite", "gem-coder"]);

    let stdout = sandbox.run_success(&["list"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].contains("Coder") && lines[0].contains("★"));
    assert!(lines[1].contains("Reviews code"));
    assert!(lines[2].contains("https://gemini.google.com/app?gem_id=gem-coder"));
    assert!(lines[3].contains("Writer") && !lines[3].contains("★"));
}

#[test]
fn options_render_as_fields() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.run_success(&["options"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("pinned") && lines[0].ends_with("false"));
    assert!(lines[1].contains("showInEmptyState") && lines[1].ends_with("true"));
    assert!(lines[2].contains("showInChat") && lines[2].ends_with("true"));
}

#[test]
fn version_matches_package() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.run_success(&["--version"]);
    assert_eq!(stdout.trim(), format!("gemdex {}", env!("CARGO_PKG_VERSION")));
}
