use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn partmatch() -> Command {
    let mut cmd = Command::cargo_bin("partmatch").unwrap();
    for var in ["GOOGLE_SHEET_URL", "PRODUCT_CACHE_MS", "PARTMATCH_TIMEOUT_SECS", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd.arg("--file").arg(fixture("catalog.csv"));
    cmd
}

#[test]
fn search_slang_query_ranks_prius_bumper_first() {
    let output = partmatch()
        .args(["--format", "json", "search", "p20", "gpr"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["query"], "p20 gpr");
    assert_eq!(json["results"][0]["product"]["tokCode"], "TOK123");
    assert_eq!(json["results"][0]["product"]["priceWithVat"], "125,000 ₮");
    assert!(json["results"][0]["counts"]["synonym"].as_u64().unwrap() > 0);
}

#[test]
fn search_by_code_text_output() {
    partmatch()
        .args(["search", "TOK310"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Тоормосны колодок"))
        .stdout(predicate::str::contains("45,000 ₮"));
}

#[test]
fn search_without_match_suggests_categories() {
    partmatch()
        .args(["search", "XYZ9999nonexistent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No products found"))
        .stdout(predicate::str::contains("Бампер (Bumper)"));
}

#[test]
fn search_json_without_match_has_suggestions() {
    let output = partmatch()
        .args(["--format", "json", "search", "XYZ9999nonexistent"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["count"], 0);
    assert!(json["suggestions"]["categories"].as_array().unwrap().len() >= 4);
}

#[test]
fn search_greeting_only_finds_nothing() {
    partmatch()
        .args(["search", "Сайн", "байна", "уу?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No products found"));

    let output = partmatch()
        .args(["--format", "json", "search", "sain baina uu"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["count"], 0);
}

#[test]
fn search_strips_greeting_around_part_request() {
    let output = partmatch()
        .args(["--format", "json", "search", "Сайн байна уу? TOK310 байгаа юу"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["results"][0]["product"]["tokCode"], "TOK310");
}

#[test]
fn categories_lists_catalog_parts() {
    partmatch()
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Толь (Mirror)"))
        .stdout(predicate::str::contains("Шүүлтүүр (Filter)"));
}

#[test]
fn health_reports_product_count() {
    let output = partmatch().args(["--format", "json", "health"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["productCount"], 4);
}

#[test]
fn health_reports_millisecond_cache_ttl() {
    let output = partmatch()
        .env("PRODUCT_CACHE_MS", "1500")
        .args(["--format", "json", "health"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["cacheTtlMs"], 1500);
}

#[test]
fn check_flags_incomplete_catalog() {
    partmatch()
        .args(["check", "--expected", "4"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("1 products have missing fields"));
}

#[test]
fn check_count_mismatch_json() {
    let output = partmatch()
        .args(["--format", "json", "check", "--expected", "226"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["countMatches"], false);
    assert_eq!(json["difference"], -222);
}

#[test]
fn missing_catalog_file_is_a_data_source_error() {
    Command::cargo_bin("partmatch")
        .unwrap()
        .args(["--file", "/nonexistent/catalog.csv", "search", "бампер"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("E4000"));
}

#[test]
fn missing_sheet_url_is_a_config_error() {
    Command::cargo_bin("partmatch")
        .unwrap()
        .env_remove("GOOGLE_SHEET_URL")
        .arg("--config")
        .arg(fixture("no-source.toml"))
        .args(["search", "бампер"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("GOOGLE_SHEET_URL"));
}
