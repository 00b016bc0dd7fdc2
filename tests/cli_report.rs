use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use seolens_lib::output::SeoOutput;
use tempfile::TempDir;

fn asset(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test_assets")
        .join(name)
}

fn run_cmd(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_seolens"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run seolens command")
}

fn analyze_saved(extra: &[&str]) -> Output {
    let payload = asset("instant_pages.json");
    let mut args = vec![
        "analyze",
        "--url",
        "https://example.com/blog",
        "--payload",
        payload.to_str().unwrap(),
    ];
    args.extend_from_slice(extra);
    let output = run_cmd(&args);
    assert!(
        output.status.success(),
        "analyze should exit 0, got {:?}; stderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn parse_json(stdout: &[u8]) -> SeoOutput {
    serde_json::from_slice(stdout).expect("output should be valid JSON")
}

#[test]
fn json_report_carries_four_score_cards() {
    let output = analyze_saved(&["--format", "json"]);
    let report = match parse_json(&output.stdout) {
        SeoOutput::Analyze(report) => report,
        other => panic!("expected analyze output, got {other:?}"),
    };

    assert_eq!(report.url, "https://example.com/blog");
    assert!(report.page_url.is_none());

    let values: Vec<(&str, &str)> = report
        .scores
        .cards()
        .iter()
        .map(|c| (c.title.as_str(), c.value.as_str()))
        .collect();
    assert_eq!(
        values,
        vec![
            ("On page score", "88.46"),
            ("SEO", "60"),
            ("Performance", "71.00"),
            ("Best Practices", "80.00"),
        ]
    );
}

#[test]
fn json_report_keeps_payload_order_and_drops_nulls() {
    let output = analyze_saved(&["--format", "json"]);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");

    let keys: Vec<&str> = json["onPageResults"]
        .as_array()
        .expect("onPageResults")
        .iter()
        .map(|e| e["key"].as_str().unwrap())
        .collect();
    assert_eq!(
        keys,
        vec![
            "plain_text_size",
            "plain_text_rate",
            "plain_text_word_count",
            "flesch_kincaid_readability_index",
            "internal_links_count",
            "external_links_count",
            "images_count",
            "scripts_count",
        ]
    );

    let checks = json["checks"].as_array().expect("checks");
    assert_eq!(checks.len(), 16, "non-boolean checks are dropped");
    assert_eq!(checks[0]["key"], "no_content_encoding");
    assert_eq!(checks[0]["value"], false);
    assert!(checks.iter().all(|c| c["value"].is_boolean()));
}

#[test]
fn config_performance_weights_change_the_score() {
    let dir = TempDir::new().expect("tempdir");
    let cfg_path = dir.path().join("seolens.toml");
    std::fs::write(
        &cfg_path,
        r#"
[performance.weights]
time_to_interactive = 0.0
largest_contentful_paint = 0.0
first_input_delay = 1.0
duration_time = 0.0
"#,
    )
    .expect("write config");

    let output = analyze_saved(&["--config", cfg_path.to_str().unwrap(), "--format", "json"]);
    match parse_json(&output.stdout) {
        SeoOutput::Analyze(report) => {
            assert_eq!(report.scores.performance.value, "100.00");
            assert_eq!(report.scores.performance.percent, 100.0);
        }
        other => panic!("expected analyze output, got {other:?}"),
    }
}

#[test]
fn output_flag_writes_report_to_file() {
    let dir = TempDir::new().expect("tempdir");
    let out_path = dir.path().join("report.json");
    let output = analyze_saved(&["--format", "json", "--output", out_path.to_str().unwrap()]);
    assert!(output.stdout.is_empty(), "stdout should stay empty");

    let written = std::fs::read(&out_path).expect("report file");
    assert!(matches!(parse_json(&written), SeoOutput::Analyze(_)));
}

#[test]
fn pretty_format_falls_back_to_json_when_piped() {
    let output = analyze_saved(&["--format", "pretty"]);
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains('\n'), "pretty JSON spans lines");
    assert!(matches!(parse_json(&output.stdout), SeoOutput::Analyze(_)));
}
