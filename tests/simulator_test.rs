//! Simulator integration tests
//!
//! Configuration files, repeated runs and report output.

use montecarlo::experiments::{CardEvent, Experiment};
use montecarlo::simulator::{run_simulation, Distribution, SimConfig};
use montecarlo::SimError;
use std::path::PathBuf;

fn write_temp_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "montecarlo_{}_{}.toml",
        name,
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_load_config_file() {
    let path = write_temp_config(
        "ruin",
        r#"
        sample_count = 4000
        distribution = "gamblers_ruin"
        seed = 11
        runs = 2

        [ruin]
        stake = 3
        target = 10
        win_prob = 0.5
        "#,
    );
    let config = SimConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.distribution, Distribution::GamblersRuin);
    assert_eq!(config.ruin.stake, 3);
    assert_eq!(config.ruin.expected(), Some(0.3));
    assert_eq!(config.ruin.expected_bets(), Some(21.0));

    let report = run_simulation(&config).unwrap();
    assert_eq!(report.num_runs, 2);
    assert_eq!(report.runs[1].seed, Some(12));
    let success = &report.summary[0];
    assert!((success.mean - 0.3).abs() < 0.05, "success {}", success.mean);
}

#[test]
fn test_missing_config_file_is_io_error() {
    let err = SimConfig::load("/nonexistent/montecarlo.toml").unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
    assert!(!err.is_invalid_argument());
}

#[test]
fn test_invalid_parameters_in_file_are_invalid_argument() {
    let path = write_temp_config(
        "bad_card",
        r#"
        distribution = "card"
        [card]
        hand_size = 60
        "#,
    );
    let config = SimConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let err = run_simulation(&config).unwrap_err();
    assert!(err.is_invalid_argument(), "{err}");
}

// ============================================================================
// Reports
// ============================================================================

#[test]
fn test_card_pair_report() {
    let mut config = SimConfig {
        distribution: Distribution::Card,
        sample_count: 20_000,
        seed: Some(3),
        verbosity: 0,
        ..Default::default()
    };
    config.card.event = CardEvent::ContainsPair;

    let report = run_simulation(&config).unwrap();
    let line = &report.runs[0].lines[0];
    let expected = line.expected.unwrap();
    assert!((expected - 0.492_917).abs() < 1e-6);
    assert!((line.value - expected).abs() < 0.02, "value {}", line.value);

    let text = report.to_text();
    assert!(text.contains("MONTE CARLO ESTIMATION REPORT"));
    assert!(text.contains("a pair"));
}

#[test]
fn test_var_report_lines() {
    let config = SimConfig {
        distribution: Distribution::Var,
        sample_count: 50_000,
        seed: Some(8),
        verbosity: 0,
        ..Default::default()
    };
    let report = run_simulation(&config).unwrap();
    let lines = &report.runs[0].lines;
    assert_eq!(lines.len(), 3);
    assert!(lines[1].label.contains("Value-at-Risk"));
    assert!(lines[1].std_error.is_none());
    assert!(lines[2].value >= lines[1].value);

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["distribution"], "var");
    assert_eq!(json["runs"][0]["lines"].as_array().unwrap().len(), 3);
}

#[test]
fn test_var_with_unallocatable_sample_count_is_invalid_argument() {
    let config = SimConfig {
        distribution: Distribution::Var,
        sample_count: u64::MAX,
        seed: Some(8),
        verbosity: 0,
        ..Default::default()
    };
    let err = run_simulation(&config).unwrap_err();
    assert!(err.is_invalid_argument(), "{err}");
}

#[test]
fn test_option_price_near_black_scholes() {
    let config = SimConfig {
        distribution: Distribution::Option,
        sample_count: 100_000,
        seed: Some(21),
        verbosity: 0,
        ..Default::default()
    };
    let report = run_simulation(&config).unwrap();
    let line = &report.runs[0].lines[0];
    let se = line.std_error.unwrap();
    assert!(line.abs_error().unwrap() < 5.0 * se, "{:?}", line);
}
