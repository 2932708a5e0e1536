//! End-to-end tests: environment settings through to the rendered report.

use std::collections::HashMap;

use coven_ritual::application::batch::run_batch;
use coven_ritual::domain::game::Simulation;
use coven_sim::error::AppError;
use coven_sim::report::render;
use coven_sim::settings::{OutputFormat, SimSettings};

fn settings_from(pairs: &[(&str, &str)]) -> Result<SimSettings, AppError> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    SimSettings::from_lookup(move |key| vars.get(key).cloned())
}

fn run(settings: &SimSettings) -> Result<String, AppError> {
    let simulation = Simulation::new(settings.load_balance()?)?;
    let report = run_batch(&simulation, &settings.batch)?;
    render(&report, settings.output)
}

#[test]
fn test_text_report_covers_every_player_count() {
    let settings = settings_from(&[("COVEN_GAMES_PER_COUNT", "50"), ("COVEN_SEED", "7")]).unwrap();

    let text = run(&settings).unwrap();

    assert!(text.starts_with("Coven balance simulation: seed 7, 50 games per player count\n"));
    for n in 3..=9 {
        assert!(text.contains(&format!("== {n} players ==")), "missing {n}:\n{text}");
    }
    assert_eq!(text.matches("Winrate -> Coven: ").count(), 7);
    assert!(!text.contains("purging moon"));
}

#[test]
fn test_seeded_runs_print_identical_reports() {
    let settings = settings_from(&[
        ("COVEN_GAMES_PER_COUNT", "40"),
        ("COVEN_SEED", "99"),
        ("COVEN_PARALLEL", "true"),
    ])
    .unwrap();
    let sequential = settings_from(&[
        ("COVEN_GAMES_PER_COUNT", "40"),
        ("COVEN_SEED", "99"),
        ("COVEN_PARALLEL", "false"),
    ])
    .unwrap();

    assert_eq!(run(&settings).unwrap(), run(&sequential).unwrap());
}

#[test]
fn test_json_report_for_narrow_range() {
    let settings = settings_from(&[
        ("COVEN_GAMES_PER_COUNT", "20"),
        ("COVEN_MIN_PLAYERS", "7"),
        ("COVEN_MAX_PLAYERS", "8"),
        ("COVEN_SEED", "3"),
        ("COVEN_OUTPUT", "json"),
    ])
    .unwrap();
    assert_eq!(settings.output, OutputFormat::Json);

    let json: serde_json::Value = serde_json::from_str(&run(&settings).unwrap()).unwrap();

    let stats = json["stats"].as_array().unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0]["player_count"], 7);
    assert_eq!(stats[1]["games"], 20);
}

#[test]
fn test_balance_file_is_applied() {
    let path = std::env::temp_dir().join(format!("coven-balance-{}.yaml", std::process::id()));
    std::fs::write(&path, "purging_moon:\n  enabled: true\n").unwrap();
    let settings = settings_from(&[
        ("COVEN_GAMES_PER_COUNT", "30"),
        ("COVEN_MIN_PLAYERS", "9"),
        ("COVEN_SEED", "5"),
        ("COVEN_BALANCE_FILE", path.to_str().unwrap()),
    ])
    .unwrap();

    let text = run(&settings);
    std::fs::remove_file(&path).unwrap();

    assert!(text.unwrap().contains("Avg purging moon events per game: "));
}

#[test]
fn test_invalid_balance_is_rejected_before_running() {
    let path = std::env::temp_dir().join(format!("coven-bad-{}.yaml", std::process::id()));
    std::fs::write(&path, "max_rounds: 0\n").unwrap();
    let settings = settings_from(&[("COVEN_BALANCE_FILE", path.to_str().unwrap())]).unwrap();

    let err = run(&settings).unwrap_err();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(
        err.to_string(),
        "invalid configuration: max_rounds must be at least 1"
    );
}

#[test]
fn test_unsupported_range_is_rejected() {
    let settings = settings_from(&[("COVEN_MAX_PLAYERS", "12"), ("COVEN_SEED", "1")]).unwrap();

    let err = run(&settings).unwrap_err();

    assert!(matches!(err, AppError::Domain(_)));
    assert_eq!(err.to_string(), "unsupported player count: 10");
}
