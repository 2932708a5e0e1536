//! Run settings read from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use coven_ritual::application::batch::BatchSettings;
use coven_ritual::domain::config::BalanceConfig;

use crate::error::AppError;

/// How the report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Text,
    /// The serialized batch report.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// Everything the binary needs to start a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimSettings {
    /// Batch shape and seeding.
    pub batch: BatchSettings,
    /// Report format.
    pub output: OutputFormat,
    /// Optional YAML balance override.
    pub balance_file: Option<PathBuf>,
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    expected: &str,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be {expected}: {e}"))),
    }
}

fn parse_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> Result<bool, AppError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(AppError::Config(format!(
                "{key} must be a boolean: got `{other}`"
            ))),
        },
    }
}

impl SimSettings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but malformed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = BatchSettings::default();

        let games_per_count = parse_var(
            &lookup,
            "COVEN_GAMES_PER_COUNT",
            defaults.games_per_count,
            "a valid u32",
        )?;
        let min_players = parse_var(
            &lookup,
            "COVEN_MIN_PLAYERS",
            defaults.min_players,
            "a valid player count",
        )?;
        let max_players = parse_var(
            &lookup,
            "COVEN_MAX_PLAYERS",
            defaults.max_players,
            "a valid player count",
        )?;
        let seed = match lookup("COVEN_SEED") {
            None => None,
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| AppError::Config(format!("COVEN_SEED must be a valid u64: {e}")))?,
            ),
        };
        let parallel = parse_flag(&lookup, "COVEN_PARALLEL", defaults.parallel)?;
        let output = parse_var(&lookup, "COVEN_OUTPUT", OutputFormat::Text, "an output format")?;
        let balance_file = lookup("COVEN_BALANCE_FILE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            batch: BatchSettings {
                min_players,
                max_players,
                games_per_count,
                seed,
                parallel,
            },
            output,
            balance_file,
        })
    }

    /// Loads the balance configuration: the YAML file if one is set,
    /// otherwise the reference balance.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be read and
    /// `AppError::Yaml` if it does not parse.
    pub fn load_balance(&self) -> Result<BalanceConfig, AppError> {
        let Some(path) = &self.balance_file else {
            return Ok(BalanceConfig::default());
        };
        let yaml = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.display().to_string(),
            source,
        })?;
        parse_balance(&yaml)
    }
}

/// Parses a YAML balance configuration; omitted fields keep their defaults.
///
/// # Errors
///
/// Returns `AppError::Yaml` if the document does not parse.
pub fn parse_balance(yaml: &str) -> Result<BalanceConfig, AppError> {
    Ok(serde_yaml::from_str(yaml)?)
}
