//! Report rendering.

use std::fmt::{self, Write as _};

use coven_ritual::application::batch::{BatchReport, PlayerCountStats};

use crate::error::AppError;
use crate::settings::OutputFormat;

fn render_count(out: &mut String, stats: &PlayerCountStats, purging_moon: bool) -> fmt::Result {
    let totals = &stats.totals;
    writeln!(out)?;
    writeln!(out, "== {} players ==", stats.player_count)?;
    writeln!(
        out,
        "Winrate -> Coven: {:.2}, Hollow: {:.2}",
        stats.coven_win_rate(),
        stats.hollow_win_rate()
    )?;
    writeln!(out, "Avg rounds: {:.2}", stats.per_game(totals.rounds))?;
    writeln!(
        out,
        "Avg ritual outcomes per game: pure {:.2}, tainted {:.2}, backfired {:.2}",
        stats.per_game(totals.pure),
        stats.per_game(totals.tainted),
        stats.per_game(totals.backfired)
    )?;
    writeln!(
        out,
        "Avg infection events per game: {:.2}",
        stats.per_game(totals.infection_events)
    )?;
    writeln!(
        out,
        "Exorcist (per game avg): attempts {:.2}, hits {:.2}, suicides {:.2}",
        stats.per_game(totals.exorcist_attempts),
        stats.per_game(totals.exorcist_hits),
        stats.per_game(totals.exorcist_suicides)
    )?;
    if purging_moon {
        writeln!(
            out,
            "Avg purging moon events per game: {:.2}",
            stats.per_game(totals.purging_events)
        )?;
    }
    Ok(())
}

/// Renders the human-readable summary.
///
/// # Errors
///
/// Returns `AppError::Render` if formatting fails.
pub fn render_text(report: &BatchReport) -> Result<String, AppError> {
    let mut out = format!(
        "Coven balance simulation: seed {}, {} games per player count\n",
        report.seed, report.games_per_count
    );
    for stats in &report.stats {
        render_count(&mut out, stats, report.purging_moon_enabled)?;
    }
    Ok(out)
}

/// Renders the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns `AppError::Json` if serialization fails.
pub fn render_json(report: &BatchReport) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Renders the report in the requested format.
///
/// # Errors
///
/// Returns `AppError::Json` if JSON serialization fails and
/// `AppError::Render` if text formatting fails.
pub fn render(report: &BatchReport, format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Json => render_json(report),
    }
}
