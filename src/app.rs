use crate::analysis::simulation::simulate_with;
use crate::analysis::{
    count_long_streaks, count_wins, sweep_cashouts, SimulationParams, STREAK_CUTOFF,
};
use crate::error::AppError;
use crate::models::Settings;
use crate::report::{render_report, ReportData};
use crate::utils::file_handler::{
    derive_label, history_path, load_history, save_bet_log, save_report,
};
use crate::utils::settings::{load_settings_or_default, save_settings};
use chrono::Local;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "spaceman-stats")]
#[command(
    about = "Streak statistics and a martingale replay over a recorded game history",
    long_about = None
)]
pub struct Cli {
    /// History file inside the history directory, e.g. 2024-11-02.json
    pub file: Option<String>,
    /// Settings file; missing file means defaults
    #[arg(long, default_value = "settings.json")]
    pub settings: PathBuf,
    #[arg(long)]
    pub history_dir: Option<String>,
    #[arg(long)]
    pub plots_dir: Option<String>,
    #[arg(long)]
    pub starting_balance: Option<f64>,
    #[arg(long)]
    pub base_bet: Option<f64>,
    /// Losses that double the bet before it resets to the base bet
    #[arg(long)]
    pub max_doubling: Option<u32>,
    /// Auto-cashout multiplier
    #[arg(long)]
    pub cashout: Option<f64>,
    /// Replay the strategy over the configured cashout range
    #[arg(long)]
    pub sweep: bool,
    /// Write every simulated bet to this file
    #[arg(long)]
    pub bet_log: Option<PathBuf>,
    /// Store the effective settings back into the settings file
    #[arg(long)]
    pub save_settings: bool,
}

impl Cli {
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(dir) = &self.history_dir {
            settings.history_dir = dir.clone();
        }
        if let Some(dir) = &self.plots_dir {
            settings.plots_dir = dir.clone();
        }
        if let Some(balance) = self.starting_balance {
            settings.starting_balance = balance;
        }
        if let Some(bet) = self.base_bet {
            settings.base_bet = bet;
        }
        if let Some(max) = self.max_doubling {
            settings.max_doubling = max;
        }
        if let Some(cashout) = self.cashout {
            settings.auto_cashout = cashout;
        }
    }
}

pub fn report_path(plots_dir: &str, label: &str) -> PathBuf {
    Path::new(plots_dir).join(format!("gameResultsPlot{}.html", label))
}

/// Loads the history, runs every analysis and writes the report. Returns the report path.
pub fn run(cli: &Cli) -> Result<PathBuf, AppError> {
    let file_name = cli.file.as_deref().ok_or(AppError::MissingArgument)?;

    let mut settings = load_settings_or_default(&cli.settings);
    cli.apply_overrides(&mut settings);
    if cli.save_settings {
        save_settings(&settings, &cli.settings).map_err(|source| AppError::Write {
            path: cli.settings.clone(),
            source,
        })?;
        info!("Settings saved to {}", cli.settings.display());
    }

    let history_path = history_path(&settings.history_dir, file_name)?;
    let label = derive_label(file_name);
    let numbers = load_history(&history_path)?;
    info!("Loaded {} rounds from {}", numbers.len(), history_path.display());

    let streak_count = count_long_streaks(&numbers, STREAK_CUTOFF);
    let wins = count_wins(&numbers);

    let params = SimulationParams::from(&settings);
    let mut records = Vec::new();
    let outcome = simulate_with(&numbers, &params, |record| {
        if cli.bet_log.is_some() {
            records.push(*record);
        }
    });
    info!(
        streak_count,
        wins,
        final_balance = outcome.final_balance,
        "analysis finished"
    );

    if let Some(path) = &cli.bet_log {
        save_bet_log(&records, &outcome, path)?;
        info!("Bet log saved to {}", path.display());
    }

    let sweep = if cli.sweep {
        sweep_cashouts(
            &numbers,
            &params,
            settings.sweep_min_cashout,
            settings.sweep_max_cashout,
            settings.sweep_step,
        )
    } else {
        Vec::new()
    };

    let html = render_report(&ReportData {
        label: &label,
        numbers: &numbers,
        streak_count,
        wins,
        outcome: &outcome,
        currency: &settings.currency,
        sweep: &sweep,
        generated_at: Local::now(),
    });

    let output_path = report_path(&settings.plots_dir, &label);
    save_report(&html, &output_path)?;
    info!("Plot saved to {}", output_path.display());

    Ok(output_path)
}
