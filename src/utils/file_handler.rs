use crate::analysis::simulation::{BetAction, BetRecord, SimulationOutcome, SimulationStatus};
use crate::analysis::ResultSequence;
use crate::error::AppError;
use crate::models::StatisticHistory;
use chrono::Local;
use ndarray::Array1;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

const MAX_DETAILED_ROWS: usize = 100;
const HISTORY_SUFFIX: &str = ".json";
const UNKNOWN_LABEL: &str = "unknown";

/// Label used in the report title and file name: the input name without `.json`.
pub fn derive_label(file_name: &str) -> String {
    match file_name.strip_suffix(HISTORY_SUFFIX) {
        Some(stem) => stem.to_string(),
        None => UNKNOWN_LABEL.to_string(),
    }
}

/// Resolves a history file name inside `history_dir`.
///
/// Only bare file names are accepted; anything with a directory component would
/// escape the history directory and leak into the report file name.
pub fn history_path(history_dir: &str, file_name: &str) -> Result<PathBuf, AppError> {
    let bare = Path::new(file_name).file_name().and_then(|name| name.to_str());
    if bare != Some(file_name) {
        return Err(AppError::InvalidFileName(file_name.to_string()));
    }
    Ok(Path::new(history_dir).join(file_name))
}

pub fn load_history(path: &Path) -> Result<ResultSequence, AppError> {
    let contents = fs::read_to_string(path).map_err(|source| AppError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let record: StatisticHistory =
        serde_json::from_str(&contents).map_err(|source| AppError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let numbers = record
        .history
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .game_result
                .to_multiplier()
                .map_err(|reason| AppError::InvalidEntry {
                    path: path.to_path_buf(),
                    index,
                    reason,
                })
        })
        .collect::<Result<Vec<f64>, AppError>>()?;

    debug!(path = %path.display(), rounds = numbers.len(), "history loaded");
    Ok(Array1::from(numbers))
}

fn write_error(path: &Path) -> impl FnOnce(io::Error) -> AppError + '_ {
    move |source| AppError::Write {
        path: path.to_path_buf(),
        source,
    }
}

pub fn save_report(html: &str, path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error(path))?;
    }
    fs::write(path, html).map_err(write_error(path))
}

/// Writes the settled bets as a fixed-width table followed by the totals.
pub fn save_bet_log(
    records: &[BetRecord],
    outcome: &SimulationOutcome,
    path: &Path,
) -> Result<(), AppError> {
    write_bet_log(records, outcome, path).map_err(write_error(path))
}

fn write_bet_log(
    records: &[BetRecord],
    outcome: &SimulationOutcome,
    path: &Path,
) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    let params = &outcome.params;

    writeln!(file, "=== Bet log ({}) ===\n", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file, "Starting balance: {:.2}", params.starting_balance)?;
    writeln!(file, "Base bet: {:.2}", params.base_bet)?;
    writeln!(file, "Max doublings: {}", params.max_doubling)?;
    writeln!(file, "Auto cashout: {:.2}x\n", params.auto_cashout)?;

    writeln!(
        file,
        "{:<7} {:<10} {:<10} {:<10} {:<15} {:<15} {:<6}",
        "Round", "Result", "Stake", "Payout", "Balance", "Max balance", "Action"
    )?;
    writeln!(file, "{}", "-".repeat(79))?;

    for record in records.iter().take(MAX_DETAILED_ROWS) {
        let payout = match record.action {
            BetAction::Win => format!("{:.2}", record.payout),
            BetAction::Loss => "-".to_string(),
        };
        writeln!(
            file,
            "{:<7} {:<10.2} {:<10.2} {:<10} {:<15.2} {:<15.2} {:<6}",
            record.round,
            record.outcome,
            record.stake,
            payout,
            record.balance,
            record.max_balance,
            match record.action {
                BetAction::Win => "win",
                BetAction::Loss => "loss",
            }
        )?;
    }
    if records.len() > MAX_DETAILED_ROWS {
        writeln!(file, "\n... and {} more rows ...", records.len() - MAX_DETAILED_ROWS)?;
    }

    writeln!(file, "\nTotals:")?;
    writeln!(file, "Final balance: {:.2}", outcome.final_balance)?;
    writeln!(file, "Max balance: {:.2}", outcome.max_balance)?;
    writeln!(file, "Profit: {:.2}", outcome.profit())?;
    writeln!(file, "Bets placed: {}", outcome.total_bets)?;
    writeln!(file, "Bets won: {}", outcome.winning_bets)?;
    match outcome.status {
        SimulationStatus::Terminated { round } => {
            writeln!(file, "Stopped at round {}: not enough money to bet", round)?
        }
        _ => writeln!(file, "Completed all rounds")?,
    }

    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::simulation::{simulate_with, SimulationParams};
    use ndarray::array;
    use tempfile::tempdir;

    #[test]
    fn label_strips_json_suffix() {
        assert_eq!(derive_label("2024-11-02.json"), "2024-11-02");
        assert_eq!(derive_label("history.txt"), "unknown");
        assert_eq!(derive_label("json"), "unknown");
    }

    #[test]
    fn history_path_stays_inside_history_dir() {
        assert_eq!(
            history_path("statisticHistory", "2024-11-02.json").unwrap(),
            Path::new("statisticHistory").join("2024-11-02.json")
        );
        for name in ["/etc/passwd.json", "../up.json", "nested/day.json", "..", ""] {
            let resolved = history_path("statisticHistory", name);
            assert!(
                matches!(resolved, Err(AppError::InvalidFileName(_))),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn loads_game_results_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("day.json");
        fs::write(
            &path,
            r#"{"history":[{"gameResult":"1.25"},{"gameResult":3},{"gameResult":"10.5"}]}"#,
        )
        .unwrap();

        let numbers = load_history(&path).unwrap();
        assert_eq!(numbers.to_vec(), vec![1.25, 3.0, 10.5]);
    }

    #[test]
    fn empty_history_is_valid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, r#"{"history":[]}"#).unwrap();
        assert!(load_history(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_a_read_failure() {
        let dir = tempdir().unwrap();
        let err = load_history(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, AppError::FileRead { .. }));
    }

    #[test]
    fn malformed_input_is_a_parse_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");

        fs::write(&path, r#"{"results":[1.0]}"#).unwrap();
        assert!(matches!(load_history(&path).unwrap_err(), AppError::Parse { .. }));

        fs::write(&path, r#"{"history":[{"gameResult":"1.1"},{"gameResult":"x"}]}"#).unwrap();
        match load_history(&path).unwrap_err() {
            AppError::InvalidEntry { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn report_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plots").join("out.html");
        save_report("<html></html>", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn bet_log_lists_bets_and_totals() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bets.txt");
        let numbers = array![1.0, 1.0, 1.5, 1.0, 3.0];
        let mut records = Vec::new();
        let outcome = simulate_with(&numbers, &SimulationParams::default(), |r| records.push(*r));

        save_bet_log(&records, &outcome, &path).unwrap();
        let log = fs::read_to_string(&path).unwrap();
        assert!(log.contains("loss"));
        assert!(log.contains("win"));
        assert!(log.contains("Bets placed: 3"));
        assert!(log.contains("Completed all rounds"));
    }

    #[test]
    fn bet_log_is_truncated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bets.txt");
        let numbers = Array1::from(vec![1.0; 150]);
        let params = SimulationParams {
            starting_balance: 1_000_000.0,
            ..SimulationParams::default()
        };
        let mut records = Vec::new();
        let outcome = simulate_with(&numbers, &params, |r| records.push(*r));
        assert_eq!(records.len(), 148);

        save_bet_log(&records, &outcome, &path).unwrap();
        let log = fs::read_to_string(&path).unwrap();
        let marker = format!("... and {} more rows ...", records.len() - MAX_DETAILED_ROWS);
        assert!(log.contains(&marker));
    }
}
