use crate::analysis::simulation::SimulationStatus;
use crate::analysis::{
    is_low, ResultSequence, SimulationOutcome, SweepResult, LOW_THRESHOLD, STREAK_CUTOFF,
};
use chrono::{DateTime, Local};
use serde_json::json;

const LOW_POINT_COLOR: &str = "red";
const LINE_COLOR: &str = "rgba(75, 192, 192, 1)";
const FILL_COLOR: &str = "rgba(75, 192, 192, 0.2)";

pub struct ReportData<'a> {
    pub label: &'a str,
    pub numbers: &'a ResultSequence,
    pub streak_count: usize,
    pub wins: usize,
    pub outcome: &'a SimulationOutcome,
    pub currency: &'a str,
    pub sweep: &'a [SweepResult],
    pub generated_at: DateTime<Local>,
}

fn status_note(outcome: &SimulationOutcome) -> String {
    match outcome.status {
        SimulationStatus::Terminated { round } => {
            format!(" (stopped at round {}: not enough money to bet)", round)
        }
        _ => String::new(),
    }
}

fn sweep_html(sweep: &[SweepResult], currency: &str) -> String {
    if sweep.is_empty() {
        return String::new();
    }

    let rows: String = sweep
        .iter()
        .map(|r| {
            format!(
                "<tr><td>{:.2}x</td><td>{}</td><td>{:.2}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                r.auto_cashout,
                r.outcome.final_balance,
                r.outcome.profit(),
                r.outcome.total_bets,
                r.outcome.winning_bets,
                match r.outcome.status {
                    SimulationStatus::Terminated { round } => format!("stopped at {}", round),
                    _ => "completed".to_string(),
                }
            )
        })
        .collect();

    format!(
        r#"    <h2>Cashout sweep</h2>
    <table border="1" cellpadding="4" cellspacing="0">
        <tr><th>Cashout</th><th>Final balance ({currency})</th><th>Profit</th><th>Bets</th><th>Wins</th><th>Status</th></tr>
{rows}    </table>
"#
    )
}

/// Builds the self-contained HTML page: summary lines plus a zoomable line chart.
pub fn render_report(data: &ReportData) -> String {
    let label = html_escape::encode_text(data.label);
    let currency = html_escape::encode_text(data.currency);
    let outcome = data.outcome;

    let game_ids: Vec<usize> = (1..=data.numbers.len()).collect();
    let game_results: Vec<f64> = data.numbers.to_vec();
    let point_colors: Vec<&str> = data
        .numbers
        .iter()
        .map(|&v| if is_low(v) { LOW_POINT_COLOR } else { LINE_COLOR })
        .collect();

    let labels_js = json!(game_ids).to_string();
    let data_js = json!(game_results).to_string();
    let colors_js = json!(point_colors).to_string();
    let sweep = sweep_html(data.sweep, &currency);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Game Results Plot {label}</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
    <script src="https://cdn.jsdelivr.net/npm/chartjs-plugin-zoom"></script>
</head>
<body>
    <h1>Game Results {label}</h1>
    <p>Number of sequences where gameResult &lt; {threshold:.1} for more than {cutoff} times in a row: <strong>{streaks}</strong></p>
    <p>Number of wins: <strong>{wins}</strong></p>
    <p>Starting with {starting} {currency}, and using {cashout}x cashout multiplier, we get <strong>{final_balance}</strong> {currency}{note}</p>
    <div style="width: 100%; overflow-x: auto;">
        <canvas id="gameResultsChart" width="2000" height="400"></canvas>
    </div>
{sweep}    <p><small>Generated {generated}</small></p>
    <script>
        const ctx = document.getElementById('gameResultsChart').getContext('2d');
        const chart = new Chart(ctx, {{
            type: 'line',
            data: {{
                labels: {labels_js},
                datasets: [{{
                    label: 'Game Results',
                    data: {data_js},
                    borderColor: '{line_color}',
                    backgroundColor: '{fill_color}',
                    borderWidth: 1,
                    pointBackgroundColor: {colors_js}
                }}]
            }},
            options: {{
                responsive: true,
                maintainAspectRatio: false,
                plugins: {{
                    zoom: {{
                        pan: {{
                            enabled: true,
                            mode: 'x',
                            onPan: function({{chart}}) {{
                                chart.update();
                            }}
                        }},
                        zoom: {{
                            wheel: {{
                                enabled: true,
                            }},
                            pinch: {{
                                enabled: true
                            }},
                            mode: 'x',
                            onZoom: function({{chart}}) {{
                                chart.update();
                            }}
                        }}
                    }},
                    title: {{
                        display: true,
                        text: 'Game Results Over Time'
                    }}
                }},
                scales: {{
                    x: {{
                        title: {{
                            display: true,
                            text: 'Game Index'
                        }}
                    }},
                    y: {{
                        title: {{
                            display: true,
                            text: 'Game Result'
                        }}
                    }}
                }}
            }}
        }});
    </script>
</body>
</html>
"#,
        threshold = LOW_THRESHOLD,
        cutoff = STREAK_CUTOFF,
        streaks = data.streak_count,
        wins = data.wins,
        starting = outcome.params.starting_balance,
        cashout = outcome.params.auto_cashout,
        final_balance = outcome.final_balance,
        note = status_note(outcome),
        generated = data.generated_at.format("%Y-%m-%d %H:%M:%S"),
        line_color = LINE_COLOR,
        fill_color = FILL_COLOR,
    )
}
