use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub history_dir: String,
    pub plots_dir: String,
    pub currency: String,
    pub starting_balance: f64,
    pub base_bet: f64,
    pub max_doubling: u32,
    pub auto_cashout: f64,
    // Range used by the cashout sweep
    pub sweep_min_cashout: f64,
    pub sweep_max_cashout: f64,
    pub sweep_step: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_dir: "statisticHistory".to_string(),
            plots_dir: "plots".to_string(),
            currency: "HUF".to_string(),
            starting_balance: 20000.0,
            base_bet: 200.0,
            max_doubling: 5,
            auto_cashout: 2.0,
            sweep_min_cashout: 1.5,
            sweep_max_cashout: 5.0,
            sweep_step: 0.1,
        }
    }
}
