use serde::Deserialize;

/// One stored statistics record: `{ "history": [ { "gameResult": ... }, ... ] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatisticHistory {
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "gameResult")]
    pub game_result: GameResult,
}

/// Recorders store the multiplier either as a JSON number or as its text form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GameResult {
    Number(f64),
    Text(String),
}

impl GameResult {
    pub fn to_multiplier(&self) -> Result<f64, String> {
        let value = match self {
            GameResult::Number(num) => *num,
            GameResult::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("gameResult {:?} is not a number", text))?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(format!("gameResult {} is not finite", value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let json = r#"{"history":[{"gameResult":1.5},{"gameResult":" 2.25 ","id":7}]}"#;
        let parsed: StatisticHistory = serde_json::from_str(json).unwrap();
        let values: Vec<f64> = parsed
            .history
            .iter()
            .map(|e| e.game_result.to_multiplier().unwrap())
            .collect();
        assert_eq!(values, vec![1.5, 2.25]);
    }

    #[test]
    fn rejects_text_that_is_not_a_number() {
        let entry = GameResult::Text("crash".to_string());
        assert!(entry.to_multiplier().is_err());
        assert!(GameResult::Text("inf".to_string()).to_multiplier().is_err());
    }

    #[test]
    fn missing_field_fails_to_parse() {
        let json = r#"{"history":[{"result":1.5}]}"#;
        assert!(serde_json::from_str::<StatisticHistory>(json).is_err());
    }
}
