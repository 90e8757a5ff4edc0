use crate::models::Prediction;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Save any serializable value as pretty JSON
pub fn save_to_json<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(value).context("Failed to serialize data")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON file {}", path.display()))?;
    Ok(())
}

/// Load a JSON file into any deserializable value
pub fn load_from_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file {}", path.display()))?;
    let value = serde_json::from_str(&json)
        .with_context(|| format!("Failed to deserialize {}", path.display()))?;
    Ok(value)
}

#[derive(Debug, Serialize)]
struct PredictionRow<'a> {
    #[serde(rename = "Rank")]
    rank: usize,
    #[serde(rename = "Matchup")]
    matchup: &'a str,
    #[serde(rename = "Time")]
    time: &'a str,
    #[serde(rename = "Spread")]
    spread: &'a str,
    #[serde(rename = "Confidence (%)")]
    confidence: String,
    #[serde(rename = "Edge (%)")]
    edge: String,
    #[serde(rename = "Expected Value (%)")]
    expected_value: String,
    #[serde(rename = "Recommendation")]
    recommendation: &'static str,
    #[serde(rename = "Value")]
    value: String,
}

impl<'a> From<&'a Prediction> for PredictionRow<'a> {
    fn from(p: &'a Prediction) -> Self {
        Self {
            rank: p.rank,
            matchup: &p.matchup,
            time: &p.time,
            spread: &p.spread_text,
            confidence: format!("{:.1}", p.confidence),
            edge: format!("{:.1}", p.edge),
            expected_value: format!("{:.2}", p.expected_value * 100.0),
            recommendation: p.recommendation.label(),
            value: p.value.to_string(),
        }
    }
}

/// Save ranked predictions to CSV
pub fn save_predictions_to_csv(predictions: &[Prediction], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;

    for prediction in predictions {
        writer
            .serialize(PredictionRow::from(prediction))
            .context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV file")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Game, TeamStat};
    use crate::utils::recommendations::prediction_for;
    use std::collections::HashMap;

    #[test]
    fn test_csv_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.csv");

        let mut first = prediction_for(&Game::new("LAD", "NYM", -1.5, "10:10 PM"), 71.3);
        first.rank = 1;
        let mut second = prediction_for(&Game::new("TOR", "PHI", 1.5, "7:07 PM"), 50.0);
        second.rank = 2;
        save_predictions_to_csv(&[first, second], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Rank,Matchup,Time,Spread,Confidence (%)"));
        assert!(lines[1].starts_with("1,NYM @ LAD,10:10 PM,LAD -1.5,71.3"));
        assert!(lines[1].contains("STRONG BET"));
        assert!(lines[2].contains("PHI -1.5"));
        assert!(lines[2].ends_with("PASS,Low"));
    }

    #[test]
    fn test_json_round_trip_of_team_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teams.json");

        let mut stats = HashMap::new();
        stats.insert(
            "LAD".to_string(),
            TeamStat {
                win_pct: 0.62,
                runs_per_game: 5.1,
                era: 3.45,
            },
        );
        save_to_json(&stats, &path).unwrap();

        let loaded: HashMap<String, TeamStat> = load_from_json(&path).unwrap();
        let lad = &loaded["LAD"];
        assert!((lad.win_pct - 0.62).abs() < 1e-12);
        assert!((lad.era - 3.45).abs() < 1e-12);
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = load_from_json::<Vec<Game>>("/nonexistent/games.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read JSON file"));
    }
}
