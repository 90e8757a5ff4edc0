use super::{ScheduleSource, TeamStatsSource};
use crate::models::{Game, TeamId, TeamStat};
use crate::utils::data::load_from_json;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;

/// Schedule and team catalog read from local JSON files.
///
/// The schedule file holds an array of games, the stats file an object keyed by team id.
#[derive(Debug, Clone)]
pub struct JsonSlate {
    games_path: PathBuf,
    stats_path: PathBuf,
}

impl JsonSlate {
    pub fn new(games_path: impl Into<PathBuf>, stats_path: impl Into<PathBuf>) -> Self {
        Self {
            games_path: games_path.into(),
            stats_path: stats_path.into(),
        }
    }
}

impl ScheduleSource for JsonSlate {
    fn games(&self) -> Result<Vec<Game>> {
        load_from_json(&self.games_path).context("Failed to load schedule")
    }
}

impl TeamStatsSource for JsonSlate {
    fn team_stats(&self) -> Result<HashMap<TeamId, TeamStat>> {
        load_from_json(&self.stats_path).context("Failed to load team stats")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_schedule_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        let games_path = dir.path().join("games.json");
        let stats_path = dir.path().join("stats.json");
        std::fs::write(
            &games_path,
            r#"[{"home": "LAD", "away": "NYM", "spread": -1.5, "time": "10:10 PM"}]"#,
        )
        .unwrap();
        std::fs::write(
            &stats_path,
            r#"{"LAD": {"win_pct": 0.62, "runs_per_game": 5.1, "era": 3.45}}"#,
        )
        .unwrap();

        let slate = JsonSlate::new(&games_path, &stats_path);
        let games = slate.games().unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].away, "NYM");
        assert!(slate.team_stats().unwrap().contains_key("LAD"));
    }

    #[test]
    fn test_malformed_schedule_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let games_path = dir.path().join("games.json");
        std::fs::write(&games_path, "not json").unwrap();

        let slate = JsonSlate::new(&games_path, dir.path().join("missing.json"));
        assert!(slate.games().is_err());
        assert!(slate.team_stats().is_err());
    }
}
