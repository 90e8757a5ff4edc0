use super::{ScheduleSource, TeamStatsSource};
use crate::models::{Game, TeamId, TeamStat};
use anyhow::Result;
use std::collections::HashMap;

/// Today's slate: (home, away, run line, first pitch)
const GAMES: [(&str, &str, f64, &str); 12] = [
    ("LAD", "NYM", -1.5, "10:10 PM"),
    ("TOR", "PHI", 1.5, "7:07 PM"),
    ("PIT", "HOU", 1.5, "7:05 PM"),
    ("SF", "SD", -1.5, "10:15 PM"),
    ("STL", "KC", -1.5, "8:15 PM"),
    ("NYY", "BOS", -1.5, "7:05 PM"),
    ("CHC", "MIL", 1.5, "8:05 PM"),
    ("TEX", "SEA", -1.5, "8:05 PM"),
    ("ATL", "WSH", -1.5, "7:20 PM"),
    ("CLE", "DET", -1.5, "7:10 PM"),
    ("OAK", "MIN", 1.5, "10:07 PM"),
    ("TB", "BAL", 1.5, "7:10 PM"),
];

/// (team, win pct, runs per game, ERA)
const TEAMS: [(&str, f64, f64, f64); 24] = [
    ("LAD", 0.62, 5.1, 3.45),
    ("NYM", 0.55, 4.8, 3.89),
    ("TOR", 0.48, 4.6, 4.12),
    ("PHI", 0.58, 5.0, 3.76),
    ("PIT", 0.45, 4.2, 4.34),
    ("HOU", 0.61, 5.2, 3.67),
    ("SF", 0.52, 4.7, 3.98),
    ("SD", 0.49, 4.5, 4.05),
    ("STL", 0.53, 4.8, 4.01),
    ("KC", 0.47, 4.4, 4.18),
    ("NYY", 0.59, 5.3, 3.55),
    ("BOS", 0.51, 4.9, 4.08),
    ("CHC", 0.46, 4.3, 4.25),
    ("MIL", 0.54, 4.9, 3.82),
    ("TEX", 0.56, 5.0, 3.94),
    ("SEA", 0.50, 4.6, 4.15),
    ("ATL", 0.60, 5.1, 3.59),
    ("WSH", 0.44, 4.1, 4.41),
    ("CLE", 0.57, 4.8, 3.71),
    ("DET", 0.43, 4.0, 4.52),
    ("OAK", 0.41, 3.9, 4.68),
    ("MIN", 0.49, 4.5, 4.21),
    ("TB", 0.52, 4.7, 3.91),
    ("BAL", 0.54, 4.8, 3.85),
];

/// Built-in MLB slate and team catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoSlate;

impl DemoSlate {
    pub fn new() -> Self {
        Self
    }
}

impl ScheduleSource for DemoSlate {
    fn games(&self) -> Result<Vec<Game>> {
        Ok(GAMES
            .iter()
            .map(|&(home, away, spread, time)| Game::new(home, away, spread, time))
            .collect())
    }
}

impl TeamStatsSource for DemoSlate {
    fn team_stats(&self) -> Result<HashMap<TeamId, TeamStat>> {
        Ok(TEAMS
            .iter()
            .map(|&(team, win_pct, runs_per_game, era)| {
                (
                    team.to_string(),
                    TeamStat {
                        win_pct,
                        runs_per_game,
                        era,
                    },
                )
            })
            .collect())
    }
}
