pub mod demo;
pub mod json;

pub use demo::DemoSlate;
pub use json::JsonSlate;

use crate::models::{Game, TeamId, TeamStat};
use anyhow::Result;
use std::collections::HashMap;

/// Provides the day's ordered schedule
pub trait ScheduleSource {
    fn games(&self) -> Result<Vec<Game>>;
}

/// Provides season statistics keyed by team id
pub trait TeamStatsSource {
    fn team_stats(&self) -> Result<HashMap<TeamId, TeamStat>>;
}
