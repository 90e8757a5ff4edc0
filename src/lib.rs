pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod sources;
pub mod utils;

pub use config::PredictorConfig;
pub use engine::{EngineConfig, ScoringEngine, TrainingReport};
pub use error::{PredictorError, PredictorResult};
pub use models::*;
pub use sources::{DemoSlate, JsonSlate, ScheduleSource, TeamStatsSource};
pub use utils::*;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utils::recommendations::{filter_ranked, rank_predictions, score_games, DashboardSummary};

/// All the data we want to display on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub generated_at: DateTime<Utc>,
    pub summary: DashboardSummary, // Over every game, before filtering
    pub predictions: Vec<Prediction>,
    pub training: TrainingReport,
    pub threshold: Option<f64>,
}

/// Train the ensemble and score the schedule from the given sources
pub fn build_dashboard_from<S>(config: &PredictorConfig, source: &S) -> Result<DashboardData>
where
    S: ScheduleSource + TeamStatsSource + ?Sized,
{
    config.validate()?;

    let games = source.games().context("Failed to load schedule")?;
    let stats = source.team_stats().context("Failed to load team statistics")?;
    info!("Loaded {} games and {} teams", games.len(), stats.len());

    let mut engine = ScoringEngine::new(config.engine_config());
    let training = engine.train().context("Failed to train prediction models")?;

    let scored = score_games(&engine, &games, &stats).context("Failed to score games")?;
    let all = rank_predictions(scored, None);
    let summary = DashboardSummary::from_predictions(&all);

    let threshold = config.threshold();
    let predictions = match threshold {
        Some(min_confidence) => filter_ranked(all, min_confidence),
        None => all,
    };

    Ok(DashboardData {
        generated_at: Utc::now(),
        summary,
        predictions,
        training,
        threshold,
    })
}

/// Build the dashboard from JSON files when configured, otherwise from the built-in slate
pub fn build_dashboard(config: &PredictorConfig) -> Result<DashboardData> {
    match (&config.games_file, &config.stats_file) {
        (Some(games), Some(stats)) => build_dashboard_from(config, &JsonSlate::new(games, stats)),
        _ => build_dashboard_from(config, &DemoSlate::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn quick_config() -> PredictorConfig {
        PredictorConfig {
            samples: 300,
            trees: 20,
            ..PredictorConfig::default()
        }
    }

    #[test]
    fn test_dashboard_covers_every_game() {
        let dashboard = build_dashboard(&quick_config()).unwrap();
        assert_eq!(dashboard.predictions.len(), 12);
        assert_eq!(dashboard.summary.total_games, 12);
        assert!(dashboard.threshold.is_none());

        for pair in dashboard.predictions.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        for (i, p) in dashboard.predictions.iter().enumerate() {
            assert_eq!(p.rank, i + 1);
            assert!((0.0..=100.0).contains(&p.confidence));
            assert_eq!(p.recommendation, Recommendation::from_confidence(p.confidence));
        }
    }

    #[test]
    fn test_dashboard_is_deterministic() {
        let a = build_dashboard(&quick_config()).unwrap();
        let b = build_dashboard(&quick_config()).unwrap();
        let conf = |d: &DashboardData| d.predictions.iter().map(|p| p.confidence).collect::<Vec<_>>();
        assert_eq!(conf(&a), conf(&b));
        assert_eq!(a.training, b.training);
    }

    #[test]
    fn test_filtered_dashboard_keeps_unfiltered_summary() {
        let config = PredictorConfig {
            show_all: false,
            min_confidence: 60.0,
            ..quick_config()
        };
        let dashboard = build_dashboard(&config).unwrap();
        assert_eq!(dashboard.summary.total_games, 12);
        assert!(dashboard.predictions.iter().all(|p| p.confidence >= 60.0));
        assert_eq!(dashboard.threshold, Some(60.0));
    }

    struct BrokenSlate;

    impl ScheduleSource for BrokenSlate {
        fn games(&self) -> Result<Vec<Game>> {
            Ok(vec![Game::new("ZZZ", "NYM", -1.5, "7:05 PM")])
        }
    }

    impl TeamStatsSource for BrokenSlate {
        fn team_stats(&self) -> Result<HashMap<TeamId, TeamStat>> {
            DemoSlate.team_stats()
        }
    }

    #[test]
    fn test_unknown_team_surfaces_through_dashboard() {
        let err = build_dashboard_from(&quick_config(), &BrokenSlate).unwrap_err();
        let root = err.downcast_ref::<PredictorError>();
        assert!(matches!(root, Some(PredictorError::UnknownTeam(team)) if team == "ZZZ"));
    }
}
