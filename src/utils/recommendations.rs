use crate::engine::ScoringEngine;
use crate::error::{PredictorError, PredictorResult};
use crate::models::{Favorite, Game, Prediction, Recommendation, TeamId, TeamStat, ValueRating};
use crate::utils::ev_calculator::{calculate_expected_value, edge_over_implied, STANDARD_ODDS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Anything that can turn a pair of team stats into a cover probability
pub trait CoverScorer {
    fn cover_probability(&self, home: &TeamStat, away: &TeamStat) -> PredictorResult<f64>;
}

impl CoverScorer for ScoringEngine {
    fn cover_probability(&self, home: &TeamStat, away: &TeamStat) -> PredictorResult<f64> {
        self.predict(home, away)
    }
}

/// Spread numbers keep a trailing ".0" so "-2.0" never renders as "-2"
fn format_spread(spread: f64) -> String {
    format!("{:?}", spread)
}

/// Run line text from the favorite's point of view, e.g. "LAD -1.5"
pub fn spread_text(game: &Game, favorite: &Favorite) -> String {
    match favorite {
        Favorite::Home(team) => format!("{} {}", team, format_spread(game.spread)),
        Favorite::Away(team) => format!("{} {}", team, format_spread(-game.spread)),
        Favorite::PickEm => "PK".to_string(),
    }
}

fn lookup<'a>(stats: &'a HashMap<TeamId, TeamStat>, team: &str) -> PredictorResult<&'a TeamStat> {
    stats
        .get(team)
        .ok_or_else(|| PredictorError::UnknownTeam(team.to_string()))
}

/// Build the prediction for one game from an already computed confidence
pub fn prediction_for(game: &Game, confidence: f64) -> Prediction {
    let favorite = Favorite::from_game(game);
    let edge = edge_over_implied(confidence);

    Prediction {
        rank: 0,
        matchup: game.matchup(),
        home: game.home.clone(),
        away: game.away.clone(),
        time: game.time.clone(),
        spread_text: spread_text(game, &favorite),
        favorite,
        confidence,
        edge,
        expected_value: calculate_expected_value(confidence / 100.0, STANDARD_ODDS),
        recommendation: Recommendation::from_confidence(confidence),
        value: ValueRating::from_edge(edge),
    }
}

/// Score every game in schedule order. Any unknown team fails the whole batch.
pub fn score_games<S: CoverScorer + ?Sized>(
    scorer: &S,
    games: &[Game],
    stats: &HashMap<TeamId, TeamStat>,
) -> PredictorResult<Vec<Prediction>> {
    let mut predictions = Vec::with_capacity(games.len());

    for game in games {
        let home = lookup(stats, &game.home)?;
        let away = lookup(stats, &game.away)?;

        let confidence = (scorer.cover_probability(home, away)? * 100.0).clamp(0.0, 100.0);
        debug!("{} scored {:.1}%", game.matchup(), confidence);
        predictions.push(prediction_for(game, confidence));
    }

    Ok(predictions)
}

fn assign_ranks(predictions: &mut [Prediction]) {
    for (i, prediction) in predictions.iter_mut().enumerate() {
        prediction.rank = i + 1;
    }
}

/// Stable sort by confidence (descending), keep entries at or above the threshold, assign ranks
pub fn rank_predictions(mut predictions: Vec<Prediction>, threshold: Option<f64>) -> Vec<Prediction> {
    predictions.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    match threshold {
        Some(min_confidence) => filter_ranked(predictions, min_confidence),
        None => {
            assign_ranks(&mut predictions);
            predictions
        }
    }
}

/// Drop entries below `min_confidence` from an already sorted list and renumber the rest
pub fn filter_ranked(mut ranked: Vec<Prediction>, min_confidence: f64) -> Vec<Prediction> {
    ranked.retain(|p| p.confidence >= min_confidence);
    assign_ranks(&mut ranked);
    ranked
}

/// Score, sort and optionally filter today's games
pub fn build_recommendations<S: CoverScorer + ?Sized>(
    scorer: &S,
    games: &[Game],
    stats: &HashMap<TeamId, TeamStat>,
    threshold: Option<f64>,
) -> PredictorResult<Vec<Prediction>> {
    let scored = score_games(scorer, games, stats)?;
    let total = scored.len();
    let ranked = rank_predictions(scored, threshold);
    info!("Built {} recommendations from {} games", ranked.len(), total);
    Ok(ranked)
}

/// Headline numbers shown above the recommendation cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_games: usize,
    pub strong_bets: usize,
    pub avg_confidence: f64,
}

impl DashboardSummary {
    pub fn from_predictions(predictions: &[Prediction]) -> Self {
        let total_games = predictions.len();
        let strong_bets = predictions
            .iter()
            .filter(|p| p.recommendation == Recommendation::StrongBet)
            .count();
        let avg_confidence = if total_games == 0 {
            0.0
        } else {
            predictions.iter().map(|p| p.confidence).sum::<f64>() / total_games as f64
        };

        Self {
            total_games,
            strong_bets,
            avg_confidence,
        }
    }

    /// Count of predictions in each tier, strongest first
    pub fn tier_counts(predictions: &[Prediction]) -> Vec<(Recommendation, usize)> {
        [
            Recommendation::StrongBet,
            Recommendation::GoodBet,
            Recommendation::FairBet,
            Recommendation::Pass,
        ]
        .into_iter()
        .map(|tier| {
            let count = predictions.iter().filter(|p| p.recommendation == tier).count();
            (tier, count)
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Scores each game by the home team's win percentage
    struct HomeWinPct;

    impl CoverScorer for HomeWinPct {
        fn cover_probability(&self, home: &TeamStat, _away: &TeamStat) -> PredictorResult<f64> {
            Ok(home.win_pct)
        }
    }

    fn stat(win_pct: f64) -> TeamStat {
        TeamStat {
            win_pct,
            runs_per_game: 4.5,
            era: 4.0,
        }
    }

    fn stats() -> HashMap<TeamId, TeamStat> {
        [
            ("LAD", 0.72),
            ("NYM", 0.55),
            ("TOR", 0.65),
            ("PHI", 0.58),
            ("PIT", 0.65),
            ("HOU", 0.61),
            ("SF", 0.50),
            ("SD", 0.49),
        ]
        .into_iter()
        .map(|(team, pct)| (team.to_string(), stat(pct)))
        .collect()
    }

    fn games() -> Vec<Game> {
        vec![
            Game::new("SF", "SD", -1.5, "10:15 PM"),
            Game::new("TOR", "PHI", 1.5, "7:07 PM"),
            Game::new("LAD", "NYM", -1.5, "10:10 PM"),
            Game::new("PIT", "HOU", 1.5, "7:05 PM"),
        ]
    }

    #[test]
    fn test_spread_text_concrete_cases() {
        let lad = Game::new("LAD", "NYM", -1.5, "10:10 PM");
        let fav = Favorite::from_game(&lad);
        assert_eq!(fav.team(), Some("LAD"));
        assert_eq!(spread_text(&lad, &fav), "LAD -1.5");

        let tor = Game::new("TOR", "PHI", 1.5, "7:07 PM");
        let fav = Favorite::from_game(&tor);
        assert_eq!(fav.team(), Some("PHI"));
        assert_eq!(spread_text(&tor, &fav), "PHI -1.5");

        let whole = Game::new("ATL", "WSH", -2.0, "7:20 PM");
        assert_eq!(spread_text(&whole, &Favorite::from_game(&whole)), "ATL -2.0");

        let pick = Game::new("SF", "SD", 0.0, "10:15 PM");
        assert_eq!(spread_text(&pick, &Favorite::from_game(&pick)), "PK");
    }

    #[test]
    fn test_edge_and_value_for_65() {
        let p = prediction_for(&Game::new("LAD", "NYM", -1.5, "10:10 PM"), 65.0);
        assert_relative_eq!(p.edge, 12.6, epsilon = 1e-9);
        assert_eq!(p.value, ValueRating::High);
        assert_eq!(p.recommendation, Recommendation::GoodBet);
        assert_eq!(p.matchup, "NYM @ LAD");
        assert!(p.expected_value > 0.0);
    }

    #[test]
    fn test_sorted_descending_and_stable() {
        let recs = build_recommendations(&HomeWinPct, &games(), &stats(), None).unwrap();
        let order: Vec<&str> = recs.iter().map(|p| p.home.as_str()).collect();
        // TOR and PIT tie at 65%; TOR comes first in the schedule
        assert_eq!(order, vec!["LAD", "TOR", "PIT", "SF"]);
        let ranks: Vec<usize> = recs.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_threshold_filter() {
        let all = build_recommendations(&HomeWinPct, &games(), &stats(), None).unwrap();
        assert_eq!(all.len(), games().len());

        let filtered = build_recommendations(&HomeWinPct, &games(), &stats(), Some(60.0)).unwrap();
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(|p| p.confidence >= 60.0));

        // The bound is inclusive
        let at_bound = build_recommendations(&HomeWinPct, &games(), &stats(), Some(65.0)).unwrap();
        assert_eq!(at_bound.len(), 3);
        assert_eq!(at_bound.last().map(|p| p.rank), Some(3));
    }

    #[test]
    fn test_filter_ranked_keeps_order_and_renumbers() {
        let all = build_recommendations(&HomeWinPct, &games(), &stats(), None).unwrap();
        let expected: Vec<String> = all
            .iter()
            .filter(|p| p.confidence >= 65.0)
            .map(|p| p.home.clone())
            .collect();

        let filtered = filter_ranked(all, 65.0);
        let homes: Vec<String> = filtered.iter().map(|p| p.home.clone()).collect();
        assert_eq!(homes, expected);
        let ranks: Vec<usize> = filtered.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, (1..=filtered.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_unknown_team_fails_batch() {
        let mut schedule = games();
        schedule.push(Game::new("ZZZ", "SD", -1.5, "9:00 PM"));
        let err = build_recommendations(&HomeWinPct, &schedule, &stats(), None).unwrap_err();
        assert!(matches!(err, PredictorError::UnknownTeam(ref team) if team == "ZZZ"));
    }

    #[test]
    fn test_untrained_engine_is_reported() {
        let engine = ScoringEngine::new(Default::default());
        let err = build_recommendations(&engine, &games(), &stats(), None).unwrap_err();
        assert!(matches!(err, PredictorError::ModelNotTrained));
    }

    #[test]
    fn test_summary_metrics() {
        let recs = build_recommendations(&HomeWinPct, &games(), &stats(), None).unwrap();
        let summary = DashboardSummary::from_predictions(&recs);
        assert_eq!(summary.total_games, 4);
        assert_eq!(summary.strong_bets, 1);
        assert_relative_eq!(summary.avg_confidence, (72.0 + 65.0 + 65.0 + 50.0) / 4.0, epsilon = 1e-9);

        let counts = DashboardSummary::tier_counts(&recs);
        assert_eq!(counts[0], (Recommendation::StrongBet, 1));
        assert_eq!(counts[1], (Recommendation::GoodBet, 2));
        assert_eq!(counts[3], (Recommendation::Pass, 1));

        let empty = DashboardSummary::from_predictions(&[]);
        assert_eq!(empty.avg_confidence, 0.0);
    }
}
