use serde::{Deserialize, Serialize};
use std::fmt;

/// Short team code, e.g. "LAD"
pub type TeamId = String;

/// Season statistics for a single team
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamStat {
    pub win_pct: f64,       // Between 0 and 1
    pub runs_per_game: f64, // Always positive
    pub era: f64,           // Earned run average, lower is better
}

/// A scheduled game with its run line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub home: TeamId,
    pub away: TeamId,
    pub spread: f64, // Negative favors the home team (e.g., -1.5)
    pub time: String,
}

impl Game {
    pub fn new(home: &str, away: &str, spread: f64, time: &str) -> Self {
        Self {
            home: home.to_string(),
            away: away.to_string(),
            spread,
            time: time.to_string(),
        }
    }

    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away, self.home)
    }
}

/// Number of features the scoring engine consumes
pub const FEATURE_COUNT: usize = 8;

/// One synthetic labeled example used to train the scoring engine.
///
/// Feature order: home win pct, away win pct, home runs per game, away runs per
/// game, home ERA, away ERA, home field advantage, recent form difference.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    pub features: [f64; FEATURE_COUNT],
    pub label: bool, // true = covered the spread
}

/// Which side the run line favors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Favorite {
    Home(TeamId),
    Away(TeamId),
    PickEm,
}

impl Favorite {
    pub fn from_game(game: &Game) -> Self {
        if game.spread < 0.0 {
            Favorite::Home(game.home.clone())
        } else if game.spread > 0.0 {
            Favorite::Away(game.away.clone())
        } else {
            Favorite::PickEm
        }
    }

    pub fn team(&self) -> Option<&str> {
        match self {
            Favorite::Home(team) | Favorite::Away(team) => Some(team.as_str()),
            Favorite::PickEm => None,
        }
    }
}

/// Confidence tier assigned to each game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    StrongBet,
    GoodBet,
    FairBet,
    Pass,
}

impl Recommendation {
    /// Tier lower bounds are inclusive: 70 is a strong bet, 60 a good bet, 55 a fair bet
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 70.0 {
            Recommendation::StrongBet
        } else if confidence >= 60.0 {
            Recommendation::GoodBet
        } else if confidence >= 55.0 {
            Recommendation::FairBet
        } else {
            Recommendation::Pass
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StrongBet => "STRONG BET",
            Recommendation::GoodBet => "GOOD BET",
            Recommendation::FairBet => "FAIR BET",
            Recommendation::Pass => "PASS",
        }
    }

    /// CSS class used to color-code the recommendation card
    pub fn card_class(&self) -> &'static str {
        match self {
            Recommendation::StrongBet => "strong-bet",
            Recommendation::GoodBet => "good-bet",
            Recommendation::FairBet => "fair-bet",
            Recommendation::Pass => "pass-bet",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Betting value derived from the edge over the implied probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueRating {
    High,
    Medium,
    Low,
}

impl ValueRating {
    pub fn from_edge(edge: f64) -> Self {
        if edge > 10.0 {
            ValueRating::High
        } else if edge > 5.0 {
            ValueRating::Medium
        } else {
            ValueRating::Low
        }
    }
}

impl fmt::Display for ValueRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValueRating::High => "High",
            ValueRating::Medium => "Medium",
            ValueRating::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Scored recommendation for a single game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub rank: usize, // 1-indexed display position after sorting and filtering
    pub matchup: String,
    pub home: TeamId,
    pub away: TeamId,
    pub time: String,
    pub favorite: Favorite,
    pub spread_text: String,
    pub confidence: f64,     // Ensemble probability as a percentage
    pub edge: f64,           // Confidence minus implied probability, in points
    pub expected_value: f64, // EV per unit staked at -110
    pub recommendation: Recommendation,
    pub value: ValueRating,
}

impl Prediction {
    /// Format the prediction as a readable card line
    pub fn format(&self) -> String {
        format!(
            "#{} {} | Spread: {} | Time: {} | {:.1}% {} | Edge: {:+.1}% | Value: {} | EV: {:+.2}%",
            self.rank,
            self.matchup,
            self.spread_text,
            self.time,
            self.confidence,
            self.recommendation,
            self.edge,
            self.value,
            self.expected_value * 100.0
        )
    }
}
