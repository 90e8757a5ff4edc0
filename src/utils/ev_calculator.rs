/// Standard price on both sides of a run line
pub const STANDARD_ODDS: i32 = -110;

/// Convert American odds to implied probability
/// Positive odds (+150) mean you win $150 on a $100 bet
/// Negative odds (-150) mean you need to bet $150 to win $100
pub fn american_odds_to_probability(odds: i32) -> f64 {
    if odds > 0 {
        // For positive odds: 100 / (odds + 100)
        100.0 / (odds as f64 + 100.0)
    } else {
        // For negative odds: |odds| / (|odds| + 100)
        let abs_odds = odds.abs() as f64;
        abs_odds / (abs_odds + 100.0)
    }
}

/// Calculate expected value for a bet
/// EV = (probability of winning * amount won per bet) - (probability of losing * amount lost per bet)
/// Returns EV as a fraction of the bet amount
pub fn calculate_expected_value(model_prob: f64, odds: i32) -> f64 {
    let win_amount = if odds > 0 {
        odds as f64 / 100.0
    } else {
        100.0 / odds.abs() as f64
    };

    let lose_amount = 1.0; // You lose your bet amount
    let prob_lose = 1.0 - model_prob;

    (model_prob * win_amount) - (prob_lose * lose_amount)
}

/// Implied probability of American odds as a percentage rounded to one decimal
pub fn implied_percentage(odds: i32) -> f64 {
    (american_odds_to_probability(odds) * 1000.0).round() / 10.0
}

/// Edge in percentage points of a confidence over the -110 break-even
pub fn edge_over_implied(confidence: f64) -> f64 {
    confidence - implied_percentage(STANDARD_ODDS)
}
