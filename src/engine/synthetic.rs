use crate::models::{TrainingExample, FEATURE_COUNT};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Default number of synthetic games generated per training pass
pub const DEFAULT_SAMPLES: usize = 1000;

/// Share of examples held out for accuracy measurement
pub const TEST_FRACTION: f64 = 0.2;

/// Draw `n` samples from Normal(mean, std_dev)
fn draw_normal(rng: &mut StdRng, n: usize, mean: f64, std_dev: f64) -> Vec<f64> {
    (0..n)
        .map(|_| {
            let z: f64 = rng.sample(StandardNormal);
            mean + std_dev * z
        })
        .collect()
}

/// Latent probability that the home side covers, before the Bernoulli draw
pub fn cover_probability(features: &[f64; FEATURE_COUNT], noise: f64) -> f64 {
    let [home_win, away_win, home_rpg, away_rpg, home_era, away_era, _, _] = *features;
    let p = 0.3
        + 0.3 * (home_win - away_win)
        + 0.1 * (away_era - home_era)
        + 0.05 * (home_rpg - away_rpg)
        + noise;
    p.clamp(0.1, 0.9)
}

/// Generate synthetic labeled games standing in for historical outcomes.
///
/// Each feature column is drawn in full before the next one so a given seed
/// always yields the same dataset.
pub fn generate_training_data(n_samples: usize, seed: u64) -> Vec<TrainingExample> {
    let mut rng = StdRng::seed_from_u64(seed);

    let home_win_pct = draw_normal(&mut rng, n_samples, 0.5, 0.15);
    let away_win_pct = draw_normal(&mut rng, n_samples, 0.5, 0.15);
    let home_runs_per_game = draw_normal(&mut rng, n_samples, 4.5, 1.0);
    let away_runs_per_game = draw_normal(&mut rng, n_samples, 4.5, 1.0);
    let home_era = draw_normal(&mut rng, n_samples, 4.0, 0.8);
    let away_era = draw_normal(&mut rng, n_samples, 4.0, 0.8);
    let home_field_advantage = draw_normal(&mut rng, n_samples, 0.0, 0.1);
    let recent_form_diff = draw_normal(&mut rng, n_samples, 0.0, 0.05);
    let noise = draw_normal(&mut rng, n_samples, 0.0, 0.1);

    (0..n_samples)
        .map(|i| {
            let features = [
                home_win_pct[i],
                away_win_pct[i],
                home_runs_per_game[i],
                away_runs_per_game[i],
                home_era[i],
                away_era[i],
                home_field_advantage[i],
                recent_form_diff[i],
            ];
            let label = rng.gen_bool(cover_probability(&features, noise[i]));
            TrainingExample { features, label }
        })
        .collect()
}

/// True when every example carries the same label
pub fn is_degenerate(examples: &[TrainingExample]) -> bool {
    match examples.first() {
        Some(first) => examples.iter().all(|e| e.label == first.label),
        None => true,
    }
}

/// Shuffle with a fixed seed and split into (train, test)
pub fn train_test_split(
    examples: &[TrainingExample],
    test_fraction: f64,
    seed: u64,
) -> (Vec<TrainingExample>, Vec<TrainingExample>) {
    let mut shuffled = examples.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let n_test = (examples.len() as f64 * test_fraction).round() as usize;
    let test = shuffled.split_off(examples.len() - n_test.min(examples.len()));
    (shuffled, test)
}
