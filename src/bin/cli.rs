use anyhow::Result;
use chrono::Local;
use clap::Parser;
use mlb_spread_predictor::data::{save_predictions_to_csv, save_to_json};
use mlb_spread_predictor::recommendations::DashboardSummary;
use mlb_spread_predictor::{build_dashboard, PredictorConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PredictorConfig::parse();

    println!("MLB Spread Predictor\n");
    println!("Training prediction models...\n");

    let dashboard = build_dashboard(&config)?;
    let summary = &dashboard.summary;

    println!("Total Games: {}", summary.total_games);
    println!("Strong Bets: {}", summary.strong_bets);
    println!("Avg Confidence: {:.1}%", summary.avg_confidence);
    println!(
        "Last Updated: {}\n",
        dashboard.generated_at.with_timezone(&Local).format("%H:%M")
    );

    println!("TODAY'S PREDICTIONS\n");
    if dashboard.predictions.is_empty() {
        println!(
            "No games at or above {:.0}% confidence.",
            dashboard.threshold.unwrap_or_default()
        );
    } else {
        for prediction in &dashboard.predictions {
            println!("{}", prediction.format());
        }
    }

    println!("\nTIERS\n");
    for (tier, count) in DashboardSummary::tier_counts(&dashboard.predictions) {
        println!("{:<11} {} ({})", tier.label(), count, tier.card_class());
    }

    let (forest_accuracy, svm_accuracy) = dashboard.training.accuracies();
    println!("\nMODEL PERFORMANCE\n");
    println!("Random Forest Accuracy: {:.1}%", forest_accuracy * 100.0);
    println!("SVM Accuracy: {:.1}%", svm_accuracy * 100.0);

    if let Some(path) = &config.csv {
        save_predictions_to_csv(&dashboard.predictions, path)?;
        println!("\nSaved predictions to {}", path.display());
    }

    if let Some(path) = &config.json {
        save_to_json(&dashboard, path)?;
        println!("\nSaved dashboard to {}", path.display());
    }

    println!("\nPredictions are for entertainment purposes only. Please bet responsibly.");

    Ok(())
}
