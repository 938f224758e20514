//! Stratum dashboard binary.
//!
//! Initializes the database, resolves the journey state for one user, and
//! prints the dashboard summary to stdout.

use dotenvy::dotenv;
use std::env;
use stratum::config::{database, journey as journey_config};
use stratum::core::{activity, dates, habits, journey};
use stratum::errors::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Journey tuning from stratum.toml, falling back to defaults
    let config = journey_config::load_or_default()
        .inspect_err(|e| error!("Failed to load journey configuration: {e}"))?;

    // 4. Initialize database
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;
    database::create_tables(&db).await?;

    // 5. Resolve and render the dashboard
    let user_id = env::var("STRATUM_USER").unwrap_or_else(|_| "local".to_string());
    let today = dates::today_local();

    let snapshot = journey::load_snapshot(&db, &user_id).await?;
    let state = journey::resolve(&snapshot, &config, today);
    let tallies = activity::load_activity(&db, &user_id).await?;
    let grid = activity::activity_grid(&tallies, state.started_on, today);

    println!(
        "Day {} of {} | layer: {} (day {} of {})",
        state.journey_day,
        state.total_days,
        state.current_layer,
        state.day_in_layer,
        state.current_layer_days,
    );
    for layer in journey::Layer::ALL {
        let progress = state.progress.get(layer);
        println!(
            "  {:<10} {:>3}/{:<3} ({:.0}%)",
            layer.name(),
            progress.items,
            progress.max,
            progress.ratio() * 100.0,
        );
    }
    println!("Overall progress: {:.0}%", state.overall_progress * 100.0);
    println!("Active days: {} | weeks tracked: {}", tallies.len(), grid.len());

    for habit in habits::get_habits(&db, &user_id).await? {
        let stats = habits::habit_stats(&db, &user_id, habit.id, today).await?;
        println!(
            "  [{}] {} | streak {} (best {}) | {:.0}% completion",
            habit.category.name(),
            habit.name,
            stats.current_streak,
            stats.longest_streak,
            stats.completion_rate * 100.0,
        );
    }

    Ok(())
}
