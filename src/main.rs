use anyhow::Result;
use chrono::{Datelike, NaiveTime, Utc};

use albapay::database::init_database;
use albapay::scheduler::{Schedule, Scheduler};
use albapay::services::JsonHolidaySource;
use albapay::{AppState, Config, PayrollPolicy};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    println!("Starting albapay worker...");

    let config = Config::from_env()?;
    println!("Configuration loaded (environment: {})", config.environment);

    let pool = init_database(&config.database_url).await?;
    println!("Database initialized");

    let state = AppState::new(pool, PayrollPolicy::default());

    // Best-effort calendar refresh on boot; a broken data file leaves the
    // stored years untouched and the engine keeps running on them.
    let source = JsonHolidaySource::new(&config.holiday_data_path);
    let this_year = Utc::now().year();
    for year in [this_year, this_year + 1] {
        if let Err(e) = state.holidays.refresh_year(&source, year).await {
            log::warn!("Holiday refresh for {} skipped: {}", year, e);
        }
    }

    let midnight = NaiveTime::MIN;
    let mut scheduler = Scheduler::new();

    let generator = state.generator.clone();
    scheduler.register("shift-horizon", Schedule::Monthly { day: 15, at: midnight }, move || {
        let generator = generator.clone();
        Box::pin(async move {
            let outcome = generator.extend_horizon(Utc::now().date_naive()).await?;
            Ok(format!(
                "{}-{:02}: {} created, {} skipped, {} failed",
                outcome.target_year,
                outcome.target_month,
                outcome.created,
                outcome.skipped,
                outcome.failed
            ))
        })
    });

    let payments = state.payments.clone();
    scheduler.register("payment-expiry", Schedule::Daily { at: midnight }, move || {
        let payments = payments.clone();
        Box::pin(async move {
            let outcome = payments.expire_overdue(Utc::now().date_naive()).await?;
            Ok(format!(
                "{} scanned, {} expired, {} errors",
                outcome.scanned, outcome.expired, outcome.errors
            ))
        })
    });

    let tokens = state.tokens.clone();
    scheduler.register("token-purge", Schedule::Daily { at: midnight }, move || {
        let tokens = tokens.clone();
        Box::pin(async move {
            let purged = tokens.purge_expired(Utc::now()).await?;
            Ok(format!("{} expired tokens purged", purged))
        })
    });

    let handles = scheduler.spawn();
    println!("Scheduler running ({} jobs)", handles.len());

    tokio::signal::ctrl_c().await?;
    println!("Shutting down");
    for handle in handles {
        handle.abort();
    }

    Ok(())
}
