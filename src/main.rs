use donor_ledger::{
    config::{campaigns, database, settings},
    core::{Ledger, campaign, report, store::SqliteBlobStore},
    errors::Result,
};
use dotenvy::dotenv;
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

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();

    // 3. Load the campaign seed
    let config_path = settings::config_path();
    let seed = campaigns::load_seed_or_default(&config_path)
        .inspect(|s| info!("Loaded {} campaigns from seed.", s.campaigns.len()))
        .inspect_err(|e| error!("Failed to load campaign seed: {}", e))?;

    // 4. Initialize database
    let db = database::init_database()
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Rehydrate the ledger
    let ledger = Ledger::open(SqliteBlobStore::new(db), seed).await?;

    for c in ledger.campaigns() {
        info!(
            "{:>2} {:<42} {}",
            c.id,
            c.title,
            report::format_progress_bar(campaign::progress_percent(c), None)
        );
    }
    info!(
        "Total raised: {:.2} | donations: {} | cart: {} items ({:.2})",
        ledger.total_raised(),
        ledger.total_donors(),
        ledger.cart().len(),
        ledger.cart_total()
    );

    Ok(())
}
