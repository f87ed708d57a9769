use rapidftr_enquiry::config::{LogFormat, Settings};
use rapidftr_enquiry::services::SqliteClient;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match settings.logging.log_format() {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Full => subscriber.init(),
    }

    info!("Starting enquiry audit...");

    let client = match SqliteClient::from_settings(&settings.database).await {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to open database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let enquiries = client.enquiries();
    let children = client.children();

    let all = match enquiries.all().await {
        Ok(all) => all,
        Err(e) => {
            error!("Failed to load enquiries: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut invalid = 0usize;
    let mut unsynced = 0usize;
    for enquiry in &all {
        let unique_id = enquiry.unique_id().unwrap_or("<none>");
        if !enquiry.is_valid() {
            invalid += 1;
            warn!("Enquiry {} has no enquirer name", unique_id);
        }
        if !enquiry.is_synced() {
            unsynced += 1;
        }

        match enquiry.potential_matches(&children).await {
            Ok(matches) => info!(
                "Enquiry {} ({}): {} potential matches",
                unique_id,
                enquiry.enquirer_name().unwrap_or_default(),
                matches.len()
            ),
            Err(e) => error!("Failed to resolve matches for enquiry {}: {}", unique_id, e),
        }
    }

    info!(
        "Audited {} enquiries: {} invalid, {} awaiting sync",
        all.len(),
        invalid,
        unsynced
    );

    ExitCode::SUCCESS
}
