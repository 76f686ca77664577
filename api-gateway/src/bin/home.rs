//! Home Lambda - Serves the logging page and records submitted events.
//!
//! Endpoints:
//! - GET / - Logging page
//! - HEAD / - Liveness target for the healthcheck
//! - POST / - Record a feeding session or diaper change
//! - GET /api/last-feed - Last recorded feeding start time

use lambda_http::{run, service_fn, Error};
use shared::{load_service_account, Config, Logbook, SheetsClient};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across requests.
struct AppState {
    logbook: Logbook<SheetsClient>,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env()?;
        let credentials = load_service_account(&config).await?;

        info!(
            spreadsheet_id = %config.spreadsheet_id,
            client_email = %credentials.client_email,
            failure_policy = ?config.failure_policy,
            "Home Lambda configured"
        );

        let client = SheetsClient::new(reqwest::Client::new(), &config, credentials);
        Ok(Self {
            logbook: Logbook::new(client, &config),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { shared::home::handler(&state.logbook, event).await }
    }))
    .await
}
