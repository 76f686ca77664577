//! Healthcheck Lambda - Handles /healthcheck.
//!
//! Probes the app's own root over its public host and answers `OK` or `ERROR`.

use lambda_http::{run, service_fn, Error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let http_client = reqwest::Client::new();

    run(service_fn(move |event| {
        let http_client = http_client.clone();
        async move { shared::health::handler(&http_client, event).await }
    }))
    .await
}
