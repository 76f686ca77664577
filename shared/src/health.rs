//! Healthcheck: confirm the app answers on its own public host.

use lambda_http::{Body, Request, Response};
use tracing::{info, warn};

use crate::http::text_response;
use crate::{Error, Result};

/// Host the request was addressed to, preferring the proxy's view.
pub fn request_host(event: &Request) -> Option<String> {
    let headers = event.headers();
    headers
        .get("x-forwarded-host")
        .or_else(|| headers.get("host"))
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// `HEAD http://{host}/`, succeeding only on a 2xx answer.
pub async fn probe_root(http_client: &reqwest::Client, host: &str) -> Result<()> {
    let url = format!("http://{}/", host);
    let response = http_client
        .head(&url)
        .header("X-Healthcheck", "true")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(Error::Unhealthy(format!("{} answered {}", url, response.status())));
    }
    Ok(())
}

pub async fn handler(
    http_client: &reqwest::Client,
    event: Request,
) -> std::result::Result<Response<Body>, lambda_http::Error> {
    let outcome = match request_host(&event) {
        Some(host) => probe_root(http_client, &host).await,
        None => Err(Error::Unhealthy("request has no host header".to_string())),
    };

    match outcome {
        Ok(()) => {
            info!("healthcheck ok");
            text_response(200, "OK")
        }
        Err(e) => {
            warn!(error = %e, "healthcheck failed");
            text_response(500, "ERROR")
        }
    }
}
