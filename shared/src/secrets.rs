//! AWS Secrets Manager integration.

use aws_sdk_secretsmanager::Client as SecretsClient;
use tracing::info;

use crate::auth::{normalize_private_key, ServiceAccountKey};
use crate::{Config, Error, Result};

/// Get a secret's string value from Secrets Manager.
pub async fn get_secret(client: &SecretsClient, secret_arn: &str) -> Result<String> {
    let response = client
        .get_secret_value()
        .secret_id(secret_arn)
        .send()
        .await
        .map_err(|e| Error::Aws(format!("Failed to get secret: {}", e)))?;

    Ok(response
        .secret_string()
        .ok_or_else(|| Error::Aws("Secret has no string value".to_string()))?
        .to_string())
}

/// Parse a Google JSON key file.
pub fn parse_service_account(secret_string: &str) -> Result<ServiceAccountKey> {
    let mut key: ServiceAccountKey = serde_json::from_str(secret_string)
        .map_err(|e| Error::Aws(format!("Failed to parse service account key: {}", e)))?;
    key.private_key = normalize_private_key(&key.private_key);
    Ok(key)
}

/// Resolve service-account credentials: the configured secret when there is
/// one, otherwise the `GOOGLE_CLIENT_EMAIL`/`GOOGLE_PRIVATE_KEY` variables.
pub async fn load_service_account(config: &Config) -> Result<ServiceAccountKey> {
    let Some(secret_arn) = &config.service_account_secret_arn else {
        return ServiceAccountKey::from_env();
    };

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = SecretsClient::new(&aws_config);

    let key = parse_service_account(&get_secret(&client, secret_arn).await?)?;
    info!(client_email = %key.client_email, "Loaded service account from Secrets Manager");
    Ok(key)
}
