//! Configuration management for Lambda functions.

use std::env;

use crate::{Error, Result};

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

/// What to do when a spreadsheet call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and carry on as if the call succeeded (or found nothing).
    #[default]
    BestEffort,
    /// Hand the failure back to the caller.
    Surface,
}

impl FailurePolicy {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "best-effort" | "best_effort" => Ok(FailurePolicy::BestEffort),
            "surface" => Ok(FailurePolicy::Surface),
            other => Err(Error::Config(format!(
                "SHEETS_FAILURE_POLICY must be best-effort or surface, got {}",
                other
            ))),
        }
    }
}

/// Cell labels written for boolean fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanLabels {
    pub yes: String,
    pub no: String,
}

impl Default for BooleanLabels {
    fn default() -> Self {
        Self {
            yes: "OUI".to_string(),
            no: "NON".to_string(),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Spreadsheet ID (from the spreadsheet URL)
    pub spreadsheet_id: String,
    /// Sheet receiving feeding sessions
    pub food_sheet_name: String,
    /// Sheet receiving diaper changes
    pub wc_sheet_name: String,
    /// Secrets Manager secret holding the service-account JSON key, if any
    pub service_account_secret_arn: Option<String>,
    /// OAuth token endpoint
    pub token_uri: String,
    /// Sheets API base URL
    pub sheets_api_base: String,
    pub labels: BooleanLabels,
    pub failure_policy: FailurePolicy,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Config(format!("{} not set", key)))
        };

        let defaults = BooleanLabels::default();
        let failure_policy = match lookup("SHEETS_FAILURE_POLICY") {
            Some(value) => FailurePolicy::parse(&value)?,
            None => FailurePolicy::default(),
        };

        Ok(Self {
            spreadsheet_id: required("SPREADSHEET_ID")?,
            food_sheet_name: required("FOOD_SHEET_NAME")?,
            wc_sheet_name: required("WC_SHEET_NAME")?,
            service_account_secret_arn: lookup("GOOGLE_SERVICE_ACCOUNT_SECRET_ARN"),
            token_uri: lookup("GOOGLE_TOKEN_URI").unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string()),
            sheets_api_base: lookup("SHEETS_API_BASE")
                .unwrap_or_else(|| DEFAULT_SHEETS_API_BASE.to_string()),
            labels: BooleanLabels {
                yes: lookup("YES_LABEL").unwrap_or(defaults.yes),
                no: lookup("NO_LABEL").unwrap_or(defaults.no),
            },
            failure_policy,
        })
    }
}
