//! Shared library for the baby log Lambda functions.
//!
//! Logs feeding sessions and diaper changes as rows of a Google spreadsheet.
//! This crate holds the configuration, the Sheets client, the submission
//! formatter and the route handlers; the binaries only wire them to Lambda.

pub mod auth;
pub mod config;
pub mod error;
pub mod format;
pub mod health;
pub mod home;
pub mod http;
pub mod logbook;
pub mod models;
pub mod page;
pub mod secrets;
pub mod sheets;

pub use auth::ServiceAccountKey;
pub use config::{BooleanLabels, Config, FailurePolicy};
pub use error::{Error, Result};
pub use logbook::Logbook;
pub use models::{Action, DiaperEntry, EventRecord, FeedingEntry, SubmissionForm};
pub use secrets::load_service_account;
pub use sheets::{SheetStore, SheetsClient};
