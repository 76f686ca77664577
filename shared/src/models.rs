//! Shared data models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::BooleanLabels;
use crate::format::{format_bool, parse_date_time, render_date_time};
use crate::{Error, Result};

/// Which form was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Food,
    Wc,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Food => "FOOD",
            Action::Wc => "WC",
        }
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "FOOD" => Ok(Action::Food),
            "WC" => Ok(Action::Wc),
            other => Err(Error::InvalidAction(other.to_string())),
        }
    }
}

/// Raw fields of a home page form post.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionForm {
    #[serde(rename = "_action")]
    pub action: Option<String>,
    pub start_date_time: Option<String>,
    pub end_date_time: Option<String>,
    pub has_peed: Option<String>,
    pub has_pooped: Option<String>,
}

/// A feeding session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedingEntry {
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
}

/// A diaper change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaperEntry {
    pub start: NaiveDateTime,
    pub peed: bool,
    pub pooped: bool,
}

/// One logged event, destined to become one spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventRecord {
    Feeding(FeedingEntry),
    Diaper(DiaperEntry),
}

impl EventRecord {
    /// Cells in sheet column order.
    pub fn to_row(&self, labels: &BooleanLabels) -> Vec<String> {
        match self {
            EventRecord::Feeding(entry) => vec![
                render_date_time(&entry.start),
                entry.end.as_ref().map(render_date_time).unwrap_or_default(),
            ],
            EventRecord::Diaper(entry) => vec![
                render_date_time(&entry.start),
                format_bool(entry.peed, labels),
                format_bool(entry.pooped, labels),
            ],
        }
    }
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str> {
    value.as_deref().ok_or(Error::MissingField(name))
}

impl TryFrom<&SubmissionForm> for EventRecord {
    type Error = Error;

    fn try_from(form: &SubmissionForm) -> Result<Self> {
        let action: Action = required(&form.action, "_action")?.parse()?;

        match action {
            Action::Food => {
                let start = parse_date_time(required(&form.start_date_time, "startDateTime")?)?;
                let end = match form.end_date_time.as_deref() {
                    Some(value) if !value.is_empty() => Some(parse_date_time(value)?),
                    _ => None,
                };
                Ok(EventRecord::Feeding(FeedingEntry { start, end }))
            }
            Action::Wc => {
                let peed = required(&form.has_peed, "hasPeed")? == "true";
                let pooped = required(&form.has_pooped, "hasPooped")? == "true";
                let start = parse_date_time(required(&form.start_date_time, "startDateTime")?)?;
                Ok(EventRecord::Diaper(DiaperEntry {
                    start,
                    peed,
                    pooped,
                }))
            }
        }
    }
}

/// Body returned to script-driven form posts on success.
#[derive(Debug, Serialize)]
pub struct SubmitOk {
    pub ok: bool,
}

/// Body returned to script-driven form posts on failure.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitError {
    pub error_code: String,
}

/// Payload of `GET /api/last-feed`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastFeedResponse {
    pub last_food_time: Option<String>,
}
