//! Event logging on top of a [`SheetStore`].
//!
//! Chooses the destination sheet for each event type and applies the
//! configured [`FailurePolicy`] to remote failures.

use tracing::error;

use crate::config::{BooleanLabels, FailurePolicy};
use crate::models::EventRecord;
use crate::sheets::SheetStore;
use crate::{Config, Result};

/// Column holding feeding start times.
const FEED_TIME_COLUMN: &str = "A";

pub struct Logbook<S> {
    store: S,
    food_sheet_name: String,
    wc_sheet_name: String,
    labels: BooleanLabels,
    policy: FailurePolicy,
}

impl<S: SheetStore> Logbook<S> {
    pub fn new(store: S, config: &Config) -> Self {
        Self {
            store,
            food_sheet_name: config.food_sheet_name.clone(),
            wc_sheet_name: config.wc_sheet_name.clone(),
            labels: config.labels.clone(),
            policy: config.failure_policy,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn sheet_for(&self, record: &EventRecord) -> &str {
        match record {
            EventRecord::Feeding(_) => &self.food_sheet_name,
            EventRecord::Diaper(_) => &self.wc_sheet_name,
        }
    }

    /// Append `record` to its sheet.
    pub async fn record(&self, record: &EventRecord) -> Result<()> {
        let sheet = self.sheet_for(record);
        match self.store.append_row(sheet, record.to_row(&self.labels)).await {
            Ok(()) => Ok(()),
            Err(e) if self.policy == FailurePolicy::BestEffort => {
                error!(sheet = %sheet, error = %e, "Error appending row");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Most recent feeding start time, as written in the sheet.
    pub async fn last_feed_time(&self) -> Result<Option<String>> {
        match self
            .store
            .last_filled_cell(&self.food_sheet_name, FEED_TIME_COLUMN)
            .await
        {
            Ok(value) => Ok(value),
            Err(e) if self.policy == FailurePolicy::BestEffort => {
                error!(sheet = %self.food_sheet_name, error = %e, "Error getting last cell value");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
