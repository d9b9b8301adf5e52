use std::collections::BTreeSet;

use serde::Serialize;
use tracing::warn;

use crate::error::ScreenError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    pub without_details: BTreeSet<String>,
    pub without_hits: BTreeSet<String>,
}

impl ConsistencyReport {
    pub fn compare(registered: &BTreeSet<String>, observed: &BTreeSet<String>) -> Self {
        Self {
            without_details: observed.difference(registered).cloned().collect(),
            without_hits: registered.difference(observed).cloned().collect(),
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.without_details.is_empty() && self.without_hits.is_empty()
    }
}

pub fn check(
    registered: &BTreeSet<String>,
    observed: &BTreeSet<String>,
) -> Result<ConsistencyReport, ScreenError> {
    let report = ConsistencyReport::compare(registered, observed);
    if !report.without_hits.is_empty() {
        warn!(
            screens = ?report.without_hits,
            "screen names from hits file and details file did not match, no hits found for screens"
        );
    }
    if !report.without_details.is_empty() {
        return Err(ScreenError::ScreenWithoutDetails(
            report.without_details.into_iter().collect(),
        ));
    }
    Ok(report)
}
