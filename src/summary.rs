//! # summary
//!
//! Builds a one-screen Part Summary for a NIIN out of the NSN and MOE_RULE
//! tables.

use crate::client::{Payload, RecordSource};
use crate::error::QueryError;
use crate::services::{first_pica, OwnershipRecord, Record, SERVICE_CODE_MAP};
use crate::table::Table;

use serde_json::Value;

/// Fields shown in the summary. Empty strings mean the API had no value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartDetails {
    /// Never populated: neither table carries a part number.
    pub part_number:          String,
    pub nsn:                  String,
    pub fsc:                  String,
    pub niin:                 String,
    pub description:          String,
    pub managing_service:     String,
    pub end_item_application: String,
}

impl PartDetails {
    fn new(niin: &str) -> Self {
        Self { niin: niin.to_string(), ..Self::default() }
    }

    /// Fills item fields from the first NSN record.
    fn apply_nsn(&mut self, records: &[Record]) {
        let Some(first) = records.first() else {
            return;
        };
        let field = |key: &str| first.get(key).and_then(Value::as_str).unwrap_or("").to_string();

        self.fsc = field("FSC");
        self.description = field("ITEM_NAME");
        self.end_item_application = field("END_ITEM_NAME");

        if !self.fsc.is_empty() && !self.niin.is_empty() {
            self.nsn = format!("{}-{}", self.fsc, self.niin);
        }
    }

    /// Sets the managing service from the first PICA found.
    fn apply_moe(&mut self, records: &[Record]) {
        let records: Vec<OwnershipRecord> = records.iter().map(OwnershipRecord::from_record).collect();
        if let Some(pica) = first_pica(&records) {
            self.managing_service = SERVICE_CODE_MAP.resolve(pica).to_string();
        }
    }
}

/// Outcome of a Part Summary request.
///
/// `details` is `None` when nothing could be queried at all.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartSummary {
    pub details: Option<PartDetails>,
    pub errors:  Vec<String>,
}

/// Queries NSN and MOE_RULE for niin and merges what comes back.
///
/// A failure on one table is recorded and does not stop the other. A body
/// that is not JSON counts as a failure.
pub fn part_summary(source: &impl RecordSource, niin: &str) -> PartSummary {
    let mut details = PartDetails::new(niin);
    let mut errors = Vec::new();

    let nsn = match source.query(Table::Nsn, niin) {
        Err(QueryError::MissingApiKey) => {
            return PartSummary {
                details: None,
                errors: vec![QueryError::MissingApiKey.to_string()],
            };
        }
        other => table_records(other),
    };
    match nsn {
        Ok(records) => details.apply_nsn(&records),
        Err(e) => errors.push(format!("Error fetching NSN data: {}", e)),
    }

    match table_records(source.query(Table::MoeRule, niin)) {
        Ok(records) => details.apply_moe(&records),
        Err(e) => errors.push(format!("Error fetching MOE data: {}", e)),
    }

    PartSummary { details: Some(details), errors }
}

/// Records of a successful JSON answer, or the reason there are none.
fn table_records(result: Result<Payload, QueryError>) -> Result<Vec<Record>, String> {
    match result {
        Ok(Payload::Text(_)) => {
            tracing::warn!("non-JSON response while building part summary");
            Err(String::from("response is not valid JSON"))
        }
        Ok(payload) => Ok(payload.records()),
        Err(e) => Err(e.to_string()),
    }
}
