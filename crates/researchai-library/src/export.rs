//! Snapshot of the reference list offered as a file download.
//! Producing it never mutates the library.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use researchai_common::error::Result;
use researchai_common::Reference;

pub const EXPORT_FILENAME: &str = "research-references.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub references: Vec<Reference>,
    /// ISO-8601 / RFC 3339, UTC.
    pub export_date: String,
    pub total_count: usize,
}

impl ExportPayload {
    pub fn new(references: Vec<Reference>, now: DateTime<Utc>) -> Self {
        let total_count = references.len();
        Self {
            references,
            export_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            total_count,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
