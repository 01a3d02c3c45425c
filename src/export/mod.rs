pub mod formats;

use crate::export::formats::audit::AuditExport;
use crate::export::formats::comparison::ComparisonExport;
use crate::export::formats::fingerprint::VerificationExport;
use chrono::{DateTime, Utc};
use serde::de::{Deserializer, Error};
use serde::{Deserialize, Serialize, Serializer};

pub const RECORD_TYPE: &str = "gov.ncbi.sra.fingerprint-qc.report";
pub const EXPORT_VERSION: &str = "1.0";

/// Root structure for all JSON reports
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportExport {
    #[serde(rename = "$type")]
    pub record_type: String,

    pub version: String,
    #[serde(serialize_with = "serialize_datetime", deserialize_with = "deserialize_datetime")]
    pub created_at: DateTime<Utc>,
    pub tool_version: String,

    #[serde(flatten)]
    pub data: ReportData,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReportData {
    Verification(VerificationExport),
    Comparison(ComparisonExport),
    Audit(AuditExport),
}

impl ReportExport {
    pub fn new(data: ReportData) -> Self {
        ReportExport {
            record_type: RECORD_TYPE.to_string(),
            version: EXPORT_VERSION.to_string(),
            created_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            data,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn serialize_datetime<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.to_rfc3339())
}

fn deserialize_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(D::Error::custom)
}
