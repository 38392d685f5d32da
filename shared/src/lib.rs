use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub mod api;
pub mod charts;
pub mod config;
pub mod controller;
pub mod date_range;
pub mod series;

pub use api::{HttpGet, RequestError, UsageClient};
pub use charts::{BalanceHeadline, ChartModel, ChartOptionsPatch, ChartSink, DashboardCharts};
pub use config::DashboardConfig;
pub use controller::{
    DashboardController, FilterSelection, LoadError, LoadOutcome, LoadState, ValidationError,
};
pub use date_range::{DateRange, DateRangeError};
pub use series::{ChartPoint, ChartSeries, SeriesKind};

/// Identifier of a resident (utility account).
///
/// The API hands these out as integers, but the dashboard only ever echoes
/// them back into URLs and selector values, so they are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResidentId(String);

impl ResidentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build an id from raw selector input; blank input means "nothing selected"
    pub fn from_selection(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }
}

impl fmt::Display for ResidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResidentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => ResidentId(text),
            RawId::Number(number) => ResidentId(number.to_string()),
        })
    }
}

/// A resident as listed by `/api/v1.0/residents`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    pub resident_id: ResidentId,
    /// Postal address of the unit; not every resident has one on file
    #[serde(default)]
    pub resident_address: Option<String>,
}

impl Resident {
    /// Text shown in the resident selector
    pub fn label(&self) -> String {
        match &self.resident_address {
            Some(address) if !address.trim().is_empty() => address.clone(),
            _ => self.resident_id.to_string(),
        }
    }
}

/// One row of `/api/v1.0/residents/{id}/balances`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub balance: f64,
    /// Day the balance was observed (YYYY-MM-DD)
    pub date: String,
    /// Estimated days of supply left at the current burn rate
    #[serde(default)]
    pub est_remain_days: Option<f64>,
}

/// Most recent balance as handed to the rendering layer.
///
/// Both fields are `None` when the resident has no balance history yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatestBalance {
    pub value: Option<f64>,
    pub date: Option<String>,
    pub est_remain_days: Option<f64>,
}

impl From<Option<BalanceRecord>> for LatestBalance {
    fn from(record: Option<BalanceRecord>) -> Self {
        match record {
            Some(record) => Self {
                value: Some(record.balance),
                date: Some(record.date),
                est_remain_days: record.est_remain_days,
            },
            None => Self::default(),
        }
    }
}

/// One row of `/api/v1.0/residents/{id}/usages`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// First day of the aggregated period (YYYY-MM-DD)
    pub date: String,
    /// Electricity used in kWh, missing when the utility has not reported it
    #[serde(default)]
    pub elec_usage: Option<f64>,
    /// Electricity charge in CNY
    #[serde(default)]
    pub elec_charge: Option<f64>,
}

/// Aggregation period for usage queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Monthly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every API response wraps its rows in a `data` array.
///
/// A missing or `null` array means "no data", never an error.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "Option::default")]
    data: Option<Vec<T>>,
}

impl<T> ApiEnvelope<T> {
    pub fn into_rows(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resident_id_accepts_text_and_numbers() {
        let text: ResidentId = serde_json::from_value(json!("A1")).unwrap();
        assert_eq!(text.as_str(), "A1");

        let number: ResidentId = serde_json::from_value(json!(1001)).unwrap();
        assert_eq!(number.as_str(), "1001");

        assert!(serde_json::from_value::<ResidentId>(json!(true)).is_err());
    }

    #[test]
    fn test_resident_id_from_selection() {
        assert_eq!(ResidentId::from_selection("  A1 "), Some(ResidentId::new("A1")));
        assert_eq!(ResidentId::from_selection(""), None);
        assert_eq!(ResidentId::from_selection("   "), None);
    }

    #[test]
    fn test_resident_label_falls_back_to_id() {
        let resident: Resident =
            serde_json::from_value(json!({"resident_id": 7, "resident_address": null})).unwrap();
        assert_eq!(resident.resident_address, None);
        assert_eq!(resident.label(), "7");

        let body = json!({"resident_id": "A1", "resident_address": "Unit 1"});
        let resident: Resident = serde_json::from_value(body).unwrap();
        assert_eq!(resident.label(), "Unit 1");
    }

    #[test]
    fn test_usage_record_with_null_values() {
        let record: UsageRecord = serde_json::from_value(json!({
            "date": "2024-01-01",
            "elec_usage": null,
            "elec_charge": 12.5,
        }))
        .unwrap();
        assert_eq!(record.elec_usage, None);
        assert_eq!(record.elec_charge, Some(12.5));
    }

    #[test]
    fn test_envelope_without_data_is_empty() {
        let missing: ApiEnvelope<UsageRecord> = serde_json::from_value(json!({})).unwrap();
        assert!(missing.into_rows().is_empty());

        let null: ApiEnvelope<UsageRecord> =
            serde_json::from_value(json!({"data": null, "pagination": null})).unwrap();
        assert!(null.into_rows().is_empty());
    }

    #[test]
    fn test_latest_balance_from_missing_record() {
        let latest = LatestBalance::from(None);
        assert_eq!(latest.value, None);
        assert_eq!(latest, LatestBalance::default());
    }

    #[test]
    fn test_granularity_wire_format() {
        assert_eq!(Granularity::Daily.to_string(), "daily");
        assert_eq!(serde_json::to_value(Granularity::Monthly).unwrap(), json!("monthly"));
    }
}
