//! Reshape API rows into the `{name, type, data: [{x, y}]}` series the
//! charts consume. Nothing here re-orders rows.

use serde::{Deserialize, Serialize};

use crate::UsageRecord;

pub const DAILY_USAGE_SERIES: &str = "Electricity (kWh)";
pub const MONTHLY_USAGE_SERIES: &str = "Usage (kWh)";
pub const MONTHLY_CHARGE_SERIES: &str = "Charge (CNY)";

/// A single chart point. `y` is `None` where the source value was missing,
/// which the renderer draws as a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: String,
    pub y: Option<f64>,
}

/// How a series is drawn inside a mixed chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Column,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    /// Left unset when the chart's own type applies
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SeriesKind>,
    pub data: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(name: impl Into<String>, kind: Option<SeriesKind>, data: Vec<ChartPoint>) -> Self {
        Self {
            name: name.into(),
            kind,
            data,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Largest `y`, ignoring gaps
    pub fn max_y(&self) -> Option<f64> {
        self.data
            .iter()
            .filter_map(|point| point.y)
            .fold(None, |max, y| Some(max.map_or(y, |m: f64| m.max(y))))
    }
}

/// Map each record to `{x: date, y: projection(record)}`, keeping input order
pub fn to_point_series<F>(records: &[UsageRecord], projection: F) -> Vec<ChartPoint>
where
    F: Fn(&UsageRecord) -> Option<f64>,
{
    records
        .iter()
        .map(|record| ChartPoint {
            x: record.date.clone(),
            y: projection(record),
        })
        .collect()
}

/// Daily electricity usage, drawn next to the latest balance
pub fn daily_usage_series(records: &[UsageRecord]) -> ChartSeries {
    ChartSeries::new(
        DAILY_USAGE_SERIES,
        None,
        to_point_series(records, |record| record.elec_usage),
    )
}

/// Monthly usage as columns and monthly charge as a line, over the same months
pub fn monthly_usage_series(records: &[UsageRecord]) -> Vec<ChartSeries> {
    vec![
        ChartSeries::new(
            MONTHLY_USAGE_SERIES,
            Some(SeriesKind::Column),
            to_point_series(records, |record| record.elec_usage),
        ),
        ChartSeries::new(
            MONTHLY_CHARGE_SERIES,
            Some(SeriesKind::Line),
            to_point_series(records, |record| record.elec_charge),
        ),
    ]
}
