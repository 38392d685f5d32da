//! Chart sinks and the chart state they hold.
//!
//! A sink is created once per page with its static configuration and only
//! ever updated afterwards: options (title/subtitle) and series are replaced
//! independently of each other.

use serde::{Deserialize, Serialize};

use crate::series::ChartSeries;
use crate::LatestBalance;

pub const LOADING_TEXT: &str = "Loading...";
pub const NO_DATA_TEXT: &str = "No data";
/// Shown in place of a balance or date the API did not provide
pub const UNAVAILABLE_TEXT: &str = "--";

pub const BALANCE_TITLE_PREFIX: &str = "Current balance: ";
pub const BALANCE_SUBTITLE_PREFIX: &str = "Updated: ";

/// Presentation fields to merge into a chart; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptionsPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

/// Something that displays a chart
pub trait ChartSink {
    fn update_options(&mut self, patch: ChartOptionsPatch);

    /// Replace every series; drawing follows from the new data
    fn update_series(&mut self, series: Vec<ChartSeries>);
}

/// One y-axis; `opposite` puts it on the right
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub title: Option<String>,
    pub opposite: bool,
    pub min: Option<f64>,
}

/// Static, never-updated part of a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub id: String,
    pub height: u32,
    /// Axis-free compact rendering
    pub sparkline: bool,
    pub colors: Vec<String>,
    pub y_axes: Vec<AxisConfig>,
}

/// Full chart state: static config, current options and current series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartModel {
    pub config: ChartConfig,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub no_data_text: String,
    pub series: Vec<ChartSeries>,
    /// Bumped on every series replacement so renderers can tell redraws apart
    pub revision: u64,
}

impl ChartModel {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            title: None,
            subtitle: None,
            no_data_text: LOADING_TEXT.to_string(),
            series: Vec::new(),
            revision: 0,
        }
    }

    /// Area sparkline showing recent daily usage under the latest balance
    pub fn balance_sparkline() -> Self {
        let mut model = Self::new(ChartConfig {
            id: "latestBalanceSparkline".to_string(),
            height: 160,
            sparkline: true,
            colors: vec!["#DCE6EC".to_string()],
            y_axes: vec![AxisConfig {
                title: None,
                opposite: false,
                min: Some(0.0),
            }],
        });
        model.title = Some(format!("{BALANCE_TITLE_PREFIX}{LOADING_TEXT}"));
        model.subtitle = Some(format!("{BALANCE_SUBTITLE_PREFIX}{LOADING_TEXT}"));
        model
    }

    /// Monthly usage columns with the monthly charge on a second axis
    pub fn monthly_usage() -> Self {
        Self::new(ChartConfig {
            id: "monthlyUsageChart".to_string(),
            height: 340,
            sparkline: false,
            colors: ["#00D8B6", "#008FFB", "#FEB019", "#FF4560", "#775DD0"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            y_axes: vec![
                AxisConfig {
                    title: Some("Usage (kWh)".to_string()),
                    opposite: false,
                    min: None,
                },
                AxisConfig {
                    title: Some("Charge (CNY)".to_string()),
                    opposite: true,
                    min: None,
                },
            ],
        })
    }

    pub fn has_data(&self) -> bool {
        self.series.iter().any(|series| !series.is_empty())
    }

    /// Colour for the series at `index`, cycling through the palette
    pub fn color_for(&self, index: usize) -> &str {
        match self.config.colors.len() {
            0 => "#008FFB",
            len => &self.config.colors[index % len],
        }
    }
}

impl ChartSink for ChartModel {
    fn update_options(&mut self, patch: ChartOptionsPatch) {
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(subtitle) = patch.subtitle {
            self.subtitle = Some(subtitle);
        }
    }

    fn update_series(&mut self, series: Vec<ChartSeries>) {
        self.series = series;
        self.no_data_text = NO_DATA_TEXT.to_string();
        self.revision += 1;
    }
}

/// Title and subtitle of the balance sparkline
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceHeadline {
    pub title: String,
    pub subtitle: String,
}

impl BalanceHeadline {
    pub fn from_latest(latest: &LatestBalance) -> Self {
        let title = match latest.value {
            Some(value) => format!("{BALANCE_TITLE_PREFIX}CNY {value:.2}"),
            None => format!("{BALANCE_TITLE_PREFIX}{UNAVAILABLE_TEXT}"),
        };
        let date = latest.date.as_deref().unwrap_or(UNAVAILABLE_TEXT);
        let subtitle = match latest.est_remain_days {
            Some(days) if latest.date.is_some() => {
                format!("{BALANCE_SUBTITLE_PREFIX}{date} (about {days:.0} days left)")
            }
            _ => format!("{BALANCE_SUBTITLE_PREFIX}{date}"),
        };
        Self { title, subtitle }
    }
}

impl From<BalanceHeadline> for ChartOptionsPatch {
    fn from(headline: BalanceHeadline) -> Self {
        Self {
            title: Some(headline.title),
            subtitle: Some(headline.subtitle),
        }
    }
}

/// The two charts on the page, owned by whoever created them at startup
pub struct DashboardCharts<B, M> {
    pub balance: B,
    pub monthly: M,
}

impl<B: ChartSink, M: ChartSink> DashboardCharts<B, M> {
    pub fn new(balance: B, monthly: M) -> Self {
        Self { balance, monthly }
    }
}

impl Default for DashboardCharts<ChartModel, ChartModel> {
    fn default() -> Self {
        Self::new(ChartModel::balance_sparkline(), ChartModel::monthly_usage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{ChartPoint, ChartSeries};

    #[test]
    fn test_new_charts_show_loading() {
        let charts: DashboardCharts<ChartModel, ChartModel> = DashboardCharts::default();
        assert_eq!(charts.balance.no_data_text, LOADING_TEXT);
        assert!(charts.balance.title.as_deref().unwrap().contains(LOADING_TEXT));
        assert!(!charts.monthly.has_data());
        assert_eq!(charts.monthly.config.y_axes.len(), 2);
        assert!(charts.monthly.config.y_axes[1].opposite);
    }

    #[test]
    fn test_update_options_leaves_series_untouched() {
        let mut chart = ChartModel::balance_sparkline();
        chart.update_series(vec![ChartSeries::new(
            "s",
            None,
            vec![ChartPoint {
                x: "2024-01-01".to_string(),
                y: Some(1.0),
            }],
        )]);
        let series_before = chart.series.clone();

        chart.update_options(ChartOptionsPatch {
            title: Some("t".to_string()),
            subtitle: None,
        });
        assert_eq!(chart.title.as_deref(), Some("t"));
        assert!(chart.subtitle.as_deref().unwrap().starts_with(BALANCE_SUBTITLE_PREFIX));
        assert_eq!(chart.series, series_before);
    }

    #[test]
    fn test_update_series_replaces_everything() {
        let mut chart = ChartModel::monthly_usage();
        chart.update_series(vec![
            ChartSeries::new("a", None, vec![]),
            ChartSeries::new("b", None, vec![]),
        ]);
        chart.update_series(vec![ChartSeries::new("c", None, vec![])]);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].name, "c");
        assert_eq!(chart.revision, 2);
        assert_eq!(chart.no_data_text, NO_DATA_TEXT);
        assert!(!chart.has_data());
    }

    #[test]
    fn test_headline_with_balance() {
        let headline = BalanceHeadline::from_latest(&LatestBalance {
            value: Some(42.5),
            date: Some("2024-03-01".to_string()),
            est_remain_days: None,
        });
        assert!(headline.title.contains("42.5"));
        assert!(headline.subtitle.contains("2024-03-01"));
    }

    #[test]
    fn test_headline_with_remaining_days() {
        let headline = BalanceHeadline::from_latest(&LatestBalance {
            value: Some(10.0),
            date: Some("2024-03-01".to_string()),
            est_remain_days: Some(3.4),
        });
        assert_eq!(headline.subtitle, "Updated: 2024-03-01 (about 3 days left)");
    }

    #[test]
    fn test_headline_without_balance_uses_placeholder() {
        let headline = BalanceHeadline::from_latest(&LatestBalance::default());
        assert_eq!(headline.title, format!("{BALANCE_TITLE_PREFIX}{UNAVAILABLE_TEXT}"));
        assert_eq!(headline.subtitle, format!("{BALANCE_SUBTITLE_PREFIX}{UNAVAILABLE_TEXT}"));
    }

    #[test]
    fn test_palette_cycles() {
        let chart = ChartModel::monthly_usage();
        assert_eq!(chart.color_for(0), "#00D8B6");
        assert_eq!(chart.color_for(5), "#00D8B6");
    }
}
