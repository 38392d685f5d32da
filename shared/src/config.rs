use serde::{Deserialize, Serialize};

/// Range shown in the picker when the page opens
pub const DEFAULT_RANGE_DAYS: u32 = 180;
/// Days of daily usage drawn under the latest balance
pub const SPARKLINE_DAYS: u32 = 30;

/// Runtime settings of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Origin of the usage API; empty means the page's own origin
    pub api_base_url: String,
    pub default_range_days: u32,
    pub sparkline_days: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            default_range_days: DEFAULT_RANGE_DAYS,
            sparkline_days: SPARKLINE_DAYS,
        }
    }
}

impl DashboardConfig {
    /// Defaults with the API origin overridden when one is given
    pub fn with_api_base(api_base_url: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(base) = api_base_url.map(str::trim).filter(|base| !base.is_empty()) {
            config.api_base_url = base.to_string();
        }
        config
    }

    /// Zero-day windows make no sense; fall back to the defaults
    pub fn normalized(mut self) -> Self {
        if self.default_range_days == 0 {
            self.default_range_days = DEFAULT_RANGE_DAYS;
        }
        if self.sparkline_days == 0 {
            self.sparkline_days = SPARKLINE_DAYS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.api_base_url, "");
        assert_eq!(config.default_range_days, 180);
        assert_eq!(config.sparkline_days, 30);
    }

    #[test]
    fn test_with_api_base() {
        assert_eq!(
            DashboardConfig::with_api_base(Some(" http://localhost:5000 ")).api_base_url,
            "http://localhost:5000"
        );
        assert_eq!(DashboardConfig::with_api_base(Some("")).api_base_url, "");
        assert_eq!(DashboardConfig::with_api_base(None), DashboardConfig::default());
    }

    #[test]
    fn test_partial_json_and_normalization() {
        let config: DashboardConfig = serde_json::from_str(r#"{"sparkline_days": 0}"#).unwrap();
        assert_eq!(config.default_range_days, 180);
        assert_eq!(config.normalized().sparkline_days, 30);
    }
}
