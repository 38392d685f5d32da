pub mod charts;
pub mod date_range_picker;
pub mod filter_bar;
pub mod notice_banner;
pub mod resident_selector;

pub use charts::{BalanceSparkline, MonthlyUsageChart};
pub use filter_bar::FilterBar;
pub use notice_banner::NoticeBanner;
