pub mod use_chart_store;
pub mod use_dashboard;

pub use use_dashboard::use_dashboard;
