pub mod balance_sparkline;
pub mod chart_canvas;
pub mod monthly_usage_chart;

pub use balance_sparkline::BalanceSparkline;
pub use monthly_usage_chart::MonthlyUsageChart;
