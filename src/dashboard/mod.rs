//! The dashboard summary: income/expense totals, expense breakdown by
//! category and the monthly income-vs-expense trend.

mod aggregation;
mod summary_endpoint;

pub use aggregation::{MonthlyTrendPoint, category_color, monthly_trend, trailing_month_starts};
pub use summary_endpoint::{DashboardSummary, ExpenseSlice, get_dashboard_summary};

/// The number of calendar months covered by the monthly trend, current month
/// inclusive.
pub const TREND_MONTHS: usize = 12;
