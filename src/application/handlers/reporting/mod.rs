//! Reporting query handlers.
//!
//! Read-only handlers behind the dashboards. None of them fails for lack of
//! data: empty families get neutral balances and initial ratings.

mod errors;
mod get_balance_metrics;
mod get_category_distribution;
mod get_category_imbalances;
mod get_global_ratings;
mod get_recent_matches;
mod get_task_imbalances;
mod get_task_recommendations;
mod get_uncovered_tasks;
mod get_weight_statistics;

pub use errors::ReportingError;
pub use get_balance_metrics::{GetBalanceMetricsHandler, GetBalanceMetricsQuery, GetBalanceMetricsResult};
pub use get_category_distribution::{
    GetCategoryDistributionHandler, GetCategoryDistributionQuery, GetCategoryDistributionResult,
};
pub use get_category_imbalances::{
    CategoryImbalanceReport, GetCategoryImbalancesHandler, GetCategoryImbalancesQuery,
};
pub use get_global_ratings::{GetGlobalRatingsHandler, GetGlobalRatingsQuery, GlobalRatings};
pub use get_recent_matches::{GetRecentMatchesHandler, GetRecentMatchesQuery, DEFAULT_RECENT_LIMIT};
pub use get_task_imbalances::{GetTaskImbalancesHandler, GetTaskImbalancesQuery};
pub use get_task_recommendations::{GetTaskRecommendationsHandler, GetTaskRecommendationsQuery};
pub use get_uncovered_tasks::{GetUncoveredTasksHandler, GetUncoveredTasksQuery};
pub use get_weight_statistics::{GetWeightStatisticsHandler, GetWeightStatisticsQuery};
