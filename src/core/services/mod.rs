//! Fetch-then-derive workflows over a [`FinanceApi`](crate::api::FinanceApi).

pub mod budget_service;
pub mod category_service;
pub mod chart_service;
pub mod dashboard_service;
pub mod history_service;
pub mod prediction_service;
pub mod recurring_service;
pub mod transaction_service;
pub mod view_state;

pub use budget_service::BudgetService;
pub use category_service::{CategoryService, CategoriesByKind};
pub use chart_service::{ChartData, ChartService};
pub use dashboard_service::{DashboardService, DashboardSnapshot};
pub use history_service::HistoryService;
pub use prediction_service::{PredictionOutcome, PredictionService};
pub use recurring_service::RecurringService;
pub use transaction_service::TransactionService;
pub use view_state::{RefreshGuard, RefreshTicket, ViewState};
