//! Pure computations over fetched data, and the services that feed them.

pub mod aggregation;
pub mod budget_comparison;
pub mod history;
pub mod metrics;
pub mod occurrences;
pub mod services;
pub mod validation;

pub use aggregation::{aggregate_by_category, aggregate_by_date, CategorySlice, DatePoint};
pub use budget_comparison::{compare_budget_to_actual, BudgetComparison, CategoryComparison};
pub use history::{build_history, EntrySource, History, HistoryEntry, KindFilter};
pub use metrics::{compute_balance_history, compute_metrics, DashboardMetrics};
pub use occurrences::{expand_rules, generate_occurrences, OccurrenceBatch, MAX_OCCURRENCES};
pub use validation::TransactionDraft;
