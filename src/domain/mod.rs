//! Backend resources and the value types derived from them.

pub mod budget;
pub mod category;
pub mod common;
pub mod date_range;
pub mod recurring;
pub mod transaction;

pub use budget::{Budget, NewBudget};
pub use category::{Category, CategoryPatch, NewCategory};
pub use common::{
    add_amounts, find_by_id, parse_amount, parse_day, Entry, EntryKind, Identifiable,
};
pub use date_range::{first_of_month, last_of_month, DateFilter, DateRange, Period};
pub use recurring::{
    Frequency, NewRecurringTransaction, Occurrence, RecurringTransaction,
    RecurringTransactionPatch,
};
pub use transaction::{NewTransaction, Transaction, TransactionPatch};
