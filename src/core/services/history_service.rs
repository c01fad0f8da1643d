use tracing::{debug, warn};

use crate::api::{FinanceApi, Session};
use crate::core::history::{build_history, History, KindFilter};
use crate::domain::DateFilter;
use crate::errors::Result;
use crate::utils::time::Clock;

/// Loads the merged history of persisted and recurring entries.
pub struct HistoryService;

impl HistoryService {
    pub fn load(
        api: &dyn FinanceApi,
        session: &Session,
        filter: DateFilter,
        kinds: KindFilter,
        clock: &dyn Clock,
    ) -> Result<History> {
        let transactions = api.list_transactions(session.user_id)?;
        let rules = api.list_recurring(session.user_id)?;
        let categories = api.list_categories(session.user_id)?;
        debug!(
            user_id = %session.user_id,
            transactions = transactions.len(),
            rules = rules.len(),
            "building history"
        );

        let history = build_history(
            &transactions,
            &rules,
            &categories,
            filter,
            kinds,
            clock.today(),
        );
        if history.truncated {
            warn!(user_id = %session.user_id, "history is missing recurring entries past the cap");
        }
        Ok(history)
    }
}
