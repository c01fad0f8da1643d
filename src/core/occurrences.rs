//! Expands recurring rules into the dated instances they imply.

use chrono::NaiveDate;
use tracing::warn;

use crate::domain::{DateRange, Occurrence, RecurringTransaction};

/// Upper bound on instances produced for a single rule in one query.
pub const MAX_OCCURRENCES: usize = 10_000;

/// Instances generated for one or more rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrenceBatch {
    pub occurrences: Vec<Occurrence>,
    /// Set when a rule hit [`MAX_OCCURRENCES`] and later instances were dropped.
    pub truncated: bool,
}

impl OccurrenceBatch {
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.occurrences.iter().map(|occ| occ.date).collect()
    }
}

/// Window in which `rule` generates instances for the given query bounds.
///
/// Open bounds fall back to the rule's own dates and then to `today`. Returns
/// `None` when the rule starts after the query ends or ends before it starts.
pub fn effective_window(
    rule: &RecurringTransaction,
    range_start: Option<NaiveDate>,
    range_end: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<DateRange> {
    let rule_end = rule.end_date.or(range_end).unwrap_or(today);
    let query_start = range_start.unwrap_or(rule.start_date);
    let query_end = range_end.or(rule.end_date).unwrap_or(today);

    let start = rule.start_date.max(query_start);
    let end = rule_end.min(query_end);
    (start <= end).then_some(DateRange { start, end })
}

/// Produces the instances `rule` implies within the query bounds.
///
/// Generation starts at the effective window start and steps by the rule's
/// frequency (see [`Frequency::advance`](crate::domain::Frequency::advance))
/// until the window end. Inactive rules produce nothing.
pub fn generate_occurrences(
    rule: &RecurringTransaction,
    range_start: Option<NaiveDate>,
    range_end: Option<NaiveDate>,
    today: NaiveDate,
) -> OccurrenceBatch {
    let mut batch = OccurrenceBatch::default();
    if !rule.is_active {
        return batch;
    }
    let Some(window) = effective_window(rule, range_start, range_end, today) else {
        return batch;
    };

    let mut step = 0u32;
    while let Some(date) = rule.frequency.advance(window.start, step) {
        if date > window.end {
            break;
        }
        if batch.occurrences.len() >= MAX_OCCURRENCES {
            warn!(
                rule_id = %rule.id,
                limit = MAX_OCCURRENCES,
                "recurring rule generated too many instances; truncating"
            );
            batch.truncated = true;
            break;
        }
        batch.occurrences.push(Occurrence {
            rule_id: rule.id,
            index: batch.occurrences.len(),
            user_id: rule.user_id,
            category_id: rule.category_id,
            amount: rule.amount.clone(),
            kind: rule.kind,
            description: rule.description.clone(),
            date,
        });
        step += 1;
    }

    batch
}

/// Expands every rule over the same query bounds, concatenating the results.
pub fn expand_rules(
    rules: &[RecurringTransaction],
    range_start: Option<NaiveDate>,
    range_end: Option<NaiveDate>,
    today: NaiveDate,
) -> OccurrenceBatch {
    let mut combined = OccurrenceBatch::default();
    for rule in rules {
        let batch = generate_occurrences(rule, range_start, range_end, today);
        combined.truncated |= batch.truncated;
        combined.occurrences.extend(batch.occurrences);
    }
    combined
}
