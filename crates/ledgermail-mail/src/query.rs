//! Search query construction for transaction-alert emails

use chrono::{DateTime, Duration, Utc};
use ledgermail_domain::Query;

/// Static filter criteria for the inbox search
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    /// Sender address the alerts come from
    pub sender: String,

    /// Keyword the alert subject must contain
    pub subject_keyword: String,
}

/// Build the search query for one pipeline run.
///
/// Produces `from:<sender> subject:<keyword> after:<YYYY/MM/DD>` where the
/// date is one day before `now`, regardless of `now`'s time-of-day. Pure
/// function; the caller supplies the timestamp.
pub fn build_query(criteria: &SearchCriteria, now: DateTime<Utc>) -> Query {
    let after = (now - Duration::days(1)).format("%Y/%m/%d");
    Query::new(format!(
        "from:{} subject:{} after:{}",
        criteria.sender, criteria.subject_keyword, after
    ))
}
