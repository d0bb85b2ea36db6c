//! Subscription engine
//!
//! Delivery-date arithmetic for recurring boxes. The next delivery date is
//! derived once at creation and is informational: nothing advances it on a
//! schedule, and no order is ever placed from it.

use chrono::{DateTime, Months, Utc};

use crate::db::models::Frequency;

/// Next delivery date: `from` plus the frequency's calendar-month interval.
///
/// Calendar months, not fixed day counts: Jan 31 + 1 month clamps to the
/// last day of February.
pub fn next_delivery_date(frequency: Frequency, from: DateTime<Utc>) -> DateTime<Utc> {
    from.checked_add_months(Months::new(frequency.months()))
        .unwrap_or(from)
}
