//! Order stats singleton.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Running order aggregate, stored as a single record.
///
/// Maintained incrementally on every order write - never recomputed from the
/// orders collection. A corrupted stats write therefore diverges silently
/// from the orders it summarizes; whether that warrants reconciliation is a
/// product decision this crate does not take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Stats {
    /// Number of orders ever placed.
    pub total_orders: u64,
    /// Sum of order totals.
    pub total_revenue: Decimal,
    /// When the most recent order was placed.
    pub last_order_at: Option<DateTime<Utc>>,
}

impl Stats {
    /// Fold one order into the aggregate.
    pub fn record_order(&mut self, total: Decimal, at: DateTime<Utc>) {
        self.total_orders += 1;
        self.total_revenue += total;
        self.last_order_at = Some(at);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_record_order_accumulates() {
        let mut stats = Stats::default();
        let now = Utc::now();

        stats.record_order(Decimal::new(15_000, 2), now);
        assert_eq!(stats.total_orders, 1);
        assert_eq!(stats.total_revenue, Decimal::new(15_000, 2));
        assert_eq!(stats.last_order_at, Some(now));

        let later = now + chrono::Duration::minutes(1);
        stats.record_order(Decimal::new(500, 2), later);
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_revenue, Decimal::new(15_500, 2));
        assert_eq!(stats.last_order_at, Some(later));
    }
}
