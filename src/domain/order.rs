use crate::error::{LifecycleError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a positive monetary amount.
///
/// This is a wrapper around `rust_decimal::Decimal` to enforce domain-specific rules
/// and provide type safety for monetary values.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(LifecycleError::Validation(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = LifecycleError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Lifecycle status of an order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipping,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Returns true if `target` is a legal next status.
    ///
    /// The table is closed: anything not listed here is rejected.
    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, target),
            (Pending, Paid)
                | (Pending, Cancelled)
                | (Paid, Shipping)
                | (Paid, Cancelled)
                | (Shipping, Delivered)
        )
    }

    /// Returns true if the order can never leave this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// A customer purchase aggregate.
///
/// Orders start in `Pending` at checkout and only change status through
/// [`Order::transition_to`]. Timestamps are set explicitly by the caller's
/// layer: `created_at` at construction, `updated_at` on every validated
/// mutation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Order {
    /// The unique identifier for the order.
    pub id: u32,
    /// The total charged for the order.
    pub amount: Amount,
    /// Current lifecycle status.
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(id: u32, amount: Amount, now: DateTime<Utc>) -> Self {
        Self {
            id,
            amount,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves the order to `target` if the transition table allows it.
    pub fn transition_to(&mut self, target: OrderStatus, now: DateTime<Utc>) -> Result<()> {
        if self.status.can_transition_to(target) {
            self.status = target;
            self.updated_at = now;
            Ok(())
        } else {
            Err(LifecycleError::IllegalOrderTransition {
                from: self.status,
                to: target,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Shipping,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(1.0)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0.0)),
            Err(LifecycleError::Validation(_))
        ));
        assert!(matches!(
            Amount::new(dec!(-1.0)),
            Err(LifecycleError::Validation(_))
        ));
    }

    #[test]
    fn test_transition_table_exhaustive() {
        use OrderStatus::*;
        let allowed = [
            (Pending, Paid),
            (Pending, Cancelled),
            (Paid, Shipping),
            (Paid, Cancelled),
            (Shipping, Delivered),
        ];

        for from in ALL {
            for to in ALL {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "({from:?} -> {to:?}) should be {expected}"
                );
            }
        }
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for from in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            assert!(from.is_terminal());
            for to in ALL {
                assert!(!from.can_transition_to(to));
            }
        }
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Paid.is_terminal());
        assert!(!OrderStatus::Shipping.is_terminal());
    }

    #[test]
    fn test_order_transition_updates_timestamp() {
        let t0 = Utc::now();
        let mut order = Order::new(1, Amount::new(dec!(10.0)).unwrap(), t0);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.updated_at, t0);

        let t1 = t0 + chrono::Duration::seconds(5);
        order.transition_to(OrderStatus::Cancelled, t1).unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert_eq!(order.created_at, t0);
        assert_eq!(order.updated_at, t1);
    }

    #[test]
    fn test_order_rejects_illegal_transition() {
        let now = Utc::now();
        let mut order = Order::new(1, Amount::new(dec!(10.0)).unwrap(), now);
        let result = order.transition_to(OrderStatus::Shipping, now);
        assert!(matches!(
            result,
            Err(LifecycleError::IllegalOrderTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Shipping,
            })
        ));
        // Status is untouched on rejection
        assert_eq!(order.status, OrderStatus::Pending);
    }
}
