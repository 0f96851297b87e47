use crate::domain::order::OrderStatus;
use crate::domain::payment::PaymentStatus;
use crate::error::{LifecycleError, Result};

/// The mutation a caller intends to apply to one side of an order/payment
/// pair.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StatusChange {
    Order(OrderStatus),
    Payment(PaymentStatus),
}

/// Checks an intended status change against the other side of the pair.
///
/// Each status may be individually valid while the combination is forbidden:
/// an order is only `Paid` on the back of a successful payment, and a
/// payment never settles or refunds against an order state that contradicts
/// it. Pure, no side effects.
pub fn validate_order_payment_consistency(
    order: OrderStatus,
    payment: PaymentStatus,
    intended: StatusChange,
) -> Result<()> {
    match intended {
        StatusChange::Order(OrderStatus::Paid) if !payment.is_successful() => {
            Err(LifecycleError::ConsistencyViolation(format!(
                "order cannot be paid while its payment is {payment:?}"
            )))
        }
        StatusChange::Payment(PaymentStatus::Success) if order == OrderStatus::Cancelled => {
            Err(LifecycleError::ConsistencyViolation(
                "payment cannot succeed for a cancelled order".to_string(),
            ))
        }
        StatusChange::Payment(PaymentStatus::Refunded) if order != OrderStatus::Cancelled => {
            Err(LifecycleError::ConsistencyViolation(format!(
                "payment cannot be refunded while the order is {order:?}"
            )))
        }
        _ => Ok(()),
    }
}
