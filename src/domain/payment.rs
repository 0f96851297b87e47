use crate::domain::gateway::PaymentGateway;
use crate::domain::order::Amount;
use crate::error::{LifecycleError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a payment record.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Success,
    Failed,
    Cancelled,
    Refunded,
}

impl PaymentStatus {
    /// Returns true once the settlement attempt has reached an outcome.
    pub fn is_final(self) -> bool {
        matches!(
            self,
            PaymentStatus::Success
                | PaymentStatus::Failed
                | PaymentStatus::Cancelled
                | PaymentStatus::Refunded
        )
    }

    /// Returns true only for a settled, captured payment.
    pub fn is_successful(self) -> bool {
        self == PaymentStatus::Success
    }

    /// Returns true if `target` is a legal next status.
    ///
    /// `Success -> Refunded` is the single legal move out of a final status.
    pub fn can_transition_to(self, target: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, target),
            (Pending, Processing)
                | (Pending, Cancelled)
                | (Processing, Success)
                | (Processing, Failed)
                | (Processing, Cancelled)
                | (Success, Refunded)
        )
    }
}

/// A settlement attempt bound to exactly one order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payment {
    /// The order this payment settles.
    pub order: u32,
    /// The settlement provider handling this payment.
    pub gateway: PaymentGateway,
    /// The amount to settle, always matching the order total.
    pub amount: Amount,
    /// Current lifecycle status.
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(order: u32, gateway: PaymentGateway, amount: Amount, now: DateTime<Utc>) -> Self {
        Self {
            order,
            gateway,
            amount,
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves the payment to `target` if the transition table allows it.
    ///
    /// A write against a final status that is not in the table fails as a
    /// final-state violation rather than an ordinary illegal transition, so
    /// callers can surface the two cases differently.
    pub fn transition_to(&mut self, target: PaymentStatus, now: DateTime<Utc>) -> Result<()> {
        if self.status.can_transition_to(target) {
            self.status = target;
            self.updated_at = now;
            Ok(())
        } else if self.status.is_final() {
            Err(LifecycleError::PaymentAlreadyFinal(self.status))
        } else {
            Err(LifecycleError::IllegalPaymentTransition {
                from: self.status,
                to: target,
            })
        }
    }
}
