use crate::domain::order::OrderStatus;
use crate::domain::payment::PaymentStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LifecycleError>;

#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("order cannot move from {from:?} to {to:?}")]
    IllegalOrderTransition { from: OrderStatus, to: OrderStatus },
    #[error("payment cannot move from {from:?} to {to:?}")]
    IllegalPaymentTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },
    #[error("payment already settled as {0:?}")]
    PaymentAlreadyFinal(PaymentStatus),
    #[error("unknown payment gateway code: '{0}'")]
    UnknownGateway(String),
    #[error("order/payment conflict: {0}")]
    ConsistencyViolation(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[cfg(feature = "storage-rocksdb")]
    #[error("storage error: {0}")]
    Storage(#[from] rocksdb::Error),
    #[error("internal error: {0}")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}
