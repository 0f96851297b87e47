use rust_decimal::Decimal;
use serde::Deserialize;

/// The kind of lifecycle mutation an event requests.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Checkout,
    Submit,
    SettleSuccess,
    SettleFailure,
    Ship,
    Deliver,
    Cancel,
    Refund,
}

/// A single lifecycle event as it arrives from a replay stream.
///
/// `gateway` and `amount` are only present on checkout rows; the remaining
/// kinds address an existing order by id.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct LifecycleEvent {
    pub event: EventKind,
    pub order: u32,
    pub gateway: Option<String>,
    pub amount: Option<Decimal>,
}
