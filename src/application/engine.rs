use crate::domain::event::{EventKind, LifecycleEvent};
use crate::domain::gateway::PaymentGateway;
use crate::domain::order::{Amount, Order, OrderStatus};
use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::ports::{OrderStoreBox, PaymentStoreBox};
use crate::domain::rules::{StatusChange, validate_order_payment_consistency};
use crate::error::{LifecycleError, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Result of a settlement attempt reported by a gateway.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SettlementOutcome {
    Success,
    Failure,
}

/// The main entry point for order and payment lifecycle mutations.
///
/// `LifecycleEngine` owns the storage backends and a registry of per-order
/// locks. Each operation loads the order/payment pair, validates the
/// requested transition against the status tables and the cross-entity
/// consistency rule, and persists the result while holding the order's
/// lock. Two concurrent mutations of the same order therefore serialize;
/// the loser observes the updated state and receives a deterministic
/// rejection instead of causing a lost update.
pub struct LifecycleEngine {
    order_store: OrderStoreBox,
    payment_store: PaymentStoreBox,
    locks: Mutex<HashMap<u32, Arc<Mutex<()>>>>,
}

impl LifecycleEngine {
    /// Creates a new `LifecycleEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `order_store` - The store for order aggregates.
    /// * `payment_store` - The store for payment records.
    pub fn new(order_store: OrderStoreBox, payment_store: PaymentStoreBox) -> Self {
        Self {
            order_store,
            payment_store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Dispatches a replayed lifecycle event to the matching operation.
    #[instrument(skip_all, fields(order = event.order))]
    pub async fn apply(&self, event: LifecycleEvent) -> Result<()> {
        match event.event {
            EventKind::Checkout => {
                let gateway = event.gateway.as_deref().ok_or_else(|| {
                    LifecycleError::Validation("checkout missing gateway".to_string())
                })?;
                let amount = event.amount.ok_or_else(|| {
                    LifecycleError::Validation("checkout missing amount".to_string())
                })?;
                self.checkout(event.order, gateway, amount).await
            }
            EventKind::Submit => self.submit_payment(event.order).await,
            EventKind::SettleSuccess => {
                self.settle(event.order, SettlementOutcome::Success).await
            }
            EventKind::SettleFailure => {
                self.settle(event.order, SettlementOutcome::Failure).await
            }
            EventKind::Ship => self.ship(event.order).await,
            EventKind::Deliver => self.deliver(event.order).await,
            EventKind::Cancel => self.cancel(event.order).await,
            EventKind::Refund => self.refund(event.order).await,
        }
    }

    /// Creates an order in `Pending` together with its `Pending` payment.
    ///
    /// The gateway code is resolved before anything is written; unknown
    /// codes and non-positive amounts are rejected, as are duplicate order
    /// ids.
    pub async fn checkout(&self, order_id: u32, gateway_code: &str, amount: Decimal) -> Result<()> {
        let gateway = PaymentGateway::from_code(gateway_code)?;
        let amount = Amount::new(amount)?;

        let lock = self.order_lock(order_id).await;
        let _guard = lock.lock().await;

        if self.order_store.exists(order_id).await? {
            return Err(LifecycleError::Validation(format!(
                "order {order_id} already exists"
            )));
        }

        let now = Utc::now();
        self.payment_store
            .store(Payment::new(order_id, gateway, amount, now))
            .await?;
        self.order_store.store(Order::new(order_id, amount, now)).await?;

        debug!(order = order_id, gateway = gateway.code(), "order checked out");
        Ok(())
    }

    /// Hands the payment to its gateway: `Pending -> Processing`.
    ///
    /// The mock gateway has no external settlement callback, so a mock
    /// payment settles successfully within the same operation.
    pub async fn submit_payment(&self, order_id: u32) -> Result<()> {
        let lock = self.order_lock(order_id).await;
        let _guard = lock.lock().await;
        let (mut order, mut payment) = self.load_pair(order_id).await?;

        payment.transition_to(PaymentStatus::Processing, Utc::now())?;

        if payment.gateway.is_mock() {
            debug!(order = order_id, "mock gateway, settling inline");
            self.settle_pair(&mut order, &mut payment, SettlementOutcome::Success)?;
        }

        self.payment_store.store(payment).await?;
        self.order_store.store(order).await?;
        Ok(())
    }

    /// Applies a gateway settlement result.
    ///
    /// Success drives the payment `Processing -> Success` and the order
    /// `Pending -> Paid` in one validated step. Failure only marks the
    /// payment; the order stays where it is.
    pub async fn settle(&self, order_id: u32, outcome: SettlementOutcome) -> Result<()> {
        let lock = self.order_lock(order_id).await;
        let _guard = lock.lock().await;
        let (mut order, mut payment) = self.load_pair(order_id).await?;

        self.settle_pair(&mut order, &mut payment, outcome)?;

        self.payment_store.store(payment).await?;
        self.order_store.store(order).await?;
        Ok(())
    }

    /// Moves a paid order into fulfilment: `Paid -> Shipping`.
    pub async fn ship(&self, order_id: u32) -> Result<()> {
        self.transition_order(order_id, OrderStatus::Shipping).await
    }

    /// Completes fulfilment: `Shipping -> Delivered`.
    pub async fn deliver(&self, order_id: u32) -> Result<()> {
        self.transition_order(order_id, OrderStatus::Delivered).await
    }

    /// Cancels an order that has not shipped yet.
    ///
    /// A payment that has not reached an outcome is cancelled alongside the
    /// order. A payment that already settled successfully stays intact and
    /// waits for an explicit refund.
    pub async fn cancel(&self, order_id: u32) -> Result<()> {
        let lock = self.order_lock(order_id).await;
        let _guard = lock.lock().await;
        let (mut order, mut payment) = self.load_pair(order_id).await?;

        let now = Utc::now();
        order.transition_to(OrderStatus::Cancelled, now)?;
        if !payment.status.is_final() {
            payment.transition_to(PaymentStatus::Cancelled, now)?;
        }

        self.payment_store.store(payment).await?;
        self.order_store.store(order).await?;

        debug!(order = order_id, "order cancelled");
        Ok(())
    }

    /// Returns a captured payment: `Success -> Refunded`.
    ///
    /// Only a cancelled order can be refunded; anything else is a
    /// cross-entity conflict.
    pub async fn refund(&self, order_id: u32) -> Result<()> {
        let lock = self.order_lock(order_id).await;
        let _guard = lock.lock().await;
        let (order, mut payment) = self.load_pair(order_id).await?;

        validate_order_payment_consistency(
            order.status,
            payment.status,
            StatusChange::Payment(PaymentStatus::Refunded),
        )?;
        payment.transition_to(PaymentStatus::Refunded, Utc::now())?;

        self.payment_store.store(payment).await?;

        debug!(order = order_id, "payment refunded");
        Ok(())
    }

    /// Consumes the engine and returns the final order/payment pairs,
    /// ordered by order id.
    pub async fn into_results(self) -> Result<Vec<(Order, Payment)>> {
        let mut pairs = Vec::new();
        for order in self.order_store.get_all().await? {
            let payment = self
                .payment_store
                .get(order.id)
                .await?
                .ok_or_else(|| missing_payment(order.id))?;
            pairs.push((order, payment));
        }
        pairs.sort_by_key(|(order, _)| order.id);
        Ok(pairs)
    }

    /// Settlement core shared by `settle` and the mock inline capture.
    ///
    /// The consistency rule runs before the payment write, so a settlement
    /// callback racing an order cancellation is rejected as a conflict and
    /// never touches the stored payment.
    fn settle_pair(
        &self,
        order: &mut Order,
        payment: &mut Payment,
        outcome: SettlementOutcome,
    ) -> Result<()> {
        let now = Utc::now();
        match outcome {
            SettlementOutcome::Success => {
                validate_order_payment_consistency(
                    order.status,
                    payment.status,
                    StatusChange::Payment(PaymentStatus::Success),
                )?;
                payment.transition_to(PaymentStatus::Success, now)?;
                validate_order_payment_consistency(
                    order.status,
                    payment.status,
                    StatusChange::Order(OrderStatus::Paid),
                )?;
                order.transition_to(OrderStatus::Paid, now)?;
                debug!(order = order.id, "payment captured, order paid");
            }
            SettlementOutcome::Failure => {
                payment.transition_to(PaymentStatus::Failed, now)?;
                debug!(order = order.id, "payment failed");
            }
        }
        Ok(())
    }

    async fn transition_order(&self, order_id: u32, target: OrderStatus) -> Result<()> {
        let lock = self.order_lock(order_id).await;
        let _guard = lock.lock().await;
        let (mut order, payment) = self.load_pair(order_id).await?;

        validate_order_payment_consistency(
            order.status,
            payment.status,
            StatusChange::Order(target),
        )?;
        order.transition_to(target, Utc::now())?;

        self.order_store.store(order).await?;
        Ok(())
    }

    async fn load_pair(&self, order_id: u32) -> Result<(Order, Payment)> {
        let order = self
            .order_store
            .get(order_id)
            .await?
            .ok_or_else(|| LifecycleError::Validation(format!("unknown order {order_id}")))?;
        let payment = self
            .payment_store
            .get(order_id)
            .await?
            .ok_or_else(|| missing_payment(order_id))?;
        Ok((order, payment))
    }

    async fn order_lock(&self, order_id: u32) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(order_id).or_default().clone()
    }
}

fn missing_payment(order_id: u32) -> LifecycleError {
    LifecycleError::Internal(Box::new(std::io::Error::other(format!(
        "order {order_id} has no payment record"
    ))))
}
