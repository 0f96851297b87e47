use super::order::Order;
use super::payment::Payment;
use crate::error::Result;
use async_trait::async_trait;

pub type OrderStoreBox = Box<dyn OrderStore>;
pub type PaymentStoreBox = Box<dyn PaymentStore>;

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn store(&self, order: Order) -> Result<()>;
    async fn get(&self, order_id: u32) -> Result<Option<Order>>;
    async fn get_all(&self) -> Result<Vec<Order>>;
    async fn exists(&self, order_id: u32) -> Result<bool>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn store(&self, payment: Payment) -> Result<()>;
    async fn get(&self, order_id: u32) -> Result<Option<Payment>>;
    async fn get_all(&self) -> Result<Vec<Payment>>;
}
