use crate::domain::gateway::PaymentGateway;
use crate::domain::order::{Amount, Order, OrderStatus};
use crate::domain::payment::{Payment, PaymentStatus};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// One row of the final-state report.
#[derive(Debug, Serialize, PartialEq)]
pub struct ReportRow {
    pub order: u32,
    pub status: OrderStatus,
    pub gateway: PaymentGateway,
    pub amount: Amount,
    pub payment: PaymentStatus,
}

impl From<(Order, Payment)> for ReportRow {
    fn from((order, payment): (Order, Payment)) -> Self {
        Self {
            order: order.id,
            status: order.status,
            gateway: payment.gateway,
            amount: order.amount,
            payment: payment.status,
        }
    }
}

/// Writes the final order/payment states as CSV.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    /// Creates a new `ReportWriter` over any `Write` sink (e.g., Stdout).
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Serializes one row per order/payment pair and flushes the sink.
    pub fn write_report(&mut self, pairs: Vec<(Order, Payment)>) -> Result<()> {
        for pair in pairs {
            self.writer.serialize(ReportRow::from(pair))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
