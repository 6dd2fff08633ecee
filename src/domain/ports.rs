use super::payment::{Payment, PaymentStatus};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Optional filters for listing payments. All fields are conjunctive; a
/// `None` field matches everything. Date bounds are inclusive on both ends.
#[derive(Debug, Default, Clone)]
pub struct PaymentFilter {
    pub status: Option<PaymentStatus>,
    pub customer_id: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl PaymentFilter {
    pub fn matches(&self, payment: &Payment) -> bool {
        if let Some(status) = self.status
            && payment.status() != status
        {
            return false;
        }
        if let Some(customer_id) = &self.customer_id
            && payment.customer_id() != customer_id
        {
            return false;
        }
        if let Some(from) = self.from
            && payment.created_at() < from
        {
            return false;
        }
        if let Some(to) = self.to
            && payment.created_at() > to
        {
            return false;
        }
        true
    }
}

/// Zero-indexed page request.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Persists a payment. New payments (no id yet) get an id assigned and
    /// must not reuse an existing reference; updates must carry the version
    /// the row was read with, otherwise `StaleVersion` is returned.
    async fn save(&self, payment: Payment) -> Result<Payment>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Payment>>;

    async fn exists_by_reference(&self, reference: &str) -> Result<bool>;

    /// Returns the requested page of matching payments, ordered by id
    /// ascending so pagination is stable.
    async fn find_by_filters(
        &self,
        filter: &PaymentFilter,
        page: &PageRequest,
    ) -> Result<Vec<Payment>>;

    async fn count_by_filters(&self, filter: &PaymentFilter) -> Result<u64>;
}

pub type PaymentStoreRef = Arc<dyn PaymentStore>;
