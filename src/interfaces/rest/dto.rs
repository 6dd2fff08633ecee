use crate::application::service::{CreatePayment, Page};
use crate::domain::payment::{Currency, Payment, PaymentMethod, PaymentStatus};
use crate::domain::ports::PaymentFilter;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request payload for creating a payment.
///
/// Unknown fields (including a caller-supplied `status`) are ignored by
/// deserialization; new payments always start out PENDING.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub reference: String,
    pub customer_id: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub method: PaymentMethod,
}

impl From<CreatePaymentRequest> for CreatePayment {
    fn from(request: CreatePaymentRequest) -> Self {
        Self {
            reference: request.reference,
            customer_id: request.customer_id,
            amount: request.amount,
            currency: request.currency,
            method: request.method,
        }
    }
}

/// Request payload for updating a payment's status.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: PaymentStatus,
}

/// Query parameters for the list endpoint. Filters are optional; pagination
/// defaults to the first page of ten.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPaymentsQuery {
    pub status: Option<PaymentStatus>,
    pub customer_id: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
}

fn default_page_size() -> u32 {
    10
}

impl ListPaymentsQuery {
    pub fn filter(&self) -> PaymentFilter {
        PaymentFilter {
            status: self.status,
            customer_id: self.customer_id.clone(),
            from: self.from,
            to: self.to,
        }
    }
}

/// Response payload for a single payment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: Option<i64>,
    pub reference: String,
    pub customer_id: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&Payment> for PaymentResponse {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id(),
            reference: payment.reference().to_string(),
            customer_id: payment.customer_id().to_string(),
            amount: payment.amount().value(),
            currency: payment.currency(),
            method: payment.method(),
            status: payment.status(),
            created_at: payment.created_at(),
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_count: u64,
    pub total_pages: u64,
}

impl From<Page<Payment>> for PagedResponse<PaymentResponse> {
    fn from(page: Page<Payment>) -> Self {
        let total_pages = page.total_pages();
        Self {
            items: page.items.iter().map(PaymentResponse::from).collect(),
            page: page.page,
            size: page.size,
            total_count: page.total_count,
            total_pages,
        }
    }
}
