use crate::domain::payment::{Amount, Currency, Payment, PaymentMethod, PaymentStatus};
use crate::domain::ports::{PageRequest, PaymentFilter, PaymentStoreRef};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;

/// Validated-input command for creating a payment.
///
/// Whatever status a caller might have supplied alongside these fields is
/// ignored; new payments always start out `Pending`.
#[derive(Debug, Clone)]
pub struct CreatePayment {
    pub reference: String,
    pub customer_id: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub method: PaymentMethod,
}

/// One page of results plus the total match count across all pages.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_count: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            0
        } else {
            self.total_count.div_ceil(u64::from(self.size))
        }
    }
}

/// Use-case layer for payment records.
///
/// Owns a handle to the payment store and exposes the four operations of the
/// service: create, find by id, filtered listing, and the guarded status
/// update.
pub struct PaymentService {
    store: PaymentStoreRef,
}

impl PaymentService {
    pub fn new(store: PaymentStoreRef) -> Self {
        Self { store }
    }

    /// Creates a new payment in `Pending` status.
    ///
    /// Input validation happens before any store interaction. The reference
    /// is pre-checked for uniqueness here; `save` enforces it again
    /// atomically, so two racing creates with the same reference end with
    /// exactly one success.
    pub async fn create(&self, command: CreatePayment) -> Result<Payment> {
        let reference = command.reference.trim();
        if reference.is_empty() {
            return Err(PaymentError::Validation(
                "Reference is required".to_string(),
            ));
        }
        let customer_id = command.customer_id.trim();
        if customer_id.is_empty() {
            return Err(PaymentError::Validation(
                "Customer id is required".to_string(),
            ));
        }
        let amount = Amount::new(command.amount)?;

        if self.store.exists_by_reference(reference).await? {
            tracing::warn!(reference, "rejected duplicate payment reference");
            return Err(PaymentError::DuplicateReference(reference.to_string()));
        }

        let payment = Payment::new(
            reference.to_string(),
            customer_id.to_string(),
            amount,
            command.currency,
            command.method,
        );
        let saved = self.store.save(payment).await?;
        tracing::info!(id = ?saved.id(), reference, "payment created");
        Ok(saved)
    }

    /// Looks up a payment by id. Absence is `Ok(None)`, not an error; the
    /// boundary decides whether that becomes a 404.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Payment>> {
        self.store.find_by_id(id).await
    }

    /// Lists payments matching the filter, one page at a time, together with
    /// the total match count so callers can derive the page count.
    pub async fn find_all(
        &self,
        filter: PaymentFilter,
        page: u32,
        size: u32,
    ) -> Result<Page<Payment>> {
        if size < 1 {
            return Err(PaymentError::Validation(
                "Page size must be at least 1".to_string(),
            ));
        }

        let request = PageRequest { page, size };
        let items = self.store.find_by_filters(&filter, &request).await?;
        let total_count = self.store.count_by_filters(&filter).await?;

        Ok(Page {
            items,
            page,
            size,
            total_count,
        })
    }

    /// Applies a status transition to an existing payment.
    ///
    /// Concurrent updates are serialized through the store's version check:
    /// when `save` reports a stale version, the payment is re-read and the
    /// transition re-applied once, so the loser of a race observes
    /// `InvalidTransition` against the winner's terminal state.
    pub async fn update_status(&self, id: i64, target: PaymentStatus) -> Result<Payment> {
        let mut payment = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(PaymentError::NotFound(id))?;

        payment.transition_to(target)?;

        match self.store.save(payment).await {
            Err(PaymentError::StaleVersion(_)) => {
                let mut fresh = self
                    .store
                    .find_by_id(id)
                    .await?
                    .ok_or(PaymentError::NotFound(id))?;
                fresh.transition_to(target)?;
                self.store.save(fresh).await
            }
            other => other,
        }
        .inspect(|updated| {
            tracing::info!(id, status = %updated.status(), "payment status updated");
        })
    }
}
