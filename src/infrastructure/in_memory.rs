use crate::domain::payment::Payment;
use crate::domain::ports::{PageRequest, PaymentFilter, PaymentStore};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct State {
    next_id: i64,
    payments: BTreeMap<i64, Payment>,
}

/// A thread-safe in-memory payment store.
///
/// Uses `Arc<RwLock<BTreeMap<i64, Payment>>>` for shared concurrent access;
/// the BTreeMap keeps payments ordered by id, so listings are stable across
/// pages. Ideal for tests and as the reference implementation of the store
/// contract.
///
/// `save` holds the write lock across the duplicate-reference check and the
/// insert, and across the version check and the update, which is what makes
/// both operations atomic with respect to concurrent callers.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryPaymentStore {
    /// Creates a new, empty in-memory payment store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn save(&self, mut payment: Payment) -> Result<Payment> {
        let mut state = self.state.write().await;

        match payment.id() {
            None => {
                if state
                    .payments
                    .values()
                    .any(|p| p.reference() == payment.reference())
                {
                    return Err(PaymentError::DuplicateReference(
                        payment.reference().to_string(),
                    ));
                }
                state.next_id += 1;
                let id = state.next_id;
                payment.assign_id(id);
                state.payments.insert(id, payment.clone());
                Ok(payment)
            }
            Some(id) => {
                let current = state
                    .payments
                    .get(&id)
                    .ok_or(PaymentError::NotFound(id))?;
                if current.version() != payment.version() {
                    return Err(PaymentError::StaleVersion(id));
                }
                payment.bump_version();
                state.payments.insert(id, payment.clone());
                Ok(payment)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Payment>> {
        let state = self.state.read().await;
        Ok(state.payments.get(&id).cloned())
    }

    async fn exists_by_reference(&self, reference: &str) -> Result<bool> {
        let state = self.state.read().await;
        Ok(state.payments.values().any(|p| p.reference() == reference))
    }

    async fn find_by_filters(
        &self,
        filter: &PaymentFilter,
        page: &PageRequest,
    ) -> Result<Vec<Payment>> {
        let state = self.state.read().await;
        let offset = page.page as usize * page.size as usize;
        Ok(state
            .payments
            .values()
            .filter(|p| filter.matches(p))
            .skip(offset)
            .take(page.size as usize)
            .cloned()
            .collect())
    }

    async fn count_by_filters(&self, filter: &PaymentFilter) -> Result<u64> {
        let state = self.state.read().await;
        Ok(state.payments.values().filter(|p| filter.matches(p)).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{Amount, Currency, PaymentMethod, PaymentStatus};
    use rust_decimal_macros::dec;

    fn payment(reference: &str, customer_id: &str) -> Payment {
        Payment::new(
            reference.to_string(),
            customer_id.to_string(),
            Amount::new(dec!(50.00)).unwrap(),
            Currency::Eur,
            PaymentMethod::Transfer,
        )
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let store = InMemoryPaymentStore::new();

        let first = store.save(payment("PAY-1", "C-1")).await.unwrap();
        let second = store.save(payment("PAY-2", "C-1")).await.unwrap();

        assert_eq!(first.id(), Some(1));
        assert_eq!(second.id(), Some(2));
    }

    #[tokio::test]
    async fn test_save_enforces_reference_uniqueness() {
        let store = InMemoryPaymentStore::new();
        store.save(payment("PAY-1", "C-1")).await.unwrap();

        let result = store.save(payment("PAY-1", "C-2")).await;
        assert!(matches!(result, Err(PaymentError::DuplicateReference(r)) if r == "PAY-1"));

        // The losing save wrote nothing.
        let filter = PaymentFilter::default();
        assert_eq!(store.count_by_filters(&filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_rejects_stale_version() {
        let store = InMemoryPaymentStore::new();
        let saved = store.save(payment("PAY-1", "C-1")).await.unwrap();
        let id = saved.id().unwrap();

        let mut winner = store.find_by_id(id).await.unwrap().unwrap();
        let mut loser = store.find_by_id(id).await.unwrap().unwrap();

        winner.transition_to(PaymentStatus::Approved).unwrap();
        store.save(winner).await.unwrap();

        loser.transition_to(PaymentStatus::Rejected).unwrap();
        let result = store.save(loser).await;
        assert!(matches!(result, Err(PaymentError::StaleVersion(i)) if i == id));

        // The winner's transition is what persisted.
        let stored = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status(), PaymentStatus::Approved);
    }

    #[tokio::test]
    async fn test_exists_by_reference() {
        let store = InMemoryPaymentStore::new();
        store.save(payment("PAY-1", "C-1")).await.unwrap();

        assert!(store.exists_by_reference("PAY-1").await.unwrap());
        assert!(!store.exists_by_reference("PAY-2").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_filters_pages_in_id_order() {
        let store = InMemoryPaymentStore::new();
        for i in 1..=5 {
            store
                .save(payment(&format!("PAY-{i}"), "C-1"))
                .await
                .unwrap();
        }

        let filter = PaymentFilter::default();
        let page = store
            .find_by_filters(&filter, &PageRequest { page: 1, size: 2 })
            .await
            .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page[0].reference(), "PAY-3");
        assert_eq!(page[1].reference(), "PAY-4");
    }

    #[tokio::test]
    async fn test_count_by_filters_respects_filter() {
        let store = InMemoryPaymentStore::new();
        store.save(payment("PAY-1", "C-1")).await.unwrap();
        store.save(payment("PAY-2", "C-2")).await.unwrap();

        let filter = PaymentFilter {
            customer_id: Some("C-2".to_string()),
            ..Default::default()
        };
        assert_eq!(store.count_by_filters(&filter).await.unwrap(), 1);
        assert_eq!(
            store
                .count_by_filters(&PaymentFilter::default())
                .await
                .unwrap(),
            2
        );
    }
}
