use crate::domain::payment::PaymentStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Payment with reference '{0}' already exists")]
    DuplicateReference(String),
    #[error("Payment with id {0} not found")]
    NotFound(i64),
    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },
    #[error("Payment {0} was modified concurrently")]
    StaleVersion(i64),
    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}
