use crate::error::{PaymentError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a positive monetary amount.
///
/// This is a wrapper around `rust_decimal::Decimal` that guarantees the
/// amount is strictly greater than zero. `Amount::new` is the only way to
/// construct one.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::Validation(
                "Amount must be greater than zero".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Cop,
    Usd,
    Eur,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Card,
    Pse,
    Transfer,
}

/// Lifecycle status of a payment.
///
/// `Pending` is the initial state; `Approved` and `Rejected` are terminal.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
}

impl PaymentStatus {
    /// Terminal states have no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        };
        write!(f, "{}", name)
    }
}

/// A payment record.
///
/// Every payment starts out `Pending`; the only way to change its status is
/// [`Payment::transition_to`], which permits exactly one move into a terminal
/// state. All fields are immutable after creation apart from the guarded
/// status. The id is assigned by the store on first save, and the version
/// stamp is managed by the store for optimistic locking.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    id: Option<i64>,
    reference: String,
    customer_id: String,
    amount: Amount,
    currency: Currency,
    method: PaymentMethod,
    status: PaymentStatus,
    created_at: DateTime<Utc>,
    version: u64,
}

impl Payment {
    /// Creates a new payment in `Pending` status, stamped with the current
    /// time. The id stays unset until the store persists it.
    pub fn new(
        reference: String,
        customer_id: String,
        amount: Amount,
        currency: Currency,
        method: PaymentMethod,
    ) -> Self {
        Self {
            id: None,
            reference,
            customer_id,
            amount,
            currency,
            method,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
            version: 0,
        }
    }

    /// Moves the payment into `target` if the transition is legal.
    ///
    /// Only `Pending -> Approved` and `Pending -> Rejected` are allowed.
    /// Every other combination fails with `InvalidTransition` and leaves the
    /// status untouched, so repeated illegal calls keep yielding the same
    /// error.
    pub fn transition_to(&mut self, target: PaymentStatus) -> Result<()> {
        if self.can_transition_to(target) {
            self.status = target;
            Ok(())
        } else {
            Err(PaymentError::InvalidTransition {
                from: self.status,
                to: target,
            })
        }
    }

    /// Checks whether `transition_to(target)` would succeed, without
    /// mutating anything.
    pub fn can_transition_to(&self, target: PaymentStatus) -> bool {
        self.status == PaymentStatus::Pending && target.is_terminal()
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Assigns the store-generated id on first persistence. Ignored once set.
    pub(crate) fn assign_id(&mut self, id: i64) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }
}
