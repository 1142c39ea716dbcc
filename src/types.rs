//! Core types and data structures for the settlement engine

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A named group expense ledger with a fixed set of participants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Unique identifier for the bill
    pub id: String,
    /// Display name of the bill
    pub name: String,
    /// Participant names, unique, in display order
    pub participants: Vec<String>,
    /// When the bill was created
    pub created_at: NaiveDateTime,
    /// When the bill was last updated
    pub updated_at: NaiveDateTime,
}

impl Bill {
    /// Create a new bill. Inputs are expected to be normalized already.
    pub fn new(id: String, name: String, participants: Vec<String>) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id,
            name,
            participants,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `name` is one of this bill's participants
    pub fn has_participant(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p == name)
    }

    /// Position of a participant in display order
    pub fn participant_index(&self, name: &str) -> Option<usize> {
        self.participants.iter().position(|p| p == name)
    }
}

/// One charge within a bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier for the expense
    pub id: String,
    /// Owning bill
    pub bill_id: String,
    /// What was bought
    pub description: String,
    /// Number of units. Informational only, never applied in settlement.
    pub quantity: u32,
    /// Full charged amount, already multiplied by quantity
    pub total_amount: BigDecimal,
    /// Participant who paid
    pub paid_by: String,
    /// Participants sharing the cost evenly
    pub split_among: Vec<String>,
    /// When the expense was created
    pub created_at: NaiveDateTime,
    /// When the expense was last updated
    pub updated_at: NaiveDateTime,
}

impl Expense {
    /// Create a new expense under `bill_id` from a validated draft
    pub fn from_draft(id: String, bill_id: String, draft: ExpenseDraft) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id,
            bill_id,
            description: draft.description,
            quantity: draft.quantity,
            total_amount: draft.total_amount,
            paid_by: draft.paid_by,
            split_among: draft.split_among,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the mutable fields with those of a validated draft
    pub fn apply_draft(&mut self, draft: ExpenseDraft) {
        self.description = draft.description;
        self.quantity = draft.quantity;
        self.total_amount = draft.total_amount;
        self.paid_by = draft.paid_by;
        self.split_among = draft.split_among;
        self.updated_at = chrono::Utc::now().naive_utc();
    }
}

/// The mutable fields of an expense, as supplied by a caller for
/// creation or update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    pub description: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub total_amount: BigDecimal,
    pub paid_by: String,
    pub split_among: Vec<String>,
}

fn default_quantity() -> u32 {
    1
}

impl ExpenseDraft {
    /// Create a draft with a quantity of one
    pub fn new(
        description: impl Into<String>,
        total_amount: BigDecimal,
        paid_by: impl Into<String>,
        split_among: Vec<String>,
    ) -> Self {
        Self {
            description: description.into(),
            quantity: default_quantity(),
            total_amount,
            paid_by: paid_by.into(),
            split_among,
        }
    }

    /// Set the quantity
    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

/// A bill together with all of its expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillDetails {
    #[serde(flatten)]
    pub bill: Bill,
    pub expenses: Vec<Expense>,
}

impl BillDetails {
    /// Sum of all expense amounts
    pub fn total_spent(&self) -> BigDecimal {
        self.expenses.iter().map(|e| &e.total_amount).sum()
    }
}

/// Broad classes of failure, used by callers to pick a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    ConflictOrConstraint,
    StorageFailure,
}

/// Errors that can occur in the settlement engine
#[derive(Debug, thiserror::Error)]
pub enum SettlementError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid {field}: {message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },
    #[error("Bill not found: {0}")]
    BillNotFound(String),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl SettlementError {
    /// Shorthand for an `InvalidArgument` error
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        SettlementError::InvalidArgument {
            field,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SettlementError::Storage(_) => ErrorKind::StorageFailure,
            SettlementError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            SettlementError::BillNotFound(_) | SettlementError::ExpenseNotFound(_) => {
                ErrorKind::NotFound
            }
            SettlementError::Conflict(_) => ErrorKind::ConflictOrConstraint,
        }
    }

    /// The offending field for `InvalidArgument` errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            SettlementError::InvalidArgument { field, .. } => Some(field),
            _ => None,
        }
    }

    /// HTTP status a transport layer should answer with
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::InvalidArgument => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::ConflictOrConstraint => 409,
            ErrorKind::StorageFailure => 500,
        }
    }
}

/// Result type for settlement operations
pub type SettlementResult<T> = Result<T, SettlementError>;
