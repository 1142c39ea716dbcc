//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::config::DeletePolicy;
use crate::types::*;
use crate::utils::validation::*;

/// Storage abstraction for bills and expenses
///
/// The engine works against any backend (PostgreSQL, SQLite, in-memory, ...)
/// implementing these methods. Each mutating call is expected to be atomic
/// on the backend side: the engine never issues compensating writes.
#[async_trait]
pub trait BillStorage: Send + Sync {
    /// Save a new bill
    async fn save_bill(&mut self, bill: &Bill) -> SettlementResult<()>;

    /// Get a bill by ID
    async fn get_bill(&self, bill_id: &str) -> SettlementResult<Option<Bill>>;

    /// List all bills, oldest first
    async fn list_bills(&self) -> SettlementResult<Vec<Bill>>;

    /// Delete a bill in one atomic step.
    ///
    /// With [`DeletePolicy::Cascade`] its expenses are removed too; with
    /// [`DeletePolicy::Restrict`] the call fails with `Conflict` if the bill
    /// has any expense at the moment of deletion.
    async fn delete_bill(&mut self, bill_id: &str, policy: DeletePolicy) -> SettlementResult<()>;

    /// Save a new expense. Fails with `BillNotFound` if the owning bill is gone.
    async fn save_expense(&mut self, expense: &Expense) -> SettlementResult<()>;

    /// Get an expense by ID
    async fn get_expense(&self, expense_id: &str) -> SettlementResult<Option<Expense>>;

    /// List the expenses of a bill, oldest first
    async fn get_bill_expenses(&self, bill_id: &str) -> SettlementResult<Vec<Expense>>;

    /// Count the expenses of a bill
    async fn count_bill_expenses(&self, bill_id: &str) -> SettlementResult<usize> {
        Ok(self.get_bill_expenses(bill_id).await?.len())
    }

    /// Update an existing expense
    async fn update_expense(&mut self, expense: &Expense) -> SettlementResult<()>;

    /// Delete an expense
    async fn delete_expense(&mut self, expense_id: &str) -> SettlementResult<()>;
}

/// Trait for implementing custom bill validation rules
pub trait BillValidator: Send + Sync {
    /// Validate a bill before saving
    fn validate_bill(&self, bill: &Bill) -> SettlementResult<()>;
}

/// Trait for implementing custom expense validation rules
pub trait ExpenseValidator: Send + Sync {
    /// Validate a draft against the bill it belongs to.
    ///
    /// `scale` is the number of decimal places of the currency minor unit.
    fn validate_expense(&self, draft: &ExpenseDraft, bill: &Bill, scale: u32)
        -> SettlementResult<()>;
}

/// Default bill validator with the basic data-model rules
pub struct DefaultBillValidator;

impl BillValidator for DefaultBillValidator {
    fn validate_bill(&self, bill: &Bill) -> SettlementResult<()> {
        validate_bill_name(&bill.name)?;

        if bill.participants.is_empty() {
            return Err(SettlementError::invalid(
                "participants",
                "At least one participant is required",
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for participant in &bill.participants {
            validate_participant_name(participant)?;
            if !seen.insert(participant.as_str()) {
                return Err(SettlementError::invalid(
                    "participants",
                    format!("Participant '{}' appears more than once", participant),
                ));
            }
        }

        Ok(())
    }
}

/// Default expense validator, checking fields in order:
/// description, quantity, total amount, payer, split members
pub struct DefaultExpenseValidator;

impl ExpenseValidator for DefaultExpenseValidator {
    fn validate_expense(
        &self,
        draft: &ExpenseDraft,
        bill: &Bill,
        scale: u32,
    ) -> SettlementResult<()> {
        validate_description(&draft.description)?;
        validate_quantity(draft.quantity)?;
        validate_total_amount(&draft.total_amount, scale)?;
        validate_paid_by(&draft.paid_by, bill)?;
        validate_split_among(&draft.split_among, bill)?;
        Ok(())
    }
}
