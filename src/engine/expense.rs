//! Expense processing and management

use tracing::{info, warn};

use crate::traits::*;
use crate::types::*;
use crate::utils::validation::normalize_draft;

/// Expense manager for handling expense lifecycle operations
pub struct ExpenseManager<S: BillStorage> {
    storage: S,
    validator: Box<dyn ExpenseValidator>,
    scale: u32,
}

impl<S: BillStorage> ExpenseManager<S> {
    /// Create a new expense manager for a currency with `scale` decimal places
    pub fn new(storage: S, scale: u32) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultExpenseValidator),
            scale,
        }
    }

    /// Create a new expense manager with custom validator
    pub fn with_validator(storage: S, scale: u32, validator: Box<dyn ExpenseValidator>) -> Self {
        Self {
            storage,
            validator,
            scale,
        }
    }

    async fn bill_required(&self, bill_id: &str) -> SettlementResult<Bill> {
        self.storage
            .get_bill(bill_id)
            .await?
            .ok_or_else(|| SettlementError::BillNotFound(bill_id.to_string()))
    }

    fn validate(&self, draft: ExpenseDraft, bill: &Bill) -> SettlementResult<ExpenseDraft> {
        let draft = normalize_draft(draft);
        if let Err(e) = self.validator.validate_expense(&draft, bill, self.scale) {
            warn!(bill_id = %bill.id, error = %e, "rejected expense");
            return Err(e);
        }
        Ok(draft)
    }

    /// Add an expense to a bill.
    ///
    /// The bill must exist; the draft is then validated field by field and
    /// nothing is written unless every check passes.
    pub async fn add_expense(
        &mut self,
        bill_id: &str,
        draft: ExpenseDraft,
    ) -> SettlementResult<Expense> {
        let bill = self.bill_required(bill_id).await?;
        let draft = self.validate(draft, &bill)?;

        let expense = Expense::from_draft(uuid::Uuid::new_v4().to_string(), bill.id, draft);
        self.storage.save_expense(&expense).await?;

        info!(
            bill_id = %expense.bill_id,
            expense_id = %expense.id,
            total_amount = %expense.total_amount,
            "expense added"
        );
        Ok(expense)
    }

    /// Get an expense by ID
    pub async fn get_expense(&self, expense_id: &str) -> SettlementResult<Option<Expense>> {
        self.storage.get_expense(expense_id).await
    }

    /// Get an expense by ID, returning an error if not found
    pub async fn get_expense_required(&self, expense_id: &str) -> SettlementResult<Expense> {
        self.storage
            .get_expense(expense_id)
            .await?
            .ok_or_else(|| SettlementError::ExpenseNotFound(expense_id.to_string()))
    }

    /// Replace the mutable fields of an expense. Validation runs against the
    /// bill the expense already belongs to.
    pub async fn update_expense(
        &mut self,
        expense_id: &str,
        draft: ExpenseDraft,
    ) -> SettlementResult<Expense> {
        let mut expense = self.get_expense_required(expense_id).await?;
        let bill = self.bill_required(&expense.bill_id).await?;
        let draft = self.validate(draft, &bill)?;

        expense.apply_draft(draft);
        self.storage.update_expense(&expense).await?;

        info!(
            bill_id = %expense.bill_id,
            expense_id = %expense.id,
            total_amount = %expense.total_amount,
            "expense updated"
        );
        Ok(expense)
    }

    /// Delete an expense
    pub async fn delete_expense(&mut self, expense_id: &str) -> SettlementResult<()> {
        let expense = self.get_expense_required(expense_id).await?;
        self.storage.delete_expense(expense_id).await?;
        info!(bill_id = %expense.bill_id, expense_id, "expense deleted");
        Ok(())
    }
}
