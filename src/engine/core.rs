//! Settlement engine orchestrating bills, expenses, and summaries

use crate::config::EngineConfig;
use crate::engine::{BillManager, ExpenseManager};
use crate::settlement::format::CurrencyFormat;
use crate::settlement::summary::{compute_summary, SettlementSummary};
use crate::traits::*;
use crate::types::*;

/// Main engine exposing every bill, expense, and settlement operation.
///
/// The engine keeps no state between calls besides its storage handle and
/// configuration; every operation reads current data from storage.
pub struct SettlementEngine<S: BillStorage> {
    bill_manager: BillManager<S>,
    expense_manager: ExpenseManager<S>,
    config: EngineConfig,
}

impl<S: BillStorage + Clone> SettlementEngine<S> {
    /// Create a new engine with the given storage backend and default settings
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, EngineConfig::default())
    }

    /// Create a new engine with explicit settings
    pub fn with_config(storage: S, config: EngineConfig) -> Self {
        Self {
            bill_manager: BillManager::new(storage.clone(), config.delete_policy),
            expense_manager: ExpenseManager::new(storage, config.scale()),
            config,
        }
    }

    /// Create a new engine with custom validators
    pub fn with_validators(
        storage: S,
        config: EngineConfig,
        bill_validator: Box<dyn BillValidator>,
        expense_validator: Box<dyn ExpenseValidator>,
    ) -> Self {
        Self {
            bill_manager: BillManager::with_validator(
                storage.clone(),
                config.delete_policy,
                bill_validator,
            ),
            expense_manager: ExpenseManager::with_validator(
                storage,
                config.scale(),
                expense_validator,
            ),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Currency used for display of amounts
    pub fn currency(&self) -> &CurrencyFormat {
        &self.config.currency
    }

    // Bill operations
    /// Create a new bill
    pub async fn create_bill<N: AsRef<str>>(
        &mut self,
        name: &str,
        participants: &[N],
    ) -> SettlementResult<Bill> {
        self.bill_manager.create_bill(name, participants).await
    }

    /// Get a bill with all of its expenses
    pub async fn get_bill(&self, bill_id: &str) -> SettlementResult<BillDetails> {
        self.bill_manager.get_bill_details(bill_id).await
    }

    /// List all bills with their expenses
    pub async fn list_bills(&self) -> SettlementResult<Vec<BillDetails>> {
        self.bill_manager.list_bills().await
    }

    /// Delete a bill
    pub async fn delete_bill(&mut self, bill_id: &str) -> SettlementResult<()> {
        self.bill_manager.delete_bill(bill_id).await
    }

    // Expense operations
    /// Add an expense to a bill
    pub async fn add_expense(
        &mut self,
        bill_id: &str,
        draft: ExpenseDraft,
    ) -> SettlementResult<Expense> {
        self.expense_manager.add_expense(bill_id, draft).await
    }

    /// Get an expense by ID
    pub async fn get_expense(&self, expense_id: &str) -> SettlementResult<Expense> {
        self.expense_manager.get_expense_required(expense_id).await
    }

    /// Update an expense
    pub async fn update_expense(
        &mut self,
        expense_id: &str,
        draft: ExpenseDraft,
    ) -> SettlementResult<Expense> {
        self.expense_manager.update_expense(expense_id, draft).await
    }

    /// Delete an expense
    pub async fn delete_expense(&mut self, expense_id: &str) -> SettlementResult<()> {
        self.expense_manager.delete_expense(expense_id).await
    }

    // Settlement
    /// Compute the settlement summary of a stored bill
    pub async fn compute_summary(&self, bill_id: &str) -> SettlementResult<SettlementSummary> {
        let details = self.get_bill(bill_id).await?;
        Ok(self.summarize(&details))
    }

    /// Compute the settlement summary of a bill already in hand
    pub fn summarize(&self, details: &BillDetails) -> SettlementSummary {
        compute_summary(details, self.config.scale())
    }
}
