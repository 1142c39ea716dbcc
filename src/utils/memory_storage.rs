//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::DeletePolicy;
use crate::traits::*;
use crate::types::*;

#[derive(Debug, Default)]
struct Tables {
    bills: HashMap<String, Bill>,
    expenses: HashMap<String, Expense>,
}

/// In-memory storage implementation for testing and development.
///
/// Both tables sit behind one lock, so every call is a single atomic step.
/// Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> SettlementResult<()> {
        let mut tables = self.write()?;
        tables.bills.clear();
        tables.expenses.clear();
        Ok(())
    }

    /// Number of stored expenses across all bills
    pub fn expense_count(&self) -> SettlementResult<usize> {
        Ok(self.read()?.expenses.len())
    }

    fn read(&self) -> SettlementResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| SettlementError::Storage("memory storage lock poisoned".to_string()))
    }

    fn write(&self) -> SettlementResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| SettlementError::Storage("memory storage lock poisoned".to_string()))
    }
}

fn oldest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::NaiveDateTime, String)) {
    items.sort_by_cached_key(key);
}

#[async_trait]
impl BillStorage for MemoryStorage {
    async fn save_bill(&mut self, bill: &Bill) -> SettlementResult<()> {
        let mut tables = self.write()?;
        if tables.bills.contains_key(&bill.id) {
            return Err(SettlementError::Storage(format!(
                "bill '{}' already exists",
                bill.id
            )));
        }
        tables.bills.insert(bill.id.clone(), bill.clone());
        Ok(())
    }

    async fn get_bill(&self, bill_id: &str) -> SettlementResult<Option<Bill>> {
        Ok(self.read()?.bills.get(bill_id).cloned())
    }

    async fn list_bills(&self) -> SettlementResult<Vec<Bill>> {
        let mut bills: Vec<Bill> = self.read()?.bills.values().cloned().collect();
        oldest_first(&mut bills, |b| (b.created_at, b.id.clone()));
        Ok(bills)
    }

    async fn delete_bill(&mut self, bill_id: &str, policy: DeletePolicy) -> SettlementResult<()> {
        let mut tables = self.write()?;
        if !tables.bills.contains_key(bill_id) {
            return Err(SettlementError::BillNotFound(bill_id.to_string()));
        }

        let expenses = tables
            .expenses
            .values()
            .filter(|expense| expense.bill_id == bill_id)
            .count();
        if policy == DeletePolicy::Restrict && expenses > 0 {
            return Err(SettlementError::Conflict(format!(
                "Bill '{}' still has {} expense(s)",
                bill_id, expenses
            )));
        }

        tables.bills.remove(bill_id);
        tables.expenses.retain(|_, expense| expense.bill_id != bill_id);
        Ok(())
    }

    async fn save_expense(&mut self, expense: &Expense) -> SettlementResult<()> {
        let mut tables = self.write()?;
        if !tables.bills.contains_key(&expense.bill_id) {
            return Err(SettlementError::BillNotFound(expense.bill_id.clone()));
        }
        if tables.expenses.contains_key(&expense.id) {
            return Err(SettlementError::Storage(format!(
                "expense '{}' already exists",
                expense.id
            )));
        }
        tables.expenses.insert(expense.id.clone(), expense.clone());
        Ok(())
    }

    async fn get_expense(&self, expense_id: &str) -> SettlementResult<Option<Expense>> {
        Ok(self.read()?.expenses.get(expense_id).cloned())
    }

    async fn get_bill_expenses(&self, bill_id: &str) -> SettlementResult<Vec<Expense>> {
        let mut expenses: Vec<Expense> = self
            .read()?
            .expenses
            .values()
            .filter(|expense| expense.bill_id == bill_id)
            .cloned()
            .collect();
        oldest_first(&mut expenses, |e| (e.created_at, e.id.clone()));
        Ok(expenses)
    }

    async fn count_bill_expenses(&self, bill_id: &str) -> SettlementResult<usize> {
        Ok(self
            .read()?
            .expenses
            .values()
            .filter(|expense| expense.bill_id == bill_id)
            .count())
    }

    async fn update_expense(&mut self, expense: &Expense) -> SettlementResult<()> {
        let mut tables = self.write()?;
        match tables.expenses.get_mut(&expense.id) {
            Some(existing) => {
                *existing = expense.clone();
                Ok(())
            }
            None => Err(SettlementError::ExpenseNotFound(expense.id.clone())),
        }
    }

    async fn delete_expense(&mut self, expense_id: &str) -> SettlementResult<()> {
        if self.write()?.expenses.remove(expense_id).is_some() {
            Ok(())
        } else {
            Err(SettlementError::ExpenseNotFound(expense_id.to_string()))
        }
    }
}
