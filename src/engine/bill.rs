//! Bill management functionality

use tracing::{debug, info, warn};

use crate::config::DeletePolicy;
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::normalize_participants;

/// Bill manager for handling bill lifecycle operations
pub struct BillManager<S: BillStorage> {
    pub(crate) storage: S,
    validator: Box<dyn BillValidator>,
    delete_policy: DeletePolicy,
}

impl<S: BillStorage> BillManager<S> {
    /// Create a new bill manager
    pub fn new(storage: S, delete_policy: DeletePolicy) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultBillValidator),
            delete_policy,
        }
    }

    /// Create a new bill manager with custom validator
    pub fn with_validator(
        storage: S,
        delete_policy: DeletePolicy,
        validator: Box<dyn BillValidator>,
    ) -> Self {
        Self {
            storage,
            validator,
            delete_policy,
        }
    }

    /// Create a new bill.
    ///
    /// The name and participant names are trimmed and duplicate
    /// participants dropped before validation.
    pub async fn create_bill<N: AsRef<str>>(
        &mut self,
        name: &str,
        participants: &[N],
    ) -> SettlementResult<Bill> {
        let name = name.trim();
        if name.is_empty() {
            warn!("rejected bill creation: empty name");
            return Err(SettlementError::invalid("name", "Bill name is required"));
        }

        let participants = normalize_participants(participants).inspect_err(|e| {
            warn!(error = %e, "rejected bill creation");
        })?;

        let bill = Bill::new(
            uuid::Uuid::new_v4().to_string(),
            name.to_string(),
            participants,
        );
        self.validator.validate_bill(&bill)?;

        self.storage.save_bill(&bill).await?;

        info!(
            bill_id = %bill.id,
            participants = bill.participants.len(),
            "bill created"
        );
        Ok(bill)
    }

    /// Get a bill by ID
    pub async fn get_bill(&self, bill_id: &str) -> SettlementResult<Option<Bill>> {
        self.storage.get_bill(bill_id).await
    }

    /// Get a bill by ID, returning an error if not found
    pub async fn get_bill_required(&self, bill_id: &str) -> SettlementResult<Bill> {
        self.storage
            .get_bill(bill_id)
            .await?
            .ok_or_else(|| SettlementError::BillNotFound(bill_id.to_string()))
    }

    /// Get a bill with all of its expenses
    pub async fn get_bill_details(&self, bill_id: &str) -> SettlementResult<BillDetails> {
        let bill = self.get_bill_required(bill_id).await?;
        let expenses = self.storage.get_bill_expenses(&bill.id).await?;
        debug!(bill_id, expenses = expenses.len(), "fetched bill");
        Ok(BillDetails { bill, expenses })
    }

    /// List all bills with their expenses
    pub async fn list_bills(&self) -> SettlementResult<Vec<BillDetails>> {
        let bills = self.storage.list_bills().await?;
        let mut details = Vec::with_capacity(bills.len());
        for bill in bills {
            let expenses = self.storage.get_bill_expenses(&bill.id).await?;
            details.push(BillDetails { bill, expenses });
        }
        debug!(count = details.len(), "listed bills");
        Ok(details)
    }

    /// Delete a bill according to the configured [`DeletePolicy`]
    pub async fn delete_bill(&mut self, bill_id: &str) -> SettlementResult<()> {
        if let Err(e) = self.storage.delete_bill(bill_id, self.delete_policy).await {
            if matches!(e, SettlementError::Conflict(_)) {
                warn!(bill_id, error = %e, "refusing to delete bill with expenses");
            }
            return Err(e);
        }
        info!(bill_id, policy = %self.delete_policy, "bill deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStorage;
    use async_trait::async_trait;
    use bigdecimal::BigDecimal;

    /// Storage whose bill deletion races with an expense insert that lands
    /// just before the delete commits
    #[derive(Clone)]
    struct LateExpenseStorage {
        inner: MemoryStorage,
    }

    #[async_trait]
    impl BillStorage for LateExpenseStorage {
        async fn save_bill(&mut self, bill: &Bill) -> SettlementResult<()> {
            self.inner.save_bill(bill).await
        }

        async fn get_bill(&self, bill_id: &str) -> SettlementResult<Option<Bill>> {
            self.inner.get_bill(bill_id).await
        }

        async fn list_bills(&self) -> SettlementResult<Vec<Bill>> {
            self.inner.list_bills().await
        }

        async fn delete_bill(&mut self, bill_id: &str, policy: DeletePolicy) -> SettlementResult<()> {
            let late = Expense::from_draft(
                "late".to_string(),
                bill_id.to_string(),
                ExpenseDraft::new("Late snack", BigDecimal::from(5), "A", vec!["A".to_string()]),
            );
            self.inner.save_expense(&late).await?;
            self.inner.delete_bill(bill_id, policy).await
        }

        async fn save_expense(&mut self, expense: &Expense) -> SettlementResult<()> {
            self.inner.save_expense(expense).await
        }

        async fn get_expense(&self, expense_id: &str) -> SettlementResult<Option<Expense>> {
            self.inner.get_expense(expense_id).await
        }

        async fn get_bill_expenses(&self, bill_id: &str) -> SettlementResult<Vec<Expense>> {
            self.inner.get_bill_expenses(bill_id).await
        }

        async fn update_expense(&mut self, expense: &Expense) -> SettlementResult<()> {
            self.inner.update_expense(expense).await
        }

        async fn delete_expense(&mut self, expense_id: &str) -> SettlementResult<()> {
            self.inner.delete_expense(expense_id).await
        }
    }

    #[tokio::test]
    async fn test_create_bill_normalizes_input() {
        let mut manager = BillManager::new(MemoryStorage::new(), DeletePolicy::Cascade);
        let bill = manager
            .create_bill("  Dinner ", &["A", " B", "A"])
            .await
            .unwrap();

        assert_eq!(bill.name, "Dinner");
        assert_eq!(bill.participants, vec!["A", "B"]);
        assert!(uuid::Uuid::parse_str(&bill.id).is_ok());

        let stored = manager.get_bill_required(&bill.id).await.unwrap();
        assert_eq!(stored, bill);
    }

    #[tokio::test]
    async fn test_create_bill_rejects_invalid_input() {
        let mut manager = BillManager::new(MemoryStorage::new(), DeletePolicy::Cascade);

        let err = manager.create_bill("  ", &["A"]).await.unwrap_err();
        assert_eq!(err.field(), Some("name"));

        let none: [&str; 0] = [];
        let err = manager.create_bill("Dinner", &none).await.unwrap_err();
        assert_eq!(err.field(), Some("participants"));

        assert!(manager.list_bills().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_bill_is_not_found() {
        let mut manager = BillManager::new(MemoryStorage::new(), DeletePolicy::Cascade);
        assert!(manager.get_bill("nope").await.unwrap().is_none());
        assert!(matches!(
            manager.get_bill_details("nope").await.unwrap_err(),
            SettlementError::BillNotFound(_)
        ));
        assert!(matches!(
            manager.delete_bill("nope").await.unwrap_err(),
            SettlementError::BillNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_restrict_policy_allows_deleting_empty_bill() {
        let mut manager = BillManager::new(MemoryStorage::new(), DeletePolicy::Restrict);
        let bill = manager.create_bill("Snacks", &["A"]).await.unwrap();
        manager.delete_bill(&bill.id).await.unwrap();
        assert!(manager.get_bill(&bill.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_restrict_policy_blocks_expense_added_just_before_delete() {
        let storage = LateExpenseStorage {
            inner: MemoryStorage::new(),
        };
        let mut manager = BillManager::new(storage.clone(), DeletePolicy::Restrict);
        let bill = manager.create_bill("Snacks", &["A"]).await.unwrap();
        assert_eq!(storage.inner.count_bill_expenses(&bill.id).await.unwrap(), 0);

        let err = manager.delete_bill(&bill.id).await.unwrap_err();
        assert!(matches!(err, SettlementError::Conflict(_)));

        assert!(manager.get_bill(&bill.id).await.unwrap().is_some());
        assert!(storage.inner.get_expense("late").await.unwrap().is_some());
    }
}
