//! Validation utilities

use bigdecimal::BigDecimal;
use std::collections::HashSet;

use crate::traits::*;
use crate::types::*;

/// Validate that a bill name is non-blank
pub fn validate_bill_name(name: &str) -> SettlementResult<()> {
    if name.trim().is_empty() {
        return Err(SettlementError::invalid("name", "Bill name is required"));
    }
    Ok(())
}

/// Validate a single participant name
pub fn validate_participant_name(name: &str) -> SettlementResult<()> {
    if name.trim().is_empty() {
        return Err(SettlementError::invalid(
            "participants",
            "Participant names must be non-empty",
        ));
    }
    Ok(())
}

/// Trim participant names and drop duplicates, keeping the first
/// occurrence of each name in its original position.
///
/// Blank names are rejected rather than dropped, and so is an empty result.
pub fn normalize_participants<S: AsRef<str>>(participants: &[S]) -> SettlementResult<Vec<String>> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(participants.len());

    for participant in participants {
        let name = participant.as_ref().trim();
        validate_participant_name(name)?;
        if seen.insert(name.to_string()) {
            normalized.push(name.to_string());
        }
    }

    if normalized.is_empty() {
        return Err(SettlementError::invalid(
            "participants",
            "At least one participant is required",
        ));
    }

    Ok(normalized)
}

/// Split a comma-separated list such as `"Dinnar, Nasywa, Farhan"` into
/// trimmed names, skipping blank segments.
pub fn parse_participants(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validate that an expense description is non-blank
pub fn validate_description(description: &str) -> SettlementResult<()> {
    if description.trim().is_empty() {
        return Err(SettlementError::invalid(
            "description",
            "Description is required",
        ));
    }
    Ok(())
}

/// Validate that a quantity is a positive integer
pub fn validate_quantity(quantity: u32) -> SettlementResult<()> {
    if quantity == 0 {
        return Err(SettlementError::invalid(
            "quantity",
            "Quantity must be a positive integer",
        ));
    }
    Ok(())
}

/// Validate that an amount is positive and has no more decimal places
/// than the currency minor unit allows
pub fn validate_total_amount(amount: &BigDecimal, scale: u32) -> SettlementResult<()> {
    if *amount <= BigDecimal::from(0) {
        return Err(SettlementError::invalid(
            "totalAmount",
            "Total amount must be a positive number",
        ));
    }

    if amount.with_scale(i64::from(scale)) != *amount {
        return Err(SettlementError::invalid(
            "totalAmount",
            format!("Total amount cannot have more than {} decimal places", scale),
        ));
    }

    Ok(())
}

/// Validate that the payer is a participant of the bill
pub fn validate_paid_by(paid_by: &str, bill: &Bill) -> SettlementResult<()> {
    let name = paid_by.trim();
    if name.is_empty() {
        return Err(SettlementError::invalid("paidBy", "Payer is required"));
    }
    if !bill.has_participant(name) {
        return Err(SettlementError::invalid(
            "paidBy",
            format!("'{}' is not a participant of this bill", name),
        ));
    }
    Ok(())
}

/// Validate the split members: non-empty, unique, all participants
pub fn validate_split_among<S: AsRef<str>>(split_among: &[S], bill: &Bill) -> SettlementResult<()> {
    if split_among.is_empty() {
        return Err(SettlementError::invalid(
            "splitAmong",
            "At least one participant must share the expense",
        ));
    }

    let mut seen = HashSet::new();
    for member in split_among {
        let name = member.as_ref().trim();
        if name.is_empty() {
            return Err(SettlementError::invalid(
                "splitAmong",
                "All participants in splitAmong must be non-empty",
            ));
        }
        if !bill.has_participant(name) {
            return Err(SettlementError::invalid(
                "splitAmong",
                format!("'{}' is not a participant of this bill", name),
            ));
        }
        if !seen.insert(name) {
            return Err(SettlementError::invalid(
                "splitAmong",
                format!("'{}' appears more than once", name),
            ));
        }
    }

    Ok(())
}

/// Trim the text fields of a draft so stored names match bill participants
pub fn normalize_draft(mut draft: ExpenseDraft) -> ExpenseDraft {
    draft.description = draft.description.trim().to_string();
    draft.paid_by = draft.paid_by.trim().to_string();
    draft.split_among = draft
        .split_among
        .iter()
        .map(|name| name.trim().to_string())
        .collect();
    draft
}

/// Bill validator adding length limits on top of the default rules
pub struct EnhancedBillValidator;

impl BillValidator for EnhancedBillValidator {
    fn validate_bill(&self, bill: &Bill) -> SettlementResult<()> {
        DefaultBillValidator.validate_bill(bill)?;

        if bill.name.len() > 100 {
            return Err(SettlementError::invalid(
                "name",
                "Bill name cannot exceed 100 characters",
            ));
        }

        if bill.participants.len() > 50 {
            return Err(SettlementError::invalid(
                "participants",
                "A bill cannot have more than 50 participants",
            ));
        }

        if bill.participants.iter().any(|p| p.len() > 50) {
            return Err(SettlementError::invalid(
                "participants",
                "Participant names cannot exceed 50 characters",
            ));
        }

        Ok(())
    }
}

/// Expense validator adding length limits on top of the default rules
pub struct EnhancedExpenseValidator;

impl ExpenseValidator for EnhancedExpenseValidator {
    fn validate_expense(
        &self,
        draft: &ExpenseDraft,
        bill: &Bill,
        scale: u32,
    ) -> SettlementResult<()> {
        validate_description(&draft.description)?;
        if draft.description.len() > 500 {
            return Err(SettlementError::invalid(
                "description",
                "Description cannot exceed 500 characters",
            ));
        }

        DefaultExpenseValidator.validate_expense(draft, bill, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn bill() -> Bill {
        Bill::new(
            "b1".to_string(),
            "Dinner".to_string(),
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
        )
    }

    #[test]
    fn test_normalize_participants_dedupes_in_order() {
        let names = normalize_participants(&[" A", "B ", "A", "C"]).unwrap();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_normalize_participants_rejects_blank_and_empty() {
        let err = normalize_participants(&["A", "  "]).unwrap_err();
        assert_eq!(err.field(), Some("participants"));

        let empty: [&str; 0] = [];
        let err = normalize_participants(&empty).unwrap_err();
        assert_eq!(err.field(), Some("participants"));
    }

    #[test]
    fn test_parse_participants_from_form_input() {
        assert_eq!(
            parse_participants("Dinnar, Nasywa, ,Farhan,"),
            vec!["Dinnar", "Nasywa", "Farhan"]
        );
        assert!(parse_participants(" , ").is_empty());
    }

    #[test]
    fn test_total_amount_rules() {
        assert!(validate_total_amount(&BigDecimal::from(90), 2).is_ok());
        assert!(validate_total_amount(&BigDecimal::from_str("12.50").unwrap(), 2).is_ok());

        let err = validate_total_amount(&BigDecimal::from(0), 2).unwrap_err();
        assert_eq!(err.field(), Some("totalAmount"));
        let err = validate_total_amount(&BigDecimal::from(-5), 2).unwrap_err();
        assert_eq!(err.field(), Some("totalAmount"));
        let err = validate_total_amount(&BigDecimal::from_str("1.005").unwrap(), 2).unwrap_err();
        assert_eq!(err.field(), Some("totalAmount"));
        let err = validate_total_amount(&BigDecimal::from_str("1.5").unwrap(), 0).unwrap_err();
        assert_eq!(err.field(), Some("totalAmount"));
    }

    #[test]
    fn test_validation_order_first_failure_wins() {
        let draft = ExpenseDraft::new("", BigDecimal::from(0), "D", vec![]).quantity(0);
        let err = DefaultExpenseValidator
            .validate_expense(&draft, &bill(), 2)
            .unwrap_err();
        assert_eq!(err.field(), Some("description"));

        let draft = ExpenseDraft::new("Food", BigDecimal::from(0), "D", vec![]).quantity(0);
        let err = DefaultExpenseValidator
            .validate_expense(&draft, &bill(), 2)
            .unwrap_err();
        assert_eq!(err.field(), Some("quantity"));

        let draft = ExpenseDraft::new("Food", BigDecimal::from(0), "D", vec![]);
        let err = DefaultExpenseValidator
            .validate_expense(&draft, &bill(), 2)
            .unwrap_err();
        assert_eq!(err.field(), Some("totalAmount"));

        let draft = ExpenseDraft::new("Food", BigDecimal::from(10), "D", vec![]);
        let err = DefaultExpenseValidator
            .validate_expense(&draft, &bill(), 2)
            .unwrap_err();
        assert_eq!(err.field(), Some("paidBy"));

        let draft = ExpenseDraft::new("Food", BigDecimal::from(10), "A", vec![]);
        let err = DefaultExpenseValidator
            .validate_expense(&draft, &bill(), 2)
            .unwrap_err();
        assert_eq!(err.field(), Some("splitAmong"));
    }

    #[test]
    fn test_split_among_rejects_outsiders_blanks_and_duplicates() {
        let b = bill();
        assert!(validate_split_among(&["A", "B"], &b).is_ok());
        assert!(validate_split_among(&["A", "D"], &b).is_err());
        assert!(validate_split_among(&["A", " "], &b).is_err());
        assert!(validate_split_among(&["A", "A"], &b).is_err());
    }

    #[test]
    fn test_enhanced_validators_enforce_lengths() {
        let long_name = Bill::new("b2".to_string(), "x".repeat(101), vec!["A".to_string()]);
        let err = EnhancedBillValidator.validate_bill(&long_name).unwrap_err();
        assert_eq!(err.field(), Some("name"));
        assert!(EnhancedBillValidator.validate_bill(&bill()).is_ok());

        let draft = ExpenseDraft::new("x".repeat(501), BigDecimal::from(1), "A", vec!["A".to_string()]);
        let err = EnhancedExpenseValidator
            .validate_expense(&draft, &bill(), 2)
            .unwrap_err();
        assert_eq!(err.field(), Some("description"));
    }
}
