//! Per-participant settlement: who paid what, who owes what

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::types::*;

/// Where a participant stands once all expenses are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceStatus {
    /// Paid more than their share; the group owes them
    Creditor,
    /// Paid less than their share; they owe the group
    Debtor,
    Settled,
}

/// Totals for one participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantBalance {
    pub participant: String,
    pub total_paid: BigDecimal,
    pub total_owed: BigDecimal,
    /// `total_paid - total_owed`
    pub balance: BigDecimal,
}

impl ParticipantBalance {
    fn new(participant: String) -> Self {
        Self {
            participant,
            total_paid: BigDecimal::from(0),
            total_owed: BigDecimal::from(0),
            balance: BigDecimal::from(0),
        }
    }

    pub fn status(&self) -> BalanceStatus {
        let zero = BigDecimal::from(0);
        if self.balance > zero {
            BalanceStatus::Creditor
        } else if self.balance < zero {
            BalanceStatus::Debtor
        } else {
            BalanceStatus::Settled
        }
    }
}

/// Settlement summary of a bill, one entry per participant in bill order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementSummary {
    pub bill_id: String,
    /// Sum of all expense amounts
    pub total_spent: BigDecimal,
    pub balances: Vec<ParticipantBalance>,
}

impl SettlementSummary {
    /// Look up a participant's totals by name
    pub fn get(&self, participant: &str) -> Option<&ParticipantBalance> {
        self.balances.iter().find(|b| b.participant == participant)
    }

    /// Name-keyed view of the balances
    pub fn by_participant(&self) -> HashMap<&str, &ParticipantBalance> {
        self.balances
            .iter()
            .map(|b| (b.participant.as_str(), b))
            .collect()
    }

    pub fn total_paid(&self) -> BigDecimal {
        self.balances.iter().map(|b| &b.total_paid).sum()
    }

    pub fn total_owed(&self) -> BigDecimal {
        self.balances.iter().map(|b| &b.total_owed).sum()
    }

    /// Whether balances sum to exactly zero
    pub fn is_balanced(&self) -> bool {
        let net: BigDecimal = self.balances.iter().map(|b| &b.balance).sum();
        net == BigDecimal::from(0)
    }

    /// Whether every participant is settled
    pub fn is_settled(&self) -> bool {
        self.balances
            .iter()
            .all(|b| b.status() == BalanceStatus::Settled)
    }
}

/// Split `total` evenly into `parts` shares at `scale` decimal places.
///
/// Every share gets `floor(total / parts)` at that scale; the leftover minor
/// units go one each to the first shares. Anything finer than a minor unit
/// is added to the first share, so the shares always sum to `total`.
pub fn allocate_even_split(total: &BigDecimal, parts: usize, scale: u32) -> Vec<BigDecimal> {
    if parts == 0 {
        return Vec::new();
    }

    let unit = BigDecimal::new(1.into(), i64::from(scale));
    let count = BigDecimal::from(parts as u64);
    let base = (total / &count).with_scale(i64::from(scale));

    let mut shares = vec![base.clone(); parts];
    let mut remainder = total - &base * &count;

    for share in shares.iter_mut() {
        if remainder < unit {
            break;
        }
        *share += &unit;
        remainder -= &unit;
    }

    if remainder != BigDecimal::from(0) {
        shares[0] += remainder;
    }

    shares
}

/// Compute paid, owed, and net balance for every participant of a bill.
///
/// Each expense credits its full amount to the payer and is split evenly
/// across `split_among`; leftover minor units of a split go to members in
/// bill participant order. Names that are not participants of the bill are
/// skipped.
pub fn compute_summary(details: &BillDetails, scale: u32) -> SettlementSummary {
    let bill = &details.bill;
    let mut balances: Vec<ParticipantBalance> = bill
        .participants
        .iter()
        .cloned()
        .map(ParticipantBalance::new)
        .collect();

    for expense in &details.expenses {
        match bill.participant_index(&expense.paid_by) {
            Some(i) => balances[i].total_paid += &expense.total_amount,
            None => warn!(
                bill_id = %bill.id,
                expense_id = %expense.id,
                paid_by = %expense.paid_by,
                "payer is not a participant, skipping"
            ),
        }

        let mut members: Vec<(Option<usize>, &String)> = expense
            .split_among
            .iter()
            .map(|name| (bill.participant_index(name), name))
            .collect();
        // Known participants in bill order first; unknown names keep their order
        members.sort_by_key(|(index, _)| index.unwrap_or(usize::MAX));

        let shares = allocate_even_split(&expense.total_amount, members.len(), scale);
        for ((index, name), share) in members.into_iter().zip(shares) {
            match index {
                Some(i) => balances[i].total_owed += share,
                None => warn!(
                    bill_id = %bill.id,
                    expense_id = %expense.id,
                    member = %name,
                    "split member is not a participant, skipping"
                ),
            }
        }
    }

    for entry in balances.iter_mut() {
        entry.balance = &entry.total_paid - &entry.total_owed;
    }

    let summary = SettlementSummary {
        bill_id: bill.id.clone(),
        total_spent: details.total_spent(),
        balances,
    };
    debug!(
        bill_id = %summary.bill_id,
        expenses = details.expenses.len(),
        total_spent = %summary.total_spent,
        "computed settlement summary"
    );
    summary
}
