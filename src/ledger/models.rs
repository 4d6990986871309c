//! Member records and their transaction history

use serde::{Deserialize, Serialize};

/// Members used when nothing usable is stored
pub const DEFAULT_SEED: &[&str] = &["Ali", "Budi", "Citra"];

/// A single immutable history entry.
///
/// Serialized with a `type` tag and the timestamp under `date`, which keeps
/// snapshots readable by older versions of the stored format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transaction {
    Deposit {
        amount: f64,
        #[serde(rename = "date")]
        timestamp: String,
    },
    Reset {
        #[serde(rename = "date")]
        timestamp: String,
    },
}

impl Transaction {
    pub fn timestamp(&self) -> &str {
        match self {
            Transaction::Deposit { timestamp, .. } | Transaction::Reset { timestamp } => timestamp,
        }
    }

    /// Deposited amount, `None` for resets
    pub fn amount(&self) -> Option<f64> {
        match self {
            Transaction::Deposit { amount, .. } => Some(*amount),
            Transaction::Reset { .. } => None,
        }
    }

    pub fn is_reset(&self) -> bool {
        matches!(self, Transaction::Reset { .. })
    }
}

/// A named participant with a balance and history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub savings: f64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Member {
    /// New member with a zero balance and no history
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            savings: 0.0,
            transactions: Vec::new(),
        }
    }

    /// Copy of this member with a deposit applied
    pub(crate) fn with_deposit(&self, amount: f64, timestamp: String) -> Self {
        let mut transactions = self.transactions.clone();
        transactions.push(Transaction::Deposit { amount, timestamp });
        Self {
            name: self.name.clone(),
            savings: self.savings + amount,
            transactions,
        }
    }

    /// Copy of this member with the balance reset
    pub(crate) fn with_reset(&self, timestamp: String) -> Self {
        let mut transactions = self.transactions.clone();
        transactions.push(Transaction::Reset { timestamp });
        Self {
            name: self.name.clone(),
            savings: 0.0,
            transactions,
        }
    }

    /// Sum of deposits recorded after the most recent reset
    pub fn deposits_since_reset(&self) -> f64 {
        self.transactions
            .iter()
            .rev()
            .take_while(|tx| !tx.is_reset())
            .filter_map(Transaction::amount)
            .sum()
    }
}

/// Build the seed collection from configured names.
///
/// Names are trimmed; blanks and repeats are skipped.
pub fn seed_members<S: AsRef<str>>(names: &[S]) -> Vec<Member> {
    let mut members: Vec<Member> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() || members.iter().any(|m| m.name == name) {
            continue;
        }
        members.push(Member::new(name));
    }
    members
}

/// Check a loaded collection against the ledger invariants
pub fn validate_members(members: &[Member]) -> Result<(), String> {
    for (index, member) in members.iter().enumerate() {
        if member.name.trim().is_empty() || member.name.trim() != member.name {
            return Err(format!("member #{index} has an invalid name"));
        }
        if members[..index].iter().any(|m| m.name == member.name) {
            return Err(format!("duplicate member '{}'", member.name));
        }
        if !member.savings.is_finite() || member.savings < 0.0 {
            return Err(format!("member '{}' has invalid savings", member.name));
        }
        let bad_deposit = member
            .transactions
            .iter()
            .filter_map(Transaction::amount)
            .any(|amount| !amount.is_finite() || amount <= 0.0);
        if bad_deposit {
            return Err(format!("member '{}' has an invalid deposit", member.name));
        }
    }
    Ok(())
}
