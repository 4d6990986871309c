//! The ledger store: member collection, mutation rules and persistence

use thiserror::Error;

use super::clock::{Clock, SystemClock};
use super::error::LedgerError;
use super::format::format_timestamp;
use super::models::{seed_members, validate_members, Member, DEFAULT_SEED};
use crate::data::{StateBackend, StorageError};

/// Key the member collection is stored under by default
pub const DEFAULT_STORAGE_KEY: &str = "users";

/// Where the ledger lives in its backend and what it starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSettings {
    /// Backend key holding the serialized members
    pub key: String,
    /// Member names used when nothing usable is stored
    pub seed: Vec<String>,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            seed: DEFAULT_SEED.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Reasons a stored snapshot cannot be used
#[derive(Error, Debug)]
enum SnapshotError {
    #[error("backend read failed: {0}")]
    Storage(#[from] StorageError),
    #[error("unparsable snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

/// Parse a user-entered amount.
///
/// Surrounding whitespace is ignored. Blank, unparsable, non-finite and
/// non-positive input is rejected.
pub fn parse_amount(raw: &str) -> Result<f64, LedgerError> {
    let invalid = || LedgerError::InvalidAmount {
        input: raw.to_string(),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }
    let amount: f64 = trimmed.parse().map_err(|_| invalid())?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(invalid());
    }
    Ok(amount)
}

/// Owner of the member collection.
///
/// Every mutation builds the next collection, writes it to the backend and
/// only then replaces the in-memory state, so the stored snapshot always
/// matches what callers observe.
pub struct Ledger {
    members: Vec<Member>,
    selected: Option<String>,
    backend: Box<dyn StateBackend>,
    settings: LedgerSettings,
    clock: Box<dyn Clock>,
}

impl Ledger {
    /// Load the ledger using the wall clock for timestamps
    pub fn load(backend: Box<dyn StateBackend>, settings: LedgerSettings) -> Self {
        Self::load_with_clock(backend, settings, Box::new(SystemClock))
    }

    /// Load the ledger from `backend`, falling back to the seed members when
    /// the stored value is missing, unreadable or invalid.
    pub fn load_with_clock(
        backend: Box<dyn StateBackend>,
        settings: LedgerSettings,
        clock: Box<dyn Clock>,
    ) -> Self {
        let members = match read_snapshot(backend.as_ref(), &settings.key) {
            Ok(Some(members)) => {
                tracing::info!(
                    backend = backend.name(),
                    key = %settings.key,
                    members = members.len(),
                    "Loaded ledger"
                );
                members
            }
            Ok(None) => {
                tracing::info!(
                    backend = backend.name(),
                    key = %settings.key,
                    "No stored ledger, starting from seed"
                );
                seed_members(&settings.seed)
            }
            Err(e) => {
                tracing::warn!(
                    backend = backend.name(),
                    key = %settings.key,
                    error = %e,
                    "Stored ledger unusable, starting from seed"
                );
                seed_members(&settings.seed)
            }
        };

        let selected = members.first().map(|m| m.name.clone());

        Self {
            members,
            selected,
            backend,
            settings,
            clock,
        }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Name of the selected member, if any
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn settings(&self) -> &LedgerSettings {
        &self.settings
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Sum of every member's savings
    pub fn total_savings(&self) -> f64 {
        self.members.iter().map(|m| m.savings).sum()
    }

    /// Make `name` the selected member
    pub fn select(&mut self, name: &str) -> Result<(), LedgerError> {
        if self.member(name).is_none() {
            return Err(LedgerError::MemberNotFound {
                name: name.to_string(),
            });
        }
        self.selected = Some(name.to_string());
        Ok(())
    }

    /// Add `raw_amount` to `target`'s savings. Returns the new balance.
    pub fn deposit(&mut self, target: &str, raw_amount: &str) -> Result<f64, LedgerError> {
        let amount = parse_amount(raw_amount)?;
        let Some(member) = self.member(target) else {
            return Err(LedgerError::MemberNotFound {
                name: target.to_string(),
            });
        };
        // A balance that overflows to infinity cannot be stored as JSON
        if !(member.savings + amount).is_finite() {
            return Err(LedgerError::InvalidAmount {
                input: raw_amount.to_string(),
            });
        }

        let timestamp = self.timestamp();
        let next = self
            .members
            .iter()
            .map(|m| {
                if m.name == target {
                    m.with_deposit(amount, timestamp.clone())
                } else {
                    m.clone()
                }
            })
            .collect();
        self.commit(next)?;

        let balance = self.member(target).map(|m| m.savings).unwrap_or_default();
        tracing::info!(member = %target, amount, balance, "Recorded deposit");
        Ok(balance)
    }

    /// Deposit into the selected member
    pub fn deposit_selected(&mut self, raw_amount: &str) -> Result<f64, LedgerError> {
        let target = self.selected.clone().ok_or(LedgerError::NoSelection)?;
        self.deposit(&target, raw_amount)
    }

    /// Zero every balance, recording a reset in each member's history
    pub fn reset_all(&mut self) -> Result<(), LedgerError> {
        let timestamp = self.timestamp();
        let next = self
            .members
            .iter()
            .map(|m| m.with_reset(timestamp.clone()))
            .collect();
        self.commit(next)?;

        tracing::info!(members = self.members.len(), "Reset all balances");
        Ok(())
    }

    /// Add a member with a zero balance. Returns the stored (trimmed) name.
    pub fn add_member(&mut self, raw_name: &str) -> Result<String, LedgerError> {
        let name = raw_name.trim();
        if name.is_empty() || self.member(name).is_some() {
            return Err(LedgerError::DuplicateOrInvalidName {
                name: raw_name.to_string(),
            });
        }

        let mut next = self.members.clone();
        next.push(Member::new(name));
        self.commit(next)?;

        tracing::info!(member = %name, "Added member");
        Ok(name.to_string())
    }

    /// Remove `name` and return its final record.
    ///
    /// Removing the selected member moves the selection to the first
    /// remaining member, or clears it when none remain.
    pub fn remove_member(&mut self, name: &str) -> Result<Member, LedgerError> {
        let index = self
            .members
            .iter()
            .position(|m| m.name == name)
            .ok_or_else(|| LedgerError::MemberNotFound {
                name: name.to_string(),
            })?;

        let mut next = self.members.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        if self.selected.as_deref() == Some(name) {
            self.selected = self.members.first().map(|m| m.name.clone());
        }

        tracing::info!(member = %name, savings = removed.savings, "Removed member");
        Ok(removed)
    }

    fn timestamp(&self) -> String {
        format_timestamp(&self.clock.now())
    }

    /// Write `members` to the backend, then adopt them as the current state
    fn commit(&mut self, members: Vec<Member>) -> Result<(), LedgerError> {
        let snapshot = serde_json::to_string(&members).map_err(StorageError::from)?;
        if let Err(e) = self.backend.write(&self.settings.key, &snapshot) {
            tracing::error!(
                backend = self.backend.name(),
                key = %self.settings.key,
                error = %e,
                "Failed to persist ledger"
            );
            return Err(e.into());
        }
        self.members = members;
        Ok(())
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("members", &self.members)
            .field("selected", &self.selected)
            .field("backend", &self.backend.name())
            .field("settings", &self.settings)
            .finish()
    }
}

fn read_snapshot(
    backend: &dyn StateBackend,
    key: &str,
) -> Result<Option<Vec<Member>>, SnapshotError> {
    let Some(raw) = backend.read(key)? else {
        return Ok(None);
    };
    let members: Vec<Member> = serde_json::from_str(&raw)?;
    validate_members(&members).map_err(SnapshotError::Invalid)?;
    Ok(Some(members))
}
