//! Tenant lookup seam.
//!
//! Operations that resolve a tenant by id go through [`TenantDirectory`].
//! Callers back it with whatever rows they already fetched; [`TenantBook`]
//! is the in-memory implementation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use rentcycle_core::types::{PaymentRow, TenantId, TenantSnapshot};
use rentcycle_core::{RentError, RentResult};

/// A tenant snapshot together with its ledger rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantLedger {
    /// Occupancy snapshot.
    pub tenant: TenantSnapshot,
    /// Rent, advance and refund rows.
    #[serde(default)]
    pub payments: Vec<PaymentRow>,
}

impl TenantLedger {
    /// Creates a ledger entry.
    #[must_use]
    pub fn new(tenant: TenantSnapshot, payments: Vec<PaymentRow>) -> Self {
        Self { tenant, payments }
    }
}

/// Resolves tenant ids to snapshots and ledgers.
pub trait TenantDirectory {
    /// Returns the snapshot for `id`, if known.
    fn tenant(&self, id: &TenantId) -> Option<&TenantSnapshot>;

    /// Returns the ledger rows for `id`; empty when unknown.
    fn ledger(&self, id: &TenantId) -> &[PaymentRow];

    /// Returns the snapshot and ledger for `id`.
    ///
    /// # Errors
    ///
    /// Returns `RentError::NotFound` if the tenant is unknown.
    fn resolve(&self, id: &TenantId) -> RentResult<(&TenantSnapshot, &[PaymentRow])> {
        let tenant = self
            .tenant(id)
            .ok_or_else(|| RentError::not_found("tenant", id.as_str()))?;
        Ok((tenant, self.ledger(id)))
    }
}

/// In-memory [`TenantDirectory`] ordered by tenant id.
#[derive(Debug, Clone, Default)]
pub struct TenantBook {
    entries: BTreeMap<TenantId, TenantLedger>,
}

impl TenantBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a tenant, returning the previous entry.
    pub fn insert(&mut self, ledger: TenantLedger) -> Option<TenantLedger> {
        self.entries.insert(ledger.tenant.tenant_id.clone(), ledger)
    }

    /// Number of tenants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the book holds no tenants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in tenant-id order.
    pub fn ledgers(&self) -> impl Iterator<Item = &TenantLedger> {
        self.entries.values()
    }
}

impl FromIterator<TenantLedger> for TenantBook {
    fn from_iter<I: IntoIterator<Item = TenantLedger>>(iter: I) -> Self {
        let mut book = Self::new();
        for ledger in iter {
            book.insert(ledger);
        }
        book
    }
}

impl TenantDirectory for TenantBook {
    fn tenant(&self, id: &TenantId) -> Option<&TenantSnapshot> {
        self.entries.get(id).map(|entry| &entry.tenant)
    }

    fn ledger(&self, id: &TenantId) -> &[PaymentRow] {
        self.entries
            .get(id)
            .map_or(&[][..], |entry| entry.payments.as_slice())
    }
}
