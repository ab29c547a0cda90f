//! Revenue ledger records.
//!
//! Entries are written only by a successful check-in and are never updated
//! or deleted afterwards.

use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::reservation::ReservationId;
use crate::room::RoomId;

/// Opaque identifier of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevenueEntryId(i64);

impl RevenueEntryId {
    /// Wraps a raw row id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RevenueEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recognised revenue amount tied to one check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueEntry {
    /// Row id.
    pub id: RevenueEntryId,
    /// Room the stay was in.
    pub room_id: RoomId,
    /// The checked-in reservation.
    pub reservation_id: ReservationId,
    /// Amount recognised.
    pub amount: Money,
    /// Free-text description.
    pub description: String,
    /// When the entry was written.
    pub created_at: SystemTime,
}

/// A ledger entry waiting to be appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRevenueEntry {
    /// Room the stay is in.
    pub room_id: RoomId,
    /// The reservation being checked in.
    pub reservation_id: ReservationId,
    /// Amount to recognise.
    pub amount: Money,
    /// Free-text description.
    pub description: String,
}

/// Totals over the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    /// Number of entries.
    pub entries: usize,
    /// Sum of all amounts.
    pub total: Money,
}

impl LedgerSummary {
    /// Summarises a slice of entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::LedgerSummary;
    ///
    /// let summary = LedgerSummary::of(&[]);
    /// assert_eq!(summary.entries, 0);
    /// ```
    #[must_use]
    pub fn of(entries: &[RevenueEntry]) -> Self {
        Self {
            entries: entries.len(),
            total: entries.iter().map(|e| e.amount).sum(),
        }
    }
}
