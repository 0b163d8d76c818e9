// 🧾 Domain Model - Transactions, Purchases, Customers
// Plain values produced by the loader and consumed by the analysis engines

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LoadError;

// ============================================================================
// CALENDAR DATE
// ============================================================================

/// CalendarDate - month/day/year exactly as written in the log
///
/// No calendar validation happens here: `2/31/2014` parses fine.
/// The cadence heuristics only look at the raw integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    pub month: u32,
    pub day: u32,
    pub year: i32,
}

impl CalendarDate {
    pub fn new(month: u32, day: u32, year: i32) -> Self {
        CalendarDate { month, day, year }
    }
}

impl FromStr for CalendarDate {
    type Err = LoadError;

    /// Parse `M/D/YYYY`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || LoadError::InvalidDate(s.to_string());

        let parts: Vec<&str> = s.trim().split('/').collect();
        if parts.len() != 3 {
            return Err(bad());
        }

        let month = parts[0].trim().parse().map_err(|_| bad())?;
        let day = parts[1].trim().parse().map_err(|_| bad())?;
        let year = parts[2].trim().parse().map_err(|_| bad())?;

        Ok(CalendarDate { month, day, year })
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.month, self.day, self.year)
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// One payment: amount in whole currency units plus the date it was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub amount: i64,
    pub date: CalendarDate,
}

impl PurchaseRecord {
    pub fn new(amount: i64, date: CalendarDate) -> Self {
        PurchaseRecord { amount, date }
    }
}

/// TransactionRecord - one parsed row of the transaction log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Row identifier from the log (not used by any analysis)
    pub transaction_id: i64,

    /// Key purchases are grouped by ("Sub ID" in the report)
    pub subscription_id: i64,

    pub amount: i64,
    pub date: CalendarDate,
}

impl TransactionRecord {
    /// Split into the (grouping key, purchase) pair the aggregator consumes
    pub fn keyed(&self) -> (i64, PurchaseRecord) {
        (self.subscription_id, PurchaseRecord::new(self.amount, self.date))
    }
}

// ============================================================================
// CADENCE TYPE
// ============================================================================

/// CadenceType - recurring pattern detected for a customer
///
/// Display labels and units are a reporting concern, see `report::CadenceLabel`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CadenceType {
    #[default]
    Unknown,
    OneOf,
    Monthly,
    Daily,
    Yearly,
}

// ============================================================================
// CUSTOMER
// ============================================================================

/// Customer - every purchase sharing one grouping key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,

    /// Order is the aggregator's post-grouping order, not necessarily by date
    pub purchases: Vec<PurchaseRecord>,

    pub cadence: CadenceType,
}

impl Customer {
    pub fn new(id: i64) -> Self {
        Customer {
            id,
            purchases: Vec::new(),
            cadence: CadenceType::Unknown,
        }
    }

    pub fn add_purchase(&mut self, purchase: PurchaseRecord) {
        self.purchases.push(purchase);
    }

    pub fn purchase_count(&self) -> usize {
        self.purchases.len()
    }

    /// Amount charged on each renewal (taken from the first purchase)
    pub fn subscription_amount(&self) -> Option<i64> {
        self.purchases.first().map(|p| p.amount)
    }

    /// Last purchase in sequence order
    pub fn last_purchase(&self) -> Option<&PurchaseRecord> {
        self.purchases.last()
    }

    /// Purchase dates in sequence order
    pub fn purchase_dates(&self) -> Vec<CalendarDate> {
        self.purchases.iter().map(|p| p.date).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
