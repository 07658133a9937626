//! Waste-category breakdowns and claim aggregation arithmetic.
//!
//! A pickup carries a total `weight` plus a per-category breakdown. The two
//! are recorded independently at pickup time: `weight` is authoritative and
//! the breakdown is an estimate, so no reconciliation between them is
//! enforced here or anywhere else.

use serde::{Deserialize, Serialize};

/// Per-category mass breakdown of a pickup, in kilograms.
///
/// The recognized categories are wet, dry, and hazardous. An absent
/// category is simply zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WasteBreakdown {
    pub wet: f64,
    pub dry: f64,
    pub hazardous: f64,
}

impl WasteBreakdown {
    pub fn new(wet: f64, dry: f64, hazardous: f64) -> Self {
        Self {
            wet,
            dry,
            hazardous,
        }
    }

    /// Sum of the categorical entries.
    ///
    /// Note this need not equal the collection's total `weight`.
    pub fn total(&self) -> f64 {
        self.wet + self.dry + self.hazardous
    }

    /// Fold another breakdown into this one, category by category.
    pub fn accumulate(&mut self, other: &WasteBreakdown) {
        self.wet += other.wet;
        self.dry += other.dry;
        self.hazardous += other.hazardous;
    }

    /// Returns `true` if every category is non-negative.
    pub fn is_valid(&self) -> bool {
        self.wet >= 0.0 && self.dry >= 0.0 && self.hazardous >= 0.0
    }
}

/// Running totals for a batch of claimed collections.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClaimTotals {
    /// Sum of the claimed collections' total weights.
    pub total_weight: f64,
    /// Per-category sums over the claimed collections.
    pub by_category: WasteBreakdown,
}

impl ClaimTotals {
    /// Fold one collection's weight and breakdown into the totals.
    pub fn add(&mut self, weight: f64, breakdown: &WasteBreakdown) {
        self.total_weight += weight;
        self.by_category.accumulate(breakdown);
    }
}
