//! Collection entity model and DTOs.

use ecoloop_core::types::{DbId, Timestamp};
use ecoloop_core::waste::WasteBreakdown;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::status::{CollectionStatus, StatusId};

/// A row from the `collections` table: one waste pickup event.
///
/// `transporter_id` is fixed at creation. `recycler_id` stays NULL until a
/// claim assigns it; once set it is never overwritten.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: DbId,
    pub transporter_id: DbId,
    pub recycler_id: Option<DbId>,
    pub status_id: StatusId,
    /// Total recorded mass of the pickup, in kilograms.
    pub weight: f64,
    pub wet_weight: f64,
    pub dry_weight: f64,
    pub hazardous_weight: f64,
    pub claimed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Collection {
    /// The categorical breakdown as a single value.
    pub fn breakdown(&self) -> WasteBreakdown {
        WasteBreakdown::new(self.wet_weight, self.dry_weight, self.hazardous_weight)
    }
}

/// DTO for recording a new pickup.
#[derive(Debug, Clone)]
pub struct CreateCollection {
    pub transporter_id: DbId,
    pub status: CollectionStatus,
    pub weight: f64,
    pub breakdown: WasteBreakdown,
}
