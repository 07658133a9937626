//! Claim coordination: the workflow behind `POST /api/recycler/scan`.
//!
//! A recycler scans a transporter's QR code to claim every collection that
//! transporter has picked up and no recycler has taken yet. The coordinator
//! validates the scanned code, selects candidates, and delegates the actual
//! ownership transfer to [`CollectionRepo::claim_batch`], a single guarded
//! multi-row UPDATE. The eligibility query is only candidate selection; the
//! unclaimed check re-run inside that atomic statement is what guarantees
//! each collection is claimed at most once under concurrent scans.

use ecoloop_core::error::CoreError;
use ecoloop_core::types::DbId;
use ecoloop_core::waste::{ClaimTotals, WasteBreakdown};
use ecoloop_db::repositories::{CollectionRepo, TransporterRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppError;

/// Caller-facing 404 message for a scanned code that does not resolve.
const UNKNOWN_TRANSPORTER: &str = "Transporter not found. The QR code may be invalid.";

/// The authenticated identity performing a claim.
///
/// Always passed in explicitly; the coordinator never reads ambient state.
#[derive(Debug, Clone)]
pub struct ClaimActor {
    pub id: DbId,
    pub name: String,
}

/// Result of a claim operation, serialized as the scan response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSummary {
    pub message: String,
    pub claimed_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_total_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_categorical_weights: Option<WasteBreakdown>,
}

impl ClaimSummary {
    /// Summary for a scan that found nothing to claim.
    fn zero() -> Self {
        Self {
            message: "No new collected items were available to be claimed from this transporter."
                .to_string(),
            claimed_count: 0,
            estimated_total_weight: None,
            estimated_categorical_weights: None,
        }
    }
}

/// Claim every eligible collection of the scanned transporter for `actor`.
///
/// Validation order: empty scanned code is a 400; a code that does not
/// resolve to a registered transporter is a 404. A transporter with no
/// eligible collections is a normal zero-claim outcome, not an error.
pub async fn claim_collections(
    pool: &PgPool,
    actor: &ClaimActor,
    scanned_transporter_id: &str,
) -> Result<ClaimSummary, AppError> {
    let code = scanned_transporter_id.trim();
    if code.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Scanned QR code is invalid or empty.".into(),
        )));
    }

    // QR codes carry the transporter id in decimal; anything else cannot
    // resolve to a registered transporter.
    let transporter_id: DbId = code
        .parse()
        .map_err(|_| AppError::NotFound(UNKNOWN_TRANSPORTER.to_string()))?;

    let transporter = TransporterRepo::find_by_id(pool, transporter_id)
        .await?
        .ok_or_else(|| AppError::NotFound(UNKNOWN_TRANSPORTER.to_string()))?;

    let eligible = CollectionRepo::find_eligible(pool, transporter.id).await?;
    if eligible.is_empty() {
        tracing::info!(
            recycler = %actor.name,
            transporter = %transporter.name,
            "no collected items available to claim"
        );
        return Ok(ClaimSummary::zero());
    }

    let ids: Vec<DbId> = eligible.iter().map(|c| c.id).collect();
    let claimed = CollectionRepo::claim_batch(pool, &ids, actor.id).await?;

    // A concurrent scan may have won some (or all) of the candidates between
    // selection and the guarded update; report only what this call claimed.
    if claimed.is_empty() {
        return Ok(ClaimSummary::zero());
    }
    if claimed.len() < ids.len() {
        tracing::warn!(
            recycler = %actor.name,
            transporter = %transporter.name,
            selected = ids.len(),
            claimed = claimed.len(),
            "lost part of a claim batch to a concurrent scan"
        );
    }

    let mut totals = ClaimTotals::default();
    for collection in &claimed {
        totals.add(collection.weight, &collection.breakdown());
    }

    tracing::info!(
        recycler = %actor.name,
        transporter = %transporter.name,
        count = claimed.len(),
        total_weight = totals.total_weight,
        "claimed collections"
    );

    Ok(ClaimSummary {
        message: format!(
            "Successfully claimed {} collections from {}.",
            claimed.len(),
            transporter.name
        ),
        claimed_count: claimed.len(),
        estimated_total_weight: Some(totals.total_weight),
        estimated_categorical_weights: Some(totals.by_category),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_summary_omits_weight_fields() {
        let json = serde_json::to_value(ClaimSummary::zero()).unwrap();
        assert_eq!(json["claimedCount"], 0);
        assert!(json.get("estimatedTotalWeight").is_none());
        assert!(json.get("estimatedCategoricalWeights").is_none());
    }

    #[test]
    fn claim_summary_uses_camel_case_wire_names() {
        let summary = ClaimSummary {
            message: "Successfully claimed 3 collections from T.".to_string(),
            claimed_count: 3,
            estimated_total_weight: Some(17.5),
            estimated_categorical_weights: Some(WasteBreakdown::new(10.0, 5.0, 2.5)),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["claimedCount"], 3);
        assert_eq!(json["estimatedTotalWeight"], 17.5);
        assert_eq!(json["estimatedCategoricalWeights"]["wet"], 10.0);
        assert_eq!(json["estimatedCategoricalWeights"]["dry"], 5.0);
        assert_eq!(json["estimatedCategoricalWeights"]["hazardous"], 2.5);
    }
}
