//! Collection status enum mapping to the `collection_statuses` lookup table.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

/// Collection lifecycle status.
///
/// Variant discriminants match the seed data order (1-based) in the
/// `collection_statuses` table. Transitions are forward-only.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStatus {
    /// Registered by a generator, awaiting physical pickup.
    Pending = 1,
    /// Physically picked up by a transporter; claimable by a recycler.
    Collected = 2,
    /// Claimed by a recycler for processing.
    Claimed = 3,
    /// Processing completed at a facility.
    Processed = 4,
}

impl CollectionStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Map a database status ID back to the enum.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(Self::Pending),
            2 => Some(Self::Collected),
            3 => Some(Self::Claimed),
            4 => Some(Self::Processed),
            _ => None,
        }
    }

    /// Whether moving to `next` is a legal forward transition.
    pub fn can_transition_to(self, next: CollectionStatus) -> bool {
        (next as i16) == (self as i16) + 1
    }
}

impl From<CollectionStatus> for StatusId {
    fn from(value: CollectionStatus) -> Self {
        value as StatusId
    }
}
