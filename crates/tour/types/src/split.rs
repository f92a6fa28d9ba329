//! Tour split records and participant shares.

use crate::{Principal, TourId};
use serde::{Deserialize, Serialize};

/// A role and its proportional claim relative to a 100-unit baseline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleWeight {
    pub role: String,
    pub weight: u32,
}

impl RoleWeight {
    pub fn new(role: impl Into<String>, weight: u32) -> Self {
        Self {
            role: role.into(),
            weight,
        }
    }
}

/// Cost, capacity and weighting of one tour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourSplit {
    /// Total cost in the smallest currency unit
    pub total_cost: u64,
    /// Registration capacity
    pub max_participants: u32,
    /// Ordered role weights; the first entry for a role wins
    pub role_weights: Vec<RoleWeight>,
    /// Successful registrations so far
    pub current_participants: u32,
    /// `true` while the tour accepts registrations
    pub status: bool,
}

impl TourSplit {
    /// An open tour with no registrations yet.
    pub fn new(total_cost: u64, max_participants: u32, role_weights: Vec<RoleWeight>) -> Self {
        Self {
            total_cost,
            max_participants,
            role_weights,
            current_participants: 0,
            status: true,
        }
    }

    pub fn with_participants(mut self, current_participants: u32) -> Self {
        self.current_participants = current_participants;
        self
    }

    pub fn closed(mut self) -> Self {
        self.status = false;
        self
    }

    pub fn is_open(&self) -> bool {
        self.status
    }

    pub fn has_capacity(&self) -> bool {
        self.current_participants < self.max_participants
    }

    /// Weight of `role`, or `default` when the tour lists no entry for it.
    ///
    /// Duplicate entries resolve to the first one in list order.
    pub fn weight_of(&self, role: &str, default: u32) -> u32 {
        self.role_weights
            .iter()
            .find(|entry| entry.role == role)
            .map(|entry| entry.weight)
            .unwrap_or(default)
    }
}

/// What a registered participant owes for a tour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantShare {
    pub share: u64,
    pub role: String,
    /// Settled externally; the ledger only records `false`
    pub paid: bool,
}

impl ParticipantShare {
    pub fn unpaid(share: u64, role: impl Into<String>) -> Self {
        Self {
            share,
            role: role.into(),
            paid: false,
        }
    }
}

/// Composite key of the participant-share map.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantKey {
    pub tour_id: TourId,
    pub participant: Principal,
}

impl ParticipantKey {
    pub fn new(tour_id: TourId, participant: Principal) -> Self {
        Self {
            tour_id,
            participant,
        }
    }
}

impl std::fmt::Display for ParticipantKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.tour_id, self.participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tour() -> TourSplit {
        TourSplit::new(
            1000,
            5,
            vec![
                RoleWeight::new("participant", 100),
                RoleWeight::new("organizer", 50),
                RoleWeight::new("participant", 300),
            ],
        )
    }

    #[test]
    fn test_new_tour_is_open_and_empty() {
        let tour = sample_tour();
        assert!(tour.is_open());
        assert!(tour.has_capacity());
        assert_eq!(tour.current_participants, 0);
    }

    #[test]
    fn test_weight_of_first_match_wins() {
        assert_eq!(sample_tour().weight_of("participant", 100), 100);
        assert_eq!(sample_tour().weight_of("organizer", 100), 50);
    }

    #[test]
    fn test_weight_of_absent_role_uses_default() {
        assert_eq!(sample_tour().weight_of("guide", 100), 100);
        assert_eq!(sample_tour().weight_of("guide", 42), 42);
    }

    #[test]
    fn test_capacity_boundary() {
        let full = sample_tour().with_participants(5);
        assert!(!full.has_capacity());
        assert!(!sample_tour().closed().is_open());
    }

    #[test]
    fn test_keys_do_not_collide_like_concatenated_strings() {
        // Both would read "11x" if the parts were joined.
        let odd = ParticipantKey::new(TourId(11), Principal::new("x"));
        let other = ParticipantKey::new(TourId(1), Principal::new("1x"));
        assert_ne!(odd, other);
    }

    #[test]
    fn test_share_serializes_with_paid_flag() {
        let share = ParticipantShare::unpaid(200, "participant");
        let json = serde_json::to_value(&share).unwrap();
        assert_eq!(json["share"], 200);
        assert_eq!(json["paid"], false);
    }
}
