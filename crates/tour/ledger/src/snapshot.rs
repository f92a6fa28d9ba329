//! Serializable ledger image
//!
//! Storage is the host's concern; the snapshot only gives it something to
//! store. Shares are kept as a list because their keys are not strings.

use crate::authority::AuthorityDirectory;
use crate::ledger::CostSplitLedger;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tour_types::{LedgerConfig, ParticipantKey, ParticipantShare, Principal, TourId, TourSplit};
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub authority_contract: Option<Principal>,
    pub tours: Vec<TourEntry>,
    pub shares: Vec<ShareEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourEntry {
    pub tour_id: TourId,
    pub split: TourSplit,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareEntry {
    pub key: ParticipantKey,
    pub share: ParticipantShare,
}

/// Reasons a snapshot cannot be restored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Duplicate tour in snapshot: {0}")]
    DuplicateTour(TourId),

    #[error("Duplicate participant share in snapshot: {0}")]
    DuplicateShare(ParticipantKey),

    #[error("Participant share for unknown tour: {0}")]
    OrphanShare(ParticipantKey),

    #[error("Tour {tour_id} counts {counted} participants but has {registered} shares")]
    CountBehindShares {
        tour_id: TourId,
        counted: u32,
        registered: u32,
    },

    #[error("Burn principal cannot be the authority contract")]
    BurnAuthority,
}

impl CostSplitLedger {
    /// Capture authority, tours and shares, ordered by key.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let mut tours: Vec<_> = self
            .tours
            .iter()
            .map(|(tour_id, split)| TourEntry {
                tour_id: *tour_id,
                split: split.clone(),
            })
            .collect();
        tours.sort_by_key(|entry| entry.tour_id);

        let mut shares: Vec<_> = self
            .shares
            .iter()
            .map(|(key, share)| ShareEntry {
                key: key.clone(),
                share: share.clone(),
            })
            .collect();
        shares.sort_by(|a, b| a.key.cmp(&b.key));

        LedgerSnapshot {
            authority_contract: self.authority_contract.clone(),
            tours,
            shares,
        }
    }

    /// Rebuild a ledger from a snapshot, checking the registration invariants.
    pub fn restore(
        snapshot: LedgerSnapshot,
        config: LedgerConfig,
        authorities: Arc<dyn AuthorityDirectory>,
    ) -> Result<Self, SnapshotError> {
        if snapshot
            .authority_contract
            .as_ref()
            .is_some_and(|contract| contract.as_str() == config.burn_principal)
        {
            return Err(SnapshotError::BurnAuthority);
        }

        let mut tours = HashMap::with_capacity(snapshot.tours.len());
        for entry in snapshot.tours {
            if tours.insert(entry.tour_id, entry.split).is_some() {
                return Err(SnapshotError::DuplicateTour(entry.tour_id));
            }
        }

        let mut shares = HashMap::with_capacity(snapshot.shares.len());
        let mut registered: HashMap<TourId, u32> = HashMap::new();
        for entry in snapshot.shares {
            if !tours.contains_key(&entry.key.tour_id) {
                return Err(SnapshotError::OrphanShare(entry.key));
            }
            *registered.entry(entry.key.tour_id).or_insert(0) += 1;
            if shares.contains_key(&entry.key) {
                return Err(SnapshotError::DuplicateShare(entry.key));
            }
            shares.insert(entry.key, entry.share);
        }

        // Seeded tours may count registrations that predate the ledger, so
        // only a counter below the share count is inconsistent.
        for (tour_id, registered) in registered {
            let counted = tours[&tour_id].current_participants;
            if counted < registered {
                return Err(SnapshotError::CountBehindShares {
                    tour_id,
                    counted,
                    registered,
                });
            }
        }

        info!(
            tours = tours.len(),
            shares = shares.len(),
            "Ledger restored from snapshot"
        );

        let mut ledger = CostSplitLedger::with_config(config, authorities);
        ledger.authority_contract = snapshot.authority_contract;
        ledger.tours = tours;
        ledger.shares = shares;
        Ok(ledger)
    }
}
