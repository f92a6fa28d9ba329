//! The cost-split ledger state machine.

use crate::authority::AuthorityDirectory;
use crate::share::{pool_units, proportional_share};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tour_types::{
    LedgerConfig, LedgerError, LedgerResult, ParticipantKey, ParticipantShare, Principal,
    RoleWeight, TourId, TourSplit,
};
use tracing::{debug, info, warn};

/// Role used by `validate_split` for its balance check.
pub const PARTICIPANT_ROLE: &str = "participant";

/// Authority-gated registry of tour splits and participant shares.
///
/// Operations validate fully before mutating, so a failed call leaves both
/// maps untouched. Callers are passed in explicitly; the ledger holds no
/// notion of a "current" principal.
pub struct CostSplitLedger {
    pub(crate) config: LedgerConfig,
    pub(crate) authorities: Arc<dyn AuthorityDirectory>,
    pub(crate) authority_contract: Option<Principal>,
    pub(crate) tours: HashMap<TourId, TourSplit>,
    pub(crate) shares: HashMap<ParticipantKey, ParticipantShare>,
}

impl CostSplitLedger {
    /// Create an empty ledger with default configuration.
    pub fn new(authorities: Arc<dyn AuthorityDirectory>) -> Self {
        Self::with_config(LedgerConfig::default(), authorities)
    }

    pub fn with_config(config: LedgerConfig, authorities: Arc<dyn AuthorityDirectory>) -> Self {
        Self {
            config,
            authorities,
            authority_contract: None,
            tours: HashMap::new(),
            shares: HashMap::new(),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn authority_contract(&self) -> Option<&Principal> {
        self.authority_contract.as_ref()
    }

    pub fn default_split_rule(&self) -> u32 {
        self.config.default_split_rule
    }

    // --- Authority ---

    /// Set the authority contract. Write-once.
    ///
    /// The burn sentinel is refused before anything else. A second call fails
    /// with `AuthorityNotSet` whatever the value.
    pub fn set_authority_contract(&mut self, contract: Principal) -> LedgerResult<bool> {
        if contract.as_str() == self.config.burn_principal {
            warn!(contract = %contract, "Refused burn principal as authority contract");
            return Err(LedgerError::NotAuthorized);
        }
        if let Some(existing) = &self.authority_contract {
            warn!(
                existing = %existing,
                attempted = %contract,
                "Authority contract already set"
            );
            return Err(LedgerError::AuthorityNotSet);
        }

        info!(contract = %contract, "Authority contract set");
        self.authority_contract = Some(contract);
        Ok(true)
    }

    fn ensure_authority(&self, caller: &Principal) -> LedgerResult<()> {
        if self.authority_contract.is_none() {
            debug!(caller = %caller, "Authority contract not set");
            return Err(LedgerError::AuthorityNotSet);
        }
        if !self.authorities.is_authority(caller) {
            warn!(caller = %caller, "Caller is not an authority");
            return Err(LedgerError::NotAuthorized);
        }
        Ok(())
    }

    // --- Reads ---

    pub fn get_tour_split(&self, tour_id: TourId) -> Option<&TourSplit> {
        self.tours.get(&tour_id)
    }

    pub fn get_participant_share(
        &self,
        tour_id: TourId,
        participant: &Principal,
    ) -> Option<&ParticipantShare> {
        self.shares
            .get(&ParticipantKey::new(tour_id, participant.clone()))
    }

    /// Registered participants of a tour, ordered by principal.
    pub fn participants(&self, tour_id: TourId) -> Vec<(&Principal, &ParticipantShare)> {
        let mut entries: Vec<_> = self
            .shares
            .iter()
            .filter(|(key, _)| key.tour_id == tour_id)
            .map(|(key, share)| (&key.participant, share))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Share a participant of `role` would owe at the current head count.
    pub fn calculate_share(&self, tour_id: TourId, role: &str) -> LedgerResult<u64> {
        let tour = self.tours.get(&tour_id).ok_or(LedgerError::TourNotFound)?;
        if !tour.is_open() {
            return Err(LedgerError::TourClosed);
        }

        let default_weight = self.config.default_role_weight;
        let role_weight = tour.weight_of(role, default_weight);
        let organizer_weight = tour.weight_of(&self.config.organizer_role, default_weight);
        let pool = pool_units(tour.current_participants, organizer_weight);

        let share = proportional_share(
            tour.total_cost,
            role_weight,
            pool,
            self.config.degenerate_pool,
        )?;
        debug!(
            tour_id = %tour_id,
            role,
            role_weight,
            organizer_weight,
            pool,
            share,
            "Share calculated"
        );
        Ok(share)
    }

    /// Whether the participant share times the head count reproduces the
    /// total cost exactly.
    ///
    /// `false` means the split is only approximately balanced because of
    /// truncation. Any share failure is reported as `TourClosed`.
    pub fn validate_split(&self, tour_id: TourId) -> LedgerResult<bool> {
        let tour = self.tours.get(&tour_id).ok_or(LedgerError::TourNotFound)?;
        let share = self
            .calculate_share(tour_id, PARTICIPANT_ROLE)
            .map_err(|_| LedgerError::TourClosed)?;

        Ok(u128::from(tour.total_cost)
            == u128::from(share) * u128::from(tour.current_participants))
    }

    // --- Mutations ---

    /// Insert a tour created outside the ledger. Never overwrites.
    pub fn insert_tour(&mut self, tour_id: TourId, split: TourSplit) -> bool {
        if self.tours.contains_key(&tour_id) {
            debug!(tour_id = %tour_id, "Tour already exists, insert ignored");
            return false;
        }
        debug!(
            tour_id = %tour_id,
            total_cost = split.total_cost,
            max_participants = split.max_participants,
            "Tour inserted"
        );
        self.tours.insert(tour_id, split);
        true
    }

    /// Replace cost, capacity and weights of an existing tour.
    ///
    /// Head count and status are kept. Closed tours may still be updated.
    pub fn update_split(
        &mut self,
        caller: &Principal,
        tour_id: TourId,
        total_cost: u64,
        max_participants: u32,
        role_weights: Vec<RoleWeight>,
    ) -> LedgerResult<bool> {
        self.ensure_authority(caller)?;

        if max_participants == 0 {
            return Err(LedgerError::InvalidParticipant);
        }
        if total_cost == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if let Some(bad) = role_weights
            .iter()
            .find(|entry| !self.config.is_valid_weight(entry.weight))
        {
            debug!(role = %bad.role, weight = bad.weight, "Role weight out of range");
            return Err(LedgerError::InvalidWeight);
        }

        let tour = self
            .tours
            .get_mut(&tour_id)
            .ok_or(LedgerError::TourNotFound)?;
        tour.total_cost = total_cost;
        tour.max_participants = max_participants;
        tour.role_weights = role_weights;

        info!(
            tour_id = %tour_id,
            caller = %caller,
            total_cost,
            max_participants,
            "Split updated"
        );
        Ok(true)
    }

    /// Register `caller` under `role` and return the share it owes.
    pub fn add_participant(
        &mut self,
        caller: &Principal,
        tour_id: TourId,
        role: &str,
    ) -> LedgerResult<u64> {
        let tour = self.tours.get(&tour_id).ok_or(LedgerError::TourNotFound)?;
        if !tour.is_open() {
            return Err(LedgerError::TourClosed);
        }
        if !tour.has_capacity() {
            debug!(
                tour_id = %tour_id,
                current = tour.current_participants,
                max = tour.max_participants,
                "Tour at capacity"
            );
            return Err(LedgerError::InvalidParticipant);
        }

        let key = ParticipantKey::new(tour_id, caller.clone());
        if self.shares.contains_key(&key) {
            return Err(LedgerError::AlreadyRegistered);
        }

        let share = self.calculate_share(tour_id, role)?;

        let tour = self
            .tours
            .get_mut(&tour_id)
            .ok_or(LedgerError::TourNotFound)?;
        tour.current_participants += 1;
        self.shares.insert(key, ParticipantShare::unpaid(share, role));

        info!(
            tour_id = %tour_id,
            caller = %caller,
            role,
            share,
            participants = tour.current_participants,
            "Participant added"
        );
        Ok(share)
    }

    /// Close a tour to further registration. Idempotent and one-way.
    pub fn close_tour(&mut self, caller: &Principal, tour_id: TourId) -> LedgerResult<bool> {
        self.ensure_authority(caller)?;

        let tour = self
            .tours
            .get_mut(&tour_id)
            .ok_or(LedgerError::TourNotFound)?;
        tour.status = false;

        info!(tour_id = %tour_id, caller = %caller, "Tour closed");
        Ok(true)
    }

    // --- Statistics ---

    pub fn statistics(&self) -> LedgerStatistics {
        let open_tours = self.tours.values().filter(|tour| tour.is_open()).count();
        let unpaid_total = self
            .shares
            .values()
            .filter(|share| !share.paid)
            .map(|share| u128::from(share.share))
            .sum();

        LedgerStatistics {
            tours: self.tours.len(),
            open_tours,
            closed_tours: self.tours.len() - open_tours,
            participants: self.shares.len(),
            unpaid_total,
        }
    }
}

/// Counters over the whole ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStatistics {
    pub tours: usize,
    pub open_tours: usize,
    pub closed_tours: usize,
    pub participants: usize,
    pub unpaid_total: u128,
}
