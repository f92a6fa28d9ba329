//! Authority membership
//!
//! The set of principals allowed to update splits and close tours is kept by
//! the host, not by the ledger. The ledger only asks whether a caller belongs.

use std::collections::HashSet;
use std::sync::RwLock;
use thiserror::Error;
use tour_types::Principal;

/// Membership test for principals permitted to mutate tour splits.
pub trait AuthorityDirectory: Send + Sync {
    fn is_authority(&self, principal: &Principal) -> bool;
}

impl AuthorityDirectory for HashSet<Principal> {
    fn is_authority(&self, principal: &Principal) -> bool {
        self.contains(principal)
    }
}

/// Host-maintained authority set with interior locking.
pub struct InMemoryAuthoritySet {
    members: RwLock<HashSet<Principal>>,
}

impl InMemoryAuthoritySet {
    pub fn new() -> Self {
        Self {
            members: RwLock::new(HashSet::new()),
        }
    }

    pub fn with_members(members: impl IntoIterator<Item = Principal>) -> Self {
        Self {
            members: RwLock::new(members.into_iter().collect()),
        }
    }

    /// Add a principal. Returns `false` if it was already a member.
    pub fn grant(&self, principal: Principal) -> Result<bool, AuthorityError> {
        let mut members = self.members.write().map_err(|_| AuthorityError::LockError)?;
        Ok(members.insert(principal))
    }

    /// Remove a principal. Returns `false` if it was not a member.
    pub fn revoke(&self, principal: &Principal) -> Result<bool, AuthorityError> {
        let mut members = self.members.write().map_err(|_| AuthorityError::LockError)?;
        Ok(members.remove(principal))
    }

    pub fn len(&self) -> usize {
        self.members.read().map(|members| members.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryAuthoritySet {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthorityDirectory for InMemoryAuthoritySet {
    // A poisoned lock denies everyone.
    fn is_authority(&self, principal: &Principal) -> bool {
        self.members
            .read()
            .map(|members| members.contains(principal))
            .unwrap_or(false)
    }
}

#[derive(Debug, Error)]
pub enum AuthorityError {
    #[error("authority set lock poisoned")]
    LockError,
}
