//! Tour Types - the data model of the tour cost-split ledger
//!
//! A tour is a cost-sharing event: a total cost, a participant capacity and
//! a list of role weights that decide how the cost is divided. This crate
//! holds the identifiers, the split records, the stable error kinds and the
//! ledger configuration. The state machine itself lives in `tour-ledger`.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod split;

pub use config::{ConfigError, DegeneratePoolPolicy, LedgerConfig, BURN_PRINCIPAL};
pub use error::{LedgerError, LedgerResult};
pub use split::{ParticipantKey, ParticipantShare, RoleWeight, TourSplit};

use serde::{Deserialize, Serialize};

/// Positive integer key of a tour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TourId(pub u64);

impl TourId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TourId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identity of a caller.
///
/// The ledger never interprets the contents; authentication happens before a
/// principal reaches it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Principal(pub String);

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_display() {
        assert_eq!(TourId::new(7).to_string(), "7");
        assert_eq!(Principal::new("ST1TEST").to_string(), "ST1TEST");
    }

    #[test]
    fn test_principal_ordering_is_lexical() {
        let mut principals = vec![Principal::new("ST3"), Principal::new("ST1"), Principal::new("ST2")];
        principals.sort();
        assert_eq!(principals[0].as_str(), "ST1");
        assert_eq!(principals[2].as_str(), "ST3");
    }
}
