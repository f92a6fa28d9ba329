//! Tour Ledger - authority-gated cost splitting for group tours
//!
//! The ledger owns two maps, tour splits and participant shares, and enforces
//! every transition on them:
//!
//! - **Registration**: a caller joins an open tour with spare capacity at most
//!   once and is charged a role-weighted share of the total cost.
//! - **Authority**: updating a split or closing a tour requires the write-once
//!   authority contract to be set and the caller to be in the host's
//!   authority directory.
//! - **Closure**: closing is one-way; closed tours take no registrations.
//!
//! All operations are synchronous and in-memory. Failures are returned as
//! [`LedgerError`] kinds with stable numeric codes.

#![deny(unsafe_code)]

pub mod authority;
pub mod ledger;
pub mod share;
pub mod snapshot;

pub use authority::{AuthorityDirectory, AuthorityError, InMemoryAuthoritySet};
pub use ledger::{CostSplitLedger, LedgerStatistics, PARTICIPANT_ROLE};
pub use snapshot::{LedgerSnapshot, ShareEntry, SnapshotError, TourEntry};

pub use tour_types::{
    DegeneratePoolPolicy, LedgerConfig, LedgerError, LedgerResult, ParticipantKey,
    ParticipantShare, Principal, RoleWeight, TourId, TourSplit,
};
