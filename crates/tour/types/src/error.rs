use thiserror::Error;

/// Failure kinds returned by ledger operations.
///
/// Every kind carries a stable numeric code that callers match on. All
/// failures are recoverable; nothing in the ledger panics on bad input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerError {
    /// Reserved for interface compatibility; no operation raises it.
    #[error("invalid total (1000)")]
    InvalidTotal,

    #[error("invalid participant count or capacity reached (1001)")]
    InvalidParticipant,

    /// Reserved for interface compatibility; no operation raises it.
    #[error("invalid role (1002)")]
    InvalidRole,

    #[error("tour not found (1003)")]
    TourNotFound,

    #[error("tour is closed (1004)")]
    TourClosed,

    #[error("invalid amount (1005)")]
    InvalidAmount,

    #[error("participant already registered (1006)")]
    AlreadyRegistered,

    #[error("authority contract not set or already set (1007)")]
    AuthorityNotSet,

    #[error("caller is not authorized (1008)")]
    NotAuthorized,

    #[error("invalid role weight (1009)")]
    InvalidWeight,
}

impl LedgerError {
    pub const ALL: [LedgerError; 10] = [
        LedgerError::InvalidTotal,
        LedgerError::InvalidParticipant,
        LedgerError::InvalidRole,
        LedgerError::TourNotFound,
        LedgerError::TourClosed,
        LedgerError::InvalidAmount,
        LedgerError::AlreadyRegistered,
        LedgerError::AuthorityNotSet,
        LedgerError::NotAuthorized,
        LedgerError::InvalidWeight,
    ];

    /// Stable numeric identity of this kind.
    pub fn code(&self) -> u32 {
        match self {
            LedgerError::InvalidTotal => 1000,
            LedgerError::InvalidParticipant => 1001,
            LedgerError::InvalidRole => 1002,
            LedgerError::TourNotFound => 1003,
            LedgerError::TourClosed => 1004,
            LedgerError::InvalidAmount => 1005,
            LedgerError::AlreadyRegistered => 1006,
            LedgerError::AuthorityNotSet => 1007,
            LedgerError::NotAuthorized => 1008,
            LedgerError::InvalidWeight => 1009,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
