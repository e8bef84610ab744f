use allocation_utils::LedgerError;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // CONFIGURATION ERRORS (20-29)
    // ============================================
    /// Percentages malformed or supply limit not positive
    InvalidConfiguration = 20,

    // ============================================
    // POOL ERRORS (30-39)
    // ============================================
    /// Amount must be positive
    InvalidAmount = 30,
    /// Mint would exceed the pool reservation
    PoolExhausted = 31,
    /// The purchase budget is not held here
    InvalidPoolKind = 32,

    // ============================================
    // PHASE ERRORS (40-49)
    // ============================================
    /// Operation not allowed in the current phase
    PhaseClosed = 40,
    /// Pre-ICO reservation was already granted
    PhaseInProgress = 41,
}

impl From<LedgerError> for Error {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidConfiguration => Error::InvalidConfiguration,
            LedgerError::InvalidAmount | LedgerError::Overflow => Error::InvalidAmount,
            LedgerError::PoolExhausted => Error::PoolExhausted,
        }
    }
}
