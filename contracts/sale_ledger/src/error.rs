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
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// Caller is not the sale owner
    NotOwner = 10,
    /// Buyer is not on the whitelist
    NotWhitelisted = 11,

    // ============================================
    // SALE WINDOW ERRORS (20-29)
    // ============================================
    /// Sale is paused
    Paused = 20,
    /// Outside the opening/closing window
    NotOpen = 21,
    /// Finalize called before the closing time
    StillOpen = 22,
    /// Sale already finalized
    AlreadyFinalized = 23,

    // ============================================
    // AMOUNT/POOL ERRORS (30-39)
    // ============================================
    /// Payment below the minimum purchase
    BelowMinimum = 30,
    /// Amount must be positive and price to at least one token unit
    InvalidAmount = 31,
    /// Not enough left in the pool
    PoolExhausted = 32,
    /// Pool kind not allowed for this operation
    InvalidPoolKind = 33,

    // ============================================
    // CONFIGURATION ERRORS (40-49)
    // ============================================
    /// Malformed timings, discounts, rate or minimum
    InvalidConfiguration = 40,
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
