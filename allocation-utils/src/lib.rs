#![no_std]

pub mod error;
pub mod pool;
pub mod pricing;
pub mod schedule;
pub mod types;

pub use error::LedgerError;
pub use pool::{reserve_share, AllocationPool};
pub use pricing::tokens_for;
pub use schedule::DiscountSchedule;
pub use types::{
    FinalizationReport, PhaseGrant, PoolKind, PoolSet, ReservationPercentages, SalePhase,
    SaleState,
};

/// Percentages are expressed out of this many parts.
pub const PERCENT_BASE: i128 = 100;
