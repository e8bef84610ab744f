use allocation_utils::PoolKind;
use soroban_sdk::contracttype;

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Owner,
    Token,
    /// Total supply limit scaled by the token decimals
    Cap,
    Percentages,
    PreIcoReserved,
    PreIcoClaimed,
    /// Ico, Team, Platform and Airdrops only
    Pool(PoolKind),
    Phase,
    CarriedOver,
}
