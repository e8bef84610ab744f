use soroban_sdk::{contracttype, Address, Vec};

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
pub(crate) const WHITELIST_BUMP_AMOUNT: u32 = 60 * DAY_IN_LEDGERS;
pub(crate) const WHITELIST_LIFETIME_THRESHOLD: u32 = WHITELIST_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Deployment parameters of one sale phase
#[contracttype]
#[derive(Clone, Debug)]
pub struct SaleParams {
    /// Whole tokens per whole payment unit
    pub rate: i128,
    /// `[opening, edge_1, .., edge_n, closing]`
    pub timings: Vec<u64>,
    /// One discount percent per stage
    pub discounts: Vec<u32>,
    /// Smallest accepted payment, in payment units
    pub min_purchase: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SaleConfig {
    pub rate: i128,
    pub opening_time: u64,
    pub closing_time: u64,
    pub min_purchase: i128,
    pub token_decimals: u32,
    pub payment_decimals: u32,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Owner,
    Token,
    SharedLedger,
    Wallet,
    PaymentToken,
    Config,
    Schedule,
    Phase,
    /// Pre-ICO phase only
    PurchasePool,
    Paused,
    Finalized,
    Whitelisted(Address),
}
