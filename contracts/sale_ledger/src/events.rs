use allocation_utils::{FinalizationReport, PoolKind, SalePhase};
use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug)]
pub struct SaleInitializedEvent {
    pub phase: SalePhase,
    pub opening_time: u64,
    pub closing_time: u64,
    pub rate: i128,
    pub purchase_reserved: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PurchasedEvent {
    pub buyer: Address,
    pub pay_amount: i128,
    pub tokens: i128,
    pub discount: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ManualMintEvent {
    pub kind: PoolKind,
    pub recipient: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct WhitelistEvent {
    pub account: Address,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PauseEvent {
    pub paused: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct OwnershipTransferredEvent {
    pub previous: Address,
    pub owner: Address,
}

/// Published last by `finalize`, after every hand-over
#[contracttype]
#[derive(Clone, Debug)]
pub struct FinalizedEvent {
    pub report: FinalizationReport,
}
