use allocation_utils::{AllocationPool, PoolKind, PoolSet, SalePhase};
use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug)]
pub struct LedgerInitializedEvent {
    pub token: Address,
    pub cap: i128,
    pub pre_ico_reserved: i128,
    pub pools: PoolSet,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PhaseBegunEvent {
    pub sale: Address,
    pub phase: SalePhase,
    pub purchase_reserved: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolMintedEvent {
    pub kind: PoolKind,
    pub amount: i128,
    pub pool: AllocationPool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PhaseClosedEvent {
    pub closed: SalePhase,
    pub next: SalePhase,
    pub carried_over: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct OwnershipTransferredEvent {
    pub previous: Address,
    pub owner: Address,
}
