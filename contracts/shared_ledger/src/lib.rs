#![no_std]

mod error;
mod events;
mod storage;

pub use error::Error;
use events::*;
use storage::{DataKey, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD};

use allocation_utils::{
    reserve_share, AllocationPool, PhaseGrant, PoolKind, PoolSet, ReservationPercentages,
    SalePhase,
};
use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Symbol, Vec};

/// Pools that outlive a single sale phase.
///
/// Holds the ICO, team, platform and airdrop budgets plus the one-shot pre-ICO
/// reservation. Exactly one address owns the ledger at a time; while a sale runs,
/// that address is the sale contract itself.
#[contract]
pub struct SharedLedger;

#[contractimpl]
impl SharedLedger {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Compute every reservation from the token's supply limit
    ///
    /// `percentages` is `[pre_ico, ico, team, platform, airdrops]`.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidConfiguration`: Limit not positive, wrong length or shares above 100%
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        total_supply_limit: i128,
        percentages: Vec<u32>,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        if total_supply_limit <= 0 {
            return Err(Error::InvalidConfiguration);
        }
        let shares = ReservationPercentages::from_vec(&percentages)?;

        let decimals = token::Client::new(&env, &token).decimals();
        let cap = 10i128
            .checked_pow(decimals)
            .and_then(|unit| total_supply_limit.checked_mul(unit))
            .ok_or(Error::InvalidConfiguration)?;

        let pre_ico_reserved = reserve_share(cap, shares.pre_ico)?;
        let pools = PoolSet {
            ico: AllocationPool::new(reserve_share(cap, shares.ico)?),
            team: AllocationPool::new(reserve_share(cap, shares.team)?),
            platform: AllocationPool::new(reserve_share(cap, shares.platform)?),
            airdrops: AllocationPool::new(reserve_share(cap, shares.airdrops)?),
        };

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::Cap, &cap);
        env.storage().instance().set(&DataKey::Percentages, &shares);
        env.storage()
            .instance()
            .set(&DataKey::PreIcoReserved, &pre_ico_reserved);
        env.storage().instance().set(&DataKey::PreIcoClaimed, &false);
        env.storage().instance().set(&DataKey::Phase, &SalePhase::PreIco);
        env.storage().instance().set(&DataKey::CarriedOver, &0i128);
        Self::write_pools(&env, &pools);
        bump_instance(&env);

        log!(&env, "shared ledger initialized", cap, pre_ico_reserved);
        env.events().publish(
            (Symbol::new(&env, "initialized"), owner),
            LedgerInitializedEvent {
                token,
                cap,
                pre_ico_reserved,
                pools,
            },
        );

        Ok(())
    }

    // ============================================
    // PHASE HAND-OVER
    // ============================================

    /// Hand the ledger to the sale that runs the current phase
    ///
    /// The pre-ICO reservation is granted once. An ICO sale gets a zero grant and
    /// sells straight out of the `Ico` pool.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `PhaseClosed`: Every phase already finalized
    /// - `PhaseInProgress`: Pre-ICO reservation already granted
    pub fn begin_phase(env: Env, sale: Address) -> Result<PhaseGrant, Error> {
        let owner = Self::read_owner(&env)?;
        owner.require_auth();

        let phase = Self::read_phase(&env)?;
        let purchase_reserved = match phase {
            SalePhase::Completed => return Err(Error::PhaseClosed),
            SalePhase::PreIco => {
                if Self::pre_ico_claimed(env.clone()) {
                    return Err(Error::PhaseInProgress);
                }
                env.storage().instance().set(&DataKey::PreIcoClaimed, &true);
                Self::pre_ico_reserved(env.clone())?
            }
            SalePhase::Ico => 0,
        };

        Self::write_owner(&env, &owner, &sale);

        log!(&env, "phase begun", sale, purchase_reserved);
        env.events().publish(
            (Symbol::new(&env, "phase_begun"), sale.clone()),
            PhaseBegunEvent {
                sale,
                phase,
                purchase_reserved,
            },
        );

        Ok(PhaseGrant {
            phase,
            purchase_reserved,
        })
    }

    /// Close the running phase and pass the ledger on
    ///
    /// Closing the pre-ICO phase adds `unspent_purchase` to the `Ico` reservation.
    /// Closing the ICO phase completes the sale and carries nothing.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `PhaseClosed`: Every phase already finalized
    /// - `InvalidAmount`: Unspent amount negative or above the pre-ICO reservation
    pub fn close_phase(
        env: Env,
        unspent_purchase: i128,
        next_owner: Address,
    ) -> Result<SalePhase, Error> {
        let owner = Self::read_owner(&env)?;
        owner.require_auth();

        let closed = Self::read_phase(&env)?;
        let (next, carried_over) = match closed {
            SalePhase::Completed => return Err(Error::PhaseClosed),
            SalePhase::PreIco => {
                let pre_ico_reserved = Self::pre_ico_reserved(env.clone())?;
                if unspent_purchase < 0 || unspent_purchase > pre_ico_reserved {
                    return Err(Error::InvalidAmount);
                }

                let mut ico = Self::read_pool(&env, PoolKind::Ico)?;
                ico.increase_reserved(unspent_purchase)?;
                env.storage()
                    .instance()
                    .set(&DataKey::Pool(PoolKind::Ico), &ico);
                env.storage()
                    .instance()
                    .set(&DataKey::CarriedOver, &unspent_purchase);

                (SalePhase::Ico, unspent_purchase)
            }
            SalePhase::Ico => (SalePhase::Completed, 0),
        };

        env.storage().instance().set(&DataKey::Phase, &next);
        Self::write_owner(&env, &owner, &next_owner);

        log!(&env, "phase closed", carried_over);
        env.events().publish(
            (Symbol::new(&env, "phase_closed"),),
            PhaseClosedEvent {
                closed,
                next,
                carried_over,
            },
        );

        Ok(next)
    }

    // ============================================
    // POOL ISSUANCE
    // ============================================

    /// Record `amount` as issued from a shared pool
    ///
    /// Only the bookkeeping lives here; the owner mints the tokens itself.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidPoolKind`: The purchase budget is held by the sale
    /// - `PhaseClosed`: `Ico` drawn outside the ICO phase
    /// - `InvalidAmount`: Amount <= 0
    /// - `PoolExhausted`: Amount above what is left in the pool
    pub fn mint(env: Env, kind: PoolKind, amount: i128) -> Result<AllocationPool, Error> {
        let owner = Self::read_owner(&env)?;
        owner.require_auth();

        if kind == PoolKind::Purchase {
            return Err(Error::InvalidPoolKind);
        }
        if kind == PoolKind::Ico && Self::read_phase(&env)? != SalePhase::Ico {
            return Err(Error::PhaseClosed);
        }

        let mut pool = Self::read_pool(&env, kind)?;
        pool.mint(amount)?;
        env.storage().instance().set(&DataKey::Pool(kind), &pool);
        bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "pool_minted"), kind),
            PoolMintedEvent { kind, amount, pool },
        );

        Ok(pool)
    }

    /// Hand the ledger to another owner outside a phase change
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), Error> {
        let owner = Self::read_owner(&env)?;
        owner.require_auth();

        Self::write_owner(&env, &owner, &new_owner);
        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn owner(env: Env) -> Result<Address, Error> {
        Self::read_owner(&env)
    }

    pub fn token(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(Error::NotInitialized)
    }

    pub fn phase(env: Env) -> Result<SalePhase, Error> {
        Self::read_phase(&env)
    }

    /// Get one shared pool
    ///
    /// # Errors
    /// - `InvalidPoolKind`: The purchase budget is held by the sale
    pub fn pool(env: Env, kind: PoolKind) -> Result<AllocationPool, Error> {
        if kind == PoolKind::Purchase {
            return Err(Error::InvalidPoolKind);
        }
        Self::read_pool(&env, kind)
    }

    /// Get every shared pool in one read
    pub fn pools(env: Env) -> Result<PoolSet, Error> {
        Ok(PoolSet {
            ico: Self::read_pool(&env, PoolKind::Ico)?,
            team: Self::read_pool(&env, PoolKind::Team)?,
            platform: Self::read_pool(&env, PoolKind::Platform)?,
            airdrops: Self::read_pool(&env, PoolKind::Airdrops)?,
        })
    }

    pub fn pre_ico_reserved(env: Env) -> Result<i128, Error> {
        env.storage()
            .instance()
            .get(&DataKey::PreIcoReserved)
            .ok_or(Error::NotInitialized)
    }

    /// Whether a sale already took the pre-ICO reservation
    pub fn pre_ico_claimed(env: Env) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::PreIcoClaimed)
            .unwrap_or(false)
    }

    pub fn percentages(env: Env) -> Result<ReservationPercentages, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Percentages)
            .ok_or(Error::NotInitialized)
    }

    pub fn total_supply_cap(env: Env) -> Result<i128, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Cap)
            .ok_or(Error::NotInitialized)
    }

    /// Unspent pre-ICO capacity moved into the `Ico` pool
    pub fn carried_over(env: Env) -> i128 {
        env.storage()
            .instance()
            .get::<DataKey, i128>(&DataKey::CarriedOver)
            .unwrap_or(0)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn read_owner(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)
    }

    fn write_owner(env: &Env, previous: &Address, owner: &Address) {
        env.storage().instance().set(&DataKey::Owner, owner);
        bump_instance(env);

        env.events().publish(
            (Symbol::new(env, "ownership_transferred"), previous.clone()),
            OwnershipTransferredEvent {
                previous: previous.clone(),
                owner: owner.clone(),
            },
        );
    }

    fn read_phase(env: &Env) -> Result<SalePhase, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Phase)
            .ok_or(Error::NotInitialized)
    }

    fn read_pool(env: &Env, kind: PoolKind) -> Result<AllocationPool, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Pool(kind))
            .ok_or(Error::NotInitialized)
    }

    fn write_pools(env: &Env, pools: &PoolSet) {
        env.storage()
            .instance()
            .set(&DataKey::Pool(PoolKind::Ico), &pools.ico);
        env.storage()
            .instance()
            .set(&DataKey::Pool(PoolKind::Team), &pools.team);
        env.storage()
            .instance()
            .set(&DataKey::Pool(PoolKind::Platform), &pools.platform);
        env.storage()
            .instance()
            .set(&DataKey::Pool(PoolKind::Airdrops), &pools.airdrops);
    }
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
