#![no_std]

mod error;
mod events;
mod pricing;
mod storage;
mod validation;


pub use error::Error;
use events::*;
use pricing::quote;
pub use storage::SaleParams;
use storage::{
    DataKey, SaleConfig, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD,
    WHITELIST_BUMP_AMOUNT, WHITELIST_LIFETIME_THRESHOLD,
};
use validation::{
    ensure_not_finalized, ensure_not_paused, ensure_open, ensure_whitelisted, require_owner,
    validate_params,
};

use allocation_utils::{
    AllocationPool, DiscountSchedule, FinalizationReport, PhaseGrant, PoolKind, PoolSet,
    SalePhase, SaleState,
};
use soroban_sdk::{contract, contractimpl, log, token, vec, Address, Env, IntoVal, Symbol, Vec};

/// One phase of the token sale.
///
/// Sells to whitelisted buyers at a stage discount, lets the owner mint the team,
/// platform and airdrop budgets, and on `finalize` hands the shared ledger and the
/// token's minting rights to the next owner.
#[contract]
pub struct SaleLedger;

#[contractimpl]
impl SaleLedger {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize the sale and take over the shared ledger and the token
    ///
    /// `owner` must currently own the shared ledger and be the token admin.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidConfiguration`: Bad timings or discounts, rate <= 0, negative
    ///   minimum, the pre-ICO reservation already taken by another sale, or the
    ///   shared ledger has no phase left to run
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        shared_ledger: Address,
        wallet: Address,
        payment_token: Address,
        params: SaleParams,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        validate_params(params.rate, params.min_purchase)?;
        let (opening_time, closing_time, schedule) =
            DiscountSchedule::from_timings(&env, &params.timings, params.discounts)?;

        // The shared ledger must still have a phase to hand out
        let current_phase = env.invoke_contract::<SalePhase>(
            &shared_ledger,
            &Symbol::new(&env, "phase"),
            Vec::new(&env),
        );
        let grant_taken = current_phase == SalePhase::PreIco
            && env.invoke_contract::<bool>(
                &shared_ledger,
                &Symbol::new(&env, "pre_ico_claimed"),
                Vec::new(&env),
            );
        if current_phase == SalePhase::Completed || grant_taken {
            return Err(Error::InvalidConfiguration);
        }

        let config = SaleConfig {
            rate: params.rate,
            opening_time,
            closing_time,
            min_purchase: params.min_purchase,
            token_decimals: token::Client::new(&env, &token).decimals(),
            payment_decimals: token::Client::new(&env, &payment_token).decimals(),
        };

        // Take over the shared pools, then the minting rights
        let this = env.current_contract_address();
        let grant = env.invoke_contract::<PhaseGrant>(
            &shared_ledger,
            &Symbol::new(&env, "begin_phase"),
            vec![&env, this.to_val()],
        );
        token::StellarAssetClient::new(&env, &token).set_admin(&this);

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage()
            .instance()
            .set(&DataKey::SharedLedger, &shared_ledger);
        env.storage().instance().set(&DataKey::Wallet, &wallet);
        env.storage()
            .instance()
            .set(&DataKey::PaymentToken, &payment_token);
        env.storage().instance().set(&DataKey::Config, &config);
        env.storage().instance().set(&DataKey::Schedule, &schedule);
        env.storage().instance().set(&DataKey::Phase, &grant.phase);
        if grant.phase == SalePhase::PreIco {
            env.storage().instance().set(
                &DataKey::PurchasePool,
                &AllocationPool::new(grant.purchase_reserved),
            );
        }
        env.storage().instance().set(&DataKey::Paused, &false);
        env.storage().instance().set(&DataKey::Finalized, &false);
        bump_instance(&env);

        log!(&env, "sale initialized", opening_time, closing_time, grant.purchase_reserved);
        env.events().publish(
            (Symbol::new(&env, "initialized"), owner),
            SaleInitializedEvent {
                phase: grant.phase,
                opening_time,
                closing_time,
                rate: config.rate,
                purchase_reserved: grant.purchase_reserved,
            },
        );

        Ok(())
    }

    // ============================================
    // PURCHASE
    // ============================================

    /// Buy tokens at the current stage discount
    ///
    /// The payment goes straight to the wallet. Returns the tokens minted.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NotWhitelisted`: Buyer not whitelisted
    /// - `AlreadyFinalized`: Sale finalized
    /// - `Paused`: Sale is paused
    /// - `NotOpen`: Outside the sale window
    /// - `BelowMinimum`: pay_amount below the minimum purchase
    /// - `InvalidAmount`: Payment prices to zero tokens
    /// - `PoolExhausted`: Not enough left in the purchase pool, nothing is sold
    pub fn purchase(env: Env, buyer: Address, pay_amount: i128) -> Result<i128, Error> {
        let config = Self::read_config(&env)?;
        ensure_whitelisted(&env, &buyer)?;
        ensure_not_finalized(&env)?;
        ensure_not_paused(&env)?;

        let now = env.ledger().timestamp();
        ensure_open(&config, now)?;

        if pay_amount < config.min_purchase {
            return Err(Error::BelowMinimum);
        }

        buyer.require_auth();

        let schedule = Self::read_schedule(&env)?;
        let (tokens, discount) = quote(&config, &schedule, pay_amount, now)?;

        let phase = Self::read_phase(&env)?;
        let mut pool = Self::purchase_pool(&env, phase)?;
        pool.mint(tokens)?;
        if phase != SalePhase::PreIco {
            Self::shared_mint(&env, PoolKind::Ico, tokens)?;
        }

        let payment_token = Self::read_address(&env, &DataKey::PaymentToken)?;
        let wallet = Self::read_address(&env, &DataKey::Wallet)?;
        token::Client::new(&env, &payment_token).transfer(&buyer, &wallet, &pay_amount);

        let sale_token = Self::read_address(&env, &DataKey::Token)?;
        token::StellarAssetClient::new(&env, &sale_token).mint(&buyer, &tokens);

        if phase == SalePhase::PreIco {
            env.storage().instance().set(&DataKey::PurchasePool, &pool);
        }
        bump_instance(&env);

        log!(&env, "purchase", buyer, pay_amount, tokens, discount);
        env.events().publish(
            (Symbol::new(&env, "purchased"), buyer.clone()),
            PurchasedEvent {
                buyer,
                pay_amount,
                tokens,
                discount,
            },
        );

        Ok(tokens)
    }

    // ============================================
    // MANUAL ALLOCATIONS
    // ============================================

    /// Mint from the team, platform or airdrop budget (owner only)
    ///
    /// Not bound to the sale window.
    ///
    /// # Errors
    /// - `NotOwner`: Caller is not the owner
    /// - `AlreadyFinalized`: Sale finalized
    /// - `Paused`: Sale is paused
    /// - `InvalidPoolKind`: kind is Purchase or Ico
    /// - `InvalidAmount`: Amount <= 0
    /// - `PoolExhausted`: Amount above what is left in the pool
    pub fn manual_mint(
        env: Env,
        caller: Address,
        kind: PoolKind,
        recipient: Address,
        amount: i128,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        ensure_not_finalized(&env)?;
        ensure_not_paused(&env)?;

        if !kind.is_manual() {
            return Err(Error::InvalidPoolKind);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        Self::shared_pool(&env, kind)?.ensure_can_mint(amount)?;
        Self::shared_mint(&env, kind, amount)?;

        let sale_token = Self::read_address(&env, &DataKey::Token)?;
        token::StellarAssetClient::new(&env, &sale_token).mint(&recipient, &amount);
        bump_instance(&env);

        log!(&env, "manual mint", recipient, amount);
        env.events().publish(
            (Symbol::new(&env, "manual_mint"), kind),
            ManualMintEvent {
                kind,
                recipient,
                amount,
            },
        );

        Ok(())
    }

    // ============================================
    // WHITELIST
    // ============================================

    pub fn add_address_to_whitelist(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        Self::write_whitelisted(&env, &account, true);
        Ok(())
    }

    pub fn add_addresses_to_whitelist(
        env: Env,
        caller: Address,
        accounts: Vec<Address>,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        for account in accounts.iter() {
            Self::write_whitelisted(&env, &account, true);
        }
        Ok(())
    }

    pub fn remove_address_from_whitelist(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        Self::write_whitelisted(&env, &account, false);
        Ok(())
    }

    pub fn remove_addresses_from_whitelist(
        env: Env,
        caller: Address,
        accounts: Vec<Address>,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        for account in accounts.iter() {
            Self::write_whitelisted(&env, &account, false);
        }
        Ok(())
    }

    pub fn is_whitelisted(env: Env, account: Address) -> bool {
        ensure_whitelisted(&env, &account).is_ok()
    }

    // ============================================
    // ADMIN
    // ============================================

    /// Pause purchases and manual mints. Pausing twice is a no-op.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NotOwner`: Caller is not the owner
    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        Self::write_paused(&env, true);
        Ok(())
    }

    /// Resume purchases and manual mints
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NotOwner`: Caller is not the owner
    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        Self::write_paused(&env, false);
        Ok(())
    }

    /// Hand the sale to a new owner
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NotOwner`: Caller is not the owner
    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        let owner = require_owner(&env, &caller)?;

        env.storage().instance().set(&DataKey::Owner, &new_owner);
        bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "ownership_transferred"), owner.clone()),
            OwnershipTransferredEvent {
                previous: owner,
                owner: new_owner,
            },
        );

        Ok(())
    }

    // ============================================
    // FINALIZATION
    // ============================================

    /// Close the phase once the window has ended
    ///
    /// Unspent pre-ICO capacity moves into the shared `Ico` pool. The shared ledger
    /// and the token's minting rights pass to `successor`, or back to the owner when
    /// none is given. Pool figures in the report are taken before any change.
    ///
    /// # Errors
    /// - `NotOwner`: Caller is not the owner
    /// - `StillOpen`: Closing time not reached
    /// - `AlreadyFinalized`: Sale finalized
    pub fn finalize(
        env: Env,
        caller: Address,
        successor: Option<Address>,
    ) -> Result<FinalizationReport, Error> {
        let owner = require_owner(&env, &caller)?;
        let config = Self::read_config(&env)?;

        let now = env.ledger().timestamp();
        if now < config.closing_time {
            return Err(Error::StillOpen);
        }
        ensure_not_finalized(&env)?;

        let phase = Self::read_phase(&env)?;
        let purchase = Self::purchase_pool(&env, phase)?;
        let shared = Self::shared_pools(&env)?;
        let carried_over = match phase {
            SalePhase::PreIco => purchase.available(),
            _ => 0,
        };
        let next_owner = successor.unwrap_or(owner);

        let shared_ledger = Self::read_address(&env, &DataKey::SharedLedger)?;
        env.invoke_contract::<SalePhase>(
            &shared_ledger,
            &Symbol::new(&env, "close_phase"),
            vec![&env, carried_over.into_val(&env), next_owner.to_val()],
        );

        let sale_token = Self::read_address(&env, &DataKey::Token)?;
        token::StellarAssetClient::new(&env, &sale_token).set_admin(&next_owner);

        env.storage().instance().set(&DataKey::Finalized, &true);
        bump_instance(&env);

        let report = FinalizationReport {
            phase,
            purchase,
            shared,
            carried_over,
            next_owner,
            finalized_at: now,
        };

        log!(&env, "sale finalized", carried_over);
        env.events().publish(
            (Symbol::new(&env, "finalized"), phase),
            FinalizedEvent {
                report: report.clone(),
            },
        );

        Ok(report)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Tokens still mintable from `kind`
    ///
    /// Team, platform and airdrop figures are only shown to the owner.
    ///
    /// # Errors
    /// - `NotOwner`: Manual pool read by someone other than the owner
    pub fn tokens_available_to_mint(
        env: Env,
        caller: Address,
        kind: PoolKind,
    ) -> Result<i128, Error> {
        if kind.is_manual() {
            require_owner(&env, &caller)?;
        }
        Ok(Self::pool_of(&env, kind)?.available())
    }

    pub fn tokens_minted(env: Env, kind: PoolKind) -> Result<i128, Error> {
        Ok(Self::pool_of(&env, kind)?.minted)
    }

    pub fn token_limit_reserved(env: Env, kind: PoolKind) -> Result<i128, Error> {
        Ok(Self::pool_of(&env, kind)?.reserved)
    }

    pub fn current_discount(env: Env) -> Result<u32, Error> {
        let schedule = Self::read_schedule(&env)?;
        Ok(schedule.discount_at(env.ledger().timestamp()))
    }

    /// Tokens `pay_amount` would buy right now
    pub fn calculate_token_amount(env: Env, pay_amount: i128) -> Result<i128, Error> {
        let config = Self::read_config(&env)?;
        let schedule = Self::read_schedule(&env)?;
        let (tokens, _) = quote(&config, &schedule, pay_amount, env.ledger().timestamp())?;
        Ok(tokens)
    }

    pub fn has_opened(env: Env) -> Result<bool, Error> {
        let config = Self::read_config(&env)?;
        Ok(env.ledger().timestamp() >= config.opening_time)
    }

    pub fn has_closed(env: Env) -> Result<bool, Error> {
        let config = Self::read_config(&env)?;
        Ok(env.ledger().timestamp() >= config.closing_time)
    }

    pub fn current_crowdsale_type(env: Env) -> Result<SalePhase, Error> {
        Self::read_phase(&env)
    }

    pub fn state(env: Env) -> Result<SaleState, Error> {
        let config = Self::read_config(&env)?;
        if Self::is_finalized(env.clone()) {
            return Ok(SaleState::Finalized);
        }

        let now = env.ledger().timestamp();
        let state = if now < config.opening_time {
            SaleState::Pending
        } else if now < config.closing_time {
            SaleState::Open
        } else {
            SaleState::Closed
        };
        Ok(state)
    }

    pub fn is_paused(env: Env) -> bool {
        ensure_not_paused(&env).is_err()
    }

    pub fn is_finalized(env: Env) -> bool {
        ensure_not_finalized(&env).is_err()
    }

    pub fn stage_edges(env: Env) -> Result<Vec<u64>, Error> {
        Ok(Self::read_schedule(&env)?.edges)
    }

    pub fn opening_time(env: Env) -> Result<u64, Error> {
        Ok(Self::read_config(&env)?.opening_time)
    }

    pub fn closing_time(env: Env) -> Result<u64, Error> {
        Ok(Self::read_config(&env)?.closing_time)
    }

    pub fn rate(env: Env) -> Result<i128, Error> {
        Ok(Self::read_config(&env)?.rate)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        Self::read_address(&env, &DataKey::Owner)
    }

    pub fn wallet(env: Env) -> Result<Address, Error> {
        Self::read_address(&env, &DataKey::Wallet)
    }

    pub fn token(env: Env) -> Result<Address, Error> {
        Self::read_address(&env, &DataKey::Token)
    }

    pub fn shared_ledger(env: Env) -> Result<Address, Error> {
        Self::read_address(&env, &DataKey::SharedLedger)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn read_address(env: &Env, key: &DataKey) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(key)
            .ok_or(Error::NotInitialized)
    }

    fn read_config(env: &Env) -> Result<SaleConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    fn read_schedule(env: &Env) -> Result<DiscountSchedule, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Schedule)
            .ok_or(Error::NotInitialized)
    }

    fn read_phase(env: &Env) -> Result<SalePhase, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Phase)
            .ok_or(Error::NotInitialized)
    }

    /// Budget purchases draw on: the local pool before the ICO, the shared `Ico`
    /// pool during it.
    fn purchase_pool(env: &Env, phase: SalePhase) -> Result<AllocationPool, Error> {
        match phase {
            SalePhase::PreIco => env
                .storage()
                .instance()
                .get(&DataKey::PurchasePool)
                .ok_or(Error::NotInitialized),
            _ => Self::shared_pool(env, PoolKind::Ico),
        }
    }

    fn pool_of(env: &Env, kind: PoolKind) -> Result<AllocationPool, Error> {
        match kind {
            PoolKind::Purchase => Self::purchase_pool(env, Self::read_phase(env)?),
            _ => Self::shared_pool(env, kind),
        }
    }

    fn shared_pool(env: &Env, kind: PoolKind) -> Result<AllocationPool, Error> {
        let shared_ledger = Self::read_address(env, &DataKey::SharedLedger)?;
        Ok(env.invoke_contract::<AllocationPool>(
            &shared_ledger,
            &Symbol::new(env, "pool"),
            vec![env, kind.into_val(env)],
        ))
    }

    fn shared_pools(env: &Env) -> Result<PoolSet, Error> {
        let shared_ledger = Self::read_address(env, &DataKey::SharedLedger)?;
        Ok(env.invoke_contract::<PoolSet>(
            &shared_ledger,
            &Symbol::new(env, "pools"),
            Vec::new(env),
        ))
    }

    /// Callers check the pool first; a failing mint here aborts the whole call.
    fn shared_mint(env: &Env, kind: PoolKind, amount: i128) -> Result<AllocationPool, Error> {
        let shared_ledger = Self::read_address(env, &DataKey::SharedLedger)?;
        Ok(env.invoke_contract::<AllocationPool>(
            &shared_ledger,
            &Symbol::new(env, "mint"),
            vec![env, kind.into_val(env), amount.into_val(env)],
        ))
    }

    fn write_whitelisted(env: &Env, account: &Address, listed: bool) {
        let key = DataKey::Whitelisted(account.clone());
        let event = if listed {
            env.storage().persistent().set(&key, &true);
            env.storage().persistent().extend_ttl(
                &key,
                WHITELIST_LIFETIME_THRESHOLD,
                WHITELIST_BUMP_AMOUNT,
            );
            "whitelist_added"
        } else {
            env.storage().persistent().remove(&key);
            "whitelist_removed"
        };
        bump_instance(env);

        env.events().publish(
            (Symbol::new(env, event), account.clone()),
            WhitelistEvent {
                account: account.clone(),
            },
        );
    }

    fn write_paused(env: &Env, paused: bool) {
        env.storage().instance().set(&DataKey::Paused, &paused);
        bump_instance(env);

        let event = if paused { "paused" } else { "unpaused" };
        env.events()
            .publish((Symbol::new(env, event),), PauseEvent { paused });
    }
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
