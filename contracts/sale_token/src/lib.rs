#![no_std]

mod error;
mod events;
mod storage;

pub use error::Error;
use events::{AdminChangedEvent, MintEvent, TransferEvent};
use storage::{
    DataKey, TokenMetadata, BALANCE_BUMP_AMOUNT, BALANCE_LIFETIME_THRESHOLD,
    INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, MAX_DECIMALS,
};

use soroban_sdk::{contract, contractimpl, log, Address, Env, String, Symbol};

/// Mintable sale token.
///
/// Exposes the admin half of the Stellar asset interface (`mint`, `set_admin`,
/// `admin`) so the active sale can drive it through `token::StellarAssetClient`.
#[contract]
pub struct SaleToken;

#[contractimpl]
impl SaleToken {
    /// Initialize the token contract
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidDecimals`: More than 18 decimals requested
    pub fn initialize(
        env: Env,
        admin: Address,
        decimal: u32,
        name: String,
        symbol: String,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        if decimal > MAX_DECIMALS {
            return Err(Error::InvalidDecimals);
        }

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::TotalSupply, &0i128);
        env.storage().instance().set(
            &DataKey::Metadata,
            &TokenMetadata {
                decimal,
                name,
                symbol,
            },
        );
        bump_instance(&env);

        Ok(())
    }

    /// Mint tokens (admin only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0 or supply overflow
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), Error> {
        let admin = Self::read_admin(&env)?;
        admin.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let total_supply = Self::total_supply(env.clone())
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        let new_balance = Self::balance(env.clone(), to.clone())
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;

        write_balance(&env, &to, new_balance);
        env.storage()
            .instance()
            .set(&DataKey::TotalSupply, &total_supply);
        bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "mint"), admin, to.clone()),
            MintEvent {
                to,
                amount,
                total_supply,
            },
        );

        Ok(())
    }

    /// Hand minting rights to a new admin
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn set_admin(env: Env, new_admin: Address) -> Result<(), Error> {
        let admin = Self::read_admin(&env)?;
        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &new_admin);
        bump_instance(&env);

        log!(&env, "token admin changed", admin, new_admin);
        env.events().publish(
            (Symbol::new(&env, "set_admin"), admin.clone()),
            AdminChangedEvent {
                previous: admin,
                admin: new_admin,
            },
        );

        Ok(())
    }

    /// Transfer tokens between holders
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientBalance`: Not enough balance
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        from.require_auth();

        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            return Err(Error::InsufficientBalance);
        }
        write_balance(&env, &from, from_balance - amount);

        let to_balance = Self::balance(env.clone(), to.clone())
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        write_balance(&env, &to, to_balance);

        env.events().publish(
            (Symbol::new(&env, "transfer"), from.clone(), to.clone()),
            TransferEvent { from, to, amount },
        );

        Ok(())
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        Self::read_admin(&env)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .persistent()
            .get::<DataKey, i128>(&DataKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn total_supply(env: Env) -> i128 {
        env.storage()
            .instance()
            .get::<DataKey, i128>(&DataKey::TotalSupply)
            .unwrap_or(0)
    }

    pub fn decimals(env: Env) -> Result<u32, Error> {
        Ok(Self::read_metadata(&env)?.decimal)
    }

    pub fn name(env: Env) -> Result<String, Error> {
        Ok(Self::read_metadata(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, Error> {
        Ok(Self::read_metadata(&env)?.symbol)
    }

    fn read_admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    fn read_metadata(env: &Env) -> Result<TokenMetadata, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Metadata)
            .ok_or(Error::NotInitialized)
    }
}

fn write_balance(env: &Env, id: &Address, amount: i128) {
    let key = DataKey::Balance(id.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
