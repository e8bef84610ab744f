use soroban_sdk::{Address, Env};

use crate::error::Error;
use crate::storage::{DataKey, SaleConfig};

/// Authenticate `caller` and check that it owns the sale.
pub fn require_owner(env: &Env, caller: &Address) -> Result<Address, Error> {
    let owner: Address = env
        .storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)?;

    caller.require_auth();

    if *caller != owner {
        return Err(Error::NotOwner);
    }
    Ok(owner)
}

pub fn ensure_not_finalized(env: &Env) -> Result<(), Error> {
    let finalized = env
        .storage()
        .instance()
        .get::<DataKey, bool>(&DataKey::Finalized)
        .unwrap_or(false);

    if finalized {
        return Err(Error::AlreadyFinalized);
    }
    Ok(())
}

pub fn ensure_not_paused(env: &Env) -> Result<(), Error> {
    let paused = env
        .storage()
        .instance()
        .get::<DataKey, bool>(&DataKey::Paused)
        .unwrap_or(false);

    if paused {
        return Err(Error::Paused);
    }
    Ok(())
}

pub fn ensure_whitelisted(env: &Env, account: &Address) -> Result<(), Error> {
    let listed = env
        .storage()
        .persistent()
        .get::<DataKey, bool>(&DataKey::Whitelisted(account.clone()))
        .unwrap_or(false);

    if !listed {
        return Err(Error::NotWhitelisted);
    }
    Ok(())
}

/// `opening <= now < closing`
pub fn ensure_open(config: &SaleConfig, now: u64) -> Result<(), Error> {
    if now < config.opening_time || now >= config.closing_time {
        return Err(Error::NotOpen);
    }
    Ok(())
}

pub fn validate_params(rate: i128, min_purchase: i128) -> Result<(), Error> {
    if rate <= 0 || min_purchase < 0 {
        return Err(Error::InvalidConfiguration);
    }
    Ok(())
}
