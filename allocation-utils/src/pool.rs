use soroban_sdk::contracttype;

use crate::{LedgerError, PERCENT_BASE};

/// A capped issuance budget.
///
/// Invariant: `0 <= minted <= reserved`. `reserved` only ever grows (carry-over),
/// `minted` only ever grows (issuance).
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AllocationPool {
    /// Maximum tokens ever mintable through this pool
    pub reserved: i128,
    /// Cumulative tokens already issued through this pool
    pub minted: i128,
}

impl AllocationPool {
    pub fn new(reserved: i128) -> Self {
        Self {
            reserved,
            minted: 0,
        }
    }

    pub fn available(&self) -> i128 {
        self.reserved - self.minted
    }

    /// Check that `amount` fits without touching the pool.
    pub fn ensure_can_mint(&self, amount: i128) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if amount > self.available() {
            return Err(LedgerError::PoolExhausted);
        }
        Ok(())
    }

    /// Record `amount` as issued. Rejects the whole amount when it does not fit.
    pub fn mint(&mut self, amount: i128) -> Result<(), LedgerError> {
        self.ensure_can_mint(amount)?;
        self.minted = self
            .minted
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Grow the cap by `amount`. Zero is accepted so that a fully sold-out phase can
    /// still be carried over.
    pub fn increase_reserved(&mut self, amount: i128) -> Result<(), LedgerError> {
        if amount < 0 {
            return Err(LedgerError::InvalidAmount);
        }
        self.reserved = self
            .reserved
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }
}

/// `cap * percent / 100`, floored.
pub fn reserve_share(cap: i128, percent: u32) -> Result<i128, LedgerError> {
    cap.checked_mul(percent as i128)
        .map(|v| v / PERCENT_BASE)
        .ok_or(LedgerError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_exactly_available_empties_pool() {
        let mut pool = AllocationPool::new(1_000);
        pool.mint(400).unwrap();

        assert_eq!(pool.mint(601), Err(LedgerError::PoolExhausted));
        assert_eq!(pool.available(), 600);

        pool.mint(600).unwrap();
        assert_eq!(pool.available(), 0);
        assert_eq!(pool.minted, pool.reserved);
    }

    #[test]
    fn test_failed_mint_leaves_pool_untouched() {
        let mut pool = AllocationPool::new(10);
        pool.mint(3).unwrap();

        assert_eq!(pool.mint(8), Err(LedgerError::PoolExhausted));
        assert_eq!(pool, AllocationPool { reserved: 10, minted: 3 });
    }

    #[test]
    fn test_non_positive_mint_rejected() {
        let mut pool = AllocationPool::new(10);
        assert_eq!(pool.mint(0), Err(LedgerError::InvalidAmount));
        assert_eq!(pool.mint(-5), Err(LedgerError::InvalidAmount));
    }

    #[test]
    fn test_increase_reserved_extends_capacity() {
        let mut pool = AllocationPool::new(100);
        pool.mint(100).unwrap();
        pool.increase_reserved(50).unwrap();

        assert_eq!(pool.available(), 50);
        assert_eq!(pool.increase_reserved(-1), Err(LedgerError::InvalidAmount));
        pool.increase_reserved(0).unwrap();
        assert_eq!(pool.reserved, 150);
    }

    #[test]
    fn test_reserve_share_matches_deployment_scenario() {
        // 100,000,000 whole tokens at 4 decimals
        let cap = 1_000_000_000_000i128;

        assert_eq!(reserve_share(cap, 30).unwrap(), 300_000_000_000);
        assert_eq!(reserve_share(cap, 44).unwrap(), 440_000_000_000);
        assert_eq!(reserve_share(cap, 18).unwrap(), 180_000_000_000);
        assert_eq!(reserve_share(cap, 5).unwrap(), 50_000_000_000);
        assert_eq!(reserve_share(cap, 2).unwrap(), 20_000_000_000);
    }

    #[test]
    fn test_reserve_share_floors() {
        assert_eq!(reserve_share(999, 33).unwrap(), 329);
        assert_eq!(reserve_share(i128::MAX, 2), Err(LedgerError::Overflow));
    }
}
