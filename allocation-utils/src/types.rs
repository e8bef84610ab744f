use soroban_sdk::{contracttype, Address, Vec};

use crate::{AllocationPool, LedgerError};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum PoolKind {
    /// Budget sold to whitelisted buyers in the current phase
    Purchase = 0,
    /// Reserve that becomes the purchase budget of the ICO phase
    Ico = 1,
    Team = 2,
    Platform = 3,
    Airdrops = 4,
}

impl PoolKind {
    /// Pools that only the owner may mint from by hand.
    pub fn is_manual(&self) -> bool {
        matches!(self, PoolKind::Team | PoolKind::Platform | PoolKind::Airdrops)
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SalePhase {
    PreIco = 0,
    Ico = 1,
    /// Every phase finalized, nothing left to sell
    Completed = 2,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaleState {
    /// Before the opening time
    Pending = 0,
    /// Inside the sale window
    Open = 1,
    /// Past the closing time, waiting for finalize
    Closed = 2,
    /// Terminal
    Finalized = 3,
}

/// Share of the total supply cap reserved for each budget, in whole percent.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReservationPercentages {
    pub pre_ico: u32,
    pub ico: u32,
    pub team: u32,
    pub platform: u32,
    pub airdrops: u32,
}

impl ReservationPercentages {
    /// Parse `[pre_ico, ico, team, platform, airdrops]`. The shares may leave part of
    /// the cap unreserved but never exceed it.
    pub fn from_vec(percentages: &Vec<u32>) -> Result<Self, LedgerError> {
        if percentages.len() != 5 {
            return Err(LedgerError::InvalidConfiguration);
        }

        let parsed = Self {
            pre_ico: percentages.get_unchecked(0),
            ico: percentages.get_unchecked(1),
            team: percentages.get_unchecked(2),
            platform: percentages.get_unchecked(3),
            airdrops: percentages.get_unchecked(4),
        };

        if parsed.total() > 100 {
            return Err(LedgerError::InvalidConfiguration);
        }
        Ok(parsed)
    }

    pub fn total(&self) -> u64 {
        self.pre_ico as u64
            + self.ico as u64
            + self.team as u64
            + self.platform as u64
            + self.airdrops as u64
    }
}

/// Returned by the shared ledger when a sale takes over.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PhaseGrant {
    pub phase: SalePhase,
    /// Local purchase budget handed to the sale; zero when purchases draw on `Ico`
    pub purchase_reserved: i128,
}

/// The long-lived pools as one consistent read.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolSet {
    pub ico: AllocationPool,
    pub team: AllocationPool,
    pub platform: AllocationPool,
    pub airdrops: AllocationPool,
}

impl PoolSet {
    pub fn total_reserved(&self) -> i128 {
        self.ico.reserved + self.team.reserved + self.platform.reserved + self.airdrops.reserved
    }
}

/// Pool snapshot taken by `finalize` before anything is mutated.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FinalizationReport {
    pub phase: SalePhase,
    pub purchase: AllocationPool,
    pub shared: PoolSet,
    /// Unspent purchase capacity moved into the ICO reserve
    pub carried_over: i128,
    pub next_owner: Address,
    pub finalized_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{vec, Env};

    #[test]
    fn test_parse_percentages() {
        let env = Env::default();
        let parsed =
            ReservationPercentages::from_vec(&vec![&env, 30u32, 44, 18, 5, 2]).unwrap();

        assert_eq!(parsed.pre_ico, 30);
        assert_eq!(parsed.airdrops, 2);
        assert_eq!(parsed.total(), 99);
    }

    #[test]
    fn test_percentages_over_cap_rejected() {
        let env = Env::default();
        assert_eq!(
            ReservationPercentages::from_vec(&vec![&env, 30u32, 45, 18, 5, 3]),
            Err(LedgerError::InvalidConfiguration)
        );
        assert_eq!(
            ReservationPercentages::from_vec(&vec![&env, 30u32, 44, 18, 5]),
            Err(LedgerError::InvalidConfiguration)
        );
        assert_eq!(
            ReservationPercentages::from_vec(&vec![&env, u32::MAX, u32::MAX, 0, 0, 0]),
            Err(LedgerError::InvalidConfiguration)
        );
    }

    #[test]
    fn test_manual_kinds() {
        assert!(PoolKind::Team.is_manual());
        assert!(PoolKind::Platform.is_manual());
        assert!(PoolKind::Airdrops.is_manual());
        assert!(!PoolKind::Purchase.is_manual());
        assert!(!PoolKind::Ico.is_manual());
    }
}
