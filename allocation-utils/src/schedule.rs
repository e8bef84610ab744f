use soroban_sdk::{contracttype, Env, Vec};

use crate::LedgerError;

/// Discount percentages over time.
///
/// `edges` are the stage boundaries inside the sale window and `rates` holds one
/// entry per stage, so `rates.len() == edges.len() + 1`. A timestamp equal to an
/// edge already belongs to the later stage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiscountSchedule {
    pub edges: Vec<u64>,
    pub rates: Vec<u32>,
}

impl DiscountSchedule {
    /// Build a schedule, rejecting non-increasing edges, a rate count that does not
    /// match the edge count, rising discounts and discounts above 100%.
    pub fn new(edges: Vec<u64>, rates: Vec<u32>) -> Result<Self, LedgerError> {
        if rates.len() != edges.len() + 1 {
            return Err(LedgerError::InvalidConfiguration);
        }

        let mut previous: Option<u64> = None;
        for edge in edges.iter() {
            if let Some(prev) = previous {
                if edge <= prev {
                    return Err(LedgerError::InvalidConfiguration);
                }
            }
            previous = Some(edge);
        }

        let mut previous_rate: Option<u32> = None;
        for rate in rates.iter() {
            if rate > 100 {
                return Err(LedgerError::InvalidConfiguration);
            }
            if let Some(prev) = previous_rate {
                if rate > prev {
                    return Err(LedgerError::InvalidConfiguration);
                }
            }
            previous_rate = Some(rate);
        }

        Ok(Self { edges, rates })
    }

    /// Split `[opening, edge_1, .., edge_n, closing]` into the sale window and its
    /// stage schedule. Every timing must be strictly greater than the previous one.
    pub fn from_timings(
        env: &Env,
        timings: &Vec<u64>,
        rates: Vec<u32>,
    ) -> Result<(u64, u64, Self), LedgerError> {
        let count = timings.len();
        if count < 2 {
            return Err(LedgerError::InvalidConfiguration);
        }

        let opening = timings.get_unchecked(0);
        let closing = timings.get_unchecked(count - 1);

        let mut edges = Vec::new(env);
        let mut previous = opening;
        for i in 1..count {
            let timing = timings.get_unchecked(i);
            if timing <= previous {
                return Err(LedgerError::InvalidConfiguration);
            }
            if i < count - 1 {
                edges.push_back(timing);
            }
            previous = timing;
        }

        let schedule = Self::new(edges, rates)?;
        Ok((opening, closing, schedule))
    }

    /// Smallest `i` with `now < edges[i]`, or the edge count once every edge is past.
    pub fn stage_index(&self, now: u64) -> u32 {
        for (i, edge) in self.edges.iter().enumerate() {
            if now < edge {
                return i as u32;
            }
        }
        self.edges.len()
    }

    pub fn discount_at(&self, now: u64) -> u32 {
        self.rates.get_unchecked(self.stage_index(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::vec;

    fn pre_ico_schedule(env: &Env) -> DiscountSchedule {
        DiscountSchedule::new(
            vec![env, 100u64, 200, 300, 400, 500],
            vec![env, 20u32, 18, 16, 14, 12, 10],
        )
        .unwrap()
    }

    #[test]
    fn test_stage_index_walks_edges() {
        let env = Env::default();
        let schedule = pre_ico_schedule(&env);

        assert_eq!(schedule.stage_index(0), 0);
        assert_eq!(schedule.stage_index(99), 0);
        assert_eq!(schedule.stage_index(150), 1);
        assert_eq!(schedule.stage_index(499), 4);
        assert_eq!(schedule.stage_index(10_000), 5);
        assert_eq!(schedule.rates.len(), 6);
    }

    #[test]
    fn test_edge_belongs_to_later_stage() {
        let env = Env::default();
        let schedule = pre_ico_schedule(&env);

        assert_eq!(schedule.discount_at(99), 20);
        assert_eq!(schedule.discount_at(100), 18);
        assert_eq!(schedule.discount_at(300), 14);
        assert_eq!(schedule.discount_at(500), 10);
    }

    #[test]
    fn test_single_stage_schedule() {
        let env = Env::default();
        let schedule = DiscountSchedule::new(Vec::new(&env), vec![&env, 0u32]).unwrap();

        assert_eq!(schedule.stage_index(u64::MAX), 0);
        assert_eq!(schedule.discount_at(42), 0);
    }

    #[test]
    fn test_rejects_malformed_schedules() {
        let env = Env::default();

        // rate count mismatch
        assert_eq!(
            DiscountSchedule::new(vec![&env, 10u64, 20], vec![&env, 5u32, 4]),
            Err(LedgerError::InvalidConfiguration)
        );
        // repeated edge
        assert_eq!(
            DiscountSchedule::new(vec![&env, 10u64, 10], vec![&env, 5u32, 4, 3]),
            Err(LedgerError::InvalidConfiguration)
        );
        // rising discount
        assert_eq!(
            DiscountSchedule::new(vec![&env, 10u64, 20], vec![&env, 5u32, 6, 3]),
            Err(LedgerError::InvalidConfiguration)
        );
        // above 100%
        assert_eq!(
            DiscountSchedule::new(Vec::new(&env), vec![&env, 101u32]),
            Err(LedgerError::InvalidConfiguration)
        );
    }

    #[test]
    fn test_from_timings_splits_window() {
        let env = Env::default();
        let timings = vec![&env, 1_000u64, 1_100, 1_200, 1_300];

        let (opening, closing, schedule) =
            DiscountSchedule::from_timings(&env, &timings, vec![&env, 10u32, 9, 8]).unwrap();

        assert_eq!(opening, 1_000);
        assert_eq!(closing, 1_300);
        assert_eq!(schedule.edges, vec![&env, 1_100u64, 1_200]);
        assert_eq!(schedule.discount_at(1_250), 8);
    }

    #[test]
    fn test_from_timings_rejects_bad_window() {
        let env = Env::default();

        assert_eq!(
            DiscountSchedule::from_timings(&env, &vec![&env, 5u64], vec![&env, 0u32]),
            Err(LedgerError::InvalidConfiguration)
        );
        assert_eq!(
            DiscountSchedule::from_timings(&env, &vec![&env, 5u64, 5], vec![&env, 0u32]),
            Err(LedgerError::InvalidConfiguration)
        );
        assert_eq!(
            DiscountSchedule::from_timings(&env, &vec![&env, 5u64, 9, 7], vec![&env, 2u32, 1]),
            Err(LedgerError::InvalidConfiguration)
        );
    }
}
