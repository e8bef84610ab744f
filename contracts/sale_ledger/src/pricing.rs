use allocation_utils::{tokens_for, DiscountSchedule};

use crate::error::Error;
use crate::storage::SaleConfig;

/// Price a payment at the discount active at `now`
///
/// Returns the token amount together with the discount it was priced at.
///
/// Example:
/// - rate 100, 4 token decimals, 7 payment decimals
/// - 0.5 payment units in the first stage (20%)
/// - 500,000 base units + 100,000 bonus = 600,000 units
pub fn quote(
    config: &SaleConfig,
    schedule: &DiscountSchedule,
    pay_amount: i128,
    now: u64,
) -> Result<(i128, u32), Error> {
    let discount = schedule.discount_at(now);
    let tokens = tokens_for(
        pay_amount,
        config.rate,
        config.token_decimals,
        config.payment_decimals,
        discount,
    )?;
    Ok((tokens, discount))
}
