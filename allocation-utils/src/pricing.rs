use crate::{LedgerError, PERCENT_BASE};

/// Convert a payment into token units.
///
/// Formula:
/// - base  = pay_amount × rate × 10^token_decimals / 10^payment_decimals
/// - bonus = base × discount_percent / 100
/// - total = base + bonus
///
/// Every division floors. `rate` is whole tokens per whole payment unit.
///
/// Example:
/// - 0.5 payment units, rate 100, 4 token decimals, 20% discount
/// - base = 0.5 × 100 × 10^4 = 500,000 units, bonus = 100,000
/// - total = 600,000 units (60 tokens)
pub fn tokens_for(
    pay_amount: i128,
    rate: i128,
    token_decimals: u32,
    payment_decimals: u32,
    discount_percent: u32,
) -> Result<i128, LedgerError> {
    if pay_amount <= 0 || rate <= 0 {
        return Err(LedgerError::InvalidAmount);
    }

    let token_unit = 10i128
        .checked_pow(token_decimals)
        .ok_or(LedgerError::Overflow)?;
    let payment_unit = 10i128
        .checked_pow(payment_decimals)
        .ok_or(LedgerError::Overflow)?;

    let base = pay_amount
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(token_unit))
        .ok_or(LedgerError::Overflow)?
        / payment_unit;

    let bonus = base
        .checked_mul(discount_percent as i128)
        .ok_or(LedgerError::Overflow)?
        / PERCENT_BASE;

    let total = base.checked_add(bonus).ok_or(LedgerError::Overflow)?;
    if total == 0 {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEI: i128 = 1_000_000_000_000_000_000;
    const STROOP_UNIT: i128 = 10_000_000;

    #[test]
    fn test_half_unit_at_twenty_percent() {
        let tokens = tokens_for(WEI / 2, 100, 4, 18, 20).unwrap();
        assert_eq!(tokens, 600_000);
    }

    #[test]
    fn test_stage_vectors() {
        assert_eq!(tokens_for(WEI * 3 / 2, 100, 4, 18, 18).unwrap(), 1_770_000);
        assert_eq!(tokens_for(2 * WEI, 100, 4, 18, 16).unwrap(), 2_320_000);
        assert_eq!(tokens_for(3 * WEI, 100, 4, 18, 14).unwrap(), 3_420_000);
        assert_eq!(tokens_for(4 * WEI, 100, 4, 18, 12).unwrap(), 4_480_000);
        assert_eq!(tokens_for(5 * WEI, 100, 4, 18, 10).unwrap(), 5_500_000);
    }

    #[test]
    fn test_high_rate_ico_vectors() {
        assert_eq!(tokens_for(WEI, 500_000, 4, 18, 10).unwrap(), 5_500_000_000);
        assert_eq!(tokens_for(2 * WEI, 500_000, 4, 18, 9).unwrap(), 10_900_000_000);
        assert_eq!(tokens_for(3 * WEI, 500_000, 4, 18, 8).unwrap(), 16_200_000_000);
    }

    #[test]
    fn test_result_independent_of_payment_precision() {
        assert_eq!(
            tokens_for(STROOP_UNIT / 2, 100, 4, 7, 20).unwrap(),
            tokens_for(WEI / 2, 100, 4, 18, 20).unwrap()
        );
    }

    #[test]
    fn test_floors_instead_of_rounding() {
        // base = 15, bonus = 15 * 10 / 100 = 1.5 -> 1
        assert_eq!(tokens_for(15, 1, 0, 0, 10).unwrap(), 16);
        // base = 19 * 1 / 10 = 1.9 -> 1
        assert_eq!(tokens_for(19, 1, 0, 1, 0).unwrap(), 1);
    }

    #[test]
    fn test_rejects_zero_and_dust() {
        assert_eq!(tokens_for(0, 100, 4, 18, 20), Err(LedgerError::InvalidAmount));
        assert_eq!(tokens_for(-1, 100, 4, 18, 20), Err(LedgerError::InvalidAmount));
        // one wei buys less than one token unit
        assert_eq!(tokens_for(1, 100, 4, 18, 20), Err(LedgerError::InvalidAmount));
    }

    #[test]
    fn test_pure_function() {
        let first = tokens_for(123_456_789, 250, 6, 7, 14);
        let second = tokens_for(123_456_789, 250, 6, 7, 14);
        assert_eq!(first, second);
    }

    #[test]
    fn test_overflow_reported() {
        assert_eq!(tokens_for(i128::MAX, 2, 0, 0, 0), Err(LedgerError::Overflow));
    }
}
