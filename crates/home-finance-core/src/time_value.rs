use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::HomeFinanceError;
use crate::types::{Money, Rate};
use crate::HomeFinanceResult;

/// Level payment for an amortizing loan.
///
/// Solves the fixed-payment amortization equation
/// `M = financed * r / (1 - (1 + r)^(-n))` for a financed amount repaid over
/// `periods` equal instalments at `rate_per_period`. A zero rate degrades to
/// straight-line repayment, `financed / periods`.
pub fn pmt(rate_per_period: Rate, periods: u32, financed: Money) -> HomeFinanceResult<Money> {
    if periods == 0 {
        return Err(HomeFinanceError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate_per_period.is_zero() {
        return Ok(financed / Decimal::from(periods));
    }

    let one_plus_r = Decimal::ONE + rate_per_period;
    let factor = one_plus_r.powd(Decimal::from(periods));
    let annuity_factor = (factor - Decimal::ONE) / rate_per_period;

    if annuity_factor.is_zero() {
        return Err(HomeFinanceError::InvalidInput {
            field: "rate_per_period".into(),
            reason: "Annuity factor is zero for the given rate and term".into(),
        });
    }

    Ok(financed * factor / annuity_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pmt_reference_mortgage() {
        // 213 485 over 300 months at 3.5%/12: payment ~1 068.76
        let rate = dec!(0.035) / dec!(12);
        let payment = pmt(rate, 300, dec!(213485)).unwrap();
        assert!((payment - dec!(1068.76)).abs() < dec!(0.02));
    }

    #[test]
    fn test_pmt_zero_rate_straight_line() {
        let payment = pmt(Decimal::ZERO, 12, dec!(12000)).unwrap();
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_pmt_zero_periods_rejected() {
        assert!(pmt(dec!(0.003), 0, dec!(100000)).is_err());
    }
}
