//! Market heuristics used to prefill a financing input from the four
//! parameters a borrower knows first: income, purchase price, rate and term.
//!
//! The caller owns the resulting input and overrides any field by struct
//! update before simulating; the core never holds wizard state.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::HomeFinanceError;
use crate::financing::simulation::{FinancingInput, MAX_TERM_YEARS};
use crate::types::{Money, Percent, Rate, Years};
use crate::HomeFinanceResult;

/// Down payment as a share of the purchase price.
pub const DOWN_PAYMENT_RATE: Rate = dec!(0.15);

/// Annual borrower-insurance premium as a share of the loan principal.
pub const INSURANCE_RATE: Rate = dec!(0.0035);

/// Notary fee as a share of the purchase price.
pub const NOTARY_FEE_RATE: Rate = dec!(0.075);

/// Guarantee fee as a share of the loan principal.
pub const GUARANTEE_FEE_RATE: Rate = dec!(0.015);

/// Filing fee as a share of the loan principal.
pub const FILING_FEE_RATE: Rate = dec!(0.008);

/// Brokerage fee as a share of the loan principal.
pub const BROKERAGE_FEE_RATE: Rate = dec!(0.01);

/// Agency fee as a share of the purchase price.
pub const AGENCY_FEE_RATE: Rate = dec!(0.04);

/// Prefill a financing input using the market heuristics above.
///
/// Down payment defaults to 15% of the purchase price; insurance and each fee
/// follow their listed share of the price or principal, rounded to 2 decimal
/// places. Subsidized amounts (PTZ, PEL) default to zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use home_finance_core::financing::defaults::prefill_input;
/// use home_finance_core::financing::simulation::FinancingInput;
///
/// let input = FinancingInput {
///     down_payment: dec!(50000),
///     ..prefill_input(dec!(60000), dec!(200000), dec!(3.5), 25).unwrap()
/// };
/// assert_eq!(input.notary_fee, dec!(15000.00));
/// ```
pub fn prefill_input(
    annual_income: Money,
    property_value: Money,
    annual_rate_pct: Percent,
    term_years: Years,
) -> HomeFinanceResult<FinancingInput> {
    if annual_income < Decimal::ZERO {
        return Err(HomeFinanceError::InvalidInput {
            field: "annual_income".into(),
            reason: "Currency amounts cannot be negative".into(),
        });
    }
    if property_value < Decimal::ZERO {
        return Err(HomeFinanceError::InvalidInput {
            field: "property_value".into(),
            reason: "Currency amounts cannot be negative".into(),
        });
    }
    if annual_rate_pct < Decimal::ZERO || annual_rate_pct > dec!(100) {
        return Err(HomeFinanceError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate must be between 0% and 100%".into(),
        });
    }
    if term_years == 0 || term_years > MAX_TERM_YEARS {
        return Err(HomeFinanceError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Loan term must be between 1 and {MAX_TERM_YEARS} years"),
        });
    }

    let down_payment = (property_value * DOWN_PAYMENT_RATE).round_dp(2);
    let loan_principal = property_value - down_payment;

    Ok(FinancingInput {
        annual_income,
        property_value,
        down_payment,
        annual_rate_pct,
        term_years,
        annual_insurance: (loan_principal * INSURANCE_RATE).round_dp(2),
        notary_fee: (property_value * NOTARY_FEE_RATE).round_dp(2),
        guarantee_fee: (loan_principal * GUARANTEE_FEE_RATE).round_dp(2),
        filing_fee: (loan_principal * FILING_FEE_RATE).round_dp(2),
        brokerage_fee: (loan_principal * BROKERAGE_FEE_RATE).round_dp(2),
        agency_fee: (property_value * AGENCY_FEE_RATE).round_dp(2),
        zero_interest_loan: Decimal::ZERO,
        savings_plan_credit: Decimal::ZERO,
    })
}
