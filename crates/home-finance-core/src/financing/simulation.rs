//! Home-loan financing simulation: fee aggregation, amortized monthly payment,
//! and debt-to-income ratio.
//!
//! All math in `rust_decimal::Decimal`. Every derived currency quantity is
//! rounded to 2 decimal places at the point of computation, so repeated
//! renders and exports of the same simulation are stable.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::HomeFinanceError;
use crate::time_value;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years};
use crate::HomeFinanceResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Longest loan term accepted, in years.
pub const MAX_TERM_YEARS: Years = 40;

/// Debt-to-income level above which a warning is attached.
const DEBT_RATIO_WARNING_PCT: Decimal = dec!(35);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Borrower and loan parameters for a financing simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingInput {
    /// Gross annual income before tax.
    pub annual_income: Money,
    /// Purchase price of the property.
    pub property_value: Money,
    /// Personal down payment, deducted from the purchase price.
    pub down_payment: Money,
    /// Annual interest rate in percent (3.5 = 3.5%).
    pub annual_rate_pct: Percent,
    /// Loan term in years (1 to 40).
    pub term_years: Years,
    /// Annual borrower-insurance premium.
    pub annual_insurance: Money,
    /// Notary fee.
    pub notary_fee: Money,
    /// Loan-guarantee fee (mortgage registration or surety).
    pub guarantee_fee: Money,
    /// Lender filing fee.
    pub filing_fee: Money,
    /// Broker fee, if a broker was engaged.
    pub brokerage_fee: Money,
    /// Real-estate agency fee.
    pub agency_fee: Money,
    /// Zero-interest subsidized loan (PTZ), deducted from the financed amount.
    pub zero_interest_loan: Money,
    /// Savings-plan credit (PEL), deducted from the financed amount.
    pub savings_plan_credit: Money,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Aggregate results of a financing simulation. All amounts rounded to 2 dp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingResult {
    /// Amount borrowed: property value minus down payment.
    pub loan_principal: Money,
    /// Ancillary fees plus insurance over the full term.
    pub total_fees: Money,
    /// Principal plus fees, net of PTZ and PEL.
    pub total_financed: Money,
    /// Fixed monthly instalment, insurance excluded.
    pub monthly_payment_excl_insurance: Money,
    /// Insurance premium per month.
    pub monthly_insurance: Money,
    /// Fixed monthly instalment, insurance included.
    pub monthly_payment_incl_insurance: Money,
    /// Insurance paid over the full term.
    pub total_insurance: Money,
    /// Everything paid over the term: instalments plus insurance.
    pub total_paid: Money,
    /// Total paid minus the loan principal.
    pub total_interest: Money,
    /// Monthly payment incl. insurance over monthly income, in percent.
    pub debt_to_income_pct: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run a financing simulation for the given borrower and loan parameters.
///
/// Pure function of its input: the amortized monthly payment is solved for
/// the total financed amount (principal plus fees, net of subsidized loans),
/// and all aggregate totals are derived from it. A zero interest rate
/// degrades to straight-line repayment.
pub fn simulate_financing(
    input: &FinancingInput,
) -> HomeFinanceResult<ComputationOutput<FinancingResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let loan_principal = (input.property_value - input.down_payment).round_dp(2);
    let total_insurance = (input.annual_insurance * Decimal::from(input.term_years)).round_dp(2);
    let total_fees = (input.notary_fee
        + input.guarantee_fee
        + input.filing_fee
        + input.brokerage_fee
        + input.agency_fee
        + total_insurance)
        .round_dp(2);
    let total_financed = (loan_principal + total_fees
        - input.zero_interest_loan
        - input.savings_plan_credit)
        .round_dp(2);

    if total_financed < Decimal::ZERO {
        warnings.push(format!(
            "Subsidized amounts (PTZ + PEL) exceed principal and fees — total financed is negative ({total_financed})"
        ));
    }

    let monthly_rate = input.annual_rate_pct / dec!(100) / dec!(12);
    let term_months = input.term_years * 12;

    let monthly_payment_excl_insurance =
        time_value::pmt(monthly_rate, term_months, total_financed)?.round_dp(2);
    let monthly_insurance = (input.annual_insurance / dec!(12)).round_dp(2);
    let monthly_payment_incl_insurance =
        (monthly_payment_excl_insurance + monthly_insurance).round_dp(2);

    let total_paid =
        (monthly_payment_excl_insurance * Decimal::from(term_months) + total_insurance).round_dp(2);
    let total_interest = (total_paid - loan_principal).round_dp(2);

    let monthly_income = (input.annual_income / dec!(12)).round_dp(2);
    let debt_to_income_pct = if monthly_income.is_zero() {
        warnings.push("Annual income is zero — debt-to-income ratio reported as 0".into());
        Decimal::ZERO
    } else {
        (monthly_payment_incl_insurance / monthly_income * dec!(100)).round_dp(2)
    };

    if debt_to_income_pct > DEBT_RATIO_WARNING_PCT {
        warnings.push(format!(
            "Debt-to-income ratio {debt_to_income_pct}% exceeds {DEBT_RATIO_WARNING_PCT}% — above the usual underwriting ceiling"
        ));
    }

    let output = FinancingResult {
        loan_principal,
        total_fees,
        total_financed,
        monthly_payment_excl_insurance,
        monthly_insurance,
        monthly_payment_incl_insurance,
        total_insurance,
        total_paid,
        total_interest,
        debt_to_income_pct,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Amortized Home-Loan Financing Simulation",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &FinancingInput) -> HomeFinanceResult<()> {
    let currency_fields = [
        ("annual_income", input.annual_income),
        ("property_value", input.property_value),
        ("down_payment", input.down_payment),
        ("annual_insurance", input.annual_insurance),
        ("notary_fee", input.notary_fee),
        ("guarantee_fee", input.guarantee_fee),
        ("filing_fee", input.filing_fee),
        ("brokerage_fee", input.brokerage_fee),
        ("agency_fee", input.agency_fee),
        ("zero_interest_loan", input.zero_interest_loan),
        ("savings_plan_credit", input.savings_plan_credit),
    ];
    for (field, value) in currency_fields {
        if value < Decimal::ZERO {
            return Err(HomeFinanceError::InvalidInput {
                field: field.into(),
                reason: "Currency amounts cannot be negative".into(),
            });
        }
    }

    if input.down_payment > input.property_value {
        return Err(HomeFinanceError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot exceed the property value".into(),
        });
    }

    if input.term_years == 0 || input.term_years > MAX_TERM_YEARS {
        return Err(HomeFinanceError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Loan term must be between 1 and {MAX_TERM_YEARS} years"),
        });
    }

    if input.annual_rate_pct < Decimal::ZERO || input.annual_rate_pct > dec!(100) {
        return Err(HomeFinanceError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate must be between 0% and 100%".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TOL: Decimal = dec!(0.02);

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    fn standard_input() -> FinancingInput {
        // Fees follow the prefill heuristics for a 200k purchase at 15% down.
        FinancingInput {
            annual_income: dec!(60000),
            property_value: dec!(200000),
            down_payment: dec!(30000),
            annual_rate_pct: dec!(3.5),
            term_years: 25,
            annual_insurance: dec!(595),
            notary_fee: dec!(15000),
            guarantee_fee: dec!(2550),
            filing_fee: dec!(1360),
            brokerage_fee: dec!(1700),
            agency_fee: dec!(8000),
            zero_interest_loan: Decimal::ZERO,
            savings_plan_credit: Decimal::ZERO,
        }
    }

    fn run(input: &FinancingInput) -> FinancingResult {
        simulate_financing(input).unwrap().result
    }

    #[test]
    fn test_reference_simulation_aggregates() {
        let out = run(&standard_input());

        assert_eq!(out.loan_principal, dec!(170000.00));
        // notary 15000 + guarantee 2550 + filing 1360 + brokerage 1700
        // + agency 8000 + insurance 595 * 25 = 43485
        assert_eq!(out.total_fees, dec!(43485.00));
        assert_eq!(out.total_financed, dec!(213485.00));
    }

    #[test]
    fn test_reference_simulation_payments() {
        let out = run(&standard_input());

        // 213485 * r / (1 - (1+r)^-300) with r = 0.035/12
        assert_close(
            out.monthly_payment_excl_insurance,
            dec!(1068.76),
            TOL,
            "Monthly payment excl. insurance",
        );
        assert_eq!(out.monthly_insurance, dec!(49.58));
        assert_close(
            out.monthly_payment_incl_insurance,
            dec!(1118.34),
            TOL,
            "Monthly payment incl. insurance",
        );
        assert_close(
            out.debt_to_income_pct,
            dec!(22.37),
            TOL,
            "Debt-to-income ratio",
        );
    }

    #[test]
    fn test_total_paid_identity() {
        let out = run(&standard_input());

        let expected = out.monthly_payment_excl_insurance * dec!(300) + out.total_insurance;
        assert_close(out.total_paid, expected, dec!(0.01), "Total paid identity");
        assert_close(
            out.total_interest,
            out.total_paid - out.loan_principal,
            dec!(0.01),
            "Total interest identity",
        );
    }

    #[test]
    fn test_zero_rate_straight_line() {
        let input = FinancingInput {
            annual_rate_pct: Decimal::ZERO,
            ..standard_input()
        };
        let out = run(&input);

        // 213485 / 300
        assert_eq!(out.monthly_payment_excl_insurance, dec!(711.62));
        assert_close(
            out.monthly_payment_excl_insurance * dec!(300),
            out.total_financed,
            dec!(1.50),
            "Straight-line repayment covers the financed amount",
        );
    }

    #[test]
    fn test_one_year_zero_rate_boundary() {
        let input = FinancingInput {
            annual_income: dec!(60000),
            property_value: dec!(120000),
            down_payment: Decimal::ZERO,
            annual_rate_pct: Decimal::ZERO,
            term_years: 1,
            annual_insurance: Decimal::ZERO,
            notary_fee: Decimal::ZERO,
            guarantee_fee: Decimal::ZERO,
            filing_fee: Decimal::ZERO,
            brokerage_fee: Decimal::ZERO,
            agency_fee: Decimal::ZERO,
            zero_interest_loan: Decimal::ZERO,
            savings_plan_credit: Decimal::ZERO,
        };
        let out = run(&input);

        assert_eq!(out.monthly_payment_excl_insurance, dec!(10000.00));
    }

    #[test]
    fn test_subsidies_reduce_financed_amount() {
        let base = run(&standard_input());
        let subsidized = run(&FinancingInput {
            zero_interest_loan: dec!(20000),
            savings_plan_credit: dec!(10000),
            ..standard_input()
        });

        assert_eq!(subsidized.total_financed, base.total_financed - dec!(30000));
        assert!(
            subsidized.monthly_payment_excl_insurance < base.monthly_payment_excl_insurance,
            "Subsidies should lower the monthly payment"
        );
    }

    #[test]
    fn test_negative_financed_amount_warns() {
        let output = simulate_financing(&FinancingInput {
            zero_interest_loan: dec!(300000),
            ..standard_input()
        })
        .unwrap();

        assert!(output.result.total_financed < Decimal::ZERO);
        assert!(output
            .warnings
            .iter()
            .any(|w| w.contains("total financed is negative")));
    }

    #[test]
    fn test_high_debt_ratio_warns() {
        let output = simulate_financing(&FinancingInput {
            annual_income: dec!(30000),
            ..standard_input()
        })
        .unwrap();

        assert!(output.result.debt_to_income_pct > dec!(35));
        assert!(output.warnings.iter().any(|w| w.contains("underwriting")));
    }

    #[test]
    fn test_zero_income_reports_zero_ratio() {
        let output = simulate_financing(&FinancingInput {
            annual_income: Decimal::ZERO,
            ..standard_input()
        })
        .unwrap();

        assert_eq!(output.result.debt_to_income_pct, Decimal::ZERO);
        assert!(!output.warnings.is_empty());
    }

    #[test]
    fn test_validation_down_payment_exceeds_value() {
        let err = simulate_financing(&FinancingInput {
            down_payment: dec!(250000),
            ..standard_input()
        })
        .unwrap_err();

        match err {
            HomeFinanceError::InvalidInput { field, .. } => assert_eq!(field, "down_payment"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_negative_fee() {
        let err = simulate_financing(&FinancingInput {
            notary_fee: dec!(-1),
            ..standard_input()
        })
        .unwrap_err();

        match err {
            HomeFinanceError::InvalidInput { field, .. } => assert_eq!(field, "notary_fee"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_term_bounds() {
        for term in [0u32, 41] {
            let result = simulate_financing(&FinancingInput {
                term_years: term,
                ..standard_input()
            });
            assert!(result.is_err(), "term {term} should be rejected");
        }
    }

    #[test]
    fn test_validation_rate_bounds() {
        for rate in [dec!(-0.5), dec!(100.5)] {
            let result = simulate_financing(&FinancingInput {
                annual_rate_pct: rate,
                ..standard_input()
            });
            assert!(result.is_err(), "rate {rate} should be rejected");
        }
    }

    #[test]
    fn test_metadata_populated() {
        let output = simulate_financing(&standard_input()).unwrap();

        assert!(output.methodology.contains("Financing"));
        assert_eq!(output.metadata.precision, "rust_decimal_128bit");
        assert!(output.assumptions.get("annual_income").is_some());
    }
}
