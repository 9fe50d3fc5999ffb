//! Target-payment recommendation: the inverse of the forward simulation.
//!
//! Scales the baseline property value proportionally with the desired monthly
//! payment. This mirrors the forward simulation's behavior deliberately: rate
//! and term are held fixed and payment is treated as linear in property value,
//! which is an approximation for an amortized loan, not a re-solve of the
//! amortization equation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::HomeFinanceError;
use crate::financing::simulation::FinancingResult;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::HomeFinanceResult;

/// Debt-to-income level above which a warning is attached.
const DEBT_RATIO_WARNING_PCT: Decimal = dec!(35);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Baseline figures and the desired payment for a recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationInput {
    /// Monthly payment incl. insurance from the baseline simulation.
    pub baseline_monthly_payment_incl_insurance: Money,
    /// Property value the baseline simulation was run against.
    pub baseline_property_value: Money,
    /// Desired monthly payment, insurance included.
    pub target_monthly_payment: Money,
    /// Gross annual income before tax.
    pub annual_income: Money,
}

impl RecommendationInput {
    /// Build a recommendation input from a completed baseline simulation.
    pub fn from_baseline(
        baseline: &FinancingResult,
        baseline_property_value: Money,
        target_monthly_payment: Money,
        annual_income: Money,
    ) -> Self {
        Self {
            baseline_monthly_payment_incl_insurance: baseline.monthly_payment_incl_insurance,
            baseline_property_value,
            target_monthly_payment,
            annual_income,
        }
    }
}

/// Recommended purchase envelope for a desired monthly payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// The desired monthly payment, echoed.
    pub target_monthly_payment: Money,
    /// Property value scaled proportionally from the baseline.
    pub recommended_property_value: Money,
    /// Debt-to-income ratio at the desired payment, in percent.
    pub debt_to_income_pct: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Recommend a property value for a desired monthly payment.
///
/// `recommended_property_value = target / baseline_payment * baseline_value`,
/// holding rate and term fixed. Produces a new result; the baseline is never
/// mutated.
pub fn recommend_financing(
    input: &RecommendationInput,
) -> HomeFinanceResult<ComputationOutput<Recommendation>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let recommended_property_value = (input.target_monthly_payment
        / input.baseline_monthly_payment_incl_insurance
        * input.baseline_property_value)
        .round_dp(2);

    let monthly_income = (input.annual_income / dec!(12)).round_dp(2);
    let debt_to_income_pct =
        (input.target_monthly_payment / monthly_income * dec!(100)).round_dp(2);

    if debt_to_income_pct > DEBT_RATIO_WARNING_PCT {
        warnings.push(format!(
            "Debt-to-income ratio {debt_to_income_pct}% exceeds {DEBT_RATIO_WARNING_PCT}% — above the usual underwriting ceiling"
        ));
    }

    let output = Recommendation {
        target_monthly_payment: input.target_monthly_payment,
        recommended_property_value,
        debt_to_income_pct,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Target-Payment Recommendation (Proportional Scaling Approximation)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &RecommendationInput) -> HomeFinanceResult<()> {
    if input.baseline_monthly_payment_incl_insurance <= Decimal::ZERO {
        return Err(HomeFinanceError::InvalidInput {
            field: "baseline_monthly_payment_incl_insurance".into(),
            reason: "Baseline monthly payment must be positive".into(),
        });
    }

    if input.baseline_property_value < Decimal::ZERO {
        return Err(HomeFinanceError::InvalidInput {
            field: "baseline_property_value".into(),
            reason: "Currency amounts cannot be negative".into(),
        });
    }

    if input.target_monthly_payment < Decimal::ZERO {
        return Err(HomeFinanceError::InvalidInput {
            field: "target_monthly_payment".into(),
            reason: "Currency amounts cannot be negative".into(),
        });
    }

    if input.annual_income <= Decimal::ZERO {
        return Err(HomeFinanceError::InvalidInput {
            field: "annual_income".into(),
            reason: "Annual income must be positive".into(),
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

    fn standard_input() -> RecommendationInput {
        RecommendationInput {
            baseline_monthly_payment_incl_insurance: dec!(1118.34),
            baseline_property_value: dec!(200000),
            target_monthly_payment: dec!(1000),
            annual_income: dec!(60000),
        }
    }

    fn run(input: &RecommendationInput) -> Recommendation {
        recommend_financing(input).unwrap().result
    }

    #[test]
    fn test_reference_recommendation() {
        let out = run(&standard_input());

        // 1000 / 1118.34 * 200000
        assert_eq!(out.recommended_property_value, dec!(178836.49));
        assert_eq!(out.debt_to_income_pct, dec!(20.00));
    }

    #[test]
    fn test_scale_invariance() {
        let base = run(&standard_input());
        let doubled = run(&RecommendationInput {
            target_monthly_payment: dec!(2000),
            ..standard_input()
        });

        let ratio = doubled.recommended_property_value / base.recommended_property_value;
        assert!(
            (ratio - dec!(2)).abs() < dec!(0.0001),
            "Doubling the target should double the recommended value, got ratio {ratio}"
        );
    }

    #[test]
    fn test_matching_target_recovers_baseline_value() {
        let out = run(&RecommendationInput {
            target_monthly_payment: dec!(1118.34),
            ..standard_input()
        });

        assert_eq!(out.recommended_property_value, dec!(200000.00));
    }

    #[test]
    fn test_high_target_warns() {
        let output = recommend_financing(&RecommendationInput {
            target_monthly_payment: dec!(2500),
            ..standard_input()
        })
        .unwrap();

        assert!(output.result.debt_to_income_pct > dec!(35));
        assert!(!output.warnings.is_empty());
    }

    #[test]
    fn test_validation_zero_baseline_payment() {
        let err = recommend_financing(&RecommendationInput {
            baseline_monthly_payment_incl_insurance: Decimal::ZERO,
            ..standard_input()
        })
        .unwrap_err();

        match err {
            HomeFinanceError::InvalidInput { field, .. } => {
                assert_eq!(field, "baseline_monthly_payment_incl_insurance")
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_zero_income() {
        let err = recommend_financing(&RecommendationInput {
            annual_income: Decimal::ZERO,
            ..standard_input()
        })
        .unwrap_err();

        match err {
            HomeFinanceError::InvalidInput { field, .. } => assert_eq!(field, "annual_income"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_from_baseline_carries_payment() {
        let baseline = FinancingResult {
            loan_principal: dec!(170000),
            total_fees: dec!(43485),
            total_financed: dec!(213485),
            monthly_payment_excl_insurance: dec!(1068.76),
            monthly_insurance: dec!(49.58),
            monthly_payment_incl_insurance: dec!(1118.34),
            total_insurance: dec!(14875),
            total_paid: dec!(335503),
            total_interest: dec!(165503),
            debt_to_income_pct: dec!(22.37),
        };

        let input =
            RecommendationInput::from_baseline(&baseline, dec!(200000), dec!(1000), dec!(60000));
        assert_eq!(
            input.baseline_monthly_payment_incl_insurance,
            dec!(1118.34)
        );
    }
}
