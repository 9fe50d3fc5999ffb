//! Comparison series for the payment charts: a symmetric sweep of monthly
//! payments around a center point, each paired with the proportionally scaled
//! property value or debt-to-income ratio.
//!
//! The sweep carries no business rule of its own; every point is one
//! application of the recommendation module's proportional scaling law.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::HomeFinanceError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::HomeFinanceResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Spacing between consecutive payments when none is given.
const DEFAULT_STEP: Decimal = dec!(20);

/// Points generated on each side of the center when no count is given.
const DEFAULT_COUNT_EACH_SIDE: u32 = 10;

fn default_step() -> Money {
    DEFAULT_STEP
}

fn default_count_each_side() -> u32 {
    DEFAULT_COUNT_EACH_SIDE
}

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Sweep of payments against proportionally scaled property values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueSweepInput {
    /// Monthly payment at the center of the sweep.
    pub center_monthly_payment: Money,
    /// Property value paired with the center payment.
    pub center_property_value: Money,
    /// Spacing between consecutive payments.
    #[serde(default = "default_step")]
    pub step: Money,
    /// Number of points generated on each side of the center.
    #[serde(default = "default_count_each_side")]
    pub count_each_side: u32,
}

/// Sweep of payments against the resulting debt-to-income ratios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtRatioSweepInput {
    /// Monthly payment at the center of the sweep.
    pub center_monthly_payment: Money,
    /// Gross annual income before tax.
    pub annual_income: Money,
    /// Spacing between consecutive payments.
    #[serde(default = "default_step")]
    pub step: Money,
    /// Number of points generated on each side of the center.
    #[serde(default = "default_count_each_side")]
    pub count_each_side: u32,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One point of the payment-vs-value series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepPoint {
    pub monthly_payment: Money,
    pub property_value: Money,
}

/// One point of the payment-vs-debt-ratio series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtRatioPoint {
    pub monthly_payment: Money,
    pub debt_to_income_pct: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate the payment-vs-property-value comparison series.
///
/// Returns `2 * count_each_side + 1` points, strictly increasing in payment,
/// with the center payment and value at the middle index. Deterministic:
/// the same input always yields the same sequence.
pub fn sweep_payment_vs_value(
    input: &ValueSweepInput,
) -> HomeFinanceResult<ComputationOutput<Vec<SweepPoint>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.center_monthly_payment <= Decimal::ZERO {
        return Err(HomeFinanceError::InvalidInput {
            field: "center_monthly_payment".into(),
            reason: "Center monthly payment must be positive".into(),
        });
    }
    if input.center_property_value < Decimal::ZERO {
        return Err(HomeFinanceError::InvalidInput {
            field: "center_property_value".into(),
            reason: "Currency amounts cannot be negative".into(),
        });
    }
    validate_shape(input.step, input.count_each_side)?;
    warn_on_nonpositive_payments(
        input.center_monthly_payment,
        input.step,
        input.count_each_side,
        &mut warnings,
    );

    let points = payments_around(
        input.center_monthly_payment,
        input.step,
        input.count_each_side,
    )
    .map(|payment| SweepPoint {
        monthly_payment: payment,
        property_value: (payment / input.center_monthly_payment * input.center_property_value)
            .round_dp(2),
    })
    .collect();

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Payment Sweep vs Property Value (Proportional Scaling)",
        input,
        warnings,
        elapsed,
        points,
    ))
}

/// Generate the payment-vs-debt-ratio comparison series.
///
/// Same shape as [`sweep_payment_vs_value`]; each payment is paired with the
/// debt-to-income ratio it implies at the given income.
pub fn sweep_payment_vs_debt_ratio(
    input: &DebtRatioSweepInput,
) -> HomeFinanceResult<ComputationOutput<Vec<DebtRatioPoint>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.annual_income <= Decimal::ZERO {
        return Err(HomeFinanceError::InvalidInput {
            field: "annual_income".into(),
            reason: "Annual income must be positive".into(),
        });
    }
    validate_shape(input.step, input.count_each_side)?;
    warn_on_nonpositive_payments(
        input.center_monthly_payment,
        input.step,
        input.count_each_side,
        &mut warnings,
    );

    let monthly_income = (input.annual_income / dec!(12)).round_dp(2);

    let points = payments_around(
        input.center_monthly_payment,
        input.step,
        input.count_each_side,
    )
    .map(|payment| DebtRatioPoint {
        monthly_payment: payment,
        debt_to_income_pct: (payment / monthly_income * dec!(100)).round_dp(2),
    })
    .collect();

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Payment Sweep vs Debt-to-Income Ratio (Proportional Scaling)",
        input,
        warnings,
        elapsed,
        points,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Payments spaced `step` apart, `count_each_side` on each side of `center`.
fn payments_around(
    center: Money,
    step: Money,
    count_each_side: u32,
) -> impl Iterator<Item = Money> {
    let side = i64::from(count_each_side);
    (-side..=side).map(move |i| center + Decimal::from(i) * step)
}

fn validate_shape(step: Money, count_each_side: u32) -> HomeFinanceResult<()> {
    if step <= Decimal::ZERO {
        return Err(HomeFinanceError::InvalidInput {
            field: "step".into(),
            reason: "Step must be positive".into(),
        });
    }
    if count_each_side == 0 {
        return Err(HomeFinanceError::InvalidInput {
            field: "count_each_side".into(),
            reason: "At least one point on each side is required".into(),
        });
    }
    Ok(())
}

fn warn_on_nonpositive_payments(
    center: Money,
    step: Money,
    count_each_side: u32,
    warnings: &mut Vec<String>,
) {
    let lowest = center - Decimal::from(count_each_side) * step;
    if lowest <= Decimal::ZERO {
        warnings.push(format!(
            "Sweep reaches non-positive payments (lowest {lowest}) — center is small relative to step * count"
        ));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
