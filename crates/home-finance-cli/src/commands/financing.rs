use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use home_finance_core::financing::comparison::{self, DebtRatioSweepInput, ValueSweepInput};
use home_finance_core::financing::defaults;
use home_finance_core::financing::recommendation::{self, RecommendationInput};
use home_finance_core::financing::simulation::{self, FinancingInput};

use crate::input;

/// Arguments for a financing simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Gross annual income before tax
    #[arg(long)]
    pub annual_income: Option<Decimal>,

    /// Purchase price of the property
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Down payment (defaults to 15% of the purchase price)
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Annual interest rate in percent (3.5 = 3.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate_pct: Option<Decimal>,

    /// Loan term in years (1 to 40)
    #[arg(long, alias = "term")]
    pub term_years: Option<u32>,

    /// Annual borrower-insurance premium (defaults to 0.35% of the principal)
    #[arg(long)]
    pub annual_insurance: Option<Decimal>,

    /// Notary fee (defaults to 7.5% of the purchase price)
    #[arg(long)]
    pub notary_fee: Option<Decimal>,

    /// Guarantee fee (defaults to 1.5% of the principal)
    #[arg(long)]
    pub guarantee_fee: Option<Decimal>,

    /// Lender filing fee (defaults to 0.8% of the principal)
    #[arg(long)]
    pub filing_fee: Option<Decimal>,

    /// Brokerage fee (defaults to 1% of the principal)
    #[arg(long)]
    pub brokerage_fee: Option<Decimal>,

    /// Agency fee (defaults to 4% of the purchase price)
    #[arg(long)]
    pub agency_fee: Option<Decimal>,

    /// Zero-interest subsidized loan amount (PTZ)
    #[arg(long, alias = "ptz")]
    pub zero_interest_loan: Option<Decimal>,

    /// Savings-plan credit (PEL)
    #[arg(long, alias = "pel")]
    pub savings_plan_credit: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a target-payment recommendation
#[derive(Args)]
pub struct RecommendArgs {
    /// Monthly payment incl. insurance from the baseline simulation
    #[arg(long)]
    pub baseline_monthly_payment: Option<Decimal>,

    /// Property value the baseline simulation was run against
    #[arg(long)]
    pub baseline_property_value: Option<Decimal>,

    /// Desired monthly payment, insurance included
    #[arg(long, alias = "target")]
    pub target_monthly_payment: Option<Decimal>,

    /// Gross annual income before tax
    #[arg(long)]
    pub annual_income: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the payment-vs-value comparison series
#[derive(Args)]
pub struct CompareValueArgs {
    /// Monthly payment at the center of the sweep
    #[arg(long)]
    pub center_monthly_payment: Option<Decimal>,

    /// Property value paired with the center payment
    #[arg(long)]
    pub center_property_value: Option<Decimal>,

    /// Spacing between consecutive payments
    #[arg(long, default_value = "20")]
    pub step: Decimal,

    /// Number of points generated on each side of the center
    #[arg(long, default_value = "10")]
    pub count_each_side: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the payment-vs-debt-ratio comparison series
#[derive(Args)]
pub struct CompareDebtRatioArgs {
    /// Monthly payment at the center of the sweep
    #[arg(long)]
    pub center_monthly_payment: Option<Decimal>,

    /// Gross annual income before tax
    #[arg(long)]
    pub annual_income: Option<Decimal>,

    /// Spacing between consecutive payments
    #[arg(long, default_value = "20")]
    pub step: Decimal,

    /// Number of points generated on each side of the center
    #[arg(long, default_value = "10")]
    pub count_each_side: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for prefilling a financing input
#[derive(Args)]
pub struct PrefillArgs {
    /// Gross annual income before tax
    #[arg(long)]
    pub annual_income: Decimal,

    /// Purchase price of the property
    #[arg(long)]
    pub property_value: Decimal,

    /// Annual interest rate in percent (3.5 = 3.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate_pct: Decimal,

    /// Loan term in years (1 to 40)
    #[arg(long, alias = "term")]
    pub term_years: u32,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input: FinancingInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        input_from_flags(&args)?
    };

    let result = simulation::simulate_financing(&sim_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_recommend(args: RecommendArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rec_input: RecommendationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        RecommendationInput {
            baseline_monthly_payment_incl_insurance: args
                .baseline_monthly_payment
                .ok_or("--baseline-monthly-payment is required (or provide --input)")?,
            baseline_property_value: args
                .baseline_property_value
                .ok_or("--baseline-property-value is required (or provide --input)")?,
            target_monthly_payment: args
                .target_monthly_payment
                .ok_or("--target-monthly-payment is required (or provide --input)")?,
            annual_income: args
                .annual_income
                .ok_or("--annual-income is required (or provide --input)")?,
        }
    };

    let result = recommendation::recommend_financing(&rec_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare_value(args: CompareValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sweep_input: ValueSweepInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ValueSweepInput {
            center_monthly_payment: args
                .center_monthly_payment
                .ok_or("--center-monthly-payment is required (or provide --input)")?,
            center_property_value: args
                .center_property_value
                .ok_or("--center-property-value is required (or provide --input)")?,
            step: args.step,
            count_each_side: args.count_each_side,
        }
    };

    let result = comparison::sweep_payment_vs_value(&sweep_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare_debt_ratio(
    args: CompareDebtRatioArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let sweep_input: DebtRatioSweepInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        DebtRatioSweepInput {
            center_monthly_payment: args
                .center_monthly_payment
                .ok_or("--center-monthly-payment is required (or provide --input)")?,
            annual_income: args
                .annual_income
                .ok_or("--annual-income is required (or provide --input)")?,
            step: args.step,
            count_each_side: args.count_each_side,
        }
    };

    let result = comparison::sweep_payment_vs_debt_ratio(&sweep_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_prefill(args: PrefillArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let prefilled = defaults::prefill_input(
        args.annual_income,
        args.property_value,
        args.annual_rate_pct,
        args.term_years,
    )?;
    Ok(serde_json::to_value(prefilled)?)
}

/// Assemble a financing input from flags, filling omitted fees the way the
/// guided wizard did: each default derived from the fields entered so far.
fn input_from_flags(args: &SimulateArgs) -> Result<FinancingInput, Box<dyn std::error::Error>> {
    let annual_income = args
        .annual_income
        .ok_or("--annual-income is required (or provide --input)")?;
    let property_value = args
        .property_value
        .ok_or("--property-value is required (or provide --input)")?;
    let annual_rate_pct = args
        .annual_rate_pct
        .ok_or("--annual-rate-pct is required (or provide --input)")?;
    let term_years = args
        .term_years
        .ok_or("--term-years is required (or provide --input)")?;

    let down_payment = args
        .down_payment
        .unwrap_or_else(|| (property_value * defaults::DOWN_PAYMENT_RATE).round_dp(2));
    let principal = property_value - down_payment;

    Ok(FinancingInput {
        annual_income,
        property_value,
        down_payment,
        annual_rate_pct,
        term_years,
        annual_insurance: args
            .annual_insurance
            .unwrap_or_else(|| (principal * defaults::INSURANCE_RATE).round_dp(2)),
        notary_fee: args
            .notary_fee
            .unwrap_or_else(|| (property_value * defaults::NOTARY_FEE_RATE).round_dp(2)),
        guarantee_fee: args
            .guarantee_fee
            .unwrap_or_else(|| (principal * defaults::GUARANTEE_FEE_RATE).round_dp(2)),
        filing_fee: args
            .filing_fee
            .unwrap_or_else(|| (principal * defaults::FILING_FEE_RATE).round_dp(2)),
        brokerage_fee: args
            .brokerage_fee
            .unwrap_or_else(|| (principal * defaults::BROKERAGE_FEE_RATE).round_dp(2)),
        agency_fee: args
            .agency_fee
            .unwrap_or_else(|| (property_value * defaults::AGENCY_FEE_RATE).round_dp(2)),
        zero_interest_loan: args.zero_interest_loan.unwrap_or(Decimal::ZERO),
        savings_plan_credit: args.savings_plan_credit.unwrap_or(Decimal::ZERO),
    })
}
