pub mod breakdown;
pub mod error;
pub mod projection;
pub mod settings;

use serde::Serialize;

pub use self::{
    breakdown::CostBreakdown,
    error::AnalysisError,
    projection::MonthlyProjection,
    settings::AnalysisSettings,
};
use crate::{
    analysis::projection::Projector,
    plan::{Plan, RateType, promotion::MonthlyCharges},
    prelude::*,
    quantity::{cost::Cost, rate::KilowattHourRate},
};

/// Typical retail rate across the market, the reference for [`Analysis::potential_savings`].
pub const MARKET_AVERAGE_RATE: KilowattHourRate = KilowattHourRate(12.8);

/// Added to indexed plans' rate to account for the wholesale price swings.
pub const INDEXED_RISK_PREMIUM: KilowattHourRate = KilowattHourRate(0.5);

/// Cost analysis of a single plan.
#[derive(Clone, Debug, Serialize)]
pub struct Analysis {
    pub plan_id: String,
    pub plan_name: String,
    pub provider: String,
    pub rate_type: RateType,
    pub settings: AnalysisSettings,

    pub total_cost: Cost,
    pub average_monthly_cost: Cost,

    /// Total cost divided by the total usage.
    pub effective_rate: KilowattHourRate,

    pub breakdown: CostBreakdown,
    pub projection: Vec<MonthlyProjection>,

    /// One-based position by total cost within a comparison, `1` for a standalone analysis.
    pub cost_rank: usize,

    /// First month after the promotion window when the promotion stops paying off.
    pub break_even_month: Option<u32>,

    /// How much cheaper the plan is than the market average, never negative.
    pub potential_savings: Cost,

    pub assumptions: Vec<String>,
    pub disclaimers: Vec<String>,

    /// Whether the numbers are a forecast rather than a quote.
    pub is_estimate: bool,
}

impl Analysis {
    /// Cumulative cost by the end of the specified one-based month.
    #[must_use]
    pub fn cumulative_cost_at(&self, month: u32) -> Option<Cost> {
        let index = usize::try_from(month.checked_sub(1)?).ok()?;
        self.projection.get(index).map(|projection| projection.cumulative_cost)
    }
}

/// Analyze the plan costs under the specified usage settings.
#[instrument(skip_all, fields(plan_id = %plan.id))]
pub fn analyze(plan: &Plan, settings: &AnalysisSettings) -> Result<Analysis, AnalysisError> {
    let base_rate = plan
        .base_rate
        .filter(|rate| rate.0.is_finite() && *rate > KilowattHourRate::ZERO)
        .ok_or_else(|| AnalysisError::InvalidPlanData { plan_id: plan.id.clone() })?;
    settings.validate()?;

    let effective_rate = match plan.rate_type {
        RateType::Indexed => base_rate + INDEXED_RISK_PREMIUM,
        RateType::Fixed | RateType::Variable => base_rate,
    };
    let total_usage = settings.total_usage();
    let n_promotion_months = settings.n_promotion_months();

    let charges =
        MonthlyCharges { energy: settings.monthly_usage * base_rate, fee: plan.monthly_fee };
    let promotional_savings: Cost = if settings.apply_promotions {
        plan.promotions()
            .map(|promotion| promotion.savings(charges, settings.n_months, n_promotion_months))
            .sum()
    } else {
        Cost::ZERO
    };

    let breakdown = CostBreakdown::builder()
        .energy_cost(total_usage * effective_rate)
        .monthly_fees(plan.monthly_fee * f64::from(settings.n_months))
        .connection_fee(if settings.include_connection_fee {
            plan.connection_fee
        } else {
            Cost::ZERO
        })
        .early_termination_fee(plan.early_termination_fee)
        .promotional_savings(promotional_savings)
        .tax_rate(settings.tax_rate)
        .build();
    let total_cost = breakdown.total_cost;

    let projection = Projector::builder()
        .monthly_usage(settings.monthly_usage)
        .charges(charges)
        .n_months(settings.n_months)
        .n_promotion_months(n_promotion_months)
        .promotional_savings(breakdown.promotional_savings)
        .project();
    let break_even_month =
        find_break_even_month(&projection, n_promotion_months, breakdown.promotional_savings);

    let potential_savings =
        (total_usage * MARKET_AVERAGE_RATE - total_cost).max(Cost::ZERO).round_to_cents();
    let has_promotions = breakdown.promotional_savings > Cost::ZERO;

    debug!(
        %total_cost,
        promotional_savings = %breakdown.promotional_savings,
        ?break_even_month,
        "analyzed"
    );

    Ok(Analysis {
        plan_id: plan.id.clone(),
        plan_name: plan.name.clone(),
        provider: plan.provider.clone(),
        rate_type: plan.rate_type,
        total_cost,
        average_monthly_cost: (total_cost / f64::from(settings.n_months)).round_to_cents(),
        effective_rate: (total_cost / total_usage).round_to(2),
        cost_rank: 1,
        break_even_month,
        potential_savings,
        assumptions: assumptions(plan, settings, base_rate, &breakdown),
        disclaimers: disclaimers(plan, settings),
        is_estimate: plan.rate_type == RateType::Variable || has_promotions,
        breakdown,
        projection,
        settings: settings.clone(),
    })
}

/// Find the first month after the promotion window when the cumulative cost catches up
/// with what the plan would have cost without the promotion.
///
/// The baseline accumulates the same whole-cent monthly charges as the projection.
fn find_break_even_month(
    projection: &[MonthlyProjection],
    n_promotion_months: u32,
    promotional_savings: Cost,
) -> Option<u32> {
    if promotional_savings <= Cost::ZERO {
        return None;
    }
    projection
        .iter()
        .scan(Cost::ZERO, |cost_without_promotion, month| {
            *cost_without_promotion =
                (*cost_without_promotion + month.energy_cost + month.fees).round_to_cents();
            Some((month, *cost_without_promotion))
        })
        .find(|(month, cost_without_promotion)| {
            month.month > n_promotion_months && month.cumulative_cost >= *cost_without_promotion
        })
        .map(|(month, _)| month.month)
}

fn assumptions(
    plan: &Plan,
    settings: &AnalysisSettings,
    base_rate: KilowattHourRate,
    breakdown: &CostBreakdown,
) -> Vec<String> {
    let mut assumptions = vec![
        format!("Average monthly usage of {}", settings.monthly_usage),
        format!("Analysis period of {} months", settings.n_months),
    ];
    match plan.rate_type {
        RateType::Variable => assumptions.push(format!(
            "Variable rate may change at any time, the current {base_rate} is assumed throughout",
        )),
        RateType::Indexed => assumptions.push(format!(
            "Indexed rate includes a {INDEXED_RISK_PREMIUM} premium for market price swings",
        )),
        RateType::Fixed => {}
    }
    if breakdown.promotional_savings > Cost::ZERO {
        assumptions.push(format!(
            "Promotional savings of {} applied over the first {} months",
            breakdown.promotional_savings,
            settings.n_promotion_months(),
        ));
    }
    assumptions
}

fn disclaimers(plan: &Plan, settings: &AnalysisSettings) -> Vec<String> {
    let mut disclaimers =
        vec!["Estimate based on average usage, actual bills depend on real consumption".to_owned()];
    if plan.early_termination_fee > Cost::ZERO {
        disclaimers.push(format!(
            "Early termination fee of {} applies when cancelling early and is not included",
            plan.early_termination_fee,
        ));
    }
    if !settings.include_connection_fee && plan.connection_fee > Cost::ZERO {
        disclaimers.push(format!("Connection fee of {} is not included", plan.connection_fee));
    }
    disclaimers
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::energy::KilowattHours;

    fn plan(base_rate: f64, monthly_fee: f64) -> Plan {
        Plan::builder()
            .id("test")
            .name("Test Saver 12")
            .provider("Test Energy")
            .base_rate(KilowattHourRate(base_rate))
            .monthly_fee(Cost(monthly_fee))
            .build()
    }

    fn settings() -> AnalysisSettings {
        AnalysisSettings::builder().monthly_usage(KilowattHours(1000.0)).n_months(12).build()
    }

    #[test]
    fn test_fixed_plan_without_promotions() {
        let analysis = analyze(&plan(12.0, 5.0), &settings()).unwrap();
        assert_abs_diff_eq!(analysis.breakdown.energy_cost.0, 1440.0);
        assert_abs_diff_eq!(analysis.breakdown.monthly_fees.0, 60.0);
        assert_abs_diff_eq!(analysis.total_cost.0, 1500.0);
        assert_abs_diff_eq!(analysis.effective_rate.0, 12.5);
        assert_abs_diff_eq!(analysis.average_monthly_cost.0, 125.0);
        assert_eq!(analysis.cost_rank, 1);
        assert_eq!(analysis.break_even_month, None);
        assert!(!analysis.is_estimate);
    }

    #[test]
    fn test_indexed_risk_premium() {
        let plan = Plan { rate_type: RateType::Indexed, ..plan(12.0, 5.0) };
        let analysis = analyze(&plan, &settings()).unwrap();
        assert_abs_diff_eq!(analysis.breakdown.energy_cost.0, 1500.0);
        assert_abs_diff_eq!(analysis.total_cost.0, 1560.0);
        assert_abs_diff_eq!(analysis.effective_rate.0, 13.0);

        // The monthly projection stays at the advertised rate:
        assert_abs_diff_eq!(analysis.projection[0].energy_cost.0, 120.0);
        assert!(!analysis.is_estimate);
    }

    #[test]
    fn test_first_month_free() {
        let plan = Plan {
            promotional_offers: vec!["First month free".to_owned()],
            ..plan(10.0, 10.0)
        };
        let analysis = analyze(&plan, &settings()).unwrap();
        assert_abs_diff_eq!(analysis.breakdown.promotional_savings.0, 110.0);
        assert_abs_diff_eq!(analysis.total_cost.0, 1200.0 + 120.0 - 110.0);
        assert!(analysis.is_estimate);
        // The promotional plan stays cheaper throughout:
        assert_eq!(analysis.break_even_month, None);
    }

    #[test]
    fn test_promotions_skipped() {
        let plan = Plan {
            promotional_offers: vec!["First month free".to_owned()],
            ..plan(10.0, 10.0)
        };
        let settings = AnalysisSettings { apply_promotions: false, ..settings() };
        let analysis = analyze(&plan, &settings).unwrap();
        assert_eq!(analysis.breakdown.promotional_savings, Cost::ZERO);
        assert_abs_diff_eq!(analysis.total_cost.0, 1320.0);
    }

    #[test]
    fn test_stacked_promotions() {
        let plan = Plan {
            promotional_offers: vec![
                "Free weekends".to_owned(),
                "$100 bill credit, 10% off energy".to_owned(),
            ],
            ..plan(10.0, 0.0)
        };
        let analysis = analyze(&plan, &settings()).unwrap();
        // 0.3 × 100 × 12 + 100 + 10% × 100 × 6:
        assert_abs_diff_eq!(analysis.breakdown.promotional_savings.0, 520.0);
        assert_abs_diff_eq!(analysis.total_cost.0, 680.0);
    }

    #[test]
    fn test_promotion_spread_over_window() {
        let plan = Plan { promotional_offers: vec!["$60 credit".to_owned()], ..plan(10.0, 0.0) };
        for n_months in [1, 4, 6, 12, 36] {
            let settings = AnalysisSettings { n_months, ..settings() };
            let analysis = analyze(&plan, &settings).unwrap();
            let n_discounted = analysis
                .projection
                .iter()
                .filter(|projection| projection.promotional_savings > Cost::ZERO)
                .count();
            assert_eq!(n_discounted, n_months.min(6) as usize);
        }
    }

    #[test]
    fn test_connection_fee_and_taxes() {
        let plan = Plan { connection_fee: Cost(35.0), ..plan(10.0, 5.0) };
        let settings = AnalysisSettings { tax_rate: 0.1, ..settings() };
        let analysis = analyze(&plan, &settings).unwrap();
        assert_abs_diff_eq!(analysis.breakdown.connection_fee.0, 35.0);
        assert_abs_diff_eq!(analysis.breakdown.taxes.0, 129.5, epsilon = 1e-9);
        assert_abs_diff_eq!(analysis.total_cost.0, 1424.5, epsilon = 1e-9);

        let settings = AnalysisSettings { include_connection_fee: false, ..settings };
        let analysis = analyze(&plan, &settings).unwrap();
        assert_eq!(analysis.breakdown.connection_fee, Cost::ZERO);
        assert_eq!(analysis.disclaimers.len(), 2);
    }

    #[test]
    fn test_breakdown_invariant() {
        let plan = Plan {
            connection_fee: Cost(24.99),
            promotional_offers: vec!["Free nights, 7% discount".to_owned()],
            ..plan(13.37, 4.95)
        };
        let settings = AnalysisSettings {
            monthly_usage: KilowattHours(1234.0),
            n_months: 7,
            tax_rate: 0.0625,
            ..settings()
        };
        let analysis = analyze(&plan, &settings).unwrap();
        let breakdown = analysis.breakdown;
        let expected = (breakdown.energy_cost + breakdown.monthly_fees + breakdown.connection_fee
            - breakdown.promotional_savings
            + breakdown.taxes)
            .round_to_cents();
        assert_abs_diff_eq!(breakdown.total_cost.0, expected.0, epsilon = 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let plan = Plan { promotional_offers: vec!["Free nights".to_owned()], ..plan(14.2, 9.95) };
        let first = analyze(&plan, &settings()).unwrap();
        let second = analyze(&plan, &settings()).unwrap();
        assert_eq!(first.total_cost.0.to_bits(), second.total_cost.0.to_bits());
        assert_eq!(first.projection, second.projection);
        assert_eq!(first.assumptions, second.assumptions);
    }

    #[test]
    fn test_potential_savings() {
        // 12 000 kWh at 12.8¢ is $1 536:
        let analysis = analyze(&plan(12.0, 5.0), &settings()).unwrap();
        assert_abs_diff_eq!(analysis.potential_savings.0, 36.0, epsilon = 1e-9);

        let analysis = analyze(&plan(15.0, 5.0), &settings()).unwrap();
        assert_eq!(analysis.potential_savings, Cost::ZERO);
    }

    #[test]
    fn test_variable_rate_metadata() {
        let plan = Plan { rate_type: RateType::Variable, ..plan(12.0, 5.0) };
        let analysis = analyze(&plan, &settings()).unwrap();
        assert!(analysis.is_estimate);
        assert_eq!(analysis.assumptions.len(), 3);
        assert!(analysis.assumptions[2].starts_with("Variable rate"));
    }

    #[test]
    fn test_early_termination_fee_not_in_total() {
        let plan = Plan { early_termination_fee: Cost(150.0), ..plan(12.0, 5.0) };
        let analysis = analyze(&plan, &settings()).unwrap();
        assert_abs_diff_eq!(analysis.breakdown.early_termination_fee.0, 150.0);
        assert_abs_diff_eq!(analysis.total_cost.0, 1500.0);
        assert_eq!(analysis.disclaimers.len(), 2);
    }

    #[test]
    fn test_cumulative_cost_at() {
        let analysis = analyze(&plan(12.0, 5.0), &settings()).unwrap();
        assert_eq!(analysis.cumulative_cost_at(0), None);
        assert_eq!(analysis.cumulative_cost_at(6), Some(Cost(750.0)));
        assert_eq!(analysis.cumulative_cost_at(13), None);
    }

    #[test]
    fn test_scenario_c_projection_matches_total() {
        let plan = Plan {
            promotional_offers: vec!["First month free".to_owned()],
            ..plan(10.0, 10.0)
        };
        let analysis = analyze(&plan, &settings()).unwrap();
        assert_abs_diff_eq!(analysis.total_cost.0, 1210.0, epsilon = 1e-9);
        assert_eq!(analysis.cumulative_cost_at(12), Some(analysis.total_cost));
    }

    #[test]
    fn test_projection_matches_breakdown() {
        // 1000 kWh at 11.37¢ is a whole-cent monthly energy charge:
        let plan = Plan {
            connection_fee: Cost(35.0),
            promotional_offers: vec!["$75 credit".to_owned(), "7% discount".to_owned()],
            ..plan(11.37, 9.95)
        };
        let settings = AnalysisSettings { tax_rate: 0.0825, ..settings() };
        let analysis = analyze(&plan, &settings).unwrap();
        let breakdown = analysis.breakdown;
        let last = analysis.projection.last().unwrap();
        assert_abs_diff_eq!(
            last.cumulative_cost.0,
            (breakdown.total_cost - breakdown.connection_fee - breakdown.taxes).0,
            epsilon = 1e-9
        );
        let promotional_savings: Cost =
            analysis.projection.iter().map(|month| month.promotional_savings).sum();
        assert_abs_diff_eq!(
            promotional_savings.0,
            breakdown.promotional_savings.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_no_break_even_with_odd_cents() {
        let cases = [
            (987.0, 11.113, "$1 bill credit", 600),
            (0.04, 13.33, "Free nights", 60),
            (1234.0, 13.37, "7% discount", 240),
            (777.0, 9.999, "First month free", 120),
        ];
        for (monthly_usage, base_rate, offer, n_months) in cases {
            let plan = Plan { promotional_offers: vec![offer.to_owned()], ..plan(base_rate, 4.99) };
            let settings = AnalysisSettings {
                monthly_usage: KilowattHours(monthly_usage),
                n_months,
                ..settings()
            };
            let analysis = analyze(&plan, &settings).unwrap();
            assert!(analysis.breakdown.promotional_savings > Cost::ZERO, "{offer}");
            assert_eq!(analysis.break_even_month, None, "{offer}");
        }
    }

    #[test]
    fn test_break_even_month_found() {
        let month = |month, net_cost: f64, cumulative_cost: f64| MonthlyProjection {
            month,
            usage: KilowattHours(1000.0),
            energy_cost: Cost(100.0),
            fees: Cost::ZERO,
            promotional_savings: Cost::ZERO,
            net_cost: Cost(net_cost),
            cumulative_cost: Cost(cumulative_cost),
        };
        let projection = [month(1, 90.0, 90.0), month(2, 100.0, 190.0), month(3, 120.0, 310.0)];
        assert_eq!(find_break_even_month(&projection, 1, Cost(10.0)), Some(3));
        assert_eq!(find_break_even_month(&projection, 3, Cost(10.0)), None);
        assert_eq!(find_break_even_month(&projection, 1, Cost::ZERO), None);
    }

    #[test]
    fn test_zero_base_rate() {
        assert_eq!(
            analyze(&plan(0.0, 5.0), &settings()).unwrap_err(),
            AnalysisError::InvalidPlanData { plan_id: "test".to_owned() },
        );
    }

    #[test]
    fn test_missing_base_rate() {
        let plan = Plan { base_rate: None, ..plan(12.0, 5.0) };
        assert!(matches!(
            analyze(&plan, &settings()),
            Err(AnalysisError::InvalidPlanData { .. }),
        ));
    }

    #[test]
    fn test_invalid_settings() {
        let settings = AnalysisSettings { n_months: 0, ..settings() };
        assert!(matches!(
            analyze(&plan(12.0, 5.0), &settings),
            Err(AnalysisError::InvalidSettings { .. }),
        ));
    }
}
