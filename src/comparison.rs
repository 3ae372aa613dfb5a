mod value;

use std::cmp::Reverse;

use itertools::Itertools;
use serde::Serialize;

use crate::{
    analysis::{Analysis, AnalysisError, AnalysisSettings, analyze},
    comparison::value::ValueScorer,
    plan::Plan,
    prelude::*,
    quantity::cost::Cost,
};

/// Horizon of the short-term insight.
pub const SHORT_TERM_MONTHS: u32 = 6;

/// Promotions worth less than this are not highlighted.
pub const PROMOTIONAL_WINNER_THRESHOLD: Cost = Cost(50.0);

/// Monthly fee a stable-pricing plan must stay under.
pub const STABLE_PRICING_MAX_MONTHLY_FEE: Cost = Cost(10.0);

/// Side-by-side analysis of several plans under the same settings.
#[derive(Clone, Debug, Serialize)]
pub struct Comparison {
    /// Analyses ordered by the total cost, cheapest first.
    pub plans: Vec<Analysis>,

    pub settings: AnalysisSettings,
    pub summary: Summary,
    pub insights: Insights,
}

#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub lowest_cost: Cost,
    pub highest_cost: Cost,
    pub average_cost: Cost,
    pub cost_spread: Cost,

    /// Plan ID with the best value-for-money score.
    pub best_value: String,
}

/// Plan IDs worth highlighting.
#[derive(Clone, Debug, Serialize)]
pub struct Insights {
    /// Cheapest by the end of the sixth month.
    pub short_term_best: String,

    /// Cheapest over the whole analysis period.
    pub long_term_best: String,

    /// Plans with notable promotional savings, the biggest savings first.
    pub promotional_winners: Vec<String>,

    /// Fixed plans with low fees and no early termination fee, the cheapest first.
    pub stable_pricing: Vec<String>,
}

/// Analyze and rank the plans.
///
/// Any plan failing the analysis fails the whole comparison.
#[instrument(skip_all, fields(n_plans = plans.len()))]
pub fn compare(plans: &[Plan], settings: &AnalysisSettings) -> Result<Comparison, AnalysisError> {
    if plans.is_empty() {
        return Err(AnalysisError::EmptyPlanSet);
    }

    let entries: Vec<(&Plan, Analysis)> = plans
        .iter()
        .map(|plan| Ok((plan, analyze(plan, settings)?)))
        .collect::<Result<_, AnalysisError>>()?;

    let scorer = ValueScorer::new(&entries);
    let best_value = entries
        .iter()
        .map(|(plan, analysis)| (scorer.score(plan, analysis), &plan.id))
        // `min_by` keeps the first of equal elements, hence the reversed comparison:
        .min_by(|(lhs, _), (rhs, _)| rhs.total_cmp(lhs))
        .map(|(_, plan_id)| plan_id.clone())
        .expect("the plan set should not be empty");

    // Stable sort keeps the input order for equal costs:
    let ranked = entries
        .into_iter()
        .sorted_by_key(|(_, analysis)| analysis.total_cost)
        .enumerate()
        .map(|(index, (plan, mut analysis))| {
            analysis.cost_rank = index + 1;
            (plan, analysis)
        })
        .collect_vec();

    let summary = summarize(&ranked, best_value);
    let insights = find_insights(&ranked, settings);
    info!(
        lowest_cost = %summary.lowest_cost,
        highest_cost = %summary.highest_cost,
        best_value = %summary.best_value,
        "compared"
    );

    Ok(Comparison {
        plans: ranked.into_iter().map(|(_, analysis)| analysis).collect(),
        settings: settings.clone(),
        summary,
        insights,
    })
}

/// Expects a non-empty ranking.
fn summarize(ranked: &[(&Plan, Analysis)], best_value: String) -> Summary {
    let (_, cheapest) = ranked.first().expect("the plan set should not be empty");
    let (_, most_expensive) = ranked.last().expect("the plan set should not be empty");
    let (lowest_cost, highest_cost) = (cheapest.total_cost, most_expensive.total_cost);
    #[expect(clippy::cast_precision_loss)]
    let average_cost = ranked.iter().map(|(_, analysis)| analysis.total_cost).sum::<Cost>()
        / ranked.len() as f64;
    Summary {
        lowest_cost,
        highest_cost,
        average_cost: average_cost.round_to_cents(),
        cost_spread: (highest_cost - lowest_cost).round_to_cents(),
        best_value,
    }
}

fn find_insights(ranked: &[(&Plan, Analysis)], settings: &AnalysisSettings) -> Insights {
    let (_, cheapest) = ranked.first().expect("the plan set should not be empty");
    let long_term_best = cheapest.plan_id.clone();

    let short_term_best = if settings.n_months >= SHORT_TERM_MONTHS {
        ranked
            .iter()
            .min_by_key(|(_, analysis)| analysis.cumulative_cost_at(SHORT_TERM_MONTHS))
            .map(|(_, analysis)| analysis.plan_id.clone())
            .expect("the plan set should not be empty")
    } else {
        long_term_best.clone()
    };

    let promotional_winners = ranked
        .iter()
        .filter(|(_, analysis)| {
            analysis.breakdown.promotional_savings > PROMOTIONAL_WINNER_THRESHOLD
        })
        .sorted_by_key(|(_, analysis)| Reverse(analysis.breakdown.promotional_savings))
        .map(|(_, analysis)| analysis.plan_id.clone())
        .collect();

    // Already ordered by the total cost:
    let stable_pricing = ranked
        .iter()
        .filter(|(plan, _)| {
            plan.is_named_fixed()
                && plan.monthly_fee < STABLE_PRICING_MAX_MONTHLY_FEE
                && plan.early_termination_fee == Cost::ZERO
        })
        .map(|(_, analysis)| analysis.plan_id.clone())
        .collect();

    Insights { short_term_best, long_term_best, promotional_winners, stable_pricing }
}
