use crate::{analysis::Analysis, plan::Plan, quantity::cost::Cost};

const COST_EFFICIENCY_WEIGHT: f64 = 0.30;
const FIXED_NAME_BONUS: f64 = 0.20;
const LOW_MONTHLY_FEE_BONUS: f64 = 0.15;
const NO_TERMINATION_FEE_BONUS: f64 = 0.10;
const PROMOTION_BONUS: f64 = 0.10;

/// Set-wide aggregates the value score is relative to.
pub struct ValueScorer {
    max_cost: Cost,
    average_monthly_fee: Cost,
}

impl ValueScorer {
    /// # Panics
    ///
    /// Without any entries.
    pub fn new(entries: &[(&Plan, Analysis)]) -> Self {
        let max_cost = entries
            .iter()
            .map(|(_, analysis)| analysis.total_cost)
            .max()
            .expect("the plan set should not be empty");
        #[expect(clippy::cast_precision_loss)]
        let n_entries = entries.len() as f64;
        let average_monthly_fee =
            entries.iter().map(|(plan, _)| plan.monthly_fee).sum::<Cost>() / n_entries;
        Self { max_cost, average_monthly_fee }
    }

    /// Weighted «value for money» score, the higher the better.
    pub fn score(&self, plan: &Plan, analysis: &Analysis) -> f64 {
        let mut score = 0.0;
        // Credits can push every total to zero or below, leaving nothing to scale by:
        if self.max_cost > Cost::ZERO {
            score += COST_EFFICIENCY_WEIGHT * (self.max_cost.0 - analysis.total_cost.0)
                / self.max_cost.0;
        }
        // Judged by the name, the rate type is not consulted:
        if plan.is_named_fixed() {
            score += FIXED_NAME_BONUS;
        }
        if plan.monthly_fee < self.average_monthly_fee {
            score += LOW_MONTHLY_FEE_BONUS;
        }
        if plan.early_termination_fee == Cost::ZERO {
            score += NO_TERMINATION_FEE_BONUS;
        }
        if analysis.breakdown.promotional_savings > Cost::ZERO {
            score += PROMOTION_BONUS;
        }
        score
    }
}
