use serde::Serialize;

use crate::{
    plan::promotion::MonthlyCharges,
    quantity::{cost::Cost, energy::KilowattHours},
};

/// Expected bill for one month of the analysis period.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MonthlyProjection {
    /// One-based month index.
    pub month: u32,

    pub usage: KilowattHours,
    pub energy_cost: Cost,
    pub fees: Cost,

    /// Share of the promotional savings, zero after the promotion window.
    pub promotional_savings: Cost,

    pub net_cost: Cost,
    pub cumulative_cost: Cost,
}

/// Month-by-month projection of a plan's bills.
#[derive(bon::Builder)]
#[builder(finish_fn(vis = ""))]
pub struct Projector {
    monthly_usage: KilowattHours,

    /// Regular charges at the advertised rate, without any risk premium.
    charges: MonthlyCharges,

    n_months: u32,
    n_promotion_months: u32,

    /// Total promotional savings to spread over the promotion window.
    promotional_savings: Cost,
}

impl<S: projector_builder::IsComplete> ProjectorBuilder<S> {
    pub fn project(self) -> Vec<MonthlyProjection> {
        self.build().project()
    }
}

impl Projector {
    fn project(self) -> Vec<MonthlyProjection> {
        let energy_cost = self.charges.energy.round_to_cents();
        let fees = self.charges.fee.round_to_cents();

        let mut cumulative_cost = Cost::ZERO;
        (1..=self.n_months)
            .map(|month| {
                let promotional_savings = self.promotional_savings_in(month);
                let net_cost = (energy_cost + fees - promotional_savings).round_to_cents();
                // Re-rounding keeps the running sum free of the floating-point noise:
                cumulative_cost = (cumulative_cost + net_cost).round_to_cents();
                MonthlyProjection {
                    month,
                    usage: self.monthly_usage,
                    energy_cost,
                    fees,
                    promotional_savings,
                    net_cost,
                    cumulative_cost,
                }
            })
            .collect()
    }

    /// Whole-cent share of the promotional savings for the one-based month.
    ///
    /// Shares differ by at most a cent and add up to the total savings exactly.
    fn promotional_savings_in(&self, month: u32) -> Cost {
        if month > self.n_promotion_months {
            return Cost::ZERO;
        }
        let savings_by = |month: u32| {
            (self.promotional_savings * f64::from(month) / f64::from(self.n_promotion_months))
                .round_to_cents()
        };
        (savings_by(month) - savings_by(month - 1)).round_to_cents()
    }
}
