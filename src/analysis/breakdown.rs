use serde::Serialize;

use crate::quantity::cost::Cost;

/// Where the money goes over the analysis period.
///
/// All components are rounded to cents, and the total is consistent with the rounded components.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub energy_cost: Cost,
    pub monthly_fees: Cost,
    pub connection_fee: Cost,

    /// Only charged when the contract is cancelled early, hence never part of the total.
    pub early_termination_fee: Cost,

    pub promotional_savings: Cost,
    pub taxes: Cost,
    pub total_cost: Cost,
}

#[bon::bon]
impl CostBreakdown {
    #[builder]
    pub fn new(
        energy_cost: Cost,
        monthly_fees: Cost,
        connection_fee: Cost,
        early_termination_fee: Cost,
        promotional_savings: Cost,
        tax_rate: f64,
    ) -> Self {
        let energy_cost = energy_cost.round_to_cents();
        let monthly_fees = monthly_fees.round_to_cents();
        let connection_fee = connection_fee.round_to_cents();
        let promotional_savings = promotional_savings.round_to_cents();
        let subtotal = energy_cost + monthly_fees + connection_fee - promotional_savings;
        let taxes = (subtotal * tax_rate).round_to_cents();
        Self {
            energy_cost,
            monthly_fees,
            connection_fee,
            early_termination_fee: early_termination_fee.round_to_cents(),
            promotional_savings,
            taxes,
            total_cost: (subtotal + taxes).round_to_cents(),
        }
    }
}
