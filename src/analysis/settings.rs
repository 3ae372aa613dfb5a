use serde::{Deserialize, Serialize};

use crate::{analysis::AnalysisError, quantity::energy::KilowattHours};

/// Usage assumptions an analysis runs under.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, bon::Builder)]
pub struct AnalysisSettings {
    #[builder(default = KilowattHours(1000.0))]
    pub monthly_usage: KilowattHours,

    #[builder(default = 12)]
    pub n_months: u32,

    #[builder(default = true)]
    pub apply_promotions: bool,

    #[builder(default = true)]
    pub include_connection_fee: bool,

    /// Sales tax as a fraction, residential electricity in Texas is normally exempt.
    #[builder(default)]
    pub tax_rate: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AnalysisSettings {
    /// Promotions are assumed to last at most this many months.
    pub const MAX_PROMOTION_MONTHS: u32 = 6;

    pub fn total_usage(&self) -> KilowattHours {
        self.monthly_usage * f64::from(self.n_months)
    }

    /// Length of the promotion window.
    #[must_use]
    pub fn n_promotion_months(&self) -> u32 {
        self.n_months.min(Self::MAX_PROMOTION_MONTHS)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.monthly_usage.0.is_finite() || self.monthly_usage <= KilowattHours::ZERO {
            return Err(AnalysisError::InvalidSettings {
                reason: "monthly usage must be a positive number",
            });
        }
        if self.n_months == 0 {
            return Err(AnalysisError::InvalidSettings {
                reason: "the analysis period must be at least one month",
            });
        }
        if !self.tax_rate.is_finite() || self.tax_rate < 0.0 {
            return Err(AnalysisError::InvalidSettings {
                reason: "tax rate must be a non-negative fraction",
            });
        }
        Ok(())
    }
}
