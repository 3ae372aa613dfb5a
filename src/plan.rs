pub mod promotion;

use serde::{Deserialize, Serialize};

pub use self::promotion::Promotion;
use crate::quantity::{cost::Cost, rate::KilowattHourRate};

/// How a plan's per-kWh price behaves over the contract term.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    PartialEq,
    Serialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum RateType {
    /// Constant for the whole contract term.
    #[default]
    #[display("fixed")]
    Fixed,

    /// The provider may change the price at any time.
    #[display("variable")]
    Variable,

    /// Tracks a wholesale market index.
    #[display("indexed")]
    Indexed,
}

/// Retail electricity plan as listed in the catalog.
#[derive(Clone, Debug, Deserialize, Serialize, bon::Builder)]
pub struct Plan {
    #[builder(into)]
    pub id: String,

    #[builder(into)]
    pub name: String,

    #[builder(into)]
    pub provider: String,

    /// Advertised energy rate.
    ///
    /// The analyzer rejects plans without a positive base rate.
    pub base_rate: Option<KilowattHourRate>,

    #[serde(default)]
    #[builder(default)]
    pub monthly_fee: Cost,

    /// One-time fee charged when the service starts.
    #[serde(default)]
    #[builder(default)]
    pub connection_fee: Cost,

    #[serde(default)]
    #[builder(default)]
    pub early_termination_fee: Cost,

    #[serde(default)]
    #[builder(default)]
    pub rate_type: RateType,

    /// Free-text offer descriptions, like «$50 bill credit» or «Free nights».
    #[serde(default)]
    #[builder(default)]
    pub promotional_offers: Vec<String>,
}

impl Plan {
    /// Classify the promotional offers, in the order they are listed.
    pub fn promotions(&self) -> impl Iterator<Item = Promotion> + '_ {
        self.promotional_offers.iter().map(String::as_str).flat_map(Promotion::parse)
    }

    /// Whether the plan is marketed as a fixed-rate plan.
    ///
    /// Looks at the display name only, not at [`Plan::rate_type`].
    pub fn is_named_fixed(&self) -> bool {
        self.name.to_lowercase().contains("fixed")
    }
}
