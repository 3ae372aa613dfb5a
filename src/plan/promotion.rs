use serde::Serialize;

use crate::quantity::cost::Cost;

/// Discount rule recognized in a free-text promotional offer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Promotion {
    /// One month of energy and fees is waived.
    FreeMonth,

    /// Energy used within a free window (weekends, nights), as a share of the monthly usage.
    FreeUsageShare(f64),

    /// Flat bill credit.
    Credit(Cost),

    /// Percentage off the energy charge during the promotion window.
    PercentOff(f64),
}

/// Regular monthly charges the promotions are measured against.
#[derive(Clone, Copy, Debug)]
pub struct MonthlyCharges {
    pub energy: Cost,
    pub fee: Cost,
}

impl Promotion {
    /// Assumed share of the monthly usage falling on weekends.
    pub const WEEKEND_USAGE_SHARE: f64 = 0.3;

    /// Assumed share of the monthly usage falling on nights.
    pub const NIGHT_USAGE_SHARE: f64 = 0.4;

    /// Classify the offer text.
    ///
    /// Matching is case-insensitive, and every matching rule is returned:
    /// «First month free plus $50 credit» yields both a free month and a credit.
    #[must_use]
    pub fn parse(offer: &str) -> Vec<Self> {
        let offer = offer.to_lowercase();
        let mut promotions = Vec::new();

        if offer.contains("first month free") || offer.contains("1 month free") {
            promotions.push(Self::FreeMonth);
        }
        if offer.contains("free weekends") || offer.contains("weekend free") {
            promotions.push(Self::FreeUsageShare(Self::WEEKEND_USAGE_SHARE));
        }
        if offer.contains("free nights") || offer.contains("night free") {
            promotions.push(Self::FreeUsageShare(Self::NIGHT_USAGE_SHARE));
        }
        if let Some(amount) = parse_credit(&offer) {
            promotions.push(Self::Credit(Cost(amount)));
        }
        if let Some(percent) = parse_percent_off(&offer) {
            promotions.push(Self::PercentOff(percent));
        }

        promotions
    }

    /// Estimate the savings over the whole analysis period.
    ///
    /// Percentage discounts only apply within the promotion window.
    pub fn savings(self, charges: MonthlyCharges, n_months: u32, n_promotion_months: u32) -> Cost {
        match self {
            Self::FreeMonth => charges.energy + charges.fee,
            Self::FreeUsageShare(share) => charges.energy * share * f64::from(n_months),
            Self::Credit(amount) => amount,
            Self::PercentOff(percent) => {
                charges.energy * f64::from(n_promotion_months) * (percent / 100.0)
            }
        }
    }
}

/// Find `$<amount>` followed by «credit» somewhere later in the text.
fn parse_credit(offer: &str) -> Option<f64> {
    offer.match_indices('$').find_map(|(index, _)| {
        let tail = &offer[index + 1..];
        let digits = leading_digits(tail);
        if !digits.is_empty() && tail[digits.len()..].contains("credit") {
            digits.parse().ok()
        } else {
            None
        }
    })
}

/// Find `<percent>%` followed by «off» or «discount».
fn parse_percent_off(offer: &str) -> Option<f64> {
    offer.match_indices('%').find_map(|(index, _)| {
        let head = &offer[..index];
        let digits = &head[head.trim_end_matches(|c: char| c.is_ascii_digit()).len()..];
        let tail = offer[index + 1..].trim_start();
        if !digits.is_empty() && (tail.starts_with("off") || tail.starts_with("discount")) {
            digits.parse().ok()
        } else {
            None
        }
    })
}

fn leading_digits(text: &str) -> &str {
    &text[..text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len())]
}
