use std::ops::Div;

use crate::quantity::{energy::KilowattHours, rate::KilowattHourRate};

quantity!(
    /// US dollars.
    Cost, prefix: "$", suffix: "", precision: 2
);

impl Cost {
    /// Round the cost to whole cents.
    pub fn round_to_cents(self) -> Self {
        self.round_to(2)
    }
}

impl Div<KilowattHours> for Cost {
    type Output = KilowattHourRate;

    /// Average price paid per kilowatt-hour.
    fn div(self, rhs: KilowattHours) -> Self::Output {
        KilowattHourRate(self.0 / rhs.0 * 100.0)
    }
}
