quantity!(
    /// US cents per kilowatt-hour, the way Texas retail plans advertise their prices.
    KilowattHourRate, prefix: "", suffix: "¢/kWh", precision: 2
);

impl KilowattHourRate {
    pub const fn to_dollars(self) -> f64 {
        self.0 * 0.01
    }
}
