//! Static chip metadata.

/// Datasheet limits and identification for the SSD1306.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipInfo {
    pub chip_name: &'static str,
    pub manufacturer_name: &'static str,
    /// Buses the controller can be strapped for.
    pub interface: &'static str,
    pub supply_voltage_min_v: f32,
    pub supply_voltage_max_v: f32,
    pub max_current_ma: f32,
    pub temperature_min: f32,
    pub temperature_max: f32,
    /// Version of this crate.
    pub driver_version: &'static str,
}

/// Chip metadata. Needs no handle and generates no bus traffic.
pub const fn info() -> ChipInfo {
    ChipInfo {
        chip_name: "Solomon Systech SSD1306",
        manufacturer_name: "Solomon Systech",
        interface: "IIC SPI",
        supply_voltage_min_v: 1.65,
        supply_voltage_max_v: 3.3,
        max_current_ma: 0.78,
        temperature_min: -40.0,
        temperature_max: 85.0,
        driver_version: env!("CARGO_PKG_VERSION"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_chip_identity() {
        let i = info();
        assert_eq!(i.chip_name, "Solomon Systech SSD1306");
        assert_eq!(i.interface, "IIC SPI");
        assert!(i.supply_voltage_min_v < i.supply_voltage_max_v);
        assert!(i.temperature_min < i.temperature_max);
        assert_eq!(i.driver_version, "0.1.0");
    }
}
