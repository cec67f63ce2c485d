use crate::flight::SeatClass;
use serde::{Deserialize, Serialize};

pub const BUSINESS_BASE_PRICE: f64 = 25000.0;
pub const ECONOMY_BASE_PRICE: f64 = 7500.0;

/// Base fares and the tax/fee schedule applied on top of them.
/// Loaded from configuration; defaults match the published fare card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FareTable {
    pub business_base: f64,
    pub economy_base: f64,
    /// GST as a fraction of the base fare.
    pub gst_rate: f64,
    /// Fuel surcharge as a fraction of the base fare.
    pub fuel_surcharge_rate: f64,
    /// Flat airport fee per booking.
    pub airport_fee: f64,
    /// Flat service fee per booking.
    pub service_fee: f64,
}

impl Default for FareTable {
    fn default() -> Self {
        Self {
            business_base: BUSINESS_BASE_PRICE,
            economy_base: ECONOMY_BASE_PRICE,
            gst_rate: 0.18,
            fuel_surcharge_rate: 0.05,
            airport_fee: 150.0,
            service_fee: 200.0,
        }
    }
}

impl FareTable {
    pub fn base_fare(&self, class: SeatClass) -> f64 {
        match class {
            SeatClass::Business => self.business_base,
            SeatClass::Economy => self.economy_base,
        }
    }

    /// Pure, order-independent breakdown. Full precision is kept for
    /// display; rounding happens only when the total is persisted.
    pub fn breakdown(&self, base_fare: f64) -> FareBreakdown {
        let gst = base_fare * self.gst_rate;
        let fuel_surcharge = base_fare * self.fuel_surcharge_rate;
        let total_taxes = gst + fuel_surcharge + self.airport_fee + self.service_fee;
        FareBreakdown {
            base_fare,
            gst,
            fuel_surcharge,
            airport_fee: self.airport_fee,
            service_fee: self.service_fee,
            total_taxes,
            total_fare: base_fare + total_taxes,
        }
    }

    pub fn quote(&self, class: SeatClass) -> FareBreakdown {
        self.breakdown(self.base_fare(class))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareBreakdown {
    pub base_fare: f64,
    pub gst: f64,
    pub fuel_surcharge: f64,
    pub airport_fee: f64,
    pub service_fee: f64,
    pub total_taxes: f64,
    pub total_fare: f64,
}

impl FareBreakdown {
    /// Whole-rupee amount written into a seat's `price` on confirmation.
    pub fn rounded_total(&self) -> i64 {
        self.total_fare.round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_fare_breakdown() {
        let fares = FareTable::default();
        let breakdown = fares.breakdown(25000.0);
        assert_eq!(breakdown.gst, 4500.0);
        assert_eq!(breakdown.fuel_surcharge, 1250.0);
        assert_eq!(breakdown.airport_fee, 150.0);
        assert_eq!(breakdown.service_fee, 200.0);
        assert_eq!(breakdown.total_taxes, 6100.0);
        assert_eq!(breakdown.total_fare, 31100.0);
        assert_eq!(breakdown.rounded_total(), 31100);
    }

    #[test]
    fn test_economy_fare_breakdown() {
        let fares = FareTable::default();
        let breakdown = fares.quote(SeatClass::Economy);
        assert_eq!(breakdown.base_fare, 7500.0);
        assert_eq!(breakdown.gst, 1350.0);
        assert_eq!(breakdown.fuel_surcharge, 375.0);
        assert_eq!(breakdown.total_taxes, 2075.0);
        assert_eq!(breakdown.rounded_total(), 9575);
    }

    #[test]
    fn test_rounding_only_on_persist() {
        let fares = FareTable {
            airport_fee: 150.4,
            ..FareTable::default()
        };
        let breakdown = fares.breakdown(7500.0);
        // Breakdown keeps full precision; rounding happens at persist.
        assert!((breakdown.total_fare - 9575.4).abs() < 1e-9);
        assert_eq!(breakdown.rounded_total(), 9575);
    }
}
