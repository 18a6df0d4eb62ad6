use serde::{Deserialize, Serialize};

use crate::ItineraryResult;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Fact<R> {
    pub claim: R,
    pub source: String,
    pub date: String,
}

/// A price of emitting CO2e, in EUR per metric ton
pub type CarbonPrice = Fact<f64>;

/// Returns the [`CarbonPrice`] used when no live price is available,
/// the EU ETS price observed on 2026-02-20.
pub fn fallback_carbon_price() -> CarbonPrice {
    Fact {
        claim: 73.75,
        source: "fallback_default".to_string(),
        date: "2026-02-20".to_string(),
    }
}

/// Returns the cost in EUR of the emissions of `result` at `price`
pub fn emissions_cost_eur(result: &ItineraryResult, price: &CarbonPrice) -> f64 {
    result.co2_t_total * price.claim
}
