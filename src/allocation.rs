use serde::{Deserialize, Serialize};

use crate::{Assumptions, CabinWeights};

/// A cabin class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cabin {
    Economy,
    Business,
    First,
}

impl Cabin {
    pub const ALL: [Cabin; 3] = [Cabin::Economy, Cabin::Business, Cabin::First];

    /// Returns the [`Cabin`] named `name` (case-insensitive, surrounding whitespace ignored)
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "economy" => Some(Self::Economy),
            "business" => Some(Self::Business),
            "first" => Some(Self::First),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Business => "business",
            Self::First => "first",
        }
    }

    fn weight(&self, weights: &CabinWeights) -> f64 {
        match self {
            Self::Economy => weights.economy,
            Self::Business => weights.business,
            Self::First => weights.first,
        }
    }
}

impl std::fmt::Display for Cabin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emissions in kg of CO2e of one passenger in each cabin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ByCabin {
    pub economy: f64,
    pub business: f64,
    pub first: f64,
}

impl ByCabin {
    pub fn get(&self, cabin: Cabin) -> f64 {
        match cabin {
            Cabin::Economy => self.economy,
            Cabin::Business => self.business,
            Cabin::First => self.first,
        }
    }
}

/// Emissions of one passenger over a leg, in kg of CO2e
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerPassenger {
    /// the passenger pool divided by the occupied seats
    pub average_kg: f64,
    pub by_cabin_kg: ByCabin,
}

/// Returns the number of seats of an average aircraft flying a great-circle distance `gcd`
pub fn seats(gcd: f64, assumptions: &Assumptions) -> f64 {
    assumptions.transition_short_long_km.blend(
        gcd,
        assumptions.seats_short_haul,
        assumptions.seats_long_haul,
    )
}

/// Returns the relative weight of a seat in `cabin` on a flight over a great-circle distance `gcd`
pub fn cabin_weight(gcd: f64, cabin: Cabin, assumptions: &Assumptions) -> f64 {
    let weights = &assumptions.cabin_weights;
    assumptions.transition_short_long_km.blend(
        gcd,
        cabin.weight(&weights.short_haul),
        cabin.weight(&weights.long_haul),
    )
}

/// Splits the passenger pool of a leg over the occupied seats, weighted by cabin.
pub fn per_passenger(
    passenger_pool_co2e_kg: f64,
    gcd: f64,
    assumptions: &Assumptions,
) -> PerPassenger {
    let occupied = seats(gcd, assumptions) * assumptions.plf;
    let average_kg = passenger_pool_co2e_kg / occupied;
    let by = |cabin| average_kg * cabin_weight(gcd, cabin, assumptions);

    PerPassenger {
        average_kg,
        by_cabin_kg: ByCabin {
            economy: by(Cabin::Economy),
            business: by(Cabin::Business),
            first: by(Cabin::First),
        },
    }
}

/// Clamps a passenger count to at least 1
pub fn clamp_pax(pax: i64) -> u32 {
    pax.clamp(1, u32::MAX as i64) as u32
}

/// Parses a passenger count typed by a person: fractions are truncated and
/// anything that is not a positive number counts as 1.
pub fn parse_pax(pax: &str) -> u32 {
    match pax.trim().parse::<f64>() {
        // `as` saturates on overflow
        Ok(value) if value.is_finite() && value >= 1.0 => value as u32,
        _ => 1,
    }
}
