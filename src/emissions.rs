use serde::{Deserialize, Serialize};

use crate::Assumptions;

/// Emissions of the whole aircraft over one leg, in kg of CO2e
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftEmissions {
    /// combustion with uplift plus preproduction
    pub co2e_total_kg: f64,
    pub combustion_no_uplift_kg: f64,
    pub combustion_with_uplift_kg: f64,
    /// the multiplier applied to combustion (1.0 when non-CO2 effects are excluded)
    pub non_co2_multiplier_used: f64,
    pub preproduction_kg: f64,
}

/// Returns the distance correction in km to add to a great-circle distance `gcd`
/// to approximate the distance actually flown (holding patterns, detours).
pub fn distance_correction_km(gcd: f64, assumptions: &Assumptions) -> f64 {
    assumptions.transition_short_long_km.blend(
        gcd,
        assumptions.dc_short_km,
        assumptions.dc_long_km,
    )
}

/// Returns the fuel burned in kg by an average aircraft flying the corrected distance `x`.
/// Both regimes are evaluated at `x`; the blend between them is keyed by `gcd`.
pub fn fuel_kg(gcd: f64, x: f64, assumptions: &Assumptions) -> f64 {
    let polynomials = &assumptions.fuel_polynomials;
    let short = polynomials.short_haul.fuel_kg(x);
    let long = polynomials.long_haul.fuel_kg(x);
    assumptions.transition_short_long_km.blend(gcd, short, long)
}

/// Returns the [`AircraftEmissions`] of burning `fuel_kg` of jet fuel.
pub fn aircraft_emissions(fuel_kg: f64, assumptions: &Assumptions) -> AircraftEmissions {
    let combustion_no_uplift_kg = fuel_kg * assumptions.fuel_to_co2_kg_per_kg;
    let non_co2_multiplier_used = if assumptions.include_non_co2 {
        assumptions.non_co2_multiplier
    } else {
        1.0
    };
    let combustion_with_uplift_kg = combustion_no_uplift_kg * non_co2_multiplier_used;
    // the production of the fuel is not subject to non-CO2 effects
    let preproduction_kg = fuel_kg * assumptions.fuel_preproduction_kgco2e_per_kg;

    AircraftEmissions {
        co2e_total_kg: combustion_with_uplift_kg + preproduction_kg,
        combustion_no_uplift_kg,
        combustion_with_uplift_kg,
        non_co2_multiplier_used,
        preproduction_kg,
    }
}

/// Returns the share of `aircraft_co2e_kg` attributed to passengers (i.e. not to cargo)
pub fn passenger_pool_co2e_kg(aircraft_co2e_kg: f64, assumptions: &Assumptions) -> f64 {
    aircraft_co2e_kg * (1.0 - assumptions.cargo_share_fraction)
}
