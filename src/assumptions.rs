use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::TransitionBand;

/// Coefficients of the quadratic fuel burn `a·x² + b·x + c` in kg of fuel,
/// where `x` is the corrected distance in km.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelPolynomial {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl FuelPolynomial {
    /// Returns the fuel burned in kg over the corrected distance `x` in km
    pub fn fuel_kg(&self, x: f64) -> f64 {
        self.a * x.powi(2) + self.b * x + self.c
    }
}

/// Relative weight of a seat in each cabin class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CabinWeights {
    pub economy: f64,
    pub business: f64,
    pub first: f64,
}

/// A parameter with one value per regime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerHaul<T> {
    pub short_haul: T,
    pub long_haul: T,
}

impl Default for PerHaul<CabinWeights> {
    fn default() -> Self {
        Self {
            short_haul: CabinWeights {
                economy: 0.96,
                business: 1.26,
                first: 2.4,
            },
            long_haul: CabinWeights {
                economy: 0.8,
                business: 1.54,
                first: 2.4,
            },
        }
    }
}

impl Default for PerHaul<FuelPolynomial> {
    fn default() -> Self {
        Self {
            short_haul: FuelPolynomial {
                a: 3.87871e-5,
                b: 2.9866,
                c: 1263.42,
            },
            long_haul: FuelPolynomial {
                a: 1.34576e-4,
                b: 6.1798,
                c: 3446.2,
            },
        }
    }
}

/// The set of parameters of the emissions model.
/// [`Assumptions::default`] holds the baseline of the
/// [myclimate flight emission calculator](https://www.myclimate.org/en/information/about-myclimate/downloads/flight-emission-calculator/).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// whether combustion is uplifted to account for non-CO2 effects (contrails, NOx)
    pub include_non_co2: bool,
    /// uplift applied to combustion when `include_non_co2`
    pub non_co2_multiplier: f64,
    /// kg CO2 per kg of jet fuel burned
    pub fuel_to_co2_kg_per_kg: f64,
    /// kg CO2e per kg of jet fuel due to its production
    pub fuel_preproduction_kgco2e_per_kg: f64,
    /// fraction of the emissions attributed to cargo
    pub cargo_share_fraction: f64,
    /// passenger load factor
    pub plf: f64,
    pub seats_short_haul: f64,
    pub seats_long_haul: f64,
    /// distance correction in km of short-haul flights
    pub dc_short_km: f64,
    /// distance correction in km of long-haul flights
    pub dc_long_km: f64,
    pub transition_short_long_km: TransitionBand,
    pub cabin_weights: PerHaul<CabinWeights>,
    pub fuel_polynomials: PerHaul<FuelPolynomial>,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            include_non_co2: true,
            non_co2_multiplier: 2.0,
            fuel_to_co2_kg_per_kg: 3.15,
            fuel_preproduction_kgco2e_per_kg: 0.51,
            cargo_share_fraction: 0.049,
            plf: 0.77,
            seats_short_haul: 158.44,
            seats_long_haul: 280.39,
            dc_short_km: 50.0,
            dc_long_km: 125.0,
            transition_short_long_km: TransitionBand::default(),
            cabin_weights: PerHaul::default(),
            fuel_polynomials: PerHaul::default(),
        }
    }
}

/// A partial set of [`Assumptions`]. Keys that are `None` keep the value they override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssumptionsOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_non_co2: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_co2_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_to_co2_kg_per_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_preproduction_kgco2e_per_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo_share_fraction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plf: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats_short_haul: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats_long_haul: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc_short_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc_long_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_short_long_km: Option<TransitionBand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cabin_weights: Option<PerHaul<CabinWeights>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_polynomials: Option<PerHaul<FuelPolynomial>>,
}

impl Assumptions {
    /// Returns a new [`Assumptions`] with the keys set in `over` replaced.
    /// Nested keys (e.g. `cabin_weights`) are replaced as a whole.
    pub fn with_override(&self, over: &AssumptionsOverride) -> Self {
        Self {
            include_non_co2: over.include_non_co2.unwrap_or(self.include_non_co2),
            non_co2_multiplier: over.non_co2_multiplier.unwrap_or(self.non_co2_multiplier),
            fuel_to_co2_kg_per_kg: over
                .fuel_to_co2_kg_per_kg
                .unwrap_or(self.fuel_to_co2_kg_per_kg),
            fuel_preproduction_kgco2e_per_kg: over
                .fuel_preproduction_kgco2e_per_kg
                .unwrap_or(self.fuel_preproduction_kgco2e_per_kg),
            cargo_share_fraction: over
                .cargo_share_fraction
                .unwrap_or(self.cargo_share_fraction),
            plf: over.plf.unwrap_or(self.plf),
            seats_short_haul: over.seats_short_haul.unwrap_or(self.seats_short_haul),
            seats_long_haul: over.seats_long_haul.unwrap_or(self.seats_long_haul),
            dc_short_km: over.dc_short_km.unwrap_or(self.dc_short_km),
            dc_long_km: over.dc_long_km.unwrap_or(self.dc_long_km),
            transition_short_long_km: over
                .transition_short_long_km
                .unwrap_or(self.transition_short_long_km),
            cabin_weights: over.cabin_weights.unwrap_or(self.cabin_weights),
            fuel_polynomials: over.fuel_polynomials.unwrap_or(self.fuel_polynomials),
        }
    }
}

impl From<&AssumptionsOverride> for Assumptions {
    fn from(over: &AssumptionsOverride) -> Self {
        Self::default().with_override(over)
    }
}

/// Loads an [`AssumptionsOverride`] from a JSON file and merges it into the defaults.
/// # Error
/// Errors if the file cannot be read or is not a JSON object of known keys
pub fn load_assumptions(path: &str) -> Result<Assumptions, Box<dyn Error>> {
    let data = std::fs::read(path)?;
    let over: AssumptionsOverride = serde_json::from_slice(&data)?;
    log::info!("Assumptions overridden from {path}");
    Ok(Assumptions::from(&over))
}
