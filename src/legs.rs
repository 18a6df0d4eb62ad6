use serde::{Deserialize, Serialize};

use crate::{
    aircraft_emissions, clamp_pax, distance_correction_km, fuel_kg, passenger_pool_co2e_kg,
    per_passenger, AircraftEmissions, Airport, AirportLookup, Assumptions, Cabin, Haul,
    PerPassenger,
};

/// The emissions of the passengers of a leg that travel together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub pax_count: u32,
    /// the requested cabin, lowercased
    pub cabin: String,
    /// emissions of all `pax_count` passengers in kg of CO2e
    pub people_co2e_kg: f64,
}

/// Represents a leg, also known as a [non-stop flight](https://en.wikipedia.org/wiki/Non-stop_flight)
/// between two airports, and its emissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// IATA code of the origin
    pub from: String,
    /// IATA code of the destination
    pub to: String,
    /// great-circle distance in km
    pub gcd_km: f64,
    pub distance_correction_km: f64,
    /// great-circle distance plus correction, in km
    pub corrected_distance_km: f64,
    pub haul: Haul,
    pub fuel_kg: f64,
    pub aircraft: AircraftEmissions,
    pub passenger_pool_co2e_kg: f64,
    pub per_passenger: PerPassenger,
    pub allocation: Allocation,
}

impl Leg {
    /// Computes the leg `origin -> destination` for `pax` passengers in `cabin`.
    /// The passengers are allocated the emissions of economy when `cabin` is unknown.
    pub fn new(
        (origin, from): (String, &Airport),
        (destination, to): (String, &Airport),
        cabin: &str,
        pax: u32,
        assumptions: &Assumptions,
    ) -> Self {
        let gcd_km = super::distance(from.pos(), to.pos());
        let haul = assumptions.transition_short_long_km.classify(gcd_km);
        let distance_correction_km = distance_correction_km(gcd_km, assumptions);
        let corrected_distance_km = gcd_km + distance_correction_km;

        let fuel_kg = fuel_kg(gcd_km, corrected_distance_km, assumptions);
        let aircraft = aircraft_emissions(fuel_kg, assumptions);
        let passenger_pool_co2e_kg =
            passenger_pool_co2e_kg(aircraft.co2e_total_kg, assumptions);
        let per_passenger = per_passenger(passenger_pool_co2e_kg, gcd_km, assumptions);

        let cabin_used = Cabin::parse(cabin).unwrap_or(Cabin::Economy);
        let per_pax_kg = per_passenger.by_cabin_kg.get(cabin_used);

        Self {
            from: origin,
            to: destination,
            gcd_km,
            distance_correction_km,
            corrected_distance_km,
            haul,
            fuel_kg,
            aircraft,
            passenger_pool_co2e_kg,
            per_passenger,
            allocation: Allocation {
                pax_count: pax,
                cabin: cabin.to_string(),
                people_co2e_kg: per_pax_kg * pax as f64,
            },
        }
    }

    /// Emissions of all passengers of this leg, in kg of CO2e
    pub fn co2e_kg(&self) -> f64 {
        self.allocation.people_co2e_kg
    }
}

/// A successfully computed [`Leg`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegOutcome {
    pub leg: Leg,
    pub warnings: Vec<String>,
    pub assumptions_used: Assumptions,
}

/// A leg that could not be computed because at least one of its airports is unknown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegFailure {
    /// one `unknown IATA: XXX` per unknown airport
    pub warnings: Vec<String>,
}

impl std::error::Error for LegFailure {}

impl std::fmt::Display for LegFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.warnings.join(", "))
    }
}

fn unknown_cabin_warning(cabin: &str) -> String {
    let allowed = Cabin::ALL.map(|c| c.as_str()).join(", ");
    format!("unknown cabin: {cabin} (allowed: {allowed})")
}

/// Returns the [`Leg`] from `origin` to `destination` (IATA codes, case-insensitive)
/// for `pax` passengers in `cabin`.
///
/// * `pax` is clamped to at least 1
/// * an empty `cabin` means economy
/// * an unknown `cabin` is allocated as economy and yields a warning
/// # Error
/// Errors when `origin` or `destination` is not in `airports`
pub fn calculate_leg<L: AirportLookup + ?Sized>(
    origin: &str,
    destination: &str,
    cabin: &str,
    pax: i64,
    airports: &L,
    assumptions: &Assumptions,
) -> Result<LegOutcome, LegFailure> {
    let origin = origin.trim().to_ascii_uppercase();
    let destination = destination.trim().to_ascii_uppercase();
    let requested_cabin = match cabin.trim() {
        "" => Cabin::Economy.as_str().to_string(),
        cabin => cabin.to_ascii_lowercase(),
    };
    let pax = clamp_pax(pax);

    let from = airports.airport(&origin);
    let to = airports.airport(&destination);
    let (Some(from), Some(to)) = (from, to) else {
        let warnings = [(&origin, from), (&destination, to)]
            .into_iter()
            .filter(|(_, airport)| airport.is_none())
            .map(|(code, _)| {
                log::warn!("unknown IATA: {code}");
                format!("unknown IATA: {code}")
            })
            .collect();
        return Err(LegFailure { warnings });
    };

    let mut warnings = vec![];
    if Cabin::parse(&requested_cabin).is_none() {
        log::warn!("unknown cabin: {requested_cabin} - using economy");
        warnings.push(unknown_cabin_warning(&requested_cabin));
    }

    let leg = Leg::new(
        (origin, from),
        (destination, to),
        &requested_cabin,
        pax,
        assumptions,
    );
    log::debug!(
        "{} -> {}: {:.1} km ({:?}), {:.1} kg CO2e",
        leg.from,
        leg.to,
        leg.gcd_km,
        leg.haul,
        leg.co2e_kg()
    );

    Ok(LegOutcome {
        leg,
        warnings,
        assumptions_used: assumptions.clone(),
    })
}
