use serde::{Deserialize, Serialize};

use crate::{calculate_leg, clamp_pax, AirportLookup, Assumptions, Error, Leg};

/// Warning appended to an [`ItineraryResult`] without a single computed leg
pub const NO_LEG_WARNING: &str = "no leg could be calculated";

/// A flight between two airports, identified by their IATA codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub from: String,
    pub to: String,
}

impl Segment {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Whether both ends of the segment are set
    pub fn is_complete(&self) -> bool {
        !self.from.trim().is_empty() && !self.to.trim().is_empty()
    }

    /// The same segment flown in the opposite direction
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }
}

/// A request to compute the emissions of a journey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryRequest {
    /// the segments of the outbound journey, in order
    pub segments: Vec<Segment>,
    pub cabin: String,
    /// clamped to at least 1
    pub pax: i64,
    /// whether the outbound journey is flown back, leg by leg
    #[serde(default)]
    pub roundtrip: bool,
}

/// The emissions of an itinerary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryResult {
    pub ok: bool,
    pub co2_kg_total: f64,
    pub co2_t_total: f64,
    /// sum of the corrected distances of the legs, in km
    pub distance_km_used: f64,
    /// sum of the great-circle distances of the legs, in km
    pub great_circle_km: f64,
    pub per_pax_kg: f64,
    /// computed legs, in flight order
    pub legs: Vec<Leg>,
    pub assumptions_used: Assumptions,
    pub warnings: Vec<String>,
}

impl ItineraryResult {
    /// Whether at least one leg was computed. A result where every leg failed
    /// is still `ok` but its totals are meaningless.
    pub fn is_usable(&self) -> bool {
        self.ok && !self.legs.is_empty()
    }
}

/// Returns the legs flown by `segments`: the segments as given followed, when
/// `roundtrip`, by the same segments in reverse order and direction.
pub fn expand_legs(segments: &[Segment], roundtrip: bool) -> Vec<Segment> {
    let mut legs = segments.to_vec();
    if roundtrip {
        legs.extend(segments.iter().rev().map(Segment::reversed));
    }
    legs
}

/// Returns the [`ItineraryResult`] of `request`.
///
/// Every leg is computed independently by [`calculate_leg`]. Legs with an unknown
/// airport are left out of the totals and contribute their warnings instead.
/// # Error
/// Errors with [`Error::EmptyItinerary`] when no segment of `request` is complete
pub fn calculate_itinerary<L: AirportLookup + ?Sized>(
    request: &ItineraryRequest,
    airports: &L,
    assumptions: &Assumptions,
) -> Result<ItineraryResult, Error> {
    let mut warnings = vec![];

    let segments = request
        .segments
        .iter()
        .enumerate()
        .filter(|(i, segment)| {
            let complete = segment.is_complete();
            if !complete {
                log::warn!("segment #{} is incomplete - skipped", i + 1);
                warnings.push(format!("incomplete segment #{} skipped", i + 1));
            }
            complete
        })
        .map(|(_, segment)| segment.clone())
        .collect::<Vec<_>>();
    if segments.is_empty() {
        return Err(Error::EmptyItinerary);
    }

    let pax = clamp_pax(request.pax);

    let mut legs = vec![];
    for segment in expand_legs(&segments, request.roundtrip) {
        match calculate_leg(
            &segment.from,
            &segment.to,
            &request.cabin,
            pax as i64,
            airports,
            assumptions,
        ) {
            Ok(outcome) => {
                warnings.extend(outcome.warnings);
                legs.push(outcome.leg);
            }
            Err(failure) => warnings.extend(failure.warnings),
        }
    }
    if legs.is_empty() {
        log::warn!("{NO_LEG_WARNING}");
        warnings.push(NO_LEG_WARNING.to_string());
    }

    let co2_kg_total = legs.iter().map(Leg::co2e_kg).sum::<f64>();
    let great_circle_km = legs.iter().map(|leg| leg.gcd_km).sum::<f64>();
    let distance_km_used = legs.iter().map(|leg| leg.corrected_distance_km).sum::<f64>();

    Ok(ItineraryResult {
        ok: true,
        co2_kg_total,
        co2_t_total: co2_kg_total / 1000.0,
        distance_km_used,
        great_circle_km,
        per_pax_kg: co2_kg_total / pax.max(1) as f64,
        legs,
        assumptions_used: assumptions.clone(),
        warnings,
    })
}
