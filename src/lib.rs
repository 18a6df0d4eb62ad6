#![forbid(unsafe_code)]
mod airports;
mod allocation;
mod assumptions;
pub mod csv;
mod emissions;
mod error;
mod itinerary;
mod legs;
mod model;
mod regime;

pub use airports::*;
pub use allocation::*;
pub use assumptions::*;
pub use emissions::*;
pub use error::Error;
pub use itinerary::*;
pub use legs::*;
pub use model::*;
pub use regime::*;

/// Mean radius of the earth in km, as used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// `degrees * PI / 180`, rounded in that order. [`f64::to_radians`] multiplies by a
/// pre-rounded `PI / 180` and can differ in the last bit.
fn radians(degrees: f64) -> f64 {
    (degrees * std::f64::consts::PI) / 180.0
}

/// Returns the great-circle distance in km between two geo-points given in degrees,
/// computed with the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
pub fn great_circle_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = radians(lat1);
    let phi2 = radians(lat2);
    let delta_phi = radians(lat2 - lat1);
    let delta_lambda = radians(lon2 - lon1);

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Returns the distance between two geo-points `(latitude, longitude)` in km
fn distance(from: (f64, f64), to: (f64, f64)) -> f64 {
    great_circle_distance_km(from.0, from.1, to.0, to.1)
}
