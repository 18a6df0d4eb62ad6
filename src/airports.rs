use std::{collections::HashMap, error::Error};

use serde::{Deserialize, Serialize};

/// Maximum number of airports returned by [`search`] in the original tool
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// An airport, identified by its [IATA code](https://en.wikipedia.org/wiki/IATA_airport_code)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    /// the IATA code (e.g. `SOF`)
    pub iata: String,
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lon")]
    pub longitude: f64,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub name: String,
}

impl Airport {
    pub fn pos(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// A map of uppercase IATA code (e.g. `SOF`) to its [`Airport`].
pub type Airports = HashMap<String, Airport>;

/// Read-only access to airports by IATA code.
pub trait AirportLookup {
    /// Returns the [`Airport`] of the uppercase IATA code `iata`, if known
    fn airport(&self, iata: &str) -> Option<&Airport>;
}

impl AirportLookup for Airports {
    fn airport(&self, iata: &str) -> Option<&Airport> {
        self.get(iata)
    }
}

/// Returns [`Airports`] keyed by the uppercase IATA code of each airport.
/// Airports without IATA code are skipped.
pub fn airports_from(airports: impl IntoIterator<Item = Airport>) -> Airports {
    airports.into_iter().filter_map(keyed).collect()
}

fn keyed(airport: Airport) -> Option<(String, Airport)> {
    let code = airport.iata.trim().to_ascii_uppercase();
    (!code.is_empty()).then_some((code, airport))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AirportsJson {
    List(Vec<Airport>),
    Map(HashMap<String, Airport>),
}

/// Deserializes [`Airports`] from JSON, either a list of airports or a map keyed by code.
/// # Error
/// Errors if `data` is neither
pub fn airports_from_json(data: &[u8]) -> Result<Airports, serde_json::Error> {
    let airports = match serde_json::from_slice(data)? {
        AirportsJson::List(airports) => airports,
        AirportsJson::Map(airports) => airports.into_values().collect(),
    };
    Ok(airports_from(airports))
}

/// Loads [`Airports`] from `path`, a CSV (`iata,latitude,longitude,city,country,name`)
/// when the extension is `.csv` and JSON otherwise.
/// # Error
/// Errors if the file cannot be read or is malformed
pub fn load_airports(path: &str) -> Result<Airports, Box<dyn Error>> {
    let airports = if path.to_ascii_lowercase().ends_with(".csv") {
        super::csv::load(path, keyed)?
    } else {
        airports_from_json(&std::fs::read(path)?)?
    };
    log::info!("Loaded {} airports from {path}", airports.len());
    Ok(airports)
}

/// Returns up to `limit` airports whose IATA code starts with `query` or whose
/// city or name contains it, case-insensitive, ordered by IATA code.
/// Queries shorter than 2 characters match nothing.
pub fn search<'a>(query: &str, airports: &'a Airports, limit: usize) -> Vec<&'a Airport> {
    let query = query.trim().to_ascii_uppercase();
    if query.chars().count() < 2 {
        return vec![];
    }

    let mut codes = airports
        .iter()
        .filter(|(code, airport)| {
            code.starts_with(&query)
                || airport.city.to_uppercase().contains(&query)
                || airport.name.to_uppercase().contains(&query)
        })
        .map(|(code, _)| code)
        .collect::<Vec<_>>();
    codes.sort();

    codes
        .into_iter()
        .take(limit)
        .map(|code| &airports[code])
        .collect()
}
