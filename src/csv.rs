use std::{collections::HashMap, error::Error, hash::Hash};

use serde::Deserialize;

/// Loads a CSV from disk into a HashMap based on the primary key of the type
/// # Error
/// Errors if the file cannot be read or a record cannot be deserialized
pub(crate) fn load<H: Hash + Eq, D: for<'de> Deserialize<'de>, PK: Fn(D) -> Option<(H, D)>>(
    path: &str,
    map: PK,
) -> Result<HashMap<H, D>, Box<dyn Error>> {
    let data = std::fs::read(path)?;

    Ok(deserialize(&data)?.into_iter().filter_map(map).collect())
}

/// Deserializes all records of a CSV with headers.
/// # Error
/// Errors on the first record that cannot be deserialized
pub fn deserialize<D: serde::de::DeserializeOwned>(data: &[u8]) -> Result<Vec<D>, csv::Error> {
    let rdr = csv::ReaderBuilder::new()
        .delimiter(b',')
        .trim(csv::Trim::All)
        .from_reader(std::io::Cursor::new(data));
    rdr.into_deserialize().collect()
}
