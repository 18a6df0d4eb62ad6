use serde::{Deserialize, Serialize};

/// Classification of a flight by its great-circle distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Haul {
    Short,
    Transition,
    Long,
}

/// The band `[t0, t1]` of great-circle distances (in km) over which the model
/// blends linearly between its short-haul and long-haul parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct TransitionBand {
    pub t0: f64,
    pub t1: f64,
}

impl From<[f64; 2]> for TransitionBand {
    fn from([t0, t1]: [f64; 2]) -> Self {
        Self { t0, t1 }
    }
}

impl From<TransitionBand> for [f64; 2] {
    fn from(band: TransitionBand) -> Self {
        [band.t0, band.t1]
    }
}

impl Default for TransitionBand {
    fn default() -> Self {
        Self {
            t0: 1500.0,
            t1: 2500.0,
        }
    }
}

impl TransitionBand {
    /// Returns the [`Haul`] of a flight with great-circle distance `gcd`.
    /// The boundaries belong to the short and long sides.
    pub fn classify(&self, gcd: f64) -> Haul {
        if gcd <= self.t0 {
            Haul::Short
        } else if gcd >= self.t1 {
            Haul::Long
        } else {
            Haul::Transition
        }
    }

    /// Returns `short` below the band, `long` above it, and the linear
    /// interpolation between the two inside it.
    pub fn blend(&self, gcd: f64, short: f64, long: f64) -> f64 {
        if gcd <= self.t0 {
            return short;
        }
        if gcd >= self.t1 {
            return long;
        }
        let t = (gcd - self.t0) / (self.t1 - self.t0);
        short + t * (long - short)
    }
}
