/// Errors that prevent an itinerary from being calculated at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No segment has both an origin and a destination
    EmptyItinerary,
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyItinerary => f.write_str("no valid segment"),
        }
    }
}
