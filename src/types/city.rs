//! Cities and the per-city measurement columns of the weather dataset.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A city as it appears in the dataset's column prefixes (`BASEL`, `BUDAPEST`, ...).
///
/// The identifier is stored upper-case so `City::new("basel")` and
/// `City::new("BASEL")` refer to the same columns.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct City(String);

impl City {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_uppercase())
    }

    pub fn basel() -> Self {
        Self::new("BASEL")
    }

    pub fn budapest() -> Self {
        Self::new("BUDAPEST")
    }

    /// The column prefix, e.g. `BASEL`.
    pub fn id(&self) -> &str {
        &self.0
    }

    /// Title-cased name for labels, e.g. `Basel`.
    pub fn display_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        }
    }

    /// Full column name of `measurement` for this city.
    pub fn column(&self, measurement: Measurement) -> String {
        format!("{}_{}", self.0, measurement.column_suffix())
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A per-city measurement present in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Measurement {
    /// Daily precipitation (cm).
    Precipitation,
    /// Mean daily temperature (°C).
    TempMean,
    /// Sunshine duration (hours).
    Sunshine,
    /// Cloud cover (oktas).
    CloudCover,
    /// Relative humidity (fraction).
    Humidity,
}

impl Measurement {
    pub const ALL: [Measurement; 5] = [
        Measurement::Precipitation,
        Measurement::TempMean,
        Measurement::Sunshine,
        Measurement::CloudCover,
        Measurement::Humidity,
    ];

    pub fn column_suffix(&self) -> &'static str {
        match self {
            Measurement::Precipitation => "precipitation",
            Measurement::TempMean => "temp_mean",
            Measurement::Sunshine => "sunshine",
            Measurement::CloudCover => "cloud_cover",
            Measurement::Humidity => "humidity",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_suffix())
    }
}
