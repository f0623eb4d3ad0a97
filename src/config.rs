//! Configuration of a dashboard run.

use crate::types::city::City;
use crate::types::traits::types::Year;
use bon::Builder;
use std::path::PathBuf;

/// Default location of the dataset, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "../data/weather_data.csv";

/// Everything the pipeline needs besides the widget state.
///
/// All fields have defaults matching the demo dataset, so
/// `DashboardConfig::builder().build()` is a complete configuration.
///
/// # Examples
///
/// ```
/// use weather_dashboard::{City, DashboardConfig, Year};
///
/// let config = DashboardConfig::builder()
///     .data_path("data/weather_data.csv")
///     .secondary_city(City::new("DE_BILT"))
///     .build();
/// assert_eq!(config.comparison_year, Year(2009));
/// assert_eq!(config.secondary_city.id(), "DE_BILT");
/// ```
#[derive(Debug, Clone, Builder)]
pub struct DashboardConfig {
    #[builder(into, default = PathBuf::from(DEFAULT_DATA_PATH))]
    pub data_path: PathBuf,
    #[builder(default = City::basel())]
    pub primary_city: City,
    #[builder(default = City::budapest())]
    pub secondary_city: City,
    #[builder(default = Year(2000))]
    pub baseline_year: Year,
    #[builder(default = Year(2009))]
    pub comparison_year: Year,
    /// Rows shown by the static table preview.
    #[builder(default = 5)]
    pub preview_rows: usize,
}

impl DashboardConfig {
    pub fn cities(&self) -> Vec<City> {
        let mut cities = vec![self.primary_city.clone()];
        if self.secondary_city != self.primary_city {
            cities.push(self.secondary_city.clone());
        }
        cities
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
