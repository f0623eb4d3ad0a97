use crate::types::city::City;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, PartialEq, Clone, Default, Serialize)]
pub struct CityMeasurements {
    pub precipitation: Option<f64>, // {CITY}_precipitation
    pub temp_mean: Option<f64>,     // {CITY}_temp_mean
    pub sunshine: Option<f64>,      // {CITY}_sunshine
    pub cloud_cover: Option<f64>,   // {CITY}_cloud_cover
    pub humidity: Option<f64>,      // {CITY}_humidity
}

/// One row of the dataset with its date already parsed.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct WeatherRecord {
    pub date: NaiveDate,
    pub month: u32,
    pub cities: BTreeMap<City, CityMeasurements>,
}

impl WeatherRecord {
    pub fn city(&self, city: &City) -> Option<&CityMeasurements> {
        self.cities.get(city)
    }
}
