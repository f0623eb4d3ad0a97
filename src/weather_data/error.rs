use crate::types::city::City;
use crate::types::traits::types::Year;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherDataError {
    #[error("Failed to read weather data file '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse CSV weather data from '{path}'")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Malformed DATE '{value}' at row {row}, expected YYYYMMDD")]
    DateParse { row: usize, value: String },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("No {column} values for {city} between {year}-04-01 and {year}-07-01")]
    EmptyWindow {
        city: City,
        column: String,
        year: Year,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
