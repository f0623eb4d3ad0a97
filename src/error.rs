use crate::dashboard::error::RenderError;
use crate::weather_data::error::WeatherDataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Month {0} is outside 1..=12")]
    InvalidMonth(u32),
}

/// Coarse classification of a [`DashboardError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The input file is missing or unreadable.
    Io,
    /// The CSV or one of its DATE fields is malformed.
    Parse,
    /// An aggregate is undefined, e.g. a mean over an empty date window.
    Computation,
    /// A widget value supplied by the caller is out of range.
    InvalidInput,
    /// Anything else: dataframe, serialization or task failures.
    Internal,
}

impl DashboardError {
    pub fn class(&self) -> ErrorClass {
        match self {
            DashboardError::WeatherData(e) => match e {
                WeatherDataError::Io(..) => ErrorClass::Io,
                WeatherDataError::CsvRead { .. }
                | WeatherDataError::MissingColumn { .. }
                | WeatherDataError::DateParse { .. } => ErrorClass::Parse,
                WeatherDataError::EmptyWindow { .. } => ErrorClass::Computation,
                WeatherDataError::DataFrameProcessing(_) | WeatherDataError::TaskJoin(_) => {
                    ErrorClass::Internal
                }
            },
            DashboardError::Render(_) => ErrorClass::Internal,
            DashboardError::InvalidMonth(_) => ErrorClass::InvalidInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::city::City;
    use crate::types::traits::types::Year;
    use std::path::PathBuf;

    #[test]
    fn classifies_taxonomy() {
        let io = DashboardError::from(WeatherDataError::Io(
            PathBuf::from("missing.csv"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "nope"),
        ));
        assert_eq!(io.class(), ErrorClass::Io);

        let parse = DashboardError::from(WeatherDataError::DateParse {
            row: 3,
            value: "2000-01-01".to_string(),
        });
        assert_eq!(parse.class(), ErrorClass::Parse);

        let empty = DashboardError::from(WeatherDataError::EmptyWindow {
            city: City::basel(),
            column: "BASEL_temp_mean".to_string(),
            year: Year(2000),
        });
        assert_eq!(empty.class(), ErrorClass::Computation);

        assert_eq!(DashboardError::InvalidMonth(13).class(), ErrorClass::InvalidInput);
    }

    #[test]
    fn transparent_messages_pass_through() {
        let err = DashboardError::from(WeatherDataError::DateParse {
            row: 0,
            value: "2000011".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Malformed DATE '2000011' at row 0, expected YYYYMMDD"
        );
    }
}
