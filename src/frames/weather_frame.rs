//! Contains the `WeatherTable` and `DatedWeatherTable` wrappers around the loaded dataset,
//! together with the aggregates the dashboard derives from them.

use crate::filtering::{WeatherFrameFilterExt, COL_DATE, COL_MONTH};
use crate::types::city::{City, Measurement};
use crate::types::traits::period::date_period::SeasonalWindow;
use crate::types::traits::types::{MonthOfYear, Year};
use crate::types::weather_record::{CityMeasurements, WeatherRecord};
use crate::utils::{date_from_epoch_days, parse_compact_date, round_to};
use crate::weather_data::error::WeatherDataError;
use chrono::NaiveDate;
use log::debug;
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// The dataset exactly as loaded: file order, `DATE` still in its raw `YYYYMMDD` form.
///
/// Instances are produced by [`crate::WeatherDataLoader::load`]. Call
/// [`WeatherTable::parse_dates`] to obtain a [`DatedWeatherTable`], which the
/// date-dependent operations require.
#[derive(Debug, Clone)]
pub struct WeatherTable {
    frame: DataFrame,
}

impl WeatherTable {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> WeatherTable {
        WeatherTable::new(self.frame.head(Some(n)))
    }

    /// Parses the `DATE` column from `YYYYMMDD` into a date column.
    ///
    /// Every value must be exactly eight digits forming a valid calendar date.
    /// Integer and string columns are both accepted.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherDataError::DateParse`] naming the first offending row,
    /// including rows where `DATE` is empty.
    pub fn parse_dates(&self) -> Result<DatedWeatherTable, WeatherDataError> {
        let raw = self.frame.column(COL_DATE)?.cast(&DataType::String)?;
        let mut dates = Vec::with_capacity(raw.len());
        for (row, value) in raw.str()?.into_iter().enumerate() {
            let value = value.unwrap_or_default();
            let date = parse_compact_date(value).ok_or_else(|| WeatherDataError::DateParse {
                row,
                value: value.to_string(),
            })?;
            dates.push(date);
        }

        let mut frame = self.frame.clone();
        frame.with_column(Series::new(COL_DATE.into(), &dates))?;
        debug!("Parsed {} DATE values", dates.len());
        Ok(DatedWeatherTable { frame })
    }
}

/// The dataset with `DATE` parsed to `DataType::Date`. Row order is unchanged.
#[derive(Debug, Clone)]
pub struct DatedWeatherTable {
    frame: DataFrame,
}

impl DatedWeatherTable {
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn lazy(&self) -> LazyFrame {
        self.frame.clone().lazy()
    }

    /// Mean of `city`'s `measurement` over the seasonal window of `year`.
    ///
    /// Null cells are skipped, so the mean is over the non-null values only.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherDataError::EmptyWindow`] when the window holds no
    /// non-null value; the mean would be undefined.
    pub fn seasonal_average(
        &self,
        city: &City,
        measurement: Measurement,
        year: Year,
    ) -> Result<SeasonalAverage, WeatherDataError> {
        let column = city.column(measurement);
        let df = self
            .lazy()
            .filter_seasonal(SeasonalWindow::new(year))
            .select([
                col(column.as_str()).mean().alias("mean"),
                col(column.as_str())
                    .count()
                    .cast(DataType::UInt64)
                    .alias("samples"),
            ])
            .collect()?;

        let mean = df.column("mean")?.f64()?.get(0);
        let samples = df.column("samples")?.u64()?.get(0).unwrap_or(0);
        match mean {
            Some(value) if samples > 0 => {
                debug!(
                    "{} seasonal mean for {}: {:.3} over {} samples",
                    column, year, value, samples
                );
                Ok(SeasonalAverage {
                    city: city.clone(),
                    year,
                    value,
                    samples: samples as usize,
                })
            }
            _ => Err(WeatherDataError::EmptyWindow {
                city: city.clone(),
                column,
                year,
            }),
        }
    }

    /// Seasonal averages of `current` and `baseline` years side by side.
    pub fn seasonal_comparison(
        &self,
        city: &City,
        measurement: Measurement,
        current: Year,
        baseline: Year,
    ) -> Result<SeasonalComparison, WeatherDataError> {
        Ok(SeasonalComparison {
            current: self.seasonal_average(city, measurement, current)?,
            baseline: self.seasonal_average(city, measurement, baseline)?,
        })
    }

    /// Rows whose `MONTH` equals `month`, in their original order.
    pub fn month_subset(&self, month: MonthOfYear) -> Result<MonthSubset, WeatherDataError> {
        let frame = self.lazy().filter_month(month).collect()?;
        debug!("Month {} subset holds {} rows", month, frame.height());
        Ok(MonthSubset {
            month,
            table: DatedWeatherTable { frame },
        })
    }

    /// The parsed dates in row order.
    pub fn dates(&self) -> Result<Vec<NaiveDate>, WeatherDataError> {
        let days = self.frame.column(COL_DATE)?.cast(&DataType::Int32)?;
        Ok(days
            .i32()?
            .into_iter()
            .flatten()
            .filter_map(date_from_epoch_days)
            .collect())
    }

    /// Collects the rows into [`WeatherRecord`]s carrying the measurements of `cities`.
    pub fn collect_records(&self, cities: &[City]) -> Result<Vec<WeatherRecord>, WeatherDataError> {
        let dates = self.dates()?;
        let months = self.frame.column(COL_MONTH)?.cast(&DataType::Int64)?;
        let months: Vec<Option<i64>> = months.i64()?.into_iter().collect();

        let mut per_city = Vec::with_capacity(cities.len());
        for city in cities {
            let mut columns = Vec::with_capacity(Measurement::ALL.len());
            for measurement in Measurement::ALL {
                columns.push(self.float_column(&city.column(measurement))?);
            }
            per_city.push(columns);
        }

        let records = dates
            .into_iter()
            .zip(months)
            .enumerate()
            .map(|(idx, (date, month))| {
                let cities = cities
                    .iter()
                    .zip(&per_city)
                    .map(|(city, columns)| {
                        let at = |m: usize| columns[m][idx];
                        (
                            city.clone(),
                            CityMeasurements {
                                precipitation: at(0),
                                temp_mean: at(1),
                                sunshine: at(2),
                                cloud_cover: at(3),
                                humidity: at(4),
                            },
                        )
                    })
                    .collect::<BTreeMap<_, _>>();
                WeatherRecord {
                    date,
                    month: month.and_then(|m| u32::try_from(m).ok()).unwrap_or_default(),
                    cities,
                }
            })
            .collect();
        Ok(records)
    }

    fn float_column(&self, name: &str) -> Result<Vec<Option<f64>>, WeatherDataError> {
        let column = self.frame.column(name)?.cast(&DataType::Float64)?;
        Ok(column.f64()?.into_iter().collect())
    }
}

/// Mean of one city's measurement over a [`SeasonalWindow`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalAverage {
    pub city: City,
    pub year: Year,
    pub value: f64,
    /// Number of non-null values the mean was taken over.
    pub samples: usize,
}

/// A comparison-year average against a baseline-year average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalComparison {
    pub current: SeasonalAverage,
    pub baseline: SeasonalAverage,
}

impl SeasonalComparison {
    /// `current - baseline`, unrounded.
    pub fn delta(&self) -> f64 {
        self.current.value - self.baseline.value
    }

    pub fn rounded_value(&self) -> f64 {
        round_to(self.current.value, 2)
    }

    pub fn rounded_delta(&self) -> f64 {
        round_to(self.delta(), 2)
    }
}

/// Rows of one month, recomputed for every render pass.
#[derive(Debug, Clone)]
pub struct MonthSubset {
    pub month: MonthOfYear,
    pub table: DatedWeatherTable,
}
