use crate::filtering::{COL_DATE, COL_MONTH};
use crate::frames::weather_frame::WeatherTable;
use crate::types::city::{City, Measurement};
use crate::weather_data::error::WeatherDataError;
use log::{debug, info, warn};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tokio::task;

pub struct WeatherDataLoader {
    path: PathBuf,
}

impl WeatherDataLoader {
    pub fn new(path: &Path) -> WeatherDataLoader {
        WeatherDataLoader {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the CSV at the configured path into a [`WeatherTable`].
    ///
    /// The header row names the columns. `DATE` and `MONTH` are required, plus
    /// every measurement column of each city in `cities`. `MONTH` is
    /// normalized to Int64 and measurements to Float64; `DATE` is left as read.
    ///
    /// Column types are inferred from every row, and a cell that does not
    /// convert to its column's numeric type fails the load with
    /// [`WeatherDataError::CsvRead`].
    pub fn load(&self, cities: &[City]) -> Result<WeatherTable, WeatherDataError> {
        let metadata = std::fs::metadata(&self.path)
            .map_err(|e| WeatherDataError::Io(self.path.clone(), e))?;
        if !metadata.is_file() {
            return Err(WeatherDataError::Io(
                self.path.clone(),
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .try_into_reader_with_file_path(Some(self.path.clone()))
            .map_err(|e| self.csv_error(e))?
            .finish()
            .map_err(|e| self.csv_error(e))?;

        let required = Self::required_columns(cities);
        let present: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        if let Some(column) = required.iter().find(|c| !present.contains(c)) {
            warn!("Column {} missing from {:?}", column, self.path);
            return Err(WeatherDataError::MissingColumn {
                path: self.path.clone(),
                column: column.clone(),
            });
        }

        let mut casts = vec![col(COL_MONTH).strict_cast(DataType::Int64)];
        casts.extend(
            required
                .iter()
                .filter(|c| c.as_str() != COL_DATE && c.as_str() != COL_MONTH)
                .map(|c| col(c.as_str()).strict_cast(DataType::Float64)),
        );
        let df = df
            .lazy()
            .with_columns(casts)
            .collect()
            .map_err(|e| self.csv_error(e))?;

        info!(
            "Loaded {} rows and {} columns from {:?}",
            df.height(),
            df.width(),
            self.path
        );
        Ok(WeatherTable::new(df))
    }

    /// Runs [`Self::load`] on the blocking pool.
    pub async fn load_async(&self, cities: Vec<City>) -> Result<WeatherTable, WeatherDataError> {
        let loader = WeatherDataLoader::new(&self.path);
        task::spawn_blocking(move || loader.load(&cities)).await?
    }

    fn required_columns(cities: &[City]) -> Vec<String> {
        let mut columns = vec![COL_DATE.to_string(), COL_MONTH.to_string()];
        for city in cities {
            for measurement in Measurement::ALL {
                let column = city.column(measurement);
                if !columns.contains(&column) {
                    columns.push(column);
                }
            }
        }
        debug!("Required columns: {:?}", columns);
        columns
    }

    fn csv_error(&self, source: PolarsError) -> WeatherDataError {
        WeatherDataError::CsvRead {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{DashboardError, ErrorClass};
    use std::io::Write;
    use tempfile::NamedTempFile;

    pub(crate) const HEADER: &str = "DATE,MONTH,\
BASEL_cloud_cover,BASEL_humidity,BASEL_precipitation,BASEL_sunshine,BASEL_temp_mean,\
BUDAPEST_cloud_cover,BUDAPEST_humidity,BUDAPEST_precipitation,BUDAPEST_sunshine,BUDAPEST_temp_mean";

    pub(crate) fn write_csv(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "{}", HEADER).expect("write header");
        for row in rows {
            writeln!(file, "{}", row).expect("write row");
        }
        file.flush().expect("flush");
        file
    }

    pub(crate) fn cities() -> Vec<City> {
        vec![City::basel(), City::budapest()]
    }

    pub(crate) fn sample_rows() -> Vec<&'static str> {
        vec![
            "20000101,1,8,0.89,0.0,0.0,2.9,5,0.67,0.0,0.0,-1.4",
            "20000102,1,8,0.87,0.0,0.0,3.6,8,0.84,0.2,0.0,0.5",
            "20000501,5,4,0.70,0.1,9.2,15.0,2,0.60,0.0,11.1,17.5",
            "20000615,6,3,0.66,0.0,10.4,19.0,1,0.55,0.0,12.3,22.5",
            "20090501,5,5,0.71,0.4,7.7,17.0,3,0.58,0.3,9.8,19.0",
            "20090520,5,6,0.74,1.2,5.1,16.0,4,0.62,0.9,8.0,18.0",
            "20091231,12,7,0.91,0.3,0.5,1.1,7,0.88,0.1,0.4,-2.0",
        ]
    }

    #[test]
    fn load_counts_data_rows() -> Result<(), Box<dyn std::error::Error>> {
        let rows = sample_rows();
        let file = write_csv(&rows);
        let table = WeatherDataLoader::new(file.path()).load(&cities())?;
        assert_eq!(table.height(), rows.len());
        Ok(())
    }

    #[test]
    fn load_normalizes_column_types() -> Result<(), Box<dyn std::error::Error>> {
        let file = write_csv(&sample_rows());
        let table = WeatherDataLoader::new(file.path()).load(&cities())?;
        let df = table.frame();
        assert_eq!(df.column("MONTH")?.dtype(), &DataType::Int64);
        // cloud cover is written as integers but must still be Float64
        assert_eq!(df.column("BASEL_cloud_cover")?.dtype(), &DataType::Float64);
        assert_eq!(df.column("BUDAPEST_temp_mean")?.dtype(), &DataType::Float64);
        Ok(())
    }

    #[test]
    fn load_header_only_gives_empty_table() -> Result<(), Box<dyn std::error::Error>> {
        let file = write_csv(&[]);
        let table = WeatherDataLoader::new(file.path()).load(&cities())?;
        assert_eq!(table.height(), 0);
        Ok(())
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let loader = WeatherDataLoader::new(Path::new("/definitely/not/here/weather_data.csv"));
        assert!(matches!(
            loader.load(&cities()),
            Err(WeatherDataError::Io(..))
        ));
    }

    #[test]
    fn load_missing_city_column_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let file = write_csv(&sample_rows());
        let result = WeatherDataLoader::new(file.path()).load(&[City::new("OSLO")]);
        match result {
            Err(WeatherDataError::MissingColumn { column, .. }) => {
                assert_eq!(column, "OSLO_precipitation");
            }
            other => panic!("expected MissingColumn, got {:?}", other.map(|t| t.height())),
        }
        Ok(())
    }

    #[test]
    fn load_infers_types_from_all_rows() -> Result<(), Box<dyn std::error::Error>> {
        // a long dry spell written as integers, then a fractional value
        let start = chrono::NaiveDate::from_ymd_opt(2000, 1, 1).expect("start date");
        let rows: Vec<String> = start
            .iter_days()
            .take(250)
            .enumerate()
            .map(|(i, day)| {
                let precipitation = if i < 249 { "0" } else { "0.5" };
                format!(
                    "{},{},8,0.89,{},0.0,2.9,5,0.67,0,0.0,-1.4",
                    day.format("%Y%m%d"),
                    chrono::Datelike::month(&day),
                    precipitation
                )
            })
            .collect();
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let file = write_csv(&rows);

        let table = WeatherDataLoader::new(file.path()).load(&cities())?;
        assert_eq!(table.height(), 250);
        let precipitation = table.frame().column("BASEL_precipitation")?;
        assert_eq!(precipitation.dtype(), &DataType::Float64);
        assert_eq!(precipitation.f64()?.get(249), Some(0.5));
        Ok(())
    }

    #[test]
    fn load_rejects_non_numeric_measurement() {
        let file = write_csv(&[
            "20000501,5,4,0.70,0.1,9.2,15.0,2,0.60,0.0,11.1,20.0",
            "20000502,5,4,0.70,0.1,9.2,warm,2,0.60,0.0,11.1,20.0",
        ]);
        let result = WeatherDataLoader::new(file.path()).load(&cities());
        assert!(matches!(result, Err(WeatherDataError::CsvRead { .. })));
    }

    #[test]
    fn load_rejects_non_numeric_month() {
        let file = write_csv(&["20000501,May,4,0.70,0.1,9.2,15.0,2,0.60,0.0,11.1,20.0"]);
        let result = WeatherDataLoader::new(file.path()).load(&cities());
        assert!(matches!(result, Err(WeatherDataError::CsvRead { .. })));
    }

    #[test]
    fn load_ragged_row_is_csv_error() {
        let file = write_csv(&[
            "20000101,1,8,0.89,0.0,0.0,2.9,5,0.67,0.0,0.0,-1.4",
            "20000102,1,8,0.87,0.0,0.0,3.6,8,0.84,0.2,0.0,0.5,9,9,9",
        ]);
        let err = DashboardError::from(
            WeatherDataLoader::new(file.path())
                .load(&cities())
                .unwrap_err(),
        );
        assert!(matches!(
            err,
            DashboardError::WeatherData(WeatherDataError::CsvRead { .. })
        ));
        assert_eq!(err.class(), ErrorClass::Parse);
    }

    #[tokio::test]
    async fn load_async_matches_blocking_load() -> Result<(), Box<dyn std::error::Error>> {
        let file = write_csv(&sample_rows());
        let loader = WeatherDataLoader::new(file.path());
        let table = loader.load_async(cities()).await?;
        assert_eq!(table.height(), sample_rows().len());
        Ok(())
    }
}
