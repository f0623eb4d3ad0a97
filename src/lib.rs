mod config;
mod dashboard;
mod error;
mod filtering;
mod frames;
mod server;
mod types;
mod utils;
mod weather_data;

pub use config::{DashboardConfig, DEFAULT_DATA_PATH};
pub use error::{DashboardError, ErrorClass};

pub use dashboard::charts;
pub use dashboard::element::{ChartKind, Element, Figure, Slider, TableView, VegaLiteChart};
pub use dashboard::error::RenderError;
pub use dashboard::filter::{ChartBindingFilter, HostSliderFilter, InteractiveFilter, MONTH_PARAM};
pub use dashboard::metric::{DeltaColor, DeltaSentiment, Metric};
pub use dashboard::polar::{PolarPlot, PolarSeries, Rgba, MONTH_NAMES};
pub use dashboard::{render, run, Dashboard, DashboardState};

pub use filtering::WeatherFrameFilterExt;
pub use frames::weather_frame::*;
pub use server::{build_router, serve, WidgetQuery};

pub use types::city::{City, Measurement};
pub use types::traits::period::date_period::{DatePeriod, SeasonalWindow};
pub use types::traits::types::{MonthOfYear, StartEndDate, Year};
pub use types::weather_record::{CityMeasurements, WeatherRecord};

pub use utils::{format_compact_date, parse_compact_date};
pub use weather_data::data_loader::WeatherDataLoader;
pub use weather_data::error::WeatherDataError;
