//! Two ways of filtering the dataset by month from a widget.
//!
//! [`HostSliderFilter`] keeps the widget on the host: the slider value comes
//! back with the next request and the subset is recomputed before the charts
//! are built. [`ChartBindingFilter`] hands the whole table to the chart and
//! lets the chart's own range input filter it in the browser.

use crate::dashboard::charts;
use crate::dashboard::element::{Element, Slider};
use crate::dashboard::DashboardState;
use crate::error::DashboardError;
use crate::frames::weather_frame::DatedWeatherTable;
use crate::types::city::{City, Measurement};
use crate::types::traits::types::MonthOfYear;
use log::debug;

/// A month filter that produces the widget and the charts it drives.
pub trait InteractiveFilter {
    fn elements(
        &self,
        table: &DatedWeatherTable,
        state: &DashboardState,
    ) -> Result<Vec<Element>, DashboardError>;
}

/// Query parameter the host slider submits.
pub const MONTH_PARAM: &str = "month";

/// Slider rendered by the host; precipitation histograms computed on the host
/// from the selected month's rows.
pub struct HostSliderFilter {
    cities: Vec<City>,
}

impl HostSliderFilter {
    pub fn new(cities: Vec<City>) -> Self {
        Self { cities }
    }
}

impl InteractiveFilter for HostSliderFilter {
    fn elements(
        &self,
        table: &DatedWeatherTable,
        state: &DashboardState,
    ) -> Result<Vec<Element>, DashboardError> {
        let slider = Slider {
            label: "Month of year".to_string(),
            name: MONTH_PARAM.to_string(),
            min: MonthOfYear::MIN,
            max: MonthOfYear::MAX,
            step: 1,
            value: state.month.get(),
        };

        let subset = table.month_subset(state.month)?;
        debug!(
            "Host slider at month {}: {} of {} rows",
            state.month,
            subset.table.height(),
            table.height()
        );
        let histograms = self
            .cities
            .iter()
            .map(|city| {
                charts::binned_histogram(&subset.table, &city.column(Measurement::Precipitation))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(vec![
            Element::Slider(slider),
            Element::Chart(charts::concat(histograms)),
        ])
    }
}

/// Range input bound inside the chart specification; the host never sees its value.
pub struct ChartBindingFilter {
    city: City,
}

impl ChartBindingFilter {
    pub fn new(city: City) -> Self {
        Self { city }
    }
}

impl InteractiveFilter for ChartBindingFilter {
    fn elements(
        &self,
        table: &DatedWeatherTable,
        _state: &DashboardState,
    ) -> Result<Vec<Element>, DashboardError> {
        let chart =
            charts::month_bound_histogram(table, &self.city.column(Measurement::Precipitation))?;
        Ok(vec![Element::Chart(chart)])
    }
}
