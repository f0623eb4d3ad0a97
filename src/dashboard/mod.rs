//! The render pipeline: one pass from a loaded table and the current widget
//! state to an ordered list of display elements.
//!
//! [`render`] is pure. Every widget change is answered by calling it again
//! with the new [`DashboardState`], so nothing is cached between passes.

pub mod charts;
pub mod element;
pub mod error;
pub mod filter;
pub mod html;
pub mod metric;
pub mod polar;

use crate::config::DashboardConfig;
use crate::dashboard::element::{Element, Figure, TableView};
use crate::dashboard::error::RenderError;
use crate::dashboard::filter::{ChartBindingFilter, HostSliderFilter, InteractiveFilter};
use crate::dashboard::metric::Metric;
use crate::dashboard::polar::{PolarPlot, PolarSeries, Rgba};
use crate::error::DashboardError;
use crate::frames::weather_frame::{DatedWeatherTable, WeatherTable};
use crate::types::city::{City, Measurement};
use crate::types::traits::types::MonthOfYear;
use crate::weather_data::data_loader::WeatherDataLoader;
use log::{debug, info};
use serde::Serialize;

/// Current values of every widget on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardState {
    pub month: MonthOfYear,
}

impl DashboardState {
    /// State for a requested slider month; `None` keeps the slider at its minimum.
    pub fn for_month(month: Option<u32>) -> Result<Self, DashboardError> {
        Ok(Self {
            month: month.map(MonthOfYear::new).transpose()?.unwrap_or_default(),
        })
    }
}

/// The rendered page, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub title: String,
    /// Month the host slider was rendered at.
    pub month: MonthOfYear,
    pub elements: Vec<Element>,
}

impl Dashboard {
    pub fn to_html(&self) -> Result<String, RenderError> {
        html::render_page(self)
    }

    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        self.elements
            .iter()
            .filter_map(|element| match element {
                Element::Metrics(metrics) => Some(metrics),
                _ => None,
            })
            .flatten()
    }
}

const TITLE: &str = "A simple Weather Dashboard";

fn markdown(text: impl Into<String>) -> Element {
    Element::Markdown(text.into())
}

fn summer_metric(
    table: &DatedWeatherTable,
    city: &City,
    config: &DashboardConfig,
) -> Result<Metric, DashboardError> {
    let comparison = table.seasonal_comparison(
        city,
        Measurement::TempMean,
        config.comparison_year,
        config.baseline_year,
    )?;
    debug!(
        "{} summer temperature {:.2} against {:.2}",
        city, comparison.current.value, comparison.baseline.value
    );
    Ok(Metric::from_comparison(
        format!("Summer Temperature in {} (C)", city.display_name()),
        &comparison,
    ))
}

fn polar_figure(table: &DatedWeatherTable, config: &DashboardConfig) -> Result<Figure, DashboardError> {
    let cities = [config.primary_city.clone(), config.secondary_city.clone()];
    let records = table.collect_records(&config.cities())?;
    let colors = [Rgba::DEEP_SKY_BLUE, Rgba::BLUE];
    let series: Vec<PolarSeries> = cities
        .iter()
        .zip(colors)
        .map(|(city, color)| {
            PolarSeries::yearly_temperature(&records, city, color.with_alpha(0.9), 0.5)
        })
        .collect();
    let svg = PolarPlot::builder().series(series).build().to_svg()?;
    Ok(Figure {
        alt: format!(
            "Daily mean temperature of {} and {} around the year",
            cities[0].display_name(),
            cities[1].display_name()
        ),
        svg,
    })
}

/// Renders the whole dashboard for `state`.
///
/// Any failure aborts the pass; there is no partial dashboard.
pub fn render(
    table: &WeatherTable,
    state: &DashboardState,
    config: &DashboardConfig,
) -> Result<Dashboard, DashboardError> {
    let primary = &config.primary_city;
    let secondary = &config.secondary_city;
    let mut elements = vec![
        markdown(format!("# {}", TITLE)),
        markdown("In this example we make a simple weather dashboard."),
        markdown(
            "The text is Markdown, with features like **emphasis**, `inline code` \
             and [links](https://commonmark.org), etc.",
        ),
        markdown("## Data"),
        markdown(
            "The data we will use is meteorology data for some cities in Europe. \
             Let's first tabulate the data.",
        ),
        markdown("### Dynamic display of a table"),
        markdown("You can sort and tweak sizes."),
        Element::DataFrame(TableView::from_frame(table.frame())?),
        markdown("### Static display of a table"),
        markdown(
            "Our dataset is too long for a static display, so we only display the first few rows:",
        ),
        Element::Table(TableView::from_frame(table.head(config.preview_rows).frame())?),
        markdown("## Visualization using native charts"),
    ];

    let dated = table.parse_dates()?;

    elements.push(markdown("Precipitation"));
    let precipitation = [
        primary.column(Measurement::Precipitation),
        secondary.column(Measurement::Precipitation),
    ];
    elements.push(Element::Chart(charts::native_bar_chart(&dated, &precipitation)?));

    elements.push(markdown("Temperature"));
    let temperature = [
        primary.column(Measurement::TempMean),
        secondary.column(Measurement::TempMean),
    ];
    elements.push(Element::Chart(charts::native_line_chart(&dated, &temperature)?));

    let help = format!(
        "Temperature average calculated between April and July of {}, compared to the same period in {}",
        config.comparison_year, config.baseline_year
    );
    elements.push(Element::Metrics(vec![
        summer_metric(&dated, primary, config)?,
        summer_metric(&dated, secondary, config)?.with_help(help),
    ]));

    elements.push(markdown("## Adding a static figure"));
    elements.push(markdown("We can add a static polar plot."));
    elements.push(Element::Figure(polar_figure(&dated, config)?));

    elements.push(markdown("## Dynamic visualizations"));
    elements.push(Element::Chart(charts::scatter_chart(&dated, primary)?));

    elements.push(markdown("## Using sliders/widgets"));
    elements.push(markdown("### Method 1: through the host slider"));
    elements.push(markdown(
        "Comparatively slow, but works seamlessly across elements",
    ));
    elements.extend(HostSliderFilter::new(config.cities()).elements(&dated, state)?);

    elements.push(markdown("### Method 2: through the chart"));
    elements.push(markdown(
        "Much faster but more complex to use between other elements",
    ));
    elements.extend(ChartBindingFilter::new(secondary.clone()).elements(&dated, state)?);

    info!(
        "Rendered dashboard at month {}: {} elements from {} rows",
        state.month,
        elements.len(),
        table.height()
    );
    Ok(Dashboard {
        title: TITLE.to_string(),
        month: state.month,
        elements,
    })
}

/// Loads the configured dataset and renders it for `state`.
pub fn run(config: &DashboardConfig, state: &DashboardState) -> Result<Dashboard, DashboardError> {
    let table = WeatherDataLoader::new(&config.data_path).load(&config.cities())?;
    render(&table, state, config)
}
