//! Vega-Lite specifications for the dashboard's charts.
//!
//! Every chart carries its own inline data, so each specification renders on
//! its own without any shared dataset.

use crate::dashboard::element::{ChartKind, VegaLiteChart};
use crate::dashboard::error::RenderError;
use crate::filtering::{COL_DATE, COL_MONTH};
use crate::frames::convert::frame_records;
use crate::frames::weather_frame::DatedWeatherTable;
use crate::types::city::{City, Measurement};
use crate::types::traits::types::MonthOfYear;
use serde_json::{json, Value};

pub(crate) const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Inline data values holding only `columns` of `table`.
fn values(table: &DatedWeatherTable, columns: &[&str]) -> Result<Vec<Value>, RenderError> {
    let df = table.frame().select(columns.iter().copied())?;
    Ok(frame_records(&df)?)
}

fn native_chart(
    kind: ChartKind,
    mark: &str,
    table: &DatedWeatherTable,
    y: &[String],
) -> Result<VegaLiteChart, RenderError> {
    // the same column may be requested twice; a frame cannot select it twice
    let mut series: Vec<&str> = Vec::with_capacity(y.len());
    for column in y {
        if !series.contains(&column.as_str()) {
            series.push(column.as_str());
        }
    }
    let mut columns = vec![COL_DATE];
    columns.extend(&series);
    let spec = json!({
        "$schema": VEGA_LITE_SCHEMA,
        "data": { "values": values(table, &columns)? },
        "transform": [{ "fold": series, "as": ["series", "value"] }],
        "mark": { "type": mark, "tooltip": true },
        "encoding": {
            "x": { "field": COL_DATE, "type": "temporal" },
            "y": { "field": "value", "type": "quantitative", "title": null },
            "color": { "field": "series", "type": "nominal", "title": null }
        },
        "width": "container"
    });
    Ok(VegaLiteChart {
        kind,
        spec,
        use_container_width: true,
    })
}

/// Bar chart of several columns against `DATE`, all series on the same axes.
pub fn native_bar_chart(
    table: &DatedWeatherTable,
    y: &[String],
) -> Result<VegaLiteChart, RenderError> {
    native_chart(ChartKind::NativeBar, "bar", table, y)
}

/// Line chart of several columns against `DATE`.
pub fn native_line_chart(
    table: &DatedWeatherTable,
    y: &[String],
) -> Result<VegaLiteChart, RenderError> {
    native_chart(ChartKind::NativeLine, "line", table, y)
}

/// Sunshine against cloud cover, colored by mean temperature, with pan and zoom.
pub fn scatter_chart(table: &DatedWeatherTable, city: &City) -> Result<VegaLiteChart, RenderError> {
    let sunshine = city.column(Measurement::Sunshine);
    let cloud_cover = city.column(Measurement::CloudCover);
    let temp_mean = city.column(Measurement::TempMean);
    let humidity = city.column(Measurement::Humidity);
    let data = values(
        table,
        &[
            sunshine.as_str(),
            cloud_cover.as_str(),
            temp_mean.as_str(),
            humidity.as_str(),
            COL_DATE,
        ],
    )?;

    let spec = json!({
        "$schema": VEGA_LITE_SCHEMA,
        "data": { "values": data },
        "mark": "circle",
        "encoding": {
            "x": { "field": sunshine, "type": "quantitative" },
            "y": { "field": cloud_cover, "type": "quantitative" },
            "color": { "field": temp_mean, "type": "quantitative" },
            "tooltip": [
                { "field": humidity, "type": "quantitative" },
                { "field": COL_DATE, "type": "temporal" }
            ]
        },
        "params": [{
            "name": "pan_zoom",
            "select": { "type": "interval", "encodings": ["x", "y"] },
            "bind": "scales"
        }],
        "width": "container"
    });
    Ok(VegaLiteChart {
        kind: ChartKind::Scatter,
        spec,
        use_container_width: true,
    })
}

fn histogram_encoding(field: &str) -> Value {
    json!({
        "x": { "field": field, "bin": true, "type": "quantitative" },
        "y": { "aggregate": "count", "type": "quantitative" }
    })
}

/// Count-per-bin histogram of one column, without a `$schema` so it can be
/// nested in a concatenation.
pub fn binned_histogram(table: &DatedWeatherTable, field: &str) -> Result<Value, RenderError> {
    Ok(json!({
        "data": { "values": values(table, &[field])? },
        "mark": "bar",
        "encoding": histogram_encoding(field)
    }))
}

/// Places `charts` next to each other.
pub fn concat(charts: Vec<Value>) -> VegaLiteChart {
    VegaLiteChart {
        kind: ChartKind::Concat,
        spec: json!({
            "$schema": VEGA_LITE_SCHEMA,
            "concat": charts
        }),
        use_container_width: false,
    }
}

/// Histogram of `field` over the whole table, filtered inside the chart by a
/// month selection bound to a range input.
///
/// The selection starts empty, which shows every row until the reader moves
/// the input.
pub fn month_bound_histogram(
    table: &DatedWeatherTable,
    field: &str,
) -> Result<VegaLiteChart, RenderError> {
    let spec = json!({
        "$schema": VEGA_LITE_SCHEMA,
        "data": { "values": values(table, &[COL_MONTH, field])? },
        "params": [{
            "name": "month",
            "select": { "type": "point", "fields": [COL_MONTH] },
            "bind": {
                "input": "range",
                "min": MonthOfYear::MIN,
                "max": MonthOfYear::MAX,
                "step": 1,
                "name": "Month of year "
            }
        }],
        "transform": [{ "filter": { "param": "month" } }],
        "mark": "bar",
        "encoding": histogram_encoding(field)
    });
    Ok(VegaLiteChart {
        kind: ChartKind::Histogram,
        spec,
        use_container_width: false,
    })
}
