//! The display primitives a [`crate::Dashboard`] is made of.

use crate::dashboard::error::RenderError;
use crate::dashboard::metric::Metric;
use crate::frames::convert::{column_names, frame_rows};
use polars::prelude::DataFrame;
use serde::Serialize;
use serde_json::Value;

/// One render unit of the dashboard, in page order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Element {
    /// Markdown prose.
    Markdown(String),
    /// Full table the reader can sort and resize.
    DataFrame(TableView),
    /// Plain, non-interactive table.
    Table(TableView),
    /// A Vega-Lite chart.
    Chart(VegaLiteChart),
    /// Metric widgets laid out side by side, one column each.
    Metrics(Vec<Metric>),
    /// A static SVG figure.
    Figure(Figure),
    /// A host-side slider; changing it re-renders the whole dashboard.
    Slider(Slider),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl TableView {
    pub fn from_frame(df: &DataFrame) -> Result<Self, RenderError> {
        Ok(Self {
            columns: column_names(df),
            rows: frame_rows(df)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    NativeBar,
    NativeLine,
    Scatter,
    Histogram,
    Concat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VegaLiteChart {
    pub kind: ChartKind,
    /// A complete Vega-Lite v5 specification, inline data included.
    pub spec: Value,
    /// Stretch to the width of the page column.
    pub use_container_width: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub alt: String,
    pub svg: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slider {
    pub label: String,
    /// Query parameter the value is submitted under.
    pub name: String,
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub value: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use serde_json::json;

    #[test]
    fn table_view_keeps_column_order() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!("DATE" => [20000101i64, 20000102], "MONTH" => [1i64, 1])?;
        let view = TableView::from_frame(&df)?;
        assert_eq!(view.columns, vec!["DATE", "MONTH"]);
        assert_eq!(view.rows, vec![vec![json!(20000101), json!(1)], vec![json!(20000102), json!(1)]]);
        Ok(())
    }

    #[test]
    fn elements_serialize_with_kind_tag() -> Result<(), Box<dyn std::error::Error>> {
        let value = serde_json::to_value(Element::Markdown("# Title".to_string()))?;
        assert_eq!(value, json!({"kind": "markdown", "content": "# Title"}));
        Ok(())
    }
}
