//! Serializes a [`Dashboard`] into one self-contained HTML page.
//!
//! Markdown goes through pulldown-cmark, charts are embedded with vega-embed,
//! and the host slider is a plain GET form so that moving it reloads the page
//! with the new month.

use crate::dashboard::element::{Element, Figure, Slider, TableView, VegaLiteChart};
use crate::dashboard::error::RenderError;
use crate::dashboard::metric::{DeltaSentiment, Metric};
use crate::dashboard::Dashboard;
use pulldown_cmark::{html, Parser};
use serde_json::Value;
use std::error::Error;
use std::fmt::Write;

const VEGA_SCRIPTS: [&str; 3] = [
    "https://cdn.jsdelivr.net/npm/vega@5",
    "https://cdn.jsdelivr.net/npm/vega-lite@5",
    "https://cdn.jsdelivr.net/npm/vega-embed@6",
];

const STYLE: &str = r#"
body { font-family: "Source Sans Pro", sans-serif; margin: 0; color: #31333f; }
main { max-width: 46rem; margin: 0 auto; padding: 3rem 1rem 6rem; }
.dataframe { resize: both; overflow: auto; height: 24rem; border: 1px solid #e6e9ef; }
.dataframe th { cursor: pointer; position: sticky; top: 0; background: #f0f2f6; }
table { border-collapse: collapse; font-size: 0.85rem; }
th, td { padding: 0.2rem 0.5rem; border: 1px solid #e6e9ef; text-align: right; white-space: nowrap; }
.chart { margin: 1rem 0; }
.chart.container-width { width: 100%; }
.metrics { display: flex; gap: 1rem; }
.metric { flex: 1; }
.metric-label { font-size: 0.9rem; }
.metric-value { font-size: 2.2rem; }
.metric-delta { display: inline-block; padding: 0 0.4rem; border-radius: 1rem; }
.favorable { color: #09ab3b; background: #e6f6ea; }
.unfavorable { color: #ff2b2b; background: #ffe9e9; }
.neutral { color: #808495; background: #f0f2f6; }
.slider input { width: 100%; }
pre.error { color: #7d353b; background: #fde9e9; padding: 1rem; white-space: pre-wrap; }
"#;

const SORT_SCRIPT: &str = r#"
document.querySelectorAll('table.sortable').forEach(function (table) {
  table.querySelectorAll('th').forEach(function (th, idx) {
    th.addEventListener('click', function () {
      var body = table.tBodies[0];
      var asc = th.dataset.order !== 'asc';
      th.dataset.order = asc ? 'asc' : 'desc';
      var rows = Array.prototype.slice.call(body.rows);
      rows.sort(function (a, b) {
        var x = a.cells[idx].textContent, y = b.cells[idx].textContent;
        var nx = parseFloat(x), ny = parseFloat(y);
        var cmp = (isNaN(nx) || isNaN(ny)) ? x.localeCompare(y) : nx - ny;
        return asc ? cmp : -cmp;
      });
      rows.forEach(function (row) { body.appendChild(row); });
    });
  });
});
"#;

/// Escapes text for use in HTML and SVG content and attribute values.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn write_head(out: &mut String, title: &str) -> Result<(), RenderError> {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{}</title>", escape(title))?;
    for src in VEGA_SCRIPTS {
        writeln!(out, "<script src=\"{}\"></script>", src)?;
    }
    writeln!(out, "<style>{}</style>", STYLE)?;
    writeln!(out, "</head>")?;
    Ok(())
}

pub fn render_page(dashboard: &Dashboard) -> Result<String, RenderError> {
    let mut out = String::new();
    write_head(&mut out, &dashboard.title)?;
    writeln!(out, "<body>\n<main>")?;
    let mut charts = 0;
    for element in &dashboard.elements {
        match element {
            Element::Markdown(text) => {
                html::push_html(&mut out, Parser::new(text));
            }
            Element::DataFrame(view) => write_table(&mut out, view, true)?,
            Element::Table(view) => write_table(&mut out, view, false)?,
            Element::Chart(chart) => {
                write_chart(&mut out, chart, charts)?;
                charts += 1;
            }
            Element::Metrics(metrics) => write_metrics(&mut out, metrics)?,
            Element::Figure(figure) => write_figure(&mut out, figure)?,
            Element::Slider(slider) => write_slider(&mut out, slider)?,
        }
    }
    writeln!(out, "</main>")?;
    writeln!(out, "<script>{}</script>", SORT_SCRIPT)?;
    writeln!(out, "</body>\n</html>")?;
    Ok(out)
}

/// A full-page trace of `err` and its sources.
pub fn render_error_page(err: &(dyn Error + 'static)) -> String {
    let mut trace = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        trace.push_str("\n\nCaused by: ");
        trace.push_str(&cause.to_string());
        source = cause.source();
    }

    let mut out = String::new();
    // writing to a String cannot fail
    let _ = write_head(&mut out, "Error");
    let _ = writeln!(
        out,
        "<body>\n<main>\n<h1>Error</h1>\n<pre class=\"error\">{}</pre>\n</main>\n</body>\n</html>",
        escape(&trace)
    );
    out
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => escape(s),
        other => escape(&other.to_string()),
    }
}

fn write_table(out: &mut String, view: &TableView, dynamic: bool) -> Result<(), RenderError> {
    if dynamic {
        writeln!(out, "<div class=\"dataframe\">\n<table class=\"sortable\">")?;
    } else {
        writeln!(out, "<table class=\"static\">")?;
    }
    write!(out, "<thead><tr>")?;
    for column in &view.columns {
        write!(out, "<th>{}</th>", escape(column))?;
    }
    writeln!(out, "</tr></thead>\n<tbody>")?;
    for row in &view.rows {
        write!(out, "<tr>")?;
        for value in row {
            write!(out, "<td>{}</td>", cell(value))?;
        }
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "</tbody>\n</table>")?;
    if dynamic {
        writeln!(out, "</div>")?;
    }
    Ok(())
}

fn write_chart(out: &mut String, chart: &VegaLiteChart, index: usize) -> Result<(), RenderError> {
    let class = if chart.use_container_width {
        "chart container-width"
    } else {
        "chart"
    };
    // keep "</script>" inside string data from closing the tag
    let spec = serde_json::to_string(&chart.spec)?.replace("</", "<\\/");
    writeln!(out, "<div class=\"{}\" id=\"chart-{}\"></div>", class, index)?;
    writeln!(
        out,
        "<script>vegaEmbed('#chart-{}', {}, {{\"actions\": false}});</script>",
        index, spec
    )?;
    Ok(())
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn write_metrics(out: &mut String, metrics: &[Metric]) -> Result<(), RenderError> {
    writeln!(out, "<div class=\"metrics\">")?;
    for metric in metrics {
        let class = match metric.sentiment() {
            DeltaSentiment::Favorable => "favorable",
            DeltaSentiment::Unfavorable => "unfavorable",
            DeltaSentiment::Neutral => "neutral",
        };
        let arrow = if metric.delta < 0.0 { "&#8595;" } else { "&#8593;" };
        match &metric.help {
            Some(help) => writeln!(out, "<div class=\"metric\" title=\"{}\">", escape(help))?,
            None => writeln!(out, "<div class=\"metric\">")?,
        }
        writeln!(out, "<div class=\"metric-label\">{}</div>", escape(&metric.label))?;
        writeln!(out, "<div class=\"metric-value\">{}</div>", format_value(metric.value))?;
        writeln!(
            out,
            "<div class=\"metric-delta {}\">{} {}</div>",
            class,
            arrow,
            format_value(metric.delta.abs())
        )?;
        writeln!(out, "</div>")?;
    }
    writeln!(out, "</div>")?;
    Ok(())
}

fn write_figure(out: &mut String, figure: &Figure) -> Result<(), RenderError> {
    writeln!(
        out,
        "<figure aria-label=\"{}\">\n{}</figure>",
        escape(&figure.alt),
        figure.svg
    )?;
    Ok(())
}

fn write_slider(out: &mut String, slider: &Slider) -> Result<(), RenderError> {
    writeln!(out, "<form class=\"slider\" method=\"get\">")?;
    writeln!(
        out,
        "<label for=\"{name}\">{label} <output>{value}</output></label>",
        name = escape(&slider.name),
        label = escape(&slider.label),
        value = slider.value
    )?;
    writeln!(
        out,
        "<input type=\"range\" id=\"{name}\" name=\"{name}\" min=\"{}\" max=\"{}\" step=\"{}\" value=\"{}\" \
oninput=\"this.form.querySelector('output').value = this.value\" onchange=\"this.form.submit()\">",
        slider.min,
        slider.max,
        slider.step,
        slider.value,
        name = escape(&slider.name)
    )?;
    writeln!(out, "</form>")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::metric::DeltaColor;
    use crate::types::traits::types::MonthOfYear;
    use serde_json::json;

    fn dashboard(elements: Vec<Element>) -> Dashboard {
        Dashboard {
            title: "Weather".to_string(),
            month: MonthOfYear::default(),
            elements,
        }
    }

    #[test]
    fn markdown_is_converted() -> Result<(), Box<dyn std::error::Error>> {
        let page = render_page(&dashboard(vec![Element::Markdown("## Data".to_string())]))?;
        assert!(page.contains("<h2>Data</h2>"));
        Ok(())
    }

    #[test]
    fn charts_are_embedded_with_escaped_json() -> Result<(), Box<dyn std::error::Error>> {
        let chart = VegaLiteChart {
            kind: crate::dashboard::element::ChartKind::Scatter,
            spec: json!({"data": {"values": [{"x": "</script>"}]}}),
            use_container_width: true,
        };
        let page = render_page(&dashboard(vec![Element::Chart(chart)]))?;
        assert!(page.contains("<div class=\"chart container-width\" id=\"chart-0\"></div>"));
        assert!(page.contains("vegaEmbed('#chart-0'"));
        assert!(page.contains("<\\/script>"));
        Ok(())
    }

    #[test]
    fn metrics_carry_sentiment_and_help() -> Result<(), Box<dyn std::error::Error>> {
        let metric = Metric {
            label: "Summer Temperature in Budapest (C)".to_string(),
            value: 17.0,
            delta: 2.0,
            delta_color: DeltaColor::Inverse,
            help: Some("April to July".to_string()),
        };
        let page = render_page(&dashboard(vec![Element::Metrics(vec![metric])]))?;
        assert!(page.contains("title=\"April to July\""));
        assert!(page.contains("<div class=\"metric-value\">17.0</div>"));
        assert!(page.contains("metric-delta unfavorable\">&#8593; 2.0"));
        Ok(())
    }

    #[test]
    fn slider_submits_month_with_get_form() -> Result<(), Box<dyn std::error::Error>> {
        let slider = Slider {
            label: "Month of year".to_string(),
            name: "month".to_string(),
            min: 1,
            max: 12,
            step: 1,
            value: 5,
        };
        let page = render_page(&dashboard(vec![Element::Slider(slider)]))?;
        assert!(page.contains("<form class=\"slider\" method=\"get\">"));
        assert!(page.contains("name=\"month\" min=\"1\" max=\"12\" step=\"1\" value=\"5\""));
        Ok(())
    }

    #[test]
    fn tables_escape_cells() -> Result<(), Box<dyn std::error::Error>> {
        let view = TableView {
            columns: vec!["A<B".to_string()],
            rows: vec![vec![json!("x&y")], vec![json!(null)], vec![json!(1.5)]],
        };
        let page = render_page(&dashboard(vec![Element::DataFrame(view)]))?;
        assert!(page.contains("<table class=\"sortable\">"));
        assert!(page.contains("<th>A&lt;B</th>"));
        assert!(page.contains("<td>x&amp;y</td>"));
        assert!(page.contains("<td></td>"));
        assert!(page.contains("<td>1.5</td>"));
        Ok(())
    }

    #[test]
    fn error_page_shows_source_chain() {
        let err = crate::weather_data::error::WeatherDataError::Io(
            "../data/weather_data.csv".into(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        );
        let page = render_error_page(&err);
        assert!(page.contains("Failed to read weather data file &#39;../data/weather_data.csv&#39;"));
        assert!(page.contains("Caused by: No such file"));
    }
}
