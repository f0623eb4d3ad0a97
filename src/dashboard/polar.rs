//! A polar line plot rendered to SVG, used to show the yearly temperature cycle.
//!
//! Angles are in radians, measured counter-clockwise from the positive x
//! axis. The radial axis spans the data range rounded out to a tick step, with
//! the lower bound at the center.

use crate::dashboard::error::RenderError;
use crate::dashboard::html::escape;
use crate::types::city::City;
use crate::types::weather_record::WeatherRecord;
use crate::utils::day_of_year_angle;
use bon::Builder;
use std::f64::consts::TAU;
use std::fmt::Write;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const BLUE: Rgba = Rgba::new(0.0, 0.0, 1.0, 1.0);
    pub const DEEP_SKY_BLUE: Rgba = Rgba::new(0.0, 0.749_019_607_843_137_3, 1.0, 1.0);
    /// Dark slate used for the figure and axes background.
    pub const THEME: Rgba = Rgba::new(0.15, 0.17, 0.22, 0.1);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn gray(level: f64) -> Self {
        Self::new(level, level, level, 1.0)
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    fn rgb(&self) -> String {
        format!(
            "rgb({},{},{})",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

fn channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// One line of the plot: `(angle, radius)` points joined in order.
/// A `None` radius breaks the line.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarSeries {
    pub label: String,
    pub color: Rgba,
    pub line_width: f64,
    pub points: Vec<(f64, Option<f64>)>,
}

impl PolarSeries {
    /// Mean temperature of `city` around the year, one point per record.
    pub fn yearly_temperature(
        records: &[WeatherRecord],
        city: &City,
        color: Rgba,
        line_width: f64,
    ) -> Self {
        let points = records
            .iter()
            .map(|record| {
                let radius = record.city(city).and_then(|m| m.temp_mean);
                (day_of_year_angle(record.date), radius)
            })
            .collect();
        Self {
            label: city.display_name(),
            color,
            line_width,
            points,
        }
    }

    fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for &(theta, radius) in &self.points {
            match radius.filter(|r| r.is_finite()) {
                Some(r) => current.push((theta, r)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

#[derive(Debug, Clone, Builder)]
pub struct PolarPlot {
    series: Vec<PolarSeries>,
    #[builder(default = 640.0)]
    width: f64,
    #[builder(default = 480.0)]
    height: f64,
    #[builder(default = Rgba::THEME)]
    background: Rgba,
    #[builder(default = Rgba::gray(0.5))]
    tick_color: Rgba,
    #[builder(default = Rgba::WHITE)]
    legend_label_color: Rgba,
    /// Labels placed at evenly spaced angles, starting at angle zero.
    #[builder(default = MONTH_NAMES.iter().map(|m| m.to_string()).collect())]
    angular_labels: Vec<String>,
    /// Upper right corner of the legend, as a fraction of the axes box.
    #[builder(default = (1.2, 1.1))]
    legend_anchor: (f64, f64),
}

struct Layout {
    cx: f64,
    cy: f64,
    radius: f64,
}

impl Layout {
    fn point(&self, theta: f64, fraction: f64) -> (f64, f64) {
        let r = fraction * self.radius;
        (self.cx + r * theta.cos(), self.cy - r * theta.sin())
    }
}

/// Radial bounds and tick step covering `min..=max`.
fn radial_ticks(min: f64, max: f64) -> (f64, f64, f64) {
    if !(min.is_finite() && max.is_finite()) {
        return (0.0, 1.0, 0.2);
    }
    if max <= min {
        let lo = min.floor() - 1.0;
        return (lo, lo + 2.0, 0.5);
    }
    let raw = (max - min) / 5.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = match raw / magnitude {
        n if n <= 1.0 => 1.0,
        n if n <= 2.0 => 2.0,
        n if n <= 5.0 => 5.0,
        _ => 10.0,
    } * magnitude;
    ((min / step).floor() * step, (max / step).ceil() * step, step)
}

impl PolarPlot {
    fn layout(&self) -> Layout {
        let axes_width = 0.775 * self.width;
        let axes_height = 0.77 * self.height;
        Layout {
            cx: 0.125 * self.width + axes_width / 2.0,
            cy: self.height - (0.11 * self.height + axes_height / 2.0),
            radius: axes_width.min(axes_height) / 2.0,
        }
    }

    fn radial_range(&self) -> (f64, f64, f64) {
        let values = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().filter_map(|&(_, r)| r))
            .filter(|r| r.is_finite());
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r), hi.max(r))
        });
        radial_ticks(min, max)
    }

    pub fn to_svg(&self) -> Result<String, RenderError> {
        let layout = self.layout();
        let (lo, hi, step) = self.radial_range();
        let fraction = |r: f64| (r - lo) / (hi - lo);
        let tick = self.tick_color.rgb();
        let background = self.background.rgb();

        let mut svg = String::new();
        writeln!(
            svg,
            "<svg xmlns='http://www.w3.org/2000/svg' width='{w:.0}' height='{h:.0}' viewBox='0 0 {w:.0} {h:.0}' role='img'>",
            w = self.width,
            h = self.height
        )?;
        writeln!(
            svg,
            "  <rect width='{:.0}' height='{:.0}' fill='{}' fill-opacity='{}'/>",
            self.width, self.height, background, self.background.a
        )?;
        writeln!(
            svg,
            "  <circle cx='{:.2}' cy='{:.2}' r='{:.2}' fill='{}' fill-opacity='{}'/>",
            layout.cx, layout.cy, layout.radius, background, self.background.a
        )?;

        // radial grid with labels along 22.5 degrees
        let label_angle = 22.5f64.to_radians();
        let mut k = 0;
        loop {
            let value = lo + f64::from(k) * step;
            if value > hi + step * 1e-9 {
                break;
            }
            k += 1;
            let f = fraction(value);
            if f > 0.0 {
                writeln!(
                    svg,
                    "  <circle cx='{:.2}' cy='{:.2}' r='{:.2}' fill='none' stroke='{}' stroke-opacity='0.35' stroke-width='0.8'/>",
                    layout.cx, layout.cy, f * layout.radius, tick
                )?;
            }
            let (x, y) = layout.point(label_angle, f);
            writeln!(
                svg,
                "  <text x='{:.2}' y='{:.2}' fill='{}' font-size='10' font-family='sans-serif'>{}</text>",
                x, y, tick, format_tick(value)
            )?;
        }

        let count = self.angular_labels.len();
        for (i, label) in self.angular_labels.iter().enumerate() {
            let theta = TAU * i as f64 / count as f64;
            let (x, y) = layout.point(theta, 1.0);
            writeln!(
                svg,
                "  <line x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' stroke='{}' stroke-opacity='0.35' stroke-width='0.8'/>",
                layout.cx, layout.cy, x, y, tick
            )?;
            let (lx, ly) = layout.point(theta, 1.0 + 16.0 / layout.radius);
            let anchor = match theta.cos() {
                c if c > 0.1 => "start",
                c if c < -0.1 => "end",
                _ => "middle",
            };
            writeln!(
                svg,
                "  <text x='{:.2}' y='{:.2}' fill='{}' font-size='11' font-family='sans-serif' text-anchor='{}' dominant-baseline='middle'>{}</text>",
                lx, ly, tick, anchor, escape(label)
            )?;
        }

        for series in &self.series {
            for segment in series.segments() {
                let points: Vec<String> = segment
                    .iter()
                    .map(|&(theta, r)| {
                        let (x, y) = layout.point(theta, fraction(r));
                        format!("{:.2},{:.2}", x, y)
                    })
                    .collect();
                writeln!(
                    svg,
                    "  <polyline points='{}' fill='none' stroke='{}' stroke-opacity='{}' stroke-width='{}'/>",
                    points.join(" "),
                    series.color.rgb(),
                    series.color.a,
                    series.line_width
                )?;
            }
        }

        writeln!(
            svg,
            "  <circle cx='{:.2}' cy='{:.2}' r='{:.2}' fill='none' stroke='{}' stroke-width='1'/>",
            layout.cx, layout.cy, layout.radius, tick
        )?;

        self.write_legend(&mut svg, &layout)?;
        svg.push_str("</svg>\n");
        Ok(svg)
    }

    fn write_legend(&self, svg: &mut String, layout: &Layout) -> Result<(), RenderError> {
        if self.series.is_empty() {
            return Ok(());
        }
        let longest = self
            .series
            .iter()
            .map(|s| s.label.chars().count())
            .max()
            .unwrap_or(0);
        let box_width = 44.0 + 7.0 * longest as f64;
        let box_height = 8.0 + 18.0 * self.series.len() as f64;

        let side = 2.0 * layout.radius;
        let anchor_x = layout.cx - layout.radius + self.legend_anchor.0 * side;
        let anchor_y = layout.cy + layout.radius - self.legend_anchor.1 * side;
        let x = (anchor_x - box_width).clamp(0.0, (self.width - box_width).max(0.0));
        let y = anchor_y.clamp(0.0, (self.height - box_height).max(0.0));

        writeln!(
            svg,
            "  <rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' rx='3' fill='{}' fill-opacity='{}' stroke='{}' stroke-opacity='0.5'/>",
            x, y, box_width, box_height, self.background.rgb(), self.background.a, self.tick_color.rgb()
        )?;
        for (i, series) in self.series.iter().enumerate() {
            let row = y + 13.0 + 18.0 * i as f64;
            writeln!(
                svg,
                "  <line x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' stroke='{}' stroke-opacity='{}' stroke-width='2'/>",
                x + 8.0, row, x + 30.0, row, series.color.rgb(), series.color.a
            )?;
            writeln!(
                svg,
                "  <text x='{:.2}' y='{:.2}' fill='{}' font-size='11' font-family='sans-serif' dominant-baseline='middle'>{}</text>",
                x + 36.0, row, self.legend_label_color.rgb(), escape(&series.label)
            )?;
        }
        Ok(())
    }
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(label: &str, points: Vec<(f64, Option<f64>)>) -> PolarSeries {
        PolarSeries {
            label: label.to_string(),
            color: Rgba::DEEP_SKY_BLUE.with_alpha(0.9),
            line_width: 0.5,
            points,
        }
    }

    #[test]
    fn radial_ticks_round_out_to_step() {
        assert_eq!(radial_ticks(-20.0, 30.0), (-20.0, 30.0, 10.0));
        assert_eq!(radial_ticks(-13.0, 27.0), (-20.0, 30.0, 10.0));
        assert_eq!(radial_ticks(2.0, 38.0), (0.0, 40.0, 10.0));
    }

    #[test]
    fn null_radius_breaks_the_line() {
        let s = series(
            "Basel",
            vec![(0.0, Some(1.0)), (0.1, Some(2.0)), (0.2, None), (0.3, Some(3.0))],
        );
        let segments = s.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 2);
        assert_eq!(segments[1], vec![(0.3, 3.0)]);
    }

    #[test]
    fn svg_carries_theme_labels_and_legend() -> Result<(), Box<dyn std::error::Error>> {
        let plot = PolarPlot::builder()
            .series(vec![
                series("Basel", vec![(0.0, Some(1.0)), (1.0, Some(5.0))]),
                PolarSeries {
                    label: "Budapest".to_string(),
                    color: Rgba::BLUE.with_alpha(0.9),
                    line_width: 0.5,
                    points: vec![(0.5, Some(-3.0)), (2.0, Some(8.0))],
                },
            ])
            .build();
        let svg = plot.to_svg()?;

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("fill='rgb(38,43,56)' fill-opacity='0.1'"));
        for month in MONTH_NAMES {
            assert!(svg.contains(&format!(">{}</text>", month)), "missing {}", month);
        }
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains("stroke='rgb(0,191,255)' stroke-opacity='0.9' stroke-width='0.5'"));
        assert!(svg.contains("stroke='rgb(0,0,255)'"));
        assert!(svg.contains("fill='rgb(255,255,255)' font-size='11' font-family='sans-serif' dominant-baseline='middle'>Budapest</text>"));
        Ok(())
    }
}
