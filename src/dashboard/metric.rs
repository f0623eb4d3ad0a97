//! Metric widgets: a value, a delta, and how the delta is colored.

use crate::frames::weather_frame::SeasonalComparison;
use serde::Serialize;

/// How a metric's delta maps to a sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaColor {
    /// Increases are good.
    Normal,
    /// Decreases are good.
    Inverse,
    /// No sentiment; always neutral.
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaSentiment {
    Favorable,
    Unfavorable,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: f64,
    pub delta: f64,
    pub delta_color: DeltaColor,
    /// Tooltip text.
    pub help: Option<String>,
}

impl Metric {
    /// A metric showing the comparison year's average and its change since the
    /// baseline, both rounded to two decimals. Warmer is unfavorable.
    pub fn from_comparison(label: impl Into<String>, comparison: &SeasonalComparison) -> Self {
        Self {
            label: label.into(),
            value: comparison.rounded_value(),
            delta: comparison.rounded_delta(),
            delta_color: DeltaColor::Inverse,
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn sentiment(&self) -> DeltaSentiment {
        match self.delta_color {
            DeltaColor::Off => DeltaSentiment::Neutral,
            DeltaColor::Inverse if self.delta < 0.0 => DeltaSentiment::Favorable,
            DeltaColor::Inverse => DeltaSentiment::Unfavorable,
            DeltaColor::Normal if self.delta < 0.0 => DeltaSentiment::Unfavorable,
            DeltaColor::Normal => DeltaSentiment::Favorable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(delta: f64, delta_color: DeltaColor) -> Metric {
        Metric {
            label: "Summer Temperature in Basel (C)".to_string(),
            value: 17.0,
            delta,
            delta_color,
            help: None,
        }
    }

    #[test]
    fn inverse_colors_negative_delta_favorable() {
        assert_eq!(metric(-0.5, DeltaColor::Inverse).sentiment(), DeltaSentiment::Favorable);
        assert_eq!(metric(0.0, DeltaColor::Inverse).sentiment(), DeltaSentiment::Unfavorable);
        assert_eq!(metric(2.0, DeltaColor::Inverse).sentiment(), DeltaSentiment::Unfavorable);
    }

    #[test]
    fn normal_and_off_policies() {
        assert_eq!(metric(2.0, DeltaColor::Normal).sentiment(), DeltaSentiment::Favorable);
        assert_eq!(metric(-2.0, DeltaColor::Normal).sentiment(), DeltaSentiment::Unfavorable);
        assert_eq!(metric(-2.0, DeltaColor::Off).sentiment(), DeltaSentiment::Neutral);
    }

    #[test]
    fn help_is_attached() {
        let m = metric(1.0, DeltaColor::Inverse).with_help("window");
        assert_eq!(m.help.as_deref(), Some("window"));
    }
}
