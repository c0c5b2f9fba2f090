//! Predicted vs. average yield bar chart

use serde::Serialize;
use std::fmt::Write;

const WIDTH: f64 = 400.0;
const HEIGHT: f64 = 250.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 34.0;
const BAR_WIDTH_RATIO: f64 = 0.6;
const Y_TICKS: usize = 5;

/// One bar of the comparison chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
    pub color: String,
}

/// Two-bar comparison of the prediction against the crop baseline
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ComparisonChart {
    pub title: String,
    pub y_label: String,
    pub bars: Vec<ChartBar>,
}

impl ComparisonChart {
    pub fn new(crop: &str, predicted_yield: f64, baseline_yield: f64) -> Self {
        Self {
            title: format!("Predicted vs. Average Yield for {}", crop),
            y_label: "Yield (hg/ha)".to_string(),
            bars: vec![
                ChartBar {
                    label: "Predicted".to_string(),
                    value: predicted_yield,
                    color: "#43cea2".to_string(),
                },
                ChartBar {
                    label: "Average".to_string(),
                    value: baseline_yield,
                    color: "#185a9d".to_string(),
                },
            ],
        }
    }

    /// Upper bound of the y axis: the largest bar rounded up to a tick step
    fn y_max(&self) -> f64 {
        let max = self.bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
        if max <= 0.0 {
            return 1.0;
        }
        let step = nice_step(max / Y_TICKS as f64);
        (max / step).ceil() * step
    }

    /// Render as a standalone SVG document
    pub fn to_svg(&self) -> String {
        let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let baseline_y = MARGIN_TOP + plot_h;
        let y_max = self.y_max();

        let mut out = String::with_capacity(2048);
        let _ = write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
             viewBox=\"0 0 {WIDTH} {HEIGHT}\" font-family=\"sans-serif\">"
        );
        out.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>");
        let _ = write!(
            out,
            "<text x=\"{:.1}\" y=\"20\" font-size=\"13\" text-anchor=\"middle\">{}</text>",
            MARGIN_LEFT + plot_w / 2.0,
            escape(&self.title)
        );

        // Y axis with ticks
        let _ = write!(
            out,
            "<line x1=\"{MARGIN_LEFT}\" y1=\"{MARGIN_TOP}\" x2=\"{MARGIN_LEFT}\" y2=\"{baseline_y}\" stroke=\"#333333\"/>"
        );
        for i in 0..=Y_TICKS {
            let value = y_max * i as f64 / Y_TICKS as f64;
            let y = baseline_y - plot_h * i as f64 / Y_TICKS as f64;
            let _ = write!(
                out,
                "<line x1=\"{:.1}\" y1=\"{y:.1}\" x2=\"{MARGIN_LEFT}\" y2=\"{y:.1}\" stroke=\"#333333\"/>\
                 <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"9\" text-anchor=\"end\">{:.0}</text>",
                MARGIN_LEFT - 4.0,
                MARGIN_LEFT - 6.0,
                y + 3.0,
                value
            );
        }
        let _ = write!(
            out,
            "<text x=\"14\" y=\"{:.1}\" font-size=\"10\" text-anchor=\"middle\" \
             transform=\"rotate(-90 14 {:.1})\">{}</text>",
            MARGIN_TOP + plot_h / 2.0,
            MARGIN_TOP + plot_h / 2.0,
            escape(&self.y_label)
        );

        // Bars
        let slot = plot_w / self.bars.len().max(1) as f64;
        let bar_w = slot * BAR_WIDTH_RATIO;
        for (i, bar) in self.bars.iter().enumerate() {
            let h = (bar.value.max(0.0) / y_max * plot_h).min(plot_h);
            let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_w) / 2.0;
            let _ = write!(
                out,
                "<rect x=\"{x:.1}\" y=\"{:.1}\" width=\"{bar_w:.1}\" height=\"{h:.1}\" fill=\"{}\"/>\
                 <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" text-anchor=\"middle\">{}</text>",
                baseline_y - h,
                escape(&bar.color),
                x + bar_w / 2.0,
                baseline_y + 14.0,
                escape(&bar.label)
            );
        }
        let _ = write!(
            out,
            "<line x1=\"{MARGIN_LEFT}\" y1=\"{baseline_y}\" x2=\"{:.1}\" y2=\"{baseline_y}\" stroke=\"#333333\"/>",
            MARGIN_LEFT + plot_w
        );

        out.push_str("</svg>");
        out
    }
}

/// Round a raw tick step up to 1, 2 or 5 times a power of ten
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_labels_and_title() {
        let chart = ComparisonChart::new("Maize", 31000.0, 35000.0);
        assert_eq!(chart.title, "Predicted vs. Average Yield for Maize");
        assert_eq!(chart.bars[0].label, "Predicted");
        assert_eq!(chart.bars[1].label, "Average");
        assert_eq!(chart.bars[1].value, 35000.0);
    }

    #[test]
    fn test_y_axis_rounds_up() {
        let chart = ComparisonChart::new("Maize", 31000.0, 35000.0);
        assert_eq!(chart.y_max(), 40000.0);

        let empty = ComparisonChart::new("Maize", 0.0, 0.0);
        assert_eq!(empty.y_max(), 1.0);
    }

    #[test]
    fn test_svg_contains_bars() {
        let svg = ComparisonChart::new("Maize", 31000.0, 35000.0).to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Predicted vs. Average Yield for Maize"));
        assert!(svg.contains("fill=\"#43cea2\""));
        assert!(svg.contains("fill=\"#185a9d\""));
        assert!(svg.contains("Yield (hg/ha)"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
