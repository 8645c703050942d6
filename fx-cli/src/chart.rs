//! Text rendering of the trend chart.

use fx_types::{ChartSink, ChartSpec};

const BAR_WIDTH: usize = 40;

/// Chart sink that draws one horizontal bar per day.
#[derive(Debug, Default)]
pub struct TerminalChart {
    rendered: Option<String>,
}

impl TerminalChart {
    pub fn output(&self) -> Option<&str> {
        self.rendered.as_deref()
    }
}

impl ChartSink for TerminalChart {
    fn render(&mut self, spec: ChartSpec) {
        self.rendered = Some(draw(&spec));
    }

    fn destroy(&mut self) {
        self.rendered = None;
    }
}

/// Bars are scaled between the series minimum and maximum, since the axis
/// does not start at zero.
fn draw(spec: &ChartSpec) -> String {
    let mut out = format!("{}\n", spec.options.dataset_label);
    let (Some(min), Some(max)) = (spec.min(), spec.max()) else {
        out.push_str("(no data)\n");
        return out;
    };
    let span = max - min;

    for (label, value) in spec.labels.iter().zip(&spec.data) {
        let len = if span > 0.0 {
            1 + ((value - min) / span * (BAR_WIDTH - 1) as f64).round() as usize
        } else {
            BAR_WIDTH
        };
        out.push_str(&format!("{label}  {:<BAR_WIDTH$}  {value:.4}\n", "█".repeat(len)));
    }
    out
}
