//! In-memory chart sink.

use fx_types::{ChartSink, ChartSpec};

/// Keeps the most recently rendered chart so it can be served on request.
#[derive(Debug, Default)]
pub struct RetainedChart {
    current: Option<ChartSpec>,
    renders: u64,
}

impl RetainedChart {
    pub fn current(&self) -> Option<&ChartSpec> {
        self.current.as_ref()
    }

    /// Number of times a chart has been (re)created.
    pub fn renders(&self) -> u64 {
        self.renders
    }
}

impl ChartSink for RetainedChart {
    fn render(&mut self, spec: ChartSpec) {
        self.current = Some(spec);
        self.renders += 1;
    }

    fn destroy(&mut self) {
        self.current = None;
    }
}
