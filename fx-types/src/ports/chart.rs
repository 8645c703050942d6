//! Chart rendering port.

use crate::domain::ChartSpec;

/// A sink that draws a single line chart.
///
/// `render` fully replaces whatever dataset is currently shown; there is no
/// incremental merge.
pub trait ChartSink: Send {
    fn render(&mut self, spec: ChartSpec);

    /// Tears down the current chart, if any.
    fn destroy(&mut self);
}
