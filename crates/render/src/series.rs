use randwalk_kernel::{FrameReport, MeanSink, PlotPoint};

/// Records every frame report for plotting and summary statistics.
#[derive(Debug, Clone, Default)]
pub struct SeriesSink {
    reports: Vec<FrameReport>,
}

impl SeriesSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn reports(&self) -> &[FrameReport] {
        &self.reports
    }

    /// The most recent frame, which is the point currently on the plot.
    pub fn latest(&self) -> Option<&FrameReport> {
        self.reports.last()
    }

    pub fn points(&self) -> Vec<PlotPoint> {
        self.reports.iter().map(|r| r.point).collect()
    }

    /// Mean of all reported means, or `None` before the first frame.
    pub fn running_mean(&self) -> Option<f64> {
        if self.reports.is_empty() {
            return None;
        }
        let total: f64 = self.reports.iter().map(|r| r.mean_distance).sum();
        Some(total / self.reports.len() as f64)
    }

    pub fn clear(&mut self) {
        self.reports.clear();
    }
}

impl MeanSink for SeriesSink {
    fn report(&mut self, report: &FrameReport) {
        tracing::trace!(frame = report.frame, mean = report.mean_distance, "series point");
        self.reports.push(*report);
    }
}
