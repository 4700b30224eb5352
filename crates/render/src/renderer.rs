use randwalk_kernel::{Field, PlotPoint, SimulationConfig};

/// Fixed axis ranges for the mean-distance plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotView {
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
}

impl Default for PlotView {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

impl PlotView {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            x_range: config.x_range,
            y_range: config.y_range,
        }
    }

    /// Whether `point` falls inside the visible axes.
    pub fn contains(&self, point: PlotPoint) -> bool {
        (self.x_range[0]..=self.x_range[1]).contains(&point.x)
            && (self.y_range[0]..=self.y_range[1]).contains(&point.y)
    }
}

/// Renderer-agnostic interface. All field renderers implement this trait.
///
/// The renderer reads field state and a view, then produces output. It never
/// mutates the field.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    fn render(&self, field: &Field, view: &PlotView) -> Self::Output;
}

/// Human-readable dump of the field: one line per walker plus the mean.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, field: &Field, view: &PlotView) -> String {
        let mut out = String::new();
        let mean = field
            .mean_distance()
            .map(|m| format!("{m:.3}"))
            .unwrap_or_else(|_| "n/a".to_string());
        out.push_str(&format!(
            "=== Field State (walkers={}, mean={mean}) ===\n",
            field.len()
        ));
        out.push_str(&format!(
            "View: x=[{:.1}, {:.1}] y=[{:.1}, {:.1}]\n",
            view.x_range[0], view.x_range[1], view.y_range[0], view.y_range[1]
        ));

        for (name, entry) in field.entries() {
            let at = entry
                .walker
                .location()
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string());
            let distance = entry.distance();
            out.push_str(&format!(
                "  [{name}] at {at} steps={} distance={distance:.3}\n",
                entry.path.len() - 1
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use randwalk_common::{GridPos, Step};

    #[test]
    fn debug_renderer_empty_field() {
        let field = Field::with_seed(0);
        let output = DebugTextRenderer::new().render(&field, &PlotView::default());

        assert!(output.contains("walkers=0"));
        assert!(output.contains("mean=n/a"));
    }

    #[test]
    fn debug_renderer_with_walkers() {
        let mut field = Field::with_seed(0);
        field.add_walker("Dorothy", GridPos::ORIGIN).unwrap();
        field.add_walker("Toto", GridPos::ORIGIN).unwrap();
        field.apply_step("Toto", Step::East).unwrap();

        let output = DebugTextRenderer::new().render(&field, &PlotView::default());

        assert!(output.contains("walkers=2"));
        assert!(output.contains("mean=0.500"));
        assert!(output.contains("[Toto] at (1, 0) steps=1 distance=1.000"));
        assert!(output.contains("[Dorothy] at (0, 0) steps=0"));
    }

    #[test]
    fn plot_view_default_matches_config() {
        let view = PlotView::default();
        assert_eq!(view.x_range, [0.0, 100.0]);
        assert_eq!(view.y_range, [-0.5, 1.0]);
    }

    #[test]
    fn plot_view_contains() {
        let view = PlotView::default();
        assert!(view.contains(PlotPoint { x: 8.9, y: 0.0 }));
        assert!(!view.contains(PlotPoint { x: 120.0, y: 0.0 }));
        assert!(!view.contains(PlotPoint { x: 5.0, y: 2.0 }));
    }
}
