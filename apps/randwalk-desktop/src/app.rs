use egui::Context as EguiContext;
use egui_plot::{Plot, PlotBounds, PlotPoints, Points};
use randwalk_kernel::{KernelError, SimulationConfig, SimulationDriver};
use randwalk_render::{PlotView, SeriesSink};
use winit::keyboard::KeyCode;

/// Animation state: the driver, the recorded series and the frame clock.
pub struct AppState {
    config: SimulationConfig,
    driver: SimulationDriver,
    series: SeriesSink,
    view: PlotView,
    paused: bool,
    show_panel: bool,
    last_error: Option<KernelError>,
    // Fixed timestep
    tick_accumulator: f64,
    frame_interval: f64,
}

impl AppState {
    pub fn new(config: SimulationConfig) -> Result<Self, KernelError> {
        let driver = SimulationDriver::from_config(&config)?;
        Ok(Self {
            view: PlotView::from_config(&config),
            frame_interval: config.frame_interval_ms as f64 / 1000.0,
            config,
            driver,
            series: SeriesSink::new(),
            paused: false,
            show_panel: true,
            last_error: None,
            tick_accumulator: 0.0,
        })
    }

    pub fn finished(&self) -> bool {
        self.driver.frame() >= self.config.frames || self.last_error.is_some()
    }

    pub fn series(&self) -> &SeriesSink {
        &self.series
    }

    /// Run as many frames as `dt` seconds of wall time allow.
    pub fn update(&mut self, dt: f32) {
        if self.paused || self.finished() {
            return;
        }

        self.tick_accumulator += dt as f64;
        while self.tick_accumulator >= self.frame_interval && !self.finished() {
            self.tick_accumulator -= self.frame_interval;
            if let Err(e) = self.driver.advance(&mut self.series) {
                tracing::error!("frame failed: {e}");
                self.last_error = Some(e);
                return;
            }
            if self.finished() {
                tracing::info!(
                    frames = self.driver.frame(),
                    average = self.series.running_mean().unwrap_or(0.0),
                    "animation finished"
                );
            }
        }
    }

    pub fn restart(&mut self) {
        self.driver.restart();
        self.series.clear();
        self.tick_accumulator = 0.0;
        self.last_error = None;
        tracing::info!("animation restarted");
    }

    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if !pressed {
            return;
        }

        match key {
            KeyCode::Space => {
                self.paused = !self.paused;
                tracing::info!(paused = self.paused, "toggled pause");
            }
            KeyCode::KeyR => self.restart(),
            KeyCode::F1 => {
                self.show_panel = !self.show_panel;
            }
            _ => {}
        }
    }

    pub fn draw_ui(&mut self, ctx: &EguiContext) {
        if self.show_panel {
            self.draw_panel(ctx);
        }

        let view = self.view;
        let latest = self.series.latest().map(|r| r.point);
        egui::CentralPanel::default().show(ctx, |ui| {
            Plot::new("mean_distance")
                .allow_zoom(false)
                .allow_drag(false)
                .allow_scroll(false)
                .show(ui, |plot_ui| {
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                        [view.x_range[0], view.y_range[0]],
                        [view.x_range[1], view.y_range[1]],
                    ));
                    if let Some(p) = latest {
                        plot_ui.points(
                            Points::new(PlotPoints::new(vec![[p.x, p.y]]))
                                .radius(6.0)
                                .name("mean distance"),
                        );
                    }
                });
        });
    }

    fn draw_panel(&mut self, ctx: &EguiContext) {
        egui::SidePanel::left("inspector")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Random Walk");
                ui.separator();
                ui.label(format!(
                    "Frame: {} / {}",
                    self.driver.frame(),
                    self.config.frames
                ));
                ui.label(format!(
                    "Walkers: {}  Steps: {}",
                    self.driver.field().len(),
                    self.driver.steps()
                ));
                ui.label(format!("Origin: {}", self.driver.origin()));
                match self.series.latest() {
                    Some(r) => ui.label(format!("Mean distance: {:.3}", r.mean_distance)),
                    None => ui.label("Mean distance: -"),
                };
                if let Some(avg) = self.series.running_mean() {
                    ui.label(format!("Average over frames: {avg:.3}"));
                }
                if let Some(e) = &self.last_error {
                    ui.colored_label(egui::Color32::RED, e.to_string());
                }
                ui.separator();

                ui.horizontal(|ui| {
                    let label = if self.paused { "Resume (Space)" } else { "Pause (Space)" };
                    if ui.button(label).clicked() {
                        self.paused = !self.paused;
                    }
                    if ui.button("Restart (R)").clicked() {
                        self.restart();
                    }
                });

                ui.separator();
                ui.heading("Walkers");
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let field = self.driver.field();
                    for (name, entry) in field.entries() {
                        let distance = entry.distance();
                        let at = entry
                            .walker
                            .location()
                            .map(|p| p.to_string())
                            .unwrap_or_default();
                        ui.label(format!("{name} {at}  d={distance:.2}"));
                    }
                });

                ui.separator();
                ui.small("F1: Toggle Panel | Space: Pause | R: Restart");
            });
    }
}
