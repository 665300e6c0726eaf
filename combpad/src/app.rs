//! combpad: one comb grid filling the window, key picked from the menu

use std::path::PathBuf;

use combcore::grid::local_centers;
use combcore::safety::catch_or;
use combcore::theme::PadColors;
use combcore::{
    CellGrid, CombError, DetectionLayer, PadConfig, PadTheme, PainterSurface, PitchClass,
    PointerState,
};
use egui::{Context, Key, Pos2, Rect, Vec2};

/// Space kept free around the grid, in cell radii.
const MARGIN: f32 = 0.5;

/// Bounding box of a grid with radius 1 around its origin. Every
/// dimension scales linearly with the radius.
fn unit_bounds() -> Rect {
    let centers = local_centers(1.0);
    let mut bounds = Rect::NOTHING;
    for c in centers {
        bounds.extend_with(c - Vec2::splat(1.0 + MARGIN));
        bounds.extend_with(c + Vec2::splat(1.0 + MARGIN));
    }
    bounds
}

/// Largest radius not above `preferred` whose grid fits in `area`.
fn fit_radius(area: Rect, preferred: f32) -> f32 {
    let unit = unit_bounds();
    let fit = (area.width() / unit.width()).min(area.height() / unit.height());
    preferred.min(fit).max(1.0)
}

/// Origin that puts the grid's bounding box in the middle of `area`.
fn centered_origin(area: Rect, radius: f32) -> Pos2 {
    area.center() - unit_bounds().center().to_vec2() * radius
}

pub struct CombPadApp {
    config: PadConfig,
    config_path: PathBuf,
    theme: PadTheme,
    /// Built on the first frame, once the panel size is known.
    grid: Option<CellGrid>,
    detection: Option<DetectionLayer>,
    last_error: Option<String>,
    show_about: bool,
}

impl CombPadApp {
    pub fn new(ctx: &Context, config: PadConfig, config_path: PathBuf) -> Self {
        let theme = PadTheme::default();
        theme.apply(ctx);
        Self {
            config: config.sanitized(),
            config_path,
            theme,
            grid: None,
            detection: None,
            last_error: None,
            show_about: false,
        }
    }

    fn set_key(&mut self, key: PitchClass) {
        if key == self.config.key {
            return;
        }
        tracing::info!(from = %self.config.key, to = %key, "key changed");
        self.config.key = key;
        // rebuilt with the new key on the next frame
        self.grid = None;
        if let Err(e) = self.config.save(&self.config_path) {
            tracing::warn!(error = %e, path = %self.config_path.display(), "could not save config");
        }
    }

    fn step_key(&mut self, semitones: usize) {
        self.set_key(self.config.key.transpose(semitones));
    }

    fn report(&mut self, e: &CombError) {
        let msg = e.to_string();
        if self.last_error.as_deref() != Some(msg.as_str()) {
            tracing::warn!(error = %msg, "grid frame failed");
        }
        self.last_error = Some(msg);
    }

    /// Rebuild the grid when the panel moved or resized.
    fn fit_grid(&mut self, area: Rect) -> Result<(), CombError> {
        let radius = fit_radius(area, self.config.cell_radius);
        let origin = centered_origin(area, radius);
        let stale = self
            .grid
            .as_ref()
            .map_or(true, |g| g.origin() != origin || g.cell_radius() != radius);
        if stale {
            self.grid = Some(CellGrid::new(origin, radius, self.config.key)?);
        }
        Ok(())
    }

    fn render_grid(
        &mut self,
        painter: &egui::Painter,
        area: Rect,
        screen: Rect,
        pointer: PointerState,
    ) -> Result<(), CombError> {
        self.fit_grid(area)?;

        let (width, height) = (screen.max.x.ceil() as u32, screen.max.y.ceil() as u32);
        match self.detection.as_mut() {
            Some(layer) => layer.begin_frame(width, height)?,
            None => self.detection = Some(DetectionLayer::new(width, height)?),
        }

        let (Some(grid), Some(layer)) = (self.grid.as_mut(), self.detection.as_mut()) else {
            return Ok(());
        };
        let mut surface = PainterSurface::new(painter, layer, pointer);
        grid.render_detection_layer(&mut surface)?;
        grid.render_visible_layer(&mut surface)
    }

    fn held_sequence(&self) -> Option<usize> {
        self.grid.as_ref().and_then(|g| g.highlighted()).map(|c| c.sequence())
    }

    fn status_text(&self) -> String {
        let held = self
            .grid
            .as_ref()
            .and_then(|g| g.highlighted())
            .map(|c| format!("{} (cell {})", c.label(), c.sequence()))
            .unwrap_or_else(|| "-".to_string());
        match &self.last_error {
            Some(e) => format!("key {}  |  {}  |  {}", self.config.key, held, e),
            None => format!("key {}  |  {}", self.config.key, held),
        }
    }

    fn render_about(&mut self, ctx: &Context) {
        let mut open = self.show_about;
        egui::Window::new("about combpad")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("combpad");
                ui.label("a hexagonal chord pad");
                ui.add_space(4.0);
                ui.label("press a cell to hold its chord");
                ui.label("left / right arrows change key");
            });
        self.show_about = open;
    }
}

impl eframe::App for CombPadApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let (next, prev) = ctx.input(|i| {
            (i.key_pressed(Key::ArrowRight), i.key_pressed(Key::ArrowLeft))
        });
        if next {
            self.step_key(1);
        }
        if prev {
            self.step_key(11);
        }

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            self.theme.bar_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.menu_button("file", |ui| {
                        if ui.button("quit").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                            ui.close_menu();
                        }
                    });
                    ui.menu_button("key", |ui| {
                        let mut picked = None;
                        for key in PitchClass::ALL {
                            let label = if key == self.config.key {
                                format!("* {}", key)
                            } else {
                                format!("  {}", key)
                            };
                            if ui.button(label).clicked() {
                                picked = Some(key);
                                ui.close_menu();
                            }
                        }
                        if let Some(key) = picked {
                            self.set_key(key);
                        }
                    });
                    ui.menu_button("help", |ui| {
                        if ui.button("about").clicked() {
                            self.show_about = true;
                            ui.close_menu();
                        }
                    });
                });
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let text = self.status_text();
            self.theme.bar_frame().show(ui, |ui| {
                ui.label(text);
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(PadColors::WHITE))
            .show(ctx, |ui| {
                let area = ui.available_rect_before_wrap();
                let response = ui.allocate_rect(area, egui::Sense::click());
                let painter = ui.painter_at(area);
                let screen = ctx.screen_rect();
                let pointer = PointerState::from_response(&response);
                let held_before = self.held_sequence();

                match catch_or(None, || Some(self.render_grid(&painter, area, screen, pointer))) {
                    Some(Ok(())) => self.last_error = None,
                    Some(Err(e)) => self.report(&e),
                    None => self.last_error = Some("frame panicked".to_string()),
                }
                // the status bar was laid out before the grid updated
                if self.held_sequence() != held_before {
                    ctx.request_repaint();
                }
            });

        if self.show_about {
            self.render_about(ctx);
        }
    }
}
