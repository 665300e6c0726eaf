//! Hexagonal chord cell
//!
//! A cell paints itself twice per frame: once into the detection layer with
//! its unique color, then onto the visible layer after checking whether the
//! pressed pointer sits on that color.

use std::f32::consts::TAU;

use egui::{Color32, Pos2, Stroke};

use crate::color::DetectionColor;
use crate::error::SurfaceError;
use crate::pitch::Chord;
use crate::surface::{PointerState, RenderSurface};
use crate::theme::PadColors;

pub const SIDES: usize = 6;

/// Label font size relative to the cell radius.
const TEXT_SCALE: f32 = 1.0 / 2.5;

/// Regular hexagon, first vertex on the positive x axis.
pub fn hexagon(center: Pos2, radius: f32) -> [Pos2; SIDES] {
    let step = TAU / SIDES as f32;
    std::array::from_fn(|k| {
        let a = k as f32 * step;
        Pos2::new(center.x + a.cos() * radius, center.y + a.sin() * radius)
    })
}

/// Visible state of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Normal,
    Highlighted,
}

impl Highlight {
    pub fn fill(self) -> Color32 {
        match self {
            Highlight::Normal => PadColors::WHITE,
            Highlight::Highlighted => PadColors::BLACK,
        }
    }

    pub fn text_color(self) -> Color32 {
        match self {
            Highlight::Normal => PadColors::BLACK,
            Highlight::Highlighted => PadColors::WHITE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cell {
    center: Pos2,
    radius: f32,
    detection: DetectionColor,
    highlight: Highlight,
    chord: Chord,
    label: String,
    /// Position in the owning grid's draw order.
    sequence: usize,
}

impl Cell {
    pub fn new(
        sequence: usize,
        center: Pos2,
        radius: f32,
        detection: DetectionColor,
        chord: Chord,
    ) -> Self {
        Self {
            center,
            radius,
            detection,
            highlight: Highlight::Normal,
            chord,
            label: chord.label(),
            sequence,
        }
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn detection_color(&self) -> DetectionColor {
        self.detection
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight == Highlight::Highlighted
    }

    pub fn chord(&self) -> Chord {
        self.chord
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn sequence(&self) -> usize {
        self.sequence
    }

    pub fn vertices(&self) -> [Pos2; SIDES] {
        hexagon(self.center, self.radius)
    }

    /// True when the pointer is down and the detection layer under it
    /// carries this cell's color. All channels are compared.
    pub fn hit_test(&self, pointer: PointerState, sampled: Option<DetectionColor>) -> bool {
        pointer.pressed && sampled == Some(self.detection)
    }

    /// Re-read the pointer from `surface` and update the visible state.
    pub fn update_pointer<S: RenderSurface + ?Sized>(&mut self, surface: &S) -> Highlight {
        let pointer = surface.pointer();
        let sampled = pointer.pos.and_then(|p| surface.sample_detection(p));
        let next = if self.hit_test(pointer, sampled) {
            Highlight::Highlighted
        } else {
            Highlight::Normal
        };
        if next == Highlight::Highlighted && self.highlight == Highlight::Normal {
            tracing::debug!(cell = self.sequence, chord = %self.label, "cell pressed");
        }
        self.highlight = next;
        next
    }

    /// Borderless fill in the detection color. Must run for every cell on
    /// the surface before any [`render_visible_layer`](Self::render_visible_layer).
    pub fn render_detection_layer<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
    ) -> Result<(), SurfaceError> {
        surface.fill_detection_polygon(&self.vertices(), self.detection)
    }

    pub fn render_visible_layer<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<(), SurfaceError> {
        let highlight = self.update_pointer(&*surface);
        surface.draw_polygon(
            &self.vertices(),
            highlight.fill(),
            Stroke::new(1.0, PadColors::GRAY),
        )?;
        surface.draw_text(
            self.center,
            &self.label,
            self.radius * TEXT_SCALE,
            highlight.text_color(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::DetectionLayer;
    use crate::painter::PainterSurface;
    use crate::pitch::{PitchClass, Quality};
    use egui::{LayerId, Painter, Rect};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::field::{Field, Visit};
    use tracing::Subscriber;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Counts "cell pressed" events.
    struct PressCount(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for PressCount {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            struct Message(Option<String>);
            impl Visit for Message {
                fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
                    if field.name() == "message" {
                        self.0 = Some(format!("{value:?}").trim_matches('"').to_owned());
                    }
                }
            }
            let mut message = Message(None);
            event.record(&mut message);
            if message.0.as_deref() == Some("cell pressed") {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn cell() -> Cell {
        Cell::new(
            2,
            Pos2::new(10.0, -4.0),
            20.0,
            DetectionColor::from_rgb(9, 8, 7),
            Chord::new(PitchClass::A, Quality::Minor),
        )
    }

    #[test]
    fn test_hexagon_vertices_on_circle() {
        let c = Pos2::new(3.0, 4.0);
        let pts = hexagon(c, 10.0);
        assert!((pts[0].x - 13.0).abs() < 1e-5);
        assert!((pts[0].y - 4.0).abs() < 1e-5);
        for p in pts {
            assert!((p.distance(c) - 10.0).abs() < 1e-4);
        }
        // opposite vertices
        assert!((pts[3].x + 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_new_cell_is_normal_with_label() {
        let c = cell();
        assert_eq!(c.highlight(), Highlight::Normal);
        assert_eq!(c.label(), "Am");
        assert_eq!(c.sequence(), 2);
    }

    #[test]
    fn test_hit_test_needs_press_and_exact_color() {
        let c = cell();
        let own = Some(c.detection_color());
        let pos = Pos2::new(0.0, 0.0);
        assert!(c.hit_test(PointerState::pressed_at(pos), own));
        assert!(!c.hit_test(PointerState::released_at(pos), own));
        assert!(!c.hit_test(PointerState::pressed_at(pos), None));
        // same red channel, different green: must not match
        let near = Some(DetectionColor::from_rgb(9, 0, 7));
        assert!(!c.hit_test(PointerState::pressed_at(pos), near));
    }

    #[test]
    fn test_press_event_only_on_transition() {
        let presses = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(PressCount(Arc::clone(&presses)));
        let _guard = tracing::subscriber::set_default(subscriber);
        tracing::callsite::rebuild_interest_cache();

        let ctx = egui::Context::default();
        let painter = Painter::new(ctx, LayerId::background(), Rect::EVERYTHING);
        let mut layer = DetectionLayer::new(100, 100).unwrap();
        let at = Pos2::new(50.0, 50.0);
        let mut c = Cell::new(
            0,
            at,
            20.0,
            DetectionColor::from_id(1),
            Chord::new(PitchClass::C, Quality::Major),
        );
        let mut surface = PainterSurface::new(&painter, &mut layer, PointerState::default());
        c.render_detection_layer(&mut surface).unwrap();

        let frames = [
            (PointerState::pressed_at(at), Highlight::Highlighted),
            (PointerState::pressed_at(at), Highlight::Highlighted),
            (PointerState::released_at(at), Highlight::Normal),
            (PointerState::pressed_at(at), Highlight::Highlighted),
        ];
        for (pointer, expected) in frames {
            let surface = PainterSurface::new(&painter, &mut layer, pointer);
            assert_eq!(c.update_pointer(&surface), expected);
        }
        // held across two frames counts once
        assert_eq!(presses.load(Ordering::SeqCst), 2);
    }
}
