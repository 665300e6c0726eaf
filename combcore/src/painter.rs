//! egui-backed render surface
//!
//! Visible shapes go to an `egui::Painter`, detection fills go to a
//! [`DetectionLayer`]. Both share one [`TransformStack`], so a cell's local
//! coordinates land on the same screen pixels in either layer.

use egui::{Align2, Color32, FontId, Painter, Pos2, Shape, Stroke, Vec2};

use crate::color::DetectionColor;
use crate::detection::DetectionLayer;
use crate::error::SurfaceError;
use crate::surface::{PointerState, RenderSurface, TransformStack};

pub struct PainterSurface<'a> {
    painter: &'a Painter,
    detection: &'a mut DetectionLayer,
    pointer: PointerState,
    transform: TransformStack,
}

impl<'a> PainterSurface<'a> {
    pub fn new(
        painter: &'a Painter,
        detection: &'a mut DetectionLayer,
        pointer: PointerState,
    ) -> Self {
        Self {
            painter,
            detection,
            pointer,
            transform: TransformStack::new(),
        }
    }

    pub fn transform(&self) -> &TransformStack {
        &self.transform
    }
}

impl RenderSurface for PainterSurface<'_> {
    fn push_transform(&mut self) {
        self.transform.push();
    }

    fn pop_transform(&mut self) {
        self.transform.pop();
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform.translate(offset);
    }

    fn fill_detection_polygon(
        &mut self,
        points: &[Pos2],
        color: DetectionColor,
    ) -> Result<(), SurfaceError> {
        let screen = self.transform.apply_all(points);
        self.detection.fill_polygon(&screen, color)
    }

    fn draw_polygon(
        &mut self,
        points: &[Pos2],
        fill: Color32,
        stroke: Stroke,
    ) -> Result<(), SurfaceError> {
        if points.len() < 3 {
            return Err(SurfaceError::DegeneratePath);
        }
        let screen = self.transform.apply_all(points);
        self.painter.add(Shape::convex_polygon(screen, fill, stroke));
        Ok(())
    }

    fn draw_text(
        &mut self,
        pos: Pos2,
        text: &str,
        size: f32,
        color: Color32,
    ) -> Result<(), SurfaceError> {
        self.painter.text(
            self.transform.apply(pos),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(size),
            color,
        );
        Ok(())
    }

    fn sample_detection(&self, screen: Pos2) -> Option<DetectionColor> {
        self.detection.sample(screen)
    }

    fn pointer(&self) -> PointerState {
        self.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::hexagon;
    use crate::surface::scoped;
    use egui::{LayerId, Rect};

    #[test]
    fn test_detection_fill_follows_transform() {
        let ctx = egui::Context::default();
        let clip = Rect::from_min_size(Pos2::ZERO, Vec2::splat(200.0));
        let painter = Painter::new(ctx, LayerId::background(), clip);
        let mut layer = DetectionLayer::new(200, 200).unwrap();
        let color = DetectionColor::from_id(7);
        let mut surface = PainterSurface::new(&painter, &mut layer, PointerState::default());

        {
            let mut scope = scoped(&mut surface);
            scope.translate(Vec2::new(120.0, 60.0));
            scope.fill_detection_polygon(&hexagon(Pos2::ZERO, 15.0), color).unwrap();
            scope
                .draw_polygon(&hexagon(Pos2::ZERO, 15.0), Color32::WHITE, Stroke::NONE)
                .unwrap();
        }

        assert_eq!(surface.transform().depth(), 0);
        assert_eq!(surface.sample_detection(Pos2::new(120.0, 60.0)), Some(color));
        assert_eq!(surface.sample_detection(Pos2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_two_point_polygon_rejected() {
        let ctx = egui::Context::default();
        let painter = Painter::new(ctx, LayerId::background(), Rect::EVERYTHING);
        let mut layer = DetectionLayer::new(10, 10).unwrap();
        let mut surface = PainterSurface::new(&painter, &mut layer, PointerState::default());
        let line = [Pos2::ZERO, Pos2::new(1.0, 1.0)];
        assert_eq!(
            surface.draw_polygon(&line, Color32::BLACK, Stroke::NONE),
            Err(SurfaceError::DegeneratePath)
        );
    }
}
