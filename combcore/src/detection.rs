//! Offscreen detection layer
//!
//! A screen-sized `tiny_skia::Pixmap` that cells fill with their detection
//! colors before the visible layer is drawn. Anti-aliasing is off so every
//! covered pixel holds exactly one cell's color and edges never blend two
//! ids into a third.

use egui::Pos2;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::color::DetectionColor;
use crate::error::SurfaceError;

pub struct DetectionLayer {
    pixmap: Pixmap,
}

impl DetectionLayer {
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::EmptyLayer { width, height })?;
        Ok(Self { pixmap })
    }

    /// Resize if the screen changed, then clear to transparent.
    pub fn begin_frame(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        if self.pixmap.width() != width || self.pixmap.height() != height {
            self.pixmap =
                Pixmap::new(width, height).ok_or(SurfaceError::EmptyLayer { width, height })?;
        } else {
            self.pixmap.fill(Color::TRANSPARENT);
        }
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fill a closed polygon given in screen coordinates.
    pub fn fill_polygon(
        &mut self,
        points: &[Pos2],
        color: DetectionColor,
    ) -> Result<(), SurfaceError> {
        let [first, rest @ ..] = points else {
            return Err(SurfaceError::DegeneratePath);
        };
        if rest.len() < 2 {
            return Err(SurfaceError::DegeneratePath);
        }
        let mut pb = PathBuilder::new();
        pb.move_to(first.x, first.y);
        for p in rest {
            pb.line_to(p.x, p.y);
        }
        pb.close();
        let path = pb.finish().ok_or(SurfaceError::DegeneratePath)?;

        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, 255);
        paint.anti_alias = false;

        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        Ok(())
    }

    /// Color painted at `pos`, or `None` for empty or out-of-bounds pixels.
    pub fn sample(&self, pos: Pos2) -> Option<DetectionColor> {
        if !pos.x.is_finite() || !pos.y.is_finite() || pos.x < 0.0 || pos.y < 0.0 {
            return None;
        }
        let px = self.pixmap.pixel(pos.x as u32, pos.y as u32)?;
        // only fully opaque pixels come from a cell
        if px.alpha() != 255 {
            return None;
        }
        Some(DetectionColor::from_rgb(px.red(), px.green(), px.blue()))
    }
}
