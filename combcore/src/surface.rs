//! Render surface abstraction
//!
//! Cells and grids only talk to a [`RenderSurface`]: draw a polygon or a
//! string, fill the hidden detection layer, sample it, read the pointer, and
//! move the origin around. The origin is a stack; anything that translates
//! it goes through [`scoped`], which pops on drop so an early `?` return or
//! a panic cannot leave the stack unbalanced.

use std::ops::{Deref, DerefMut};

use egui::{Color32, Pos2, Stroke, Vec2};

use crate::color::DetectionColor;
use crate::error::SurfaceError;

/// Pointer position and primary button state for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    /// Screen position, `None` when the pointer is outside the canvas.
    pub pos: Option<Pos2>,
    pub pressed: bool,
}

impl PointerState {
    pub fn released_at(pos: Pos2) -> Self {
        Self {
            pos: Some(pos),
            pressed: false,
        }
    }

    pub fn pressed_at(pos: Pos2) -> Self {
        Self {
            pos: Some(pos),
            pressed: true,
        }
    }

    /// Pointer as seen by the canvas widget behind `response`. A press only
    /// counts when it landed on the canvas itself, so windows and menus
    /// drawn above it keep their clicks.
    pub fn from_response(response: &egui::Response) -> Self {
        let (pos, primary) = response
            .ctx
            .input(|i| (i.pointer.latest_pos(), i.pointer.primary_down()));
        Self {
            pos,
            pressed: primary && response.is_pointer_button_down_on(),
        }
    }
}

pub trait RenderSurface {
    fn push_transform(&mut self);
    fn pop_transform(&mut self);
    /// Move the origin by `offset`, in the current local coordinates.
    fn translate(&mut self, offset: Vec2);

    /// Fill a borderless polygon on the detection layer.
    fn fill_detection_polygon(
        &mut self,
        points: &[Pos2],
        color: DetectionColor,
    ) -> Result<(), SurfaceError>;

    /// Draw a filled, outlined polygon on the visible layer.
    fn draw_polygon(
        &mut self,
        points: &[Pos2],
        fill: Color32,
        stroke: Stroke,
    ) -> Result<(), SurfaceError>;

    /// Draw `text` centered on `pos`.
    fn draw_text(
        &mut self,
        pos: Pos2,
        text: &str,
        size: f32,
        color: Color32,
    ) -> Result<(), SurfaceError>;

    /// Detection color at a screen position, `None` if nothing was painted there.
    fn sample_detection(&self, screen: Pos2) -> Option<DetectionColor>;

    fn pointer(&self) -> PointerState;
}

/// Origin stack shared by the surface implementations.
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    current: Vec2,
    saved: Vec<Vec2>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the last pushed origin. Popping an empty stack resets to zero.
    pub fn pop(&mut self) {
        self.current = self.saved.pop().unwrap_or(Vec2::ZERO);
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.current += offset;
    }

    /// Local → screen.
    pub fn apply(&self, local: Pos2) -> Pos2 {
        local + self.current
    }

    pub fn apply_all(&self, local: &[Pos2]) -> Vec<Pos2> {
        local.iter().map(|p| self.apply(*p)).collect()
    }

    pub fn offset(&self) -> Vec2 {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

/// Saved-transform guard returned by [`scoped`]. Derefs to the surface.
pub struct TransformScope<'a, S: RenderSurface + ?Sized> {
    surface: &'a mut S,
}

/// Push the transform now, pop it when the returned guard drops.
pub fn scoped<S: RenderSurface + ?Sized>(surface: &mut S) -> TransformScope<'_, S> {
    surface.push_transform();
    TransformScope { surface }
}

impl<S: RenderSurface + ?Sized> Deref for TransformScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: RenderSurface + ?Sized> DerefMut for TransformScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: RenderSurface + ?Sized> Drop for TransformScope<'_, S> {
    fn drop(&mut self) {
        self.surface.pop_transform();
    }
}
