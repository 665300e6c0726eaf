//! Recording surface shared by the integration tests.

#![allow(dead_code)]

use combcore::surface::TransformStack;
use combcore::{DetectionColor, DetectionLayer, PointerState, RenderSurface, SurfaceError};
use egui::{Color32, Pos2, Stroke, Vec2};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Push,
    Pop,
    Translate(Vec2),
    Detection(DetectionColor),
    Polygon(Color32),
    Text(String, Color32),
}

/// How the surface misbehaves on its n-th drawing call (0-based).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fault {
    None,
    ErrorAt(usize),
    PanicAt(usize),
}

pub struct MockSurface {
    pub layer: DetectionLayer,
    pub transform: TransformStack,
    pub pointer: PointerState,
    /// When set, every sample returns this instead of reading the layer.
    pub forced_sample: Option<Option<DetectionColor>>,
    pub calls: Vec<Call>,
    pub fault: Fault,
    draws: usize,
}

impl MockSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            layer: DetectionLayer::new(width, height).unwrap(),
            transform: TransformStack::new(),
            pointer: PointerState::default(),
            forced_sample: None,
            calls: Vec::new(),
            fault: Fault::None,
            draws: 0,
        }
    }

    pub fn with_pointer(mut self, pointer: PointerState) -> Self {
        self.pointer = pointer;
        self
    }

    /// Text labels in draw order.
    pub fn labels(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Text(s, _) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    fn draw(&mut self) -> Result<(), SurfaceError> {
        let n = self.draws;
        self.draws += 1;
        match self.fault {
            Fault::ErrorAt(at) if at == n => Err(SurfaceError::DegeneratePath),
            Fault::PanicAt(at) if at == n => panic!("forced failure at draw {n}"),
            _ => Ok(()),
        }
    }
}

impl RenderSurface for MockSurface {
    fn push_transform(&mut self) {
        self.calls.push(Call::Push);
        self.transform.push();
    }

    fn pop_transform(&mut self) {
        self.calls.push(Call::Pop);
        self.transform.pop();
    }

    fn translate(&mut self, offset: Vec2) {
        self.calls.push(Call::Translate(offset));
        self.transform.translate(offset);
    }

    fn fill_detection_polygon(
        &mut self,
        points: &[Pos2],
        color: DetectionColor,
    ) -> Result<(), SurfaceError> {
        self.draw()?;
        self.calls.push(Call::Detection(color));
        let screen = self.transform.apply_all(points);
        self.layer.fill_polygon(&screen, color)
    }

    fn draw_polygon(
        &mut self,
        _points: &[Pos2],
        fill: Color32,
        _stroke: Stroke,
    ) -> Result<(), SurfaceError> {
        self.draw()?;
        self.calls.push(Call::Polygon(fill));
        Ok(())
    }

    fn draw_text(
        &mut self,
        _pos: Pos2,
        text: &str,
        _size: f32,
        color: Color32,
    ) -> Result<(), SurfaceError> {
        self.draw()?;
        self.calls.push(Call::Text(text.to_string(), color));
        Ok(())
    }

    fn sample_detection(&self, screen: Pos2) -> Option<DetectionColor> {
        match self.forced_sample {
            Some(forced) => forced,
            None => self.layer.sample(screen),
        }
    }

    fn pointer(&self) -> PointerState {
        self.pointer
    }
}
