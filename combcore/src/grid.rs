//! Comb grid layout
//!
//! Eight cells around an origin: the key's own chord in the middle, a lower
//! cluster of four cells on a ring around it, and an upper cluster of three
//! on a ring of the same size centered on cell 4.
//!
//! ```text
//!             6
//!         5       7
//!             4
//!         0
//!     1       3
//!         2
//! ```
//!
//! Chords for the outer cells come from two fixed tables read from the back,
//! one entry per cell in creation order.

use std::collections::HashMap;
use std::f64::consts::PI;

use egui::Pos2;

use crate::cell::Cell;
use crate::color::DetectionPalette;
use crate::error::{CombError, Result};
use crate::pitch::{Chord, PitchClass, Quality};
use crate::surface::{scoped, RenderSurface};

/// Center-to-center distance between neighbouring cells, in cell radii.
pub const SPACING: f32 = 1.77;

pub const CELL_COUNT: usize = 8;
pub const LOWER_CLUSTER: std::ops::RangeInclusive<usize> = 1..=4;
pub const UPPER_CLUSTER: std::ops::RangeInclusive<usize> = 5..=7;

/// Semitones above the key, consumed from the back.
const OFFSETS: [usize; CELL_COUNT] = [11, 2, 5, 4, 9, 0, 11, 7];

/// Consumed from the back alongside `OFFSETS`. Indices 0 and 6 should be
/// diminished; until a diminished quality exists they stay minor.
const QUALITIES: [Quality; CELL_COUNT] = [
    Quality::Minor,
    Quality::Minor,
    Quality::Major,
    Quality::Minor,
    Quality::Minor,
    Quality::Major,
    Quality::Minor,
    Quality::Major,
];

/// Chord for the `slot`-th outer cell (0-based, creation order).
pub fn outer_chord(key: PitchClass, slot: usize) -> Chord {
    let idx = CELL_COUNT - 1 - slot;
    Chord::new(key.transpose(OFFSETS[idx]), QUALITIES[idx])
}

/// Cell centers relative to the grid origin, in creation order.
pub fn local_centers(cell_radius: f32) -> [Pos2; CELL_COUNT] {
    let ring = f64::from(SPACING) * f64::from(cell_radius);
    let on_ring = |sixths: i32, shift: (f64, f64)| {
        let angle = -(f64::from(sixths) / 6.0) * PI;
        Pos2::new(
            (ring * angle.cos() + shift.0) as f32,
            (ring * angle.sin() + shift.1) as f32,
        )
    };
    // upper cluster ring center
    let shift = (ring * (11.0 / 6.0 * PI).cos(), ring * (11.0 / 6.0 * PI).sin());

    let mut centers = [Pos2::ZERO; CELL_COUNT];
    // lower: 7/6, 9/6, 11/6, 13/6 of pi
    for k in 0..4 {
        centers[1 + k] = on_ring(7 + 2 * k as i32, (0.0, 0.0));
    }
    // upper: 5/6, 3/6, 1/6 of pi
    for k in 0..3 {
        centers[5 + k] = on_ring(5 - 2 * k as i32, shift);
    }
    centers
}

fn build_cell(
    sequence: usize,
    center: Pos2,
    cell_radius: f32,
    chord: Chord,
    palette: &mut DetectionPalette,
) -> Cell {
    Cell::new(sequence, center, cell_radius, palette.next(), chord)
}

fn check_unique_colors(cells: &[Cell]) -> Result<()> {
    let mut seen = HashMap::with_capacity(cells.len());
    for cell in cells {
        if let Some(first) = seen.insert(cell.detection_color(), cell.sequence()) {
            return Err(CombError::DuplicateDetectionColor {
                first,
                second: cell.sequence(),
                color: cell.detection_color(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct CellGrid {
    origin: Pos2,
    cell_radius: f32,
    key: PitchClass,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Build a grid with its own detection palette.
    pub fn new(origin: Pos2, cell_radius: f32, key: PitchClass) -> Result<Self> {
        Self::with_palette(origin, cell_radius, key, &mut DetectionPalette::new())
    }

    /// Build a grid from a key name such as `"F#"`.
    pub fn from_key_name(origin: Pos2, cell_radius: f32, key: &str) -> Result<Self> {
        Self::new(origin, cell_radius, key.parse()?)
    }

    /// Build a grid drawing detection colors from a palette shared with
    /// other grids on the same surface.
    pub fn with_palette(
        origin: Pos2,
        cell_radius: f32,
        key: PitchClass,
        palette: &mut DetectionPalette,
    ) -> Result<Self> {
        if !cell_radius.is_finite() || cell_radius <= 0.0 {
            return Err(CombError::InvalidRadius(cell_radius));
        }

        let centers = local_centers(cell_radius);
        let mut cells = Vec::with_capacity(CELL_COUNT);
        cells.push(build_cell(
            0,
            centers[0],
            cell_radius,
            Chord::new(key, Quality::Major),
            palette,
        ));
        for (slot, center) in centers.iter().skip(1).enumerate() {
            cells.push(build_cell(
                slot + 1,
                *center,
                cell_radius,
                outer_chord(key, slot),
                palette,
            ));
        }
        check_unique_colors(&cells)?;

        tracing::debug!(key = %key, x = origin.x, y = origin.y, cell_radius, "built cell grid");
        Ok(Self {
            origin,
            cell_radius,
            key,
            cells,
        })
    }

    pub fn origin(&self) -> Pos2 {
        self.origin
    }

    pub fn cell_radius(&self) -> f32 {
        self.cell_radius
    }

    pub fn key(&self) -> PitchClass {
        self.key
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, sequence: usize) -> Option<&Cell> {
        self.cells.get(sequence)
    }

    /// First highlighted cell in draw order.
    pub fn highlighted(&self) -> Option<&Cell> {
        self.cells.iter().find(|c| c.is_highlighted())
    }

    /// Fill every cell's detection color, translated to the grid origin.
    pub fn render_detection_layer<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> Result<()> {
        let mut scope = scoped(surface);
        scope.translate(self.origin.to_vec2());
        for cell in &self.cells {
            cell.render_detection_layer(&mut *scope)?;
        }
        Ok(())
    }

    /// Hit-test and draw every cell, translated to the grid origin.
    pub fn render_visible_layer<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<()> {
        let mut scope = scoped(surface);
        scope.translate(self.origin.to_vec2());
        for cell in &mut self.cells {
            cell.render_visible_layer(&mut *scope)?;
        }
        Ok(())
    }
}
