//! combcore: hexagonal chord grid with color-map hit testing

pub mod cell;
pub mod color;
pub mod config;
pub mod detection;
pub mod error;
pub mod grid;
pub mod painter;
pub mod pitch;
pub mod safety;
pub mod surface;
pub mod theme;

pub use cell::{Cell, Highlight};
pub use color::{DetectionColor, DetectionPalette};
pub use config::PadConfig;
pub use detection::DetectionLayer;
pub use error::{CombError, SurfaceError};
pub use grid::CellGrid;
pub use painter::PainterSurface;
pub use pitch::{Chord, PitchClass, Quality};
pub use surface::{PointerState, RenderSurface};
pub use theme::PadTheme;
