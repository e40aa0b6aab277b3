//! View transform between world units and device pixels, plus grid stepping.

pub mod canvas;
pub mod grid;

pub use canvas::Canvas;
pub use grid::{DEFAULT_BIAS, GridSteps, RULER_BIAS, steps};
