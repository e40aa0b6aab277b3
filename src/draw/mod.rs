//! Rendering seam and the Cairo backend.
//!
//! - [`Renderer`]: primitive drawing operations in y-up device pixels
//! - [`ImageLoader`]: resolves image paths into [`ImageHandle`]s
//! - [`CairoRenderer`]: Cairo/Pango implementation used on screen and for export
//! - [`render_frame`]: composes a full frame of the chart

pub mod cairo_renderer;
pub mod color;
pub mod font;
pub mod image;
pub mod renderer;
pub mod scene;

pub use cairo_renderer::CairoRenderer;
pub use color::Color;
pub use font::FontDescriptor;
pub use image::{
    DEFAULT_PLACEHOLDER_SIZE, FALLBACK_PLACEHOLDER_SIZE, ImageError, ImageHandle, ImageLoader,
    PngLoader,
};
pub use renderer::{Renderer, TextAnchor};
pub use scene::{FrameStyle, SceneView, device_rect, render_frame};
