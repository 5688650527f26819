//! Infrastructure layer: owns the scarce page resource, exposes abilities.

pub mod render_surface;

pub use render_surface::{PageSurface, RenderSurface};
