//! Interactive viewer for the Kiss Surface, `r(z) = z^2 * sqrt(1 - z)`
//! revolved about the z axis, drawn with OpenGL through `glow`.

pub mod app;
pub mod engine;
