pub mod frame_renderer;
pub mod gl_api;
pub mod session;
pub mod shader_builder;
pub mod shader_program;

#[cfg(test)]
pub(crate) mod fake_gl;

pub use frame_renderer::{ render_frame, FrameTransforms };
pub use gl_api::GlApi;
pub use session::RenderSession;
pub use shader_builder::build_program;
pub use shader_program::{ ProgramLocations, ShaderProgram, ShaderSources };
