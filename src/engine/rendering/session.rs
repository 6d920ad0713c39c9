use log::info;

use super::frame_renderer::{ render_frame, FrameTransforms };
use super::gl_api::GlApi;
use super::shader_builder::build_program;
use super::shader_program::{ ShaderProgram, ShaderSources };
use crate::engine::components::{ SurfaceModel, TrackballRotator };
use crate::engine::config::ViewerConfig;
use crate::engine::error::ViewerError;
use crate::engine::geometry::generate_surface_with;
use crate::engine::utils::math::Vec3;

/// Everything a frame needs: the context, the one program, the one surface
/// buffer and the rotator that supplies the view.
pub struct RenderSession<G: GlApi> {
    gl: G,
    program: ShaderProgram<G>,
    surface: SurfaceModel<G>,
    rotator: TrackballRotator,
    light_position: Vec3,
    surface_color: [f32; 4],
}

impl<G: GlApi> RenderSession<G> {
    /// Builds the program, generates and uploads the mesh, and enables depth
    /// testing. The context must already be current.
    pub fn initialize(
        gl: G,
        sources: &ShaderSources<'_>,
        config: &ViewerConfig
    ) -> Result<Self, ViewerError> {
        let linked = build_program(&gl, sources.vertex, sources.fragment)?;
        let program = ShaderProgram::new(&gl, "Basic", linked);
        program.activate(&gl);

        let mesh = generate_surface_with(&config.surface)?;
        let mut surface = SurfaceModel::new(&gl, "Surface")?;
        surface.upload(&gl, mesh.into_vertices())?;

        gl.enable(glow::DEPTH_TEST);

        let rotator = TrackballRotator::new(
            config.window.width,
            config.window.height,
            config.view_distance
        );

        info!("✅ Render session initialized ({} vertices)", surface.vertex_count());
        Ok(Self {
            gl,
            program,
            surface,
            rotator,
            light_position: config.light_position,
            surface_color: config.surface_color,
        })
    }

    /// Renders with the current light position.
    pub fn redraw(&self) -> FrameTransforms {
        render_frame(self, self.light_position)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gl.viewport(0, 0, width as i32, height as i32);
        self.rotator.set_canvas_size(width, height);
    }

    pub fn gl(&self) -> &G {
        &self.gl
    }

    pub fn program(&self) -> &ShaderProgram<G> {
        &self.program
    }

    pub fn surface(&self) -> &SurfaceModel<G> {
        &self.surface
    }

    pub fn rotator(&self) -> &TrackballRotator {
        &self.rotator
    }

    pub fn rotator_mut(&mut self) -> &mut TrackballRotator {
        &mut self.rotator
    }

    pub fn light_position(&self) -> Vec3 {
        self.light_position
    }

    pub fn set_light_position(&mut self, position: Vec3) {
        self.light_position = position;
    }

    pub fn surface_color(&self) -> [f32; 4] {
        self.surface_color
    }
}
