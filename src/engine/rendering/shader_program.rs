use log::{ debug, warn };

use super::gl_api::GlApi;
use crate::engine::utils::math::{ Mat4x4, Vec3 };

pub const ATTRIB_VERTEX: &str = "vertex";
pub const UNIFORM_MODEL_VIEW_PROJECTION: &str = "ModelViewProjectionMatrix";
pub const UNIFORM_NORMAL_MATRIX: &str = "normalMatrix";
pub const UNIFORM_LIGHT_POSITION: &str = "lightPosition";
pub const UNIFORM_COLOR: &str = "color";

/// Vertex attribute index as reported by `glGetAttribLocation`.
pub type AttribLocation = u32;

/// Locations resolved once after linking. `None` is what GL reports as -1:
/// the name is absent or the compiler optimized it out.
#[derive(Debug, Clone)]
pub struct ProgramLocations<U> {
    pub vertex: Option<AttribLocation>,
    pub color: Option<U>,
    pub model_view_projection: Option<U>,
    pub normal_matrix: Option<U>,
    pub light_position: Option<U>,
}

pub struct ShaderProgram<G: GlApi> {
    name: String,
    program: G::Program,
    locations: ProgramLocations<G::UniformLocation>,
}

impl<G: GlApi> ShaderProgram<G> {
    /// Wraps a linked program and resolves the curated attribute and uniform names.
    pub fn new(gl: &G, name: &str, program: G::Program) -> Self {
        let uniform = |uniform_name: &str| {
            let location = gl.get_uniform_location(program, uniform_name);
            if location.is_none() {
                warn!("[{name}] uniform '{uniform_name}' not active; it will not be set");
            }
            location
        };

        let vertex = gl.get_attrib_location(program, ATTRIB_VERTEX);
        if vertex.is_none() {
            warn!("[{name}] attribute '{ATTRIB_VERTEX}' not active; vertices will not be bound");
        }

        let locations = ProgramLocations {
            vertex,
            color: uniform(UNIFORM_COLOR),
            model_view_projection: uniform(UNIFORM_MODEL_VIEW_PROJECTION),
            normal_matrix: uniform(UNIFORM_NORMAL_MATRIX),
            light_position: uniform(UNIFORM_LIGHT_POSITION),
        };
        debug!("[{name}] resolved locations: {locations:?}");

        Self {
            name: name.to_string(),
            program,
            locations,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn program(&self) -> G::Program {
        self.program
    }

    pub fn locations(&self) -> &ProgramLocations<G::UniformLocation> {
        &self.locations
    }

    pub fn vertex_attribute(&self) -> Option<AttribLocation> {
        self.locations.vertex
    }

    /// Makes this the current program for subsequent uniform and draw calls.
    pub fn activate(&self, gl: &G) {
        gl.use_program(Some(self.program));
    }

    // Setters below are no-ops for inactive uniforms, same as GL with -1.

    pub fn set_model_view_projection(&self, gl: &G, matrix: &Mat4x4) {
        if let Some(loc) = &self.locations.model_view_projection {
            gl.uniform_matrix_4_f32_slice(loc, true, matrix);
        }
    }

    pub fn set_normal_matrix(&self, gl: &G, matrix: &Mat4x4) {
        if let Some(loc) = &self.locations.normal_matrix {
            gl.uniform_matrix_4_f32_slice(loc, true, matrix);
        }
    }

    pub fn set_light_position(&self, gl: &G, position: Vec3) {
        if let Some(loc) = &self.locations.light_position {
            gl.uniform_3_f32(loc, position[0], position[1], position[2]);
        }
    }

    pub fn set_color(&self, gl: &G, color: [f32; 4]) {
        if let Some(loc) = &self.locations.color {
            gl.uniform_4_f32(loc, color[0], color[1], color[2], color[3]);
        }
    }
}

/// Vertex and fragment sources handed to the program builder as opaque text.
#[derive(Debug, Clone, Copy)]
pub struct ShaderSources<'a> {
    pub vertex: &'a str,
    pub fragment: &'a str,
}

impl ShaderSources<'static> {
    pub fn bundled() -> Self {
        Self {
            vertex: include_str!("../../shaders/surface.vert"),
            fragment: include_str!("../../shaders/surface.frag"),
        }
    }
}
