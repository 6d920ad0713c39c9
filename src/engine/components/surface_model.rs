use log::info;

use crate::engine::error::ViewerError;
use crate::engine::rendering::gl_api::GlApi;
use crate::engine::rendering::shader_program::ShaderProgram;

const FLOATS_PER_VERTEX: usize = 3;

/// A single vertex buffer holding tightly packed `vec3` positions, drawn as a
/// triangle strip.
pub struct SurfaceModel<G: GlApi> {
    name: String,
    vao: G::VertexArray,
    vertex_buffer: G::Buffer,
    vertices: Vec<f32>,
    count: usize,
}

impl<G: GlApi> SurfaceModel<G> {
    pub fn new(gl: &G, name: &str) -> Result<Self, ViewerError> {
        let vao = gl
            .create_vertex_array()
            .map_err(|e| ViewerError::GpuResource(format!("VAO for {name}: {e}")))?;
        let vertex_buffer = gl
            .create_buffer()
            .map_err(|e| ViewerError::GpuResource(format!("vertex buffer for {name}: {e}")))?;

        Ok(Self {
            name: name.to_string(),
            vao,
            vertex_buffer,
            vertices: Vec::new(),
            count: 0,
        })
    }

    /// Replaces the buffer contents wholesale.
    ///
    /// Fails with [`ViewerError::MalformedMesh`] if the list is not a whole
    /// number of vertices, holds a non-finite value, or is too long for a
    /// single draw call.
    pub fn upload(&mut self, gl: &G, vertices: Vec<f32>) -> Result<(), ViewerError> {
        if vertices.len() % FLOATS_PER_VERTEX != 0 {
            return Err(
                ViewerError::MalformedMesh(
                    format!("{}: {} scalars is not a multiple of 3", self.name, vertices.len())
                )
            );
        }
        if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(
                ViewerError::MalformedMesh(format!("{}: non-finite scalar at {index}", self.name))
            );
        }
        let count = vertices.len() / FLOATS_PER_VERTEX;
        if i32::try_from(count).is_err() {
            return Err(
                ViewerError::MalformedMesh(format!("{}: {count} vertices exceed a draw call", self.name))
            );
        }

        gl.bind_vertex_array(Some(self.vao));
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vertex_buffer));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&vertices),
            glow::STREAM_DRAW
        );

        self.vertices = vertices;
        self.count = count;
        info!("📦 Uploaded {} vertices for {}", self.count, self.name);
        Ok(())
    }

    /// Binds the buffer to the program's `vertex` attribute and draws the strip.
    /// Uniforms are left to the caller.
    pub fn draw(&self, gl: &G, program: &ShaderProgram<G>) {
        gl.bind_vertex_array(Some(self.vao));
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vertex_buffer));

        if let Some(loc) = program.vertex_attribute() {
            gl.vertex_attrib_pointer_f32(loc, FLOATS_PER_VERTEX as i32, glow::FLOAT, false, 0, 0);
            gl.enable_vertex_attrib_array(loc);
        }

        // Checked against i32 in upload.
        gl.draw_arrays(glow::TRIANGLE_STRIP, 0, self.count as i32);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_count(&self) -> usize {
        self.count
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }
}
