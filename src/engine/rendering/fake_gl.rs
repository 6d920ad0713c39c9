//! Recording stand-in for a GL context, used by unit tests.

use std::cell::{ Cell, RefCell };
use std::collections::HashMap;

use super::gl_api::GlApi;

pub const FAKE_COMPILE_LOG: &str = "ERROR: 0:1: 'main' : function not defined";
pub const FAKE_LINK_LOG: &str = "ERROR: fragment shader input 'objectPosition' not written";

#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateShader(u32),
    CompileShader(u32),
    DeleteShader(u32),
    AttachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    UniformMatrix4 { location: u32, transpose: bool, value: Vec<f32> },
    Uniform3 { location: u32, value: [f32; 3] },
    Uniform4 { location: u32, value: [f32; 4] },
    BindVertexArray(Option<u32>),
    BindBuffer { target: u32, buffer: Option<u32> },
    BufferData { target: u32, bytes: usize, usage: u32 },
    VertexAttribPointer {
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    EnableVertexAttribArray(u32),
    DrawArrays { mode: u32, first: i32, count: i32 },
    ClearColor([f32; 4]),
    Clear(u32),
    Enable(u32),
    Viewport([i32; 4]),
}

/// Compiles any source containing `void main`; every active name gets the
/// location equal to its index in `active_names`.
pub struct FakeGl {
    calls: RefCell<Vec<GlCall>>,
    next_handle: Cell<u32>,
    sources: RefCell<HashMap<u32, String>>,
    pub active_names: Vec<&'static str>,
    pub fail_link: bool,
}

impl FakeGl {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            next_handle: Cell::new(1),
            sources: RefCell::new(HashMap::new()),
            active_names: vec![
                "vertex",
                "ModelViewProjectionMatrix",
                "normalMatrix",
                "lightPosition",
                "color",
            ],
            fail_link: false,
        }
    }

    pub fn without(mut self, name: &str) -> Self {
        self.active_names.retain(|n| *n != name);
        self
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.calls.borrow().clone()
    }

    pub fn take_calls(&self) -> Vec<GlCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    pub fn location_of(&self, name: &str) -> Option<u32> {
        self.active_names.iter().position(|n| *n == name).map(|i| i as u32)
    }

    fn record(&self, call: GlCall) {
        self.calls.borrow_mut().push(call);
    }

    fn handle(&self) -> u32 {
        let handle = self.next_handle.get();
        self.next_handle.set(handle + 1);
        handle
    }
}

impl GlApi for FakeGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type UniformLocation = u32;

    fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
        self.record(GlCall::CreateShader(shader_type));
        Ok(self.handle())
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.sources.borrow_mut().insert(shader, source.to_string());
    }

    fn compile_shader(&self, shader: u32) {
        self.record(GlCall::CompileShader(shader));
    }

    fn get_shader_compile_status(&self, shader: u32) -> bool {
        self.sources
            .borrow()
            .get(&shader)
            .is_some_and(|source| source.contains("void main"))
    }

    fn get_shader_info_log(&self, shader: u32) -> String {
        if self.get_shader_compile_status(shader) {
            String::new()
        } else {
            FAKE_COMPILE_LOG.to_string()
        }
    }

    fn delete_shader(&self, shader: u32) {
        self.record(GlCall::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        Ok(self.handle())
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(GlCall::AttachShader { program, shader });
    }

    fn link_program(&self, program: u32) {
        self.record(GlCall::LinkProgram(program));
    }

    fn get_program_link_status(&self, _program: u32) -> bool {
        !self.fail_link
    }

    fn get_program_info_log(&self, _program: u32) -> String {
        if self.fail_link { FAKE_LINK_LOG.to_string() } else { String::new() }
    }

    fn delete_program(&self, program: u32) {
        self.record(GlCall::DeleteProgram(program));
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(GlCall::UseProgram(program));
    }

    fn get_attrib_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.location_of(name)
    }

    fn get_uniform_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.location_of(name)
    }

    fn uniform_matrix_4_f32_slice(&self, location: &u32, transpose: bool, value: &[f32]) {
        self.record(GlCall::UniformMatrix4 {
            location: *location,
            transpose,
            value: value.to_vec(),
        });
    }

    fn uniform_3_f32(&self, location: &u32, x: f32, y: f32, z: f32) {
        self.record(GlCall::Uniform3 { location: *location, value: [x, y, z] });
    }

    fn uniform_4_f32(&self, location: &u32, x: f32, y: f32, z: f32, w: f32) {
        self.record(GlCall::Uniform4 { location: *location, value: [x, y, z, w] });
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        Ok(self.handle())
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(GlCall::BindVertexArray(vertex_array));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        Ok(self.handle())
    }

    fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        self.record(GlCall::BindBuffer { target, buffer });
    }

    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32) {
        self.record(GlCall::BufferData { target, bytes: data.len(), usage });
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32
    ) {
        self.record(GlCall::VertexAttribPointer { index, size, data_type, normalized, stride, offset });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::EnableVertexAttribArray(index));
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        self.record(GlCall::DrawArrays { mode, first, count });
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(GlCall::ClearColor([red, green, blue, alpha]));
    }

    fn clear(&self, mask: u32) {
        self.record(GlCall::Clear(mask));
    }

    fn enable(&self, parameter: u32) {
        self.record(GlCall::Enable(parameter));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport([x, y, width, height]));
    }
}
