//! Per-frame transform composition and the draw sequence.

use std::f32::consts::PI;
use log::warn;

use super::gl_api::GlApi;
use super::session::RenderSession;
use crate::engine::utils::math::{
    Mat4x4,
    Vec3,
    mat4x4_axis_rotation,
    mat4x4_identity,
    mat4x4_inverse,
    mat4x4_mul,
    mat4x4_perspective,
    mat4x4_translate,
    mat4x4_transpose,
};

pub const FIELD_OF_VIEW: f32 = PI / 8.0;
pub const ASPECT_RATIO: f32 = 1.0;
// Tight around the object at z = -10; moving these clips the surface.
pub const NEAR_PLANE: f32 = 8.0;
pub const FAR_PLANE: f32 = 12.0;

pub const CENTERING_AXIS: Vec3 = [0.707, 0.707, 0.0];
pub const CENTERING_ANGLE: f32 = 0.7;
pub const CENTERING_OFFSET: Vec3 = [0.0, 0.0, -10.0];

pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Transforms for one frame. Nothing here outlives the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransforms {
    pub projection: Mat4x4,
    pub view: Mat4x4,
    pub model: Mat4x4,
    pub model_view_projection: Mat4x4,
    pub normal_matrix: Mat4x4,
}

impl FrameTransforms {
    pub fn projection() -> Mat4x4 {
        mat4x4_perspective(FIELD_OF_VIEW, ASPECT_RATIO, NEAR_PLANE, FAR_PLANE)
    }

    /// `model = T * R * view`, `mvp = P * model`, `normal = (model^-1)^T`.
    pub fn compose(view: Mat4x4) -> Self {
        let projection = Self::projection();
        let rotate = mat4x4_axis_rotation(CENTERING_AXIS, CENTERING_ANGLE);
        let translate = mat4x4_translate(
            CENTERING_OFFSET[0],
            CENTERING_OFFSET[1],
            CENTERING_OFFSET[2]
        );

        let model = mat4x4_mul(translate, mat4x4_mul(rotate, view));
        let model_view_projection = mat4x4_mul(projection, model);
        let normal_matrix = match mat4x4_inverse(model) {
            Some(inverse) => mat4x4_transpose(inverse),
            None => {
                warn!("model-view matrix is singular; using identity normal matrix");
                mat4x4_identity()
            }
        };

        Self {
            projection,
            view,
            model,
            model_view_projection,
            normal_matrix,
        }
    }
}

/// Redraws the whole frame: clear, compose transforms, push uniforms, draw.
///
/// Assumes the session initialized successfully; GL errors here are not
/// recovered from.
pub fn render_frame<G: GlApi>(session: &RenderSession<G>, light_position: Vec3) -> FrameTransforms {
    let gl = session.gl();
    let program = session.program();

    let [r, g, b, a] = CLEAR_COLOR;
    gl.clear_color(r, g, b, a);
    gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

    let transforms = FrameTransforms::compose(session.rotator().view_matrix());

    program.activate(gl);
    program.set_model_view_projection(gl, &transforms.model_view_projection);
    program.set_normal_matrix(gl, &transforms.normal_matrix);
    program.set_light_position(gl, light_position);
    program.set_color(gl, session.surface_color());

    session.surface().draw(gl, program);
    transforms
}
