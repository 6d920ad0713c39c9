use log::debug;

use crate::engine::utils::math::{
    Mat4x4,
    Quat,
    Vec3,
    mat4x4_from_quat,
    mat4x4_mul,
    mat4x4_translate,
    quat_from_axis_angle,
    quat_identity,
    quat_mul,
    quat_normalize,
    vec3_cross,
    vec3_dot,
    vec3_normalize,
};

/// Turns pointer drags over the canvas into an accumulated view rotation.
///
/// Positions are in window pixels with y pointing down. Each is projected
/// onto a virtual unit sphere centred in the canvas, and every drag step
/// rotates the view by the arc between consecutive sphere points.
#[derive(Debug, Clone)]
pub struct TrackballRotator {
    orientation: Quat,
    canvas_size: (f32, f32),
    view_distance: f32,
    drag_anchor: Option<Vec3>,
}

impl TrackballRotator {
    pub fn new(width: u32, height: u32, view_distance: f32) -> Self {
        Self {
            orientation: quat_identity(),
            canvas_size: (width.max(1) as f32, height.max(1) as f32),
            view_distance,
            drag_anchor: None,
        }
    }

    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas_size = (width.max(1) as f32, height.max(1) as f32);
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn begin_drag(&mut self, x: f32, y: f32) {
        self.drag_anchor = Some(self.project_to_sphere(x, y));
    }

    /// Rotates by the arc from the last drag point. Returns whether the view changed.
    pub fn drag_to(&mut self, x: f32, y: f32) -> bool {
        let Some(from) = self.drag_anchor else {
            return false;
        };
        let to = self.project_to_sphere(x, y);
        self.drag_anchor = Some(to);

        let axis = vec3_cross(from, to);
        if vec3_dot(axis, axis) < 1e-12 {
            return false;
        }
        let angle = vec3_dot(from, to).clamp(-1.0, 1.0).acos();

        self.orientation = quat_normalize(quat_mul(quat_from_axis_angle(axis, angle), self.orientation));
        debug!("trackball rotated by {angle:.4} rad about {axis:?}");
        true
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Rotation followed by a pull-back of `view_distance` along -z.
    pub fn view_matrix(&self) -> Mat4x4 {
        let rotation = mat4x4_from_quat(self.orientation);
        if self.view_distance == 0.0 {
            return rotation;
        }
        mat4x4_mul(mat4x4_translate(0.0, 0.0, -self.view_distance), rotation)
    }

    fn project_to_sphere(&self, x: f32, y: f32) -> Vec3 {
        let (width, height) = self.canvas_size;
        let radius = width.min(height) * 0.5;
        let px = (x - width * 0.5) / radius;
        let py = (height * 0.5 - y) / radius;

        let d2 = px * px + py * py;
        if d2 <= 1.0 {
            [px, py, (1.0 - d2).sqrt()]
        } else {
            vec3_normalize([px, py, 0.0])
        }
    }
}
