//! Kiss Surface mesh generation.
//!
//! The surface is the solid of revolution of `r(z) = z^2 * sqrt(1 - z)` for
//! `z` in `[-1, 1]`. Vertices come out in pairs, one on the current grid
//! point and one a step further in both `u` and `z`, so the flat list can be
//! drawn directly as a `TRIANGLE_STRIP`. Do not reorder the loops.

use serde::{ Deserialize, Serialize };

use crate::engine::error::ViewerError;

/// Largest vertex count a single `glDrawArrays` call accepts.
pub const MAX_DRAW_VERTICES: usize = i32::MAX as usize;

/// Grid resolution for the generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceParams {
    /// Angular step in degrees, applied over `[0, 360]` inclusive.
    pub u_step_degrees: f32,
    /// Number of z-steps on each side of zero; the z-step is `1 / z_scale`.
    pub z_scale: u32,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            u_step_degrees: 0.5,
            z_scale: 500,
        }
    }
}

impl SurfaceParams {
    /// Number of `u` values in `[0, 360]`, or `None` for a step that is not
    /// positive and finite or that yields more columns than a draw call holds.
    pub fn angular_steps(&self) -> Option<usize> {
        let step = f64::from(self.u_step_degrees);
        if !step.is_finite() || step <= 0.0 {
            return None;
        }
        // Epsilon keeps steps like 0.5 from losing the final 360 to rounding.
        let columns = ((360.0 / step) + 1e-9).floor();
        if columns >= MAX_DRAW_VERTICES as f64 {
            return None;
        }
        (columns as usize).checked_add(1)
    }

    /// Number of `z0` values in `[-z_scale, z_scale]`; `None` for `z_scale == 0`.
    pub fn z_steps(&self) -> Option<usize> {
        if self.z_scale == 0 {
            return None;
        }
        usize::try_from(self.z_scale).ok()?.checked_mul(2)?.checked_add(1)
    }

    /// Vertices `generate_surface_with` emits, or `None` if the grid is
    /// invalid or exceeds a single `i32` draw count.
    pub fn vertex_count(&self) -> Option<usize> {
        let count = self.angular_steps()?.checked_mul(self.z_steps()?)?.checked_mul(2)?;
        (count <= MAX_DRAW_VERTICES).then_some(count)
    }

    /// Exact number of scalars `generate_surface_with` emits for these params.
    pub fn scalar_count(&self) -> Option<usize> {
        self.vertex_count()?.checked_mul(3)
    }
}

/// Flat `x, y, z` list in triangle-strip order.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    vertices: Vec<f32>,
}

impl SurfaceMesh {
    pub fn as_slice(&self) -> &[f32] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn vertex(&self, index: usize) -> Option<[f32; 3]> {
        let start = index * 3;
        self.vertices
            .get(start..start + 3)
            .map(|v| [v[0], v[1], v[2]])
    }

    pub fn into_vertices(self) -> Vec<f32> {
        self.vertices
    }
}

/// Evaluates the surface at angle `u_degrees` and height `z`.
///
/// Panics if `z > 1`: the radius is undefined there and would come out NaN.
pub fn surface_point(u_degrees: f64, z: f64) -> [f64; 3] {
    let radicand = 1.0 - z;
    assert!(radicand >= 0.0, "kiss surface evaluated outside z in [-1, 1]: z = {z}");

    let r = z * z * radicand.sqrt();
    let u = u_degrees.to_radians();
    [r * u.cos(), r * u.sin(), z]
}

/// Generates the mesh at the default resolution (0.5 degrees, 1/500 in z).
pub fn generate_surface() -> SurfaceMesh {
    // The default grid is 721 x 1001 x 2 vertices, well inside a draw call.
    generate_surface_with(&SurfaceParams::default()).expect("default surface grid is valid")
}

/// Generates the mesh for `params`, refusing grids that could not be drawn
/// before allocating anything.
pub fn generate_surface_with(params: &SurfaceParams) -> Result<SurfaceMesh, ViewerError> {
    let (Some(angular_steps), Some(scalar_count)) = (params.angular_steps(), params.scalar_count()) else {
        return Err(
            ViewerError::MalformedMesh(
                format!(
                    "surface grid u_step={} z_scale={} is empty or exceeds {MAX_DRAW_VERTICES} vertices",
                    params.u_step_degrees,
                    params.z_scale
                )
            )
        );
    };

    let u_step = f64::from(params.u_step_degrees);
    let z_scale = i64::from(params.z_scale);
    let mut vertices = Vec::with_capacity(scalar_count);

    for step in 0..angular_steps {
        let u = step as f64 * u_step;
        for z0 in -z_scale..=z_scale {
            let z = z0 as f64 / z_scale as f64;
            push_vertex(&mut vertices, surface_point(u, z));

            // The top row's partner would sit above the apex; pin it to z = 1.
            let z1 = ((z0 + 1) as f64 / z_scale as f64).min(1.0);
            push_vertex(&mut vertices, surface_point(u + u_step, z1));
        }
    }

    debug_assert_eq!(vertices.len(), scalar_count);
    Ok(SurfaceMesh { vertices })
}

fn push_vertex(vertices: &mut Vec<f32>, point: [f64; 3]) {
    assert!(
        point.iter().all(|c| c.is_finite()),
        "kiss surface produced a non-finite vertex: {point:?}"
    );
    vertices.extend(point.iter().map(|&c| c as f32));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coarse() -> SurfaceParams {
        SurfaceParams {
            u_step_degrees: 90.0,
            z_scale: 4,
        }
    }

    #[test]
    fn vertices_come_in_strip_pairs() {
        let mesh = generate_surface_with(&coarse()).unwrap();
        assert_eq!(mesh.as_slice().len() % 3, 0);
        assert_eq!(mesh.as_slice().len() % 6, 0);
        assert_eq!(Some(mesh.as_slice().len()), coarse().scalar_count());
    }

    #[test]
    fn coarse_grid_has_expected_counts() {
        let params = coarse();
        assert_eq!(params.angular_steps(), Some(5));
        assert_eq!(params.z_steps(), Some(9));
        assert_eq!(generate_surface_with(&params).unwrap().vertex_count(), 5 * 9 * 2);
    }

    #[test]
    fn default_resolution_matches_closed_form() {
        let mesh = generate_surface();
        assert_eq!(mesh.as_slice().len(), 721 * 1001 * 2 * 3);
    }

    #[test]
    fn first_pair_starts_at_the_bottom_rim() {
        let mesh = generate_surface_with(&coarse()).unwrap();
        let first = mesh.vertex(0).unwrap();
        // r(-1) = sqrt(2), u = 0
        assert!((first[0] - 2.0f32.sqrt()).abs() < 1e-6);
        assert_eq!(first[1], 0.0);
        assert_eq!(first[2], -1.0);
    }

    #[test]
    fn origin_vertex_at_zero_height() {
        let params = coarse();
        let mesh = generate_surface_with(&params).unwrap();
        // Pair index for u = 0, z0 = 0 is z_scale within the first column.
        let index = params.z_scale as usize * 2;
        assert_eq!(mesh.vertex(index), Some([0.0, 0.0, 0.0]));
    }

    #[test]
    fn zero_height_is_origin_for_any_angle() {
        for u in [0.0, 45.0, 137.5, 360.0] {
            let [x, y, z] = surface_point(u, 0.0);
            assert_eq!((x, y, z), (0.0, 0.0, 0.0));
        }
    }

    #[test]
    fn partner_vertex_is_one_step_ahead() {
        let params = coarse();
        let mesh = generate_surface_with(&params).unwrap();
        let partner = mesh.vertex(1).unwrap();
        let expected = surface_point(90.0, -0.75);
        assert!((partner[0] as f64 - expected[0]).abs() < 1e-6);
        assert!((partner[1] as f64 - expected[1]).abs() < 1e-6);
        assert_eq!(partner[2], -0.75);
    }

    #[test]
    fn top_row_partner_is_pinned_to_apex() {
        let params = coarse();
        let mesh = generate_surface_with(&params).unwrap();
        let last = mesh.vertex(mesh.vertex_count() - 1).unwrap();
        assert_eq!(last[2], 1.0);
        assert!(last[0].abs() < 1e-6 && last[1].abs() < 1e-6);
        assert!(mesh.as_slice().iter().all(|c| c.is_finite()));
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate_surface_with(&coarse()).unwrap(), generate_surface_with(&coarse()).unwrap());
    }

    #[test]
    #[should_panic(expected = "outside z in [-1, 1]")]
    fn evaluating_above_apex_panics() {
        surface_point(0.0, 1.01);
    }

    #[test]
    fn uneven_step_stops_before_full_turn() {
        let params = SurfaceParams {
            u_step_degrees: 7.0,
            z_scale: 1,
        };
        // 0, 7, ..., 357
        assert_eq!(params.angular_steps(), Some(52));
    }

    #[test]
    fn tiny_angular_step_is_rejected_without_overflow() {
        let params = SurfaceParams {
            u_step_degrees: 1e-30,
            z_scale: 1,
        };
        assert_eq!(params.angular_steps(), None);
        assert_eq!(params.scalar_count(), None);
        assert!(matches!(generate_surface_with(&params), Err(ViewerError::MalformedMesh(_))));
    }

    #[test]
    fn oversized_z_scale_is_rejected_before_allocating() {
        let params = SurfaceParams {
            u_step_degrees: 0.5,
            z_scale: 4_000_000_000,
        };
        assert_eq!(params.z_steps(), Some(8_000_000_001));
        assert_eq!(params.vertex_count(), None);
        assert!(matches!(generate_surface_with(&params), Err(ViewerError::MalformedMesh(_))));
    }

    #[test]
    fn zero_z_scale_has_no_grid() {
        let params = SurfaceParams {
            u_step_degrees: 0.5,
            z_scale: 0,
        };
        assert_eq!(params.z_steps(), None);
        assert!(generate_surface_with(&params).is_err());
    }

    #[test]
    fn largest_drawable_grid_is_accepted() {
        // 2 columns (0 and 360) x z-steps x 2 stays just under i32::MAX.
        let params = SurfaceParams {
            u_step_degrees: 360.0,
            z_scale: 268_435_455,
        };
        assert_eq!(params.vertex_count(), Some(2 * 536_870_911 * 2));
        assert!(params.vertex_count().unwrap() <= MAX_DRAW_VERTICES);
    }
}
