//! # Primitive Shape Generation
//!
//! This module contains functions to generate the shapes used by the demos.
//! Shapes carry per-vertex colors; none of them need normals or UVs.

use super::{GeometryData, Topology};
use std::f32::consts::TAU;

pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Apex shared by every triangle of a cone fan.
pub const CONE_APEX: [f32; 3] = [0.0, 0.0, 1.0];

/// Generate a cone as a fan of `triangle_count` triangles
///
/// Each triangle is `apex, rim(i), rim(i + 1)` with the apex at `(0, 0, 1)`
/// and the rim on the circle of `radius` in the z = 0 plane. `[0, 2π)` is
/// split into exactly `triangle_count` equal arcs and the last triangle ends
/// on the first rim point, so the fan closes.
///
/// Viewed from above with a depth test, overlapping cones leave the nearest
/// apex visible, which is what the Voronoi demo relies on.
///
/// A `triangle_count` of zero yields an empty mesh.
pub fn generate_cone_fan(triangle_count: usize, radius: f32) -> GeometryData {
    let mut data = GeometryData::new(Topology::TriangleList);
    if triangle_count == 0 {
        return data;
    }

    let rim = |k: usize| {
        let angle = (k % triangle_count) as f32 * TAU / triangle_count as f32;
        [radius * angle.cos(), radius * angle.sin(), 0.0]
    };

    data.positions.reserve(triangle_count * 3);
    data.colors.reserve(triangle_count * 3);
    for i in 0..triangle_count {
        data.push_vertex(CONE_APEX, WHITE);
        data.push_vertex(rim(i), WHITE);
        data.push_vertex(rim(i + 1), WHITE);
    }

    data
}

/// Generate a single line from `start` to `end`
pub fn generate_line_segment(start: [f32; 3], end: [f32; 3]) -> GeometryData {
    let mut data = GeometryData::new(Topology::LineList);
    data.push_vertex(start, WHITE);
    data.push_vertex(end, WHITE);
    data
}

/// Generate a square floor at y = 0
///
/// The quad spans `[-half_extent, half_extent]` on x and z and faces +y.
/// Corners get distinct muted colors so the ground reads as a gradient.
pub fn generate_floor(half_extent: f32) -> GeometryData {
    let h = half_extent;
    let mut data = GeometryData::new(Topology::TriangleList);

    data.push_vertex([-h, 0.0, -h], [0.45, 0.55, 0.35, 1.0]);
    data.push_vertex([-h, 0.0, h], [0.35, 0.45, 0.30, 1.0]);
    data.push_vertex([h, 0.0, h], [0.40, 0.50, 0.35, 1.0]);
    data.push_vertex([h, 0.0, -h], [0.50, 0.55, 0.40, 1.0]);

    // counter-clockwise seen from above
    data.indices = vec![0, 1, 2, 0, 2, 3];
    data
}

/// Generate the fuselage of the toy plane
///
/// A double pyramid along y: nose at `(0, 0.5, 0)`, tail at `(0, -0.5, 0)`
/// and a square cross-section of radius 0.1 at y = 0.1.
pub fn generate_plane_body() -> GeometryData {
    let mut data = GeometryData::new(Topology::TriangleList);

    data.push_vertex([0.0, 0.5, 0.0], [0.9, 0.9, 0.9, 1.0]);
    data.push_vertex([0.0, -0.5, 0.0], [0.5, 0.5, 0.55, 1.0]);

    let ring = [[0.1, 0.1, 0.0], [0.0, 0.1, 0.1], [-0.1, 0.1, 0.0], [0.0, 0.1, -0.1]];
    for position in ring {
        data.push_vertex(position, [0.7, 0.2, 0.2, 1.0]);
    }

    for i in 0..4u32 {
        let current = 2 + i;
        let next = 2 + (i + 1) % 4;
        // nose cone, then tail cone with reversed winding
        data.indices.extend_from_slice(&[0, next, current]);
        data.indices.extend_from_slice(&[1, current, next]);
    }

    data
}

/// Generate one wing as a flat quad extending along +x
///
/// The root sits on the fuselage axis; mirror it with a negative x scale for
/// the other side.
pub fn generate_plane_wing() -> GeometryData {
    let mut data = GeometryData::new(Topology::TriangleList);

    data.push_vertex([0.0, 0.2, 0.0], [0.8, 0.8, 0.2, 1.0]);
    data.push_vertex([0.0, -0.2, 0.0], [0.8, 0.8, 0.2, 1.0]);
    data.push_vertex([0.8, -0.1, 0.0], [0.6, 0.6, 0.1, 1.0]);
    data.push_vertex([0.8, 0.0, 0.0], [0.6, 0.6, 0.1, 1.0]);

    data.indices = vec![0, 1, 2, 0, 2, 3];
    data
}

/// Generate a two-blade propeller in the XY plane
pub fn generate_plane_propeller() -> GeometryData {
    let mut data = GeometryData::new(Topology::TriangleList);
    let blade = [0.25, 0.25, 0.25, 1.0];

    data.push_vertex([0.0, 0.0, 0.0], [0.1, 0.1, 0.1, 1.0]);
    data.push_vertex([0.08, 0.5, 0.0], blade);
    data.push_vertex([-0.08, 0.5, 0.0], blade);
    data.push_vertex([-0.08, -0.5, 0.0], blade);
    data.push_vertex([0.08, -0.5, 0.0], blade);

    data.indices = vec![0, 1, 2, 0, 3, 4];
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn cone_fan_has_three_vertices_per_triangle() {
        for n in [1, 3, 8, 360] {
            let cone = generate_cone_fan(n, 3.0);
            assert_eq!(cone.vertex_count(), 3 * n);
            assert_eq!(cone.primitive_count(), n);
            assert!(!cone.is_indexed());
        }
    }

    #[test]
    fn cone_fan_triangles_start_at_apex() {
        let cone = generate_cone_fan(360, 3.0);
        for triangle in cone.positions.chunks(3) {
            assert_eq!(triangle[0], CONE_APEX);
            assert_eq!(triangle[1][2], 0.0);
            assert_eq!(triangle[2][2], 0.0);
        }
    }

    #[test]
    fn cone_fan_neighbours_share_an_edge() {
        let n = 360;
        let cone = generate_cone_fan(n, 3.0);
        let triangles: Vec<_> = cone.positions.chunks(3).collect();

        for i in 0..n {
            let next = triangles[(i + 1) % n];
            assert!(close(triangles[i][2], next[1]), "gap after triangle {i}");
        }
    }

    #[test]
    fn cone_fan_rim_lies_on_radius() {
        let cone = generate_cone_fan(64, 3.0);
        for position in cone.positions.iter().filter(|p| p[2] == 0.0) {
            let r = (position[0] * position[0] + position[1] * position[1]).sqrt();
            assert!((r - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn zero_triangles_yield_empty_mesh() {
        let cone = generate_cone_fan(0, 3.0);
        assert!(cone.is_empty());
        assert_eq!(cone.element_count(), 0);
    }

    #[test]
    fn line_segment_has_two_vertices() {
        let line = generate_line_segment([0.0, 0.1, 0.0], [0.0, 0.0, 0.0]);
        assert_eq!(line.topology, Topology::LineList);
        assert_eq!(line.positions, vec![[0.0, 0.1, 0.0], [0.0, 0.0, 0.0]]);
        assert_eq!(line.primitive_count(), 1);
    }

    #[test]
    fn indexed_shapes_stay_in_bounds() {
        let shapes = [
            generate_floor(10.0),
            generate_plane_body(),
            generate_plane_wing(),
            generate_plane_propeller(),
        ];

        for shape in shapes {
            assert!(shape.is_indexed());
            assert_eq!(shape.indices.len() % 3, 0);
            assert_eq!(shape.colors.len(), shape.positions.len());
            assert!(shape
                .indices
                .iter()
                .all(|&i| (i as usize) < shape.vertex_count()));
        }
    }

    #[test]
    fn floor_is_flat_and_sized() {
        let floor = generate_floor(5.0);
        assert!(floor.positions.iter().all(|p| p[1] == 0.0));
        assert!(floor.positions.iter().all(|p| p[0].abs() == 5.0 && p[2].abs() == 5.0));
    }

    #[test]
    fn plane_body_spans_unit_length() {
        let body = generate_plane_body();
        assert_eq!(body.primitive_count(), 8);

        let (min, max) = body
            .positions
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p[1]), hi.max(p[1])));
        assert_eq!((min, max), (-0.5, 0.5));
    }
}
