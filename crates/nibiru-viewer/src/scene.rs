//! Demo scene: a wireframe sphere and two plane grids, all pushed far from
//! the origin by a shared planetary-scale offset.
//!
//! The meshes themselves stay in local coordinates near zero; only the
//! entity transforms carry the large offset. With the double-precision MVP
//! path the scene is rock solid; with `NIBIRU_PRECISION=single` it visibly
//! jitters, especially while the orbit runs.

use std::f32::consts::{PI, TAU};

use nibiru_engine::geometry::LineMeshData;
use nibiru_engine::math::Vec3;

/// Shared large offset applied to every entity and the camera.
pub const MEGA_OFFSET: Vec3 = Vec3::new(1_089_205.0, 932_789.0, 2_009_853.0);

/// Uniform name the MVP is delivered under.
pub const MVP_UNIFORM: &str = "my_mvp";

/// Off-scene parking spot for the reserved dummy vertex.
const DUMMY: [f32; 3] = [0.0, -1.0, 0.0];

pub struct SceneEntity {
    pub label: &'static str,
    pub mesh: LineMeshData,
    pub color: [f32; 4],
    /// World-space position, mega offset included.
    pub position: Vec3,
}

/// A sphere partially intersected by two plane grids, the classic
/// large-coordinate jitter demonstration scene.
pub fn demo_scene() -> Vec<SceneEntity> {
    vec![
        SceneEntity {
            label: "sphere",
            mesh: wireframe_sphere(2.0, 8, 24),
            color: [0.9, 0.2, 0.2, 1.0],
            position: MEGA_OFFSET,
        },
        SceneEntity {
            label: "plane-a",
            mesh: plane_grid(1.0, 1.0, 4),
            color: [0.2, 0.8, 0.2, 1.0],
            position: MEGA_OFFSET + Vec3::new(-0.51, 1.98, 0.0),
        },
        SceneEntity {
            label: "plane-b",
            mesh: plane_grid(1.0, 1.0, 4),
            color: [0.2, 0.4, 0.9, 1.0],
            position: MEGA_OFFSET + Vec3::new(0.51, 1.98, 0.0),
        },
    ]
}

/// Latitude rings plus longitude arcs, one strip each.
fn wireframe_sphere(radius: f32, rings: u32, segments: u32) -> LineMeshData {
    let mut mesh = LineMeshData::new(DUMMY);

    for ring in 1..rings {
        let phi = PI * ring as f32 / rings as f32;
        let y = phi.cos() * radius;
        let r = phi.sin() * radius;
        let points: Vec<[f32; 3]> = (0..=segments)
            .map(|s| {
                let theta = TAU * s as f32 / segments as f32;
                [theta.cos() * r, y, theta.sin() * r]
            })
            .collect();
        mesh.add_strip(&points);
    }

    for s in 0..segments {
        let theta = TAU * s as f32 / segments as f32;
        let points: Vec<[f32; 3]> = (0..=rings)
            .map(|ring| {
                let phi = PI * ring as f32 / rings as f32;
                let r = phi.sin() * radius;
                [theta.cos() * r, phi.cos() * radius, theta.sin() * r]
            })
            .collect();
        mesh.add_strip(&points);
    }

    mesh
}

/// Grid of line strips in the XZ plane, centered on the local origin.
fn plane_grid(width: f32, depth: f32, cells: u32) -> LineMeshData {
    let mut mesh = LineMeshData::new(DUMMY);

    for i in 0..=cells {
        let x = -width / 2.0 + width * i as f32 / cells as f32;
        mesh.add_strip(&[[x, 0.0, -depth / 2.0], [x, 0.0, depth / 2.0]]);
    }
    for i in 0..=cells {
        let z = -depth / 2.0 + depth * i as f32 / cells as f32;
        mesh.add_strip(&[[-width / 2.0, 0.0, z], [width / 2.0, 0.0, z]]);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use nibiru_engine::geometry::RESTART_INDEX;

    #[test]
    fn demo_scene_has_three_entities() {
        let scene = demo_scene();
        assert_eq!(scene.len(), 3);
        for entity in &scene {
            assert!(entity.mesh.index_count() > 0, "{} is empty", entity.label);
        }
    }

    #[test]
    fn plane_grid_strip_count() {
        let mesh = plane_grid(1.0, 1.0, 4);
        // 5 strips per axis, 2 points + 1 restart each.
        assert_eq!(mesh.index_count(), 10 * 3);
        let restarts = mesh.indices().iter().filter(|&&i| i == RESTART_INDEX).count();
        assert_eq!(restarts, 10);
    }

    #[test]
    fn sphere_vertices_lie_on_the_sphere() {
        let mesh = wireframe_sphere(2.0, 8, 24);
        // Skip the dummy slot.
        for p in &mesh.positions()[1..] {
            let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((len - 2.0).abs() < 1e-4, "vertex off the sphere: {p:?}");
        }
    }
}
