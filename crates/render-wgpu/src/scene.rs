use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct SceneVertex {
    pub position: [f32; 3],
    pub colour: [f32; 3],
}

const FLOOR_HALF_SIZE: f32 = 5.0;
const FLOOR_HEIGHT: f32 = -2.5;
const CUBE_HALF_SIZE: f32 = 1.0;

const GREY: [f32; 3] = [0.5, 0.5, 0.5];

fn v(position: [f32; 3], colour: [f32; 3]) -> SceneVertex {
    SceneVertex { position, colour }
}

/// Triangle list for the floor quad followed by the cube, counter-clockwise
/// when seen from outside.
pub(crate) fn scene_mesh() -> Vec<SceneVertex> {
    let (f, h) = (FLOOR_HALF_SIZE, FLOOR_HEIGHT);
    let floor = [
        v([-f, h, -f], GREY),
        v([-f, h, f], GREY),
        v([f, h, f], GREY),
        v([f, h, -f], GREY),
    ];

    let c = CUBE_HALF_SIZE;
    #[rustfmt::skip]
    let cube = [
        v([-c,  c, -c], [1.0, 0.0, 0.0]), // red
        v([-c,  c,  c], [0.0, 1.0, 0.0]), // green
        v([ c,  c,  c], [0.0, 0.0, 1.0]), // blue
        v([ c,  c, -c], [1.0, 1.0, 0.0]), // yellow
        v([-c, -c, -c], [0.0, 1.0, 1.0]), // cyan
        v([-c, -c,  c], [1.0, 0.0, 1.0]), // magenta
        v([ c, -c,  c], [0.0, 0.0, 0.0]), // black
        v([ c, -c, -c], [1.0, 1.0, 1.0]), // white
    ];

    #[rustfmt::skip]
    const CUBE_INDICES: [usize; 36] = [
        0, 1, 2, 0, 2, 3, // top
        4, 6, 5, 4, 7, 6, // bottom
        0, 4, 5, 0, 5, 1, // -x
        1, 5, 6, 1, 6, 2, // +z
        2, 6, 7, 2, 7, 3, // +x
        3, 7, 4, 3, 4, 0, // -z
    ];

    let mut mesh = Vec::with_capacity(6 + CUBE_INDICES.len());
    mesh.extend([0, 1, 2, 0, 2, 3].map(|i| floor[i]));
    mesh.extend(CUBE_INDICES.map(|i| cube[i]));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn triangle_normal(tri: &[SceneVertex]) -> Vec3 {
        let a = Vec3::from(tri[0].position);
        let b = Vec3::from(tri[1].position);
        let c = Vec3::from(tri[2].position);
        (b - a).cross(c - a)
    }

    #[test]
    fn mesh_is_floor_plus_cube() {
        let mesh = scene_mesh();
        assert_eq!(mesh.len(), 42);
        assert!(mesh[..6].iter().all(|v| v.position[1] == FLOOR_HEIGHT));
    }

    #[test]
    fn floor_faces_up() {
        let mesh = scene_mesh();
        for tri in mesh[..6].chunks(3) {
            assert!(triangle_normal(tri).y > 0.0);
        }
    }

    #[test]
    fn cube_faces_point_outwards() {
        let mesh = scene_mesh();
        for tri in mesh[6..].chunks(3) {
            let centroid = tri
                .iter()
                .map(|v| Vec3::from(v.position))
                .sum::<Vec3>()
                / 3.0;
            assert!(triangle_normal(tri).dot(centroid) > 0.0);
        }
    }
}
