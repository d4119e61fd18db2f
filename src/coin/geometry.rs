use std::f32::consts::TAU;

use crate::renderer::vertex::Vertex;

/// Which part of the coin a range of indices belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoinPart {
    Rim,
    Heads,
    Tails,
}

impl CoinPart {
    pub const ALL: [CoinPart; 3] = [CoinPart::Rim, CoinPart::Heads, CoinPart::Tails];
}

#[derive(Debug, Clone)]
pub struct MeshGroup {
    pub part: CoinPart,
    pub index_start: u32,
    pub index_count: u32,
}

#[derive(Debug, Clone, Default)]
pub struct CoinMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Rim, heads, tails, in that order.
    pub groups: Vec<MeshGroup>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderParams {
    pub radius: f32,
    pub thickness: f32,
    pub segments: u32,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            radius: 0.5,
            thickness: 0.05,
            segments: 64,
        }
    }
}

/// Build a Y-axis cylinder centered on the origin.
///
/// Heads is the +Y cap and tails the -Y cap. Cap UVs map the disk onto the
/// unit square with v growing downward, matching image row order.
pub fn build_cylinder(params: &CylinderParams) -> CoinMesh {
    let segments = params.segments.max(3);
    let half = params.thickness * 0.5;
    let r = params.radius;

    let mut mesh = CoinMesh::default();

    // Rim
    let index_start = mesh.indices.len() as u32;
    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let (sin, cos) = (u * TAU).sin_cos();
        let normal = [sin, 0.0, cos];
        for (y, v) in [(half, 0.0), (-half, 1.0)] {
            mesh.vertices.push(Vertex::new([r * sin, y, r * cos], normal, [u, v]));
        }
    }
    for i in 0..segments {
        let top = i * 2;
        let bottom = top + 1;
        let next_top = top + 2;
        let next_bottom = top + 3;
        mesh.indices
            .extend_from_slice(&[top, bottom, next_top, bottom, next_bottom, next_top]);
    }
    mesh.groups.push(MeshGroup {
        part: CoinPart::Rim,
        index_start,
        index_count: mesh.indices.len() as u32 - index_start,
    });

    push_cap(&mut mesh, CoinPart::Heads, half, 1.0, r, segments);
    push_cap(&mut mesh, CoinPart::Tails, -half, -1.0, r, segments);

    mesh
}

fn push_cap(mesh: &mut CoinMesh, part: CoinPart, y: f32, sign: f32, r: f32, segments: u32) {
    let index_start = mesh.indices.len() as u32;
    let normal = [0.0, sign, 0.0];

    let center = mesh.vertices.len() as u32;
    mesh.vertices.push(Vertex::new([0.0, y, 0.0], normal, [0.5, 0.5]));

    for i in 0..=segments {
        let (sin, cos) = (i as f32 / segments as f32 * TAU).sin_cos();
        let uv = [cos * 0.5 + 0.5, 0.5 - sin * 0.5 * sign];
        mesh.vertices.push(Vertex::new([r * sin, y, r * cos], normal, uv));
    }

    for i in 0..segments {
        let a = center + 1 + i;
        let b = a + 1;
        if sign > 0.0 {
            mesh.indices.extend_from_slice(&[center, a, b]);
        } else {
            mesh.indices.extend_from_slice(&[center, b, a]);
        }
    }

    mesh.groups.push(MeshGroup {
        part,
        index_start,
        index_count: mesh.indices.len() as u32 - index_start,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_coin_layout() {
        let mesh = build_cylinder(&CylinderParams::default());
        let parts: Vec<_> = mesh.groups.iter().map(|g| g.part).collect();
        assert_eq!(parts, vec![CoinPart::Rim, CoinPart::Heads, CoinPart::Tails]);

        // 65 rim columns of two, plus center and 65 ring vertices per cap
        assert_eq!(mesh.vertices.len(), 65 * 2 + 2 * 66);
        assert_eq!(mesh.groups[0].index_count, 64 * 6);
        assert_eq!(mesh.groups[1].index_count, 64 * 3);
        assert_eq!(mesh.groups[2].index_count, 64 * 3);
        assert_eq!(mesh.indices.len(), 64 * 12);
    }

    #[test]
    fn groups_are_contiguous() {
        let mesh = build_cylinder(&CylinderParams::default());
        let mut next = 0;
        for group in &mesh.groups {
            assert_eq!(group.index_start, next);
            next += group.index_count;
        }
        assert_eq!(next as usize, mesh.indices.len());
    }

    #[test]
    fn indices_are_in_bounds() {
        let mesh = build_cylinder(&CylinderParams {
            segments: 5,
            ..CylinderParams::default()
        });
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn vertices_lie_on_the_coin() {
        let params = CylinderParams::default();
        let mesh = build_cylinder(&params);
        for v in &mesh.vertices {
            let [x, y, z] = v.position;
            assert!((x * x + z * z).sqrt() <= params.radius + 1e-5);
            assert!((y.abs() - params.thickness * 0.5).abs() < 1e-6);
            assert!(v.uv.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn caps_face_outward() {
        let mesh = build_cylinder(&CylinderParams::default());
        let heads = &mesh.groups[1];
        let tails = &mesh.groups[2];
        let first = |g: &MeshGroup| mesh.vertices[mesh.indices[g.index_start as usize] as usize];
        assert_eq!(first(heads).normal, [0.0, 1.0, 0.0]);
        assert_eq!(first(tails).normal, [0.0, -1.0, 0.0]);
    }

    #[test]
    fn too_few_segments_are_raised() {
        let mesh = build_cylinder(&CylinderParams {
            segments: 1,
            ..CylinderParams::default()
        });
        assert_eq!(mesh.groups[1].index_count, 3 * 3);
    }
}
