use crate::color::ColorGenerator;
use crate::shape::ShapeGenerator;
use glam::Vec3;

/// Raw mesh buffers for one cube face, consumable by any rendering engine.
///
/// `uvs[i]` carries auxiliary per-vertex data rather than texture
/// coordinates: `x` is the biome blend fraction, `y` the unscaled
/// elevation. Buffers keep their allocations across regenerations.
#[derive(Debug, Clone, Default)]
pub struct FaceMesh {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

/// One of the six deformed grid faces of the cube sphere.
///
/// A face is a `resolution x resolution` grid on the cube surface; each
/// grid vertex is projected onto the unit sphere by normalization and then
/// displaced by the shared shape generator.
pub struct TerrainFace {
    resolution: u32,
    local_up: Vec3,
    axis_a: Vec3,
    axis_b: Vec3,
    mesh: FaceMesh,
}

impl TerrainFace {
    pub fn new(resolution: u32, local_up: Vec3) -> Self {
        // This axis derivation is shared by all six faces; seams only line
        // up because every face uses the same convention.
        let axis_a = Vec3::new(local_up.y, local_up.z, local_up.x);
        let axis_b = local_up.cross(axis_a);
        Self {
            resolution,
            local_up,
            axis_a,
            axis_b,
            mesh: FaceMesh::default(),
        }
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn local_up(&self) -> Vec3 {
        self.local_up
    }

    pub fn mesh(&self) -> &FaceMesh {
        &self.mesh
    }

    /// Grid vertex projected onto the unit sphere. Both generation passes
    /// derive points through here so biome and elevation data line up per
    /// vertex.
    fn point_on_unit_sphere(&self, x: u32, y: u32) -> Vec3 {
        let inv = 1.0 / (self.resolution.max(2) - 1) as f32;
        let percent_x = x as f32 * inv;
        let percent_y = y as f32 * inv;
        let point_on_unit_cube = self.local_up
            + (percent_x - 0.5) * 2.0 * self.axis_a
            + (percent_y - 0.5) * 2.0 * self.axis_b;
        point_on_unit_cube.normalize()
    }

    /// Build positions, triangle indices and the elevation half of the UV
    /// data. Elevations are recorded into the shape generator's tracker.
    pub fn construct_mesh(&mut self, shape_generator: &mut ShapeGenerator) {
        let resolution = self.resolution as usize;
        let vertex_count = resolution * resolution;

        self.mesh.positions.clear();
        self.mesh.positions.reserve(vertex_count);
        self.mesh.indices.clear();
        if self.mesh.uvs.len() != vertex_count {
            self.mesh.uvs = vec![[0.0; 2]; vertex_count];
        }

        for y in 0..resolution {
            for x in 0..resolution {
                let i = x + y * resolution;
                let point_on_unit_sphere = self.point_on_unit_sphere(x as u32, y as u32);

                let unscaled_elevation = shape_generator.unscaled_elevation(point_on_unit_sphere);
                let position =
                    point_on_unit_sphere * shape_generator.scaled_elevation(unscaled_elevation);
                self.mesh.positions.push(position.to_array());
                self.mesh.uvs[i][1] = unscaled_elevation;

                // Two triangles per quad, skipping the last row and column.
                if x != resolution - 1 && y != resolution - 1 {
                    let i = i as u32;
                    let res = resolution as u32;
                    self.mesh
                        .indices
                        .extend_from_slice(&[i, i + res + 1, i + res, i, i + 1, i + res + 1]);
                }
            }
        }
    }

    /// Second pass: write the biome blend fraction into the UV x channel,
    /// leaving the elevation channel from `construct_mesh` untouched.
    pub fn update_biome_uvs(&mut self, color_generator: &ColorGenerator) {
        let resolution = self.resolution as usize;
        let vertex_count = resolution * resolution;
        if self.mesh.uvs.len() != vertex_count {
            self.mesh.uvs = vec![[0.0; 2]; vertex_count];
        }
        for y in 0..resolution {
            for x in 0..resolution {
                let i = x + y * resolution;
                let point_on_unit_sphere = self.point_on_unit_sphere(x as u32, y as u32);
                self.mesh.uvs[i][0] =
                    color_generator.biome_percent_from_point(point_on_unit_sphere);
            }
        }
    }
}
