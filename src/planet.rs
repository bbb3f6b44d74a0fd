use crate::color::{ColorGenerator, ColorTable};
use crate::config::{ConfigError, PlanetConfig};
use crate::face::{FaceMesh, TerrainFace};
use crate::shape::ShapeGenerator;
use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

/// Canonical face directions, in up/down/left/right/forward/back order.
pub const FACE_DIRECTIONS: [Vec3; 6] = [
    Vec3::Y,
    Vec3::NEG_Y,
    Vec3::NEG_X,
    Vec3::X,
    Vec3::Z,
    Vec3::NEG_Z,
];

/// Which faces to build during a generation pass. Single-face variants map
/// to [`FACE_DIRECTIONS`] in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceRenderMask {
    #[default]
    All,
    Top,
    Bottom,
    Left,
    Right,
    Front,
    Back,
}

impl FaceRenderMask {
    pub fn renders(&self, face_index: usize) -> bool {
        match self {
            FaceRenderMask::All => true,
            mask => (*mask as usize) - 1 == face_index,
        }
    }
}

/// Owns the six terrain faces and drives the generation passes.
///
/// A full regeneration reconfigures both generators, builds geometry for
/// every visible face (all faces sharing one elevation tracker), forwards
/// the elevation range, rebuilds the color table and finally runs the
/// biome-coordinate pass. The outputs (six [`FaceMesh`] buffers, one
/// [`ColorTable`] and the elevation range) are plain data for an external
/// renderer.
pub struct PlanetAssembler {
    config: PlanetConfig,
    shape_generator: ShapeGenerator,
    color_generator: ColorGenerator,
    faces: [TerrainFace; 6],
}

impl PlanetAssembler {
    pub fn new(config: PlanetConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let shape_generator = ShapeGenerator::new(&config.shape);
        let color_generator = ColorGenerator::new(&config.color);
        let faces = FACE_DIRECTIONS.map(|direction| TerrainFace::new(config.resolution, direction));
        Ok(Self {
            config,
            shape_generator,
            color_generator,
            faces,
        })
    }

    /// Replace the configuration, rebuilding faces when the resolution
    /// changed. Does not regenerate; call one of the regenerate entry
    /// points afterwards.
    pub fn set_config(&mut self, config: PlanetConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config.resolution != self.config.resolution {
            self.faces =
                FACE_DIRECTIONS.map(|direction| TerrainFace::new(config.resolution, direction));
        }
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &PlanetConfig {
        &self.config
    }

    /// Full regeneration: shape pass followed by color pass.
    pub fn regenerate(&mut self) {
        debug!(
            "regenerating planet: resolution {}, {} noise layers, {} biomes",
            self.config.resolution,
            self.config.shape.noise_layers.len(),
            self.config.color.biomes.len()
        );
        self.shape_generator.reconfigure(&self.config.shape);
        self.color_generator.reconfigure(&self.config.color);
        self.generate_mesh();
        self.generate_colors();
    }

    /// Shape-only regeneration, for when only the shape settings changed.
    pub fn regenerate_shape(&mut self) {
        self.shape_generator.reconfigure(&self.config.shape);
        self.generate_mesh();
    }

    /// Color-only regeneration, for when only the color settings changed.
    pub fn regenerate_colors(&mut self) {
        self.color_generator.reconfigure(&self.config.color);
        self.generate_colors();
    }

    fn generate_mesh(&mut self) {
        for (i, face) in self.faces.iter_mut().enumerate() {
            if self.config.face_mask.renders(i) {
                face.construct_mesh(&mut self.shape_generator);
            }
        }
        self.color_generator
            .set_elevation_range(&self.shape_generator.elevation_min_max);
    }

    fn generate_colors(&mut self) {
        self.color_generator.build_color_table();
        for (i, face) in self.faces.iter_mut().enumerate() {
            if self.config.face_mask.renders(i) {
                face.update_biome_uvs(&self.color_generator);
            }
        }
    }

    pub fn faces(&self) -> &[TerrainFace; 6] {
        &self.faces
    }

    pub fn face_mesh(&self, face_index: usize) -> &FaceMesh {
        self.faces[face_index].mesh()
    }

    pub fn color_table(&self) -> &ColorTable {
        self.color_generator.color_table()
    }

    /// Elevation (min, max) of the last shape pass, for shader-space
    /// normalization by the consumer.
    pub fn elevation_range(&self) -> (f32, f32) {
        self.color_generator.elevation_range()
    }
}
