//! Procedural cube-sphere planet mesh generation.
//!
//! Six deformed grid faces are projected onto the unit sphere, displaced by
//! a stack of configurable noise layers and annotated with biome blend
//! coordinates. The outputs are plain mesh buffers and a color lookup
//! table for an external renderer to consume.

pub mod color;
pub mod config;
pub mod face;
pub mod minmax;
pub mod noise_filter;
pub mod planet;
pub mod shape;

pub use color::{ColorGenerator, ColorTable, TEXTURE_RESOLUTION};
pub use config::{
    BiomeConfig, ColorConfig, ConfigError, Gradient, GradientStop, NoiseConfig, NoiseLayerConfig,
    PlanetConfig, RigidNoiseConfig, ShapeConfig, SimpleNoiseConfig,
};
pub use face::{FaceMesh, TerrainFace};
pub use minmax::MinMaxTracker;
pub use noise_filter::NoiseFilter;
pub use planet::{FACE_DIRECTIONS, FaceRenderMask, PlanetAssembler};
pub use shape::ShapeGenerator;
