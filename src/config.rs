use crate::planet::FaceRenderMask;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Smallest grid resolution that still produces triangles.
pub const MIN_RESOLUTION: u32 = 2;
/// Largest supported grid resolution per face.
pub const MAX_RESOLUTION: u32 = 255;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("planet radius must be positive, got {0}")]
    NonPositiveRadius(f32),
    #[error("face resolution must be within {MIN_RESOLUTION}..={MAX_RESOLUTION}, got {0}")]
    ResolutionOutOfRange(u32),
    #[error("noise layer {layer}: {problem}")]
    InvalidNoiseLayer { layer: usize, problem: String },
}

/// Noise filter configuration, tagged by filter variant.
///
/// `Simple` is plain fractal value noise; `Rigid` inverts and squares each
/// octave to carve sharp ridge lines. An unknown `filter` tag in a config
/// file fails TOML deserialization and surfaces as [`ConfigError::Parse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "filter", rename_all = "snake_case")]
pub enum NoiseConfig {
    Simple(SimpleNoiseConfig),
    Rigid(RigidNoiseConfig),
}

impl NoiseConfig {
    fn check(&self, layer: usize) -> Result<(), ConfigError> {
        let (persistence, roughness) = match self {
            NoiseConfig::Simple(c) => (c.persistence, c.roughness),
            NoiseConfig::Rigid(c) => (c.persistence, c.roughness),
        };
        if !(persistence >= 0.0) {
            return Err(ConfigError::InvalidNoiseLayer {
                layer,
                problem: format!("persistence must be non-negative, got {persistence}"),
            });
        }
        if !(roughness >= 0.0) {
            return Err(ConfigError::InvalidNoiseLayer {
                layer,
                problem: format!("roughness must be non-negative, got {roughness}"),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleNoiseConfig {
    pub seed: u32,
    pub strength: f32,
    pub num_layers: u32,
    /// Frequency of the first octave.
    pub base_roughness: f32,
    /// Frequency multiplier per octave.
    pub roughness: f32,
    /// Amplitude decay per octave.
    pub persistence: f32,
    /// Offset added to the sample position, shifting the noise field.
    pub center: Vec3,
}

impl Default for SimpleNoiseConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            strength: 1.0,
            num_layers: 4,
            base_roughness: 1.0,
            roughness: 2.0,
            persistence: 0.5,
            center: Vec3::ZERO,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidNoiseConfig {
    pub seed: u32,
    pub strength: f32,
    pub num_layers: u32,
    pub base_roughness: f32,
    pub roughness: f32,
    pub persistence: f32,
    pub center: Vec3,
    /// Each octave's weight is derived from the previous octave's value
    /// scaled by this factor, concentrating detail on existing ridges.
    pub weight_multiplier: f32,
    /// Floor subtracted from the octave sum before scaling by strength.
    pub min_value: f32,
}

impl Default for RigidNoiseConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            strength: 1.0,
            num_layers: 4,
            base_roughness: 1.5,
            roughness: 2.0,
            persistence: 0.5,
            center: Vec3::ZERO,
            weight_multiplier: 0.8,
            min_value: 0.0,
        }
    }
}

/// One entry in the ordered noise layer stack. Layer 0 doubles as the mask
/// source for layers that set `use_first_layer_as_mask`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseLayerConfig {
    pub enabled: bool,
    pub use_first_layer_as_mask: bool,
    pub noise: NoiseConfig,
}

impl Default for NoiseLayerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            use_first_layer_as_mask: false,
            noise: NoiseConfig::Simple(SimpleNoiseConfig::default()),
        }
    }
}

/// Shape of the planet: radius plus the ordered noise layer stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeConfig {
    pub planet_radius: f32,
    pub noise_layers: Vec<NoiseLayerConfig>,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            planet_radius: 1.0,
            noise_layers: vec![
                NoiseLayerConfig {
                    enabled: true,
                    use_first_layer_as_mask: false,
                    noise: NoiseConfig::Simple(SimpleNoiseConfig {
                        strength: 0.15,
                        num_layers: 4,
                        base_roughness: 1.2,
                        ..SimpleNoiseConfig::default()
                    }),
                },
                NoiseLayerConfig {
                    enabled: true,
                    use_first_layer_as_mask: true,
                    noise: NoiseConfig::Rigid(RigidNoiseConfig {
                        seed: 1,
                        strength: 0.6,
                        num_layers: 5,
                        base_roughness: 2.0,
                        ..RigidNoiseConfig::default()
                    }),
                },
            ],
        }
    }
}

impl ShapeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.planet_radius > 0.0) {
            return Err(ConfigError::NonPositiveRadius(self.planet_radius));
        }
        for (i, layer) in self.noise_layers.iter().enumerate() {
            layer.noise.check(i)?;
        }
        Ok(())
    }
}

/// A color stop along a gradient, position in [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GradientStop {
    pub position: f32,
    pub color: [f32; 4],
}

/// Piecewise-linear color gradient over [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gradient {
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    pub fn new(stops: Vec<GradientStop>) -> Self {
        Self { stops }
    }

    /// Single-color gradient.
    pub fn solid(color: [f32; 4]) -> Self {
        Self {
            stops: vec![GradientStop {
                position: 0.0,
                color,
            }],
        }
    }

    /// Sample the gradient at `t`, clamping outside [0, 1] and linearly
    /// interpolating between the two surrounding stops. An empty gradient
    /// evaluates to transparent black.
    pub fn evaluate(&self, t: f32) -> [f32; 4] {
        let Some(first) = self.stops.first() else {
            return [0.0; 4];
        };
        if t <= first.position {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.position {
                let span = b.position - a.position;
                if span <= f32::EPSILON {
                    return b.color;
                }
                let f = (t - a.position) / span;
                return [
                    a.color[0] + (b.color[0] - a.color[0]) * f,
                    a.color[1] + (b.color[1] - a.color[1]) * f,
                    a.color[2] + (b.color[2] - a.color[2]) * f,
                    a.color[3] + (b.color[3] - a.color[3]) * f,
                ];
            }
        }
        self.stops[self.stops.len() - 1].color
    }
}

/// One biome band: its terrain gradient, a tint blended over that gradient,
/// and the latitude fraction at which the band starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiomeConfig {
    pub gradient: Gradient,
    pub tint: [f32; 4],
    /// Latitude fraction in [0, 1] where this biome begins.
    pub start_height: f32,
    /// How strongly the tint overrides the gradient color, in [0, 1].
    pub tint_percent: f32,
}

/// Color settings: ocean gradient, ordered biome bands, and the noise that
/// perturbs the latitude used for biome classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    pub ocean_gradient: Gradient,
    pub biomes: Vec<BiomeConfig>,
    pub noise: NoiseConfig,
    pub noise_offset: f32,
    pub noise_strength: f32,
    /// Width of the smoothing band between adjacent biomes, in [0, 1].
    pub blend_amount: f32,
}

impl Default for ColorConfig {
    fn default() -> Self {
        let ocean = Gradient::new(vec![
            GradientStop {
                position: 0.0,
                color: [0.02, 0.05, 0.25, 1.0],
            },
            GradientStop {
                position: 1.0,
                color: [0.12, 0.35, 0.60, 1.0],
            },
        ]);
        let land = |low: [f32; 4], high: [f32; 4]| {
            Gradient::new(vec![
                GradientStop {
                    position: 0.0,
                    color: low,
                },
                GradientStop {
                    position: 0.6,
                    color: high,
                },
                GradientStop {
                    position: 1.0,
                    color: [0.95, 0.95, 1.0, 1.0],
                },
            ])
        };
        Self {
            ocean_gradient: ocean,
            biomes: vec![
                BiomeConfig {
                    gradient: land([0.85, 0.90, 0.95, 1.0], [0.70, 0.75, 0.80, 1.0]),
                    tint: [1.0, 1.0, 1.0, 1.0],
                    start_height: 0.0,
                    tint_percent: 0.1,
                },
                BiomeConfig {
                    gradient: land([0.35, 0.50, 0.18, 1.0], [0.30, 0.25, 0.15, 1.0]),
                    tint: [0.2, 0.4, 0.1, 1.0],
                    start_height: 0.3,
                    tint_percent: 0.0,
                },
                BiomeConfig {
                    gradient: land([0.80, 0.70, 0.40, 1.0], [0.45, 0.35, 0.20, 1.0]),
                    tint: [0.9, 0.7, 0.3, 1.0],
                    start_height: 0.65,
                    tint_percent: 0.15,
                },
            ],
            noise: NoiseConfig::Simple(SimpleNoiseConfig {
                seed: 7,
                strength: 1.0,
                num_layers: 3,
                base_roughness: 1.0,
                roughness: 2.2,
                persistence: 0.5,
                center: Vec3::ZERO,
            }),
            noise_offset: 0.55,
            noise_strength: 0.1,
            blend_amount: 0.2,
        }
    }
}

impl ColorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.noise.check(0)
    }
}

/// Top-level planet configuration: grid resolution, which faces to build,
/// and the shape/color settings objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetConfig {
    pub resolution: u32,
    pub face_mask: FaceRenderMask,
    pub shape: ShapeConfig,
    pub color: ColorConfig,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            resolution: 10,
            face_mask: FaceRenderMask::All,
            shape: ShapeConfig::default(),
            color: ColorConfig::default(),
        }
    }
}

impl PlanetConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&self.resolution) {
            return Err(ConfigError::ResolutionOutOfRange(self.resolution));
        }
        self.shape.validate()?;
        self.color.validate()?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: PlanetConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        PlanetConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_non_positive_radius() {
        let mut config = PlanetConfig::default();
        config.shape.planet_radius = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveRadius(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_resolution() {
        let mut config = PlanetConfig::default();
        config.resolution = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ResolutionOutOfRange(1))
        ));
        config.resolution = 256;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ResolutionOutOfRange(256))
        ));
    }

    #[test]
    fn rejects_negative_persistence() {
        let mut config = PlanetConfig::default();
        if let NoiseConfig::Simple(simple) = &mut config.shape.noise_layers[0].noise {
            simple.persistence = -0.5;
        }
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidNoiseLayer { layer: 0, .. })
        ));
    }

    #[test]
    fn toml_round_trip_preserves_layers() {
        let config = PlanetConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: PlanetConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.resolution, config.resolution);
        assert_eq!(back.shape.noise_layers.len(), config.shape.noise_layers.len());
        assert_eq!(back.color.biomes.len(), config.color.biomes.len());
        assert!(matches!(
            back.shape.noise_layers[1].noise,
            NoiseConfig::Rigid(_)
        ));
    }

    #[test]
    fn unknown_filter_tag_is_a_parse_error() {
        let text = r#"
            resolution = 10
            face_mask = "all"

            [shape]
            planet_radius = 1.0

            [[shape.noise_layers]]
            enabled = true
            use_first_layer_as_mask = false

            [shape.noise_layers.noise]
            filter = "billow"
            seed = 0
            strength = 1.0
            num_layers = 4
            base_roughness = 1.0
            roughness = 2.0
            persistence = 0.5
            center = [0.0, 0.0, 0.0]
        "#;
        assert!(toml::from_str::<PlanetConfig>(text).is_err());
    }

    #[test]
    fn gradient_clamps_and_interpolates() {
        let gradient = Gradient::new(vec![
            GradientStop {
                position: 0.0,
                color: [0.0, 0.0, 0.0, 1.0],
            },
            GradientStop {
                position: 1.0,
                color: [1.0, 0.5, 0.0, 1.0],
            },
        ]);
        assert_eq!(gradient.evaluate(-2.0), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(gradient.evaluate(3.0), [1.0, 0.5, 0.0, 1.0]);
        let mid = gradient.evaluate(0.5);
        assert!((mid[0] - 0.5).abs() < 1e-6);
        assert!((mid[1] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn empty_gradient_evaluates_to_transparent_black() {
        let gradient = Gradient::new(vec![]);
        assert_eq!(gradient.evaluate(0.5), [0.0; 4]);
    }
}
