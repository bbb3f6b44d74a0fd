use crate::config::{NoiseConfig, RigidNoiseConfig, SimpleNoiseConfig};
use glam::Vec3;
use noise::{NoiseFn, Perlin};

/// Scalar noise field evaluated at points on the unit sphere.
///
/// Enum dispatch over the two filter variants; construction from a
/// [`NoiseConfig`] is the factory. Evaluation is a pure function of
/// (point, config), so identical configs always reproduce identical fields.
#[derive(Debug, Clone)]
pub enum NoiseFilter {
    Simple(SimpleNoiseFilter),
    Rigid(RigidNoiseFilter),
}

impl NoiseFilter {
    pub fn from_config(config: &NoiseConfig) -> Self {
        match config {
            NoiseConfig::Simple(simple) => NoiseFilter::Simple(SimpleNoiseFilter::new(simple)),
            NoiseConfig::Rigid(rigid) => NoiseFilter::Rigid(RigidNoiseFilter::new(rigid)),
        }
    }

    pub fn evaluate(&self, point: Vec3) -> f32 {
        match self {
            NoiseFilter::Simple(filter) => filter.evaluate(point),
            NoiseFilter::Rigid(filter) => filter.evaluate(point),
        }
    }
}

fn sample(perlin: &Perlin, point: Vec3) -> f32 {
    perlin.get([point.x as f64, point.y as f64, point.z as f64]) as f32
}

/// Plain fractal noise: octaves of value noise remapped to [0, 1] and summed
/// with decaying amplitude. The first octave's value is used as a floor so
/// the mean level of the field sits at zero.
#[derive(Debug, Clone)]
pub struct SimpleNoiseFilter {
    perlin: Perlin,
    config: SimpleNoiseConfig,
}

impl SimpleNoiseFilter {
    pub fn new(config: &SimpleNoiseConfig) -> Self {
        Self {
            perlin: Perlin::new(config.seed),
            config: config.clone(),
        }
    }

    pub fn evaluate(&self, point: Vec3) -> f32 {
        let mut noise_value = 0.0;
        let mut frequency = self.config.base_roughness;
        let mut amplitude = 1.0;
        let mut min_value = 0.0;

        for i in 0..self.config.num_layers {
            let raw = sample(&self.perlin, point * frequency + self.config.center);
            let v = (raw + 1.0) * 0.5;
            if i == 0 {
                // First-octave baseline, taken at amplitude 1.
                min_value = v;
            }
            noise_value += v * amplitude;
            frequency *= self.config.roughness;
            amplitude *= self.config.persistence;
        }

        (noise_value - min_value).max(0.0) * self.config.strength
    }
}

/// Ridged fractal noise: each octave is inverted around its absolute value
/// and squared, then weighted by the previous octave so detail accumulates
/// along existing ridge lines.
#[derive(Debug, Clone)]
pub struct RigidNoiseFilter {
    perlin: Perlin,
    config: RigidNoiseConfig,
}

impl RigidNoiseFilter {
    pub fn new(config: &RigidNoiseConfig) -> Self {
        Self {
            perlin: Perlin::new(config.seed),
            config: config.clone(),
        }
    }

    pub fn evaluate(&self, point: Vec3) -> f32 {
        let mut noise_value = 0.0;
        let mut frequency = self.config.base_roughness;
        let mut amplitude = 1.0;
        let mut weight = 1.0;

        for _ in 0..self.config.num_layers {
            let raw = sample(&self.perlin, point * frequency + self.config.center);
            let mut v = 1.0 - raw.abs();
            v *= v;
            v *= weight;
            weight = (v * self.config.weight_multiplier).clamp(0.0, 1.0);

            noise_value += v * amplitude;
            frequency *= self.config.roughness;
            amplitude *= self.config.persistence;
        }

        (noise_value - self.config.min_value).max(0.0) * self.config.strength
    }
}
