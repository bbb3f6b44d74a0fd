use crate::config::ColorConfig;
use crate::minmax::MinMaxTracker;
use crate::noise_filter::NoiseFilter;
use glam::Vec3;
use log::warn;

/// Number of gradient samples per half of a color table row.
pub const TEXTURE_RESOLUTION: usize = 50;

/// 2D color lookup table: one row per biome. Columns `[0, resolution)` hold
/// the ocean gradient, `[resolution, 2*resolution)` the tinted biome
/// gradient. Consumed as texture data by the external renderer.
#[derive(Debug, Clone, Default)]
pub struct ColorTable {
    width: usize,
    height: usize,
    pixels: Vec<[f32; 4]>,
}

impl ColorTable {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> [f32; 4] {
        self.pixels[y * self.width + x]
    }

    /// Row-major pixel data, one `[r, g, b, a]` entry per texel.
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }
}

/// Maps points to a biome blend fraction via noise-perturbed latitude and
/// builds the biome color lookup table.
pub struct ColorGenerator {
    settings: ColorConfig,
    biome_noise_filter: NoiseFilter,
    table: ColorTable,
    elevation_range: (f32, f32),
}

impl ColorGenerator {
    pub fn new(config: &ColorConfig) -> Self {
        if config.biomes.is_empty() {
            warn!("color config has no biomes; the color table will be empty");
        }
        Self {
            settings: config.clone(),
            biome_noise_filter: NoiseFilter::from_config(&config.noise),
            table: ColorTable::new(TEXTURE_RESOLUTION * 2, config.biomes.len()),
            elevation_range: (0.0, 0.0),
        }
    }

    /// Rebuild the biome classification filter; the table is reallocated
    /// only when the biome count changed.
    pub fn reconfigure(&mut self, config: &ColorConfig) {
        if config.biomes.is_empty() {
            warn!("color config has no biomes; the color table will be empty");
        }
        if self.table.height != config.biomes.len() {
            self.table = ColorTable::new(TEXTURE_RESOLUTION * 2, config.biomes.len());
        }
        self.biome_noise_filter = NoiseFilter::from_config(&config.noise);
        self.settings = config.clone();
    }

    /// Store the elevation range of the current pass so the consumer can
    /// normalize vertex elevations against it.
    pub fn set_elevation_range(&mut self, elevation_min_max: &MinMaxTracker) {
        self.elevation_range = (elevation_min_max.min(), elevation_min_max.max());
    }

    pub fn elevation_range(&self) -> (f32, f32) {
        self.elevation_range
    }

    /// Continuous blend fraction in [0, 1] across the ordered biomes for a
    /// point on the unit sphere, smoothed across biome boundaries.
    pub fn biome_percent_from_point(&self, point_on_unit_sphere: Vec3) -> f32 {
        let mut height_percent = (point_on_unit_sphere.y + 1.0) / 2.0;
        height_percent += (self.biome_noise_filter.evaluate(point_on_unit_sphere)
            - self.settings.noise_offset)
            * self.settings.noise_strength;

        let num_biomes = self.settings.biomes.len();
        let blend_range = self.settings.blend_amount / 2.0 + 0.001;

        let mut biome_index = 0.0;
        for (i, biome) in self.settings.biomes.iter().enumerate() {
            let dst = height_percent - biome.start_height;
            let weight = inverse_lerp(-blend_range, blend_range, dst);
            biome_index = biome_index * (1.0 - weight) + i as f32 * weight;
        }

        biome_index / (num_biomes as f32 - 1.0).max(1.0)
    }

    /// Rebuild the color lookup table from the ocean gradient and the
    /// per-biome gradients blended with their tints.
    pub fn build_color_table(&mut self) {
        let resolution = TEXTURE_RESOLUTION;
        for (row, biome) in self.settings.biomes.iter().enumerate() {
            for i in 0..resolution * 2 {
                let color = if i < resolution {
                    self.settings
                        .ocean_gradient
                        .evaluate(i as f32 / (resolution - 1) as f32)
                } else {
                    let gradient_color = biome
                        .gradient
                        .evaluate((i - resolution) as f32 / (resolution - 1) as f32);
                    blend(gradient_color, biome.tint, biome.tint_percent)
                };
                self.table.pixels[row * self.table.width + i] = color;
            }
        }
    }

    pub fn color_table(&self) -> &ColorTable {
        &self.table
    }
}

fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

fn blend(base: [f32; 4], tint: [f32; 4], tint_percent: f32) -> [f32; 4] {
    [
        base[0] * (1.0 - tint_percent) + tint[0] * tint_percent,
        base[1] * (1.0 - tint_percent) + tint[1] * tint_percent,
        base[2] * (1.0 - tint_percent) + tint[2] * tint_percent,
        base[3] * (1.0 - tint_percent) + tint[3] * tint_percent,
    ]
}
