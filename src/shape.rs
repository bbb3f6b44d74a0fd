use crate::config::ShapeConfig;
use crate::minmax::MinMaxTracker;
use crate::noise_filter::NoiseFilter;
use glam::Vec3;

struct ShapeLayer {
    filter: NoiseFilter,
    enabled: bool,
    use_first_layer_as_mask: bool,
}

/// Combines the weighted/masked noise layer stack into an elevation value
/// per point, tracking the elevation range across all evaluated points.
///
/// One instance is shared by all six terrain faces during a generation pass
/// so every face uses the same elevation scale.
pub struct ShapeGenerator {
    layers: Vec<ShapeLayer>,
    planet_radius: f32,
    pub elevation_min_max: MinMaxTracker,
}

impl ShapeGenerator {
    pub fn new(config: &ShapeConfig) -> Self {
        let mut generator = Self {
            layers: Vec::new(),
            planet_radius: config.planet_radius,
            elevation_min_max: MinMaxTracker::new(),
        };
        generator.reconfigure(config);
        generator
    }

    /// Rebuild the filter stack 1:1 with the config layers and reset the
    /// elevation tracker for a fresh generation pass.
    pub fn reconfigure(&mut self, config: &ShapeConfig) {
        self.planet_radius = config.planet_radius;
        self.layers = config
            .noise_layers
            .iter()
            .map(|layer| ShapeLayer {
                filter: NoiseFilter::from_config(&layer.noise),
                enabled: layer.enabled,
                use_first_layer_as_mask: layer.use_first_layer_as_mask,
            })
            .collect();
        self.elevation_min_max.reset();
    }

    /// Elevation at a point on the unit sphere, before radius scaling and
    /// ocean clamping. The result is recorded into the elevation tracker.
    pub fn unscaled_elevation(&mut self, point_on_unit_sphere: Vec3) -> f32 {
        let mut first_layer_value = 0.0;
        let mut elevation = 0.0;

        if let Some(first) = self.layers.first() {
            first_layer_value = first.filter.evaluate(point_on_unit_sphere);
            if first.enabled {
                elevation = first_layer_value;
            }
        }

        for layer in self.layers.iter().skip(1) {
            // Disabled layers are skipped entirely, not evaluated.
            if layer.enabled {
                let mask = if layer.use_first_layer_as_mask {
                    first_layer_value
                } else {
                    1.0
                };
                elevation += layer.filter.evaluate(point_on_unit_sphere) * mask;
            }
        }

        self.elevation_min_max.add_value(elevation);
        elevation
    }

    /// Distance from the planet center for a given unscaled elevation.
    /// Negative elevations are clamped so the ocean floor sits exactly on
    /// the sphere of radius `planet_radius`.
    pub fn scaled_elevation(&self, unscaled_elevation: f32) -> f32 {
        self.planet_radius * (1.0 + unscaled_elevation.max(0.0))
    }

    pub fn planet_radius(&self) -> f32 {
        self.planet_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NoiseConfig, NoiseLayerConfig, RigidNoiseConfig, SimpleNoiseConfig};

    fn probe_points() -> Vec<Vec3> {
        vec![
            Vec3::Y,
            Vec3::NEG_X,
            Vec3::new(0.5, -0.5, 0.7071).normalize(),
            Vec3::new(-0.2, 0.9, -0.1).normalize(),
        ]
    }

    fn simple_layer(enabled: bool, masked: bool) -> NoiseLayerConfig {
        NoiseLayerConfig {
            enabled,
            use_first_layer_as_mask: masked,
            noise: NoiseConfig::Simple(SimpleNoiseConfig::default()),
        }
    }

    #[test]
    fn no_layers_yields_zero_elevation() {
        let mut generator = ShapeGenerator::new(&ShapeConfig {
            planet_radius: 2.0,
            noise_layers: vec![],
        });
        for p in probe_points() {
            assert_eq!(generator.unscaled_elevation(p), 0.0);
        }
        assert_eq!(generator.elevation_min_max.min(), 0.0);
        assert_eq!(generator.elevation_min_max.max(), 0.0);
    }

    #[test]
    fn disabled_layers_contribute_nothing() {
        let config = ShapeConfig {
            planet_radius: 1.0,
            noise_layers: vec![simple_layer(false, false), simple_layer(false, false)],
        };
        let mut generator = ShapeGenerator::new(&config);
        for p in probe_points() {
            assert_eq!(generator.unscaled_elevation(p), 0.0);
        }
    }

    #[test]
    fn masked_layer_is_scaled_by_first_layer_value() {
        let base = ShapeConfig {
            planet_radius: 1.0,
            noise_layers: vec![simple_layer(true, false)],
        };
        let masked = ShapeConfig {
            planet_radius: 1.0,
            noise_layers: vec![simple_layer(true, false), simple_layer(true, true)],
        };
        let mut first_only = ShapeGenerator::new(&base);
        let mut with_masked = ShapeGenerator::new(&masked);

        for p in probe_points() {
            let first = first_only.unscaled_elevation(p);
            // Both layers share the same config, so the masked layer adds
            // first * first on top of the base value.
            let total = with_masked.unscaled_elevation(p);
            assert!((total - (first + first * first)).abs() < 1e-5);
        }
    }

    #[test]
    fn scaled_elevation_never_drops_below_radius() {
        let config = ShapeConfig {
            planet_radius: 3.5,
            noise_layers: vec![NoiseLayerConfig {
                enabled: true,
                use_first_layer_as_mask: false,
                noise: NoiseConfig::Rigid(RigidNoiseConfig {
                    min_value: 0.4,
                    ..RigidNoiseConfig::default()
                }),
            }],
        };
        let mut generator = ShapeGenerator::new(&config);
        for p in probe_points() {
            let unscaled = generator.unscaled_elevation(p);
            assert!(generator.scaled_elevation(unscaled) >= 3.5);
        }
        assert!(generator.scaled_elevation(-2.0) == 3.5);
    }

    #[test]
    fn reconfigure_resets_the_elevation_tracker() {
        let config = ShapeConfig::default();
        let mut generator = ShapeGenerator::new(&config);
        generator.unscaled_elevation(Vec3::new(0.3, 0.6, 0.74).normalize());
        assert!(generator.elevation_min_max.max() > f32::NEG_INFINITY);

        generator.reconfigure(&config);
        assert_eq!(generator.elevation_min_max.min(), f32::INFINITY);
        assert_eq!(generator.elevation_min_max.max(), f32::NEG_INFINITY);
    }

    #[test]
    fn tracker_covers_every_sample() {
        let mut generator = ShapeGenerator::new(&ShapeConfig::default());
        let elevations: Vec<f32> = probe_points()
            .into_iter()
            .map(|p| generator.unscaled_elevation(p))
            .collect();
        for e in elevations {
            assert!(generator.elevation_min_max.min() <= e);
            assert!(generator.elevation_min_max.max() >= e);
        }
    }
}
