use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

const MIN_GRID_POINTS: usize = 10;
const MAX_GRID_POINTS: usize = 1000;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Failed to read configuration file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Point counts of the default spherical grid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SphericalGridConfig {
    pub num_r_points: usize,
    pub num_theta_points: usize,
    pub num_phi_points: usize,
}

impl Default for SphericalGridConfig {
    fn default() -> Self {
        Self {
            num_r_points: 100,
            num_theta_points: 60,
            num_phi_points: 120,
        }
    }
}

/// Point counts of the default Cartesian grid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct CartesianGridConfig {
    pub num_x_points: usize,
    pub num_y_points: usize,
    pub num_z_points: usize,
}

impl Default for CartesianGridConfig {
    fn default() -> Self {
        Self {
            num_x_points: 100,
            num_y_points: 100,
            num_z_points: 100,
        }
    }
}

/// Controls the extent and resolution of the default grids.
///
/// The grid radius is `max(max_radius_multiplier * largest atom distance, min_radius)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct GridConfig {
    pub min_radius: f64,
    pub max_radius_multiplier: f64,
    pub spherical: SphericalGridConfig,
    pub cartesian: CartesianGridConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_radius: 5.0,
            max_radius_multiplier: 2.0,
            spherical: SphericalGridConfig::default(),
            cartesian: CartesianGridConfig::default(),
        }
    }
}

impl GridConfig {
    /// Radius of the default grids for a molecule whose farthest atom sits at `max_atom_distance`.
    pub fn radius_for(&self, max_atom_distance: f64) -> f64 {
        (self.max_radius_multiplier * max_atom_distance).max(self.min_radius)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("grid.min-radius", self.min_radius)?;
        check_positive("grid.max-radius-multiplier", self.max_radius_multiplier)?;

        let counts = [
            ("grid.spherical.num-r-points", self.spherical.num_r_points),
            ("grid.spherical.num-theta-points", self.spherical.num_theta_points),
            ("grid.spherical.num-phi-points", self.spherical.num_phi_points),
            ("grid.cartesian.num-x-points", self.cartesian.num_x_points),
            ("grid.cartesian.num-y-points", self.cartesian.num_y_points),
            ("grid.cartesian.num-z-points", self.cartesian.num_z_points),
        ];
        for (field, value) in counts {
            if !(MIN_GRID_POINTS..=MAX_GRID_POINTS).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!(
                        "must be between {} and {}, got {}",
                        MIN_GRID_POINTS, MAX_GRID_POINTS, value
                    ),
                });
            }
        }
        Ok(())
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be a positive number, got {}", value),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct TabulatorConfig {
    pub grid: GridConfig,
    /// Upper bound on tabulation workers; `None` uses the available parallelism.
    pub max_workers: Option<usize>,
}

impl TabulatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        if self.max_workers == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max-workers",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Parses and validates a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading tabulator configuration from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}

#[derive(Default)]
pub struct TabulatorConfigBuilder {
    min_radius: Option<f64>,
    max_radius_multiplier: Option<f64>,
    spherical: Option<SphericalGridConfig>,
    cartesian: Option<CartesianGridConfig>,
    max_workers: Option<usize>,
}

impl TabulatorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_radius(mut self, radius: f64) -> Self {
        self.min_radius = Some(radius);
        self
    }
    pub fn max_radius_multiplier(mut self, multiplier: f64) -> Self {
        self.max_radius_multiplier = Some(multiplier);
        self
    }
    pub fn spherical_points(mut self, num_r: usize, num_theta: usize, num_phi: usize) -> Self {
        self.spherical = Some(SphericalGridConfig {
            num_r_points: num_r,
            num_theta_points: num_theta,
            num_phi_points: num_phi,
        });
        self
    }
    pub fn cartesian_points(mut self, num_x: usize, num_y: usize, num_z: usize) -> Self {
        self.cartesian = Some(CartesianGridConfig {
            num_x_points: num_x,
            num_y_points: num_y,
            num_z_points: num_z,
        });
        self
    }
    pub fn max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers);
        self
    }

    /// Fills unset values from the defaults and validates the result.
    pub fn build(self) -> Result<TabulatorConfig, ConfigError> {
        let defaults = GridConfig::default();
        let config = TabulatorConfig {
            grid: GridConfig {
                min_radius: self.min_radius.unwrap_or(defaults.min_radius),
                max_radius_multiplier: self
                    .max_radius_multiplier
                    .unwrap_or(defaults.max_radius_multiplier),
                spherical: self.spherical.unwrap_or(defaults.spherical),
                cartesian: self.cartesian.unwrap_or(defaults.cartesian),
            },
            max_workers: self.max_workers,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TabulatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid.spherical.num_theta_points, 60);
        assert_eq!(config.max_workers, None);
    }

    #[test]
    fn radius_uses_multiplier_with_a_floor() {
        let grid = GridConfig::default();
        assert_eq!(grid.radius_for(1.0), 5.0);
        assert_eq!(grid.radius_for(4.0), 8.0);
    }

    #[test]
    fn builder_fills_defaults_and_overrides() {
        let config = TabulatorConfigBuilder::new()
            .min_radius(3.0)
            .cartesian_points(20, 30, 40)
            .max_workers(2)
            .build()
            .unwrap();
        assert_eq!(config.grid.min_radius, 3.0);
        assert_eq!(config.grid.max_radius_multiplier, 2.0);
        assert_eq!(config.grid.cartesian.num_y_points, 30);
        assert_eq!(config.grid.spherical, SphericalGridConfig::default());
        assert_eq!(config.max_workers, Some(2));
    }

    #[test]
    fn builder_rejects_out_of_range_point_counts() {
        let err = TabulatorConfigBuilder::new()
            .spherical_points(5, 60, 120)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: "grid.spherical.num-r-points", .. }
        ));
    }

    #[test]
    fn builder_rejects_non_positive_radius_and_zero_workers() {
        assert!(TabulatorConfigBuilder::new().min_radius(0.0).build().is_err());
        assert!(TabulatorConfigBuilder::new().max_radius_multiplier(-1.0).build().is_err());
        assert!(TabulatorConfigBuilder::new().max_workers(0).build().is_err());
    }

    #[test]
    fn toml_overrides_only_given_keys() {
        let config = TabulatorConfig::from_toml_str(
            r#"
            max-workers = 3

            [grid]
            min-radius = 7.5

            [grid.cartesian]
            num-x-points = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.max_workers, Some(3));
        assert_eq!(config.grid.min_radius, 7.5);
        assert_eq!(config.grid.cartesian.num_x_points, 50);
        assert_eq!(config.grid.cartesian.num_y_points, 100);
    }

    #[test]
    fn toml_rejects_unknown_keys_and_invalid_values() {
        assert!(matches!(
            TabulatorConfig::from_toml_str("[grid]\nradius = 1.0\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            TabulatorConfig::from_toml_str("[grid.spherical]\nnum-phi-points = 5000\n"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn load_reads_a_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.toml");
        std::fs::write(&path, "[grid]\nmax-radius-multiplier = 3.0\n").unwrap();
        let config = TabulatorConfig::load(&path).unwrap();
        assert_eq!(config.grid.max_radius_multiplier, 3.0);

        let missing = TabulatorConfig::load(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
