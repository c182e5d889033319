use super::config::GridConfig;
use crate::core::error::ValidationError;
use crate::core::utils::geometry::{linspace, spherical_to_cartesian};
use nalgebra::Point3;
use std::f64::consts::PI;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridKind {
    Cartesian,
    Spherical,
    /// Built from raw points; cannot be tabulated or exported as a cube.
    Unknown,
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GridKind::Cartesian => "cartesian",
            GridKind::Spherical => "spherical",
            GridKind::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// The per-axis samples a grid was generated from: `(x, y, z)` or `(r, θ, φ)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAxes {
    pub first: Vec<f64>,
    pub second: Vec<f64>,
    pub third: Vec<f64>,
}

impl GridAxes {
    pub fn as_slices(&self) -> [&[f64]; 3] {
        [&self.first, &self.second, &self.third]
    }
}

/// A structured set of sample points.
///
/// Points are stored first-axis-major: the point for axis indices `(i, j, k)` sits at
/// `(i * n2 + j) * n3 + k`, so the last axis varies fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    points: Vec<Point3<f64>>,
    dimensions: [usize; 3],
    kind: GridKind,
    axes: Option<GridAxes>,
}

fn check_axis(name: &str, axis: &[f64]) -> Result<(), ValidationError> {
    if axis.is_empty() {
        return Err(ValidationError::new(name, "a non-empty array", "an empty array"));
    }
    if let Some(bad) = axis.iter().find(|v| !v.is_finite()) {
        return Err(ValidationError::new(name, "finite values", bad));
    }
    Ok(())
}

impl Grid {
    /// Builds the outer product of three Cartesian axes.
    pub fn cartesian(x: &[f64], y: &[f64], z: &[f64]) -> Result<Self, ValidationError> {
        check_axis("x", x)?;
        check_axis("y", y)?;
        check_axis("z", z)?;

        let mut points = Vec::with_capacity(x.len() * y.len() * z.len());
        for &xi in x {
            for &yj in y {
                for &zk in z {
                    points.push(Point3::new(xi, yj, zk));
                }
            }
        }
        debug!("Built Cartesian grid of {} points.", points.len());

        Ok(Self {
            points,
            dimensions: [x.len(), y.len(), z.len()],
            kind: GridKind::Cartesian,
            axes: Some(GridAxes {
                first: x.to_vec(),
                second: y.to_vec(),
                third: z.to_vec(),
            }),
        })
    }

    /// Builds the outer product of spherical axes, converting each point to Cartesian.
    pub fn spherical(r: &[f64], theta: &[f64], phi: &[f64]) -> Result<Self, ValidationError> {
        check_axis("r", r)?;
        check_axis("theta", theta)?;
        check_axis("phi", phi)?;

        let mut points = Vec::with_capacity(r.len() * theta.len() * phi.len());
        for &ri in r {
            for &tj in theta {
                for &pk in phi {
                    points.push(spherical_to_cartesian(ri, tj, pk));
                }
            }
        }
        debug!("Built spherical grid of {} points.", points.len());

        Ok(Self {
            points,
            dimensions: [r.len(), theta.len(), phi.len()],
            kind: GridKind::Spherical,
            axes: Some(GridAxes {
                first: r.to_vec(),
                second: theta.to_vec(),
                third: phi.to_vec(),
            }),
        })
    }

    /// Wraps pre-computed points. The resulting grid has [`GridKind::Unknown`].
    pub fn from_points(
        points: Vec<Point3<f64>>,
        dimensions: [usize; 3],
    ) -> Result<Self, ValidationError> {
        let expected: usize = dimensions.iter().product();
        if expected != points.len() || points.is_empty() {
            return Err(ValidationError::new(
                "dimensions",
                format!("a non-zero product equal to the point count ({})", points.len()),
                format!("{:?}", dimensions),
            ));
        }
        Ok(Self {
            points,
            dimensions,
            kind: GridKind::Unknown,
            axes: None,
        })
    }

    /// `r ∈ [0, R]`, `θ ∈ [0, π]`, `φ ∈ [0, 2π]` with the configured point counts.
    pub fn default_spherical(
        config: &GridConfig,
        max_atom_distance: f64,
    ) -> Result<Self, ValidationError> {
        let radius = config.radius_for(max_atom_distance);
        let counts = &config.spherical;
        Self::spherical(
            &linspace(0.0, radius, counts.num_r_points),
            &linspace(0.0, PI, counts.num_theta_points),
            &linspace(0.0, 2.0 * PI, counts.num_phi_points),
        )
    }

    /// A cube `[-R, R]^3` with the configured point counts.
    pub fn default_cartesian(
        config: &GridConfig,
        max_atom_distance: f64,
    ) -> Result<Self, ValidationError> {
        let radius = config.radius_for(max_atom_distance);
        let counts = &config.cartesian;
        Self::cartesian(
            &linspace(-radius, radius, counts.num_x_points),
            &linspace(-radius, radius, counts.num_y_points),
            &linspace(-radius, radius, counts.num_z_points),
        )
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn dimensions(&self) -> [usize; 3] {
        self.dimensions
    }

    pub fn kind(&self) -> GridKind {
        self.kind
    }

    pub fn axes(&self) -> Option<&GridAxes> {
        self.axes.as_ref()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::TabulatorConfigBuilder;

    #[test]
    fn cartesian_grid_varies_last_axis_fastest() {
        let grid = Grid::cartesian(&[0.0, 1.0], &[0.0, 1.0, 2.0], &[5.0, 6.0, 7.0, 8.0]).unwrap();
        assert_eq!(grid.dimensions(), [2, 3, 4]);
        assert_eq!(grid.len(), 24);
        assert_eq!(grid.kind(), GridKind::Cartesian);
        assert_eq!(grid.points()[1], Point3::new(0.0, 0.0, 6.0));
        assert_eq!(grid.points()[4], Point3::new(0.0, 1.0, 5.0));
        // (i, j, k) = (1, 2, 3)
        assert_eq!(grid.points()[23], Point3::new(1.0, 2.0, 8.0));
    }

    #[test]
    fn spherical_grid_converts_points_to_cartesian() {
        let grid = Grid::spherical(&[2.0], &[PI / 2.0], &[0.0, PI / 2.0]).unwrap();
        assert_eq!(grid.dimensions(), [1, 1, 2]);
        assert_eq!(grid.kind(), GridKind::Spherical);
        let p = grid.points()[1];
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
        assert!(p.z.abs() < 1e-12);
        assert_eq!(grid.axes().unwrap().third, vec![0.0, PI / 2.0]);
    }

    #[test]
    fn empty_or_non_finite_axes_are_rejected() {
        let err = Grid::cartesian(&[], &[0.0], &[0.0]).unwrap_err();
        assert_eq!(err.field, "x");
        let err = Grid::spherical(&[1.0], &[f64::NAN], &[0.0]).unwrap_err();
        assert_eq!(err.field, "theta");
    }

    #[test]
    fn raw_points_have_unknown_kind() {
        let grid = Grid::from_points(vec![Point3::origin(); 4], [1, 2, 2]).unwrap();
        assert_eq!(grid.kind(), GridKind::Unknown);
        assert!(grid.axes().is_none());
        assert!(Grid::from_points(vec![Point3::origin(); 3], [1, 2, 2]).is_err());
    }

    #[test]
    fn default_grids_follow_config() {
        let config = TabulatorConfigBuilder::new()
            .spherical_points(10, 12, 14)
            .cartesian_points(11, 12, 13)
            .build()
            .unwrap();

        let spherical = Grid::default_spherical(&config.grid, 4.0).unwrap();
        assert_eq!(spherical.dimensions(), [10, 12, 14]);
        let axes = spherical.axes().unwrap();
        assert!((axes.first.last().unwrap() - 8.0).abs() < 1e-12);
        assert!((axes.third.last().unwrap() - 2.0 * PI).abs() < 1e-12);

        let cartesian = Grid::default_cartesian(&config.grid, 0.5).unwrap();
        assert_eq!(cartesian.dimensions(), [11, 12, 13]);
        assert_eq!(cartesian.axes().unwrap().first[0], -5.0);
    }
}
