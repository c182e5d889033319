use nalgebra::{Point3, Vector3};

/// Spherical coordinates `(r, θ, φ)` with θ measured from +z and φ from +x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoords {
    pub r: f64,
    pub theta: f64,
    pub phi: f64,
}

pub fn spherical_to_cartesian(r: f64, theta: f64, phi: f64) -> Point3<f64> {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    Point3::new(r * sin_theta * cos_phi, r * sin_theta * sin_phi, r * cos_theta)
}

/// Converts a displacement vector to spherical coordinates.
///
/// At the origin θ is reported as zero rather than undefined.
pub fn cartesian_to_spherical(v: &Vector3<f64>) -> SphericalCoords {
    let r = v.norm();
    let theta = if r > 0.0 {
        (v.z / r).clamp(-1.0, 1.0).acos()
    } else {
        0.0
    };
    SphericalCoords {
        r,
        theta,
        phi: v.y.atan2(v.x),
    }
}

/// `num` evenly spaced samples over the closed interval `[start, end]`.
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num - 1) as f64;
            (0..num).map(|i| start + i as f64 * step).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn spherical_round_trip_preserves_point() {
        let p = spherical_to_cartesian(2.0, 1.1, -0.7);
        let s = cartesian_to_spherical(&p.coords);
        assert!(f64_approx_equal(s.r, 2.0));
        assert!(f64_approx_equal(s.theta, 1.1));
        assert!(f64_approx_equal(s.phi, -0.7));
    }

    #[test]
    fn origin_maps_to_zero_angles() {
        let s = cartesian_to_spherical(&Vector3::zeros());
        assert_eq!(s, SphericalCoords { r: 0.0, theta: 0.0, phi: 0.0 });
    }

    #[test]
    fn negative_z_axis_has_theta_pi() {
        let s = cartesian_to_spherical(&Vector3::new(0.0, 0.0, -3.0));
        assert!(f64_approx_equal(s.theta, PI));
    }

    #[test]
    fn linspace_includes_both_endpoints() {
        assert_eq!(linspace(-1.0, 1.0, 5), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
