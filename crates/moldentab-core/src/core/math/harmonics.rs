//! Normalized associated Legendre functions and real (tesseral) spherical harmonics.
//!
//! The real harmonics follow eq. 6 of M. A. Blanco et al., J. Mol. Struct. (Theochem)
//! 419, 19-27 (1997):
//!
//! ```text
//! X_l0  =              P_l0(cos θ)
//! X_lm  = (-1)^m √2 P_lm(cos θ) cos(mφ),   m > 0
//! X_l-m = (-1)^m √2 P_lm(cos θ) sin(mφ),   m > 0
//! ```
//!
//! where `P_lm` is normalized to `∫ P_lm(x)^2 dx = 1` on `[-1, 1]` and carries the
//! Condon-Shortley phase.

use crate::core::error::ValidationError;
use std::f64::consts::SQRT_2;

/// Largest `f64` strictly below one.
#[inline]
fn open_unit_bound() -> f64 {
    f64::from_bits(1.0f64.to_bits() - 1)
}

/// Clamps `x` into the open interval `(-1, 1)` using the nearest representable
/// values inside the bounds, so that the poles never hit the Legendre domain edge.
#[inline]
pub fn clamp_open_unit(x: f64) -> f64 {
    let bound = open_unit_bound();
    x.clamp(-bound, bound)
}

/// Normalized associated Legendre functions `P_lm(x)` for `0 <= m <= l <= lmax`,
/// evaluated for a batch of arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendreTable {
    lmax: usize,
    num_points: usize,
    data: Vec<f64>,
}

impl LegendreTable {
    /// Evaluates every `P_lm` at every `x` with the standard three-term recurrence.
    ///
    /// Arguments are clamped with [`clamp_open_unit`] first.
    pub fn evaluate(lmax: usize, xs: &[f64]) -> Self {
        let num_points = xs.len();
        let num_rows = (lmax + 1) * (lmax + 2) / 2;
        let mut data = vec![0.0; num_rows * num_points];
        let mut p = vec![0.0; num_rows];

        for (point, &raw_x) in xs.iter().enumerate() {
            let x = clamp_open_unit(raw_x);
            legendre_point(lmax, x, &mut p);
            for (row, value) in p.iter().enumerate() {
                data[row * num_points + point] = *value;
            }
        }

        Self {
            lmax,
            num_points,
            data,
        }
    }

    pub fn lmax(&self) -> usize {
        self.lmax
    }

    /// Values of `P_lm` over all points. Panics if `m > l` or `l > lmax`.
    pub fn get(&self, l: usize, m: usize) -> &[f64] {
        assert!(m <= l && l <= self.lmax, "P_{l}{m} is outside the table");
        let row = triangle_index(l, m);
        &self.data[row * self.num_points..(row + 1) * self.num_points]
    }
}

#[inline]
fn triangle_index(l: usize, m: usize) -> usize {
    l * (l + 1) / 2 + m
}

fn legendre_point(lmax: usize, x: f64, p: &mut [f64]) {
    let sin_theta = (1.0 - x * x).sqrt();

    p[0] = 0.5f64.sqrt();
    for m in 1..=lmax {
        let mf = m as f64;
        p[triangle_index(m, m)] =
            -((2.0 * mf + 1.0) / (2.0 * mf)).sqrt() * sin_theta * p[triangle_index(m - 1, m - 1)];
    }
    for m in 0..lmax {
        p[triangle_index(m + 1, m)] = (2.0 * m as f64 + 3.0).sqrt() * x * p[triangle_index(m, m)];
    }
    for m in 0..=lmax {
        let mf = m as f64;
        for l in (m + 2)..=lmax {
            let lf = l as f64;
            let a = ((4.0 * lf * lf - 1.0) / (lf * lf - mf * mf)).sqrt();
            let b = (((lf - 1.0) * (lf - 1.0) - mf * mf) / (4.0 * (lf - 1.0) * (lf - 1.0) - 1.0))
                .sqrt();
            p[triangle_index(l, m)] =
                a * (x * p[triangle_index(l - 1, m)] - b * p[triangle_index(l - 2, m)]);
        }
    }
}

/// Real spherical harmonics `X_lm` for `0 <= l <= lmax`, `-l <= m <= l`, tabulated
/// over a batch of `(θ, φ)` pairs and laid out as `[l][m][point]`.
///
/// The rows of one `l` are contiguous and ordered `m = -l..=l`, which is the canonical
/// column order of a shell.
#[derive(Debug, Clone, PartialEq)]
pub struct RealHarmonics {
    lmax: usize,
    num_points: usize,
    data: Vec<f64>,
}

impl RealHarmonics {
    /// Tabulates all real harmonics up to `lmax` in one batched call.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `theta` is empty, `theta` and `phi` differ in
    /// length, or `lmax` is negative.
    pub fn tabulate(theta: &[f64], phi: &[f64], lmax: i32) -> Result<Self, ValidationError> {
        if lmax < 0 {
            return Err(ValidationError::new("lmax", "a non-negative integer", lmax));
        }
        if theta.is_empty() {
            return Err(ValidationError::new("theta", "a non-empty array", "an empty array"));
        }
        if theta.len() != phi.len() {
            return Err(ValidationError::new(
                "phi",
                format!("the same length as theta ({})", theta.len()),
                phi.len(),
            ));
        }

        let lmax = lmax as usize;
        let num_points = theta.len();
        let cos_theta: Vec<f64> = theta.iter().map(|t| t.cos()).collect();
        let plm = LegendreTable::evaluate(lmax, &cos_theta);

        let mut data = vec![0.0; (lmax + 1) * (lmax + 1) * num_points];
        for l in 0..=lmax {
            let row = |m: isize| ((l * l) as isize + m + l as isize) as usize * num_points;

            let start = row(0);
            data[start..start + num_points].copy_from_slice(plm.get(l, 0));

            for m in 1..=l {
                let factor = if m % 2 == 1 { -SQRT_2 } else { SQRT_2 };
                let p = plm.get(l, m);
                let cos_row = row(m as isize);
                let sin_row = row(-(m as isize));
                for point in 0..num_points {
                    let m_phi = m as f64 * phi[point];
                    let scaled = factor * p[point];
                    data[cos_row + point] = scaled * m_phi.cos();
                    data[sin_row + point] = scaled * m_phi.sin();
                }
            }
        }

        Ok(Self {
            lmax,
            num_points,
            data,
        })
    }

    pub fn lmax(&self) -> usize {
        self.lmax
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Values of `X_lm` over all points. Panics if `|m| > l` or `l > lmax`.
    pub fn get(&self, l: usize, m: isize) -> &[f64] {
        assert!(
            l <= self.lmax && m.unsigned_abs() <= l,
            "X_{l},{m} is outside the table"
        );
        let row = (l * l) as isize + m + l as isize;
        let start = row as usize * self.num_points;
        &self.data[start..start + self.num_points]
    }

    /// All `2l + 1` rows of one `l`, ordered `m = -l..=l`, as one contiguous slice.
    pub fn shell_block(&self, l: usize) -> &[f64] {
        assert!(l <= self.lmax, "l = {l} is outside the table");
        &self.data[l * l * self.num_points..(l + 1) * (l + 1) * self.num_points]
    }
}
