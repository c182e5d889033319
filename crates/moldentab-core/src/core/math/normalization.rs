//! Normalization constants for spherical Gaussian primitives and contracted shells.
//!
//! See J. Kuang and C. D. Lin, J. Phys. B: At. Mol. Opt. Phys. 30, 2529 (1997),
//! p. 2532 and equations 18 and 20.

use crate::core::models::shell::GaussianPrimitive;
use std::f64::consts::PI;

/// `Γ(l + 3/2) = (2l + 1)!! / 2^(l + 1) * sqrt(π)`.
#[inline]
pub fn gamma_l_plus_three_halves(l: usize) -> f64 {
    let double_factorial: f64 = (1..=2 * l + 1).step_by(2).map(|k| k as f64).product();
    double_factorial / 2f64.powi(l as i32 + 1) * PI.sqrt()
}

/// Normalization factor of one primitive, `sqrt(2 (2α)^(l + 3/2) / Γ(l + 3/2))`.
#[inline]
pub fn primitive_norm(l: usize, exponent: f64) -> f64 {
    let power = l as f64 + 1.5;
    (2.0 * (2.0 * exponent).powf(power) / gamma_l_plus_three_halves(l)).sqrt()
}

/// Shell normalization constant: the reciprocal of the contraction's self-overlap
/// `sum_ij c_i c_j (2 sqrt(α_i α_j) / (α_i + α_j))^(l + 3/2)`.
pub fn shell_norm(l: usize, primitives: &[GaussianPrimitive]) -> f64 {
    let power = l as f64 + 1.5;
    let overlap: f64 = primitives
        .iter()
        .flat_map(|pi| primitives.iter().map(move |pj| (pi, pj)))
        .map(|(pi, pj)| {
            let ratio = 2.0 * (pi.exponent * pj.exponent).sqrt() / (pi.exponent + pj.exponent);
            pi.coefficient * pj.coefficient * ratio.powf(power)
        })
        .sum();
    1.0 / overlap
}
