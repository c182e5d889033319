//! Pure mathematical routines used by the tabulation engine.
//!
//! - [`normalization`] - Primitive and shell normalization constants
//! - [`harmonics`] - Normalized associated Legendre functions and real spherical harmonics

pub mod harmonics;
pub mod normalization;
