//! Provides input/output functionality for orbital data.
//!
//! The [`molden`] reader turns a Molden file into [`MoldenData`](crate::core::models::molecule::MoldenData).
//! Tabulated orbitals leave the library through the [`FieldFile`](traits::FieldFile) writers
//! ([`vtk`], [`cube`]); [`summary`] lists the parsed orbitals as CSV.

pub mod cube;
pub mod molden;
pub mod numeric;
pub mod summary;
pub mod traits;
pub mod vtk;
