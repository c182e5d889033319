//! # Core Module
//!
//! The stateless building blocks of MoldenTab.
//!
//! - **Molecular data** ([`models`]) - Atoms, Gaussian shells, molecular orbitals and the shared
//!   coefficient matrix produced by the parser
//! - **File I/O** ([`io`]) - The Molden reader and the VTK, cube and CSV writers
//! - **Mathematics** ([`math`]) - Primitive/shell normalization and real spherical harmonics
//! - **Utilities** ([`utils`]) - Coordinate conversions and axis helpers
//!
//! Everything in this module is a pure function of its inputs; the stateful tabulation
//! lifecycle lives in [`crate::engine`].

pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod utils;
