//! # Core Models Module
//!
//! Data structures produced by the Molden parser and consumed by the tabulation engine.
//!
//! - [`atom`] - Nuclei with label, atomic number, position, and their shell range
//! - [`shell`] - Angular momentum, Gaussian primitives, contracted shells and the
//!   file-to-canonical ordering of spherical functions
//! - [`orbital`] - Molecular orbital metadata (symmetry, spin, occupation, energy)
//! - [`molecule`] - [`MoldenData`](molecule::MoldenData), the immutable parse result that
//!   owns the shared coefficient matrix
//!
//! ## Usage
//!
//! ```ignore
//! use moldentab::core::io::molden::{MoldenFile, MoldenSource, ParseOptions};
//!
//! let data = MoldenFile::parse(MoldenSource::Path("water.molden".into()), &ParseOptions::default())?;
//! for orbital in data.orbitals() {
//!     println!("{} {:.4}", orbital.symmetry, orbital.energy);
//! }
//! ```

pub mod atom;
pub mod molecule;
pub mod orbital;
pub mod shell;
