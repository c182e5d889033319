//! # Engine Module
//!
//! The stateful side of MoldenTab: grids, the tabulated basis, and orbital projection.
//!
//! ## Overview
//!
//! A [`Tabulator`](tabulator::Tabulator) owns one parsed Molden file and walks through a
//! short lifecycle: build a grid, tabulate every Gaussian-type orbital on it, then project
//! any number of molecular orbitals from that basis. Replacing the grid discards the basis.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Default grid extents and resolution, worker limits
//! - **Grids** ([`grid`]) - Cartesian, spherical and raw point grids
//! - **Basis Tabulation** ([`basis`]) - Per-atom, optionally parallel evaluation of all GTOs
//! - **Projection** ([`projection`]) - Orbital selection and basis-coefficient products
//! - **State Tracking** ([`state`]) - The tabulator lifecycle
//! - **Progress Monitoring** ([`progress`]) - Callbacks for front-ends
//! - **Error Handling** ([`error`]) - Sequencing errors and the aggregated engine error

pub mod basis;
pub mod config;
pub mod error;
pub mod grid;
pub mod progress;
pub mod projection;
pub mod state;
pub mod tabulator;
