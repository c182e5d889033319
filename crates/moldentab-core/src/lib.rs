//! # MoldenTab Core Library
//!
//! A parser for the Molden molecular-orbital format and an engine that tabulates
//! Gaussian-type orbitals (GTOs) and molecular orbitals (MOs) on regular 3-D grids
//! for downstream visualization.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Immutable data models (`Atom`, `Shell`, `MolecularOrbital`),
//!   the Molden parser, the field exporters, and pure mathematical routines such as shell
//!   normalization and real spherical harmonics.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer. It owns grids, the tabulated basis,
//!   and the configuration threaded into them, and it runs the per-atom parallel tabulation.
//!
//! - **[`workflows`]: The Public API.** High-level procedures that tie the engine and the
//!   exporters together, such as writing an orbital to a file chosen by its extension.

pub mod core;
pub mod engine;
pub mod workflows;
