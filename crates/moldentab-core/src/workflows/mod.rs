//! # Workflows Module
//!
//! High-level entry points that tie the tabulation engine to the file writers.
//!
//! ## Overview
//!
//! Workflows take a prepared [`Tabulator`](crate::engine::tabulator::Tabulator), fill in
//! whatever lifecycle steps are still missing (such as tabulating the basis for the current
//! grid), and hand the results to the matching exporter.
//!
//! - **Export Workflow** ([`export`]) - Writes orbitals to `.vtk` or `.cube` files chosen by
//!   extension, and the orbital list to CSV

pub mod export;
