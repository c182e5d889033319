use super::atom::{Atom, CoordinateUnit};
use super::orbital::MolecularOrbital;
use super::shell::{Shell, atomic_orbital_count};
use crate::core::error::ValidationError;
use nalgebra::{DMatrix, DVector};
use std::ops::Range;

/// The complete content of a parsed Molden file.
///
/// Holds the atoms, the basis shells grouped by atom, the molecular orbital metadata,
/// and the shared coefficient matrix (one row per orbital, one column per atomic
/// orbital in canonical `m = -l..=l` order). Instances are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct MoldenData {
    atoms: Vec<Atom>,
    shells: Vec<Shell>,
    orbitals: Vec<MolecularOrbital>,
    coefficients: DMatrix<f64>,
    unit: CoordinateUnit,
    molecule_only: bool,
}

impl MoldenData {
    /// Assembles a complete data set and checks its invariants.
    ///
    /// Shells must be grouped by atom in atom order; each atom's shell range is derived
    /// from the shells' `atom_index`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if a shell refers to a missing atom, shells are not
    /// grouped by atom, the coefficient matrix width differs from `sum(2l + 1)`, or an
    /// orbital refers to a missing coefficient row.
    pub fn new(
        mut atoms: Vec<Atom>,
        shells: Vec<Shell>,
        orbitals: Vec<MolecularOrbital>,
        coefficients: DMatrix<f64>,
        unit: CoordinateUnit,
    ) -> Result<Self, ValidationError> {
        let ranges = shell_ranges(atoms.len(), &shells)?;
        for (atom, range) in atoms.iter_mut().zip(ranges) {
            atom.shells = range;
        }

        let num_aos = atomic_orbital_count(&shells);
        if coefficients.ncols() != num_aos {
            return Err(ValidationError::new(
                "coefficient matrix columns",
                format!("sum(2l + 1) over all shells = {}", num_aos),
                coefficients.ncols(),
            ));
        }
        if let Some(mo) = orbitals.iter().find(|mo| mo.index >= coefficients.nrows()) {
            return Err(ValidationError::new(
                "molecular orbital row index",
                format!("a value below {}", coefficients.nrows()),
                mo.index,
            ));
        }

        Ok(Self {
            atoms,
            shells,
            orbitals,
            coefficients,
            unit,
            molecule_only: false,
        })
    }

    /// Builds a data set that only describes the molecular geometry.
    pub fn molecule_only(atoms: Vec<Atom>, unit: CoordinateUnit) -> Self {
        Self {
            atoms,
            shells: Vec::new(),
            orbitals: Vec::new(),
            coefficients: DMatrix::zeros(0, 0),
            unit,
            molecule_only: true,
        }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn shells(&self) -> &[Shell] {
        &self.shells
    }

    /// Returns the shells centred on one atom.
    pub fn atom_shells(&self, atom_index: usize) -> &[Shell] {
        match self.atoms.get(atom_index) {
            Some(atom) => &self.shells[atom.shell_range()],
            None => &[],
        }
    }

    pub fn orbitals(&self) -> &[MolecularOrbital] {
        &self.orbitals
    }

    pub fn coefficients(&self) -> &DMatrix<f64> {
        &self.coefficients
    }

    /// Canonical-order coefficients of one orbital, looked up through its row index.
    pub fn orbital_coefficients(&self, orbital: usize) -> Option<DVector<f64>> {
        self.orbitals
            .get(orbital)
            .map(|mo| self.coefficients.row(mo.index).transpose())
    }

    pub fn num_orbitals(&self) -> usize {
        self.orbitals.len()
    }

    /// The atomic-orbital count, `sum(2l + 1)` over all shells.
    pub fn num_atomic_orbitals(&self) -> usize {
        self.coefficients.ncols()
    }

    pub fn unit(&self) -> CoordinateUnit {
        self.unit
    }

    pub fn is_molecule_only(&self) -> bool {
        self.molecule_only
    }

    /// Largest distance of any atom from the coordinate origin.
    pub fn max_radius(&self) -> f64 {
        self.atoms
            .iter()
            .map(|atom| atom.position.coords.norm())
            .fold(0.0, f64::max)
    }

    /// Stable-sorts the orbital list by energy. Coefficient rows are left in place.
    pub(crate) fn sort_orbitals_by_energy(&mut self) {
        self.orbitals.sort_by(|a, b| a.energy.total_cmp(&b.energy));
    }
}

fn shell_ranges(num_atoms: usize, shells: &[Shell]) -> Result<Vec<Range<usize>>, ValidationError> {
    let mut ranges = vec![0..0; num_atoms];
    let mut start = 0;
    for atom_index in 0..num_atoms {
        let mut end = start;
        while end < shells.len() && shells[end].atom_index == atom_index {
            end += 1;
        }
        ranges[atom_index] = start..end;
        start = end;
    }
    if let Some(shell) = shells.get(start) {
        return Err(ValidationError::new(
            "shell atom index",
            format!("shells grouped by atom in ascending order below {}", num_atoms),
            shell.atom_index,
        ));
    }
    Ok(ranges)
}
