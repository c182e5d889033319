use crate::core::error::ValidationError;
use crate::core::models::molecule::MoldenData;
use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// Which orbitals to project onto the grid, by position in the orbital list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrbitalSelection {
    Single(usize),
    Many(Vec<usize>),
    All,
}

impl OrbitalSelection {
    /// Resolves the selection to explicit orbital indices.
    pub fn indices(&self, num_orbitals: usize) -> Result<Vec<usize>, ValidationError> {
        let indices = match self {
            OrbitalSelection::Single(i) => vec![*i],
            OrbitalSelection::Many(list) => list.clone(),
            OrbitalSelection::All => (0..num_orbitals).collect(),
        };
        if indices.is_empty() {
            return Err(ValidationError::new(
                "orbital selection",
                "at least one orbital index",
                "an empty selection",
            ));
        }
        if let Some(bad) = indices.iter().find(|&&i| i >= num_orbitals) {
            return Err(ValidationError::new(
                "orbital index",
                format!("a value below {}", num_orbitals),
                bad,
            ));
        }
        Ok(indices)
    }
}

impl From<usize> for OrbitalSelection {
    fn from(index: usize) -> Self {
        OrbitalSelection::Single(index)
    }
}

impl From<Vec<usize>> for OrbitalSelection {
    fn from(indices: Vec<usize>) -> Self {
        OrbitalSelection::Many(indices)
    }
}

/// Orbital values on the grid: a vector for one orbital, one column per orbital otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum TabulatedOrbitals {
    Single(DVector<f64>),
    Many(DMatrix<f64>),
}

impl TabulatedOrbitals {
    pub fn num_points(&self) -> usize {
        match self {
            TabulatedOrbitals::Single(v) => v.len(),
            TabulatedOrbitals::Many(m) => m.nrows(),
        }
    }

    pub fn num_orbitals(&self) -> usize {
        match self {
            TabulatedOrbitals::Single(_) => 1,
            TabulatedOrbitals::Many(m) => m.ncols(),
        }
    }

    /// The values as an `N x k` matrix.
    pub fn into_matrix(self) -> DMatrix<f64> {
        match self {
            TabulatedOrbitals::Single(v) => {
                DMatrix::from_column_slice(v.len(), 1, v.as_slice())
            }
            TabulatedOrbitals::Many(m) => m,
        }
    }
}

/// Projects the tabulated basis onto the selected orbitals' coefficients.
///
/// `basis` is the `N x AO` matrix of the current grid.
pub fn project_orbitals(
    data: &MoldenData,
    basis: &DMatrix<f64>,
    selection: &OrbitalSelection,
) -> Result<TabulatedOrbitals, ValidationError> {
    let indices = selection.indices(data.num_orbitals())?;
    let rows: Vec<usize> = indices
        .iter()
        .map(|&i| data.orbitals()[i].index)
        .collect();
    debug!("Projecting {} MO(s) onto {} grid points.", rows.len(), basis.nrows());

    match selection {
        OrbitalSelection::Single(_) => {
            let coefficients = data.coefficients().row(rows[0]).transpose();
            Ok(TabulatedOrbitals::Single(basis * coefficients))
        }
        _ => {
            let coefficients = data.coefficients().select_rows(rows.iter());
            Ok(TabulatedOrbitals::Many(basis * coefficients.transpose()))
        }
    }
}
