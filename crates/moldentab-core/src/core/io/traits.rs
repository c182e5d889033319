use crate::core::error::ValidationError;
use crate::core::models::atom::Atom;
use nalgebra::{DMatrix, Point3};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Orbital values sampled on a structured grid, ready to be serialized.
#[derive(Debug, Clone, Copy)]
pub struct ScalarField<'a> {
    /// Grid points in first-axis-major order.
    pub points: &'a [Point3<f64>],
    pub dimensions: [usize; 3],
    /// The per-axis coordinates of a Cartesian grid, when known.
    pub axes: Option<[&'a [f64]; 3]>,
    /// One column per exported orbital, one row per grid point.
    pub values: &'a DMatrix<f64>,
    /// Orbital index of each column of `values`, used for naming.
    pub labels: &'a [usize],
    pub atoms: &'a [Atom],
}

impl ScalarField<'_> {
    /// Checks that the values, labels and dimensions agree with the point list.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let expected: usize = self.dimensions.iter().product();
        if expected != self.points.len() {
            return Err(ValidationError::new(
                "grid dimensions",
                format!("a product equal to the point count ({})", self.points.len()),
                expected,
            ));
        }
        if self.values.nrows() != self.points.len() {
            return Err(ValidationError::new(
                "field values",
                format!("{} rows", self.points.len()),
                self.values.nrows(),
            ));
        }
        if self.labels.len() != self.values.ncols() {
            return Err(ValidationError::new(
                "field labels",
                format!("one label per column ({})", self.values.ncols()),
                self.labels.len(),
            ));
        }
        Ok(())
    }
}

/// Defines the interface for writing tabulated fields to a file format.
pub trait FieldFile {
    type Error: Error + From<io::Error>;

    /// Serializes a field to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the field cannot be represented in this format or the writer fails.
    fn write_to(field: &ScalarField<'_>, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Creates (or truncates) `path` and writes the field to it.
    fn write_to_path<P: AsRef<Path>>(
        field: &ScalarField<'_>,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(field, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
