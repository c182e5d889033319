use crate::core::models::orbital::MolecularOrbital;
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    index: usize,
    symmetry: &'a str,
    spin: String,
    occupation: f64,
    energy: f64,
}

/// Writes one CSV row per orbital: `index,symmetry,spin,occupation,energy`.
///
/// `index` is the position in the orbital list, which is what the tabulator uses to
/// select orbitals.
pub fn write_orbital_summary(
    orbitals: &[MolecularOrbital],
    writer: impl Write,
) -> Result<(), SummaryError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (index, mo) in orbitals.iter().enumerate() {
        csv_writer.serialize(SummaryRow {
            index,
            symmetry: &mo.symmetry,
            spin: mo.spin.to_string(),
            occupation: mo.occupation,
            energy: mo.energy,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
