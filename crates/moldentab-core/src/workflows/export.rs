use crate::core::error::ValidationError;
use crate::core::io::cube::CubeFile;
use crate::core::io::summary::write_orbital_summary;
use crate::core::io::traits::{FieldFile, ScalarField};
use crate::core::io::vtk::VtkFile;
use crate::core::models::molecule::MoldenData;
use crate::engine::error::{EngineError, StateError};
use crate::engine::grid::GridKind;
use crate::engine::projection::OrbitalSelection;
use crate::engine::tabulator::Tabulator;
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Vtk,
    Cube,
}

impl ExportFormat {
    /// Picks the format from the file extension (`.vtk` or `.cube`).
    pub fn from_path(path: &Path) -> Result<Self, ValidationError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("vtk") => Ok(ExportFormat::Vtk),
            Some("cube") => Ok(ExportFormat::Cube),
            other => Err(ValidationError::new(
                "export path extension",
                "'.vtk' or '.cube'",
                other.map_or_else(|| "none".to_string(), |ext| format!("'.{ext}'")),
            )),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Vtk => f.write_str("vtk"),
            ExportFormat::Cube => f.write_str("cube"),
        }
    }
}

/// Writes orbitals on the tabulator's current grid to `path`.
///
/// VTK files receive the requested orbital, or every orbital when `mo_index` is `None`.
/// Cube files need a Cartesian grid and exactly one orbital. The basis is tabulated first
/// if the current grid does not have one yet.
#[instrument(skip_all, name = "export_workflow", fields(path = %path.display()))]
pub fn run(
    tabulator: &mut Tabulator<'_>,
    path: &Path,
    mo_index: Option<usize>,
) -> Result<ExportFormat, EngineError> {
    if tabulator.data().is_molecule_only() {
        return Err(StateError::MoleculeOnly.into());
    }
    let grid_kind = tabulator.grid_kind().ok_or(StateError::NoGrid)?;

    let num_orbitals = tabulator.data().num_orbitals();
    if let Some(index) = mo_index.filter(|&i| i >= num_orbitals) {
        return Err(ValidationError::new(
            "orbital index",
            format!("a value below {}", num_orbitals),
            index,
        )
        .into());
    }

    let format = ExportFormat::from_path(path)?;
    info!("Exporting data to {} (format: {}).", path.display(), format);

    let selection = match (format, mo_index) {
        (ExportFormat::Cube, None) => {
            return Err(ValidationError::new(
                "orbital index",
                "an orbital index for cube exports",
                "none",
            )
            .into());
        }
        (ExportFormat::Cube, Some(_)) if grid_kind != GridKind::Cartesian => {
            return Err(ValidationError::new(
                "grid",
                "a Cartesian grid for cube exports",
                format!("a {} grid", grid_kind),
            )
            .into());
        }
        (_, Some(index)) => OrbitalSelection::Single(index),
        (ExportFormat::Vtk, None) => OrbitalSelection::All,
    };
    let labels = selection.indices(num_orbitals)?;

    tabulator.ensure_gtos()?;
    let values = tabulator.tabulate_mos(selection)?.into_matrix();
    let grid = tabulator.grid().ok_or(StateError::NoGrid)?;
    let field = ScalarField {
        points: grid.points(),
        dimensions: grid.dimensions(),
        axes: grid.axes().map(|axes| axes.as_slices()),
        values: &values,
        labels: &labels,
        atoms: tabulator.data().atoms(),
    };

    match format {
        ExportFormat::Vtk => VtkFile::write_to_path(&field, path)?,
        ExportFormat::Cube => CubeFile::write_to_path(&field, path)?,
    }
    info!("Wrote {} orbital(s) to {}.", labels.len(), path.display());
    Ok(format)
}

/// Writes the orbital list as CSV.
pub fn write_summary(data: &MoldenData, path: &Path) -> Result<(), EngineError> {
    let file = File::create(path)?;
    write_orbital_summary(data.orbitals(), BufWriter::new(file))?;
    info!("Wrote orbital summary for {} MOs to {}.", data.num_orbitals(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_is_chosen_by_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("a/b.vtk")).unwrap(), ExportFormat::Vtk);
        assert_eq!(ExportFormat::from_path(Path::new("mo.cube")).unwrap(), ExportFormat::Cube);

        let err = ExportFormat::from_path(Path::new("mo.xyz")).unwrap_err();
        assert_eq!(err.actual, "'.xyz'");
        let err = ExportFormat::from_path(Path::new("mo")).unwrap_err();
        assert_eq!(err.actual, "none");
    }
}
