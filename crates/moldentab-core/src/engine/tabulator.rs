use super::basis::tabulate_basis;
use super::config::TabulatorConfig;
use super::error::{EngineError, StateError};
use super::grid::{Grid, GridKind};
use super::progress::{Progress, ProgressReporter};
use super::projection::{OrbitalSelection, TabulatedOrbitals, project_orbitals};
use super::state::TabulatorState;
use crate::core::io::molden::{MoldenFile, MoldenSource, ParseOptions};
use crate::core::models::molecule::MoldenData;
use nalgebra::DMatrix;
use tracing::{debug, info};

/// Owns parsed Molden data together with the current grid and its tabulated basis.
///
/// The basis always belongs to the current grid: replacing the grid discards it.
#[derive(Debug)]
pub struct Tabulator<'a> {
    data: MoldenData,
    config: TabulatorConfig,
    grid: Option<Grid>,
    basis: Option<DMatrix<f64>>,
    reporter: ProgressReporter<'a>,
}

impl<'a> Tabulator<'a> {
    /// Wraps already parsed data. The configuration is validated first.
    pub fn new(data: MoldenData, config: TabulatorConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            data,
            config,
            grid: None,
            basis: None,
            reporter: ProgressReporter::new(),
        })
    }

    /// Parses a Molden source and wraps the result.
    pub fn from_source(
        source: MoldenSource,
        options: &ParseOptions,
        config: TabulatorConfig,
    ) -> Result<Self, EngineError> {
        let data = MoldenFile::parse(source, options)?;
        Self::new(data, config)
    }

    pub fn with_reporter(mut self, reporter: ProgressReporter<'a>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn data(&self) -> &MoldenData {
        &self.data
    }

    pub fn config(&self) -> &TabulatorConfig {
        &self.config
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn grid_kind(&self) -> Option<GridKind> {
        self.grid.as_ref().map(Grid::kind)
    }

    /// The tabulated basis of the current grid, if any.
    pub fn basis(&self) -> Option<&DMatrix<f64>> {
        self.basis.as_ref()
    }

    pub fn state(&self) -> TabulatorState {
        if self.data.is_molecule_only() {
            TabulatorState::MoleculeOnly
        } else if self.basis.is_some() {
            TabulatorState::BasisReady
        } else if self.grid.is_some() {
            TabulatorState::GridReady
        } else {
            TabulatorState::Empty
        }
    }

    fn require_orbitals(&self) -> Result<(), StateError> {
        if self.data.is_molecule_only() {
            Err(StateError::MoleculeOnly)
        } else {
            Ok(())
        }
    }

    /// Installs a grid and discards the basis of the previous one.
    pub fn set_grid(&mut self, grid: Grid) -> Result<&Grid, EngineError> {
        self.require_orbitals()?;
        info!(
            kind = %grid.kind(),
            dimensions = ?grid.dimensions(),
            "Installing {} grid points.",
            grid.len()
        );
        self.basis = None;
        Ok(self.grid.insert(grid))
    }

    pub fn cartesian_grid(&mut self, x: &[f64], y: &[f64], z: &[f64]) -> Result<&Grid, EngineError> {
        self.require_orbitals()?;
        let grid = Grid::cartesian(x, y, z)?;
        self.set_grid(grid)
    }

    pub fn spherical_grid(
        &mut self,
        r: &[f64],
        theta: &[f64],
        phi: &[f64],
    ) -> Result<&Grid, EngineError> {
        self.require_orbitals()?;
        let grid = Grid::spherical(r, theta, phi)?;
        self.set_grid(grid)
    }

    /// Builds the configured default Cartesian grid around the molecule.
    pub fn default_cartesian_grid(&mut self) -> Result<&Grid, EngineError> {
        self.require_orbitals()?;
        let grid = Grid::default_cartesian(&self.config.grid, self.data.max_radius())?;
        self.set_grid(grid)
    }

    /// Builds the configured default spherical grid around the molecule.
    pub fn default_spherical_grid(&mut self) -> Result<&Grid, EngineError> {
        self.require_orbitals()?;
        let grid = Grid::default_spherical(&self.config.grid, self.data.max_radius())?;
        self.set_grid(grid)
    }

    /// Evaluates every atomic orbital on the current grid and keeps the result.
    ///
    /// Calling this again on the same grid recomputes an identical matrix.
    pub fn tabulate_gtos(&mut self) -> Result<&DMatrix<f64>, EngineError> {
        self.require_orbitals()?;
        let grid = self.grid.as_ref().ok_or(StateError::NoGrid)?;
        if grid.kind() == GridKind::Unknown {
            return Err(StateError::UnknownGrid.into());
        }

        self.reporter.report(Progress::PhaseStart {
            name: "GTO tabulation",
        });
        let basis = tabulate_basis(&self.data, grid, self.config.max_workers, &self.reporter)?;
        self.reporter.report(Progress::Message(format!(
            "Tabulated {} atomic orbitals on {} grid points",
            basis.ncols(),
            basis.nrows()
        )));
        self.reporter.report(Progress::PhaseFinish);

        Ok(self.basis.insert(basis))
    }

    /// Tabulates GTOs only if the current grid has no basis yet.
    pub fn ensure_gtos(&mut self) -> Result<&DMatrix<f64>, EngineError> {
        if self.basis.is_none() {
            debug!("No tabulated basis for the current grid; tabulating GTOs.");
            self.tabulate_gtos()?;
        }
        self.basis
            .as_ref()
            .ok_or_else(|| EngineError::Internal("basis missing after tabulation".to_string()))
    }

    /// Projects the tabulated basis onto the selected orbitals.
    pub fn tabulate_mos(
        &self,
        selection: impl Into<OrbitalSelection>,
    ) -> Result<TabulatedOrbitals, EngineError> {
        self.require_orbitals()?;
        if !self.state().has_grid() {
            return Err(StateError::NoGrid.into());
        }
        let basis = self.basis.as_ref().ok_or(StateError::NoBasis)?;
        Ok(project_orbitals(&self.data, basis, &selection.into())?)
    }
}
