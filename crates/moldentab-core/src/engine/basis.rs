use super::error::EngineError;
use super::grid::Grid;
use super::progress::{Progress, ProgressReporter};
use crate::core::error::ValidationError;
use crate::core::math::harmonics::RealHarmonics;
use crate::core::models::molecule::MoldenData;
use crate::core::models::shell::{Shell, atomic_orbital_count};
use crate::core::utils::geometry::cartesian_to_spherical;
use nalgebra::{DMatrix, Point3};
use tracing::{debug, info, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One atom's share of the basis matrix: its index and its contiguous column block.
type AtomJob<'m> = (usize, &'m mut [f64]);

/// Number of workers for a tabulation over `num_atoms` atoms.
pub fn worker_count(num_atoms: usize, max_workers: Option<usize>) -> usize {
    let available = max_workers.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });
    num_atoms.min(available)
}

/// Evaluates every atomic orbital at every grid point.
///
/// Returns an `N x AO` matrix whose columns follow the canonical coefficient order. The
/// matrix is column-major, so the columns of one atom form a contiguous slice; these
/// slices are split off up front and filled independently, in parallel when more than
/// one worker is allowed.
#[instrument(skip_all, name = "gto_tabulation", fields(num_points = grid.len()))]
pub fn tabulate_basis(
    data: &MoldenData,
    grid: &Grid,
    max_workers: Option<usize>,
    reporter: &ProgressReporter,
) -> Result<DMatrix<f64>, EngineError> {
    let num_points = grid.len();
    let num_atoms = data.atoms().len();
    let mut basis = DMatrix::<f64>::zeros(num_points, data.num_atomic_orbitals());

    let mut jobs: Vec<AtomJob<'_>> = Vec::with_capacity(num_atoms);
    let mut rest = basis.as_mut_slice();
    for atom_index in 0..num_atoms {
        let width = atomic_orbital_count(data.atom_shells(atom_index));
        let (block, tail) = std::mem::take(&mut rest).split_at_mut(width * num_points);
        jobs.push((atom_index, block));
        rest = tail;
    }
    if !rest.is_empty() {
        return Err(EngineError::Internal(format!(
            "{} basis matrix entries are not owned by any atom",
            rest.len()
        )));
    }

    let workers = worker_count(num_atoms, max_workers);
    info!(
        num_atoms,
        num_aos = data.num_atomic_orbitals(),
        workers,
        "Tabulating GTOs."
    );
    reporter.report(Progress::TaskStart {
        total_steps: num_atoms as u64,
    });

    let run_job = |(atom_index, block): AtomJob<'_>| -> Result<(), EngineError> {
        let atom = &data.atoms()[atom_index];
        tabulate_atom(&atom.position, data.atom_shells(atom_index), grid.points(), block)?;
        trace!("Tabulated GTOs of atom {} ({}).", atom_index, atom.label);
        reporter.report(Progress::TaskIncrement);
        Ok(())
    };

    if workers <= 1 {
        jobs.into_iter().try_for_each(run_job)?;
    } else {
        run_in_pool(jobs, workers, run_job)?;
    }

    reporter.report(Progress::TaskFinish);
    debug!("GTO tabulation finished.");
    Ok(basis)
}

#[cfg(feature = "parallel")]
fn run_in_pool<'m, F>(jobs: Vec<AtomJob<'m>>, workers: usize, run_job: F) -> Result<(), EngineError>
where
    F: Fn(AtomJob<'m>) -> Result<(), EngineError> + Send + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| EngineError::WorkerPool(e.to_string()))?;
    pool.install(|| jobs.into_par_iter().try_for_each(run_job))
}

#[cfg(not(feature = "parallel"))]
fn run_in_pool<'m, F>(jobs: Vec<AtomJob<'m>>, _workers: usize, run_job: F) -> Result<(), EngineError>
where
    F: Fn(AtomJob<'m>) -> Result<(), EngineError>,
{
    jobs.into_iter().try_for_each(run_job)
}

/// Fills one atom's column block (`num_points` values per column, canonical order).
fn tabulate_atom(
    centre: &Point3<f64>,
    shells: &[Shell],
    points: &[Point3<f64>],
    out: &mut [f64],
) -> Result<(), ValidationError> {
    let Some(lmax) = shells.iter().map(Shell::l).max() else {
        return Ok(());
    };
    let n = points.len();

    let mut theta = Vec::with_capacity(n);
    let mut phi = Vec::with_capacity(n);
    // Row k holds r^k; r^2 is always present for the Gaussian exponent.
    let max_power = lmax.max(2);
    let mut powers = vec![1.0; (max_power + 1) * n];
    for (i, point) in points.iter().enumerate() {
        let s = cartesian_to_spherical(&(point - centre));
        powers[n + i] = s.r;
        theta.push(s.theta);
        phi.push(s.phi);
    }
    for k in 2..=max_power {
        for i in 0..n {
            powers[k * n + i] = powers[(k - 1) * n + i] * powers[n + i];
        }
    }
    let r_squared = &powers[2 * n..3 * n];

    let xlms = RealHarmonics::tabulate(&theta, &phi, lmax as i32)?;

    let mut radial = vec![0.0; n];
    let mut offset = 0;
    for shell in shells {
        let l = shell.l();
        let r_l = &powers[l * n..(l + 1) * n];
        for ((value, &rl), &r2) in radial.iter_mut().zip(r_l).zip(r_squared) {
            *value = rl * shell.contracted_gaussian(r2);
        }

        let width = shell.num_functions();
        let block = &mut out[offset * n..(offset + width) * n];
        for (column, harmonic) in block.chunks_mut(n).zip(xlms.shell_block(l).chunks(n)) {
            for ((dst, &x), &rad) in column.iter_mut().zip(harmonic).zip(&radial) {
                *dst = rad * x;
            }
        }
        offset += width;
    }
    Ok(())
}
