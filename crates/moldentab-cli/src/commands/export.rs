use super::read_molden;
use crate::cli::{ExportArgs, GridChoice};
use crate::config::resolve_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use moldentab::core::io::molden::ParseOptions;
use moldentab::engine::progress::ProgressReporter;
use moldentab::engine::tabulator::Tabulator;
use moldentab::workflows::export::{self, ExportFormat};
use tracing::info;

pub fn run(args: ExportArgs, threads: Option<usize>, show_progress: bool) -> Result<()> {
    let format = check_output(&args)?;
    info!("Output format: {}.", format);

    info!("Merging configuration from file and CLI arguments...");
    let config = resolve_config(&args, threads)?;

    let options = ParseOptions {
        sort_by_energy: args.sort,
        ..Default::default()
    };
    let data = read_molden(&args.input, &options)?;

    let progress_handler = CliProgressHandler::new(show_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let mut tabulator = Tabulator::new(data, config)?.with_reporter(reporter);

    let grid = match args.grid {
        GridChoice::Cartesian => tabulator.default_cartesian_grid()?,
        GridChoice::Spherical => tabulator.default_spherical_grid()?,
    };
    info!(
        "Built default {} grid with dimensions {:?}.",
        grid.kind(),
        grid.dimensions()
    );

    let written = export::run(&mut tabulator, &args.output, args.mo);
    progress_handler.clear();
    let format = written?;

    match args.mo {
        Some(index) => println!(
            "✓ Orbital {} written to: {} ({})",
            index,
            args.output.display(),
            format
        ),
        None => println!(
            "✓ {} orbitals written to: {} ({})",
            tabulator.data().num_orbitals(),
            args.output.display(),
            format
        ),
    }
    Ok(())
}

/// Rejects output requests that cannot succeed before any parsing or tabulation happens.
fn check_output(args: &ExportArgs) -> Result<ExportFormat> {
    let format =
        ExportFormat::from_path(&args.output).map_err(|e| CliError::Argument(e.to_string()))?;
    if format == ExportFormat::Cube {
        if args.mo.is_none() {
            return Err(CliError::Argument(
                "cube output holds a single orbital; pass --mo <INDEX>".to_string(),
            ));
        }
        if args.grid != GridChoice::Cartesian {
            return Err(CliError::Argument(
                "cube output requires --grid cartesian".to_string(),
            ));
        }
    }
    Ok(format)
}
