use crate::cli::ExportArgs;
use crate::error::{CliError, Result};
use moldentab::engine::config::TabulatorConfig;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Loads the grid configuration for an export and applies command-line overrides on top.
///
/// Precedence, lowest first: built-in defaults, the TOML file, `--set` pairs, dedicated flags.
/// The global thread count only fills in `max-workers` when nothing else set it.
pub fn resolve_config(args: &ExportArgs, threads: Option<usize>) -> Result<TabulatorConfig> {
    let mut config = match &args.config {
        Some(path) => load_file(path)?,
        None => TabulatorConfig::default(),
    };

    apply_set_values(&mut config, &args.set_values)?;

    if let Some(radius) = args.min_radius {
        config.grid.min_radius = radius;
    }
    if let Some(workers) = args.max_workers {
        config.max_workers = Some(workers);
    }
    if config.max_workers.is_none() {
        config.max_workers = threads;
    }

    config.validate()?;
    debug!("Resolved tabulator configuration: {:?}", config);
    Ok(config)
}

fn load_file(path: &Path) -> Result<TabulatorConfig> {
    debug!("Loading configuration from file: {:?}", path);
    TabulatorConfig::load(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(config: &mut TabulatorConfig, set_values: &[String]) -> Result<()> {
    for kv_pair in set_values {
        let Some((key, value)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();
        let grid = &mut config.grid;

        match key {
            "grid.min-radius" => grid.min_radius = parse_value(key, value, "float")?,
            "grid.max-radius-multiplier" => {
                grid.max_radius_multiplier = parse_value(key, value, "float")?
            }
            "grid.spherical.num-r-points" => {
                grid.spherical.num_r_points = parse_value(key, value, "integer")?
            }
            "grid.spherical.num-theta-points" => {
                grid.spherical.num_theta_points = parse_value(key, value, "integer")?
            }
            "grid.spherical.num-phi-points" => {
                grid.spherical.num_phi_points = parse_value(key, value, "integer")?
            }
            "grid.cartesian.num-x-points" => {
                grid.cartesian.num_x_points = parse_value(key, value, "integer")?
            }
            "grid.cartesian.num-y-points" => {
                grid.cartesian.num_y_points = parse_value(key, value, "integer")?
            }
            "grid.cartesian.num-z-points" => {
                grid.cartesian.num_z_points = parse_value(key, value, "integer")?
            }
            "max-workers" => config.max_workers = Some(parse_value(key, value, "integer")?),
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;

    fn export_args(extra: &[&str]) -> ExportArgs {
        let mut argv = vec!["moldentab", "export", "in.molden", "-o", "out.vtk"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Export(args) => args,
            other => panic!("expected export arguments, got {other:?}"),
        }
    }

    #[test]
    fn defaults_apply_without_a_file() {
        let config = resolve_config(&export_args(&[]), None).unwrap();
        assert_eq!(config, TabulatorConfig::default());
    }

    #[test]
    fn file_values_are_overridden_by_set_and_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.toml");
        fs::write(
            &path,
            "max-workers = 2\n[grid]\nmin-radius = 3.0\n[grid.cartesian]\nnum-x-points = 20\n",
        )
        .unwrap();

        let config = resolve_config(&export_args(&[
            "--config",
            path.to_str().unwrap(),
            "-S",
            "grid.cartesian.num-x-points=30",
            "--min-radius",
            "4.5",
        ]), Some(8))
        .unwrap();

        assert_eq!(config.grid.cartesian.num_x_points, 30);
        assert_eq!(config.grid.min_radius, 4.5);
        assert_eq!(config.max_workers, Some(2));
    }

    #[test]
    fn thread_count_is_only_a_fallback() {
        let config = resolve_config(&export_args(&[]), Some(3)).unwrap();
        assert_eq!(config.max_workers, Some(3));

        let config = resolve_config(&export_args(&["-w", "1"]), Some(3)).unwrap();
        assert_eq!(config.max_workers, Some(1));
    }

    #[test]
    fn bad_set_values_are_config_errors() {
        for pair in ["grid.min-radius", "grid.unknown=1", "grid.min-radius=abc"] {
            let err = resolve_config(&export_args(&["-S", pair]), None).unwrap_err();
            assert!(matches!(err, CliError::Config(_)), "{pair}: {err}");
        }
    }

    #[test]
    fn out_of_range_values_fail_validation() {
        let err = resolve_config(&export_args(&["-S", "grid.spherical.num-r-points=5"]), None).unwrap_err();
        assert!(err.to_string().contains("num-r-points"));

        let err = resolve_config(&export_args(&["--max-workers", "0"]), None).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn unreadable_config_file_names_the_path() {
        let err = resolve_config(&export_args(&["--config", "/nonexistent/grid.toml"]), None).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { .. }));
        assert!(err.to_string().contains("grid.toml"));
    }
}
