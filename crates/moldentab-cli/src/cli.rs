use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "MoldenTab Developers",
    version,
    about = "MoldenTab CLI - Inspect Molden files and tabulate molecular orbitals on Cartesian or spherical grids.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the atoms, basis shells and molecular orbitals of a Molden file.
    Inspect(InspectArgs),
    /// Tabulate molecular orbitals on a grid and write them as VTK or Gaussian cube.
    Export(ExportArgs),
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the Molden file.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// Only read the [Atoms] section.
    #[arg(long)]
    pub only_molecule: bool,

    /// Sort the orbital table by energy.
    #[arg(long)]
    pub sort: bool,

    /// Also write the orbital table as CSV.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridChoice {
    Cartesian,
    Spherical,
}

/// Arguments for the `export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Path to the Molden file.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// Output file; the extension (.vtk or .cube) selects the format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Kind of default grid to build around the molecule.
    #[arg(short, long, value_enum, default_value_t = GridChoice::Cartesian)]
    pub grid: GridChoice,

    /// Orbital to export. VTK exports write every orbital when omitted.
    #[arg(short, long, value_name = "INDEX")]
    pub mo: Option<usize>,

    /// Sort orbitals by energy before indexing them.
    #[arg(long)]
    pub sort: bool,

    /// Path to a grid configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the minimum grid radius from the config file.
    #[arg(long, value_name = "FLOAT")]
    pub min_radius: Option<f64>,

    /// Override the maximum number of tabulation workers.
    #[arg(short = 'w', long, value_name = "NUM")]
    pub max_workers: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S grid.cartesian.num-x-points=50
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
