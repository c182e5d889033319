pub mod export;
pub mod inspect;

use crate::error::{CliError, Result};
use moldentab::core::io::molden::{MoldenFile, MoldenSource, ParseOptions};
use moldentab::core::models::molecule::MoldenData;
use std::path::Path;
use tracing::info;

/// Parses a Molden file, attributing format errors to its path.
pub(crate) fn read_molden(path: &Path, options: &ParseOptions) -> Result<MoldenData> {
    info!("Loading Molden file from {:?}", path);
    MoldenFile::parse(MoldenSource::Path(path.to_path_buf()), options).map_err(|e| {
        CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        }
    })
}
