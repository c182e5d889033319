use std::fmt;
use std::str::FromStr;

/// Spin channel of a molecular orbital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Spin {
    Alpha,
    Beta,
    /// The file did not carry a `Spin=` record for this orbital.
    #[default]
    Unknown,
}

impl FromStr for Spin {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alpha" => Ok(Spin::Alpha),
            "beta" => Ok(Spin::Beta),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Spin::Alpha => "Alpha",
            Spin::Beta => "Beta",
            Spin::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Metadata of one molecular orbital.
///
/// The coefficients themselves live in the shared coefficient matrix of
/// [`MoldenData`](super::molecule::MoldenData); `index` is the row that holds them.
#[derive(Debug, Clone, PartialEq)]
pub struct MolecularOrbital {
    pub symmetry: String,
    pub spin: Spin,
    pub occupation: f64,
    /// Orbital energy in Hartree.
    pub energy: f64,
    /// Row of this orbital in the coefficient matrix.
    pub index: usize,
}
