use nalgebra::Point3;
use std::ops::Range;

/// Length unit of the atomic coordinates, as declared by the `[Atoms]` section header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoordinateUnit {
    /// Atomic units (`[Atoms] AU`).
    #[default]
    Bohr,
    /// Angstroms (`[Atoms] Angs`).
    Angstrom,
}

impl CoordinateUnit {
    /// The exact section marker that declares this unit.
    pub fn marker(self) -> &'static str {
        match self {
            CoordinateUnit::Bohr => "[Atoms] AU",
            CoordinateUnit::Angstrom => "[Atoms] Angs",
        }
    }
}

/// Represents a nucleus of the molecule together with the basis shells centred on it.
///
/// Atoms are created once by the parser and never mutated afterwards. The shell range
/// indexes into [`MoldenData::shells`](super::molecule::MoldenData::shells); atoms parsed
/// in molecule-only mode own an empty range.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The atom label as written in the file (e.g., "C", "H1").
    pub label: String,
    /// The nuclear charge / atomic number.
    pub atomic_number: u32,
    /// The Cartesian position in the file's coordinate unit.
    pub position: Point3<f64>,
    /// Indices of the shells centred on this atom.
    pub(crate) shells: Range<usize>,
}

impl Atom {
    /// Creates a new `Atom` that does not own any shells yet.
    ///
    /// # Arguments
    ///
    /// * `label` - The atom label.
    /// * `atomic_number` - The atomic number.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(label: &str, atomic_number: u32, position: Point3<f64>) -> Self {
        Self {
            label: label.to_string(),
            atomic_number,
            position,
            shells: 0..0,
        }
    }

    /// Returns the range of shell indices owned by this atom.
    pub fn shell_range(&self) -> Range<usize> {
        self.shells.clone()
    }
}
