use crate::core::math::normalization::{primitive_norm, shell_norm};
use phf::{Map, phf_map};
use std::fmt;

static SHELL_LABELS: Map<&'static str, AngularMomentum> = phf_map! {
    "s" => AngularMomentum::S,
    "p" => AngularMomentum::P,
    "d" => AngularMomentum::D,
    "f" => AngularMomentum::F,
    "g" => AngularMomentum::G,
};

/// Angular momentum of a shell. Only s through g shells are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AngularMomentum {
    S,
    P,
    D,
    F,
    G,
}

impl AngularMomentum {
    /// Looks up a shell letter (case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        SHELL_LABELS.get(label.to_ascii_lowercase().as_str()).copied()
    }

    pub fn from_l(l: usize) -> Option<Self> {
        match l {
            0 => Some(Self::S),
            1 => Some(Self::P),
            2 => Some(Self::D),
            3 => Some(Self::F),
            4 => Some(Self::G),
            _ => None,
        }
    }

    #[inline]
    pub fn l(self) -> usize {
        self as usize
    }

    /// Number of real spherical functions in the shell, `2l + 1`.
    #[inline]
    pub fn num_functions(self) -> usize {
        2 * self.l() + 1
    }

    pub fn label(self) -> char {
        match self {
            Self::S => 's',
            Self::P => 'p',
            Self::D => 'd',
            Self::F => 'f',
            Self::G => 'g',
        }
    }

    /// Maps canonical positions (`m = -l..=l`) to positions in the Molden file.
    ///
    /// Molden writes spherical functions as `m = 0, +1, -1, +2, -2, ...`, except for
    /// p shells which keep the Cartesian `x, y, z` order, i.e. `m = +1, -1, 0`.
    /// Entry `k` of the returned vector is the file offset of the function with `m = k - l`.
    pub fn file_offsets(self) -> Vec<usize> {
        let l = self.l();
        if l == 1 {
            return vec![1, 2, 0];
        }
        (0..=2 * l)
            .rev()
            .step_by(2)
            .chain((1..2 * l).step_by(2))
            .collect()
    }
}

impl fmt::Display for AngularMomentum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One Gaussian term `coefficient * exp(-exponent * r^2)` of a contracted shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianPrimitive {
    pub exponent: f64,
    pub coefficient: f64,
    /// Normalization factor of the primitive, set when the owning shell is built.
    pub norm: f64,
}

impl GaussianPrimitive {
    pub fn new(exponent: f64, coefficient: f64) -> Self {
        Self {
            exponent,
            coefficient,
            norm: 0.0,
        }
    }
}

/// A contracted set of primitives sharing one angular momentum on one atom.
///
/// Construction normalizes every primitive, computes the shell normalization constant,
/// and caches the radial prefactors `shell_norm * primitive_norm * coefficient` used
/// during tabulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Shell {
    /// Index of the owning atom in parse order.
    pub atom_index: usize,
    pub angular_momentum: AngularMomentum,
    pub primitives: Vec<GaussianPrimitive>,
    pub norm: f64,
    prefactors: Vec<f64>,
}

impl Shell {
    pub fn new(
        atom_index: usize,
        angular_momentum: AngularMomentum,
        mut primitives: Vec<GaussianPrimitive>,
    ) -> Self {
        let l = angular_momentum.l();
        for primitive in &mut primitives {
            primitive.norm = primitive_norm(l, primitive.exponent);
        }
        let norm = shell_norm(l, &primitives);
        let prefactors = primitives
            .iter()
            .map(|p| norm * p.norm * p.coefficient)
            .collect();

        Self {
            atom_index,
            angular_momentum,
            primitives,
            norm,
            prefactors,
        }
    }

    #[inline]
    pub fn l(&self) -> usize {
        self.angular_momentum.l()
    }

    #[inline]
    pub fn num_functions(&self) -> usize {
        self.angular_momentum.num_functions()
    }

    /// Radial prefactors aligned with [`Shell::primitives`].
    pub fn prefactors(&self) -> &[f64] {
        &self.prefactors
    }

    /// Evaluates `sum_i prefactor_i * exp(-exponent_i * r^2)` for a squared distance.
    #[inline]
    pub fn contracted_gaussian(&self, r_squared: f64) -> f64 {
        self.primitives
            .iter()
            .zip(&self.prefactors)
            .map(|(p, c)| c * (-p.exponent * r_squared).exp())
            .sum()
    }
}

/// Total number of atomic orbitals, `sum(2l + 1)`, over a list of shells.
pub fn atomic_orbital_count(shells: &[Shell]) -> usize {
    shells.iter().map(Shell::num_functions).sum()
}

/// Builds the permutation from file order to canonical order for a whole basis.
///
/// Entry `i` is the file index of the coefficient that belongs in canonical column `i`.
pub fn canonical_order(shells: &[Shell]) -> Vec<usize> {
    let mut order = Vec::with_capacity(atomic_orbital_count(shells));
    let mut offset = 0;
    for shell in shells {
        order.extend(
            shell
                .angular_momentum
                .file_offsets()
                .into_iter()
                .map(|k| offset + k),
        );
        offset += shell.num_functions();
    }
    order
}
