use std::fmt;

/// Where a [`Tabulator`](super::tabulator::Tabulator) is in its lifecycle.
///
/// Building a grid moves to `GridReady` and discards any basis; tabulating GTOs moves
/// to `BasisReady`. Instances parsed without orbital data stay in `MoleculeOnly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabulatorState {
    MoleculeOnly,
    Empty,
    GridReady,
    BasisReady,
}

impl TabulatorState {
    pub fn has_grid(self) -> bool {
        matches!(self, TabulatorState::GridReady | TabulatorState::BasisReady)
    }
}

impl fmt::Display for TabulatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TabulatorState::MoleculeOnly => "molecule only",
            TabulatorState::Empty => "no grid",
            TabulatorState::GridReady => "grid ready",
            TabulatorState::BasisReady => "basis tabulated",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_grid_states_have_a_grid() {
        assert!(!TabulatorState::MoleculeOnly.has_grid());
        assert!(!TabulatorState::Empty.has_grid());
        assert!(TabulatorState::GridReady.has_grid());
        assert!(TabulatorState::BasisReady.has_grid());
    }
}
