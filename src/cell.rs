use core::fmt;

/// State of a single grid cell.
///
/// `Open -> Explored` only happens during search and never reverses. Cells on the final
/// path become [CellState::OnPath] during reconstruction, whatever they held before.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Traversable and not yet reached by the search.
    #[default]
    Open,
    /// Blocked.
    Obstacle,
    /// Traversable, designated goal.
    Goal,
    /// Traversable, already generated by an expansion.
    Explored,
    /// On the reconstructed path. Also marks the start cell before the search runs.
    OnPath,
}

impl CellState {
    /// Numeric encoding understood by display collaborators of the original gridworld.
    pub fn code(self) -> i8 {
        match self {
            CellState::Open => 1,
            CellState::Obstacle => 0,
            CellState::Goal => -1,
            CellState::Explored => 3,
            CellState::OnPath => -2,
        }
    }

    /// Inverse of [code](Self::code).
    pub fn from_code(code: i8) -> Option<CellState> {
        match code {
            1 => Some(CellState::Open),
            0 => Some(CellState::Obstacle),
            -1 => Some(CellState::Goal),
            3 => Some(CellState::Explored),
            -2 => Some(CellState::OnPath),
            _ => None,
        }
    }

    /// Whether a search may step onto this cell.
    pub fn is_occupiable(self) -> bool {
        matches!(self, CellState::Open | CellState::Goal)
    }

    fn symbol(self) -> char {
        match self {
            CellState::Open => '.',
            CellState::Obstacle => '#',
            CellState::Goal => 'G',
            CellState::Explored => 'x',
            CellState::OnPath => '*',
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
