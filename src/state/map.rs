use crate::infra::{Grid, Position};

/// Index of an agent inside `WorldState::agents`.
pub type AgentHandle = usize;
/// Index of a tree inside `WorldState::trees`.
pub type TreeHandle = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub position: Position,
    pub carbon: f64,
    pub worker: Option<AgentHandle>,
    pub base: Option<AgentHandle>,
    pub tree: Option<TreeHandle>,
}

impl Cell {
    fn empty(position: Position, carbon: f64) -> Self {
        Self {
            position,
            carbon,
            worker: None,
            base: None,
            tree: None,
        }
    }
}

/// Per-cell view of the board for one turn.
#[derive(Debug, Clone)]
pub struct Map {
    grid: Grid,
    cells: Vec<Cell>,
}

impl Map {
    /// `carbon` must already hold exactly `grid.cell_count()` values.
    pub fn new(grid: Grid, carbon: &[f64]) -> Self {
        let cells = carbon
            .iter()
            .enumerate()
            .map(|(i, c)| Cell::empty(grid.position(i), *c))
            .collect();
        Self { grid, cells }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, p: Position) -> &Cell {
        &self.cells[self.grid.index(p)]
    }

    pub(crate) fn cell_mut(&mut self, p: Position) -> &mut Cell {
        let index = self.grid.index(p);
        &mut self.cells[index]
    }

    pub fn carbon(&self, p: Position) -> f64 {
        self.cell(p).carbon
    }

    /// Carbon a tree planted at `p` would draw from: the sum over its four neighbours.
    pub fn surrounding_carbon(&self, p: Position) -> f64 {
        self.grid
            .neighbors(p)
            .iter()
            .map(|n| self.carbon(*n))
            .sum()
    }
}
