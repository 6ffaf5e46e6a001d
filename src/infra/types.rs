use serde::{Deserialize, Serialize};

/// Default side length of the carbon board.
pub const DEFAULT_GRID_SIZE: i32 = 15;
/// Largest side length a snapshot may declare.
pub const MAX_GRID_SIZE: i32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Decodes a flat cell index (`y * size + x`).
    pub fn from_index(index: usize, size: i32) -> Self {
        let index = index as i32;
        Self::new(index % size, index / size)
    }

    pub fn to_index(&self, size: i32) -> usize {
        (self.y * size + self.x) as usize
    }
}

/// The four primitive moves. `Up` increases `y`, `Right` increases `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Slot used by one-hot encodings (0 is reserved for "stay").
    pub fn ordinal(self) -> usize {
        match self {
            Direction::Up => 1,
            Direction::Right => 2,
            Direction::Down => 3,
            Direction::Left => 4,
        }
    }
}

/// Square toroidal board. All geometry goes through here so wrap-around is
/// handled in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

impl Grid {
    pub fn new(size: i32) -> Self {
        Self { size: size.max(1) }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        (self.size * self.size) as usize
    }

    pub fn wrap(&self, p: Position) -> Position {
        Position::new(p.x.rem_euclid(self.size), p.y.rem_euclid(self.size))
    }

    fn axis_gap(&self, a: i32, b: i32) -> i32 {
        let d = (a - b).rem_euclid(self.size);
        d.min(self.size - d)
    }

    /// Shortest Manhattan distance with wrap-around on both axes.
    pub fn distance(&self, p: Position, q: Position) -> i32 {
        self.axis_gap(p.x, q.x) + self.axis_gap(p.y, q.y)
    }

    /// Largest per-axis gap, used for "within the 3x3 ring" style checks.
    pub fn chebyshev(&self, p: Position, q: Position) -> i32 {
        self.axis_gap(p.x, q.x).max(self.axis_gap(p.y, q.y))
    }

    pub fn translate(&self, p: Position, dir: Direction) -> Position {
        let (dx, dy) = dir.delta();
        self.wrap(Position::new(p.x + dx, p.y + dy))
    }

    /// Neighbours in `Direction::ALL` order.
    pub fn neighbors(&self, p: Position) -> [Position; 4] {
        Direction::ALL.map(|d| self.translate(p, d))
    }

    /// Direction that moves `from` onto the adjacent cell `to`.
    pub fn direction_between(&self, from: Position, to: Position) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| self.translate(from, *d) == self.wrap(to))
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.cell_count()
    }

    pub fn position(&self, index: usize) -> Position {
        Position::from_index(index, self.size)
    }

    pub fn index(&self, p: Position) -> usize {
        self.wrap(p).to_index(self.size)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cell_count()).map(|i| self.position(i))
    }

    /// True when `mid` lies on some shortest path from `from` to `to`.
    pub fn on_shortest_path(&self, from: Position, mid: Position, to: Position) -> bool {
        self.distance(from, mid) + self.distance(mid, to) == self.distance(from, to)
    }
}
