use thiserror::Error;

/// Reasons an observation cannot be turned into a world snapshot.
/// Any of these aborts the turn.
#[derive(Debug, Error, PartialEq)]
pub enum SnapshotError {
    #[error("grid size must be between 1 and {max}, got {size}")]
    InvalidGridSize { size: i32, max: i32 },
    #[error("{what} is {value}, expected {min}..={max}")]
    ValueOutOfRange {
        what: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
    #[error("carbon array has {actual} cells, expected {expected}")]
    CarbonLength { expected: usize, actual: usize },
    #[error("current player {player} not among {count} players")]
    UnknownCurrentPlayer { player: usize, count: usize },
    #[error("{what} `{id}` has out-of-range cell index {index}")]
    IndexOutOfRange {
        what: &'static str,
        id: String,
        index: usize,
    },
    #[error("agent id `{0}` appears more than once")]
    DuplicateAgent(String),
    #[error("workers `{first}` and `{second}` share cell {index}")]
    StackedWorkers {
        first: String,
        second: String,
        index: usize,
    },
    #[error("tree `{tree}` owned by unknown player {owner}")]
    UnknownTreeOwner { tree: String, owner: usize },
    #[error("player {player} lists unknown tree `{tree}`")]
    UnknownTree { player: usize, tree: String },
    #[error("malformed observation: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("preempt bonus ({preempt}) must exceed protect bonus ({protect})")]
    BonusOrdering { preempt: f64, protect: f64 },
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
