pub mod config;
pub mod error;
pub mod infra;
pub mod planners;
pub mod state;

// Re-export commonly used types for convenience
pub use config::{MoveTieBreak, PlannerConfig};
pub use error::{ConfigError, SnapshotError};
pub use infra::{Direction, Grid, Position};
pub use planners::Policy;
pub use planners::heuristic::HeuristicPlanner;
pub use state::{Command, Commands, GameConfig, Observation, WorldState};
