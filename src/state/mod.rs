mod commands;
mod map;
mod observation;
mod player_state;
mod world_state;

pub use commands::{Command, Commands};
pub use map::{AgentHandle, Cell, Map, TreeHandle};
pub use observation::{
    GameConfig, Observation, PlayerObservation, TreeObservation, WorkerKind, WorkerObservation,
};
pub use player_state::PlayerState;
pub use world_state::{Agent, AgentKind, Tree, WorldState};
