mod composite_observer;
mod default_observer;
mod game_observer;
mod logging;
mod recording_observer;
mod replay_observer;
mod types;

pub use composite_observer::CompositeObserver;
pub use default_observer::DefaultObserver;
pub use game_observer::TurnObserver;
pub use logging::{DEFAULT_LOG_DIRECTIVE, init_logging};
pub use recording_observer::{RecordingObserver, TurnEvent};
pub use replay_observer::ReplayObserver;
pub use types::{DEFAULT_GRID_SIZE, Direction, Grid, MAX_GRID_SIZE, Position};
