use crate::error::SnapshotError;
use crate::infra::Position;
use crate::state::{Command, Commands, WorldState};

/// Trait for observing the planner as it works through a turn
pub trait TurnObserver {
    /// Called once the snapshot for a turn has been built
    fn on_turn_start(&mut self, world: &WorldState);

    /// Called for every plan the resolver assigns
    fn on_plan_selected(&mut self, agent_id: &str, intent: &str, target: Position, score: f64);

    /// Called for every command emitted this turn
    fn on_command(&mut self, _agent_id: &str, _command: Command) {
        // Default implementation does nothing
    }

    /// Called when the observation could not be turned into a snapshot
    fn on_turn_aborted(&mut self, step: i32, error: &SnapshotError);

    /// Called after the commands for a turn are final
    fn on_turn_finished(&mut self, step: i32, commands: &Commands);
}
