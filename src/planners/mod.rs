pub mod heuristic;
pub mod rl;

use crate::error::SnapshotError;
use crate::state::{Commands, GameConfig, Observation};

/// A decision-maker that turns one observation into this turn's commands.
/// The heuristic planner is one; a learned policy plugs in the same way.
pub trait Policy {
    fn name(&self) -> &str;

    fn take_action(&mut self, obs: &Observation, config: &GameConfig) -> Commands;

    /// JSON in, JSON out, for drivers that speak the simulator's wire format.
    fn take_action_json(&mut self, obs: &str, config: &str) -> Result<String, SnapshotError> {
        let obs: Observation =
            serde_json::from_str(obs).map_err(|e| SnapshotError::Malformed(e.to_string()))?;
        let config: GameConfig =
            serde_json::from_str(config).map_err(|e| SnapshotError::Malformed(e.to_string()))?;
        Ok(self.take_action(&obs, &config).to_json())
    }
}
