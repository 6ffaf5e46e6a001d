use tracing::{debug, error, info};

use crate::error::SnapshotError;
use crate::infra::{Position, TurnObserver};
use crate::state::{Command, Commands, WorldState};

/// Logs turn progress through `tracing`.
pub struct DefaultObserver;

impl TurnObserver for DefaultObserver {
    fn on_turn_start(&mut self, world: &WorldState) {
        let me = world.me();
        info!(
            "step: {}, cash: {:.1}, collectors: {}, planters: {}, trees: {}/{}",
            world.step,
            me.cash,
            me.collectors.len(),
            me.planters.len(),
            me.trees.len(),
            world.total_trees(),
        );
    }

    fn on_plan_selected(&mut self, agent_id: &str, intent: &str, target: Position, score: f64) {
        debug!(
            "{} -> {} at ({}, {}) score {:.4}",
            agent_id, intent, target.x, target.y, score
        );
    }

    fn on_command(&mut self, agent_id: &str, command: Command) {
        debug!("{}: {}", agent_id, command);
    }

    fn on_turn_aborted(&mut self, step: i32, error: &SnapshotError) {
        error!("turn {} aborted: {}", step, error);
    }

    fn on_turn_finished(&mut self, step: i32, commands: &Commands) {
        info!("step {} done, {} commands", step, commands.len());
    }
}
