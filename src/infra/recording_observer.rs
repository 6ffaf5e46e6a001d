use std::sync::{Arc, Mutex};

use crate::error::SnapshotError;
use crate::infra::{Position, TurnObserver};
use crate::state::{Command, Commands, WorldState};

#[derive(Debug, Clone, PartialEq)]
pub enum TurnEvent {
    Started { step: i32 },
    PlanSelected {
        agent_id: String,
        intent: String,
        target: Position,
        score: f64,
    },
    Command { agent_id: String, command: Command },
    Aborted { step: i32, reason: String },
    Finished { step: i32, commands: usize },
}

/// Keeps every event in a shared log so it can be inspected after the
/// observer has been handed to a planner.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<TurnEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TurnEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn push(&self, event: TurnEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl TurnObserver for RecordingObserver {
    fn on_turn_start(&mut self, world: &WorldState) {
        self.push(TurnEvent::Started { step: world.step });
    }

    fn on_plan_selected(&mut self, agent_id: &str, intent: &str, target: Position, score: f64) {
        self.push(TurnEvent::PlanSelected {
            agent_id: agent_id.to_string(),
            intent: intent.to_string(),
            target,
            score,
        });
    }

    fn on_command(&mut self, agent_id: &str, command: Command) {
        self.push(TurnEvent::Command {
            agent_id: agent_id.to_string(),
            command,
        });
    }

    fn on_turn_aborted(&mut self, step: i32, error: &SnapshotError) {
        self.push(TurnEvent::Aborted {
            step,
            reason: error.to_string(),
        });
    }

    fn on_turn_finished(&mut self, step: i32, commands: &Commands) {
        self.push(TurnEvent::Finished {
            step,
            commands: commands.len(),
        });
    }
}
