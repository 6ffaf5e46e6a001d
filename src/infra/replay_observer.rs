use std::io::Write;

use serde_json::json;
use tracing::warn;

use crate::error::SnapshotError;
use crate::infra::{Position, TurnObserver};
use crate::state::{Commands, WorldState};

/// Appends one JSON line per turn: the step plus either the emitted commands
/// or the reason the turn was aborted.
pub struct ReplayObserver<W: Write> {
    writer: W,
}

impl<W: Write> ReplayObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: serde_json::Value) {
        let result = writeln!(self.writer, "{line}").and_then(|_| self.writer.flush());
        if let Err(err) = result {
            warn!("failed to write replay line: {}", err);
        }
    }
}

impl<W: Write> TurnObserver for ReplayObserver<W> {
    fn on_turn_start(&mut self, _world: &WorldState) {}

    fn on_plan_selected(&mut self, _agent_id: &str, _intent: &str, _target: Position, _score: f64) {}

    fn on_turn_aborted(&mut self, step: i32, error: &SnapshotError) {
        self.write_line(json!({"step": step, "error": error.to_string()}));
    }

    fn on_turn_finished(&mut self, step: i32, commands: &Commands) {
        self.write_line(json!({"step": step, "commands": commands}));
    }
}
