use crate::error::SnapshotError;
use crate::infra::{Position, TurnObserver};
use crate::state::{Command, Commands, WorldState};

/// Fans every event out to a list of observers.
pub struct CompositeObserver {
    observers: Vec<Box<dyn TurnObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Box<dyn TurnObserver>>) -> Self {
        Self { observers }
    }
}

impl TurnObserver for CompositeObserver {
    fn on_turn_start(&mut self, world: &WorldState) {
        for observer in &mut self.observers {
            observer.on_turn_start(world);
        }
    }

    fn on_plan_selected(&mut self, agent_id: &str, intent: &str, target: Position, score: f64) {
        for observer in &mut self.observers {
            observer.on_plan_selected(agent_id, intent, target, score);
        }
    }

    fn on_command(&mut self, agent_id: &str, command: Command) {
        for observer in &mut self.observers {
            observer.on_command(agent_id, command);
        }
    }

    fn on_turn_aborted(&mut self, step: i32, error: &SnapshotError) {
        for observer in &mut self.observers {
            observer.on_turn_aborted(step, error);
        }
    }

    fn on_turn_finished(&mut self, step: i32, commands: &Commands) {
        for observer in &mut self.observers {
            observer.on_turn_finished(step, commands);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{RecordingObserver, TurnEvent};

    #[test]
    fn test_every_observer_sees_every_event() {
        let first = RecordingObserver::new();
        let second = RecordingObserver::new();
        let mut composite =
            CompositeObserver::new(vec![Box::new(first.clone()), Box::new(second.clone())]);

        composite.on_plan_selected("c1", "Harvest", Position::new(1, 2), 3.5);
        composite.on_turn_aborted(4, &SnapshotError::InvalidGridSize { size: 0, max: 1024 });

        for recorder in [first, second] {
            let events = recorder.events();
            assert_eq!(events.len(), 2);
            assert!(matches!(&events[0], TurnEvent::PlanSelected { agent_id, .. } if agent_id == "c1"));
            assert!(matches!(events[1], TurnEvent::Aborted { step: 4, .. }));
        }
    }
}
