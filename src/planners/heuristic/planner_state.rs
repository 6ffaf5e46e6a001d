use std::collections::HashMap;

use tracing::debug;

use crate::config::PlannerConfig;
use crate::infra::Position;
use crate::state::{AgentHandle, AgentKind, WorldState};

/// State the heuristic planner carries from one turn to the next.
/// Keyed by agent id since handles are only valid for a single snapshot.
#[derive(Debug, Clone, Default)]
pub struct PlannerState {
    /// Planter id -> target it won last turn.
    committed: HashMap<String, Position>,
    /// Collector currently sent to harass the enemy base.
    raider: Option<String>,
}

impl PlannerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn committed_target(&self, agent_id: &str) -> Option<Position> {
        self.committed.get(agent_id).copied()
    }

    pub fn raider_id(&self) -> Option<&str> {
        self.raider.as_deref()
    }

    pub fn commitment_count(&self) -> usize {
        self.committed.len()
    }

    /// Forget everything about agents that no longer exist.
    pub fn prune(&mut self, world: &WorldState) {
        let before = self.committed.len();
        self.committed.retain(|id, _| {
            world
                .find_agent(id)
                .is_some_and(|h| world.is_own(h) && world.agent(h).kind == AgentKind::Planter)
        });
        if before != self.committed.len() {
            debug!("dropped {} stale commitments", before - self.committed.len());
        }
        if let Some(id) = &self.raider
            && world.find_agent(id).is_none_or(|h| !world.is_own(h))
        {
            debug!("raider {} is gone", id);
            self.raider = None;
        }
    }

    /// Replace the commitments with this turn's planter targets.
    pub fn record_commitments(
        &mut self,
        world: &WorldState,
        assignments: impl IntoIterator<Item = (AgentHandle, Position)>,
    ) {
        self.committed.clear();
        for (handle, target) in assignments {
            let agent = world.agent(handle);
            if agent.kind == AgentKind::Planter {
                self.committed.insert(agent.id.clone(), target);
            }
        }
    }

    /// Keeps the current raider while it is empty-handed, otherwise recruits
    /// the first empty collector. Returns `None` while the economy is too weak.
    pub fn select_raider(&mut self, world: &WorldState, config: &PlannerConfig) -> Option<AgentHandle> {
        let me = world.me();
        let gated = me.cash < config.raid_min_cash
            && me.worker_count() < config.raid_min_workers
            && world.step < config.raid_gate_until_step;
        let has_target = world.agents.iter().any(|a| a.kind == AgentKind::Base && a.owner != world.me);
        if !config.raid_enabled || gated || !has_target {
            self.raider = None;
            return None;
        }

        let current = self
            .raider
            .as_deref()
            .and_then(|id| world.find_agent(id))
            .filter(|h| world.is_own(*h) && world.agent(*h).carried == 0.0);
        let chosen = current.or_else(|| {
            me.collectors
                .iter()
                .copied()
                .find(|h| world.agent(*h).carried == 0.0)
        });

        self.raider = chosen.map(|h| world.agent(h).id.clone());
        chosen
    }
}
