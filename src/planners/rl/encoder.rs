//! State encoder for learned policies - converts WorldState to flat feature vectors

use std::collections::{BTreeMap, HashMap};

use crate::infra::{Grid, Position};
use crate::state::{AgentKind, Command, WorldState};

/// Scalars per agent: step, own cash, enemy cash, agent type (3), x, y.
pub const VECTOR_FEATURES: usize = 8;
/// Board channels: carbon, bases, collectors, planters, worker carbon, trees,
/// previous action one-hot (5), own base distance, agent distance.
pub const CHANNELS: usize = 13;
/// Previous-action slots: stay, then spawn collector/planter or the four moves.
pub const ACTION_SLOTS: usize = 5;

/// Configuration for the state encoder
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Cash that maps to 1.0
    pub cash_scale: f32,
    /// Carbon that maps to 1.0 on the carbon channel
    pub max_cell_carbon: f32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            cash_scale: 2000.0,
            max_cell_carbon: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentFeatures {
    pub features: Vec<f32>,
    /// Agent existed last turn but is gone now.
    pub done: bool,
    /// Which of the `ACTION_SLOTS` the agent may use.
    pub action_mask: [bool; ACTION_SLOTS],
}

#[derive(Debug, Clone)]
pub struct StateEncoder {
    config: EncoderConfig,
}

fn action_slot(command: Option<Command>) -> usize {
    match command {
        None => 0,
        Some(Command::SpawnCollector) => 1,
        Some(Command::SpawnPlanter) => 2,
        Some(Command::Move(dir)) => dir.ordinal(),
    }
}

fn action_mask(kind: AgentKind) -> [bool; ACTION_SLOTS] {
    match kind {
        AgentKind::Base => [true, true, true, false, false],
        _ => [true; ACTION_SLOTS],
    }
}

/// Reconstructs last turn's commands from two consecutive snapshots.
/// Moves come from position deltas; a newly seen worker means its base spawned.
/// Agents that disappeared are skipped.
pub fn infer_previous_commands(
    previous: Option<&WorldState>,
    current: &WorldState,
) -> BTreeMap<String, Option<Command>> {
    let grid = current.grid();
    let before: HashMap<&str, Position> = previous
        .map(|p| {
            p.agents
                .iter()
                .filter(|a| a.is_worker())
                .map(|a| (a.id.as_str(), a.position))
                .collect()
        })
        .unwrap_or_default();

    let mut commands = BTreeMap::new();
    for base in current.agents.iter().filter(|a| a.kind == AgentKind::Base) {
        commands.insert(base.id.clone(), None);
    }
    for worker in current.agents.iter().filter(|a| a.is_worker()) {
        match before.get(worker.id.as_str()) {
            Some(old) => {
                let command = grid.direction_between(*old, worker.position).map(Command::Move);
                commands.insert(worker.id.clone(), command);
            }
            None => {
                if previous.is_none() {
                    continue;
                }
                if let Some(base) = current.base_at(worker.position)
                    && base.owner == worker.owner
                {
                    let spawn = match worker.kind {
                        AgentKind::Planter => Command::SpawnPlanter,
                        _ => Command::SpawnCollector,
                    };
                    commands.insert(base.id.clone(), Some(spawn));
                }
            }
        }
    }
    commands
}

impl StateEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Length of one agent's feature vector
    pub fn local_obs_size(&self, grid: Grid) -> usize {
        VECTOR_FEATURES + CHANNELS * grid.cell_count()
    }

    fn distance_plane(grid: Grid, from: Position) -> Vec<f32> {
        let scale = (grid.size() - 1).max(1) as f32;
        grid.positions()
            .map(|p| grid.distance(from, p) as f32 / scale)
            .collect()
    }

    /// Channels shared by every agent of the current player.
    fn global_planes(&self, world: &WorldState, previous: Option<&WorldState>) -> Vec<f32> {
        let grid = world.grid();
        let cells = grid.cell_count();
        let mut planes = vec![0.0f32; (CHANNELS - 2) * cells];
        let plane = |channel: usize, p: Position| channel * cells + grid.index(p);
        let sign = |owner: usize| if owner == world.me { 1.0 } else { -1.0 };

        for cell in world.map.cells() {
            planes[plane(0, cell.position)] = (cell.carbon as f32 / self.config.max_cell_carbon).max(0.0);
        }
        for agent in &world.agents {
            let channel = match agent.kind {
                AgentKind::Base => 1,
                AgentKind::Collector => 2,
                AgentKind::Planter => 3,
            };
            planes[plane(channel, agent.position)] = sign(agent.owner);
            if agent.is_worker() {
                let carried = agent.carried as f32 / self.config.max_cell_carbon / 2.0;
                planes[plane(4, agent.position)] = (sign(agent.owner) * carried).clamp(-1.0, 1.0);
            }
        }
        let lifespan = world.config.tree_lifespan.max(1) as f32;
        for tree in &world.trees {
            planes[plane(5, tree.position)] = sign(tree.owner) * tree.age as f32 / lifespan;
        }

        let previous_commands = infer_previous_commands(previous, world);
        for agent in &world.agents {
            let slot = action_slot(previous_commands.get(&agent.id).copied().flatten());
            planes[plane(6 + slot, agent.position)] = 1.0;
        }
        planes
    }

    /// Features for each of our agents, plus zeroed `done` entries for our
    /// workers that died since `previous`.
    pub fn encode(
        &self,
        world: &WorldState,
        previous: Option<&WorldState>,
    ) -> BTreeMap<String, AgentFeatures> {
        let grid = world.grid();
        let size = self.local_obs_size(grid);
        let me = world.me();
        let enemy_cash = world
            .players
            .iter()
            .find(|p| p.index != world.me)
            .map_or(0.0, |p| p.cash);
        let max_step = (world.config.episode_steps - 1).max(1) as f32;
        let globals = [
            world.step as f32 / max_step,
            (me.cash as f32 / self.config.cash_scale).clamp(-1.0, 1.0),
            (enemy_cash as f32 / self.config.cash_scale).clamp(-1.0, 1.0),
        ];
        let planes = self.global_planes(world, previous);
        let base_distance = me
            .bases
            .first()
            .map(|h| Self::distance_plane(grid, world.agent(*h).position))
            .unwrap_or_else(|| vec![0.0; grid.cell_count()]);

        let mut out = BTreeMap::new();
        for handle in world.own_agents() {
            let agent = world.agent(handle);
            let kind = match agent.kind {
                AgentKind::Base => [1.0, 0.0, 0.0],
                AgentKind::Collector => [0.0, 1.0, 0.0],
                AgentKind::Planter => [0.0, 0.0, 1.0],
            };
            let mut features = Vec::with_capacity(size);
            features.extend_from_slice(&globals);
            features.extend_from_slice(&kind);
            features.push(agent.position.x as f32 / grid.size() as f32);
            features.push(agent.position.y as f32 / grid.size() as f32);
            features.extend_from_slice(&planes);
            features.extend_from_slice(&base_distance);
            features.extend(Self::distance_plane(grid, agent.position));
            out.insert(
                agent.id.clone(),
                AgentFeatures {
                    features,
                    done: false,
                    action_mask: action_mask(agent.kind),
                },
            );
        }

        if let Some(previous) = previous {
            for handle in previous.own_agents() {
                let agent = previous.agent(handle);
                if agent.is_worker() && !out.contains_key(&agent.id) {
                    out.insert(
                        agent.id.clone(),
                        AgentFeatures {
                            features: vec![0.0; size],
                            done: true,
                            action_mask: action_mask(agent.kind),
                        },
                    );
                }
            }
        }
        out
    }
}

impl Default for StateEncoder {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::Direction;
    use crate::planners::heuristic::plans::test_support::Board;

    #[test]
    fn test_feature_sizes() {
        let encoder = StateEncoder::default();
        let world = Board::new()
            .collector(0, "c1", 3, 3, 0.0)
            .planter(0, "p1", 4, 4)
            .build();
        assert_eq!(encoder.local_obs_size(world.grid()), 8 + 13 * 225);
        let encoded = encoder.encode(&world, None);
        assert_eq!(encoded.len(), 3);
        for features in encoded.values() {
            assert_eq!(features.features.len(), 2933);
        }
        assert_eq!(encoded["base0"].action_mask, [true, true, true, false, false]);
    }

    #[test]
    fn test_vector_and_channels() {
        let encoder = StateEncoder::default();
        let world = Board::new()
            .step(30)
            .cash(0, 1000.0)
            .cash(1, 5000.0)
            .carbon(2, 1, 50.0)
            .collector(0, "c1", 3, 3, 40.0)
            .collector(1, "e1", 9, 9, 100.0)
            .tree(1, "t1", 5, 5, 25)
            .build();
        let features = &encoder.encode(&world, None)["c1"].features;
        assert!((features[0] - 30.0 / 299.0).abs() < 1e-6);
        assert_eq!(features[1], 0.5);
        assert_eq!(features[2], 1.0);
        assert_eq!(&features[3..6], &[0.0, 1.0, 0.0]);
        assert!((features[6] - 0.2).abs() < 1e-6);

        let cells = 225;
        let at = |channel: usize, x: i32, y: i32| features[8 + channel * cells + (y * 15 + x) as usize];
        assert_eq!(at(0, 2, 1), 0.5);
        assert_eq!(at(1, 0, 0), 1.0);
        assert_eq!(at(1, 7, 7), -1.0);
        assert_eq!(at(2, 9, 9), -1.0);
        assert_eq!(at(4, 3, 3), 0.2);
        assert_eq!(at(4, 9, 9), -0.5);
        assert_eq!(at(5, 5, 5), -0.5);
        // stay slot for everyone without history
        assert_eq!(at(6, 3, 3), 1.0);
        // own agent distance plane is zero under the agent
        assert_eq!(at(12, 3, 3), 0.0);
        assert!((at(11, 3, 3) - 6.0 / 14.0).abs() < 1e-6);
    }

    #[test]
    fn test_infer_previous_commands() {
        let before = Board::new()
            .collector(0, "c1", 3, 3, 0.0)
            .collector(1, "e1", 5, 14, 0.0)
            .planter(0, "p1", 6, 6)
            .build();
        let after = Board::new()
            .collector(0, "c1", 3, 4, 0.0)
            .collector(1, "e1", 5, 0, 0.0)
            .collector(0, "c2", 0, 0, 0.0)
            .build();
        // e1 wrapped from y=14 to y=0; c2 appeared on our base
        let commands = infer_previous_commands(Some(&before), &after);
        assert_eq!(commands["c1"], Some(Command::Move(Direction::Up)));
        assert_eq!(commands["e1"], Some(Command::Move(Direction::Up)));
        assert_eq!(commands["base0"], Some(Command::SpawnCollector));
        assert_eq!(commands["base1"], None);
        assert!(!commands.contains_key("p1"));
    }

    #[test]
    fn test_dead_workers_are_done() {
        let encoder = StateEncoder::default();
        let before = Board::new().collector(0, "c1", 3, 3, 0.0).build();
        let after = Board::new().build();
        let encoded = encoder.encode(&after, Some(&before));
        assert!(encoded["c1"].done);
        assert!(encoded["c1"].features.iter().all(|f| *f == 0.0));
    }
}
