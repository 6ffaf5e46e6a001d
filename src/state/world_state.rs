use std::collections::HashSet;

use crate::error::SnapshotError;
use crate::infra::{Grid, MAX_GRID_SIZE, Position};

use super::map::{AgentHandle, Map, TreeHandle};
use super::observation::{GameConfig, Observation, WorkerKind};
use super::player_state::PlayerState;

/// Carbon a cell restarts from once the tree standing on it dies.
const REGROWTH_AFTER_TREE: f64 = 30.0;
const GROWTH_RATE: f64 = 1.05;
const DRAIN_PER_TREE: f64 = 0.0375;
/// Upper bound on episode length and tree lifespan read from the wire.
const MAX_TURNS: i32 = 1_000_000;

fn check_range(what: &'static str, value: i32, min: i32, max: i32) -> Result<i32, SnapshotError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(SnapshotError::ValueOutOfRange {
            what,
            value,
            min,
            max,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgentKind {
    Base,
    Collector,
    Planter,
}

impl From<WorkerKind> for AgentKind {
    fn from(kind: WorkerKind) -> Self {
        match kind {
            WorkerKind::Collector => AgentKind::Collector,
            WorkerKind::Planter => AgentKind::Planter,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub id: String,
    pub owner: usize,
    pub kind: AgentKind,
    pub position: Position,
    /// Carbon held by a worker. Always zero for bases.
    pub carried: f64,
}

impl Agent {
    pub fn is_worker(&self) -> bool {
        self.kind != AgentKind::Base
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    pub id: String,
    pub owner: usize,
    pub position: Position,
    pub age: i32,
}

/// Immutable, validated view of one turn.
#[derive(Debug, Clone)]
pub struct WorldState {
    pub step: i32,
    pub me: usize,
    pub config: GameConfig,
    pub map: Map,
    pub agents: Vec<Agent>,
    pub trees: Vec<Tree>,
    pub players: Vec<PlayerState>,
}

fn check_index(grid: Grid, what: &'static str, id: &str, index: usize) -> Result<Position, SnapshotError> {
    if grid.contains_index(index) {
        Ok(grid.position(index))
    } else {
        Err(SnapshotError::IndexOutOfRange {
            what,
            id: id.to_string(),
            index,
        })
    }
}

impl WorldState {
    #[tracing::instrument(level = "trace", skip_all, fields(step = obs.step))]
    pub fn from_observation(obs: &Observation, config: &GameConfig) -> Result<Self, SnapshotError> {
        if !(1..=MAX_GRID_SIZE).contains(&config.size) {
            return Err(SnapshotError::InvalidGridSize {
                size: config.size,
                max: MAX_GRID_SIZE,
            });
        }
        let episode_steps = check_range("episode length", config.episode_steps, 1, MAX_TURNS)?;
        check_range("step", obs.step, 0, episode_steps)?;
        let lifespan = check_range("tree lifespan", config.tree_lifespan, 1, MAX_TURNS)?;
        let grid = Grid::new(config.size);
        if obs.carbon.len() != grid.cell_count() {
            return Err(SnapshotError::CarbonLength {
                expected: grid.cell_count(),
                actual: obs.carbon.len(),
            });
        }
        if obs.player >= obs.players.len() {
            return Err(SnapshotError::UnknownCurrentPlayer {
                player: obs.player,
                count: obs.players.len(),
            });
        }

        let mut map = Map::new(grid, &obs.carbon);
        let mut players: Vec<PlayerState> = obs
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| PlayerState::new(i, p.cash))
            .collect();
        let mut agents: Vec<Agent> = Vec::new();
        let mut seen_ids: HashSet<&str> = HashSet::new();

        for (owner, player) in obs.players.iter().enumerate() {
            for (id, index) in &player.bases {
                let position = check_index(grid, "base", id, *index)?;
                if !seen_ids.insert(id.as_str()) {
                    return Err(SnapshotError::DuplicateAgent(id.clone()));
                }
                let handle = agents.len();
                let cell = map.cell_mut(position);
                if cell.base.is_some() {
                    return Err(SnapshotError::Malformed(format!(
                        "two bases on cell {index}"
                    )));
                }
                cell.base = Some(handle);
                agents.push(Agent {
                    id: id.clone(),
                    owner,
                    kind: AgentKind::Base,
                    position,
                    carried: 0.0,
                });
                players[owner].bases.push(handle);
            }

            for (id, worker) in &player.workers {
                let position = check_index(grid, "worker", id, worker.index)?;
                if !seen_ids.insert(id.as_str()) {
                    return Err(SnapshotError::DuplicateAgent(id.clone()));
                }
                let handle = agents.len();
                let cell = map.cell_mut(position);
                if let Some(other) = cell.worker {
                    return Err(SnapshotError::StackedWorkers {
                        first: agents[other].id.clone(),
                        second: id.clone(),
                        index: worker.index,
                    });
                }
                cell.worker = Some(handle);
                let kind = AgentKind::from(worker.kind);
                agents.push(Agent {
                    id: id.clone(),
                    owner,
                    kind,
                    position,
                    carried: worker.carbon.max(0.0),
                });
                match kind {
                    AgentKind::Collector => players[owner].collectors.push(handle),
                    _ => players[owner].planters.push(handle),
                }
            }
        }

        let mut trees: Vec<Tree> = Vec::new();
        for (id, tree) in &obs.trees {
            let position = check_index(grid, "tree", id, tree.index)?;
            check_range("tree age", tree.age, 0, lifespan)?;
            if tree.owner >= players.len() {
                return Err(SnapshotError::UnknownTreeOwner {
                    tree: id.clone(),
                    owner: tree.owner,
                });
            }
            let handle: TreeHandle = trees.len();
            let cell = map.cell_mut(position);
            if cell.tree.is_some() {
                return Err(SnapshotError::Malformed(format!(
                    "two trees on cell {}",
                    tree.index
                )));
            }
            cell.tree = Some(handle);
            trees.push(Tree {
                id: id.clone(),
                owner: tree.owner,
                position,
                age: tree.age,
            });
            players[tree.owner].trees.push(handle);
        }

        for (index, player) in obs.players.iter().enumerate() {
            if let Some(unknown) = player.trees.iter().find(|t| !obs.trees.contains_key(*t)) {
                return Err(SnapshotError::UnknownTree {
                    player: index,
                    tree: unknown.clone(),
                });
            }
        }

        Ok(Self {
            step: obs.step,
            me: obs.player,
            config: config.clone(),
            map,
            agents,
            trees,
            players,
        })
    }

    pub fn grid(&self) -> Grid {
        self.map.grid()
    }

    pub fn remaining_turns(&self) -> i32 {
        self.config.episode_steps - self.step
    }

    pub fn me(&self) -> &PlayerState {
        &self.players[self.me]
    }

    pub fn agent(&self, handle: AgentHandle) -> &Agent {
        &self.agents[handle]
    }

    pub fn tree(&self, handle: TreeHandle) -> &Tree {
        &self.trees[handle]
    }

    pub fn is_own(&self, handle: AgentHandle) -> bool {
        self.agents[handle].owner == self.me
    }

    /// Our agents: bases first, then collectors, then planters.
    pub fn own_agents(&self) -> impl Iterator<Item = AgentHandle> + '_ {
        let me = self.me();
        me.bases
            .iter()
            .chain(me.collectors.iter())
            .chain(me.planters.iter())
            .copied()
    }

    pub fn enemy_agents(&self, owner: usize, kind: AgentKind) -> impl Iterator<Item = &Agent> + '_ {
        self.agents
            .iter()
            .filter(move |a| a.owner != owner && a.kind == kind)
    }

    pub fn find_agent(&self, id: &str) -> Option<AgentHandle> {
        self.agents.iter().position(|a| a.id == id)
    }

    pub fn worker_at(&self, p: Position) -> Option<&Agent> {
        self.map.cell(p).worker.map(|h| &self.agents[h])
    }

    pub fn base_at(&self, p: Position) -> Option<&Agent> {
        self.map.cell(p).base.map(|h| &self.agents[h])
    }

    pub fn tree_at(&self, p: Position) -> Option<&Tree> {
        self.map.cell(p).tree.map(|h| &self.trees[h])
    }

    pub fn is_own_base(&self, owner: usize, p: Position) -> bool {
        self.base_at(p).is_some_and(|b| b.owner == owner)
    }

    pub fn is_enemy_base(&self, owner: usize, p: Position) -> bool {
        self.base_at(p).is_some_and(|b| b.owner != owner)
    }

    fn nearest_base_where(&self, p: Position, keep: impl Fn(&Agent) -> bool) -> Option<Position> {
        let grid = self.grid();
        self.agents
            .iter()
            .filter(|a| a.kind == AgentKind::Base && keep(a))
            .min_by_key(|a| (grid.distance(p, a.position), a.position))
            .map(|a| a.position)
    }

    /// Closest base owned by `owner`, ties resolved by position.
    pub fn nearest_base(&self, owner: usize, p: Position) -> Option<Position> {
        self.nearest_base_where(p, |a| a.owner == owner)
    }

    pub fn nearest_enemy_base(&self, owner: usize, p: Position) -> Option<Position> {
        self.nearest_base_where(p, |a| a.owner != owner)
    }

    pub fn total_trees(&self) -> usize {
        self.trees.len()
    }

    /// Turns a tree has left before it dies.
    pub fn remaining_life(&self, tree: &Tree) -> i32 {
        self.config.tree_lifespan - tree.age
    }

    /// Price of planting for `owner`: flat until they own a tree, then inflating
    /// with the number of trees on the board.
    pub fn plant_cost(&self, owner: usize) -> f64 {
        let base = self.config.rec_planter_cost;
        if self.players[owner].trees.is_empty() {
            base
        } else {
            base + self.config.plant_cost_inflation_ratio
                * self
                    .config
                    .plant_cost_inflation_base
                    .powi(self.total_trees() as i32)
        }
    }

    pub fn spawn_cost(&self, kind: AgentKind) -> f64 {
        match kind {
            AgentKind::Planter => self.config.rec_planter_cost,
            _ => self.config.rec_collector_cost,
        }
    }

    /// Expected carbon on `p` after `turns` more turns, assuming trees keep
    /// their current positions and age by one per turn.
    pub fn projected_carbon(&self, p: Position, turns: i32) -> f64 {
        let cell = self.map.cell(p);
        let mut carbon = cell.carbon;
        if turns <= 0 {
            return carbon;
        }
        let lifespan = self.config.tree_lifespan;
        let mut start = 0;
        if let Some(tree) = cell.tree.map(|h| &self.trees[h]) {
            start = lifespan - tree.age + 1;
            if start > turns {
                return 0.0;
            }
            carbon = REGROWTH_AFTER_TREE;
        }

        let neighbour_ages: Vec<i32> = self
            .grid()
            .neighbors(p)
            .iter()
            .filter_map(|n| self.tree_at(*n).map(|t| t.age))
            .collect();

        for i in start..turns {
            let alive = neighbour_ages.iter().filter(|age| *age + i <= lifespan).count();
            if alive == 0 {
                carbon *= GROWTH_RATE;
            } else {
                carbon *= 1.0 - DRAIN_PER_TREE * alive as f64;
            }
            carbon = carbon.min(self.config.max_cell_carbon);
        }
        carbon
    }
}
