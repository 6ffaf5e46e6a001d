//! Catalog of per-agent intents. Every intent scores (agent, target cell)
//! pairs; `None` marks a pair as infeasible.

mod contest;
mod defend;
mod guard;
mod harvest;
mod plant;
mod raid;
mod returning;
mod spawn;

pub use contest::{Contest, Protect};
pub use defend::Defend;
pub use guard::Guard;
pub use harvest::Harvest;
pub use plant::Plant;
pub use raid::Raid;
pub use returning::{Return, RushHome, StepHome};
pub use spawn::{SpawnCollector, SpawnPlanter};

use std::fmt;

use crate::config::PlannerConfig;
use crate::infra::Position;
use crate::planners::heuristic::planner_state::PlannerState;
use crate::state::{Agent, AgentHandle, AgentKind, WorldState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Intent {
    SpawnCollector,
    SpawnPlanter,
    Harvest,
    Return,
    StepHome,
    RushHome,
    Defend,
    Raid,
    Plant,
    Contest,
    Protect,
    Guard,
}

impl Intent {
    pub fn name(self) -> &'static str {
        match self {
            Intent::SpawnCollector => "SpawnCollector",
            Intent::SpawnPlanter => "SpawnPlanter",
            Intent::Harvest => "Harvest",
            Intent::Return => "Return",
            Intent::StepHome => "StepHome",
            Intent::RushHome => "RushHome",
            Intent::Defend => "Defend",
            Intent::Raid => "Raid",
            Intent::Plant => "Plant",
            Intent::Contest => "Contest",
            Intent::Protect => "Protect",
            Intent::Guard => "Guard",
        }
    }

    pub fn is_spawn(self) -> bool {
        matches!(self, Intent::SpawnCollector | Intent::SpawnPlanter)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scored proposal: move `agent` toward `target` for `intent`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub agent: AgentHandle,
    pub intent: Intent,
    pub target: Position,
    pub score: f64,
}

/// Read-only inputs shared by every scorer during one turn.
pub struct PlanContext<'a> {
    pub world: &'a WorldState,
    pub config: &'a PlannerConfig,
    pub memory: &'a PlannerState,
    /// Carried carbon above which collectors stop harvesting and head home.
    pub go_home_threshold: f64,
    pub raider: Option<AgentHandle>,
}

impl<'a> PlanContext<'a> {
    pub fn new(
        world: &'a WorldState,
        config: &'a PlannerConfig,
        memory: &'a PlannerState,
        raider: Option<AgentHandle>,
    ) -> Self {
        Self {
            world,
            config,
            memory,
            go_home_threshold: go_home_threshold(world, config),
            raider,
        }
    }

    /// Nearest base of the agent's owner.
    pub fn home(&self, agent: &Agent) -> Option<Position> {
        self.world.nearest_base(agent.owner, agent.position)
    }

    pub fn distance(&self, p: Position, q: Position) -> i32 {
        self.world.grid().distance(p, q)
    }

    pub fn is_raider(&self, handle: AgentHandle) -> bool {
        self.raider == Some(handle)
    }
}

/// Collectors hoard once the economy is saturated late in the game.
pub fn go_home_threshold(world: &WorldState, config: &PlannerConfig) -> f64 {
    let me = world.me();
    if world.step > config.hoard_after_step
        && me.worker_count() >= config.worker_cap
        && me.cash > config.hoard_min_cash
    {
        config.hoard_threshold
    } else {
        config.go_home_threshold
    }
}

pub trait IntentScorer {
    fn intent(&self) -> Intent;

    fn kind(&self) -> AgentKind;

    /// Score of sending `agent` to `target`, or `None` when infeasible.
    fn score(&self, ctx: &PlanContext, agent: &Agent, target: Position) -> Option<f64>;

    /// Cells worth scoring. Defaults to the whole board.
    fn candidate_targets(&self, ctx: &PlanContext, _agent: &Agent) -> Vec<Position> {
        ctx.world.grid().positions().collect()
    }

    fn generate(&self, ctx: &PlanContext, handle: AgentHandle) -> Vec<Plan> {
        let agent = ctx.world.agent(handle);
        self.candidate_targets(ctx, agent)
            .into_iter()
            .filter_map(|target| {
                let score = self.score(ctx, agent, target)?;
                (score.is_finite() && score > 0.0).then_some(Plan {
                    agent: handle,
                    intent: self.intent(),
                    target,
                    score,
                })
            })
            .collect()
    }
}

pub fn catalog() -> Vec<Box<dyn IntentScorer>> {
    vec![
        Box::new(SpawnCollector),
        Box::new(SpawnPlanter),
        Box::new(Harvest),
        Box::new(Return),
        Box::new(StepHome),
        Box::new(RushHome),
        Box::new(Defend),
        Box::new(Raid),
        Box::new(Plant),
        Box::new(Contest),
        Box::new(Protect),
        Box::new(Guard),
    ]
}

/// Every positive, feasible plan for all of our agents.
#[tracing::instrument(level = "debug", skip_all, fields(step = ctx.world.step))]
pub fn enumerate_plans(ctx: &PlanContext, scorers: &[Box<dyn IntentScorer>]) -> Vec<Plan> {
    let mut plans = Vec::new();
    for handle in ctx.world.own_agents() {
        let agent = ctx.world.agent(handle);
        let raider = ctx.is_raider(handle);
        for scorer in scorers.iter().filter(|s| s.kind() == agent.kind) {
            // the raider only raids
            if raider != (scorer.intent() == Intent::Raid) {
                continue;
            }
            let mut generated = scorer.generate(ctx, handle);
            if agent.kind == AgentKind::Planter
                && let Some(previous) = ctx.memory.committed_target(&agent.id)
            {
                for plan in generated.iter_mut().filter(|p| p.target == previous) {
                    plan.score += ctx.config.commitment_bonus;
                }
            }
            plans.extend(generated);
        }
    }
    tracing::debug!("{} candidate plans", plans.len());
    plans
}

/// Is an enemy worker of `kind` within `radius` of `p`?
pub(crate) fn enemy_near(
    world: &WorldState,
    owner: usize,
    kind: AgentKind,
    p: Position,
    radius: i32,
) -> bool {
    let grid = world.grid();
    world
        .enemy_agents(owner, kind)
        .any(|a| grid.distance(a.position, p) <= radius)
}
