use crate::infra::Position;
use crate::state::{Agent, AgentKind};

use super::harvest::{arrival_yield, out_of_time};
use super::{Intent, IntentScorer, PlanContext};

fn home_only(ctx: &PlanContext, agent: &Agent) -> Vec<Position> {
    ctx.home(agent).into_iter().collect()
}

/// Head back to base, preferring cells that lie on a shortest path home so
/// the trip still picks up some carbon.
pub struct Return;

impl IntentScorer for Return {
    fn intent(&self) -> Intent {
        Intent::Return
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Collector
    }

    fn score(&self, ctx: &PlanContext, agent: &Agent, target: Position) -> Option<f64> {
        let world = ctx.world;
        if agent.carried <= ctx.go_home_threshold || out_of_time(ctx, agent) {
            return None;
        }
        if world.tree_at(target).is_some() || world.is_enemy_base(agent.owner, target) {
            return None;
        }
        let home = ctx.home(agent)?;
        let base = arrival_yield(ctx, agent, target);
        if world.grid().on_shortest_path(agent.position, target, home) {
            Some(base + ctx.config.on_path_bonus)
        } else {
            Some(base - ctx.config.off_path_penalty)
        }
    }
}

/// Full collector right next to home: just step in.
pub struct StepHome;

impl IntentScorer for StepHome {
    fn intent(&self) -> Intent {
        Intent::StepHome
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Collector
    }

    fn candidate_targets(&self, ctx: &PlanContext, agent: &Agent) -> Vec<Position> {
        home_only(ctx, agent)
    }

    fn score(&self, ctx: &PlanContext, agent: &Agent, target: Position) -> Option<f64> {
        let home = ctx.home(agent)?;
        (target == home
            && agent.carried > ctx.go_home_threshold
            && ctx.distance(agent.position, home) <= 1)
            .then_some(ctx.config.step_home_score)
    }
}

/// End of game: bank whatever is carried before time runs out.
pub struct RushHome;

impl IntentScorer for RushHome {
    fn intent(&self) -> Intent {
        Intent::RushHome
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Collector
    }

    fn candidate_targets(&self, ctx: &PlanContext, agent: &Agent) -> Vec<Position> {
        home_only(ctx, agent)
    }

    fn score(&self, ctx: &PlanContext, agent: &Agent, target: Position) -> Option<f64> {
        let home = ctx.home(agent)?;
        let config = ctx.config;
        (target == home
            && agent.carried > config.rush_min_carried
            && ctx.distance(agent.position, home) >= ctx.world.remaining_turns() - config.rush_margin)
            .then_some(config.rush_score)
    }
}
