use crate::infra::Position;
use crate::state::{Agent, AgentKind};

use super::{Intent, IntentScorer, PlanContext, enemy_near};

/// Hold position on our own tree while an enemy planter lurks nearby.
pub struct Guard;

impl IntentScorer for Guard {
    fn intent(&self) -> Intent {
        Intent::Guard
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Planter
    }

    fn candidate_targets(&self, _ctx: &PlanContext, agent: &Agent) -> Vec<Position> {
        vec![agent.position]
    }

    fn score(&self, ctx: &PlanContext, agent: &Agent, target: Position) -> Option<f64> {
        if target != agent.position {
            return None;
        }
        let tree = ctx.world.tree_at(target)?;
        (tree.owner == agent.owner
            && enemy_near(
                ctx.world,
                agent.owner,
                AgentKind::Planter,
                target,
                ctx.config.guard_radius,
            ))
        .then_some(ctx.config.guard_score)
    }
}
