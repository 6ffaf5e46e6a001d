use crate::infra::Position;
use crate::state::{Agent, AgentKind};

use super::{Intent, IntentScorer, PlanContext};

/// The designated raider camps around the enemy base and rams loaded
/// enemy collectors that come within reach.
pub struct Raid;

impl Raid {
    fn strike_value(ctx: &PlanContext, agent: &Agent, target: Position) -> Option<f64> {
        let victim = ctx.world.worker_at(target)?;
        (victim.owner != agent.owner
            && victim.kind == AgentKind::Collector
            && victim.carried > agent.carried
            && ctx.distance(agent.position, target) == 1)
            .then(|| ctx.config.raid_strike_score + victim.carried)
    }
}

impl IntentScorer for Raid {
    fn intent(&self) -> Intent {
        Intent::Raid
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Collector
    }

    fn candidate_targets(&self, ctx: &PlanContext, agent: &Agent) -> Vec<Position> {
        let grid = ctx.world.grid();
        let Some(enemy_base) = ctx.world.nearest_enemy_base(agent.owner, agent.position) else {
            return Vec::new();
        };
        let mut targets = grid.neighbors(enemy_base).to_vec();
        if ctx.distance(agent.position, enemy_base) <= ctx.config.raid_engage_radius {
            targets.extend(grid.neighbors(agent.position));
        }
        targets.sort();
        targets.dedup();
        targets
    }

    fn score(&self, ctx: &PlanContext, agent: &Agent, target: Position) -> Option<f64> {
        let raider = ctx.raider.map(|h| ctx.world.agent(h))?;
        if raider.id != agent.id {
            return None;
        }
        let enemy_base = ctx.world.nearest_enemy_base(agent.owner, agent.position)?;
        if ctx.distance(agent.position, enemy_base) <= ctx.config.raid_engage_radius
            && let Some(value) = Self::strike_value(ctx, agent, target)
        {
            return Some(value);
        }
        (ctx.distance(target, enemy_base) == 1)
            .then(|| ctx.config.raid_score - ctx.distance(agent.position, target) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::planners::heuristic::planner_state::PlannerState;
    use crate::planners::heuristic::plans::Plan;
    use crate::planners::heuristic::plans::test_support::Board;

    fn raid_plans(board: &Board) -> Vec<Plan> {
        let world = board.build();
        let config = PlannerConfig::default();
        let memory = PlannerState::new();
        let raider = world.me().collectors[0];
        let ctx = PlanContext::new(&world, &config, &memory, Some(raider));
        Raid.generate(&ctx, raider)
    }

    #[test]
    fn test_far_raider_heads_for_enemy_base_cross() {
        let board = Board::new().collector(0, "c1", 1, 1, 0.0);
        let plans = raid_plans(&board);
        assert_eq!(plans.len(), 4);
        let best = plans
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .unwrap();
        // closest cross cells of the base at (7,7)
        assert!(best.target == Position::new(6, 7) || best.target == Position::new(7, 6));
    }

    #[test]
    fn test_close_raider_strikes_richest_neighbour() {
        let board = Board::new()
            .collector(0, "c1", 6, 6, 0.0)
            .collector(1, "e1", 6, 7, 20.0)
            .collector(1, "e2", 5, 6, 40.0);
        let plans = raid_plans(&board);
        let best = plans
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .unwrap();
        assert_eq!(best.target, Position::new(5, 6));
        assert_eq!(best.score, 9_040.0);
    }

    #[test]
    fn test_non_raider_gets_nothing() {
        let board = Board::new()
            .collector(0, "c1", 1, 1, 0.0)
            .collector(0, "c2", 2, 2, 0.0);
        let world = board.build();
        let config = PlannerConfig::default();
        let memory = PlannerState::new();
        let ctx = PlanContext::new(&world, &config, &memory, Some(world.me().collectors[0]));
        assert!(Raid.generate(&ctx, world.me().collectors[1]).is_empty());
    }
}
