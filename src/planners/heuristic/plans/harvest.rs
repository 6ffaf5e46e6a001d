use crate::infra::Position;
use crate::state::{Agent, AgentKind};

use super::{Intent, IntentScorer, PlanContext};

/// True when the collector is too far from home to harvest and still make it
/// back before the game ends.
pub(super) fn out_of_time(ctx: &PlanContext, agent: &Agent) -> bool {
    ctx.home(agent).is_some_and(|home| {
        ctx.distance(agent.position, home)
            >= ctx.world.remaining_turns() - ctx.config.harvest_turn_margin
    })
}

/// Carbon expected on `target` when the collector arrives, discounted by travel.
pub(super) fn arrival_yield(ctx: &PlanContext, agent: &Agent, target: Position) -> f64 {
    let d = ctx.distance(agent.position, target);
    ctx.world.projected_carbon(target, d) / (d + 1) as f64
}

pub struct Harvest;

impl IntentScorer for Harvest {
    fn intent(&self) -> Intent {
        Intent::Harvest
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Collector
    }

    fn score(&self, ctx: &PlanContext, agent: &Agent, target: Position) -> Option<f64> {
        let world = ctx.world;
        if world.tree_at(target).is_some() || world.base_at(target).is_some() {
            return None;
        }
        if agent.carried > ctx.go_home_threshold || out_of_time(ctx, agent) {
            return None;
        }
        Some(arrival_yield(ctx, agent, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::planners::heuristic::planner_state::PlannerState;
    use crate::planners::heuristic::plans::test_support::Board;

    fn harvest(board: &Board, target: Position) -> Option<f64> {
        let world = board.build();
        let config = PlannerConfig::default();
        let memory = PlannerState::new();
        let ctx = PlanContext::new(&world, &config, &memory, None);
        let agent = world.agent(world.me().collectors[0]);
        Harvest.score(&ctx, agent, target)
    }

    #[test]
    fn test_discounted_by_distance() {
        let board = Board::new()
            .collector(0, "c1", 0, 0, 0.0)
            .carbon(0, 1, 40.0)
            .carbon(0, 3, 40.0);
        let near = harvest(&board, Position::new(0, 1)).unwrap();
        let far = harvest(&board, Position::new(0, 3)).unwrap();
        assert!((near - 21.0).abs() < 1e-9);
        assert!(near > far);
    }

    #[test]
    fn test_full_collector_stops_harvesting() {
        let board = Board::new().collector(0, "c1", 3, 3, 150.0).carbon(3, 4, 40.0);
        assert_eq!(harvest(&board, Position::new(3, 4)), None);
    }

    #[test]
    fn test_tree_cells_are_skipped() {
        let board = Board::new()
            .collector(0, "c1", 3, 3, 0.0)
            .carbon(3, 4, 40.0)
            .tree(1, "t1", 3, 4, 5);
        assert_eq!(harvest(&board, Position::new(3, 4)), None);
    }

    #[test]
    fn test_no_harvest_when_home_is_out_of_reach() {
        // 6 steps from home with 8 turns left and a margin of 4
        let board = Board::new()
            .step(292)
            .collector(0, "c1", 3, 3, 0.0)
            .carbon(3, 4, 40.0);
        assert_eq!(harvest(&board, Position::new(3, 4)), None);
    }
}
