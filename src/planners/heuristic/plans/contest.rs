use crate::infra::Position;
use crate::state::{Agent, AgentKind, Tree};

use super::{Intent, IntentScorer, PlanContext};

fn tree_targets(ctx: &PlanContext, keep: impl Fn(&Tree) -> bool) -> Vec<Position> {
    ctx.world
        .trees
        .iter()
        .filter(|t| keep(t))
        .map(|t| t.position)
        .collect()
}

fn travel_penalty(ctx: &PlanContext, agent: &Agent, target: Position) -> f64 {
    ((ctx.distance(agent.position, target) + 1) as f64).ln()
}

/// Seize an enemy tree that will still be standing when we arrive.
pub struct Contest;

impl IntentScorer for Contest {
    fn intent(&self) -> Intent {
        Intent::Contest
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Planter
    }

    fn candidate_targets(&self, ctx: &PlanContext, agent: &Agent) -> Vec<Position> {
        tree_targets(ctx, |t| t.owner != agent.owner)
    }

    fn score(&self, ctx: &PlanContext, agent: &Agent, target: Position) -> Option<f64> {
        let world = ctx.world;
        let config = ctx.config;
        let tree = world.tree_at(target)?;
        if tree.owner == agent.owner || world.players[agent.owner].cash < world.config.rec_planter_cost {
            return None;
        }
        let arrival = ctx.distance(agent.position, target);
        if world.remaining_life(tree) - arrival < config.contest_min_remaining_life {
            return None;
        }
        let mut score = config.preempt_bonus - travel_penalty(ctx, agent, target);
        if ctx
            .home(agent)
            .is_some_and(|home| ctx.distance(home, target) <= config.home_threat_radius)
        {
            score += config.home_threat_bonus;
        }
        Some(score)
    }
}

/// Stand watch over our own trees once we own enough of them.
pub struct Protect;

impl IntentScorer for Protect {
    fn intent(&self) -> Intent {
        Intent::Protect
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Planter
    }

    fn candidate_targets(&self, ctx: &PlanContext, agent: &Agent) -> Vec<Position> {
        tree_targets(ctx, |t| t.owner == agent.owner)
    }

    fn score(&self, ctx: &PlanContext, agent: &Agent, target: Position) -> Option<f64> {
        let tree = ctx.world.tree_at(target)?;
        if tree.owner != agent.owner || ctx.world.total_trees() <= ctx.config.tree_cap {
            return None;
        }
        Some(ctx.config.protect_bonus - travel_penalty(ctx, agent, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::planners::heuristic::planner_state::PlannerState;
    use crate::planners::heuristic::plans::test_support::Board;

    fn score(board: &Board, scorer: &dyn IntentScorer, target: Position) -> Option<f64> {
        let world = board.build();
        let config = PlannerConfig::default();
        let memory = PlannerState::new();
        let ctx = PlanContext::new(&world, &config, &memory, None);
        let agent = world.agent(world.me().planters[0]);
        scorer.score(&ctx, agent, target)
    }

    #[test]
    fn test_contest_far_tree_with_life_left() {
        let board = Board::new()
            .cash(0, 50.0)
            .planter(0, "p1", 5, 5)
            .tree(1, "t1", 5, 9, 10);
        let value = score(&board, &Contest, Position::new(5, 9)).unwrap();
        assert!((value - (50_000.0 - 5f64.ln())).abs() < 1e-9);
    }

    #[test]
    fn test_contest_skips_dying_trees() {
        // 4 steps away, 45 turns old: 1 turn of life left on arrival
        let board = Board::new()
            .cash(0, 50.0)
            .planter(0, "p1", 5, 5)
            .tree(1, "t1", 5, 9, 45);
        assert_eq!(score(&board, &Contest, Position::new(5, 9)), None);
    }

    #[test]
    fn test_contest_bonus_near_home() {
        let board = Board::new()
            .cash(0, 50.0)
            .planter(0, "p1", 2, 2)
            .tree(1, "t1", 2, 3, 1);
        let value = score(&board, &Contest, Position::new(2, 3)).unwrap();
        assert!(value > 51_000.0 - 1.0);
    }

    #[test]
    fn test_protect_only_above_cap() {
        let mut board = Board::new().planter(0, "p1", 5, 5).tree(0, "mine", 5, 6, 1);
        for i in 0..9 {
            board = board.tree(1, &format!("t{i}"), i, 12, 1);
        }
        // exactly at the cap
        assert_eq!(score(&board, &Protect, Position::new(5, 6)), None);
        let board = board.tree(1, "t9", 10, 12, 1);
        let value = score(&board, &Protect, Position::new(5, 6)).unwrap();
        assert!((value - (25_000.0 - 2f64.ln())).abs() < 1e-9);
    }

    #[test]
    fn test_contest_outranks_protect() {
        let mut board = Board::new()
            .cash(0, 50.0)
            .planter(0, "p1", 5, 5)
            .tree(0, "mine", 5, 6, 1)
            .tree(1, "theirs", 9, 9, 1);
        for i in 0..9 {
            board = board.tree(1, &format!("t{i}"), i, 12, 1);
        }
        let contest = score(&board, &Contest, Position::new(9, 9)).unwrap();
        let protect = score(&board, &Protect, Position::new(5, 6)).unwrap();
        assert!(contest > protect);
    }
}
