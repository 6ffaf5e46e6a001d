use crate::infra::Position;
use crate::state::{Agent, AgentKind};

use super::{Intent, IntentScorer, PlanContext};

/// Collectors near home ram intruders they would win a collision against.
pub struct Defend;

impl IntentScorer for Defend {
    fn intent(&self) -> Intent {
        Intent::Defend
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Collector
    }

    fn candidate_targets(&self, ctx: &PlanContext, agent: &Agent) -> Vec<Position> {
        let reach = ctx.config.defense_reach;
        ctx.world
            .grid()
            .positions()
            .filter(|p| {
                let d = ctx.distance(agent.position, *p);
                d >= 1 && d <= reach
            })
            .collect()
    }

    fn score(&self, ctx: &PlanContext, agent: &Agent, target: Position) -> Option<f64> {
        let config = ctx.config;
        let home = ctx.home(agent)?;
        if ctx.distance(agent.position, home) > config.defense_home_radius
            || ctx.distance(agent.position, target) > config.defense_reach
            || ctx.world.remaining_turns() < config.defense_cutoff_turns
        {
            return None;
        }
        let intruder = ctx.world.worker_at(target)?;
        let beatable = intruder.owner != agent.owner
            && match intruder.kind {
                AgentKind::Planter => true,
                AgentKind::Collector => intruder.carried > agent.carried,
                AgentKind::Base => false,
            };
        beatable.then_some(config.defense_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::planners::heuristic::planner_state::PlannerState;
    use crate::planners::heuristic::plans::test_support::Board;

    fn plans(board: &Board) -> Vec<Position> {
        let world = board.build();
        let config = PlannerConfig::default();
        let memory = PlannerState::new();
        let ctx = PlanContext::new(&world, &config, &memory, None);
        Defend
            .generate(&ctx, world.me().collectors[0])
            .into_iter()
            .map(|p| p.target)
            .collect()
    }

    #[test]
    fn test_attacks_adjacent_enemy_planter() {
        let board = Board::new()
            .collector(0, "c1", 1, 0, 0.0)
            .planter(1, "e1", 2, 0);
        assert_eq!(plans(&board), vec![Position::new(2, 0)]);
    }

    #[test]
    fn test_only_richer_collectors_are_rammed() {
        let board = Board::new()
            .collector(0, "c1", 1, 0, 10.0)
            .collector(1, "e1", 2, 0, 10.0);
        assert!(plans(&board).is_empty());
        let board = Board::new()
            .collector(0, "c1", 1, 0, 10.0)
            .collector(1, "e1", 2, 0, 11.0);
        assert_eq!(plans(&board).len(), 1);
    }

    #[test]
    fn test_ignores_intruders_away_from_home() {
        let board = Board::new()
            .collector(0, "c1", 4, 0, 0.0)
            .planter(1, "e1", 5, 0);
        assert!(plans(&board).is_empty());
    }

    #[test]
    fn test_stands_down_at_the_end() {
        let board = Board::new()
            .step(295)
            .collector(0, "c1", 1, 0, 0.0)
            .planter(1, "e1", 2, 0);
        assert!(plans(&board).is_empty());
    }
}
