use crate::infra::Position;
use crate::state::{Agent, AgentKind};

use super::{Intent, IntentScorer, PlanContext};

/// Plant a new tree on a bare cell with rich neighbours, away from our base.
pub struct Plant;

impl IntentScorer for Plant {
    fn intent(&self) -> Intent {
        Intent::Plant
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Planter
    }

    fn score(&self, ctx: &PlanContext, agent: &Agent, target: Position) -> Option<f64> {
        let world = ctx.world;
        let config = ctx.config;
        let grid = world.grid();

        if world.total_trees() > config.tree_cap
            || world.players[agent.owner].cash < world.plant_cost(agent.owner)
            || world.base_at(target).is_some()
        {
            return None;
        }
        if world.trees.iter().any(|t| grid.chebyshev(t.position, target) <= 1) {
            return None;
        }
        if ctx
            .home(agent)
            .is_some_and(|home| grid.distance(home, target) <= config.plant_home_exclusion)
        {
            return None;
        }

        let mut carbon = world.map.surrounding_carbon(target) * config.plant_carbon_weight;
        if world
            .nearest_enemy_base(agent.owner, target)
            .is_some_and(|b| grid.distance(b, target) <= config.enemy_half_radius)
        {
            carbon *= config.enemy_half_bonus;
        }
        let d = grid.distance(agent.position, target);
        Some(carbon - ((d + 1) as f64).ln() * config.plant_distance_weight)
    }
}
