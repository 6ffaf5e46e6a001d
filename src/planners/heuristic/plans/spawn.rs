use crate::infra::Position;
use crate::state::{Agent, AgentKind};

use super::{Intent, IntentScorer, PlanContext};

fn can_spawn(ctx: &PlanContext, base: &Agent, target: Position, kind: AgentKind) -> bool {
    let world = ctx.world;
    let player = &world.players[base.owner];
    target == base.position
        && player.cash >= world.spawn_cost(kind)
        && player.worker_count() < ctx.config.worker_cap
        && world.worker_at(base.position).is_none()
}

pub struct SpawnCollector;

impl IntentScorer for SpawnCollector {
    fn intent(&self) -> Intent {
        Intent::SpawnCollector
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Base
    }

    fn candidate_targets(&self, _ctx: &PlanContext, agent: &Agent) -> Vec<Position> {
        vec![agent.position]
    }

    fn score(&self, ctx: &PlanContext, agent: &Agent, target: Position) -> Option<f64> {
        if !can_spawn(ctx, agent, target, AgentKind::Collector) {
            return None;
        }
        let config = ctx.config;
        let player = &ctx.world.players[agent.owner];
        let planters = player.planters.len() as f64;
        let collectors = player.collectors.len() as f64;
        if ctx.world.step < config.opening_steps
            && player.cash > config.opening_cash
            && player.planters.is_empty()
        {
            return Some(config.opening_collector_score);
        }
        Some(
            (config.spawn_major_weight * planters - config.spawn_minor_weight * collectors + 1.0)
                * config.spawn_score_scale
                + config.spawn_collector_edge,
        )
    }
}

pub struct SpawnPlanter;

impl IntentScorer for SpawnPlanter {
    fn intent(&self) -> Intent {
        Intent::SpawnPlanter
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Base
    }

    fn candidate_targets(&self, _ctx: &PlanContext, agent: &Agent) -> Vec<Position> {
        vec![agent.position]
    }

    fn score(&self, ctx: &PlanContext, agent: &Agent, target: Position) -> Option<f64> {
        if !can_spawn(ctx, agent, target, AgentKind::Planter) {
            return None;
        }
        let config = ctx.config;
        let player = &ctx.world.players[agent.owner];
        if player.cash < config.planter_reserve_cash
            && player.collectors.len() < config.min_collectors_for_planter
        {
            return None;
        }
        let planters = player.planters.len() as f64;
        let collectors = player.collectors.len() as f64;
        Some(
            (-config.spawn_major_weight * planters + config.spawn_minor_weight * collectors + 1.0)
                * config.spawn_score_scale,
        )
    }
}
