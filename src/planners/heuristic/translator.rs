use std::collections::HashSet;

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, trace};

use crate::config::{MoveTieBreak, PlannerConfig};
use crate::infra::{Direction, Position};
use crate::planners::heuristic::occupancy::OccupancyTracker;
use crate::planners::heuristic::plans::{Intent, Plan};
use crate::state::{Agent, AgentHandle, AgentKind, Command, Commands, WorldState};

/// Turns resolved plans into one primitive command per agent while keeping
/// our own agents out of each other's way.
pub struct MoveTranslator<'a, R: Rng> {
    world: &'a WorldState,
    config: &'a PlannerConfig,
    rng: &'a mut R,
    occupancy: OccupancyTracker,
    /// Agents whose end-of-turn cell is already fixed.
    settled: HashSet<AgentHandle>,
}

impl<'a, R: Rng> MoveTranslator<'a, R> {
    pub fn new(world: &'a WorldState, config: &'a PlannerConfig, rng: &'a mut R) -> Self {
        Self {
            world,
            config,
            rng,
            occupancy: OccupancyTracker::new(),
            settled: HashSet::new(),
        }
    }

    pub fn occupancy(&self) -> &OccupancyTracker {
        &self.occupancy
    }

    pub fn into_occupancy(self) -> OccupancyTracker {
        self.occupancy
    }

    /// `winners` must be in resolver order.
    #[tracing::instrument(level = "debug", skip_all, fields(plans = winners.len()))]
    pub fn translate(&mut self, winners: &[Plan]) -> Commands {
        let world = self.world;
        let mut commands = Commands::new();
        self.claim_idle(winners);

        for plan in winners.iter().filter(|p| !p.intent.is_spawn()) {
            let agent = world.agent(plan.agent);
            if let Some(dir) = self.translate_worker(plan) {
                trace!("{} {} -> {:?} via {:?}", agent.id, plan.intent, plan.target, dir);
                commands.insert(agent.id.clone(), Command::Move(dir));
            }
        }

        for plan in winners.iter().filter(|p| p.intent.is_spawn()) {
            let base = world.agent(plan.agent);
            if self.occupancy.is_claimed(base.position) {
                debug!("{} spawn suppressed, base cell is taken", base.id);
                continue;
            }
            let (command, kind) = match plan.intent {
                Intent::SpawnPlanter => (Command::SpawnPlanter, AgentKind::Planter),
                _ => (Command::SpawnCollector, AgentKind::Collector),
            };
            self.occupancy.claim(base.position, plan.agent, kind);
            commands.insert(base.id.clone(), command);
        }
        commands
    }

    /// Workers without a plan stay where they are.
    fn claim_idle(&mut self, winners: &[Plan]) {
        let world = self.world;
        let planned: HashSet<AgentHandle> = winners.iter().map(|p| p.agent).collect();
        for handle in world.own_agents() {
            let agent = world.agent(handle);
            if agent.is_worker() && !planned.contains(&handle) {
                self.occupancy.claim(agent.position, handle, agent.kind);
                self.settled.insert(handle);
            }
        }
    }

    fn translate_worker(&mut self, plan: &Plan) -> Option<Direction> {
        let dir = self.choose_move(plan);
        self.settled.insert(plan.agent);
        dir
    }

    fn choose_move(&mut self, plan: &Plan) -> Option<Direction> {
        let world = self.world;
        let agent = world.agent(plan.agent);
        let grid = world.grid();

        if plan.target == agent.position
            && !self.occupancy.claimed_by_other(agent.position, plan.agent)
        {
            self.occupancy.claim(agent.position, plan.agent, agent.kind);
            return None;
        }

        let safe: Vec<(Direction, Position)> = Direction::ALL
            .into_iter()
            .map(|d| (d, grid.translate(agent.position, d)))
            .filter(|(_, dest)| self.is_safe(plan.agent, agent, *dest))
            .collect();
        let current = grid.distance(agent.position, plan.target);
        let closer: Vec<(Direction, Position)> = safe
            .iter()
            .copied()
            .filter(|(_, dest)| grid.distance(*dest, plan.target) < current)
            .collect();

        let options = if closer.is_empty() { safe } else { closer };
        match self.pick(agent, plan.intent, &options) {
            Some((dir, dest)) => {
                self.occupancy.claim(dest, plan.agent, agent.kind);
                Some(dir)
            }
            None => {
                debug!("{} boxed in, staying", agent.id);
                self.occupancy.claim(agent.position, plan.agent, agent.kind);
                None
            }
        }
    }

    fn is_safe(&self, handle: AgentHandle, agent: &Agent, dest: Position) -> bool {
        let world = self.world;
        let home_for_collector =
            agent.kind == AgentKind::Collector && world.is_own_base(agent.owner, dest);

        if self.occupancy.claimed_by_other(dest, handle) && !home_for_collector {
            return false;
        }
        if let Some(other_handle) = world.map.cell(dest).worker
            && other_handle != handle
            && world.is_own(other_handle)
            && !home_for_collector
        {
            let other = world.agent(other_handle);
            // a teammate that has not moved yet may still have to stay put
            if !self.settled.contains(&other_handle)
                || (other.kind == agent.kind && other.carried >= agent.carried)
            {
                return false;
            }
        }
        if agent.carried > 0.0 && world.is_enemy_base(agent.owner, dest) {
            return false;
        }
        !self.is_threatened(agent, dest)
    }

    /// An enemy collector on or next to `dest` that would win a collision.
    fn is_threatened(&self, agent: &Agent, dest: Position) -> bool {
        let grid = self.world.grid();
        self.world
            .enemy_agents(agent.owner, AgentKind::Collector)
            .filter(|enemy| grid.distance(enemy.position, dest) <= 1)
            .any(|enemy| match agent.kind {
                AgentKind::Collector => enemy.carried <= agent.carried,
                _ => true,
            })
    }

    fn pick(
        &mut self,
        agent: &Agent,
        intent: Intent,
        options: &[(Direction, Position)],
    ) -> Option<(Direction, Position)> {
        let world = self.world;
        let grid = world.grid();
        if intent == Intent::Defend
            && let Some(home) = world.nearest_base(agent.owner, agent.position)
        {
            return options
                .iter()
                .copied()
                .min_by_key(|(d, dest)| (grid.distance(*dest, home), *d));
        }
        match self.config.tie_break {
            MoveTieBreak::Seeded => options.choose(&mut *self.rng).copied(),
            MoveTieBreak::LowestResource => options.iter().copied().min_by(|a, b| {
                world
                    .map
                    .carbon(a.1)
                    .total_cmp(&world.map.carbon(b.1))
                    .then(a.0.cmp(&b.0))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planners::heuristic::plans::test_support::Board;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn plan(agent: AgentHandle, intent: Intent, x: i32, y: i32) -> Plan {
        Plan {
            agent,
            intent,
            target: Position::new(x, y),
            score: 1.0,
        }
    }

    fn run(world: &WorldState, winners: &[Plan]) -> (Commands, OccupancyTracker) {
        let config = PlannerConfig {
            tie_break: MoveTieBreak::LowestResource,
            ..PlannerConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut translator = MoveTranslator::new(world, &config, &mut rng);
        let commands = translator.translate(winners);
        (commands, translator.into_occupancy())
    }

    #[test]
    fn test_moves_toward_target() {
        let world = Board::new().collector(0, "c1", 0, 0, 0.0).build();
        let c1 = world.me().collectors[0];
        let (commands, _) = run(&world, &[plan(c1, Intent::Harvest, 0, 1)]);
        assert_eq!(commands.get("c1"), Some(Command::Move(Direction::Up)));

        let (commands, _) = run(&world, &[plan(c1, Intent::Harvest, 1, 0)]);
        assert_eq!(commands.get("c1"), Some(Command::Move(Direction::Right)));
    }

    #[test]
    fn test_staying_emits_nothing() {
        let world = Board::new().collector(0, "c1", 3, 3, 0.0).build();
        let c1 = world.me().collectors[0];
        let (commands, occupancy) = run(&world, &[plan(c1, Intent::Harvest, 3, 3)]);
        assert!(commands.is_empty());
        assert_eq!(occupancy.destination_of(c1), Some(Position::new(3, 3)));
    }

    #[test]
    fn test_idle_worker_blocks_cell() {
        let world = Board::new()
            .collector(0, "c1", 3, 3, 0.0)
            .planter(0, "p1", 3, 4)
            .build();
        let c1 = world.me().collectors[0];
        // only way closer is through the idle planter
        let (commands, _) = run(&world, &[plan(c1, Intent::Harvest, 3, 5)]);
        assert_ne!(commands.get("c1"), Some(Command::Move(Direction::Up)));
        assert!(commands.get("c1").is_some());
    }

    #[test]
    fn test_second_mover_avoids_claimed_cell() {
        let world = Board::new()
            .collector(0, "c1", 3, 3, 0.0)
            .collector(0, "c2", 5, 3, 0.0)
            .build();
        let c1 = world.me().collectors[0];
        let c2 = world.me().collectors[1];
        let (commands, occupancy) = run(
            &world,
            &[
                plan(c1, Intent::Harvest, 4, 3),
                plan(c2, Intent::Harvest, 4, 4),
            ],
        );
        assert_eq!(commands.get("c1"), Some(Command::Move(Direction::Right)));
        assert_eq!(occupancy.destination_of(c1), Some(Position::new(4, 3)));
        assert_ne!(occupancy.destination_of(c2), Some(Position::new(4, 3)));
    }

    #[test]
    fn test_never_steps_onto_teammate_that_has_not_moved() {
        let world = Board::new()
            .collector(0, "c1", 3, 3, 0.0)
            .planter(0, "p1", 4, 3)
            .build();
        let c1 = world.me().collectors[0];
        let p1 = world.me().planters[0];
        let (_, occupancy) = run(
            &world,
            &[
                plan(c1, Intent::Harvest, 5, 3),
                plan(p1, Intent::Guard, 4, 3),
            ],
        );
        assert_ne!(occupancy.destination_of(c1), Some(Position::new(4, 3)));
        assert_eq!(occupancy.destination_of(p1), Some(Position::new(4, 3)));

        // once p1 has moved off, its old cell is free
        let (commands, _) = run(
            &world,
            &[
                plan(p1, Intent::Plant, 4, 5),
                plan(c1, Intent::Harvest, 5, 3),
            ],
        );
        assert_eq!(commands.get("p1"), Some(Command::Move(Direction::Up)));
        assert_eq!(commands.get("c1"), Some(Command::Move(Direction::Right)));
    }

    #[test]
    fn test_collectors_share_home() {
        let world = Board::new()
            .collector(0, "c1", 0, 1, 150.0)
            .collector(0, "c2", 1, 0, 150.0)
            .build();
        let c1 = world.me().collectors[0];
        let c2 = world.me().collectors[1];
        let (commands, _) = run(
            &world,
            &[
                plan(c1, Intent::StepHome, 0, 0),
                plan(c2, Intent::StepHome, 0, 0),
            ],
        );
        assert_eq!(commands.get("c1"), Some(Command::Move(Direction::Down)));
        assert_eq!(commands.get("c2"), Some(Command::Move(Direction::Left)));
    }

    #[test]
    fn test_avoids_poorer_enemy_collectors() {
        let world = Board::new()
            .collector(0, "c1", 3, 3, 50.0)
            .collector(1, "e1", 4, 4, 10.0)
            .build();
        let c1 = world.me().collectors[0];
        let (commands, _) = run(&world, &[plan(c1, Intent::Harvest, 5, 3)]);
        // (4,3) is next to e1, so the only closer move is unsafe
        assert_ne!(commands.get("c1"), Some(Command::Move(Direction::Right)));
    }

    #[test]
    fn test_loaded_collector_never_enters_enemy_base() {
        let world = Board::new().collector(0, "c1", 6, 7, 20.0).build();
        let c1 = world.me().collectors[0];
        let (commands, _) = run(&world, &[plan(c1, Intent::Harvest, 8, 7)]);
        assert_ne!(commands.get("c1"), Some(Command::Move(Direction::Right)));
    }

    #[test]
    fn test_spawn_suppressed_when_base_claimed() {
        let world = Board::new()
            .cash(0, 100.0)
            .collector(0, "c1", 0, 1, 150.0)
            .build();
        let c1 = world.me().collectors[0];
        let base = world.me().bases[0];
        let (commands, _) = run(
            &world,
            &[
                plan(c1, Intent::StepHome, 0, 0),
                plan(base, Intent::SpawnCollector, 0, 0),
            ],
        );
        assert_eq!(commands.get("base0"), None);

        let (commands, _) = run(&world, &[plan(base, Intent::SpawnPlanter, 0, 0)]);
        assert_eq!(commands.get("base0"), Some(Command::SpawnPlanter));
    }

    #[test]
    fn test_defender_keeps_close_to_home() {
        let world = Board::new()
            .collector(0, "c1", 1, 1, 0.0)
            .planter(1, "e1", 2, 2)
            .build();
        let c1 = world.me().collectors[0];
        // Up and Right both get closer and end 3 from home; direction order decides
        let (commands, _) = run(&world, &[plan(c1, Intent::Defend, 2, 2)]);
        assert_eq!(commands.get("c1"), Some(Command::Move(Direction::Up)));
    }

    #[test]
    fn test_seeded_choice_is_reproducible() {
        let world = Board::new().collector(0, "c1", 3, 3, 0.0).build();
        let c1 = world.me().collectors[0];
        let winners = [plan(c1, Intent::Harvest, 5, 5)];
        let config = PlannerConfig::default();
        let pick = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            MoveTranslator::new(&world, &config, &mut rng).translate(&winners)
        };
        assert_eq!(pick(42), pick(42));
    }
}
