//! Tunable weights and thresholds for the heuristic planner.

use std::env;
use std::path::Path;

use dotenv::dotenv;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_PATH_VAR: &str = "CARBON_PLANNER_CONFIG";
pub const SEED_VAR: &str = "CARBON_PLANNER_SEED";

/// How the translator picks among equally good moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveTieBreak {
    /// Uniform choice from the planner's seeded generator.
    Seeded,
    /// Step onto the cell with the least carbon, then by direction order.
    LowestResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub seed: u64,
    pub tie_break: MoveTieBreak,

    // Collector
    pub go_home_threshold: f64,
    pub hoard_threshold: f64,
    pub hoard_after_step: i32,
    pub hoard_min_cash: f64,
    pub harvest_turn_margin: i32,
    pub on_path_bonus: f64,
    pub off_path_penalty: f64,
    pub step_home_score: f64,
    pub rush_min_carried: f64,
    pub rush_margin: i32,
    pub rush_score: f64,
    pub defense_home_radius: i32,
    pub defense_reach: i32,
    pub defense_cutoff_turns: i32,
    pub defense_score: f64,

    // Raider
    pub raid_enabled: bool,
    pub raid_engage_radius: i32,
    pub raid_score: f64,
    pub raid_strike_score: f64,
    pub raid_min_cash: f64,
    pub raid_min_workers: usize,
    pub raid_gate_until_step: i32,

    // Planter
    pub tree_cap: usize,
    pub preempt_bonus: f64,
    pub protect_bonus: f64,
    pub guard_score: f64,
    pub guard_radius: i32,
    pub commitment_bonus: f64,
    pub plant_home_exclusion: i32,
    pub enemy_half_radius: i32,
    pub enemy_half_bonus: f64,
    pub plant_carbon_weight: f64,
    pub plant_distance_weight: f64,
    pub contest_min_remaining_life: i32,
    pub home_threat_radius: i32,
    pub home_threat_bonus: f64,

    // Base
    pub worker_cap: usize,
    pub planter_reserve_cash: f64,
    pub min_collectors_for_planter: usize,
    pub spawn_major_weight: f64,
    pub spawn_minor_weight: f64,
    pub spawn_score_scale: f64,
    /// Added to the collector spawn score so collectors win exact ties.
    pub spawn_collector_edge: f64,
    pub opening_steps: i32,
    pub opening_cash: f64,
    pub opening_collector_score: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            tie_break: MoveTieBreak::Seeded,

            go_home_threshold: 100.0,
            hoard_threshold: 2000.0,
            hoard_after_step: 10,
            hoard_min_cash: 500.0,
            harvest_turn_margin: 4,
            on_path_bonus: 100.0,
            off_path_penalty: 100.0,
            step_home_score: 10_000.0,
            rush_min_carried: 10.0,
            rush_margin: 10,
            rush_score: 5_000.0,
            defense_home_radius: 2,
            defense_reach: 1,
            defense_cutoff_turns: 10,
            defense_score: 8_000.0,

            raid_enabled: true,
            raid_engage_radius: 4,
            raid_score: 2_000.0,
            raid_strike_score: 9_000.0,
            raid_min_cash: 60.0,
            raid_min_workers: 4,
            raid_gate_until_step: 20,

            tree_cap: 10,
            preempt_bonus: 50_000.0,
            protect_bonus: 25_000.0,
            guard_score: 60_000.0,
            guard_radius: 2,
            commitment_bonus: 5.0,
            plant_home_exclusion: 7,
            enemy_half_radius: 7,
            enemy_half_bonus: 1.5,
            plant_carbon_weight: 0.05,
            plant_distance_weight: 1.0,
            contest_min_remaining_life: 10,
            home_threat_radius: 7,
            home_threat_bonus: 1_000.0,

            worker_cap: 10,
            planter_reserve_cash: 100.0,
            min_collectors_for_planter: 2,
            spawn_major_weight: 7.0,
            spawn_minor_weight: 3.0,
            spawn_score_scale: 0.001,
            spawn_collector_edge: 0.0001,
            opening_steps: 5,
            opening_cash: 30.0,
            opening_collector_score: 100.0,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preempt_bonus <= self.protect_bonus {
            return Err(ConfigError::BonusOrdering {
                preempt: self.preempt_bonus,
                protect: self.protect_bonus,
            });
        }
        if self.worker_cap == 0 {
            return Err(ConfigError::Invalid {
                field: "worker_cap",
                reason: "must be at least 1".into(),
            });
        }
        if self.go_home_threshold < 0.0 || self.hoard_threshold < self.go_home_threshold {
            return Err(ConfigError::Invalid {
                field: "hoard_threshold",
                reason: format!(
                    "expected 0 <= go_home_threshold ({}) <= hoard_threshold ({})",
                    self.go_home_threshold, self.hoard_threshold
                ),
            });
        }
        Ok(())
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Loads `.env`, then applies `CARBON_PLANNER_CONFIG` (a JSON file) and
    /// `CARBON_PLANNER_SEED` on top of the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        let mut config = match env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        if let Ok(seed) = env::var(SEED_VAR) {
            config.seed = seed.parse().map_err(|_| ConfigError::Invalid {
                field: "seed",
                reason: format!("`{seed}` is not an unsigned integer"),
            })?;
        }
        config.validate()?;
        Ok(config)
    }
}
