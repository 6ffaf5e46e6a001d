//! Wire format of the per-turn observation and the static game configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::infra::DEFAULT_GRID_SIZE;

/// Static rules of the match, keyed the way the simulator names them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub size: i32,
    pub episode_steps: i32,
    pub rec_collector_cost: f64,
    pub rec_planter_cost: f64,
    pub plant_cost_inflation_ratio: f64,
    pub plant_cost_inflation_base: f64,
    pub tree_lifespan: i32,
    pub max_cell_carbon: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            episode_steps: 300,
            rec_collector_cost: 30.0,
            rec_planter_cost: 30.0,
            plant_cost_inflation_ratio: 5.0,
            plant_cost_inflation_base: 1.235,
            tree_lifespan: 50,
            max_cell_carbon: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerKind {
    Collector,
    Planter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerObservation {
    pub index: usize,
    #[serde(default)]
    pub carbon: f64,
    pub kind: WorkerKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeObservation {
    pub index: usize,
    pub owner: usize,
    #[serde(default)]
    pub age: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerObservation {
    pub cash: f64,
    /// Base id -> cell index.
    pub bases: BTreeMap<String, usize>,
    pub workers: BTreeMap<String, WorkerObservation>,
    /// Ids of the trees this player owns.
    pub trees: Vec<String>,
}

/// Everything the simulator tells the current player at the start of a turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub step: i32,
    /// Index of the player we are planning for.
    pub player: usize,
    pub carbon: Vec<f64>,
    pub players: Vec<PlayerObservation>,
    #[serde(default)]
    pub trees: BTreeMap<String, TreeObservation>,
}

impl Observation {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_observation() {
        let value = json!({
            "step": 3,
            "player": 1,
            "carbon": [0.0, 12.5],
            "players": [
                {"cash": 10.0, "bases": {"b0": 0}},
                {
                    "cash": 40.0,
                    "bases": {"b1": 1},
                    "workers": {"w1": {"index": 0, "carbon": 2.0, "kind": "PLANTER"}},
                    "trees": ["t1"]
                }
            ],
            "trees": {"t1": {"index": 1, "owner": 1, "age": 4}}
        });
        let obs: Observation = serde_json::from_value(value).unwrap();
        assert_eq!(obs.player, 1);
        assert_eq!(obs.players[1].workers["w1"].kind, WorkerKind::Planter);
        assert!(obs.players[0].workers.is_empty());
        assert_eq!(obs.trees["t1"].age, 4);
    }

    #[test]
    fn test_unknown_worker_kind_rejected() {
        let text = r#"{"step":0,"player":0,"carbon":[],"players":[{"workers":{"w":{"index":0,"kind":"MINER"}}}]}"#;
        assert!(Observation::from_json(text).is_err());
    }

    #[test]
    fn test_game_config_defaults_fill_missing_keys() {
        let config: GameConfig = serde_json::from_str(r#"{"size": 9, "recPlanterCost": 20}"#).unwrap();
        assert_eq!(config.size, 9);
        assert_eq!(config.rec_planter_cost, 20.0);
        assert_eq!(config.tree_lifespan, 50);
    }
}
