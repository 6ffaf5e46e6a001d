use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::infra::Direction;

/// A primitive order for one agent. Staying put is expressed by omission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    SpawnCollector,
    SpawnPlanter,
    Move(Direction),
}

impl Command {
    pub fn wire_name(self) -> &'static str {
        match self {
            Command::SpawnCollector => "RECCOLLECTOR",
            Command::SpawnPlanter => "RECPLANTER",
            Command::Move(Direction::Up) => "UP",
            Command::Move(Direction::Right) => "RIGHT",
            Command::Move(Direction::Down) => "DOWN",
            Command::Move(Direction::Left) => "LEFT",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Some(match name {
            "RECCOLLECTOR" => Command::SpawnCollector,
            "RECPLANTER" => Command::SpawnPlanter,
            "UP" => Command::Move(Direction::Up),
            "RIGHT" => Command::Move(Direction::Right),
            "DOWN" => Command::Move(Direction::Down),
            "LEFT" => Command::Move(Direction::Left),
            _ => return None,
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl Serialize for Command {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for Command {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Command::from_wire_name(&name)
            .ok_or_else(|| de::Error::custom(format!("unknown command `{name}`")))
    }
}

/// Output of one turn: agent id to command, ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commands(BTreeMap<String, Command>);

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, agent_id: impl Into<String>, command: Command) {
        self.0.insert(agent_id.into(), command);
    }

    pub fn get(&self, agent_id: &str) -> Option<Command> {
        self.0.get(agent_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Command)> {
        self.0.iter().map(|(id, c)| (id.as_str(), *c))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for name in ["RECCOLLECTOR", "RECPLANTER", "UP", "RIGHT", "DOWN", "LEFT"] {
            assert_eq!(Command::from_wire_name(name).unwrap().wire_name(), name);
        }
        assert_eq!(Command::from_wire_name("STAY"), None);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let mut commands = Commands::new();
        commands.insert("w2", Command::Move(Direction::Left));
        commands.insert("b1", Command::SpawnPlanter);
        assert_eq!(commands.to_json(), r#"{"b1":"RECPLANTER","w2":"LEFT"}"#);
    }

    #[test]
    fn test_parses_wire_object() {
        let commands = Commands::from_json(r#"{"b1":"RECCOLLECTOR","w1":"DOWN"}"#).unwrap();
        assert_eq!(commands.get("b1"), Some(Command::SpawnCollector));
        assert_eq!(commands.get("w1"), Some(Command::Move(Direction::Down)));
        assert!(Commands::from_json(r#"{"w1":"STAY"}"#).is_err());
    }
}
