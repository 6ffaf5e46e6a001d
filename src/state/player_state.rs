use super::map::{AgentHandle, TreeHandle};

/// Holdings of one player this turn. Handles index into the owning `WorldState`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerState {
    pub index: usize,
    pub cash: f64,
    pub bases: Vec<AgentHandle>,
    pub collectors: Vec<AgentHandle>,
    pub planters: Vec<AgentHandle>,
    pub trees: Vec<TreeHandle>,
}

impl PlayerState {
    pub fn new(index: usize, cash: f64) -> Self {
        Self {
            index,
            cash,
            ..Self::default()
        }
    }

    pub fn worker_count(&self) -> usize {
        self.collectors.len() + self.planters.len()
    }

    pub fn workers(&self) -> impl Iterator<Item = AgentHandle> + '_ {
        self.collectors.iter().chain(self.planters.iter()).copied()
    }
}
