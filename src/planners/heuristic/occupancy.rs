use std::collections::HashMap;

use crate::infra::Position;
use crate::state::{AgentHandle, AgentKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    pub agent: AgentHandle,
    pub kind: AgentKind,
}

/// Cells our agents will occupy at the end of this turn. Rebuilt every turn.
#[derive(Debug, Clone, Default)]
pub struct OccupancyTracker {
    claims: HashMap<Position, Vec<Claim>>,
}

impl OccupancyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.claims.clear();
    }

    pub fn claim(&mut self, position: Position, agent: AgentHandle, kind: AgentKind) {
        let claims = self.claims.entry(position).or_default();
        if !claims.iter().any(|c| c.agent == agent) {
            claims.push(Claim { agent, kind });
        }
    }

    pub fn is_claimed(&self, position: Position) -> bool {
        self.claims.get(&position).is_some_and(|c| !c.is_empty())
    }

    /// Claimed by anyone other than `agent`.
    pub fn claimed_by_other(&self, position: Position, agent: AgentHandle) -> bool {
        self.claims
            .get(&position)
            .is_some_and(|claims| claims.iter().any(|c| c.agent != agent))
    }

    pub fn claims_at(&self, position: Position) -> &[Claim] {
        self.claims.get(&position).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn claimed_positions(&self) -> impl Iterator<Item = (Position, &[Claim])> {
        self.claims.iter().map(|(p, c)| (*p, c.as_slice()))
    }

    /// Destination of `agent`, if it claimed one.
    pub fn destination_of(&self, agent: AgentHandle) -> Option<Position> {
        self.claims
            .iter()
            .find(|(_, claims)| claims.iter().any(|c| c.agent == agent))
            .map(|(p, _)| *p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims() {
        let mut tracker = OccupancyTracker::new();
        let p = Position::new(2, 2);
        assert!(!tracker.is_claimed(p));
        tracker.claim(p, 1, AgentKind::Collector);
        tracker.claim(p, 1, AgentKind::Collector);
        assert!(tracker.is_claimed(p));
        assert_eq!(tracker.claims_at(p).len(), 1);
        assert!(!tracker.claimed_by_other(p, 1));
        assert!(tracker.claimed_by_other(p, 2));
        assert_eq!(tracker.destination_of(1), Some(p));
        tracker.clear();
        assert!(!tracker.is_claimed(p));
    }
}
