//! Per-agent state carried between plies

use serde::{Deserialize, Serialize};

use crate::board::{Coordinate, Symbol};

/// Board label of an agent.
///
/// Labels are relabeled every ply: the agent about to move is always `A`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    pub fn symbol(self) -> Symbol {
        match self {
            Player::A => Symbol::PlayerA,
            Player::B => Symbol::PlayerB,
        }
    }
}

/// Agent value: copied into every branch, never shared
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    pub name: String,
    pub player: Player,
    /// Always on the board; a holding cell while waiting to respawn
    pub position: Coordinate,
    pub score: u32,
    pub poison_pills: u8,
}

impl AgentState {
    pub fn new(name: impl Into<String>, player: Player, position: Coordinate, poison_pills: u8) -> Self {
        Self {
            name: name.into(),
            player,
            position,
            score: 0,
            poison_pills,
        }
    }

    pub fn symbol(&self) -> Symbol {
        self.player.symbol()
    }

    /// Same agent at a re-derived position with its label flipped
    pub fn relabeled(&self, position: Coordinate) -> Self {
        Self {
            player: self.player.opponent(),
            position,
            ..self.clone()
        }
    }

    /// Use one pill. Returns false, leaving the count alone, when none are left.
    pub fn spend_poison_pill(&mut self) -> bool {
        match self.poison_pills.checked_sub(1) {
            Some(left) => {
                self.poison_pills = left;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_labels() {
        assert_eq!(Player::A.opponent(), Player::B);
        assert_eq!(Player::B.symbol(), Symbol::PlayerB);
    }

    #[test]
    fn test_spend_poison_pill_never_negative() {
        let mut agent = AgentState::new("pac", Player::A, Coordinate::new(1, 1), 1);
        assert!(agent.spend_poison_pill());
        assert_eq!(agent.poison_pills, 0);
        assert!(!agent.spend_poison_pill());
        assert_eq!(agent.poison_pills, 0);
    }

    #[test]
    fn test_relabeled_keeps_score() {
        let mut agent = AgentState::new("pac", Player::A, Coordinate::new(1, 1), 1);
        agent.score = 7;
        let next = agent.relabeled(Coordinate::new(0, 0));
        assert_eq!(next.player, Player::B);
        assert_eq!(next.score, 7);
        assert_eq!(next.position, Coordinate::new(0, 0));
        assert_eq!(agent.player, Player::A);
    }
}
