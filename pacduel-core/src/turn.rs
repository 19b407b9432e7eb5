//! Turn resolver - applies a structurally valid move
//!
//! Resolution order:
//! 1. A pill drop with no pills left is illegal
//! 2. Running into a protected opponent is illegal
//! 3. Stepping on a poison pill kills the mover; it respawns at once, or
//!    waits in a holding cell while the respawn cell is taken
//! 4. Running into an unprotected opponent kills it
//! 5. Eating scores by the rule set's tariff

use serde::{Deserialize, Serialize};

use crate::agent::AgentState;
use crate::board::{Board, Coordinate, Symbol};
use crate::error::BoardError;
use crate::rules::RuleSet;

/// Game-semantic classification of a valid move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnOutcome {
    MoveMade,
    MoveMadeAndPointScored,
    MoveMadeAndBonusPointScored,
    MoveMadeAndDroppedPoisonPill,
    MoveMadeAndDiedFromPoisonPill,
    MoveMadeAndKilledOpponent,
    /// Drop attempted with no pills left
    MoveMadeAndDroppedPoisonPillIllegally,
    /// Moved onto the opponent where the kill rule forbids it
    MoveMadeOntoProtectedOpponent,
}

impl TurnOutcome {
    pub fn is_legal(self) -> bool {
        !matches!(
            self,
            TurnOutcome::MoveMadeAndDroppedPoisonPillIllegally | TurnOutcome::MoveMadeOntoProtectedOpponent
        )
    }
}

/// Result of resolving one move
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnResolution {
    pub outcome: TurnOutcome,
    /// Mover after the move. Unchanged when the outcome is illegal.
    pub mover: AgentState,
    /// Board after the move. The previous board when the outcome is illegal.
    pub board: Board,
    pub dropped_poison_pill: bool,
    pub points: u32,
}

/// Resolve a move that already passed structural validation.
///
/// `target` is the cell the mover stepped onto and `from` the cell it
/// left; `opponent` is where the opponent stood before the move.
pub fn resolve_turn(
    rules: &RuleSet,
    candidate: &Board,
    previous: &Board,
    target: Coordinate,
    from: Coordinate,
    opponent: Coordinate,
    mover: &AgentState,
) -> Result<TurnResolution, BoardError> {
    let dropped = candidate.symbol_at(from)? == Symbol::PoisonPill;
    let eaten = previous.symbol_at(target)?;
    let collided = opponent == target;

    let rejected = |outcome| TurnResolution {
        outcome,
        mover: mover.clone(),
        board: previous.clone(),
        dropped_poison_pill: dropped,
        points: 0,
    };

    let mut next = mover.clone();
    if dropped && !next.spend_poison_pill() {
        return Ok(rejected(TurnOutcome::MoveMadeAndDroppedPoisonPillIllegally));
    }
    if collided && !rules.kill_allowed(target) {
        return Ok(rejected(TurnOutcome::MoveMadeOntoProtectedOpponent));
    }

    next.position = target;
    let mut board = candidate.clone();
    let mut points = 0;

    let outcome = if eaten == Symbol::PoisonPill {
        let (placed, at) = rules
            .respawn
            .place(&board.with_symbol(target, Symbol::Empty)?, next.symbol())?;
        board = placed;
        next.position = at;
        TurnOutcome::MoveMadeAndDiedFromPoisonPill
    } else if collided {
        TurnOutcome::MoveMadeAndKilledOpponent
    } else {
        points = rules.points_for(eaten);
        next.score = next.score.saturating_add(points);
        match eaten {
            Symbol::PowerPellet if points > 0 => TurnOutcome::MoveMadeAndBonusPointScored,
            Symbol::Pellet if points > 0 => TurnOutcome::MoveMadeAndPointScored,
            _ if dropped => TurnOutcome::MoveMadeAndDroppedPoisonPill,
            _ => TurnOutcome::MoveMade,
        }
    };

    Ok(TurnResolution {
        outcome,
        mover: next,
        board,
        dropped_poison_pill: dropped,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Player;
    use crate::rules::KillRule;

    // Respawn cell for these tests is (2, 3); (0, 0) is the holding cell
    fn rules() -> RuleSet {
        let mut rules = RuleSet::default();
        rules.respawn.point = Coordinate::new(2, 3);
        rules.respawn.safe_cells = vec![Coordinate::new(2, 3)];
        rules.respawn.holding_cells = vec![Coordinate::new(0, 0)];
        rules
    }

    fn previous() -> Board {
        Board::from_rows(&[
            " ######",
            "#.A*!B#",
            "#     #",
            "#######",
        ])
        .unwrap()
    }

    fn mover(pills: u8) -> AgentState {
        AgentState::new("pac", Player::A, Coordinate::new(1, 2), pills)
    }

    fn step(vacated: Symbol, to: Coordinate) -> Board {
        previous()
            .with_symbol(Coordinate::new(1, 2), vacated)
            .and_then(|b| b.with_symbol(to, Symbol::PlayerA))
            .unwrap()
    }

    fn resolve(candidate: &Board, to: Coordinate, pills: u8, rules: &RuleSet) -> TurnResolution {
        resolve_turn(
            rules,
            candidate,
            &previous(),
            to,
            Coordinate::new(1, 2),
            Coordinate::new(1, 5),
            &mover(pills),
        )
        .unwrap()
    }

    #[test]
    fn test_plain_move() {
        let to = Coordinate::new(2, 2);
        let r = resolve(&step(Symbol::Empty, to), to, 1, &rules());
        assert_eq!(r.outcome, TurnOutcome::MoveMade);
        assert_eq!(r.mover.position, to);
        assert_eq!(r.points, 0);
    }

    #[test]
    fn test_pellet_scores() {
        let to = Coordinate::new(1, 1);
        let r = resolve(&step(Symbol::Empty, to), to, 1, &rules());
        assert_eq!(r.outcome, TurnOutcome::MoveMadeAndPointScored);
        assert_eq!(r.mover.score, 1);
    }

    #[test]
    fn test_power_pellet_scores_bonus() {
        let to = Coordinate::new(1, 3);
        let r = resolve(&step(Symbol::Empty, to), to, 1, &rules());
        assert_eq!(r.outcome, TurnOutcome::MoveMadeAndBonusPointScored);
        assert_eq!(r.mover.score, 10);

        let custom = rules().with_scoring(1, 25);
        let r = resolve(&step(Symbol::Empty, to), to, 1, &custom);
        assert_eq!(r.points, 25);
    }

    #[test]
    fn test_drop_spends_pill() {
        let to = Coordinate::new(2, 2);
        let r = resolve(&step(Symbol::PoisonPill, to), to, 1, &rules());
        assert_eq!(r.outcome, TurnOutcome::MoveMadeAndDroppedPoisonPill);
        assert!(r.dropped_poison_pill);
        assert_eq!(r.mover.poison_pills, 0);
    }

    #[test]
    fn test_drop_while_scoring_still_spends_pill() {
        let to = Coordinate::new(1, 1);
        let r = resolve(&step(Symbol::PoisonPill, to), to, 1, &rules());
        assert_eq!(r.outcome, TurnOutcome::MoveMadeAndPointScored);
        assert!(r.dropped_poison_pill);
        assert_eq!(r.mover.poison_pills, 0);
    }

    #[test]
    fn test_drop_without_pills_is_illegal() {
        let to = Coordinate::new(2, 2);
        let r = resolve(&step(Symbol::PoisonPill, to), to, 0, &rules());
        assert_eq!(r.outcome, TurnOutcome::MoveMadeAndDroppedPoisonPillIllegally);
        assert!(!r.outcome.is_legal());
        assert_eq!(r.mover.poison_pills, 0);
        assert_eq!(r.mover.position, Coordinate::new(1, 2));
        assert_eq!(r.board, previous());
    }

    #[test]
    fn test_poison_kills_and_respawns() {
        let rules = rules();
        let start = previous()
            .with_symbol(Coordinate::new(1, 2), Symbol::Empty)
            .and_then(|b| b.with_symbol(Coordinate::new(1, 3), Symbol::PlayerA))
            .unwrap();
        let candidate = start
            .with_symbol(Coordinate::new(1, 3), Symbol::Empty)
            .and_then(|b| b.with_symbol(Coordinate::new(1, 4), Symbol::PlayerA))
            .unwrap();
        let agent = AgentState::new("pac", Player::A, Coordinate::new(1, 3), 1);

        let r = resolve_turn(
            &rules,
            &candidate,
            &start,
            Coordinate::new(1, 4),
            Coordinate::new(1, 3),
            Coordinate::new(1, 5),
            &agent,
        )
        .unwrap();

        assert_eq!(r.outcome, TurnOutcome::MoveMadeAndDiedFromPoisonPill);
        assert_eq!(r.mover.position, Coordinate::new(2, 3));
        assert_eq!(r.board.symbol_at(Coordinate::new(1, 4)), Ok(Symbol::Empty));
        assert_eq!(r.board.find_coordinate_of(Symbol::PlayerA), Ok(Coordinate::new(2, 3)));
    }

    #[test]
    fn test_poison_with_blocked_respawn_holds_mover() {
        let rules = rules();
        let start = previous()
            .with_symbol(Coordinate::new(1, 2), Symbol::Empty)
            .and_then(|b| b.with_symbol(Coordinate::new(1, 3), Symbol::PlayerA))
            .and_then(|b| b.with_symbol(Coordinate::new(1, 5), Symbol::Empty))
            .and_then(|b| b.with_symbol(Coordinate::new(2, 3), Symbol::PlayerB))
            .unwrap();
        let candidate = start
            .with_symbol(Coordinate::new(1, 3), Symbol::Empty)
            .and_then(|b| b.with_symbol(Coordinate::new(1, 4), Symbol::PlayerA))
            .unwrap();
        let agent = AgentState::new("pac", Player::A, Coordinate::new(1, 3), 1);

        let r = resolve_turn(
            &rules,
            &candidate,
            &start,
            Coordinate::new(1, 4),
            Coordinate::new(1, 3),
            Coordinate::new(2, 3),
            &agent,
        )
        .unwrap();

        assert_eq!(r.outcome, TurnOutcome::MoveMadeAndDiedFromPoisonPill);
        assert_eq!(r.mover.position, Coordinate::new(0, 0));
        assert_eq!(r.board.find_coordinate_of(Symbol::PlayerA), Ok(Coordinate::new(0, 0)));
        assert_eq!(r.board.find_coordinate_of(Symbol::PlayerB), Ok(Coordinate::new(2, 3)));
        assert_eq!(r.board.symbol_at(Coordinate::new(1, 4)), Ok(Symbol::Empty));
    }

    #[test]
    fn test_huge_tariff_saturates() {
        let to = Coordinate::new(1, 1);
        let custom = rules().with_scoring(u32::MAX, u32::MAX);
        let mut agent = mover(1);
        agent.score = 3;
        let r = resolve_turn(
            &custom,
            &step(Symbol::Empty, to),
            &previous(),
            to,
            Coordinate::new(1, 2),
            Coordinate::new(1, 5),
            &agent,
        )
        .unwrap();
        assert_eq!(r.outcome, TurnOutcome::MoveMadeAndPointScored);
        assert_eq!(r.points, u32::MAX);
        assert_eq!(r.mover.score, u32::MAX);
    }

    #[test]
    fn test_kill_and_protected_opponent() {
        // Opponent stands on the safe respawn cell
        let start = previous()
            .with_symbol(Coordinate::new(1, 5), Symbol::Empty)
            .and_then(|b| b.with_symbol(Coordinate::new(2, 3), Symbol::PlayerB))
            .and_then(|b| b.with_symbol(Coordinate::new(1, 2), Symbol::Empty))
            .and_then(|b| b.with_symbol(Coordinate::new(2, 2), Symbol::PlayerA))
            .unwrap();
        let candidate = start
            .with_symbol(Coordinate::new(2, 2), Symbol::Empty)
            .and_then(|b| b.with_symbol(Coordinate::new(2, 3), Symbol::PlayerA))
            .unwrap();
        let agent = AgentState::new("pac", Player::A, Coordinate::new(2, 2), 1);
        let run = |rules: &RuleSet| {
            resolve_turn(
                rules,
                &candidate,
                &start,
                Coordinate::new(2, 3),
                Coordinate::new(2, 2),
                Coordinate::new(2, 3),
                &agent,
            )
            .unwrap()
        };

        let protected = run(&rules());
        assert_eq!(protected.outcome, TurnOutcome::MoveMadeOntoProtectedOpponent);
        assert!(!protected.outcome.is_legal());

        let killed = run(&rules().with_kill_rule(KillRule::Anywhere));
        assert_eq!(killed.outcome, TurnOutcome::MoveMadeAndKilledOpponent);
        assert_eq!(killed.board.count(Symbol::PlayerB), 0);
    }
}
