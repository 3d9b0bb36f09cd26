//! Game State Machine
//!
//! Menu → Playing → Ended → Menu. Only the transitions listed in
//! `next_state` are legal; anything else leaves the state untouched.

use crate::Side;

/// Game states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Ended {
        winner: Side,
    },
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            GameState::Menu => "menu",
            GameState::Playing => "playing",
            GameState::Ended { .. } => "ended",
        }
    }
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Start,
    GameOver(Side),
    ReturnToMenu,
}

/// Result of a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from_state: GameState,
    pub to_state: GameState,
    pub action: GameAction,
}

/// Game Finite State Machine
#[derive(Debug, Default)]
pub struct GameFsm {
    state: GameState,
}

impl GameFsm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: GameAction) -> bool {
        self.next_state(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: GameAction) -> TransitionResult {
        let from_state = self.state;
        let to_state = self.next_state(action).unwrap_or(from_state);
        self.state = to_state;
        TransitionResult {
            success: to_state != from_state,
            from_state,
            to_state,
            action,
        }
    }

    fn next_state(&self, action: GameAction) -> Option<GameState> {
        match (self.state, action) {
            (GameState::Menu, GameAction::Start) => Some(GameState::Playing),
            (GameState::Playing, GameAction::GameOver(winner)) => {
                Some(GameState::Ended { winner })
            }
            (GameState::Playing, GameAction::ReturnToMenu) => Some(GameState::Menu),
            (GameState::Ended { .. }, GameAction::ReturnToMenu) => Some(GameState::Menu),
            // Invalid transition
            _ => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    pub fn winner(&self) -> Option<Side> {
        match self.state {
            GameState::Ended { winner } => Some(winner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let fsm = GameFsm::new();
        assert_eq!(fsm.state(), GameState::Menu);
        assert!(fsm.winner().is_none());
    }

    #[test]
    fn test_valid_transition() {
        let mut fsm = GameFsm::new();
        let result = fsm.transition(GameAction::Start);
        assert!(result.success);
        assert_eq!(result.from_state, GameState::Menu);
        assert_eq!(fsm.state(), GameState::Playing);
        assert!(fsm.is_playing());
    }

    #[test]
    fn test_invalid_transition() {
        let mut fsm = GameFsm::new();
        let result = fsm.transition(GameAction::GameOver(Side::Ai));
        assert!(!result.success);
        assert_eq!(fsm.state(), GameState::Menu);
        assert!(!fsm.can_transition(GameAction::ReturnToMenu));
    }

    #[test]
    fn test_full_match_flow() {
        let mut fsm = GameFsm::new();
        fsm.transition(GameAction::Start);
        assert!(!fsm.can_transition(GameAction::Start), "no restart mid-match");
        fsm.transition(GameAction::GameOver(Side::Player));
        assert_eq!(fsm.winner(), Some(Side::Player));
        assert_eq!(fsm.state().name(), "ended");
        assert!(!fsm.can_transition(GameAction::Start));
        fsm.transition(GameAction::ReturnToMenu);
        assert_eq!(fsm.state(), GameState::Menu);
        assert!(fsm.winner().is_none());
    }
}
