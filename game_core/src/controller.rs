//! Top-level game controller
//!
//! Owns the state machine, the selected difficulty and, while a match is on,
//! the `MatchState` plus the token that keeps its frame loop alive.

use crate::{
    CancelToken, Difficulty, DrawCmd, FrameOutcome, GameAction, GameFsm, GameState, MatchState,
    Side, Tick, TransitionResult,
};

#[derive(Default)]
pub struct GameController {
    fsm: GameFsm,
    difficulty: Difficulty,
    session: Option<MatchState>,
    loop_token: Option<CancelToken>,
}

impl GameController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GameState {
        self.fsm.state()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn session(&self) -> Option<&MatchState> {
        self.session.as_ref()
    }

    pub fn winner(&self) -> Option<Side> {
        self.fsm.winner()
    }

    /// Pick the tier for the next match; ignored while a match is running
    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.fsm.is_playing() {
            return false;
        }
        self.difficulty = difficulty;
        true
    }

    /// Start a fresh match with the selected difficulty
    ///
    /// Returns the token the frame driver must check before every frame.
    pub fn start_game(&mut self, seed: u64) -> Result<CancelToken, String> {
        let result = self.fsm.transition(GameAction::Start);
        if !result.success {
            return Err(format!("Cannot start a match from {:?}", result.from_state));
        }

        let token = CancelToken::new();
        self.session = Some(MatchState::new(self.difficulty, seed));
        self.loop_token = Some(token.clone());
        Ok(token)
    }

    /// Pointer moved to `y` (field units, paddle top edge)
    pub fn pointer_moved(&mut self, y: f32) {
        if !self.fsm.is_playing() {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.set_pointer_target(y);
        }
    }

    /// Run one frame of play
    ///
    /// On the winning frame the state moves to Ended and the loop is told to
    /// stop; nothing is rendered for that frame.
    pub fn frame(&mut self) -> Tick {
        if !self.fsm.is_playing() {
            return Tick::Stop;
        }
        let Some(session) = self.session.as_mut() else {
            return Tick::Stop;
        };

        match session.advance() {
            FrameOutcome::Continue => Tick::Continue,
            FrameOutcome::Won(winner) => {
                self.fsm.transition(GameAction::GameOver(winner));
                self.stop_loop();
                Tick::Stop
            }
        }
    }

    /// Display list for the current frame, only while playing
    pub fn draw_list(&self) -> Option<Vec<DrawCmd>> {
        if !self.fsm.is_playing() {
            return None;
        }
        self.session.as_ref().map(MatchState::draw_list)
    }

    /// Leave the match: cancel the pending frame and discard the session
    pub fn return_to_menu(&mut self) -> TransitionResult {
        let result = self.fsm.transition(GameAction::ReturnToMenu);
        if result.success {
            self.stop_loop();
            self.session = None;
        }
        result
    }

    fn stop_loop(&mut self) {
        if let Some(token) = self.loop_token.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ball, Score};
    use glam::Vec2;

    fn force_match_point(controller: &mut GameController, score: Score) {
        let session = controller.session.as_mut().unwrap();
        session.score = score;
        for (_e, ball) in session.world.query_mut::<&mut Ball>() {
            ball.pos = Vec2::new(1199.0, 15.0);
            ball.vel = Vec2::new(7.0, 0.0);
        }
    }

    #[test]
    fn test_difficulty_locked_during_match() {
        let mut controller = GameController::new();
        assert_eq!(controller.difficulty(), Difficulty::Medium);
        assert!(controller.select_difficulty(Difficulty::Easy));
        assert!(controller.select_difficulty(Difficulty::Easy), "idempotent");

        controller.start_game(1).unwrap();
        assert!(!controller.select_difficulty(Difficulty::Impossible));
        assert_eq!(controller.session().unwrap().difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_cannot_start_twice() {
        let mut controller = GameController::new();
        controller.start_game(1).unwrap();
        assert!(controller.start_game(2).is_err());
    }

    #[test]
    fn test_frames_render_while_playing() {
        let mut controller = GameController::new();
        assert!(controller.draw_list().is_none());
        controller.start_game(4).unwrap();
        assert_eq!(controller.frame(), Tick::Continue);
        assert!(controller.draw_list().is_some());
    }

    #[test]
    fn test_win_stops_loop_and_reports_player() {
        let mut controller = GameController::new();
        let token = controller.start_game(11).unwrap();
        force_match_point(&mut controller, Score { player: 14, ai: 7 });

        assert_eq!(controller.frame(), Tick::Stop);
        assert_eq!(controller.state(), GameState::Ended { winner: Side::Player });
        assert_eq!(controller.winner().map(Side::name), Some("Player"));
        assert!(token.is_cancelled());
        assert!(controller.draw_list().is_none(), "winning frame is not rendered");
        assert_eq!(controller.frame(), Tick::Stop);
        assert_eq!(controller.session().unwrap().score, Score { player: 15, ai: 7 });
    }

    #[test]
    fn test_return_to_menu_cancels_and_discards() {
        let mut controller = GameController::new();
        let token = controller.start_game(5).unwrap();
        controller.frame();

        let result = controller.return_to_menu();
        assert!(result.success);
        assert!(token.is_cancelled());
        assert!(controller.session().is_none());
        assert_eq!(controller.state(), GameState::Menu);
        assert_eq!(controller.frame(), Tick::Stop);
    }

    #[test]
    fn test_new_match_resets_score() {
        let mut controller = GameController::new();
        controller.start_game(5).unwrap();
        force_match_point(&mut controller, Score { player: 14, ai: 3 });
        controller.frame();
        controller.return_to_menu();

        let token = controller.start_game(6).unwrap();
        assert!(!token.is_cancelled());
        assert_eq!(controller.session().unwrap().score, Score::new());
        assert!(controller.winner().is_none());
    }

    #[test]
    fn test_pointer_ignored_outside_play() {
        let mut controller = GameController::new();
        controller.pointer_moved(10.0);
        controller.start_game(5).unwrap();
        controller.pointer_moved(10.0);
        assert_eq!(controller.session().unwrap().pointer_target_y, 10.0);
    }
}
