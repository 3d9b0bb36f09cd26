use crate::Side;

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub player: u8, // left
    pub ai: u8,     // right
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Player => self.player = self.player.saturating_add(1),
            Side::Ai => self.ai = self.ai.saturating_add(1),
        }
    }

    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Player => self.player,
            Side::Ai => self.ai,
        }
    }

    /// Winner once either side reaches `win_score`; the player only wins with the higher score
    pub fn has_winner(&self, win_score: u8) -> Option<Side> {
        if self.player < win_score && self.ai < win_score {
            return None;
        }
        if self.player > self.ai {
            Some(Side::Player)
        } else {
            Some(Side::Ai)
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// Uniform sample in [0, 1)
    pub fn unit(&mut self) -> f32 {
        use rand::Rng;
        self.0.gen::<f32>()
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this frame
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub ball_hit_wall: bool,
    pub ball_hit_paddle: Option<Side>,
    pub scored: Option<Side>,
    pub match_won: Option<Side>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ball_hit_wall = false;
        self.ball_hit_paddle = None;
        self.scored = None;
        self.match_won = None;
    }
}
