/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Field (canvas logical resolution)
    pub const FIELD_WIDTH: f32 = 1200.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 15.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PLAYER_SMOOTHING: f32 = 0.2; // fraction of the gap closed per frame

    // Ball
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED_INITIAL: f32 = 7.0; // units per frame
    pub const BALL_SPEED_MAX: f32 = 18.0;
    pub const BALL_SPEED_INCREASE: f32 = 0.5; // added on every paddle hit
    pub const WALL_DAMPING: f32 = 0.98;
    pub const PADDLE_DEFLECTION: f32 = std::f32::consts::PI * 0.7;
    pub const LAUNCH_ANGLE_MAX: f32 = std::f32::consts::FRAC_PI_4;

    // AI
    pub const AI_DEADBAND: f32 = 5.0;

    // Score
    pub const WIN_SCORE: u8 = 15;

    // Win burst
    pub const BURST_PARTICLES: usize = 100;
    pub const PARTICLE_SPEED_MIN: f32 = 2.0;
    pub const PARTICLE_SPEED_RANGE: f32 = 8.0;
    pub const PARTICLE_SIZE_MIN: f32 = 2.0;
    pub const PARTICLE_SIZE_RANGE: f32 = 4.0;
    pub const PARTICLE_LIFE_DECAY: f32 = 0.02;
    pub const PARTICLE_SIZE_DECAY: f32 = 0.95;

    // Scheduling
    pub const FRAME_MS: f64 = 1000.0 / 60.0; // ~60 Hz
}
