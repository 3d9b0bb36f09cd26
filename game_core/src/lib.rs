pub mod components;
pub mod config;
pub mod controller;
pub mod difficulty;
pub mod fsm;
pub mod params;
pub mod particles;
pub mod render;
pub mod resources;
pub mod scheduler;
pub mod session;
pub mod systems;

pub use components::*;
pub use config::*;
pub use controller::*;
pub use difficulty::*;
pub use fsm::*;
pub use params::*;
pub use particles::*;
pub use render::{build_frame, DrawCmd};
pub use resources::*;
pub use scheduler::*;
pub use session::*;

use hecs::World;
use systems::*;

/// Run one frame of the Pong simulation
///
/// Returns the winner on the frame a side first reaches the winning score.
/// Rendering and scheduling the next frame are left to the caller.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    config: &Config,
    ai: AiSettings,
    pointer_target_y: f32,
    score: &mut Score,
    events: &mut Events,
    particles: &mut Particles,
    rng: &mut GameRng,
) -> Option<Side> {
    // Clear events at start of frame
    events.clear();

    // 1. Expire and advance particles
    particles.update();

    // 2. Ease player paddle toward the pointer
    smooth_player_paddle(world, pointer_target_y, config);

    // 3. Move ball
    move_ball(world);

    // 4-5. Walls, then left and right paddles
    check_collisions(world, config, events);

    // 6. Ball left the field
    check_scoring(world, config, score, events, rng);

    // 7. AI paddle
    update_ai(world, ai, config, rng);

    // 8. Match over
    let winner = score.has_winner(config.win_score)?;
    events.match_won = Some(winner);
    particles.spawn_burst(config.center(), Params::BURST_PARTICLES, rng);
    Some(winner)
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, side: Side, y: f32) -> hecs::Entity {
    world.spawn((Paddle::new(side, y),))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: glam::Vec2, vel: glam::Vec2) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel),))
}
