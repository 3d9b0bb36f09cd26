use crate::{Ball, Config, Events, Paddle, Side};
use glam::Vec2;
use hecs::World;

/// Check ball collisions with walls and paddles
pub fn check_collisions(world: &mut World, config: &Config, events: &mut Events) {
    // Collect ball data without holding borrows
    let ball_data = world
        .query::<&Ball>()
        .iter()
        .next()
        .map(|(_e, ball)| (ball.pos, ball.vel));

    let (mut ball_pos, mut ball_vel) = match ball_data {
        Some(data) => data,
        None => return, // No ball in world
    };

    // Top/bottom walls: reflect with a little energy loss
    let radius = config.ball_radius;
    if ball_pos.y <= radius || ball_pos.y >= config.field_height - radius {
        ball_vel.y = -ball_vel.y * config.wall_damping;
        ball_pos.y = if ball_pos.y <= radius {
            radius
        } else {
            config.field_height - radius
        };
        events.ball_hit_wall = true;
    }

    let mut paddles: Vec<Paddle> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, p)| *p)
        .collect();
    // Left paddle resolves before right
    paddles.sort_by_key(|p| p.side != Side::Player);

    for paddle in paddles {
        if !touches_paddle(ball_pos, &paddle, config) {
            continue;
        }

        ball_vel = deflect(ball_pos.y, ball_vel.length(), &paddle, config);
        // Snap to the paddle face so the next frame starts outside it
        ball_pos.x = config.paddle_face_x(paddle.side);
        events.ball_hit_paddle = Some(paddle.side);
    }

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos = ball_pos;
        ball.vel = ball_vel;
    }
}

/// Leading edge reached the paddle plane within the paddle's span (plus radius)
fn touches_paddle(ball_pos: Vec2, paddle: &Paddle, config: &Config) -> bool {
    let at_plane = match paddle.side {
        Side::Player => ball_pos.x <= config.paddle_face_x(Side::Player),
        Side::Ai => ball_pos.x >= config.paddle_face_x(Side::Ai),
    };
    at_plane
        && ball_pos.y >= paddle.y - config.ball_radius
        && ball_pos.y <= paddle.y + config.paddle_height + config.ball_radius
}

/// Outgoing velocity after striking `paddle` at height `ball_y`
///
/// The strike point maps linearly onto a 0.7π fan: dead center goes straight
/// back, the top edge sends the ball upward and the bottom edge downward.
pub fn deflect(ball_y: f32, speed: f32, paddle: &Paddle, config: &Config) -> Vec2 {
    let relative_pos = (ball_y - paddle.y) / config.paddle_height;
    let angle = (relative_pos - 0.5) * config.paddle_deflection;
    let new_speed = (speed + config.ball_speed_increase)
        .min(config.ball_speed_max)
        .max(config.ball_speed_initial);

    // Always away from the struck paddle
    let away = paddle.side.opponent().direction();
    Vec2::new(
        (new_speed * angle.cos()).abs() * away,
        new_speed * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle};

    fn setup_world() -> (World, Config, Events) {
        (World::new(), Config::new(), Events::new())
    }

    fn ball(world: &World) -> Ball {
        world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_e, b)| *b)
            .unwrap()
    }

    #[test]
    fn test_ball_bounces_off_top_wall() {
        let (mut world, config, mut events) = setup_world();
        create_ball(&mut world, Vec2::new(600.0, 4.0), Vec2::new(7.0, -5.0));

        check_collisions(&mut world, &config, &mut events);

        let b = ball(&world);
        assert!((b.vel.y - 4.9).abs() < 1e-4, "vy reflected with 2% loss");
        assert_eq!(b.vel.x, 7.0, "X velocity should be unchanged");
        assert_eq!(b.pos.y, config.ball_radius, "Ball clamped to the wall");
        assert!(events.ball_hit_wall);
    }

    #[test]
    fn test_ball_bounces_off_bottom_wall() {
        let (mut world, config, mut events) = setup_world();
        create_ball(&mut world, Vec2::new(600.0, 597.0), Vec2::new(-7.0, 3.0));

        check_collisions(&mut world, &config, &mut events);

        let b = ball(&world);
        assert!((b.vel.y + 2.94).abs() < 1e-4);
        assert_eq!(b.pos.y, config.field_height - config.ball_radius);
        assert!(events.ball_hit_wall);
    }

    #[test]
    fn test_repeated_wall_bounces_keep_losing_energy() {
        let (mut world, config, mut events) = setup_world();
        create_ball(&mut world, Vec2::new(600.0, 5.0), Vec2::new(0.0, -10.0));

        for _ in 0..3 {
            check_collisions(&mut world, &config, &mut events);
            for (_e, b) in world.query_mut::<&mut Ball>() {
                b.vel.y = -b.vel.y; // send it back into the wall
            }
        }
        let vy = ball(&world).vel.y.abs();
        assert!((vy - 10.0 * 0.98_f32.powi(3)).abs() < 1e-3);
    }

    #[test]
    fn test_ball_collides_with_left_paddle() {
        let (mut world, config, mut events) = setup_world();
        create_paddle(&mut world, Side::Player, 250.0);
        create_ball(&mut world, Vec2::new(20.0, 300.0), Vec2::new(-7.0, 0.0));

        check_collisions(&mut world, &config, &mut events);

        let b = ball(&world);
        assert!(b.vel.x > 0.0, "Ball should bounce right");
        assert_eq!(b.pos.x, 25.0, "Ball snapped to paddle face");
        assert!((b.speed() - 7.5).abs() < 1e-4);
        assert!(b.vel.y.abs() < 1e-4, "Center hit goes straight back");
        assert_eq!(events.ball_hit_paddle, Some(Side::Player));
    }

    #[test]
    fn test_ball_collides_with_right_paddle() {
        let (mut world, config, mut events) = setup_world();
        create_paddle(&mut world, Side::Ai, 250.0);
        create_ball(&mut world, Vec2::new(1180.0, 300.0), Vec2::new(7.0, 1.0));

        check_collisions(&mut world, &config, &mut events);

        let b = ball(&world);
        assert!(b.vel.x < 0.0, "Ball should bounce left");
        assert_eq!(b.pos.x, 1175.0);
        assert_eq!(events.ball_hit_paddle, Some(Side::Ai));
    }

    #[test]
    fn test_ball_misses_paddle_outside_span() {
        let (mut world, config, mut events) = setup_world();
        create_paddle(&mut world, Side::Player, 0.0);
        // Paddle spans 0..100, plus 10 of radius margin
        create_ball(&mut world, Vec2::new(20.0, 111.0), Vec2::new(-7.0, 0.0));

        check_collisions(&mut world, &config, &mut events);

        assert_eq!(ball(&world).vel.x, -7.0);
        assert!(events.ball_hit_paddle.is_none());
    }

    #[test]
    fn test_radius_margin_counts_as_hit() {
        let (mut world, config, mut events) = setup_world();
        create_paddle(&mut world, Side::Player, 200.0);
        create_ball(&mut world, Vec2::new(20.0, 195.0), Vec2::new(-7.0, 0.0));

        check_collisions(&mut world, &config, &mut events);

        let b = ball(&world);
        assert!(b.vel.x > 0.0);
        assert!(b.vel.y < 0.0, "Above the paddle top deflects upward");
    }

    #[test]
    fn test_trajectory_follows_hit_position() {
        let config = Config::new();
        let paddle = Paddle::new(Side::Player, 200.0);

        let top = deflect(205.0, 7.0, &paddle, &config);
        let bottom = deflect(295.0, 7.0, &paddle, &config);
        assert!(top.y < 0.0, "Top of paddle deflects upward");
        assert!(bottom.y > 0.0, "Bottom of paddle deflects downward");

        // Edge hit: (0 - 0.5) * 0.7π = -0.35π
        let edge = deflect(200.0, 7.0, &paddle, &config);
        let angle = (edge.y / edge.x).atan();
        assert!((angle + 0.35 * std::f32::consts::PI).abs() < 1e-4);
    }

    #[test]
    fn test_speed_increases_and_caps() {
        let config = Config::new();
        let paddle = Paddle::new(Side::Ai, 250.0);

        let mut speed = config.ball_speed_initial;
        let mut last = speed;
        for _ in 0..40 {
            speed = deflect(300.0, speed, &paddle, &config).length();
            assert!(speed >= last - 1e-4, "non-decreasing across hits");
            assert!(speed <= config.ball_speed_max + 1e-4);
            last = speed;
        }
        assert!((speed - config.ball_speed_max).abs() < 1e-4);
    }

    #[test]
    fn test_speed_never_below_initial_after_hit() {
        let config = Config::new();
        let paddle = Paddle::new(Side::Player, 250.0);
        let v = deflect(300.0, 3.0, &paddle, &config);
        assert!((v.length() - config.ball_speed_initial).abs() < 1e-4);
    }

    #[test]
    fn test_no_collision_when_no_ball() {
        let (mut world, config, mut events) = setup_world();
        create_paddle(&mut world, Side::Player, 250.0);

        check_collisions(&mut world, &config, &mut events);

        assert!(events.ball_hit_paddle.is_none());
        assert!(!events.ball_hit_wall);
    }
}
