//! Frame rendering as a display list
//!
//! `build_frame` turns match state into a list of 2D draw commands without
//! touching the state; the browser client replays the list on a canvas.

use crate::{Ball, Config, Paddle, Particles, Score, Side};
use glam::Vec2;
use hecs::World;

/// Canvas color
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Rgba { r: u8, g: u8, b: u8, a: f32 },
    Hsl { h: f32, s: f32, l: f32 }, // s and l in percent
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgba { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Color::Rgba { r, g, b, a }
    }

    /// CSS color string accepted by `fillStyle`/`strokeStyle`
    pub fn to_css(&self) -> String {
        match *self {
            Color::Rgba { r, g, b, a } if a >= 1.0 => format!("#{:02x}{:02x}{:02x}", r, g, b),
            Color::Rgba { r, g, b, a } => format!("rgba({}, {}, {}, {})", r, g, b, a),
            Color::Hsl { h, s, l } => format!("hsl({}, {}%, {}%)", h, s, l),
        }
    }
}

pub const BACKGROUND: Color = Color::rgb(0x1a, 0x1a, 0x1a);
pub const PADDLE_LIGHT: Color = Color::rgb(0xff, 0xff, 0xff);
pub const PADDLE_SHADE: Color = Color::rgb(0xcc, 0xcc, 0xcc);
pub const BALL: Color = Color::rgb(0xff, 0xff, 0xff);
pub const BALL_GLOW: Color = Color::rgba(255, 255, 255, 0.5);
pub const SCORE_TEXT: Color = Color::rgba(255, 255, 255, 0.8);
pub const CENTER_LINE: Color = Color::rgba(255, 255, 255, 0.2);
pub const SCORE_FONT: &str = "bold 60px Arial";
pub const SCORE_BASELINE: f32 = 80.0;
pub const CENTER_DASH: [f32; 2] = [5.0, 15.0];
pub const GLOW_BLUR: f32 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Color),
    /// Horizontal gradient from `x0` to `x1`, in field coordinates
    LinearGradient { x0: f32, x1: f32, from: Color, to: Color },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub blur: f32,
}

/// One immediate-mode 2D draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear {
        color: Color,
        width: f32,
        height: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
        glow: Option<Glow>,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Fill,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        font: &'static str,
        color: Color,
    },
    DashedLine {
        from: Vec2,
        to: Vec2,
        dash: [f32; 2],
        color: Color,
    },
}

/// Build the draw list for one frame of play
pub fn build_frame(
    world: &World,
    score: &Score,
    particles: &Particles,
    config: &Config,
) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(particles.len() + 8);

    cmds.push(DrawCmd::Clear {
        color: BACKGROUND,
        width: config.field_width,
        height: config.field_height,
    });

    for p in particles.iter() {
        cmds.push(DrawCmd::Circle {
            center: p.pos,
            radius: p.size,
            color: Color::Hsl {
                h: p.hue,
                s: 50.0,
                l: 50.0,
            },
            alpha: p.alpha(),
            glow: None,
        });
    }

    // Both paddles share one gradient anchored at the left edge
    let gradient = Fill::LinearGradient {
        x0: 0.0,
        x1: config.paddle_width,
        from: PADDLE_LIGHT,
        to: PADDLE_SHADE,
    };
    let mut paddles: Vec<Paddle> = world.query::<&Paddle>().iter().map(|(_e, p)| *p).collect();
    paddles.sort_by_key(|p| p.side != Side::Player);
    for paddle in paddles {
        cmds.push(DrawCmd::Rect {
            x: config.paddle_x(paddle.side),
            y: paddle.y,
            width: config.paddle_width,
            height: config.paddle_height,
            fill: gradient.clone(),
        });
    }

    for (_e, ball) in world.query::<&Ball>().iter() {
        cmds.push(DrawCmd::Circle {
            center: ball.pos,
            radius: config.ball_radius,
            color: BALL,
            alpha: 1.0,
            glow: Some(Glow {
                color: BALL_GLOW,
                blur: GLOW_BLUR,
            }),
        });
    }

    for (side, x) in [
        (Side::Player, config.field_width / 4.0),
        (Side::Ai, 3.0 * config.field_width / 4.0),
    ] {
        cmds.push(DrawCmd::Text {
            text: score.get(side).to_string(),
            x,
            y: SCORE_BASELINE,
            font: SCORE_FONT,
            color: SCORE_TEXT,
        });
    }

    let mid = config.field_width / 2.0;
    cmds.push(DrawCmd::DashedLine {
        from: Vec2::new(mid, 0.0),
        to: Vec2::new(mid, config.field_height),
        dash: CENTER_DASH,
        color: CENTER_LINE,
    });

    cmds
}
