//! Canvas 2D replay of the game's display list

use game_core::render::{DrawCmd, Fill, Glow};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// Draw one frame
pub fn draw(ctx: &CanvasRenderingContext2d, cmds: &[DrawCmd]) -> Result<(), JsValue> {
    for cmd in cmds {
        ctx.save();
        let result = draw_one(ctx, cmd);
        ctx.restore();
        result?;
    }
    Ok(())
}

fn draw_one(ctx: &CanvasRenderingContext2d, cmd: &DrawCmd) -> Result<(), JsValue> {
    match cmd {
        DrawCmd::Clear {
            color,
            width,
            height,
        } => {
            ctx.set_fill_style_str(&color.to_css());
            ctx.fill_rect(0.0, 0.0, *width as f64, *height as f64);
        }
        DrawCmd::Circle {
            center,
            radius,
            color,
            alpha,
            glow,
        } => {
            ctx.set_global_alpha(*alpha as f64);
            if let Some(Glow { color, blur }) = glow {
                ctx.set_shadow_color(&color.to_css());
                ctx.set_shadow_blur(*blur as f64);
            }
            ctx.begin_path();
            ctx.arc(
                center.x as f64,
                center.y as f64,
                *radius as f64,
                0.0,
                std::f64::consts::TAU,
            )?;
            ctx.set_fill_style_str(&color.to_css());
            ctx.fill();
        }
        DrawCmd::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => {
            set_fill(ctx, fill)?;
            ctx.fill_rect(*x as f64, *y as f64, *width as f64, *height as f64);
        }
        DrawCmd::Text {
            text,
            x,
            y,
            font,
            color,
        } => {
            ctx.set_font(font);
            ctx.set_text_align("center");
            ctx.set_fill_style_str(&color.to_css());
            ctx.fill_text(text, *x as f64, *y as f64)?;
        }
        DrawCmd::DashedLine {
            from,
            to,
            dash,
            color,
        } => {
            let pattern = js_sys::Array::of2(&JsValue::from(dash[0]), &JsValue::from(dash[1]));
            ctx.set_line_dash(&pattern)?;
            ctx.set_stroke_style_str(&color.to_css());
            ctx.begin_path();
            ctx.move_to(from.x as f64, from.y as f64);
            ctx.line_to(to.x as f64, to.y as f64);
            ctx.stroke();
        }
    }
    Ok(())
}

fn set_fill(ctx: &CanvasRenderingContext2d, fill: &Fill) -> Result<(), JsValue> {
    match fill {
        Fill::Solid(color) => ctx.set_fill_style_str(&color.to_css()),
        Fill::LinearGradient { x0, x1, from, to } => {
            let gradient = ctx.create_linear_gradient(*x0 as f64, 0.0, *x1 as f64, 0.0);
            gradient.add_color_stop(0.0, &from.to_css())?;
            gradient.add_color_stop(1.0, &to.to_css())?;
            ctx.set_fill_style_canvas_gradient(&gradient);
        }
    }
    Ok(())
}
