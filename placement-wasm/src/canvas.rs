use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use crate::constants::{LABEL_MAX_PX, LABEL_MIN_PX};

/// Screen-space rectangle, `(x, y)` being the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

// Style setters go through property assignment; the typed setters are deprecated.
fn set_style(ctx: &CanvasRenderingContext2d, prop: &str, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str(prop),
        &JsValue::from_str(color),
    );
}

pub fn set_fill_style(ctx: &CanvasRenderingContext2d, color: &str) {
    set_style(ctx, "fillStyle", color);
}

pub fn set_stroke_style(ctx: &CanvasRenderingContext2d, color: &str) {
    set_style(ctx, "strokeStyle", color);
}

pub fn outline_rect(ctx: &CanvasRenderingContext2d, r: ScreenRect, color: &str, width: f64) {
    ctx.set_line_width(width);
    set_stroke_style(ctx, color);
    ctx.stroke_rect(r.x, r.y, r.w, r.h);
}

pub fn filled_rect(ctx: &CanvasRenderingContext2d, r: ScreenRect, fill: &str, border: &str) {
    set_fill_style(ctx, fill);
    ctx.fill_rect(r.x, r.y, r.w, r.h);
    outline_rect(ctx, r, border, 1.6);
}

/// Centered text with a white halo so it reads on any fill.
pub fn draw_label(ctx: &CanvasRenderingContext2d, text: &str, cx: f64, cy: f64, scale: f64) {
    let size = (14.0 * scale).clamp(LABEL_MIN_PX, LABEL_MAX_PX);
    ctx.set_font(&format!("bold {}px sans-serif", size));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_line_width((size / 5.0).clamp(2.0, 5.0));
    set_stroke_style(ctx, "#fff");
    let _ = ctx.stroke_text(text, cx, cy);
    set_fill_style(ctx, "#111");
    let _ = ctx.fill_text(text, cx, cy);
}
