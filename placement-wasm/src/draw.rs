use placement_core::palette::GOAL_OUTLINE;
use placement_core::{GoalZone, Position, piece_color};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::canvas::{ScreenRect, draw_label, filled_rect, outline_rect, set_fill_style};
use crate::constants::{GOAL_LINE_WIDTH_PX, STATUS_ID};
use crate::state::State;
use crate::utils::{fit_stage, to_screen};

fn centered_rect(center: Position, w: f64, h: f64, scale: f64, offset: (f64, f64)) -> ScreenRect {
    let (cx, cy) = to_screen(center, scale, offset);
    ScreenRect {
        x: cx - w * scale / 2.0,
        y: cy - h * scale / 2.0,
        w: w * scale,
        h: h * scale,
    }
}

fn goal_rect(goal: &GoalZone, scale: f64, offset: (f64, f64)) -> ScreenRect {
    let (x, y) = to_screen(Position::new(goal.min_x(), goal.min_y()), scale, offset);
    ScreenRect {
        x,
        y,
        w: goal.width() * scale,
        h: goal.height() * scale,
    }
}

pub fn update_viewport(state: &mut State) {
    let canvas_w = state.canvas.width() as f64;
    let canvas_h = state.canvas.height() as f64;
    let (scale, offset) = fit_stage(canvas_w, canvas_h, state.layout.stage);
    state.scale = scale;
    state.offset = offset;
}

pub fn draw(state: &mut State) {
    update_viewport(state);
    let width = state.canvas.width() as f64;
    let height = state.canvas.height() as f64;
    let (scale, offset) = (state.scale, state.offset);
    let ctx = &state.ctx;
    ctx.clear_rect(0.0, 0.0, width, height);

    let stage = centered_rect(
        Position::new(
            state.layout.stage.width / 2.0,
            state.layout.stage.height / 2.0,
        ),
        state.layout.stage.width,
        state.layout.stage.height,
        scale,
        offset,
    );
    set_fill_style(ctx, "#fafafa");
    ctx.fill_rect(stage.x, stage.y, stage.w, stage.h);

    for d in &state.layout.decorations {
        let r = centered_rect(d.center, d.width, d.height, scale, offset);
        filled_rect(ctx, r, "#e8d5c4", "#8a7560");
    }

    // Drop boxes come from the registry so they always match what is checked.
    if let Some(reg) = &state.registry {
        for (_, goal) in reg.goals() {
            outline_rect(ctx, goal_rect(goal, scale, offset), GOAL_OUTLINE, GOAL_LINE_WIDTH_PX);
        }
    }

    for p in &state.pieces {
        let r = centered_rect(p.center, p.spec.width, p.spec.height, scale, offset);
        let border = if p.locked { "#2e7d32" } else { "#333" };
        filled_rect(ctx, r, piece_color(p.color_idx), border);
        let (cx, cy) = to_screen(p.center, scale, offset);
        draw_label(ctx, p.spec.id.as_str(), cx, cy, scale);
    }
    update_status_dom(state);
}

pub fn status_text(placed: usize, total: usize) -> String {
    if placed == total {
        format!("All {total} pieces placed")
    } else {
        format!("Placed {placed} / {total}")
    }
}

fn update_status_dom(state: &State) {
    let Some(reg) = &state.registry else {
        return;
    };
    if let Some(el) = state.document.get_element_by_id(STATUS_ID)
        && let Ok(el) = el.dyn_into::<HtmlElement>()
    {
        el.set_inner_text(&status_text(reg.placed_count(), reg.len()));
    }
}
