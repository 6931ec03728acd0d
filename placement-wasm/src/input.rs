use placement_core::{PlacementError, Position, ReleaseOutcome};
use web_sys::MouseEvent;

use crate::draw::draw;
use crate::state::{State, pick};
use crate::utils::{event_canvas_coords, from_screen};

fn stage_point(state: &State, e: &MouseEvent) -> Position {
    let (x, y) = event_canvas_coords(e, &state.canvas);
    from_screen(x, y, state.scale, state.offset)
}

pub fn on_mouse_down(state: &mut State, e: &MouseEvent) {
    let pt = stage_point(state, e);
    let Some(i) = pick(&state.pieces, pt) else {
        return;
    };
    let ctr = state.pieces[i].center;
    state.drag_off = (pt.x - ctr.x, pt.y - ctr.y);
    // bring to top
    let it = state.pieces.remove(i);
    state.pieces.push(it);
    state.dragging_idx = Some(state.pieces.len() - 1);
    draw(state);
}

pub fn on_mouse_move(state: &mut State, e: &MouseEvent) {
    let Some(idx) = state.dragging_idx else {
        return;
    };
    let pt = stage_point(state, e);
    state.pieces[idx].center = Position::new(pt.x - state.drag_off.0, pt.y - state.drag_off.1);
    draw(state);
}

pub fn on_mouse_up(state: &mut State) {
    let Some(idx) = state.dragging_idx.take() else {
        return;
    };
    let id = state.pieces[idx].spec.id.clone();
    let center = state.pieces[idx].center;
    if let Err(err) = release_piece(state, id.as_str(), center) {
        tracing::warn!(%err, "drag release rejected");
    }
}

/// Hands a finished drag to the registry and locks the sprite once it is
/// accepted. Used both by the mouse handlers and the exported `release`.
pub fn release_piece(
    state: &mut State,
    id: &str,
    center: Position,
) -> Result<ReleaseOutcome, PlacementError> {
    let Some(reg) = state.registry.as_mut() else {
        return Err(PlacementError::UnknownIdentity(id.to_string()));
    };
    let outcome = reg.on_drag_release(id, center)?;
    if outcome.changed_state()
        && let Some(view) = state.pieces.iter_mut().find(|p| p.spec.id.as_str() == id)
    {
        view.center = center;
        view.locked = true;
    }
    draw(state);
    Ok(outcome)
}
