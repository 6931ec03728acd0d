use std::cell::RefCell;
use std::rc::Rc;

use placement_core::{ItemState, Layout, PlacementRegistry, Position, PuzzleState, Screen};
use serde::Serialize;
use tracing::Level;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

mod canvas;
mod constants;
mod draw;
mod input;
mod logging;
mod screen;
mod state;
mod utils;

use constants::CANVAS_ID;
use screen::PlacementScreen;
use state::SCREEN;
use utils::{asset_url, fetch_text_with_fallbacks, get_query_param, is_layout_name, log};

#[derive(Serialize)]
struct PieceReport<'a> {
    id: &'a str,
    state: ItemState,
}

/// Snapshot handed to the host page by [`puzzle_status`].
#[derive(Serialize)]
struct StatusReport<'a> {
    state: PuzzleState,
    placed: usize,
    total: usize,
    pieces: Vec<PieceReport<'a>>,
}

fn status_report(reg: &PlacementRegistry) -> StatusReport<'_> {
    StatusReport {
        state: reg.puzzle_state(),
        placed: reg.placed_count(),
        total: reg.len(),
        pieces: reg
            .items()
            .map(|it| PieceReport {
                id: it.id().as_str(),
                state: it.state(),
            })
            .collect(),
    }
}

fn init_canvas(
    document: &Document,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let cv = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str("canvas #cv not found"))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = cv
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok((cv, ctx))
}

fn with_screen<T>(
    f: impl FnOnce(&mut PlacementScreen) -> Result<T, JsValue>,
) -> Result<T, JsValue> {
    let screen = SCREEN
        .with(|st| st.borrow().clone())
        .ok_or_else(|| JsValue::from_str("placement screen not started"))?;
    let mut screen = screen.borrow_mut();
    f(&mut screen)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logging::init(Level::DEBUG);
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let (canvas, ctx) = init_canvas(&document)?;

    let layout = Layout::bundled().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let screen = Rc::new(RefCell::new(PlacementScreen::new(
        window.clone(),
        document,
        canvas,
        ctx,
        layout,
    )));
    screen.borrow_mut().setup()?;
    SCREEN.with(|st| st.replace(Some(screen)));

    // If URL param `layout` is set, try layouts/<name>.json; the bundled one stays otherwise.
    if let Ok(search) = window.location().search()
        && let Some(name) = get_query_param(&search, "layout")
    {
        if !is_layout_name(&name) {
            log(&format!("Ignoring layout name '{}'", name));
        } else {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = fetch_and_load_layout(&window, &name).await {
                    log(&format!("Failed to load layout '{}': {:?}", name, err));
                }
            });
        }
    }
    Ok(())
}

async fn fetch_and_load_layout(window: &Window, name: &str) -> Result<(), JsValue> {
    let text = fetch_text_with_fallbacks(
        window,
        &[
            &asset_url(&format!("layouts/{}.json", name)),
            &format!("/layouts/{}.json", name),
            &format!("layouts/{}.json", name),
        ],
    )
    .await
    .ok_or_else(|| JsValue::from_str("layout file not found"))?;
    let layout = Layout::from_json(&text).map_err(|e| JsValue::from_str(&e.to_string()))?;
    tracing::info!(name, pieces = layout.pieces.len(), "loaded layout");
    with_screen(|screen| screen.replace_layout(layout))
}

/// Reports a finished drag from outside the canvas handlers, e.g. a custom
/// input layer on the host page. Returns the outcome as a JSON string.
#[wasm_bindgen]
pub fn release(id: &str, x: f64, y: f64) -> Result<String, JsValue> {
    with_screen(|screen| {
        let mut s = screen.state().borrow_mut();
        let outcome = input::release_piece(&mut s, id, Position::new(x, y))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_json::to_string(&outcome).map_err(|e| JsValue::from_str(&e.to_string()))
    })
}

/// Placement progress as JSON: overall state plus one entry per piece.
#[wasm_bindgen]
pub fn puzzle_status() -> Result<String, JsValue> {
    with_screen(|screen| {
        let s = screen.state().borrow();
        let reg = s
            .registry
            .as_ref()
            .ok_or_else(|| JsValue::from_str("placement screen torn down"))?;
        serde_json::to_string(&status_report(reg)).map_err(|e| JsValue::from_str(&e.to_string()))
    })
}

/// Removes listeners and discards the puzzle state.
#[wasm_bindgen]
pub fn teardown() {
    if let Some(screen) = SCREEN.with(|st| st.borrow_mut().take()) {
        screen.borrow_mut().teardown();
    }
}
