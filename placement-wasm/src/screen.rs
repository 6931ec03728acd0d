use std::cell::RefCell;
use std::rc::Rc;

use placement_core::{CompletionTrigger, Layout, Screen};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, CustomEvent, Document, Event, EventTarget, HtmlCanvasElement,
    MouseEvent, Window,
};

use crate::constants::COMPLETE_EVENT;
use crate::draw::draw;
use crate::input::{on_mouse_down, on_mouse_move, on_mouse_up};
use crate::state::State;
use crate::utils::{asset_url, log, sync_canvas_size};

struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Host screen for one placement puzzle. Owns the shared canvas state, the
/// registry inside it, and the DOM listeners that feed it.
pub struct PlacementScreen {
    state: Rc<RefCell<State>>,
    listeners: Vec<Listener>,
}

impl PlacementScreen {
    pub fn new(
        window: Window,
        document: Document,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        layout: Layout,
    ) -> Self {
        let state = State {
            window,
            document,
            canvas,
            ctx,
            layout,
            registry: None,
            pieces: Vec::new(),
            dragging_idx: None,
            drag_off: (0.0, 0.0),
            scale: 1.0,
            offset: (0.0, 0.0),
        };
        PlacementScreen {
            state: Rc::new(RefCell::new(state)),
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &Rc<RefCell<State>> {
        &self.state
    }

    /// Swaps in a new layout, rebuilding the registry from scratch.
    pub fn replace_layout(&mut self, layout: Layout) -> Result<(), JsValue> {
        self.teardown();
        self.state.borrow_mut().layout = layout;
        self.setup()
    }

    /// The callback runs while the registry is mutably borrowed, so the
    /// visible effects are deferred to a microtask.
    fn completion_trigger(&self) -> CompletionTrigger {
        let (window, document, next) = {
            let s = self.state.borrow();
            (s.window.clone(), s.document.clone(), s.layout.next.clone())
        };
        CompletionTrigger::new(move || {
            wasm_bindgen_futures::spawn_local(async move {
                match CustomEvent::new(COMPLETE_EVENT) {
                    Ok(ev) => {
                        let _ = document.dispatch_event(&ev);
                    }
                    Err(e) => log(&format!("Failed to create completion event: {:?}", e)),
                }
                if let Some(next) = next
                    && let Err(e) = window.location().set_href(&asset_url(&next))
                {
                    log(&format!("Failed to open next screen '{}': {:?}", next, e));
                }
            });
        })
    }

    fn listen(
        &mut self,
        target: EventTarget,
        kind: &'static str,
        mut handler: impl FnMut(&mut State, &Event) + 'static,
    ) -> Result<(), JsValue> {
        let st = self.state.clone();
        let closure = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |e: Event| {
            handler(&mut st.borrow_mut(), &e);
        }));
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target,
            kind,
            closure,
        });
        Ok(())
    }

    fn attach_listeners(&mut self) -> Result<(), JsValue> {
        let (canvas, window): (EventTarget, EventTarget) = {
            let s = self.state.borrow();
            (s.canvas.clone().into(), s.window.clone().into())
        };
        self.listen(canvas.clone(), "mousedown", |s, e| {
            if let Some(e) = e.dyn_ref::<MouseEvent>() {
                on_mouse_down(s, e);
            }
        })?;
        self.listen(canvas, "mousemove", |s, e| {
            if let Some(e) = e.dyn_ref::<MouseEvent>() {
                on_mouse_move(s, e);
            }
        })?;
        // Releases outside the canvas still end the drag.
        self.listen(window.clone(), "mouseup", |s, _| on_mouse_up(s))?;
        self.listen(window, "resize", |s, _| {
            sync_canvas_size(&s.window, &s.canvas);
            draw(s);
        })?;
        Ok(())
    }
}

impl Screen for PlacementScreen {
    type Error = JsValue;

    fn setup(&mut self) -> Result<(), JsValue> {
        let trigger = self.completion_trigger();
        {
            let mut s = self.state.borrow_mut();
            let registry = s
                .layout
                .registry(trigger)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            tracing::info!(pieces = registry.len(), "placement screen ready");
            s.registry = Some(registry);
            s.reset_pieces();
            sync_canvas_size(&s.window, &s.canvas);
            draw(&mut s);
        }
        self.attach_listeners()
    }

    fn teardown(&mut self) {
        for l in self.listeners.drain(..) {
            let _ = l
                .target
                .remove_event_listener_with_callback(l.kind, l.closure.as_ref().unchecked_ref());
        }
        let mut s = self.state.borrow_mut();
        s.registry = None;
        s.pieces.clear();
        s.dragging_idx = None;
    }
}

impl Drop for PlacementScreen {
    fn drop(&mut self) {
        self.teardown();
    }
}
