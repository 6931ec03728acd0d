use std::cell::RefCell;
use std::rc::Rc;

use placement_core::{Layout, PieceSpec, PlacementRegistry, Position};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::screen::PlacementScreen;

/// On-canvas state of one draggable piece. Placement itself lives in the
/// registry; this only tracks where the sprite is drawn.
#[derive(Clone, Debug)]
pub struct PieceView {
    pub spec: PieceSpec,
    pub center: Position,
    pub color_idx: usize,
    /// Set once the registry accepts the piece; locked pieces ignore the mouse.
    pub locked: bool,
}

impl PieceView {
    pub fn new(spec: PieceSpec, color_idx: usize) -> Self {
        PieceView {
            center: spec.start,
            spec,
            color_idx,
            locked: false,
        }
    }

    /// Hit test in stage space against the sprite's bounding box.
    pub fn hit(&self, p: Position) -> bool {
        let hw = self.spec.width / 2.0;
        let hh = self.spec.height / 2.0;
        (p.x - self.center.x).abs() <= hw && (p.y - self.center.y).abs() <= hh
    }
}

/// Everything the DOM callbacks share.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub layout: Layout,
    /// `None` between teardown and the next setup.
    pub registry: Option<PlacementRegistry>,
    /// Draw order; the last entry is on top.
    pub pieces: Vec<PieceView>,
    pub dragging_idx: Option<usize>,
    pub drag_off: (f64, f64), // stage-space offset from piece center
    pub scale: f64,
    pub offset: (f64, f64),
}

impl State {
    pub fn reset_pieces(&mut self) {
        self.pieces = self
            .layout
            .pieces
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, spec)| PieceView::new(spec, i))
            .collect();
        self.dragging_idx = None;
        self.drag_off = (0.0, 0.0);
    }
}

/// Topmost unlocked piece under `p`.
pub fn pick(pieces: &[PieceView], p: Position) -> Option<usize> {
    (0..pieces.len())
        .rev()
        .find(|&i| !pieces[i].locked && pieces[i].hit(p))
}

/// Thread local storage for the single running screen.
thread_local! {
    pub static SCREEN: RefCell<Option<Rc<RefCell<PlacementScreen>>>> = const { RefCell::new(None) };
}
