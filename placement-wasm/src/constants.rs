/// Adapter-wide numeric constants. Lengths are canvas pixels unless noted.
/// Empty border kept around the stage when fitting it to the canvas.
pub const STAGE_MARGIN_PX: f64 = 20.0;
/// Line width of the goal outlines.
pub const GOAL_LINE_WIDTH_PX: f64 = 2.0;
/// Label size bounds for piece names.
pub const LABEL_MIN_PX: f64 = 10.0;
pub const LABEL_MAX_PX: f64 = 24.0;
/// Element ids the host page is expected to provide.
pub const CANVAS_ID: &str = "cv";
pub const STATUS_ID: &str = "status";
/// DOM event dispatched on the document when the puzzle is solved.
pub const COMPLETE_EVENT: &str = "placementcomplete";
