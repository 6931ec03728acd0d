/// Fill color for the `i`-th piece. Cycles through a fixed set of hues so
/// neighbouring pieces stay distinguishable.
pub fn piece_color(i: usize) -> &'static str {
    const PALETTE: [&str; 8] = [
        "tomato",
        "orange",
        "gold",
        "mediumseagreen",
        "teal",
        "dodgerblue",
        "blueviolet",
        "hotpink",
    ];
    PALETTE[i % PALETTE.len()]
}

/// Outline color of goal zones.
pub const GOAL_OUTLINE: &str = "#0000ff";
