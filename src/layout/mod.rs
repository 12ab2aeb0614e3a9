//! Stack geometry for rendering nested blocks
//!
//! Vertical placement is the identity mapping: one minute is one pixel, so a
//! block's top is its start minute and its height is its duration. Horizontal
//! placement shrinks and indents each containment level so nested blocks stay
//! visible inside their containers.

/// Full day-column width in pixels
pub const MAX_COL_WIDTH: f64 = 500.0;

/// Horizontal inset applied per stack level
pub const BLOCK_STACK_PADDING: f64 = 10.0;

/// Drag positions snap to this grid
pub const SNAP_MINUTES: f64 = 15.0;

/// Horizontal placement of a block within the day column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnOffsets {
    pub left: f64,
    pub width: f64,
}

/// Pixel offsets for a block at the given containment depth.
///
/// Depth 0 (the day wrapper) spans the full column. Each level below is
/// inset by the accumulated stack padding and narrowed by the depth.
pub fn position_offsets(stack_position: usize) -> ColumnOffsets {
    if stack_position == 0 {
        return ColumnOffsets {
            left: 0.0,
            width: MAX_COL_WIDTH,
        };
    }

    let stack_position = stack_position as f64;
    let stack_separation = stack_position * BLOCK_STACK_PADDING;
    // The divisor collapses at depth 1; treat that level as a plain inset
    let divisor = (stack_position - 1.0).max(1.0);
    ColumnOffsets {
        left: MAX_COL_WIDTH - MAX_COL_WIDTH / divisor + stack_separation,
        width: MAX_COL_WIDTH / divisor - 2.0 * stack_separation,
    }
}

/// Percentage-based offsets for responsive hosts, as CSS expressions.
///
/// Unlike [`position_offsets`], the width share also accounts for how deep
/// the subtree beneath the block is, so containers with many nested levels
/// stay wide enough to show them.
pub fn subtree_transforms(stack_position: usize, subtree_depth: usize) -> (String, String) {
    if stack_position == 0 {
        return ("0".to_string(), format!("{MAX_COL_WIDTH}"));
    }

    let stack_position = stack_position as f64;
    let subtree_depth = subtree_depth as f64;
    let width_divisor = stack_position + subtree_depth;

    let width = if subtree_depth > 0.0 {
        1.8 / width_divisor
    } else {
        1.0 / width_divisor
    };

    (
        format!("calc(100% * {})", (stack_position - 1.0) / width_divisor),
        format!("calc(100% * {width})"),
    )
}

/// Snap a pointer-derived top position down to the drag grid.
pub fn snap_to_grid(position_y: f64, click_offset: f64) -> f64 {
    ((position_y - click_offset) / SNAP_MINUTES).floor() * SNAP_MINUTES
}
