//! Serializable render data for the JS host
//!
//! The host renders one absolutely-positioned element per entry; fields are
//! camelCased for direct consumption on the JS side.

use serde::{Deserialize, Serialize};

use crate::layout::position_offsets;
use crate::schedule::{time_label, Block, BlockId, FlattenedBlock};

/// Opacity applied to a block while it is being dragged
const DRAGGED_OPACITY: u8 = 50;
const FULL_OPACITY: u8 = 100;

/// One positioned block in the day column
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRenderData {
    pub id: u64,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Hover/inline label, e.g. "Busy, 0130"
    pub label: String,
    /// CSS token for the block kind
    pub kind: String,
    /// Percent; the dragged block renders dimmed in place
    pub opacity: u8,
    pub stack_position: usize,
}

impl BlockRenderData {
    /// Resolve geometry and label for one flattened block
    pub fn new(flattened: &FlattenedBlock, dragged: Option<BlockId>) -> Self {
        let block = flattened.block;
        let offsets = position_offsets(flattened.stack_position);
        let opacity = if dragged == Some(block.id) {
            DRAGGED_OPACITY
        } else {
            FULL_OPACITY
        };

        Self {
            id: block.id.0,
            left: offsets.left,
            top: block.start_minute as f64,
            width: offsets.width,
            height: block.duration() as f64,
            label: block_label(&block),
            kind: block.kind.css_token().to_string(),
            opacity,
            stack_position: flattened.stack_position,
        }
    }
}

/// The translucent preview following the pointer during a drag
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GhostRenderData {
    pub top: f64,
    pub height: f64,
    pub label: String,
    pub kind: String,
}

impl GhostRenderData {
    /// Ghost for a dragged block at the snapped top position
    pub fn new(block: &Block, ghost_top: f64) -> Self {
        Self {
            top: ghost_top,
            height: block.duration() as f64,
            label: block_label(block),
            kind: block.kind.css_token().to_string(),
        }
    }
}

/// A full snapshot of the day column
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRenderData {
    pub blocks: Vec<BlockRenderData>,
    pub ghost: Option<GhostRenderData>,
}

impl DayRenderData {
    /// Build render data for flattened blocks plus an optional in-flight drag
    pub fn build(flattened: &[FlattenedBlock], drag: Option<(&Block, f64)>) -> Self {
        let dragged = drag.map(|(block, _)| block.id);
        Self {
            blocks: flattened
                .iter()
                .map(|f| BlockRenderData::new(f, dragged))
                .collect(),
            ghost: drag.map(|(block, ghost_top)| GhostRenderData::new(block, ghost_top)),
        }
    }
}

fn block_label(block: &Block) -> String {
    format!("{}, {}", block.kind, time_label(block.start_minute))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{BlockKind, BlockTree};

    fn sample_tree() -> BlockTree {
        let mut tree = BlockTree::new();
        tree.add(Block::new(BlockId(1), 10, 180, BlockKind::Available));
        tree.add(Block::new(BlockId(2), 20, 90, BlockKind::Busy));
        tree
    }

    #[test]
    fn test_block_geometry() {
        let flattened = sample_tree().flatten();
        let data = DayRenderData::build(&flattened, None);

        assert_eq!(data.blocks.len(), 3);
        assert!(data.ghost.is_none());

        let outer = &data.blocks[1];
        assert_eq!(outer.top, 10.0);
        assert_eq!(outer.height, 170.0);
        assert_eq!(outer.kind, "available");
        assert_eq!(outer.label, "Available, 0010");
        assert_eq!(outer.opacity, 100);

        let inner = &data.blocks[2];
        assert_eq!(inner.stack_position, 2);
        assert_eq!(inner.left, 20.0);
        assert_eq!(inner.width, 460.0);
    }

    #[test]
    fn test_dragged_block_is_dimmed_and_ghosted() {
        let flattened = sample_tree().flatten();
        let dragged = flattened[2].block;
        let data = DayRenderData::build(&flattened, Some((&dragged, 45.0)));

        assert_eq!(data.blocks[2].opacity, 50);
        assert_eq!(data.blocks[1].opacity, 100);

        let ghost = data.ghost.unwrap();
        assert_eq!(ghost.top, 45.0);
        assert_eq!(ghost.height, 70.0);
        assert_eq!(ghost.label, "Busy, 0020");
    }

    #[test]
    fn test_json_field_names_are_camel_case() {
        let flattened = sample_tree().flatten();
        let data = DayRenderData::build(&flattened, None);
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"stackPosition\""));
        assert!(json.contains("\"ghost\":null"));
    }
}
