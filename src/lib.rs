//! Dayview: a calendar day-view web app core with a URL address bar
//!
//! This crate provides the engine behind the day-view page:
//! - Address bar validation and `/read` navigation targets (WHATWG URL rules)
//! - Overlap stacking of time blocks via a containment tree
//! - Stack geometry and serializable render data for the JS host
//! - Drag-to-move with 15-minute snapping

pub mod address;
pub mod input;
pub mod layout;
pub mod render;
pub mod schedule;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmPlanner;

// Re-export primary types
pub use address::{AddressBar, AddressError, Navigation, Validity};
pub use input::{Key, KeyEvent};
pub use render::DayRenderData;
pub use schedule::{Block, BlockId, BlockKind, BlockTree, FlattenedBlock};

use crate::layout::snap_to_grid;
use crate::schedule::stacking_order;

/// An in-flight drag of one block
#[derive(Debug, Clone, Copy)]
pub struct DragState {
    /// The block as it was when the drag started
    pub block: Block,
    /// Pointer offset from the block's top at drag start
    pub click_offset: f64,
    /// Snapped top position of the ghost preview
    pub ghost_top: f64,
}

/// The main application state combining all components
pub struct Planner {
    pub address_bar: AddressBar,
    blocks: Vec<Block>,
    tree: BlockTree,
    drag: Option<DragState>,
    tree_dirty: bool,
    next_block_id: u64,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

impl Planner {
    /// Create a planner with an empty day
    pub fn new() -> Self {
        Self {
            address_bar: AddressBar::new(),
            blocks: Vec::new(),
            tree: BlockTree::new(),
            drag: None,
            // BlockId(0) is reserved for the day root
            next_block_id: 1,
            tree_dirty: false,
        }
    }

    /// Handle one key-down against the address field's current text.
    ///
    /// Returns the navigation the host should perform, if any.
    pub fn handle_key(&mut self, event: &KeyEvent, field_text: &str) -> Option<Navigation> {
        self.address_bar.handle_key(event, field_text)
    }

    /// Add a block to the day and return its id
    pub fn add_block(&mut self, start_minute: u32, end_minute: u32, kind: BlockKind) -> BlockId {
        let id = BlockId(self.next_block_id);
        self.next_block_id += 1;

        self.blocks
            .push(Block::new(id, start_minute, end_minute, kind));
        self.blocks.sort_by(stacking_order);
        self.tree_dirty = true;
        id
    }

    /// The day's blocks in stacking order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Start dragging a block; `pointer_y` is the pointer's column-relative Y
    pub fn begin_drag(&mut self, id: BlockId, pointer_y: f64) -> bool {
        let block = match self.blocks.iter().find(|b| b.id == id) {
            Some(block) => *block,
            None => return false,
        };

        self.drag = Some(DragState {
            block,
            click_offset: pointer_y - block.start_minute as f64,
            ghost_top: block.start_minute as f64,
        });
        true
    }

    /// Move the ghost preview to follow the pointer
    pub fn drag_to(&mut self, pointer_y: f64) {
        if let Some(ref mut drag) = self.drag {
            drag.ghost_top = snap_to_grid(pointer_y, drag.click_offset);
        }
    }

    /// Finish the drag, committing the block to the ghost position.
    ///
    /// Returns false when no drag was in progress.
    pub fn end_drag(&mut self) -> bool {
        let drag = match self.drag.take() {
            Some(drag) => drag,
            None => return false,
        };

        let new_start = drag.ghost_top.max(0.0) as u32;
        for block in &mut self.blocks {
            if block.id == drag.block.id {
                *block = block.moved_to(new_start);
            }
        }
        self.blocks.sort_by(stacking_order);
        self.tree_dirty = true;

        log::debug!(
            "moved block {:?} to minute {new_start}",
            drag.block.id
        );
        true
    }

    /// Abandon an in-flight drag without moving anything
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// The current drag, if one is in progress
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Flattened containment tree in render order
    pub fn flattened(&mut self) -> Vec<FlattenedBlock> {
        self.rebuild_tree();
        self.tree.flatten()
    }

    /// Build the render snapshot for the current state
    pub fn render_data(&mut self) -> DayRenderData {
        self.rebuild_tree();
        let flattened = self.tree.flatten();
        let drag = self.drag.as_ref().map(|d| (&d.block, d.ghost_top));
        DayRenderData::build(&flattened, drag)
    }

    /// Rebuild the containment tree if the block list changed
    fn rebuild_tree(&mut self) {
        if !self.tree_dirty {
            return;
        }
        self.tree = BlockTree::from_blocks(&self.blocks);
        self.tree_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    #[test]
    fn test_new_planner_is_empty() {
        let mut planner = Planner::new();
        assert!(planner.blocks().is_empty());
        // Only the day wrapper
        assert_eq!(planner.flattened().len(), 1);
    }

    #[test]
    fn test_enter_navigates() {
        let mut planner = Planner::new();
        let nav = planner
            .handle_key(&KeyEvent::new(Key::Enter), "https://example.com/page?x=1")
            .unwrap();
        assert_eq!(
            nav.href(),
            "/read?url=https%3A%2F%2Fexample.com%2Fpage%3Fx%3D1"
        );
    }

    #[test]
    fn test_malformed_address_marks_field() {
        let mut planner = Planner::new();
        let nav = planner.handle_key(&KeyEvent::new(Key::Enter), "example.com");
        assert!(nav.is_none());
        assert!(planner.address_bar.validity().is_invalid());
    }

    #[test]
    fn test_add_blocks_and_render() {
        let mut planner = Planner::new();
        planner.add_block(10, 180, BlockKind::Available);
        planner.add_block(20, 90, BlockKind::Busy);

        let data = planner.render_data();
        assert_eq!(data.blocks.len(), 3);
        assert_eq!(data.blocks[2].stack_position, 2);
    }

    #[test]
    fn test_blocks_kept_in_stacking_order() {
        let mut planner = Planner::new();
        planner.add_block(140, 155, BlockKind::Busy);
        planner.add_block(10, 180, BlockKind::Available);
        planner.add_block(20, 90, BlockKind::Busy);

        let starts: Vec<u32> = planner.blocks().iter().map(|b| b.start_minute).collect();
        assert_eq!(starts, vec![10, 20, 140]);
    }

    #[test]
    fn test_drag_commits_with_snap() {
        let mut planner = Planner::new();
        let id = planner.add_block(30, 75, BlockKind::Busy);

        assert!(planner.begin_drag(id, 40.0));
        planner.drag_to(100.0);

        let ghost = planner.render_data().ghost.unwrap();
        assert_eq!(ghost.top, 90.0);

        assert!(planner.end_drag());
        let moved = planner
            .blocks()
            .iter()
            .find(|b| b.id == id)
            .copied()
            .unwrap();
        assert_eq!(moved.start_minute, 90);
        assert_eq!(moved.end_minute, 135);
    }

    #[test]
    fn test_end_drag_without_begin_is_noop() {
        let mut planner = Planner::new();
        planner.add_block(30, 75, BlockKind::Busy);
        assert!(!planner.end_drag());
    }

    #[test]
    fn test_begin_drag_unknown_block() {
        let mut planner = Planner::new();
        assert!(!planner.begin_drag(BlockId(42), 0.0));
        assert!(planner.drag().is_none());
    }

    #[test]
    fn test_cancel_drag_leaves_block_in_place() {
        let mut planner = Planner::new();
        let id = planner.add_block(30, 75, BlockKind::Busy);
        planner.begin_drag(id, 30.0);
        planner.drag_to(300.0);
        planner.cancel_drag();

        assert!(planner.render_data().ghost.is_none());
        assert_eq!(planner.blocks()[0].start_minute, 30);
    }
}
