//! Schedule model: time blocks and the containment tree

mod block;
mod tree;

pub use block::{stacking_order, time_label, Block, BlockId, BlockKind, Overlap, MINUTES_PER_DAY};
pub use tree::{BlockTree, FlattenedBlock, ROOT_ID};
