//! Containment tree for overlap stacking
//!
//! Overlapping blocks render as nested stacks: a block sits beneath every
//! block that swallows it. The tree is rooted at a synthetic wrapper spanning
//! the whole day, and insertion keeps the containment invariant without ever
//! rebalancing (block counts per day are small).

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::{Block, BlockId, Overlap};

/// Reserved id of the synthetic day root; caller-assigned ids start above it
pub const ROOT_ID: BlockId = BlockId(0);

/// A block with its resolved position in the containment stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenedBlock {
    pub block: Block,
    /// Containment depth below the day wrapper (the wrapper itself is 0)
    pub stack_position: usize,
    /// Height of the containment subtree hanging off this block
    pub subtree_depth: usize,
}

#[derive(Debug)]
struct Node {
    block: Block,
    parent: Option<BlockId>,
    children: SmallVec<[BlockId; 4]>,
    subtree_depth: usize,
}

/// Containment tree rooted at the day wrapper
#[derive(Debug)]
pub struct BlockTree {
    nodes: FxHashMap<BlockId, Node>,
}

impl Default for BlockTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockTree {
    /// Create a tree holding only the day wrapper
    pub fn new() -> Self {
        let mut nodes = FxHashMap::default();
        nodes.insert(
            ROOT_ID,
            Node {
                block: Block::day_wrapper(ROOT_ID),
                parent: None,
                children: SmallVec::new(),
                subtree_depth: 0,
            },
        );
        Self { nodes }
    }

    /// Build a tree from blocks already in stacking order
    pub fn from_blocks<'a>(blocks: impl IntoIterator<Item = &'a Block>) -> Self {
        let mut tree = Self::new();
        for block in blocks {
            tree.add(*block);
        }
        tree
    }

    /// Number of blocks excluding the day wrapper
    pub fn block_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Look up a block by id
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.nodes.get(&id).map(|node| &node.block)
    }

    /// Insert a block at its containment position.
    ///
    /// Walks down from the root: the block nests beneath the first child that
    /// swallows it; children it swallows are re-parented beneath it at the
    /// point of attachment.
    pub fn add(&mut self, block: Block) {
        debug_assert_ne!(block.id, ROOT_ID, "block ids must not collide with the day root");

        let mut dest = ROOT_ID;
        loop {
            let children: SmallVec<[BlockId; 4]> = match self.nodes.get(&dest) {
                Some(node) => node.children.clone(),
                None => return,
            };

            let mut swallowed: SmallVec<[BlockId; 4]> = SmallVec::new();
            let mut descend = None;
            for child_id in children {
                let child_block = match self.nodes.get(&child_id) {
                    Some(node) => node.block,
                    None => continue,
                };
                match block.overlap(&child_block) {
                    Some(Overlap::GetsSwallowed) => {
                        descend = Some(child_id);
                        break;
                    }
                    Some(Overlap::Swallows) => swallowed.push(child_id),
                    None => {}
                }
            }

            if let Some(next) = descend {
                dest = next;
                continue;
            }

            self.attach(dest, block, &swallowed);
            return;
        }
    }

    /// Attach `block` under `parent`, pulling `swallowed` siblings beneath it.
    fn attach(&mut self, parent: BlockId, block: Block, swallowed: &[BlockId]) {
        let id = block.id;
        let subtree_depth = swallowed
            .iter()
            .filter_map(|sid| self.nodes.get(sid))
            .map(|node| node.subtree_depth + 1)
            .max()
            .unwrap_or(0);

        self.nodes.insert(
            id,
            Node {
                block,
                parent: Some(parent),
                children: SmallVec::new(),
                subtree_depth,
            },
        );
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }

        for &sid in swallowed {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|c| *c != sid);
            }
            if let Some(swallowed_node) = self.nodes.get_mut(&sid) {
                swallowed_node.parent = Some(id);
            }
            if let Some(new_node) = self.nodes.get_mut(&id) {
                new_node.children.push(sid);
            }
        }

        self.bump_subtree_depth(parent, subtree_depth + 1);
    }

    /// Raise subtree depths along the ancestor chain; stops as soon as an
    /// ancestor already accounts for a subtree at least this deep.
    fn bump_subtree_depth(&mut self, start: BlockId, value: usize) {
        let mut id = start;
        let mut value = value;
        loop {
            let node = match self.nodes.get_mut(&id) {
                Some(node) => node,
                None => return,
            };
            if node.subtree_depth >= value {
                return;
            }
            node.subtree_depth = value;
            match node.parent {
                Some(parent) => {
                    id = parent;
                    value += 1;
                }
                None => return,
            }
        }
    }

    /// Breadth-first flattening, root first, yielding stack positions
    pub fn flatten(&self) -> Vec<FlattenedBlock> {
        let mut queue: VecDeque<(BlockId, usize)> = VecDeque::with_capacity(self.nodes.len());
        let mut out = Vec::with_capacity(self.nodes.len());

        queue.push_back((ROOT_ID, 0));
        while let Some((id, stack_position)) = queue.pop_front() {
            if let Some(node) = self.nodes.get(&id) {
                out.push(FlattenedBlock {
                    block: node.block,
                    stack_position,
                    subtree_depth: node.subtree_depth,
                });
                for child in &node.children {
                    queue.push_back((*child, stack_position + 1));
                }
            }
        }

        out
    }
}
