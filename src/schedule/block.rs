//! Time blocks and overlap classification

use std::cmp::Ordering;
use std::fmt;

/// Unique identifier for a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BlockId(pub u64);

/// Minutes in a day; the root wrapper spans the whole range
pub const MINUTES_PER_DAY: u32 = 1440;

/// The kind of block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Busy,
    Available,
    /// Synthetic container, used for the day root
    Wrapper,
}

impl BlockKind {
    /// CSS token the host page styles blocks by
    pub fn css_token(&self) -> &'static str {
        match self {
            BlockKind::Busy => "busy",
            BlockKind::Available => "available",
            BlockKind::Wrapper => "wrapper",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Busy => write!(f, "Busy"),
            BlockKind::Available => write!(f, "Available"),
            BlockKind::Wrapper => write!(f, "Wrapper"),
        }
    }
}

/// How a block overlaps another, seen from the block being classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// This block contains the other and should sit above it in the stack
    Swallows,
    /// This block is contained and should nest beneath the other
    GetsSwallowed,
}

/// A scheduled span of minutes within a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub id: BlockId,
    pub start_minute: u32,
    /// Exclusive
    pub end_minute: u32,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(id: BlockId, start_minute: u32, end_minute: u32, kind: BlockKind) -> Self {
        Self {
            id,
            start_minute,
            end_minute,
            kind,
        }
    }

    /// The synthetic root block spanning the whole day
    pub fn day_wrapper(id: BlockId) -> Self {
        Self::new(id, 0, MINUTES_PER_DAY, BlockKind::Wrapper)
    }

    pub fn duration(&self) -> u32 {
        self.end_minute.saturating_sub(self.start_minute)
    }

    /// Classify how this block overlaps another, if at all.
    ///
    /// A block starting later, or starting at the same minute and ending no
    /// later, gets swallowed; otherwise it swallows.
    pub fn overlap(&self, other: &Block) -> Option<Overlap> {
        if self.start_minute >= other.end_minute || self.end_minute < other.start_minute {
            return None;
        }

        if self.start_minute > other.start_minute
            || (self.start_minute == other.start_minute && self.end_minute <= other.end_minute)
        {
            return Some(Overlap::GetsSwallowed);
        }

        Some(Overlap::Swallows)
    }

    /// The same block moved to a new start minute, duration preserved.
    pub fn moved_to(&self, start_minute: u32) -> Self {
        Self {
            start_minute,
            end_minute: start_minute + self.duration(),
            ..*self
        }
    }
}

/// Ordering blocks are inserted in: earlier starts first, and for equal
/// starts the longer block first so containers precede their contents.
pub fn stacking_order(a: &Block, b: &Block) -> Ordering {
    if a.start_minute < b.start_minute
        || (a.start_minute == b.start_minute && a.end_minute >= b.end_minute)
    {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Format minutes-from-midnight as an "HHMM" label.
pub fn time_label(minutes: u32) -> String {
    format!("{:02}{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(start: u32, end: u32) -> Block {
        Block::new(BlockId(1), start, end, BlockKind::Busy)
    }

    #[test]
    fn test_disjoint_blocks_do_not_overlap() {
        let a = block(0, 60);
        let b = block(90, 120);
        assert_eq!(a.overlap(&b), None);
        assert_eq!(b.overlap(&a), None);
    }

    #[test]
    fn test_contained_block_gets_swallowed() {
        let outer = block(10, 180);
        let inner = block(20, 90);
        assert_eq!(inner.overlap(&outer), Some(Overlap::GetsSwallowed));
        assert_eq!(outer.overlap(&inner), Some(Overlap::Swallows));
    }

    #[test]
    fn test_equal_start_longer_block_swallows() {
        let long = block(20, 110);
        let short = block(20, 90);
        assert_eq!(short.overlap(&long), Some(Overlap::GetsSwallowed));
        assert_eq!(long.overlap(&short), Some(Overlap::Swallows));
    }

    #[test]
    fn test_identical_spans_get_swallowed() {
        // Equal start and end: the incoming block nests beneath the existing one
        let a = block(20, 90);
        let b = block(20, 90);
        assert_eq!(a.overlap(&b), Some(Overlap::GetsSwallowed));
    }

    #[test]
    fn test_moved_to_preserves_duration() {
        let b = block(30, 75);
        let moved = b.moved_to(120);
        assert_eq!(moved.start_minute, 120);
        assert_eq!(moved.end_minute, 165);
        assert_eq!(moved.duration(), b.duration());
        assert_eq!(moved.id, b.id);
    }

    #[test]
    fn test_stacking_order() {
        let early = block(10, 180);
        let late = block(20, 90);
        assert_eq!(stacking_order(&early, &late), Ordering::Less);

        // Equal starts: longer first
        let long = block(20, 110);
        let short = block(20, 90);
        assert_eq!(stacking_order(&long, &short), Ordering::Less);
        assert_eq!(stacking_order(&short, &long), Ordering::Greater);
    }

    #[test]
    fn test_time_label() {
        assert_eq!(time_label(0), "0000");
        assert_eq!(time_label(90), "0130");
        assert_eq!(time_label(615), "1015");
        assert_eq!(time_label(1439), "2359");
    }

    #[test]
    fn test_day_wrapper() {
        let root = Block::day_wrapper(BlockId(0));
        assert_eq!(root.start_minute, 0);
        assert_eq!(root.end_minute, MINUTES_PER_DAY);
        assert_eq!(root.kind, BlockKind::Wrapper);
    }
}
