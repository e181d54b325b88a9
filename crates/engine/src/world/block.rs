/// Runtime block-state id. Every combination of trait values the palette
/// knows about has exactly one of these, and chunks store nothing else.
///
/// The only id with a fixed meaning is `BlockId::AIR` (0): the palette always
/// registers air first, and chunk sections filled entirely with air are
/// deallocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BlockId(pub u16);

impl BlockId {
    /// The universal "empty" block.
    pub const AIR: BlockId = BlockId(0);

    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Position of this state in the palette's state table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
