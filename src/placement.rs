//! Memory placement strategies: which block receives a task of a given size.

use std::{cmp::Reverse, fmt};

use crate::core::{Block, BlockId, Units};

pub trait PlacementStrategy {
    /// Returns a block with at least `size` free units, or `None` if no block
    /// currently has room. `None` is a normal outcome, not an error.
    fn place(&mut self, blocks: &[Block], size: Units) -> Option<BlockId>;

    fn name(&self) -> &'static str;
}

impl<P: PlacementStrategy + ?Sized> PlacementStrategy for Box<P> {
    fn place(&mut self, blocks: &[Block], size: Units) -> Option<BlockId> {
        (**self).place(blocks, size)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

// No internal state for these three; declare them as zero-sized types.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstFit;
#[derive(Debug, Default, Clone, Copy)]
pub struct BestFit;
#[derive(Debug, Default, Clone, Copy)]
pub struct WorstFit;

/// First-fit that resumes from the block after its last successful placement.
#[derive(Debug, Default, Clone)]
pub struct NextFit {
    position: BlockId,
}

impl PlacementStrategy for FirstFit {
    fn place(&mut self, blocks: &[Block], size: Units) -> Option<BlockId> {
        blocks.iter().position(|block| block.fits(size))
    }

    fn name(&self) -> &'static str {
        "first-fit"
    }
}

impl PlacementStrategy for NextFit {
    fn place(&mut self, blocks: &[Block], size: Units) -> Option<BlockId> {
        let total = blocks.len();
        for offset in 0..total {
            let i = (self.position + offset) % total;
            if blocks[i].fits(size) {
                self.position = (i + 1) % total;
                return Some(i);
            }
        }
        None
    }

    fn name(&self) -> &'static str {
        "next-fit"
    }
}

impl PlacementStrategy for BestFit {
    fn place(&mut self, blocks: &[Block], size: Units) -> Option<BlockId> {
        blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| block.fits(size))
            .min_by_key(|&(i, block)| (block.free, i))
            .map(|(i, _)| i)
    }

    fn name(&self) -> &'static str {
        "best-fit"
    }
}

impl PlacementStrategy for WorstFit {
    fn place(&mut self, blocks: &[Block], size: Units) -> Option<BlockId> {
        blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| block.fits(size))
            .min_by_key(|&(i, block)| (Reverse(block.free), i))
            .map(|(i, _)| i)
    }

    fn name(&self) -> &'static str {
        "worst-fit"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementKind {
    FirstFit,
    NextFit,
    BestFit,
    WorstFit,
}

impl PlacementKind {
    pub const ALL: [PlacementKind; 4] = [
        PlacementKind::FirstFit,
        PlacementKind::NextFit,
        PlacementKind::BestFit,
        PlacementKind::WorstFit,
    ];

    /// A fresh strategy instance; next-fit starts scanning at block 0.
    pub fn build(self) -> Box<dyn PlacementStrategy> {
        match self {
            PlacementKind::FirstFit => Box::new(FirstFit),
            PlacementKind::NextFit => Box::new(NextFit::default()),
            PlacementKind::BestFit => Box::new(BestFit),
            PlacementKind::WorstFit => Box::new(WorstFit),
        }
    }
}

impl fmt::Display for PlacementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlacementKind::FirstFit => "first-fit",
            PlacementKind::NextFit => "next-fit",
            PlacementKind::BestFit => "best-fit",
            PlacementKind::WorstFit => "worst-fit",
        };
        f.write_str(name)
    }
}
