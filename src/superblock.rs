//! Superblock encoding and the block layout derived from it.
//!
//! Superblock (1 block) -> inode bitmap -> data bitmap -> inode table -> data region.

use alloc::vec::Vec;
use core::ops::Range;

use crate::config::*;
use crate::error::{FsError, Result};
use crate::SuperBlock;

/// Logical index spaces translated by `Metadata::to_absolute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Inode,
    Data,
}

impl SuperBlock {
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = alloc::vec![0u8; SB_DATA_BLOCKS + 1];
        buf[SB_MAGIC].copy_from_slice(MAGIC);
        buf[SB_INODE_BITMAP_BLOCKS] = self.inode_bitmap_blocks;
        buf[SB_DATA_BITMAP_BLOCKS] = self.data_bitmap_blocks;
        buf[SB_INODE_BLOCKS] = self.inode_blocks;
        buf[SB_DATA_BLOCKS] = self.data_blocks;
        buf
    }

    /// Decodes block 0, rejecting anything without the magic bytes.
    pub fn parse(block: &[u8]) -> Result<Self> {
        if block.len() <= SB_DATA_BLOCKS || &block[SB_MAGIC] != MAGIC {
            return Err(FsError::InvalidMagic);
        }
        Ok(Self {
            inode_bitmap_blocks: block[SB_INODE_BITMAP_BLOCKS],
            data_bitmap_blocks: block[SB_DATA_BITMAP_BLOCKS],
            inode_blocks: block[SB_INODE_BLOCKS],
            data_blocks: block[SB_DATA_BLOCKS],
        })
    }

    pub fn inode_bitmap(&self) -> Range<usize> {
        let start = SUPERBLOCK_ID + 1;
        start..start + self.inode_bitmap_blocks as usize
    }

    pub fn data_bitmap(&self) -> Range<usize> {
        let start = self.inode_bitmap().end;
        start..start + self.data_bitmap_blocks as usize
    }

    pub fn inode_table(&self) -> Range<usize> {
        let start = self.data_bitmap().end;
        start..start + self.inode_blocks as usize
    }

    pub fn data_region(&self) -> Range<usize> {
        let start = self.inode_table().end;
        start..start + self.data_blocks as usize
    }

    /// Blocks needed to hold the whole layout.
    pub fn total_blocks(&self) -> usize {
        self.data_region().end
    }

    pub fn region(&self, region: Region) -> Range<usize> {
        match region {
            Region::Inode => self.inode_table(),
            Region::Data => self.data_region(),
        }
    }
}
