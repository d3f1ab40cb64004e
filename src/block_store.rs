//! Fixed-size block access over a raw in-memory volume.

use alloc::vec::Vec;
use core::ops::Range;

use crate::config::*;
use crate::error::{FsError, Result};

/// Treats a mutable byte buffer as an array of `block_size`-byte blocks.
/// `V` is anything that can lend the volume bytes, e.g. `Vec<u8>` or `&mut [u8]`.
#[derive(Debug)]
pub struct BlockStore<V> {
    volume: V,
    block_size: usize,
}

impl<V> BlockStore<V>
where
    V: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wraps `volume`, which must be a whole number of blocks and hold at least
    /// `MIN_VOLUME_BLOCKS` of them.
    pub fn new(volume: V, block_size: usize) -> Result<Self> {
        let len = volume.as_ref().len();
        if block_size < MIN_BLOCK_SIZE
            || len % block_size != 0
            || len < MIN_VOLUME_BLOCKS * block_size
        {
            return Err(FsError::InvalidSize { len, block_size });
        }
        Ok(Self { volume, block_size })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn num_blocks(&self) -> usize {
        self.volume.as_ref().len() / self.block_size
    }

    /// Byte range covered by `count` blocks starting at block `start`.
    pub fn byte_range(&self, start: usize, count: usize) -> Result<Range<usize>> {
        let end_block = start
            .checked_add(count)
            .ok_or(FsError::BlockOutOfRange { index: start })?;
        if end_block > self.num_blocks() {
            return Err(FsError::BlockOutOfRange { index: end_block.saturating_sub(1) });
        }
        Ok(start * self.block_size..end_block * self.block_size)
    }

    pub fn get_block(&self, index: usize) -> Result<&[u8]> {
        let range = self.byte_range(index, 1)?;
        Ok(&self.volume.as_ref()[range])
    }

    /// Writes `data` into block `index`, padding the rest of the block with zeros.
    pub fn set_block(&mut self, index: usize, data: &[u8]) -> Result<()> {
        if data.len() > self.block_size {
            return Err(FsError::DataTooLarge {
                len: data.len(),
                block_size: self.block_size,
            });
        }
        let range = self.byte_range(index, 1)?;
        let block = &mut self.volume.as_mut()[range];
        block[..data.len()].copy_from_slice(data);
        block[data.len()..].fill(0);
        Ok(())
    }

    pub fn bytes(&self) -> &[u8] {
        self.volume.as_ref()
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        self.volume.as_mut()
    }

    /// Full copy of the volume.
    pub fn serialize(&self) -> Vec<u8> {
        self.volume.as_ref().to_vec()
    }

    pub fn into_inner(self) -> V {
        self.volume
    }
}
