//! Management of reading and writing to inodes and their data blocks.

use alloc::vec::Vec;

use tracing::trace;

use crate::error::{FsError, Result};
use crate::metadata::Metadata;
use crate::structs::Inode;
use crate::superblock::Region;

impl<V> Metadata<V>
where
    V: AsRef<[u8]> + AsMut<[u8]>,
{
    pub fn get_inode(&self, inode_id: usize) -> Result<Inode> {
        let block_id = self.to_absolute(inode_id, Region::Inode)?;
        Inode::parse(self.store.get_block(block_id)?)
    }

    pub fn set_inode(&mut self, inode_id: usize, inode: &Inode) -> Result<()> {
        let block_id = self.to_absolute(inode_id, Region::Inode)?;
        let buf = inode.serialize(self.block_size())?;
        self.store.set_block(block_id, &buf)
    }

    pub fn get_data_block(&self, index: usize) -> Result<&[u8]> {
        let block_id = self.to_absolute(index, Region::Data)?;
        self.store.get_block(block_id)
    }

    pub fn set_data_block(&mut self, index: usize, data: &[u8]) -> Result<()> {
        let block_id = self.to_absolute(index, Region::Data)?;
        self.store.set_block(block_id, data)
    }

    /// Concatenation of every data block of `inode`, in order.
    pub fn read_inode_content(&self, inode: &Inode) -> Result<Vec<u8>> {
        let mut content = Vec::with_capacity(inode.data_blocks.len() * self.block_size());
        for &index in &inode.data_blocks {
            content.extend_from_slice(self.get_data_block(index as usize)?);
        }
        Ok(content)
    }

    /// Resizes the block list of `inode` to fit `data` and rewrites its blocks.
    /// New blocks are appended, surplus blocks are released from the tail.
    /// The inode record itself is not stored; callers must `set_inode` afterwards.
    pub fn write_inode_content(&mut self, inode: &mut Inode, data: &[u8]) -> Result<()> {
        let block_size = self.block_size();
        let required = data.len().div_ceil(block_size);
        if required > Inode::max_blocks(block_size) {
            return Err(FsError::FileTooLarge { blocks: required });
        }
        trace!(required, allocated = inode.data_blocks.len(), "resizing inode content");

        while inode.data_blocks.len() < required {
            let slot = self.data_bitmap_mut()?.allocate()?;
            let slot = u8::try_from(slot).map_err(|_| FsError::BlockOutOfRange { index: slot })?;
            inode.data_blocks.push(slot);
        }
        if inode.data_blocks.len() > required {
            for slot in inode.data_blocks.split_off(required) {
                self.data_bitmap_mut()?.release(slot as usize)?;
            }
        }

        for (&index, chunk) in inode.data_blocks.iter().zip(data.chunks(block_size)) {
            self.set_data_block(index as usize, chunk)?;
        }
        Ok(())
    }
}
