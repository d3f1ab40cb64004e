use alloc::vec::Vec;

use crate::block_store::BlockStore;
use crate::directory::Directory;
use crate::error::{FsError, Result};
use crate::metadata::Metadata;
use crate::path::resolve;
use crate::structs::*;

#[derive(Debug)]
pub struct FileSystem<V> {
    metadata: Metadata<V>,
}

impl<V> FileSystem<V>
where
    V: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wraps a raw volume without touching it. Call `format` before use on a blank volume.
    pub fn new(volume: V, block_size: usize) -> Result<Self> {
        Ok(Self {
            metadata: Metadata::new(BlockStore::new(volume, block_size)?),
        })
    }

    /// Attaches to an already formatted volume.
    pub fn mount(volume: V, block_size: usize) -> Result<Self> {
        let fs = Self::new(volume, block_size)?;
        fs.metadata.superblock()?;
        Ok(fs)
    }

    /// Formats with the reference layout, see `SuperBlock::default`.
    pub fn format(&mut self) -> Result<()> {
        self.format_with(SuperBlock::default())
    }

    pub fn format_with(&mut self, superblock: SuperBlock) -> Result<()> {
        self.metadata.format(superblock)
    }

    // Following methods directly operate on the fs instance, user should wrap a lock around it if needed.

    /// Resolves `path` to an inode id, creating missing segments when `create` is set.
    pub fn open(&mut self, path: &[u8], create: bool) -> Result<usize> {
        resolve(&mut self.metadata, path, create)
    }

    /// Inode `inode_id`, or `NotFound` if its bitmap bit is clear.
    fn allocated_inode(&self, inode_id: usize) -> Result<Inode> {
        if !self.metadata.inode_bitmap()?.is_allocated(inode_id)? {
            return Err(FsError::NotFound);
        }
        self.metadata.get_inode(inode_id)
    }

    /// File content up to, not including, its first zero byte.
    pub fn read(&self, inode_id: usize) -> Result<Vec<u8>> {
        let inode = self.allocated_inode(inode_id)?;
        let mut content = self.metadata.read_inode_content(&inode)?;
        if let Some(end) = content.iter().position(|&c| c == 0) {
            content.truncate(end);
        }
        Ok(content)
    }

    /// Replaces the whole content of `inode_id` with `data`.
    pub fn write(&mut self, inode_id: usize, data: &[u8]) -> Result<()> {
        let mut inode = self.allocated_inode(inode_id)?;
        self.metadata.write_inode_content(&mut inode, data)?;
        self.metadata.set_inode(inode_id, &inode)
    }

    pub fn read_dir(&self, inode_id: usize) -> Result<Directory> {
        self.allocated_inode(inode_id)?;
        self.metadata.read_dir(inode_id)
    }

    pub fn inode(&self, inode_id: usize) -> Result<Inode> {
        self.allocated_inode(inode_id)
    }

    pub fn free_inodes(&self) -> Result<usize> {
        self.metadata.inode_bitmap().map(|bitmap| bitmap.free_count())
    }

    pub fn free_data_blocks(&self) -> Result<usize> {
        self.metadata.data_bitmap().map(|bitmap| bitmap.free_count())
    }

    /// Full dump of the volume.
    pub fn serialize(&self) -> Vec<u8> {
        self.metadata.store().serialize()
    }

    pub fn metadata(&self) -> &Metadata<V> {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata<V> {
        &mut self.metadata
    }

    pub fn into_inner(self) -> V {
        self.metadata.into_store().into_inner()
    }
}
