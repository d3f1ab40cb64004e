//! Metadata layer: everything that needs the superblock to find its way around the volume.
//! Inode table and directory access live in `inode.rs` and `directory.rs`.

use tracing::debug;

use crate::bitmap::Bitmap;
use crate::block_store::BlockStore;
use crate::config::*;
use crate::error::{FsError, Result};
use crate::structs::*;
use crate::superblock::Region;

#[derive(Debug)]
pub struct Metadata<V> {
    pub(crate) store: BlockStore<V>,
}

impl<V> Metadata<V>
where
    V: AsRef<[u8]> + AsMut<[u8]>,
{
    pub fn new(store: BlockStore<V>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &BlockStore<V> {
        &self.store
    }

    pub fn into_store(self) -> BlockStore<V> {
        self.store
    }

    pub fn block_size(&self) -> usize {
        self.store.block_size()
    }

    /// Reads block 0, checking the magic bytes on every access.
    pub fn superblock(&self) -> Result<SuperBlock> {
        SuperBlock::parse(self.store.get_block(SUPERBLOCK_ID)?)
    }

    pub fn inode_bitmap(&self) -> Result<Bitmap<&[u8]>> {
        let sb = self.superblock()?;
        let range = self.store.byte_range(sb.inode_bitmap().start, sb.inode_bitmap_blocks as usize)?;
        Bitmap::with_capacity(&self.store.bytes()[range], sb.inode_blocks as usize)
    }

    pub fn inode_bitmap_mut(&mut self) -> Result<Bitmap<&mut [u8]>> {
        let sb = self.superblock()?;
        let range = self.store.byte_range(sb.inode_bitmap().start, sb.inode_bitmap_blocks as usize)?;
        Bitmap::with_capacity(&mut self.store.bytes_mut()[range], sb.inode_blocks as usize)
    }

    pub fn data_bitmap(&self) -> Result<Bitmap<&[u8]>> {
        let sb = self.superblock()?;
        let range = self.store.byte_range(sb.data_bitmap().start, sb.data_bitmap_blocks as usize)?;
        Bitmap::with_capacity(&self.store.bytes()[range], sb.data_blocks as usize)
    }

    pub fn data_bitmap_mut(&mut self) -> Result<Bitmap<&mut [u8]>> {
        let sb = self.superblock()?;
        let range = self.store.byte_range(sb.data_bitmap().start, sb.data_bitmap_blocks as usize)?;
        Bitmap::with_capacity(&mut self.store.bytes_mut()[range], sb.data_blocks as usize)
    }

    /// Converts an inode or data index to an absolute block index.
    pub fn to_absolute(&self, index: usize, region: Region) -> Result<usize> {
        let range = self.superblock()?.region(region);
        if index >= range.len() {
            return Err(FsError::BlockOutOfRange { index });
        }
        Ok(range.start + index)
    }

    /// Rejects a layout that does not fit the volume, or whose bitmaps have fewer bits
    /// than their region has slots, before writing anything.
    ///
    /// Writes `superblock`, clears both bitmaps and creates the root directory
    /// (inode 0, one empty data block). Blocks outside block 0, the bitmaps,
    /// the root inode and its data block are left untouched.
    pub fn format(&mut self, superblock: SuperBlock) -> Result<()> {
        let len = self.store.bytes().len();
        let block_size = self.block_size();
        let bits_per_block = block_size * 8;
        if superblock.inode_blocks == 0
            || superblock.data_blocks == 0
            || superblock.total_blocks() > self.store.num_blocks()
            || (superblock.inode_bitmap_blocks as usize) * bits_per_block < superblock.inode_blocks as usize
            || (superblock.data_bitmap_blocks as usize) * bits_per_block < superblock.data_blocks as usize
        {
            return Err(FsError::InvalidSize { len, block_size });
        }

        self.store.set_block(SUPERBLOCK_ID, &superblock.serialize())?;
        self.inode_bitmap_mut()?.reset();
        self.data_bitmap_mut()?.reset();

        let data_block = self.data_bitmap_mut()?.allocate()?;
        self.set_data_block(data_block, &[])?;

        let mut root = Inode::new(FileType::Directory);
        root.data_blocks.push(data_block as u8);
        let root_id = self.inode_bitmap_mut()?.allocate()?;
        // Both bitmaps were just cleared.
        assert_eq!(root_id, ROOT_INODE_ID);
        self.set_inode(root_id, &root)?;

        debug!(?superblock, block_size, "formatted volume");
        Ok(())
    }
}
