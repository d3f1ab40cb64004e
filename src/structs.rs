use alloc::vec::Vec;

use crate::config::*;
use crate::error::{FsError, Result};

/// Region sizes recorded in block 0. Every field is a block count; the inode
/// table holds one inode per block, so `inode_blocks` is also the inode count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuperBlock {
    pub inode_bitmap_blocks: u8, // Size of the inode bitmap in blocks
    pub data_bitmap_blocks: u8,  // Size of the data bitmap in blocks
    pub inode_blocks: u8,        // Number of inode slots
    pub data_blocks: u8,         // Number of data block slots
}

impl Default for SuperBlock {
    fn default() -> Self {
        Self {
            inode_bitmap_blocks: 1,
            data_bitmap_blocks: 1,
            inode_blocks: 8,
            data_blocks: 54,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Directory = 1,
    Regular = 2,
}

impl TryFrom<u8> for FileType {
    type Error = FsError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            1 => Ok(FileType::Directory),
            2 => Ok(FileType::Regular),
            _ => Err(FsError::InvalidInode { tag }),
        }
    }
}

/// On-disk layout: `[type tag, block count, block ids...]`, zero padded to the block size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inode {
    pub ftype: FileType,
    /// Data region indices, in file offset order.
    pub data_blocks: Vec<u8>,
}

impl Inode {
    pub fn new(ftype: FileType) -> Self {
        Self {
            ftype,
            data_blocks: Vec::new(),
        }
    }

    /// Most data blocks a single inode can list with the given block size.
    pub fn max_blocks(block_size: usize) -> usize {
        block_size
            .saturating_sub(INODE_HEADER_SIZE)
            .min(u8::MAX as usize)
    }

    pub fn serialize(&self, block_size: usize) -> Result<Vec<u8>> {
        let blocks = self.data_blocks.len();
        if blocks > Self::max_blocks(block_size) {
            return Err(FsError::FileTooLarge { blocks });
        }
        let mut buf = Vec::with_capacity(INODE_HEADER_SIZE + blocks);
        buf.push(self.ftype as u8);
        buf.push(blocks as u8);
        buf.extend_from_slice(&self.data_blocks);
        Ok(buf)
    }

    pub fn parse(data: &[u8]) -> Result<Self> {
        let (&tag, rest) = data.split_first().ok_or(FsError::InvalidInode { tag: 0 })?;
        let ftype = FileType::try_from(tag)?;
        let (&count, ids) = rest.split_first().ok_or(FsError::InvalidInode { tag })?;
        let ids = ids
            .get(..count as usize)
            .ok_or(FsError::InvalidInode { tag })?;
        Ok(Self {
            ftype,
            data_blocks: ids.to_vec(),
        })
    }
}

/// One directory record: inode id followed by a zero padded name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry {
    pub inode_id: u8,
    pub name: [u8; MAX_FILE_NAME_LEN],
}

impl DirEntry {
    pub fn new(inode_id: u8, name: &[u8]) -> Result<Self> {
        if name.len() > MAX_FILE_NAME_LEN {
            return Err(FsError::NameTooLong { len: name.len() });
        }
        if name.is_empty() || name.contains(&0) {
            return Err(FsError::InvalidName);
        }
        Ok(Self {
            inode_id,
            name: {
                let mut arr = [0; MAX_FILE_NAME_LEN];
                arr[..name.len()].copy_from_slice(name);
                arr
            },
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_inode_layout() {
        let inode = Inode {
            ftype: FileType::Directory,
            data_blocks: vec![0, 7, 3],
        };
        assert_eq!(inode.serialize(32).unwrap(), vec![1, 3, 0, 7, 3]);
        // Block 0 is a valid entry, not a terminator.
        assert_eq!(Inode::parse(&[1, 3, 0, 7, 3, 0, 0]).unwrap(), inode);
    }

    #[test]
    fn test_inode_parse_errors() {
        assert_eq!(Inode::parse(&[0; 32]), Err(FsError::InvalidInode { tag: 0 }));
        assert_eq!(Inode::parse(&[9, 0]), Err(FsError::InvalidInode { tag: 9 }));
        assert_eq!(Inode::parse(&[2, 5, 1]), Err(FsError::InvalidInode { tag: 2 }));
        assert_eq!(Inode::parse(&[]), Err(FsError::InvalidInode { tag: 0 }));
    }

    #[test]
    fn test_inode_block_limit() {
        assert_eq!(Inode::max_blocks(32), 30);
        assert_eq!(Inode::max_blocks(1024), 255);
        let inode = Inode {
            ftype: FileType::Regular,
            data_blocks: vec![1; 7],
        };
        assert_eq!(inode.serialize(8), Err(FsError::FileTooLarge { blocks: 7 }));
        assert!(inode.serialize(9).is_ok());
    }

    #[test]
    fn test_dir_entry_name() {
        let entry = DirEntry::new(4, b"fileA").unwrap();
        assert_eq!(&entry.name, b"fileA\0\0");
        assert!(DirEntry::new(4, b"ABCDEFG").is_ok());
        assert_eq!(DirEntry::new(4, b"ABCDEFGH"), Err(FsError::NameTooLong { len: 8 }));
        assert_eq!(DirEntry::new(4, b""), Err(FsError::InvalidName));
        assert_eq!(DirEntry::new(4, b"a\0b"), Err(FsError::InvalidName));
    }
}
