use core::ops::Range;

pub const MAGIC: &[u8; 3] = b"SFS"; // "SFS" in ASCII

pub const DEFAULT_BLOCK_SIZE: usize = 32;
pub const MIN_BLOCK_SIZE: usize = 8; // Superblock fields and one directory entry must fit
pub const MIN_VOLUME_BLOCKS: usize = 5; // Superblock + two bitmaps + one inode + one data block
pub const SUPERBLOCK_ID: usize = 0; // Block ID for the superblock
pub const ROOT_INODE_ID: usize = 0; // Inode ID for the root directory

// Superblock byte offsets
pub const SB_MAGIC: Range<usize> = 0..3;
pub const SB_INODE_BITMAP_BLOCKS: usize = 4;
pub const SB_DATA_BITMAP_BLOCKS: usize = 5;
pub const SB_INODE_BLOCKS: usize = 6;
pub const SB_DATA_BLOCKS: usize = 7;

pub const INODE_HEADER_SIZE: usize = 2; // File type tag + block count

pub const DIR_ENTRY_SIZE: usize = 8; // Size of a directory entry (inode ID + name)
pub const MAX_FILE_NAME_LEN: usize = DIR_ENTRY_SIZE - 1; // DirEntry size minus inode ID (1 byte)

pub const PATH_SEPARATOR: u8 = b'/';
