//! SFS is a very simple file system living entirely inside an in-memory byte buffer.
//! No support for permissions, timestamps, links or indirect blocks.
//!
//! SFS's linear layout, in blocks of a fixed size (32 bytes by default):
//! - Superblock
//! - Inode Bitmap
//! - Data Bitmap
//! - Inode Table (one inode per block)
//! - Data Blocks
//!
//! SFS's layers (from bottom to top):
//! 1. Block Store: the volume as an array of fixed-size blocks.
//! 2. Bitmap: free-space tracking for inodes and data blocks.
//! 3. Metadata: superblock layout, inode table, file content and directories.
//! 4. FileSystem: format, open, read and write for users.
//!
//! Nothing is synchronized; wrap the whole `FileSystem` in a lock to share it.

extern crate alloc;

mod config;
mod error;
mod block_store;
mod bitmap;
mod structs;
mod superblock;
mod metadata;
mod inode;
mod directory;
mod path;
mod fs;

pub use config::*;
pub use error::FsError as Error;
pub use error::Result;
pub use block_store::BlockStore;
pub use bitmap::Bitmap;
pub use structs::*;
pub use superblock::Region;
pub use metadata::Metadata;
pub use directory::*;
pub use path::{split_first, strip_root};
pub use fs::FileSystem;
