use derive_more::{Display, Error};

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    #[display("invalid volume size {len} for block size {block_size}")]
    InvalidSize { len: usize, block_size: usize },

    #[display("index {index} out of range")]
    BlockOutOfRange { index: usize },

    #[display("data length {len} too large for block size {block_size}")]
    DataTooLarge { len: usize, block_size: usize },

    #[display("slot {slot} already allocated")]
    AlreadyAllocated { slot: usize },

    #[display("slot {slot} already free")]
    AlreadyFree { slot: usize },

    #[display("no free slot left in bitmap")]
    BitmapExhausted,

    #[display("bitmap of {bits} bits cannot track {slots} slots")]
    BitmapTooSmall { slots: usize, bits: usize },

    #[display("file name of {len} bytes is too long")]
    NameTooLong { len: usize },

    #[display("file name is empty or contains a zero byte")]
    InvalidName,

    #[display("no such file or directory")]
    NotFound,

    #[display("not a directory")]
    NotDirectory,

    #[display("bad superblock magic")]
    InvalidMagic,

    #[display("invalid inode record (type tag {tag})")]
    InvalidInode { tag: u8 },

    #[display("file needs {blocks} blocks, more than an inode can hold")]
    FileTooLarge { blocks: usize },
}

pub type Result<T> = core::result::Result<T, FsError>;
