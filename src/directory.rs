//! Directory contents: a run of 8-byte `DirEntry` records, sorted by name.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use tracing::debug;

use crate::config::*;
use crate::error::{FsError, Result};
use crate::metadata::Metadata;
use crate::structs::*;

/// Decoded directory listing, name -> inode id.
pub type Directory = BTreeMap<Vec<u8>, u8>;

pub fn trim_zero(name: &[u8]) -> &[u8] {
    let mut end = name.len();
    while end > 0 && name[end - 1] == 0 {
        end -= 1;
    }
    &name[..end]
}

impl DirEntry {
    pub fn is_empty(&self) -> bool {
        self.name().is_empty()
    }

    /// Stored name without its padding.
    pub fn name(&self) -> &[u8] {
        trim_zero(&self.name)
    }

    /// Exact comparison against the unpadded name; a prefix does not match.
    pub fn name_eq(&self, name: &[u8]) -> bool {
        self.name() == name
    }

    pub fn to_bytes(&self) -> [u8; DIR_ENTRY_SIZE] {
        let mut buf = [0; DIR_ENTRY_SIZE];
        buf[0] = self.inode_id;
        buf[1..].copy_from_slice(&self.name);
        buf
    }

    pub fn from_bytes(buf: &[u8; DIR_ENTRY_SIZE]) -> Self {
        let mut name = [0; MAX_FILE_NAME_LEN];
        name.copy_from_slice(&buf[1..]);
        Self {
            inode_id: buf[0],
            name,
        }
    }
}

/// Iterates over the non-empty entries of raw directory content.
/// Zero padding at the end of a block decodes to empty entries, which are skipped.
fn entries(data: &[u8]) -> impl Iterator<Item = DirEntry> + '_ {
    data.chunks_exact(DIR_ENTRY_SIZE)
        .filter_map(|chunk| <&[u8; DIR_ENTRY_SIZE]>::try_from(chunk).ok())
        .map(DirEntry::from_bytes)
        .filter(|entry| !entry.is_empty())
}

pub fn encode_directory(dir: &Directory) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(dir.len() * DIR_ENTRY_SIZE);
    for (name, &inode_id) in dir {
        buf.extend_from_slice(&DirEntry::new(inode_id, name)?.to_bytes());
    }
    Ok(buf)
}

pub fn decode_directory(data: &[u8]) -> Directory {
    entries(data)
        .map(|entry| (entry.name().to_vec(), entry.inode_id))
        .collect()
}

/// Query inode id of a file by name in raw directory content.
pub fn lookup_entry(data: &[u8], name: &[u8]) -> Result<usize> {
    entries(data)
        .find(|entry| entry.name_eq(name))
        .map(|entry| entry.inode_id as usize)
        .ok_or(FsError::NotFound)
}

impl<V> Metadata<V>
where
    V: AsRef<[u8]> + AsMut<[u8]>,
{
    pub fn read_dir(&self, inode_id: usize) -> Result<Directory> {
        let inode = self.get_inode(inode_id)?;
        if inode.ftype != FileType::Directory {
            return Err(FsError::NotDirectory);
        }
        Ok(decode_directory(&self.read_inode_content(&inode)?))
    }

    /// Allocates a fresh inode of type `ftype` and links it into `parent_id` as `name`,
    /// replacing any entry of the same name. Returns the new inode id.
    pub fn create_entry(&mut self, parent_id: usize, name: &[u8], ftype: FileType) -> Result<usize> {
        // Rejects bad names before anything is allocated.
        DirEntry::new(0, name)?;
        let mut parent = self.get_inode(parent_id)?;
        if parent.ftype != FileType::Directory {
            return Err(FsError::NotDirectory);
        }

        let inode_id = self.inode_bitmap_mut()?.allocate()?;
        let id = u8::try_from(inode_id).map_err(|_| FsError::BlockOutOfRange { index: inode_id })?;
        self.set_inode(inode_id, &Inode::new(ftype))?;

        let mut dir = decode_directory(&self.read_inode_content(&parent)?);
        dir.insert(name.to_vec(), id);
        let content = encode_directory(&dir)?;
        self.write_inode_content(&mut parent, &content)?;
        self.set_inode(parent_id, &parent)?;

        debug!(
            parent_id,
            inode_id,
            name = %String::from_utf8_lossy(name),
            ?ftype,
            "created directory entry"
        );
        Ok(inode_id)
    }
}
