//! Path resolution and manipulation utilities.

use tracing::trace;

use crate::config::*;
use crate::directory::lookup_entry;
use crate::error::{FsError, Result};
use crate::metadata::Metadata;
use crate::structs::FileType;

/// Strips leading separators.
pub fn strip_root(path: &[u8]) -> &[u8] {
    let start = path
        .iter()
        .position(|&c| c != PATH_SEPARATOR)
        .unwrap_or(path.len());
    &path[start..]
}

/// Splits off the first segment of `path`.
/// The remainder is `None` when no separator follows the segment.
pub fn split_first(path: &[u8]) -> (&[u8], Option<&[u8]>) {
    match path.iter().position(|&c| c == PATH_SEPARATOR) {
        Some(i) => (&path[..i], Some(&path[i + 1..])),
        None => (path, None),
    }
}

/// Walks `path` from the root directory and returns the inode id it names.
///
/// Resolution stops at the first regular file, ignoring whatever is left of the path,
/// or at the directory where the path runs out. With `create`, each missing segment is
/// made on the way: a directory if a separator follows it, a regular file otherwise.
pub fn resolve<V>(metadata: &mut Metadata<V>, path: &[u8], create: bool) -> Result<usize>
where
    V: AsRef<[u8]> + AsMut<[u8]>,
{
    let mut current = ROOT_INODE_ID;
    let mut remaining = strip_root(path);

    loop {
        let inode = metadata.get_inode(current)?;
        if inode.ftype == FileType::Regular || remaining.is_empty() {
            return Ok(current);
        }

        let (segment, rest) = split_first(remaining);
        let content = metadata.read_inode_content(&inode)?;
        trace!(current, segment = %alloc::string::String::from_utf8_lossy(segment), "resolving");

        current = match lookup_entry(&content, segment) {
            Ok(inode_id) => inode_id,
            Err(FsError::NotFound) if create => {
                let ftype = if rest.is_some() {
                    FileType::Directory
                } else {
                    FileType::Regular
                };
                metadata.create_entry(current, segment, ftype)?
            }
            Err(e) => return Err(e),
        };
        remaining = strip_root(rest.unwrap_or_default());
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_strip_root() {
        assert_eq!(strip_root(b"/Dir1/fileA"), b"Dir1/fileA");
        assert_eq!(strip_root(b"//fileA"), b"fileA");
        assert_eq!(strip_root(b"fileA"), b"fileA");
        assert_eq!(strip_root(b"/"), b"");
    }

    #[test]
    fn test_split_first() {
        assert_eq!(split_first(b"Dir1/Dir2/fileA"), (&b"Dir1"[..], Some(&b"Dir2/fileA"[..])));
        assert_eq!(split_first(b"fileA"), (&b"fileA"[..], None));
        assert_eq!(split_first(b"Dir1/"), (&b"Dir1"[..], Some(&b""[..])));
    }
}
