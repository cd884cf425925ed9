//! Thin filesystem collaborators: turning a real directory into a [`FolderEntry`] tree and back.
//!
//! Raw file/directory I/O is named out of scope for the core in SPEC_FULL.md §1 -- these
//! functions exist only so the CLI has something concrete to call; none of the format logic in
//! [`crate::entry`] depends on them.

use crate::entry::FolderEntry;
use common::CodecError;
use std::fs;
use std::path::Path;

/// Reads a file or directory at `path` into a [`FolderEntry`] tree.
pub fn read_tree(path: &Path) -> Result<FolderEntry, CodecError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    read_tree_named(path, name)
}

fn read_tree_named(path: &Path, name: String) -> Result<FolderEntry, CodecError> {
    let metadata = fs::metadata(path).map_err(|e| CodecError::io(path, e))?;

    if metadata.is_dir() {
        let mut children = Vec::new();
        let mut entries: Vec<_> = fs::read_dir(path)
            .map_err(|e| CodecError::io(path, e))?
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| CodecError::io(path, e))?;
        entries.sort_by_key(|e| e.file_name());
        for entry in entries {
            let child_name = entry.file_name().to_string_lossy().into_owned();
            children.push(read_tree_named(&entry.path(), child_name)?);
        }
        Ok(FolderEntry::Dir { name, children })
    } else {
        let payload = fs::read(path).map_err(|e| CodecError::io(path, e))?;
        Ok(FolderEntry::File { name, payload })
    }
}

/// Materializes a [`FolderEntry`] tree onto disk, rooted at `destination`.
///
/// For a top-level `Dir` entry, `destination` becomes that directory itself (its own `name` is
/// not appended again); for a top-level `File` entry, `destination` is the file path to write.
pub fn write_tree(entry: &FolderEntry, destination: &Path) -> Result<(), CodecError> {
    match entry {
        FolderEntry::File { payload, .. } => {
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent).map_err(|e| CodecError::io(parent, e))?;
            }
            fs::write(destination, payload).map_err(|e| CodecError::io(destination, e))
        }
        FolderEntry::Dir { children, .. } => {
            fs::create_dir_all(destination).map_err(|e| CodecError::io(destination, e))?;
            for child in children {
                write_child(child, destination)?;
            }
            Ok(())
        }
    }
}

fn write_child(entry: &FolderEntry, parent_dir: &Path) -> Result<(), CodecError> {
    let path = parent_dir.join(entry.name());
    match entry {
        FolderEntry::File { payload, .. } => {
            fs::write(&path, payload).map_err(|e| CodecError::io(&path, e))
        }
        FolderEntry::Dir { children, .. } => {
            fs::create_dir_all(&path).map_err(|e| CodecError::io(&path, e))?;
            for child in children {
                write_child(child, &path)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{deserialize, serialize};
    use std::fs;

    #[test]
    fn round_trips_a_real_directory_through_disk_and_the_wire_format() {
        let tmp = std::env::temp_dir().join(format!(
            "folder_format_disk_test_{}",
            std::process::id()
        ));
        let src = tmp.join("src");
        let dst = tmp.join("dst");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("a.txt"), b"hello").unwrap();
        fs::write(src.join("nested").join("b.bin"), [1, 2, 3]).unwrap();

        let tree = read_tree(&src).unwrap();
        let bytes = serialize(&tree);
        let round_tripped = deserialize(&bytes).unwrap();
        assert_eq!(tree, round_tripped);

        write_tree(&tree, &dst).unwrap();
        assert_eq!(fs::read(dst.join("a.txt")).unwrap(), b"hello");
        assert_eq!(fs::read(dst.join("nested").join("b.bin")).unwrap(), vec![1, 2, 3]);

        let _ = fs::remove_dir_all(&tmp);
    }
}
