use std::cmp::Ordering;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use crate::fs::{FileSystem, FsEntry};
use crate::rules::IgnoreRules;
use crate::{root_display_name, Result, TreeError};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
    Other,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirectoryNode {
    pub name: String,
    pub kind: EntryKind,
    /// Set when this directory could not be listed; `children` is then empty.
    pub error: Option<String>,
    pub children: Vec<DirectoryNode>,
}

impl DirectoryNode {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            error: None,
            children: Vec::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Builds the filtered, sorted tree below `root`.
///
/// Symlinks are kept as leaves and never followed. A subdirectory that cannot
/// be listed is kept with its `error` set; only an unreadable root fails.
pub fn walk<F: FileSystem>(fs: &F, root: &Path, rules: &IgnoreRules) -> Result<DirectoryNode> {
    let children = list_children(fs, root, Path::new(""), rules).map_err(|source| {
        TreeError::UnreadableRoot {
            path: root.to_path_buf(),
            source,
        }
    })?;

    Ok(DirectoryNode {
        children,
        ..DirectoryNode::new(root_display_name(root), EntryKind::Directory)
    })
}

fn list_children<F: FileSystem>(
    fs: &F,
    dir: &Path,
    relative: &Path,
    rules: &IgnoreRules,
) -> io::Result<Vec<DirectoryNode>> {
    let mut entries: Vec<FsEntry> = fs
        .read_dir(dir)?
        .into_iter()
        .filter(|entry| {
            let path = relative.join(&entry.name);
            let ignored = rules.is_ignored(&path, entry.kind == EntryKind::Directory);
            if ignored {
                debug!("ignoring {}", path.display());
            }
            !ignored
        })
        .collect();
    entries.sort_by(compare_entries);

    let mut children = Vec::with_capacity(entries.len());
    for entry in entries {
        let mut node = DirectoryNode::new(entry.name.as_str(), entry.kind);
        if entry.kind == EntryKind::Directory {
            match list_children(fs, &entry.path, &relative.join(&entry.name), rules) {
                Ok(grandchildren) => node.children = grandchildren,
                Err(err) => {
                    warn!("skipping contents of {}: {err}", entry.path.display());
                    node.error = Some(err.to_string());
                }
            }
        }
        children.push(node);
    }

    Ok(children)
}

/// Directories first, then everything else; byte order within each group,
/// so uppercase names sort before lowercase ones.
fn compare_entries(a: &FsEntry, b: &FsEntry) -> Ordering {
    let a_dir = a.kind == EntryKind::Directory;
    let b_dir = b.kind == EntryKind::Directory;
    b_dir.cmp(&a_dir).then_with(|| a.name.cmp(&b.name))
}
