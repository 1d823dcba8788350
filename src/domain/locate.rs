use ignore::{DirEntry, WalkBuilder};
use std::path::{Path, PathBuf};
use tracing::debug;

const GIT_MARKER: &str = ".git";

#[derive(Debug, Clone, Copy, Default)]
pub struct LocateOptions {
    /// Stop descending once a repository root is found.
    pub prune_nested: bool,
}

/// Lazily yields every directory under `root` (including `root`) that holds
/// a `.git` dir or gitdir file. Unreadable entries are skipped.
///
/// Without `prune_nested`, a repo living inside another repo's working tree
/// is reported as well as its parent.
pub fn find_repositories(root: &Path, opts: LocateOptions) -> impl Iterator<Item = PathBuf> {
    let prune = opts.prune_nested;
    WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            if entry.file_name() == GIT_MARKER {
                return false;
            }
            if prune && entry.depth() > 0 {
                if let Some(parent) = entry.path().parent() {
                    return !is_repo_root(parent);
                }
            }
            true
        })
        .build()
        .filter_map(|res| match res {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("skipping unreadable entry: {e}");
                None
            }
        })
        .filter(is_dir)
        .map(DirEntry::into_path)
        .filter(|p| is_repo_root(p))
}

fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().map(|t| t.is_dir()).unwrap_or(false)
}

pub fn is_repo_root(dir: &Path) -> bool {
    dir.join(GIT_MARKER).exists()
}
