use anyhow::{Context, Result};
use git2::Repository;
use std::path::{Path, PathBuf};

/// An opened repository plus the project name it is reported under.
pub struct RepoExt {
    repo: Repository,
    root: PathBuf,
}

impl RepoExt {
    /// Opens exactly `path`; no upward discovery, the locator already found the root.
    pub fn open(path: &Path) -> Result<Self> {
        Repository::open(path)
            .with_context(|| format!("cannot open repo at {}", path.display()))
            .map(|repo| Self { repo, root: path.to_path_buf() })
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Directory name of the working tree, e.g. `~/src/gitrivia` -> `gitrivia`.
    pub fn project_name(&self) -> String {
        project_name(&self.root)
    }
}

pub fn project_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}
