use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use std::path::Path;
use tracing::debug;

use crate::domain::git::RepoExt;

/// One resolved reflog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub project: String,
    pub id: String,
    pub timestamp: DateTime<Local>,
    pub summary: String,
}

impl CommitRecord {
    pub fn short_id(&self) -> &str {
        self.id.get(..7).unwrap_or(&self.id)
    }
}

/// Every commit the HEAD reflog of the repo at `path` currently points at.
///
/// This is deliberately not a revwalk: commits that were rebased or reset
/// away still show up as long as their reflog entry exists. Entries whose
/// object is gone are skipped.
pub fn read_reflog(path: &Path) -> Result<Vec<CommitRecord>> {
    let repo = RepoExt::open(path)?;
    let project = repo.project_name();
    let reflog = repo
        .repo()
        .reflog("HEAD")
        .with_context(|| format!("cannot read reflog of {}", path.display()))?;

    let mut out = Vec::with_capacity(reflog.len());
    for entry in reflog.iter() {
        let oid = entry.id_new();
        let commit = match repo.repo().find_commit(oid) {
            Ok(c) => c,
            Err(e) => {
                debug!(%project, %oid, "skipping reflog entry: {}", e.message());
                continue;
            }
        };
        let Some(timestamp) = Local.timestamp_opt(commit.time().seconds(), 0).single() else {
            debug!(%project, %oid, "skipping commit with out-of-range timestamp");
            continue;
        };
        let summary = String::from_utf8_lossy(commit.message_bytes())
            .lines()
            .next()
            .unwrap_or("")
            .to_string();

        out.push(CommitRecord {
            project: project.clone(),
            id: oid.to_string(),
            timestamp,
            summary,
        });
    }
    Ok(out)
}
