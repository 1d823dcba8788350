use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use rayon::prelude::*;
use serde_json::json;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::grid::ActivityGrid;
use crate::domain::locate::{find_repositories, LocateOptions};
use crate::domain::reflog::read_reflog;
use crate::domain::window::DateWindow;
use crate::presentation::table;

pub const NO_COMMITS: &str = "No commits found for the specified weeks.";

/// Weekly commit grid across every repository under a folder.
///
/// Counts what the HEAD reflog of each repo has seen, so work that was later
/// rebased or reset away still shows up.
#[derive(Debug, Args)]
pub struct Report {
    /// Folder containing the Git repositories (searched recursively)
    pub path: PathBuf,

    /// Number of weeks to include, ending with the current one
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    pub weeks: u32,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Don't look for repos inside another repo's working tree
    #[arg(long)]
    pub prune_nested: bool,

    /// Print the grid as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Number of threads scanning repos (0 = rayon default)
    #[arg(short, long, default_value = "0")]
    pub jobs: usize,
}

/// The base path given on the command line is not a directory.
#[derive(Debug, Error)]
#[error("The specified path does not exist or is not a valid directory.")]
pub struct InvalidBasePath(pub PathBuf);

impl super::Runnable for Report {
    fn run(self) -> Result<()> {
        if !self.path.is_dir() {
            return Err(InvalidBasePath(self.path).into());
        }

        let today = self.as_of.unwrap_or_else(|| Local::now().date_naive());
        let window = DateWindow::trailing_weeks(today, self.weeks);
        info!("Search period: {} - {}", window.start, window.end);

        let opts = LocateOptions {
            prune_nested: self.prune_nested,
        };
        let repos: Vec<PathBuf> = find_repositories(&self.path, opts).collect();
        info!("found {} repositories under {}", repos.len(), self.path.display());

        let grid = if self.jobs > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.jobs)
                .build()?;
            pool.install(|| scan_all(&repos, &window))
        } else {
            scan_all(&repos, &window)
        };
        info!("{} commits in range", grid.total());

        if self.json {
            let payload = json!({ "window": window, "weeks": grid });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        } else if grid.is_empty() {
            println!("{NO_COMMITS}");
        } else {
            print!("{}", table::render_report(&grid));
        }
        Ok(())
    }
}

/// One grid per repo, then summed; the fold is order-independent.
pub fn scan_all(repos: &[PathBuf], window: &DateWindow) -> ActivityGrid {
    repos
        .par_iter()
        .map(|path| scan_repo(path, window))
        .reduce(ActivityGrid::new, |mut acc, g| {
            acc.merge(g);
            acc
        })
}

/// A repo that can't be opened or read counts as empty.
fn scan_repo(path: &Path, window: &DateWindow) -> ActivityGrid {
    debug!("scanning {}", path.display());
    match read_reflog(path) {
        Ok(records) => ActivityGrid::collect(records, window),
        Err(e) => {
            warn!("skipping {}: {e:#}", path.display());
            ActivityGrid::new()
        }
    }
}
