use clap::Parser;

use crate::commands::Report;

/// 📅 Weekly commit grid across all your Git repos
#[derive(Parser)]
#[command(
    name = "reflog-report",
    version,
    about = "✨ What did I commit to, and when? Read from the reflogs of every repo under a folder",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub report: Report,

    /// 🔎 Per-repo and per-commit debug trace on stderr (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}
