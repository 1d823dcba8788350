use anyhow::Result;

pub trait Runnable {
    fn run(self) -> Result<()>;
}

pub mod report;

pub use report::{InvalidBasePath, Report};
