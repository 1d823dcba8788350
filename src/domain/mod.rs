pub mod git;
pub mod grid;
pub mod locate;
pub mod reflog;
pub mod window;
