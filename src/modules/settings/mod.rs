pub mod cli;
pub mod dir;
