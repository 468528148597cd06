pub mod cli;
pub mod config;
pub mod logger;
pub mod progress_bars;
pub mod upload;
