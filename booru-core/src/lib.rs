//! Import pipeline: picks the imageboards to query, then downloads every post found and hands
//! it to an [`Uploader`](upload::Uploader).

pub mod dispatch;
pub mod error;
pub mod fetcher;
pub mod import;
pub mod progress;
pub mod upload;

pub use dispatch::dispatch;
pub use import::Importer;
