//! Everything needed to search imageboards and turn their posts into a common shape.

extern crate booru_common;

pub mod auth;
pub mod error;
pub mod extractor;
pub mod extractor_config;
pub mod imageboards;
pub mod normalizer;
