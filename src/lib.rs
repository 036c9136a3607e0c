//! feedcache library
//!
//! Loads an image feed from a remote endpoint and keeps the last saved copy
//! in a local cache that expires after a fixed number of days.

pub mod api;
pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod feed;
