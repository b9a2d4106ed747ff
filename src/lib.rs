//! Bookshelf: an author and book catalogue served over HTTP, with a
//! read-through cache of pre-encoded JSON for the hot lookups.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
