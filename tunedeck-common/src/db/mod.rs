//! Database access layer
//!
//! Flat store modules over a shared SQLite pool. Each operation is a
//! short-lived request/response round trip; the pool is the only shared
//! resource.

pub mod favorites;
pub mod init;
pub mod models;
pub mod music;
pub mod playlists;
pub mod users;

pub use init::init_database;
