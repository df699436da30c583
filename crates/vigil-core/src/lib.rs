//! Foundational low-level utilities shared across Vigil crates.
//!
//! Provides the atomic file-write helper used by ticket-record persistence
//! and the timestamp helper its temp-file naming relies on.

pub mod atomic_io;
pub mod time_utils;

pub use atomic_io::write_text_atomic;
pub use time_utils::current_unix_timestamp;
