#![forbid(unsafe_code)]

//! Channel catalog data model and stream source resolution.
//!
//! This crate is the leaf of the kanava workspace: plain data types for
//! channels and quality levels, the read-only [`ChannelDirectory`] seam the
//! player consumes, and the pure [`resolve`] function that turns a stored
//! stream reference into a playable URL.

mod channel;
mod directory;
mod quality;
mod resolve;

pub use channel::{Channel, ChannelCategory, ChannelId, StreamKind};
pub use directory::{ChannelDirectory, InMemoryDirectory};
#[cfg(any(test, feature = "test-utils"))]
pub use directory::ChannelDirectoryMock;
pub use quality::{dedup_by_height, QualityLevel, AUTO_LEVEL};
pub use resolve::{resolve, ResolvedSource};
