//! # silo-index — Channel-Indexed Metadata Cache
//!
//! The core of the mirror: downloads each release channel's catalog from the
//! upstream authority, resolves per-package binary facts (version, size,
//! content digest, download URL), and serves the result from immutable
//! per-channel snapshots that a background task refreshes on a fixed
//! interval.
//!
//! ## Failure containment
//!
//! - A package missing from a channel (404 on its version) is a normal
//!   outcome and is silently excluded from that channel's snapshot.
//! - A package with malformed metadata is excluded and logged; it never
//!   fails the channel.
//! - A channel whose catalog is absent or malformed keeps its previously
//!   published snapshot; other channels still refresh in the same pass.
//! - Only a genuine transport failure aborts a refresh pass and reaches the
//!   caller.
//!
//! Readers ([`IndexCache::read`], [`IndexCache::find`]) never block on
//! network I/O: the snapshot map lock is held only to move an `Arc` in or
//! out.

pub mod cache;
pub mod catalog;
pub mod error;
pub mod fetch;
pub mod resolve;
mod retry;

pub use cache::IndexCache;
pub use catalog::parse_catalog;
pub use error::IndexError;
pub use fetch::{FetchError, FetchedText, HttpFetcher, TextFetcher};
pub use resolve::{PackageResolver, Resolution};
