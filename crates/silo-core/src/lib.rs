//! # silo-core — Shared Data Model for the silo Package Mirror
//!
//! Foundational types used across the workspace:
//!
//! - **Release channels** — the fixed promotion pipeline (`master`, `rc`,
//!   `stable`) that the index cache refreshes.
//! - **[`SnapId`]** — the compound `name.version` identifier used as an
//!   external reference token in the assertion and search surfaces.
//! - **Catalog records** — the raw [`CatalogStub`] as published by the
//!   upstream index, and the fully resolved [`ResolvedPackage`] served to
//!   package-manager clients.
//! - **Search shapes** — the wire types returned by the find/info endpoints.
//!
//! This crate performs no I/O; everything here is plain data plus the
//! conversions between the raw and resolved representations.

pub mod channel;
pub mod package;
pub mod search;
pub mod snap_id;

pub use channel::{is_known_channel, CHANNELS, DEFAULT_CHANNEL};
pub use package::{CatalogStub, PackageType, ResolvedPackage, Snapshot};
pub use search::{SearchResult, SearchResults, SearchRevision};
pub use snap_id::SnapId;
