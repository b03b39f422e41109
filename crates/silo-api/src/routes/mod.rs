//! Route modules for the public and internal surfaces.

pub mod assertions;
pub mod internal;
pub mod snaps;
