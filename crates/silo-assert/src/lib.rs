//! Trust assertions for the package mirror.
//!
//! Clients verify downloads against signed assertion documents rather than
//! trusting the transport. This crate owns the authority Ed25519 key, the
//! canonical assertion text format, and signing plus self-verification:
//!
//! - [`AuthorityKey`]: key generation, seed persistence, derived ids.
//! - [`Issuer`]: builds and signs `account-key`, `snap-declaration`, and
//!   `snap-revision` assertions.
//! - [`Assertion`]: decoded, signature-checked assertion text.
//!
//! Every issued assertion is re-decoded and verified before it is returned,
//! so a malformed document can never be served.

pub mod decode;
pub mod error;
pub mod issue;
pub mod keys;

pub use decode::Assertion;
pub use error::AssertError;
pub use issue::{AssertionKind, Issuer};
pub use keys::AuthorityKey;
