//! Index cache error types.

use crate::fetch::FetchError;

/// Errors from catalog refresh and resolution.
///
/// `Transport` is retryable and must never corrupt previously published
/// snapshots. `MalformedCatalog` is contained to the affected channel.
/// Per-package problems never surface here at all; they are handled as
/// [`Resolution`](crate::resolve::Resolution) outcomes.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Network or DNS failure talking to the upstream.
    #[error("transport failure fetching {url}: {reason}")]
    Transport {
        /// The URL the fetch was issued against.
        url: String,
        /// Underlying client error description.
        reason: String,
    },

    /// The channel's index document does not match the expected envelope.
    #[error("malformed catalog on channel {channel}: {reason}")]
    MalformedCatalog {
        /// The channel whose catalog failed to decode.
        channel: String,
        /// Decode error description.
        reason: String,
    },
}

impl From<FetchError> for IndexError {
    fn from(err: FetchError) -> Self {
        Self::Transport {
            url: err.url,
            reason: err.reason,
        }
    }
}
