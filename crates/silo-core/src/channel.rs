//! Release channel constants.
//!
//! Channels are opaque strings everywhere in the data model; the fixed set
//! below only governs which channels the index cache refreshes, and in which
//! order. Clients typically treat the set as a promotion pipeline
//! (`master` → `rc` → `stable`) but the cache makes no ordering guarantee
//! between channels.

/// The channels refreshed by the index cache, in refresh order.
pub const CHANNELS: [&str; 3] = ["master", "rc", "stable"];

/// The channel assumed when a client query does not name one.
pub const DEFAULT_CHANNEL: &str = "stable";

/// Whether `channel` is one of the tracked release channels.
pub fn is_known_channel(channel: &str) -> bool {
    CHANNELS.contains(&channel)
}

/// Normalize a client-supplied channel string.
///
/// An empty string maps to [`DEFAULT_CHANNEL`]; a track-qualified channel
/// such as `latest/stable` keeps only the leading component.
pub fn normalize(channel: &str) -> &str {
    if channel.is_empty() {
        return DEFAULT_CHANNEL;
    }
    match channel.split_once('/') {
        Some((track, _)) => track,
        None => channel,
    }
}
