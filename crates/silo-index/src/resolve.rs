//! Package resolver: one catalog stub → one resolved package, or a
//! well-defined skip.
//!
//! Resolution is a fixed sequence of small fetches against deterministic
//! URLs built from channel, package name, and the architecture tag:
//! version, then binary size, then content digest. The download URL is
//! computed, never fetched. Only a transport failure is an error; every
//! data-level problem is a per-package [`Resolution`] outcome the caller
//! logs and contains.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use silo_core::{CatalogStub, ResolvedPackage};

use crate::error::IndexError;
use crate::fetch::TextFetcher;

/// Outcome of resolving one stub on one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// All metadata fetched; the package belongs in the snapshot.
    Resolved(ResolvedPackage),
    /// The package is not published on this channel (version fetch 404).
    /// A normal outcome, e.g. not yet promoted from `master`.
    NotPublished,
    /// The package is published but its metadata is unusable; excluded
    /// from the snapshot.
    Malformed(String),
}

/// Builds upstream URLs and resolves stubs against them.
#[derive(Debug, Clone)]
pub struct PackageResolver {
    base_url: String,
    arch: String,
}

impl PackageResolver {
    /// Create a resolver for the given upstream base URL and architecture
    /// tag (e.g. `amd64`).
    pub fn new(base_url: &str, arch: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            arch: arch.to_string(),
        }
    }

    /// URL of a channel's index document.
    pub fn catalog_url(&self, channel: &str) -> String {
        format!("{}/releases/{channel}/index-v2", self.base_url)
    }

    fn version_url(&self, channel: &str, name: &str) -> String {
        format!("{}/releases/{channel}/{name}.{}.version", self.base_url, self.arch)
    }

    fn size_url(&self, name: &str, version: &str) -> String {
        format!("{}/apps/{name}_{version}_{}.snap.size", self.base_url, self.arch)
    }

    fn digest_url(&self, name: &str, version: &str) -> String {
        format!("{}/apps/{name}_{version}_{}.snap.sha384", self.base_url, self.arch)
    }

    fn download_url(&self, name: &str, version: &str) -> String {
        format!("{}/apps/{name}_{version}_{}.snap", self.base_url, self.arch)
    }

    /// Resolve one stub on one channel.
    ///
    /// Returns `Err` only for transport failures; all expected upstream
    /// conditions map to a [`Resolution`] variant.
    pub async fn resolve(
        &self,
        fetcher: &dyn TextFetcher,
        channel: &str,
        stub: &CatalogStub,
    ) -> Result<Resolution, IndexError> {
        // Step 1: current version. 404 is the canonical "not on this
        // channel" signal.
        let version_resp = fetcher.get(&self.version_url(channel, &stub.name)).await?;
        if version_resp.is_not_found() {
            return Ok(Resolution::NotPublished);
        }
        if !version_resp.is_success() {
            return Ok(Resolution::Malformed(format!(
                "version fetch returned status {}",
                version_resp.status
            )));
        }
        let version = version_resp.body.trim().to_string();
        if version.is_empty() {
            return Ok(Resolution::Malformed("empty version".to_string()));
        }

        // Step 2: binary size.
        let size_resp = fetcher.get(&self.size_url(&stub.name, &version)).await?;
        if !size_resp.is_success() {
            return Ok(Resolution::Malformed(format!(
                "size fetch returned status {}",
                size_resp.status
            )));
        }
        let size: u64 = match size_resp.body.trim().parse() {
            Ok(size) => size,
            Err(_) => {
                return Ok(Resolution::Malformed(format!(
                    "invalid size {:?}",
                    size_resp.body
                )))
            }
        };

        // Step 3: content digest, base64url upstream, lowercase hex for
        // the external representation.
        let digest_resp = fetcher.get(&self.digest_url(&stub.name, &version)).await?;
        if !digest_resp.is_success() {
            return Ok(Resolution::Malformed(format!(
                "digest fetch returned status {}",
                digest_resp.status
            )));
        }
        let digest = match URL_SAFE_NO_PAD.decode(digest_resp.body.trim()) {
            Ok(raw) => hex::encode(raw),
            Err(e) => return Ok(Resolution::Malformed(format!("invalid digest: {e}"))),
        };

        // Step 4: the download URL is computed, no round trip.
        let download_url = self.download_url(&stub.name, &version);

        Ok(Resolution::Resolved(ResolvedPackage::from_stub(
            stub,
            channel,
            version,
            size,
            digest,
            download_url,
        )))
    }
}
