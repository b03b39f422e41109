//! Catalog records: raw stubs and fully resolved packages.
//!
//! A [`CatalogStub`] is one entry of a channel's `index-v2` document, before
//! any per-package metadata has been fetched. The package resolver turns a
//! stub into a [`ResolvedPackage`], the unit served to clients. A channel's
//! resolved view at one point in time is a [`Snapshot`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::snap_id::SnapId;

/// Classification of a package, derived from the catalog `required` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    /// A regular installable application.
    App,
    /// A base/platform package required by the system itself.
    Base,
}

/// One raw entry from a channel's index document.
///
/// Upstream field names differ from ours: the stable identifier arrives as
/// `id` and the human-readable name as `name`. Unknown extra fields are
/// ignored rather than treated as a dynamic bag.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogStub {
    /// Stable identifier, the primary key within a channel.
    #[serde(rename = "id")]
    pub name: String,

    /// Human-readable display name.
    #[serde(rename = "name", default)]
    pub display_name: String,

    /// Optional icon URL.
    #[serde(default)]
    pub icon: Option<String>,

    /// Whether the package is published at all. Absent means enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether this is a base/platform package.
    #[serde(default)]
    pub required: bool,
}

fn default_true() -> bool {
    true
}

impl CatalogStub {
    /// The package classification implied by the `required` flag.
    pub fn package_type(&self) -> PackageType {
        if self.required {
            PackageType::Base
        } else {
            PackageType::App
        }
    }
}

/// A fully resolved package: the externally visible unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPackage {
    /// Stable identifier within the channel.
    pub name: String,
    /// The channel this resolution belongs to.
    pub channel: String,
    /// Current version string. Typically numeric-looking, not guaranteed.
    pub version: String,
    /// Revision derived from the version; 0 when the version is non-numeric.
    pub revision: i32,
    /// Binary size in bytes.
    pub size: u64,
    /// Lowercase hex content digest (decoded from the upstream base64url form).
    #[serde(rename = "download-sha3-384")]
    pub content_digest: String,
    /// Computed download URL. Never fetched during resolution.
    #[serde(rename = "download-url")]
    pub download_url: String,
    /// `app` or `base`.
    #[serde(rename = "type")]
    pub package_type: PackageType,
    /// Compound `name.version` reference token.
    #[serde(rename = "snap-id")]
    pub snap_id: SnapId,
    /// Human-readable display name from the catalog.
    #[serde(rename = "title", default)]
    pub display_name: String,
    /// Optional icon URL from the catalog.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub icon: Option<String>,
}

impl ResolvedPackage {
    /// Assemble a resolved package from a stub plus the fetched facts.
    ///
    /// The revision is parsed from the version string; non-numeric versions
    /// map to revision 0.
    pub fn from_stub(
        stub: &CatalogStub,
        channel: &str,
        version: String,
        size: u64,
        content_digest: String,
        download_url: String,
    ) -> Self {
        let revision = version.parse().unwrap_or(0);
        let snap_id = SnapId::new(&stub.name, &version);
        Self {
            name: stub.name.clone(),
            channel: channel.to_string(),
            version,
            revision,
            size,
            content_digest,
            download_url,
            package_type: stub.package_type(),
            snap_id,
            display_name: stub.display_name.clone(),
            icon: stub.icon.clone(),
        }
    }
}

/// An immutable, fully-resolved view of one channel at one point in time.
///
/// Once published by the index cache a snapshot is never mutated; a refresh
/// builds a brand-new snapshot that atomically replaces the old one.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Resolved packages keyed by name.
    pub packages: HashMap<String, ResolvedPackage>,
    /// When the refresh pass that produced this snapshot completed.
    pub refreshed_at: DateTime<Utc>,
}

impl Snapshot {
    /// Build a snapshot from resolved packages, stamped now.
    pub fn new(packages: HashMap<String, ResolvedPackage>) -> Self {
        Self {
            packages,
            refreshed_at: Utc::now(),
        }
    }

    /// Look up one package by name.
    pub fn get(&self, name: &str) -> Option<&ResolvedPackage> {
        self.packages.get(name)
    }

    /// Number of packages in this snapshot.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the snapshot holds no packages.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub(json: &str) -> CatalogStub {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn stub_defaults_enabled_true() {
        let s = stub(r#"{"id": "files", "name": "Files"}"#);
        assert!(s.enabled);
        assert!(!s.required);
        assert_eq!(s.name, "files");
        assert_eq!(s.display_name, "Files");
    }

    #[test]
    fn stub_explicit_disabled() {
        let s = stub(r#"{"id": "files", "name": "Files", "enabled": false}"#);
        assert!(!s.enabled);
    }

    #[test]
    fn stub_ignores_unknown_fields() {
        let s = stub(r#"{"id": "files", "name": "Files", "ui": true, "author": "x"}"#);
        assert_eq!(s.name, "files");
    }

    #[test]
    fn required_maps_to_base() {
        let s = stub(r#"{"id": "platform", "name": "Platform", "required": true}"#);
        assert_eq!(s.package_type(), PackageType::Base);
        let s = stub(r#"{"id": "files", "name": "Files"}"#);
        assert_eq!(s.package_type(), PackageType::App);
    }

    #[test]
    fn from_stub_derives_revision_and_snap_id() {
        let s = stub(r#"{"id": "users", "name": "Users"}"#);
        let pkg = ResolvedPackage::from_stub(
            &s,
            "stable",
            "272".to_string(),
            4096,
            "ab12".to_string(),
            "http://base/apps/users_272_amd64.snap".to_string(),
        );
        assert_eq!(pkg.revision, 272);
        assert_eq!(pkg.snap_id.as_str(), "users.272");
        assert_eq!(pkg.channel, "stable");
        assert_eq!(pkg.package_type, PackageType::App);
    }

    #[test]
    fn non_numeric_version_maps_to_revision_zero() {
        let s = stub(r#"{"id": "users", "name": "Users"}"#);
        let pkg = ResolvedPackage::from_stub(
            &s,
            "master",
            "1.2-beta".to_string(),
            1,
            String::new(),
            String::new(),
        );
        assert_eq!(pkg.revision, 0);
        assert_eq!(pkg.version, "1.2-beta");
    }

    #[test]
    fn package_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PackageType::App).unwrap(), "\"app\"");
        assert_eq!(
            serde_json::to_string(&PackageType::Base).unwrap(),
            "\"base\""
        );
    }

    #[test]
    fn snapshot_lookup() {
        let s = stub(r#"{"id": "app1", "name": "App One"}"#);
        let pkg = ResolvedPackage::from_stub(
            &s,
            "stable",
            "1".to_string(),
            1,
            String::new(),
            String::new(),
        );
        let snapshot = Snapshot::new(HashMap::from([(pkg.name.clone(), pkg)]));
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.get("app1").is_some());
        assert!(snapshot.get("app2").is_none());
    }
}
