//! Wire shapes for the find/info endpoints.
//!
//! The response envelope mirrors what package-manager clients expect:
//! a `results` array where each element carries the resolved package under
//! `snap`, the channel under `revision`, and the identifiers alongside, plus
//! an `error-list` that is empty on success.

use serde::{Deserialize, Serialize};

use crate::package::ResolvedPackage;
use crate::snap_id::SnapId;

/// Channel qualifier attached to each search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRevision {
    /// The channel the result was resolved on.
    pub channel: String,
}

/// One entry of a search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Channel qualifier.
    pub revision: SearchRevision,
    /// The resolved package.
    pub snap: ResolvedPackage,
    /// Package name, duplicated at the top level for client convenience.
    pub name: String,
    /// Compound identifier, duplicated at the top level.
    #[serde(rename = "snap-id")]
    pub snap_id: SnapId,
}

impl SearchResult {
    /// Wrap a resolved package as a search result.
    pub fn from_package(pkg: ResolvedPackage) -> Self {
        Self {
            revision: SearchRevision {
                channel: pkg.channel.clone(),
            },
            name: pkg.name.clone(),
            snap_id: pkg.snap_id.clone(),
            snap: pkg,
        }
    }
}

/// Search response envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Matching packages. Empty when nothing matched or the channel is
    /// unknown; the distinction is only visible in the server logs.
    pub results: Vec<SearchResult>,
    /// Client-facing errors. Always empty from the cache read path.
    #[serde(rename = "error-list", default)]
    pub error_list: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{CatalogStub, ResolvedPackage};

    fn package(name: &str, channel: &str) -> ResolvedPackage {
        let stub: CatalogStub =
            serde_json::from_str(&format!(r#"{{"id": "{name}", "name": "X"}}"#)).unwrap();
        ResolvedPackage::from_stub(
            &stub,
            channel,
            "7".to_string(),
            10,
            "aa".to_string(),
            format!("http://base/apps/{name}_7_amd64.snap"),
        )
    }

    #[test]
    fn result_carries_channel_and_ids() {
        let result = SearchResult::from_package(package("app1", "rc"));
        assert_eq!(result.revision.channel, "rc");
        assert_eq!(result.name, "app1");
        assert_eq!(result.snap_id.as_str(), "app1.7");
    }

    #[test]
    fn envelope_field_names() {
        let results = SearchResults {
            results: vec![SearchResult::from_package(package("app1", "stable"))],
            error_list: vec![],
        };
        let value = serde_json::to_value(&results).unwrap();
        assert!(value.get("error-list").is_some());
        let first = &value["results"][0];
        assert_eq!(first["revision"]["channel"], "stable");
        assert_eq!(first["snap-id"], "app1.7");
        assert_eq!(first["snap"]["type"], "app");
        assert_eq!(first["snap"]["snap-id"], "app1.7");
    }

    #[test]
    fn default_envelope_is_empty() {
        let results = SearchResults::default();
        assert!(results.results.is_empty());
        assert!(results.error_list.is_empty());
    }
}
