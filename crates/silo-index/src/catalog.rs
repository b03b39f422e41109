//! Catalog parser: channel index document → catalog stubs.
//!
//! The index is a small, atomic document; a record that fails to decode
//! fails the whole channel rather than producing a silently incomplete
//! catalog. Disabled stubs are dropped here, before any per-package network
//! calls are made.

use serde::Deserialize;
use silo_core::CatalogStub;

use crate::error::IndexError;

/// Expected top-level envelope of a channel's `index-v2` document.
#[derive(Debug, Deserialize)]
struct CatalogEnvelope {
    apps: Vec<CatalogStub>,
}

/// Decode a channel's raw index document into its enabled stubs, in
/// document order.
pub fn parse_catalog(channel: &str, body: &str) -> Result<Vec<CatalogStub>, IndexError> {
    let envelope: CatalogEnvelope =
        serde_json::from_str(body).map_err(|e| IndexError::MalformedCatalog {
            channel: channel.to_string(),
            reason: e.to_string(),
        })?;

    Ok(envelope
        .apps
        .into_iter()
        .filter(|stub| stub.enabled)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_enabled_stubs_in_order() {
        let body = r#"{
            "apps": [
                {"id": "platform", "name": "Platform", "required": true},
                {"id": "files", "name": "Files", "icon": "files.png"}
            ]
        }"#;
        let stubs = parse_catalog("master", body).unwrap();
        assert_eq!(stubs.len(), 2);
        assert_eq!(stubs[0].name, "platform");
        assert!(stubs[0].required);
        assert_eq!(stubs[1].name, "files");
        assert_eq!(stubs[1].icon.as_deref(), Some("files.png"));
    }

    #[test]
    fn drops_disabled_stubs() {
        let body = r#"{
            "apps": [
                {"id": "app1", "name": "One"},
                {"id": "app2", "name": "Two", "enabled": false}
            ]
        }"#;
        let stubs = parse_catalog("stable", body).unwrap();
        assert_eq!(stubs.len(), 1);
        assert_eq!(stubs[0].name, "app1");
    }

    #[test]
    fn missing_apps_field_is_malformed() {
        let err = parse_catalog("rc", r#"{"packages": []}"#).unwrap_err();
        assert!(matches!(err, IndexError::MalformedCatalog { ref channel, .. } if channel == "rc"));
    }

    #[test]
    fn non_object_document_is_malformed() {
        assert!(parse_catalog("rc", "not json").is_err());
        assert!(parse_catalog("rc", "[1, 2]").is_err());
    }

    #[test]
    fn one_bad_record_fails_the_channel() {
        // A record missing its identifier fails the whole parse; the index
        // is atomic and a partial catalog would be worse than none.
        let body = r#"{
            "apps": [
                {"id": "good", "name": "Good"},
                {"name": "No identifier"}
            ]
        }"#;
        assert!(parse_catalog("master", body).is_err());
    }

    #[test]
    fn unknown_record_fields_are_ignored() {
        let body = r#"{"apps": [{"id": "app1", "name": "One", "ui": false, "extra": {"k": 1}}]}"#;
        let stubs = parse_catalog("master", body).unwrap();
        assert_eq!(stubs.len(), 1);
    }
}
