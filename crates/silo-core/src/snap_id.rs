//! Compound package identifier.
//!
//! The `name.version` token is used as an external reference in the search
//! responses and as the primary-key material for `snap-declaration` and
//! `snap-revision` assertions. Splitting happens on the FIRST separator so a
//! version that itself contains dots survives the round trip.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A compound `name.version` identifier.
///
/// Constructing via [`SnapId::new`] and splitting via [`SnapId::name`] /
/// [`SnapId::version`] are inverse operations: `SnapId::new("users", "272")`
/// renders as `users.272`, and parsing `users.272` recovers the parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapId(String);

impl SnapId {
    /// Build the compound identifier from a package name and version.
    pub fn new(name: &str, version: &str) -> Self {
        Self(format!("{name}.{version}"))
    }

    /// Wrap an existing compound identifier string as-is.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The package name: everything before the first `.`, or the whole
    /// string when no separator is present.
    pub fn name(&self) -> &str {
        match self.0.split_once('.') {
            Some((name, _)) => name,
            None => &self.0,
        }
    }

    /// The version: everything after the first `.`, or `""` when no
    /// separator is present.
    pub fn version(&self) -> &str {
        match self.0.split_once('.') {
            Some((_, version)) => version,
            None => "",
        }
    }

    /// The raw compound string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<SnapId> for String {
    fn from(id: SnapId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_on_first_separator() {
        let id = SnapId::from_raw("users.272");
        assert_eq!(id.name(), "users");
        assert_eq!(id.version(), "272");
    }

    #[test]
    fn dotted_version_survives() {
        let id = SnapId::from_raw("platform.1.2.3");
        assert_eq!(id.name(), "platform");
        assert_eq!(id.version(), "1.2.3");
    }

    #[test]
    fn bare_name_has_empty_version() {
        let id = SnapId::from_raw("platform");
        assert_eq!(id.name(), "platform");
        assert_eq!(id.version(), "");
    }

    #[test]
    fn construct_then_split_round_trips() {
        let id = SnapId::new("users", "272");
        assert_eq!(id.as_str(), "users.272");
        assert_eq!(SnapId::new(id.name(), id.version()), id);
    }

    #[test]
    fn serde_is_transparent() {
        let id = SnapId::new("app", "9");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"app.9\"");
        let back: SnapId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    proptest! {
        #[test]
        fn round_trip_for_dot_free_names(name in "[a-z][a-z0-9-]{0,20}", version in "[0-9.]{1,10}") {
            let id = SnapId::new(&name, &version);
            prop_assert_eq!(id.name(), name.as_str());
            prop_assert_eq!(id.version(), version.as_str());
        }
    }
}
