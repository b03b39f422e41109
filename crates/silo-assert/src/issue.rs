//! Assertion issuing: canonical text assembly and signing.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{SecondsFormat, Utc};

use silo_core::SnapId;

use crate::decode::Assertion;
use crate::error::AssertError;
use crate::keys::AuthorityKey;

/// The assertion kinds this authority issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionKind {
    AccountKey,
    SnapDeclaration,
    SnapRevision,
}

impl AssertionKind {
    /// Parse the wire name used in request paths.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "account-key" => Some(Self::AccountKey),
            "snap-declaration" => Some(Self::SnapDeclaration),
            "snap-revision" => Some(Self::SnapRevision),
            _ => None,
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::AccountKey => "account-key",
            Self::SnapDeclaration => "snap-declaration",
            Self::SnapRevision => "snap-revision",
        }
    }

    /// Minimum primary-key arity for this kind.
    fn min_arity(&self) -> usize {
        match self {
            Self::AccountKey => 1,
            Self::SnapDeclaration => 2,
            Self::SnapRevision => 1,
        }
    }
}

/// Issues signed assertions on behalf of one authority key.
pub struct Issuer {
    key: AuthorityKey,
}

impl Issuer {
    pub fn new(key: AuthorityKey) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &AuthorityKey {
        &self.key
    }

    /// Issue a signed assertion of `kind` for `primary_key`.
    ///
    /// The output is re-decoded and signature-checked before being
    /// returned, so a malformed result can never leave this function.
    pub fn issue(
        &self,
        kind: AssertionKind,
        primary_key: &[String],
    ) -> Result<Assertion, AssertError> {
        if primary_key.len() < kind.min_arity() {
            return Err(AssertError::PrimaryKey(format!(
                "{} requires at least {} component(s), got {}",
                kind.wire_name(),
                kind.min_arity(),
                primary_key.len()
            )));
        }
        tracing::debug!(
            kind = kind.wire_name(),
            key = primary_key.join("/"),
            "issuing assertion"
        );

        let mut body = String::new();
        let mut kind_headers = String::new();
        match kind {
            AssertionKind::AccountKey => {
                body = self.key.public_key_encoded();
            }
            AssertionKind::SnapDeclaration => {
                let snap_id = SnapId::from_raw(&primary_key[1]);
                kind_headers = format!(
                    "series: {}\nsnap-id: {}\nsnap-name: {}\n",
                    primary_key[0],
                    snap_id.as_str(),
                    snap_id.name()
                );
            }
            AssertionKind::SnapRevision => {
                // The primary key is the base64url-encoded compound id;
                // its verbatim form doubles as the digest header.
                let raw = URL_SAFE_NO_PAD
                    .decode(&primary_key[0])
                    .map_err(|e| AssertError::PrimaryKey(format!("bad digest encoding: {e}")))?;
                let snap_id = SnapId::from_raw(
                    &String::from_utf8(raw)
                        .map_err(|e| AssertError::PrimaryKey(format!("digest not utf-8: {e}")))?,
                );
                kind_headers = format!(
                    "snap-revision: {}\nsnap-id: {}\nsnap-size: 1\nsnap-sha3-384: {}\n",
                    snap_id.version(),
                    snap_id.as_str(),
                    primary_key[0]
                );
            }
        }

        let authority = self.key.authority_id();
        let key_id = self.key.key_id();
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        let content = format!(
            "type: {}\n\
             authority-id: {authority}\n\
             primary-key: {}\n\
             publisher-id: {authority}\n\
             developer-id: {authority}\n\
             account-id: {authority}\n\
             revision: 1\n\
             sign-key-sha3-384: {key_id}\n\
             sha3-384: {key_id}\n\
             public-key-sha3-384: {key_id}\n\
             timestamp: {now}\n\
             since: {now}\n\
             {kind_headers}\
             validation: certified\n\
             body-length: {}\n\n\
             {body}\n\n",
            kind.wire_name(),
            primary_key.join("/"),
            body.len(),
        );

        let signature = self.key.sign(content.as_bytes());
        let text = format!("{content}{signature}\n");

        // Self-check: serve nothing we cannot decode and verify ourselves.
        Assertion::decode(&text, &self.key.verifying_key())
            .map_err(|e| AssertError::Encoding(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> Issuer {
        Issuer::new(AuthorityKey::generate("silo"))
    }

    fn keys(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn account_key_carries_public_key_body() {
        let issuer = issuer();
        let asrt = issuer
            .issue(AssertionKind::AccountKey, &keys(&["silo-root"]))
            .unwrap();

        assert_eq!(asrt.header("type"), Some("account-key"));
        assert_eq!(asrt.header("primary-key"), Some("silo-root"));
        assert_eq!(asrt.header("validation"), Some("certified"));
        assert_eq!(asrt.body(), issuer.key().public_key_encoded());
    }

    #[test]
    fn header_order_is_canonical() {
        let issuer = issuer();
        let asrt = issuer
            .issue(AssertionKind::AccountKey, &keys(&["silo-root"]))
            .unwrap();

        let order: Vec<&str> = asrt.headers().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "type",
                "authority-id",
                "primary-key",
                "publisher-id",
                "developer-id",
                "account-id",
                "revision",
                "sign-key-sha3-384",
                "sha3-384",
                "public-key-sha3-384",
                "timestamp",
                "since",
                "validation",
                "body-length",
            ]
        );
    }

    #[test]
    fn snap_declaration_headers() {
        let issuer = issuer();
        let asrt = issuer
            .issue(AssertionKind::SnapDeclaration, &keys(&["16", "users.272"]))
            .unwrap();

        assert_eq!(asrt.header("series"), Some("16"));
        assert_eq!(asrt.header("snap-id"), Some("users.272"));
        assert_eq!(asrt.header("snap-name"), Some("users"));
        assert_eq!(asrt.header("primary-key"), Some("16/users.272"));
        assert_eq!(asrt.header("body-length"), Some("0"));
        assert_eq!(asrt.body(), "");
    }

    #[test]
    fn snap_declaration_requires_two_components() {
        let err = issuer()
            .issue(AssertionKind::SnapDeclaration, &keys(&["16"]))
            .unwrap_err();
        assert!(matches!(err, AssertError::PrimaryKey(_)));
    }

    #[test]
    fn snap_revision_headers_echo_encoded_key() {
        let encoded = URL_SAFE_NO_PAD.encode("files.12");
        let asrt = issuer()
            .issue(AssertionKind::SnapRevision, &keys(&[&encoded]))
            .unwrap();

        assert_eq!(asrt.header("snap-revision"), Some("12"));
        assert_eq!(asrt.header("snap-id"), Some("files.12"));
        assert_eq!(asrt.header("snap-size"), Some("1"));
        assert_eq!(asrt.header("snap-sha3-384"), Some(encoded.as_str()));
    }

    #[test]
    fn snap_revision_rejects_bad_encoding() {
        let err = issuer()
            .issue(AssertionKind::SnapRevision, &keys(&["!!not-base64!!"]))
            .unwrap_err();
        assert!(matches!(err, AssertError::PrimaryKey(_)));
    }

    #[test]
    fn empty_primary_key_is_rejected_for_every_kind() {
        for kind in [
            AssertionKind::AccountKey,
            AssertionKind::SnapDeclaration,
            AssertionKind::SnapRevision,
        ] {
            let err = issuer().issue(kind, &[]).unwrap_err();
            assert!(matches!(err, AssertError::PrimaryKey(_)));
        }
    }

    #[test]
    fn issued_text_ends_with_signature_line() {
        let asrt = issuer()
            .issue(AssertionKind::AccountKey, &keys(&["silo-root"]))
            .unwrap();
        let text = asrt.text();
        assert!(text.ends_with('\n'));
        // Body, blank separator, then a non-empty signature line.
        let lines: Vec<&str> = text.lines().collect();
        assert!(!lines[lines.len() - 1].is_empty());
        assert!(lines[lines.len() - 2].is_empty());
    }

    #[test]
    fn kind_wire_names_round_trip() {
        for name in ["account-key", "snap-declaration", "snap-revision"] {
            assert_eq!(AssertionKind::from_wire(name).map(|k| k.wire_name()), Some(name));
        }
        assert!(AssertionKind::from_wire("validation-set").is_none());
    }
}
