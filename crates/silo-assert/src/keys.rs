//! Authority signing key: generation, seed persistence, and the derived
//! identifiers embedded in every assertion.

use std::path::Path;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use sha3::{Digest, Sha3_384};

use crate::error::AssertError;

/// The store authority's Ed25519 signing key plus its identity string.
///
/// The key identifier (`key_id`) is the base64url (no padding) encoding of
/// the SHA3-384 digest of the 32 verifying-key bytes; it appears in the
/// `sign-key-sha3-384` and `public-key-sha3-384` assertion headers and is
/// how clients pin the authority key.
pub struct AuthorityKey {
    authority_id: String,
    signing: SigningKey,
}

impl AuthorityKey {
    /// Generate a fresh key from the OS CSPRNG.
    pub fn generate(authority_id: &str) -> Self {
        Self {
            authority_id: authority_id.to_string(),
            signing: SigningKey::generate(&mut rand_core::OsRng),
        }
    }

    /// Build a key from a raw 32-byte seed.
    pub fn from_seed(authority_id: &str, seed: &[u8; 32]) -> Self {
        Self {
            authority_id: authority_id.to_string(),
            signing: SigningKey::from_bytes(seed),
        }
    }

    /// Load the seed from `path` (64 hex characters), or generate a new
    /// key and persist its seed there so the authority identity survives
    /// restarts.
    pub fn load_or_generate(authority_id: &str, path: &Path) -> Result<Self, AssertError> {
        if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            let bytes = hex::decode(raw.trim()).map_err(|e| AssertError::Seed(e.to_string()))?;
            let seed: [u8; 32] = bytes
                .try_into()
                .map_err(|_| AssertError::Seed("seed must be 32 bytes".to_string()))?;
            tracing::info!(path = %path.display(), "loaded authority key");
            Ok(Self::from_seed(authority_id, &seed))
        } else {
            let key = Self::generate(authority_id);
            std::fs::write(path, hex::encode(key.signing.to_bytes()))?;
            tracing::info!(path = %path.display(), "generated new authority key");
            Ok(key)
        }
    }

    /// The authority identity stamped into assertion headers.
    pub fn authority_id(&self) -> &str {
        &self.authority_id
    }

    /// base64url (no pad) of SHA3-384 over the verifying-key bytes.
    pub fn key_id(&self) -> String {
        let digest = Sha3_384::digest(self.signing.verifying_key().as_bytes());
        URL_SAFE_NO_PAD.encode(digest)
    }

    /// base64url (no pad) of the raw verifying-key bytes; the body of an
    /// `account-key` assertion.
    pub fn public_key_encoded(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.signing.verifying_key().as_bytes())
    }

    /// Sign `content`, returning the base64url (no pad) signature.
    pub fn sign(&self, content: &[u8]) -> String {
        let sig: Signature = self.signing.sign(content);
        URL_SAFE_NO_PAD.encode(sig.to_bytes())
    }

    /// The verifying half, for decode-side checks.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing.verifying_key()
    }
}
