//! Assertion text parsing and signature verification.
//!
//! The canonical layout is a header block of `key: value` lines, a blank
//! line, `body-length` bytes of body, a blank separator, and a final
//! base64url signature line. The signature covers everything up to and
//! including the separator after the body.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use crate::error::AssertError;

/// A decoded, signature-checked assertion.
#[derive(Debug, Clone)]
pub struct Assertion {
    headers: Vec<(String, String)>,
    body: String,
    text: String,
}

impl Assertion {
    /// Parse `text` and verify its signature against `verifying_key`.
    pub fn decode(text: &str, verifying_key: &VerifyingKey) -> Result<Self, AssertError> {
        // Peel the signature line off the end: content + signature + "\n".
        let trimmed = text
            .strip_suffix('\n')
            .ok_or_else(|| AssertError::Encoding("missing trailing newline".to_string()))?;
        let sig_start = trimmed
            .rfind('\n')
            .ok_or_else(|| AssertError::Encoding("missing signature line".to_string()))?;
        let signature_b64 = &trimmed[sig_start + 1..];
        let content = &trimmed[..sig_start + 1];

        let sig_bytes = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|e| AssertError::Encoding(format!("bad signature encoding: {e}")))?;
        let signature = Signature::from_slice(&sig_bytes)
            .map_err(|e| AssertError::Encoding(format!("bad signature length: {e}")))?;
        verifying_key
            .verify(content.as_bytes(), &signature)
            .map_err(|e| AssertError::Verification(e.to_string()))?;

        let (header_block, rest) = content
            .split_once("\n\n")
            .ok_or_else(|| AssertError::Encoding("missing header/body separator".to_string()))?;

        let mut headers = Vec::new();
        for line in header_block.lines() {
            let (key, value) = line
                .split_once(": ")
                .ok_or_else(|| AssertError::Encoding(format!("malformed header line {line:?}")))?;
            headers.push((key.to_string(), value.to_string()));
        }

        let body_length: usize = headers
            .iter()
            .rev()
            .find(|(k, _)| k == "body-length")
            .ok_or_else(|| AssertError::Encoding("missing body-length header".to_string()))?
            .1
            .parse()
            .map_err(|_| AssertError::Encoding("non-numeric body-length".to_string()))?;

        let body = rest
            .strip_suffix("\n\n")
            .ok_or_else(|| AssertError::Encoding("missing body separator".to_string()))?;
        if body.len() != body_length {
            return Err(AssertError::Encoding(format!(
                "body-length {} does not match body of {} bytes",
                body_length,
                body.len()
            )));
        }

        Ok(Self {
            headers,
            body: body.to_string(),
            text: text.to_string(),
        })
    }

    /// The first header with key `name`, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Headers in document order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// The complete signed text, as served to clients.
    pub fn text(&self) -> &str {
        &self.text
    }
}
