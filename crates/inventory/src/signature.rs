//! Signature block, signer roles and share tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque token granting unauthenticated access to one inventory.
///
/// Tokens carry UUIDv4 entropy; collisions are treated as impossible, so no
/// retry-on-collision logic exists anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareToken(String);

impl ShareToken {
    /// Mint a fresh random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative path recipients open to review and sign.
    pub fn sign_path(&self) -> String {
        format!("/sign/{}", self.0)
    }

    /// Relative path anyone holding the token can use to verify signatures.
    pub fn verify_path(&self) -> String {
        format!("/verify/{}", self.0)
    }
}

impl core::fmt::Display for ShareToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role of the person signing.
///
/// `Inspector` and `Tenant` are the roles the report workflow knows about.
/// Any other value is kept verbatim so existing documents never fail to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SignerRole {
    Inspector,
    Tenant,
    Other(String),
}

impl SignerRole {
    pub fn as_str(&self) -> &str {
        match self {
            SignerRole::Inspector => "Inspector",
            SignerRole::Tenant => "Tenant",
            SignerRole::Other(role) => role,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, SignerRole::Other(_))
    }
}

impl From<String> for SignerRole {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Inspector" => SignerRole::Inspector,
            "Tenant" => SignerRole::Tenant,
            _ => SignerRole::Other(value),
        }
    }
}

impl From<&str> for SignerRole {
    fn from(value: &str) -> Self {
        SignerRole::from(value.to_string())
    }
}

impl From<SignerRole> for String {
    fn from(value: SignerRole) -> Self {
        match value {
            SignerRole::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

impl core::fmt::Display for SignerRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One signer's attestation. Never edited or removed once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEntry {
    pub signer_name: String,
    pub signer_role: SignerRole,
    /// Encoded signature image, stored as received.
    pub signature_data: String,
    pub signed_at: DateTime<Utc>,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub email: String,
}

/// Signature block embedded in an inventory.
///
/// Entries are append-only while `is_locked` is false; once locked, neither
/// the block nor the owning inventory's content may change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub signatures: Vec<SignatureEntry>,
    #[serde(default)]
    pub tenant_present_during_inspection: Option<bool>,
    #[serde(default)]
    pub is_locked: bool,
}

impl Signature {
    pub fn entry_count(&self) -> usize {
        self.signatures.len()
    }

    pub fn has_entries(&self) -> bool {
        !self.signatures.is_empty()
    }
}
