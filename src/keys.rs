//! Public key material handling

use crate::{KeyfoldError, KeyfoldResult};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

/// Opaque public key material supplied by the id mapping
///
/// The expected byte format depends on the algorithm family the registry is
/// configured with: SubjectPublicKeyInfo DER for the RSA algorithms, the raw
/// 32 byte key for Ed25519. The bytes are not interpreted until a verifier
/// is built from them; structurally incompatible material surfaces as
/// [`KeyfoldError::InvalidPublicKey`] at that point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyMaterial {
    material: Vec<u8>,
}

impl PublicKeyMaterial {
    /// Create key material from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            material: bytes.to_vec(),
        }
    }

    /// Create key material from a base64-encoded string
    pub fn from_base64(base64_key: &str) -> KeyfoldResult<Self> {
        let material = general_purpose::STANDARD
            .decode(base64_key)
            .map_err(|e| KeyfoldError::InvalidPublicKey(e.to_string()))?;

        Ok(Self { material })
    }

    /// Get the key material bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.material
    }

    /// Get the key material as a base64-encoded string
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.material)
    }
}
