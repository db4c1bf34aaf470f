//! Signature verification bound to a single public key

use crate::{
    KeyfoldError, KeyfoldResult, MessageEncoding, PublicKeyMaterial, SignatureAlgorithm,
};
use base64::{engine::general_purpose, Engine as _};
use ed25519_dalek::Verifier as _;
use rsa::pkcs8::DecodePublicKey;
use rsa::signature::Verifier as _;
use rsa::RsaPublicKey;
use sha1::Sha1;
use sha2::Sha256;

/// Parsed verifying key for the configured algorithm
#[derive(Debug)]
enum VerifyingKeyInner {
    Sha1Rsa(rsa::pkcs1v15::VerifyingKey<Sha1>),
    Sha256Rsa(rsa::pkcs1v15::VerifyingKey<Sha256>),
    Ed25519(ed25519_dalek::VerifyingKey),
}

/// Verifier bound to one public key, one algorithm and one message encoding
///
/// Immutable once constructed. Safe to call concurrently; verification
/// mutates no state.
#[derive(Debug)]
pub struct SignatureVerifier {
    key: VerifyingKeyInner,
    algorithm: SignatureAlgorithm,
    encoding: MessageEncoding,
}

impl SignatureVerifier {
    /// Build a verifier from public key material
    ///
    /// Fails with [`KeyfoldError::InvalidPublicKey`] when the material is
    /// structurally incompatible with the algorithm.
    pub fn new(
        material: &PublicKeyMaterial,
        algorithm: SignatureAlgorithm,
        encoding: MessageEncoding,
    ) -> KeyfoldResult<Self> {
        let key = match algorithm {
            SignatureAlgorithm::Sha1WithRsa => {
                VerifyingKeyInner::Sha1Rsa(rsa::pkcs1v15::VerifyingKey::new(parse_rsa(material)?))
            }
            SignatureAlgorithm::Sha256WithRsa => {
                VerifyingKeyInner::Sha256Rsa(rsa::pkcs1v15::VerifyingKey::new(parse_rsa(material)?))
            }
            SignatureAlgorithm::Ed25519 => VerifyingKeyInner::Ed25519(parse_ed25519(material)?),
        };

        Ok(Self {
            key,
            algorithm,
            encoding,
        })
    }

    /// The signature algorithm this verifier is bound to
    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    /// The message encoding this verifier is bound to
    pub fn encoding(&self) -> MessageEncoding {
        self.encoding
    }

    /// Verify a base64-encoded signature over a message
    ///
    /// Returns the accept/reject decision of the underlying primitive
    /// unchanged. Malformed input errors instead of verifying to `false`:
    /// signature text that is not valid base64, or decoded bytes that cannot
    /// form a signature of the configured algorithm, fail with
    /// [`KeyfoldError::InvalidSignature`].
    pub fn verify(&self, message: &str, encoded_signature: &str) -> KeyfoldResult<bool> {
        let message_bytes = self.encoding.encode_message(message);
        let signature_bytes = general_purpose::STANDARD
            .decode(encoded_signature)
            .map_err(|e| KeyfoldError::InvalidSignature(e.to_string()))?;

        match &self.key {
            VerifyingKeyInner::Sha1Rsa(key) => {
                let signature = rsa::pkcs1v15::Signature::try_from(signature_bytes.as_slice())
                    .map_err(|e| KeyfoldError::InvalidSignature(e.to_string()))?;
                Ok(key.verify(&message_bytes, &signature).is_ok())
            }
            VerifyingKeyInner::Sha256Rsa(key) => {
                let signature = rsa::pkcs1v15::Signature::try_from(signature_bytes.as_slice())
                    .map_err(|e| KeyfoldError::InvalidSignature(e.to_string()))?;
                Ok(key.verify(&message_bytes, &signature).is_ok())
            }
            VerifyingKeyInner::Ed25519(key) => {
                let signature = ed25519_dalek::Signature::from_slice(&signature_bytes)
                    .map_err(|e| KeyfoldError::InvalidSignature(e.to_string()))?;
                Ok(key.verify(&message_bytes, &signature).is_ok())
            }
        }
    }
}

fn parse_rsa(material: &PublicKeyMaterial) -> KeyfoldResult<RsaPublicKey> {
    RsaPublicKey::from_public_key_der(material.as_bytes())
        .map_err(|e| KeyfoldError::InvalidPublicKey(e.to_string()))
}

fn parse_ed25519(material: &PublicKeyMaterial) -> KeyfoldResult<ed25519_dalek::VerifyingKey> {
    let bytes = material.as_bytes();

    if bytes.len() != 32 {
        return Err(KeyfoldError::InvalidPublicKey(
            "Ed25519 public key must be 32 bytes".to_string(),
        ));
    }

    let mut key_bytes = [0u8; 32];
    key_bytes.copy_from_slice(bytes);

    ed25519_dalek::VerifyingKey::from_bytes(&key_bytes)
        .map_err(|e| KeyfoldError::InvalidPublicKey(e.to_string()))
}
