//! Keyed signature verification
//!
//! This crate verifies base64 encoded digital signatures over text messages
//! where the verifying public key is chosen at call time by a logical key id.
//! It provides:
//! - A [`VerifierRegistry`] resolving key ids against an externally supplied
//!   id to public key mapping, with lazily built and cached verifiers
//! - A [`SignatureVerifier`] bound to a single public key, signature
//!   algorithm and message encoding
//! - RSA PKCS#1 v1.5 (SHA-1 and SHA-256 digests) and Ed25519 signature
//!   schemes
//!
//! ## Example
//!
//! ```rust
//! use base64::{engine::general_purpose, Engine as _};
//! use ed25519_dalek::{Signer, SigningKey};
//! use keyfold::{PublicKeyMaterial, RegistryConfig, SignatureAlgorithm, VerifierRegistry};
//! use rand::rngs::OsRng;
//! use std::collections::HashMap;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let signing_key = SigningKey::generate(&mut OsRng);
//!
//! let mut public_keys = HashMap::new();
//! public_keys.insert(
//!     "partner-a".to_string(),
//!     PublicKeyMaterial::from_bytes(&signing_key.verifying_key().to_bytes()),
//! );
//!
//! let config = RegistryConfig::new().with_algorithm(SignatureAlgorithm::Ed25519);
//! let registry = VerifierRegistry::new(public_keys, config);
//!
//! let signature = signing_key.sign("hello world".as_bytes());
//! let encoded = general_purpose::STANDARD.encode(signature.to_bytes());
//!
//! assert!(registry.verify("partner-a", "hello world", &encoded)?);
//! # Ok(())
//! # }
//! ```

pub mod algorithm;
pub mod encoding;
pub mod keys;
pub mod registry;
pub mod verifier;

pub use algorithm::*;
pub use encoding::*;
pub use keys::*;
pub use registry::*;
pub use verifier::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Verification-related errors
#[derive(Error, Debug)]
pub enum KeyfoldError {
    #[error("Public key not found: {0}")]
    KeyNotFound(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Verifier cache unavailable: {0}")]
    CacheUnavailable(String),
}

pub type KeyfoldResult<T> = Result<T, KeyfoldError>;

/// Registry configuration
///
/// Set once at registry construction; every verifier the registry builds is
/// bound to the same algorithm and encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Signature algorithm used by every verifier (default: SHA1withRSA)
    pub algorithm: SignatureAlgorithm,
    /// Text encoding used to turn messages into signable bytes (default: UTF-8)
    pub encoding: MessageEncoding,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            algorithm: SignatureAlgorithm::Sha1WithRsa,
            encoding: MessageEncoding::Utf8,
        }
    }
}

impl RegistryConfig {
    /// Create a new registry config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the signature algorithm
    pub fn with_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the message encoding
    pub fn with_encoding(mut self, encoding: MessageEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}
