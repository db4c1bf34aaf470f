//! Keyed verifier resolution and caching

use crate::{KeyfoldError, KeyfoldResult, PublicKeyMaterial, RegistryConfig, SignatureVerifier};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Registry resolving logical key ids to cached signature verifiers
///
/// The registry owns an externally supplied id to public key mapping and a
/// cache of verifiers built from it. Verifiers are built on the first call
/// for a key id and reused for every later call; the cache is append-only
/// for the registry's lifetime, so replacing a key under a live id requires
/// a new registry (or a new id). Cached verifiers are never handed out.
pub struct VerifierRegistry {
    config: RegistryConfig,
    /// Id to public key mapping, read-only after construction
    public_keys: HashMap<String, PublicKeyMaterial>,
    /// Lazily populated verifier cache
    cache: Arc<RwLock<HashMap<String, Arc<SignatureVerifier>>>>,
}

impl VerifierRegistry {
    /// Create a registry over an id to public key mapping
    pub fn new(public_keys: HashMap<String, PublicKeyMaterial>, config: RegistryConfig) -> Self {
        Self {
            config,
            public_keys,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a registry with the default configuration (SHA1withRSA, UTF-8)
    pub fn with_defaults(public_keys: HashMap<String, PublicKeyMaterial>) -> Self {
        Self::new(public_keys, RegistryConfig::default())
    }

    /// The registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Number of key ids a verifier has been built for so far
    pub fn cached_verifier_count(&self) -> KeyfoldResult<usize> {
        let cache = self
            .cache
            .read()
            .map_err(|_| KeyfoldError::CacheUnavailable("Failed to acquire read lock".to_string()))?;

        Ok(cache.len())
    }

    /// Verify a base64-encoded signature over a message, choosing the public
    /// key by its logical id
    ///
    /// Fails with [`KeyfoldError::KeyNotFound`] when `key_id` is absent from
    /// the configured mapping. Verifier-level errors (malformed signature
    /// text, incompatible key material) propagate unchanged; a cryptographic
    /// mismatch is the `Ok(false)` result, never an error.
    pub fn verify(
        &self,
        key_id: &str,
        message: &str,
        encoded_signature: &str,
    ) -> KeyfoldResult<bool> {
        if let Some(verifier) = self.cached(key_id)? {
            return verifier.verify(message, encoded_signature);
        }

        let material = self.public_keys.get(key_id).ok_or_else(|| {
            KeyfoldError::KeyNotFound(format!("public key not found: key_id={}", key_id))
        })?;

        let built = Arc::new(SignatureVerifier::new(
            material,
            self.config.algorithm,
            self.config.encoding,
        )?);

        // Publish under the write lock; the first insert wins and a racing
        // builder's instance is dropped. The lock is not held across the
        // verification itself.
        let verifier = {
            let mut cache = self.cache.write().map_err(|_| {
                KeyfoldError::CacheUnavailable("Failed to acquire write lock".to_string())
            })?;

            match cache.entry(key_id.to_string()) {
                Entry::Occupied(entry) => Arc::clone(entry.get()),
                Entry::Vacant(entry) => {
                    log::debug!("Built verifier for key: {}", key_id);
                    Arc::clone(entry.insert(built))
                }
            }
        };

        verifier.verify(message, encoded_signature)
    }

    fn cached(&self, key_id: &str) -> KeyfoldResult<Option<Arc<SignatureVerifier>>> {
        let cache = self
            .cache
            .read()
            .map_err(|_| KeyfoldError::CacheUnavailable("Failed to acquire read lock".to_string()))?;

        Ok(cache.get(key_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SignatureAlgorithm;
    use base64::{engine::general_purpose, Engine as _};
    use ed25519_dalek::{Signer, SigningKey};
    use rand::rngs::OsRng;

    fn ed25519_registry(key_id: &str) -> (SigningKey, VerifierRegistry) {
        let signing_key = SigningKey::generate(&mut OsRng);
        let mut public_keys = HashMap::new();
        public_keys.insert(
            key_id.to_string(),
            PublicKeyMaterial::from_bytes(&signing_key.verifying_key().to_bytes()),
        );

        let config = RegistryConfig::new().with_algorithm(SignatureAlgorithm::Ed25519);
        (signing_key, VerifierRegistry::new(public_keys, config))
    }

    fn sign(signing_key: &SigningKey, message: &str) -> String {
        let signature = signing_key.sign(message.as_bytes());
        general_purpose::STANDARD.encode(signature.to_bytes())
    }

    #[test]
    fn test_unknown_key_id() {
        let registry = VerifierRegistry::with_defaults(HashMap::new());

        let result = registry.verify("missing", "m", "c2lnbg==");
        assert!(matches!(result, Err(KeyfoldError::KeyNotFound(_))));
        assert_eq!(registry.cached_verifier_count().unwrap(), 0);
    }

    #[test]
    fn test_cache_populated_on_first_call() {
        let (signing_key, registry) = ed25519_registry("k1");
        let encoded = sign(&signing_key, "hello world");

        assert_eq!(registry.cached_verifier_count().unwrap(), 0);
        assert!(registry.verify("k1", "hello world", &encoded).unwrap());
        assert_eq!(registry.cached_verifier_count().unwrap(), 1);
    }

    #[test]
    fn test_cache_hit_reuses_instance() {
        let (signing_key, registry) = ed25519_registry("k1");
        let encoded = sign(&signing_key, "hello world");

        assert!(registry.verify("k1", "hello world", &encoded).unwrap());
        let first = registry.cached("k1").unwrap().unwrap();

        assert!(registry.verify("k1", "hello world", &encoded).unwrap());
        let second = registry.cached("k1").unwrap().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.cached_verifier_count().unwrap(), 1);
    }

    #[test]
    fn test_concurrent_first_calls_retain_one_verifier() {
        let (signing_key, registry) = ed25519_registry("k1");
        let encoded = sign(&signing_key, "hello world");
        let registry = Arc::new(registry);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let encoded = encoded.clone();
                std::thread::spawn(move || registry.verify("k1", "hello world", &encoded).unwrap())
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }

        assert_eq!(registry.cached_verifier_count().unwrap(), 1);
    }

    #[test]
    fn test_incompatible_key_material_is_not_cached() {
        let mut public_keys = HashMap::new();
        public_keys.insert(
            "k1".to_string(),
            PublicKeyMaterial::from_bytes(b"not a key"),
        );
        let registry = VerifierRegistry::with_defaults(public_keys);

        let result = registry.verify("k1", "m", "c2lnbg==");
        assert!(matches!(result, Err(KeyfoldError::InvalidPublicKey(_))));
        assert_eq!(registry.cached_verifier_count().unwrap(), 0);
    }
}
