//! Signature algorithm selection

use crate::KeyfoldError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signature schemes a registry can be bound to
///
/// One registry instance uses exactly one algorithm for every key id it
/// serves; the key material in the id mapping must belong to the matching
/// algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    /// RSA PKCS#1 v1.5 with a SHA-1 digest
    Sha1WithRsa,
    /// RSA PKCS#1 v1.5 with a SHA-256 digest
    Sha256WithRsa,
    /// Ed25519 signature algorithm
    Ed25519,
}

impl SignatureAlgorithm {
    /// Canonical algorithm name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha1WithRsa => "SHA1withRSA",
            Self::Sha256WithRsa => "SHA256withRSA",
            Self::Ed25519 => "Ed25519",
        }
    }
}

impl Default for SignatureAlgorithm {
    fn default() -> Self {
        Self::Sha1WithRsa
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = KeyfoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SHA1withRSA" => Ok(Self::Sha1WithRsa),
            "SHA256withRSA" => Ok(Self::Sha256WithRsa),
            "Ed25519" => Ok(Self::Ed25519),
            other => Err(KeyfoldError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_algorithm() {
        assert_eq!(SignatureAlgorithm::default(), SignatureAlgorithm::Sha1WithRsa);
    }

    #[test]
    fn test_name_parsing_round_trip() {
        for algorithm in [
            SignatureAlgorithm::Sha1WithRsa,
            SignatureAlgorithm::Sha256WithRsa,
            SignatureAlgorithm::Ed25519,
        ] {
            let parsed: SignatureAlgorithm = algorithm.name().parse().unwrap();
            assert_eq!(parsed, algorithm);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let result = "MD5withRSA".parse::<SignatureAlgorithm>();
        assert!(matches!(
            result,
            Err(KeyfoldError::UnsupportedAlgorithm(name)) if name == "MD5withRSA"
        ));
    }
}
