//! Message text encodings

use crate::KeyfoldError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text encoding used to turn a message into the bytes that were signed
///
/// The signer and the verifier must agree on the encoding; a registry applies
/// one encoding to every message it verifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageEncoding {
    /// UTF-8 (the native encoding of Rust strings)
    Utf8,
    /// UTF-16, big-endian, no byte order mark
    Utf16Be,
    /// UTF-16, little-endian, no byte order mark
    Utf16Le,
}

impl MessageEncoding {
    /// Canonical encoding name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf16Le => "UTF-16LE",
        }
    }

    /// Encode a message into its signable byte representation
    pub fn encode_message(&self, message: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => message.as_bytes().to_vec(),
            Self::Utf16Be => message
                .encode_utf16()
                .flat_map(|unit| unit.to_be_bytes())
                .collect(),
            Self::Utf16Le => message
                .encode_utf16()
                .flat_map(|unit| unit.to_le_bytes())
                .collect(),
        }
    }
}

impl Default for MessageEncoding {
    fn default() -> Self {
        Self::Utf8
    }
}

impl fmt::Display for MessageEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MessageEncoding {
    type Err = KeyfoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UTF-8" => Ok(Self::Utf8),
            "UTF-16BE" => Ok(Self::Utf16Be),
            "UTF-16LE" => Ok(Self::Utf16Le),
            other => Err(KeyfoldError::UnsupportedEncoding(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_encoding() {
        assert_eq!(MessageEncoding::default(), MessageEncoding::Utf8);
    }

    #[test]
    fn test_utf8_encoding() {
        assert_eq!(MessageEncoding::Utf8.encode_message("abc"), b"abc".to_vec());
    }

    #[test]
    fn test_utf16_encodings() {
        assert_eq!(
            MessageEncoding::Utf16Be.encode_message("ab"),
            vec![0x00, 0x61, 0x00, 0x62]
        );
        assert_eq!(
            MessageEncoding::Utf16Le.encode_message("ab"),
            vec![0x61, 0x00, 0x62, 0x00]
        );
    }

    #[test]
    fn test_name_parsing_round_trip() {
        for encoding in [
            MessageEncoding::Utf8,
            MessageEncoding::Utf16Be,
            MessageEncoding::Utf16Le,
        ] {
            let parsed: MessageEncoding = encoding.name().parse().unwrap();
            assert_eq!(parsed, encoding);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let result = "ISO-8859-1".parse::<MessageEncoding>();
        assert!(matches!(result, Err(KeyfoldError::UnsupportedEncoding(_))));
    }
}
