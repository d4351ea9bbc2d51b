//! Codec configuration
//!
//! Limits shared by every encoder and decoder. The defaults match the
//! deployed X2AP stacks: containers hold at most 32 elements and encoder
//! output is unbounded.

use serde::{Deserialize, Serialize};

/// Default ceiling on the element count of any container.
pub const DEFAULT_MAX_CONTAINER_LEN: usize = 32;

/// Limits applied while encoding and decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Largest element count accepted in a SEQUENCE OF or IE container.
    pub max_container_len: usize,
    /// Largest encoder output in octets; `None` leaves it unbounded.
    pub max_message_len: Option<usize>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_container_len: DEFAULT_MAX_CONTAINER_LEN,
            max_message_len: None,
        }
    }
}

impl CodecConfig {
    pub fn with_max_container_len(mut self, max_container_len: usize) -> Self {
        self.max_container_len = max_container_len;
        self
    }

    pub fn with_max_message_len(mut self, max_message_len: usize) -> Self {
        self.max_message_len = Some(max_message_len);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CodecConfig::default();
        assert_eq!(config.max_container_len, 32);
        assert_eq!(config.max_message_len, None);
    }

    #[test]
    fn test_parse_yaml_partial() {
        let config: CodecConfig = serde_yaml::from_str("max_container_len: 256\n").unwrap();
        assert_eq!(config.max_container_len, 256);
        assert_eq!(config.max_message_len, None);

        let config: CodecConfig = serde_yaml::from_str("max_message_len: 1500\n").unwrap();
        assert_eq!(config.max_container_len, DEFAULT_MAX_CONTAINER_LEN);
        assert_eq!(config.max_message_len, Some(1500));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = CodecConfig::default()
            .with_max_container_len(64)
            .with_max_message_len(9000);
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: CodecConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
