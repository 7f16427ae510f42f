//! Tokenizer lookup with fallback.

use crate::error::{OwlError, Result};
use tiktoken_rs::CoreBPE;
use tracing::{debug, warn};

/// Tokenizer used when the requested one is unknown.
pub const DEFAULT_TOKENIZER: &str = "cl100k_base";

/// A loaded BPE tokenizer together with the identifier it was resolved to.
pub struct Tokenizer {
    name: String,
    bpe: CoreBPE,
}

impl Tokenizer {
    /// Load a tokenizer by encoding name (`cl100k_base`, `o200k_base`, ...)
    /// or model name (`gpt-4o`, ...).
    ///
    /// Unknown identifiers fall back to [`DEFAULT_TOKENIZER`] with a warning.
    pub fn load(identifier: &str) -> Result<Self> {
        match Self::load_exact(identifier) {
            Some(bpe) => {
                debug!("Loaded tokenizer '{}'", identifier);
                Ok(Self {
                    name: identifier.to_string(),
                    bpe,
                })
            }
            None => {
                warn!(
                    "Tokenizer '{}' not found. Using '{}'.",
                    identifier, DEFAULT_TOKENIZER
                );
                let bpe = tiktoken_rs::cl100k_base()
                    .map_err(|e| OwlError::Tokenizer(e.to_string()))?;
                Ok(Self {
                    name: DEFAULT_TOKENIZER.to_string(),
                    bpe,
                })
            }
        }
    }

    fn load_exact(identifier: &str) -> Option<CoreBPE> {
        let loaded = match identifier {
            "cl100k_base" => tiktoken_rs::cl100k_base(),
            "o200k_base" => tiktoken_rs::o200k_base(),
            "p50k_base" => tiktoken_rs::p50k_base(),
            "p50k_edit" => tiktoken_rs::p50k_edit(),
            "r50k_base" | "gpt2" => tiktoken_rs::r50k_base(),
            model => tiktoken_rs::get_bpe_from_model(model),
        };
        loaded.ok()
    }

    /// Identifier this tokenizer was resolved to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encode text to tokens. Special-token text is treated as plain text.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        self.bpe.encode_ordinary(text)
    }

    /// Decode tokens back to text.
    ///
    /// The bytes of the whole window are joined before conversion, so a
    /// character split across several tokens survives as long as all of them
    /// are in the window. Bytes of a character cut at either edge of the
    /// window become U+FFFD.
    ///
    /// # Panics
    ///
    /// Panics if a token was not produced by this tokenizer.
    pub fn decode(&self, tokens: &[u32]) -> String {
        let bytes: Vec<u8> = self
            .bpe
            ._decode_native_and_split(tokens.to_vec())
            .flatten()
            .collect();

        match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                debug!("Lossy decode of {} tokens", tokens.len());
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tokenizer_falls_back() {
        let tokenizer = Tokenizer::load("no-such-encoding").unwrap();
        assert_eq!(tokenizer.name(), DEFAULT_TOKENIZER);
        assert!(!tokenizer.encode("hello world").is_empty());
    }

    #[test]
    fn test_known_encodings_resolve() {
        assert_eq!(Tokenizer::load("cl100k_base").unwrap().name(), "cl100k_base");
        assert_eq!(Tokenizer::load("gpt2").unwrap().name(), "gpt2");
    }

    #[test]
    fn test_model_name_resolves() {
        let tokenizer = Tokenizer::load("gpt-4o").unwrap();
        assert_eq!(tokenizer.name(), "gpt-4o");
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let tokenizer = Tokenizer::load(DEFAULT_TOKENIZER).unwrap();
        let text = "The quick brown fox jumps over the lazy dog.";
        let tokens = tokenizer.encode(text);
        assert_eq!(tokenizer.decode(&tokens), text);
    }

    #[test]
    fn test_split_multibyte_decodes_lossily() {
        let tokenizer = Tokenizer::load(DEFAULT_TOKENIZER).unwrap();
        let text = "🦉 鷲 owl 🦉 鷲 🦉";
        let tokens = tokenizer.encode(text);
        assert_eq!(tokenizer.decode(&tokens), text);

        let mut saw_split = false;
        for k in 1..tokens.len() {
            let left = tokenizer.decode(&tokens[..k]);
            let right = tokenizer.decode(&tokens[k..]);
            saw_split |= left.contains(char::REPLACEMENT_CHARACTER);

            // Only the bytes cut at the boundary are lost.
            let head = left.trim_end_matches(char::REPLACEMENT_CHARACTER);
            let tail = right.trim_start_matches(char::REPLACEMENT_CHARACTER);
            assert!(text.starts_with(head), "split {}: {:?}", k, left);
            assert!(text.ends_with(tail), "split {}: {:?}", k, right);
            assert!(!head.contains(char::REPLACEMENT_CHARACTER));
            assert!(!tail.contains(char::REPLACEMENT_CHARACTER));
            assert!(head.len() + tail.len() + 8 >= text.len());
        }
        assert!(saw_split, "no window boundary fell inside a character");
    }
}
