//! Token-aware chunking of long documents.
//!
//! A document is encoded once, the token sequence is cut into consecutive
//! windows of at most `chunk_size` tokens, and each window is decoded back
//! to text. Chunk boundaries therefore fall wherever the tokenizer puts
//! them, not on whitespace or sentence ends.

mod tokenizer;

pub use tokenizer::{Tokenizer, DEFAULT_TOKENIZER};

use crate::error::{OwlError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default maximum tokens per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 3000;

/// A token-bounded slice of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Position of this chunk in the document.
    pub index: usize,
    /// Offset of the first token in the document's encoding.
    pub start_token: usize,
    /// Number of tokens in this chunk.
    pub token_count: usize,
    /// Decoded text of the chunk.
    pub text: String,
}

impl Chunk {
    /// Offset one past the last token of this chunk.
    pub fn end_token(&self) -> usize {
        self.start_token + self.token_count
    }
}

/// Splits text into chunks of at most `chunk_size` tokens.
pub struct TokenChunker {
    tokenizer: Tokenizer,
    chunk_size: usize,
}

impl TokenChunker {
    /// Create a chunker for the given tokenizer identifier.
    ///
    /// Unknown tokenizers fall back to [`DEFAULT_TOKENIZER`].
    pub fn new(tokenizer: &str, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(OwlError::InvalidInput(
                "chunk size must be at least one token".to_string(),
            ));
        }
        Ok(Self {
            tokenizer: Tokenizer::load(tokenizer)?,
            chunk_size,
        })
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Split `text` into chunks in document order.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let tokens = self.tokenizer.encode(text);

        let chunks: Vec<Chunk> = tokens
            .chunks(self.chunk_size)
            .enumerate()
            .map(|(index, window)| Chunk {
                index,
                start_token: index * self.chunk_size,
                token_count: window.len(),
                text: self.tokenizer.decode(window),
            })
            .collect();

        debug!(
            "Split {} tokens into {} chunks of at most {} ({})",
            tokens.len(),
            chunks.len(),
            self.chunk_size,
            self.tokenizer.name()
        );

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_text(words: usize) -> String {
        " apple".repeat(words)
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunker = TokenChunker::new(DEFAULT_TOKENIZER, DEFAULT_CHUNK_SIZE).unwrap();
        let text = "Meeting notes: the budget was approved and hiring resumes in May.";

        let chunks = chunker.chunk(text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
        assert_eq!(chunks[0].start_token, 0);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        let chunker = TokenChunker::new(DEFAULT_TOKENIZER, 10).unwrap();
        assert!(chunker.chunk("").is_empty());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        assert!(matches!(
            TokenChunker::new(DEFAULT_TOKENIZER, 0),
            Err(OwlError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_chunks_cover_every_token_once() {
        let chunker = TokenChunker::new(DEFAULT_TOKENIZER, 7).unwrap();
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
                    Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. \
                    Ut enim ad minim veniam, quis nostrud exercitation ullamco.";
        let total = chunker.tokenizer().encode(text).len();

        let chunks = chunker.chunk(text);

        assert_eq!(chunks.len(), total.div_ceil(7));
        assert_eq!(chunks.iter().map(|c| c.token_count).sum::<usize>(), total);
        for pair in chunks.windows(2) {
            assert_eq!(pair[0].end_token(), pair[1].start_token);
            assert_eq!(pair[0].token_count, 7);
        }
        assert_eq!(chunks.last().unwrap().end_token(), total);

        let rejoined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_seven_thousand_tokens_make_three_chunks() {
        let chunker = TokenChunker::new(DEFAULT_TOKENIZER, 3000).unwrap();
        let text = sample_text(7000);
        assert_eq!(chunker.tokenizer().encode(&text).len(), 7000);

        let sizes: Vec<usize> = chunker.chunk(&text).iter().map(|c| c.token_count).collect();
        assert_eq!(sizes, vec![3000, 3000, 1000]);
    }

    #[test]
    fn test_unknown_tokenizer_still_chunks() {
        let chunker = TokenChunker::new("made-up-tokenizer", 5).unwrap();
        assert_eq!(chunker.tokenizer().name(), DEFAULT_TOKENIZER);
        assert_eq!(chunker.chunk(&sample_text(12)).len(), 3);
    }
}
