//! Fixed-size payload chunking

use crate::error::{Error, Result};
use crate::types::Chunk;

/// Splits text into pieces of at most `max_chars` characters
pub struct Chunker {
    max_chars: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self { max_chars: 10_000 }
    }
}

impl Chunker {
    /// Fails with `InvalidConfig` when `max_chars` is zero
    pub fn new(max_chars: usize) -> Result<Self> {
        validate_chunk_size(max_chars)?;
        Ok(Self { max_chars })
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Left-to-right split on character boundaries; the last chunk holds the remainder
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::with_capacity(text.len().div_ceil(self.max_chars));
        let mut start_byte = 0;
        let mut start_char = 0;
        let mut current = 0;

        for (byte_idx, _) in text.char_indices() {
            if current == self.max_chars {
                chunks.push(Chunk {
                    index: chunks.len(),
                    start: start_char,
                    text: text[start_byte..byte_idx].to_string(),
                });
                start_byte = byte_idx;
                start_char += current;
                current = 0;
            }
            current += 1;
        }

        if current > 0 {
            chunks.push(Chunk {
                index: chunks.len(),
                start: start_char,
                text: text[start_byte..].to_string(),
            });
        }

        chunks
    }
}

pub(crate) fn validate_chunk_size(max_chars: usize) -> Result<()> {
    if max_chars == 0 {
        return Err(Error::InvalidConfig(
            "max_chunk_size must be greater than zero".into(),
        ));
    }
    Ok(())
}

/// `ceil(len / max_chars)`, zero for empty input; `InvalidConfig` for a zero size
pub fn chunk_count(len: usize, max_chars: usize) -> Result<usize> {
    validate_chunk_size(max_chars)?;
    Ok(len.div_ceil(max_chars))
}

/// Convenience wrapper over [`Chunker::chunk`]
pub fn chunk_text(text: &str, max_chars: usize) -> Result<Vec<Chunk>> {
    Ok(Chunker::new(max_chars)?.chunk(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_empty_text() {
        assert!(chunk_text("", 5).unwrap().is_empty());
        assert_eq!(chunk_count(0, 5).unwrap(), 0);
    }

    #[test]
    fn test_hello_world() {
        let chunks = chunk_text("hello\nworld", 5).unwrap();
        assert_eq!(texts(&chunks), vec!["hello", "\nworl", "d"]);
        assert_eq!(chunks[1].start, 5);
        assert_eq!(chunks[2].index, 2);
    }

    #[test]
    fn test_exact_fit_is_one_chunk() {
        let text = "exactly";
        let chunks = chunk_text(text, text.len()).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
    }

    #[test]
    fn test_size_one_gives_one_chunk_per_char() {
        let chunks = chunk_text("abc\r\n", 1).unwrap();
        assert_eq!(texts(&chunks), vec!["a", "b", "c", "\r", "\n"]);
    }

    #[test]
    fn test_count_matches_ceil() {
        for len in [1usize, 9, 10, 11, 29, 30, 31] {
            let text = "x".repeat(len);
            let chunks = chunk_text(&text, 10).unwrap();
            assert_eq!(chunks.len(), len.div_ceil(10), "len {len}");
            assert_eq!(chunk_count(len, 10).unwrap(), len.div_ceil(10));
        }
    }

    #[test]
    fn test_multibyte_never_split() {
        let text = "日本語のテキスト🎉é";
        let chunks = chunk_text(text, 3).unwrap();

        assert_eq!(chunks.len(), chunk_count(text.chars().count(), 3).unwrap());
        assert!(chunks.iter().all(|c| c.char_len() <= 3));
        assert_eq!(texts(&chunks).concat(), text);
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        let text = "line one\r\nline two\n\ttabbed \"quoted\" \\ back\n".repeat(50);
        for max in [1, 7, 64, 10_000] {
            let joined: String = chunk_text(&text, max)
                .unwrap()
                .into_iter()
                .map(|c| c.text)
                .collect();
            assert_eq!(joined, text);
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(Chunker::new(0), Err(Error::InvalidConfig(_))));
        assert!(matches!(chunk_count(5, 0), Err(Error::InvalidConfig(_))));
        assert!(matches!(chunk_text("abc", 0), Err(Error::InvalidConfig(_))));
        assert_eq!(Chunker::new(1).unwrap().max_chars(), 1);
    }
}
