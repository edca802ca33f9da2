//! Document chunking strategies.
//!
//! This module provides the [`Chunker`] trait and two implementations:
//!
//! - [`FixedSizeChunker`]: splits by character count with configurable overlap
//! - [`CharacterChunker`]: splits on blank lines and
//!   merges the pieces back into windows no longer than the chunk size
//!
//! All sizes are measured in characters, never bytes, so multi-byte text
//! extracted from PDFs is split on valid boundaries.

use std::collections::VecDeque;

use crate::document::{Chunk, Document};

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s with text and metadata but no embeddings.
/// Embeddings are attached later by the pipeline. Splitting is deterministic:
/// the same document always yields the same ordered chunks.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks.
    ///
    /// Returns an empty `Vec` if the document has empty text.
    /// Each returned chunk has an empty embedding vector.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Splits text into fixed-size chunks by character count with configurable overlap.
///
/// Chunk IDs are generated as `{document_id}_{chunk_index}`. Each chunk inherits
/// the parent document's metadata plus a `chunk_index` field.
///
/// # Example
///
/// ```rust,ignore
/// use wxdoc_rag::FixedSizeChunker;
///
/// let chunker = FixedSizeChunker::new(256, 50);
/// let chunks = chunker.chunk(&document);
/// ```
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl FixedSizeChunker {
    /// Create a new `FixedSizeChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size`: maximum number of characters per chunk
    /// * `chunk_overlap`: number of overlapping characters between consecutive chunks
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size, chunk_overlap }
    }
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.text.is_empty() {
            return Vec::new();
        }
        let windows = split_by_size(&document.text, self.chunk_size, self.chunk_overlap);
        into_chunks(document, windows)
    }
}

/// Splits text on blank lines and merges the pieces into bounded chunks.
///
/// Pieces are trimmed and empty pieces dropped. Consecutive pieces are joined
/// with a blank line while the result stays within `chunk_size`; when a chunk
/// is emitted, trailing pieces totalling at most `chunk_overlap` characters
/// are carried into the next one. A single piece longer than `chunk_size` is
/// cut into fixed windows first, so no chunk ever exceeds the limit.
///
/// # Example
///
/// ```rust,ignore
/// use wxdoc_rag::CharacterChunker;
///
/// let chunker = CharacterChunker::new(500, 50);
/// let chunks = chunker.chunk(&document);
/// ```
#[derive(Debug, Clone)]
pub struct CharacterChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

/// Separator between the pieces [`CharacterChunker`] merges.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

impl CharacterChunker {
    /// Create a new `CharacterChunker` splitting on blank lines.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size, chunk_overlap }
    }
}

impl Chunker for CharacterChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.text.is_empty() {
            return Vec::new();
        }

        let pieces: Vec<String> = document
            .text
            .split(PARAGRAPH_SEPARATOR)
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .flat_map(|piece| {
                if char_len(piece) > self.chunk_size {
                    split_by_size(piece, self.chunk_size, self.chunk_overlap)
                } else {
                    vec![piece.to_string()]
                }
            })
            .collect();

        let merged = merge_pieces(&pieces, PARAGRAPH_SEPARATOR, self.chunk_size, self.chunk_overlap);
        into_chunks(document, merged)
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Join pieces into chunks of at most `chunk_size` characters, carrying up to
/// `chunk_overlap` characters of trailing pieces into the following chunk.
fn merge_pieces(
    pieces: &[String],
    separator: &str,
    chunk_size: usize,
    chunk_overlap: usize,
) -> Vec<String> {
    let separator_len = char_len(separator);
    let mut merged = Vec::new();
    let mut current: VecDeque<&str> = VecDeque::new();
    let mut total = 0usize;

    for piece in pieces {
        let len = char_len(piece);
        let joined_len = if current.is_empty() { 0 } else { separator_len };

        if !current.is_empty() && total + len + joined_len > chunk_size {
            merged.push(current.iter().copied().collect::<Vec<_>>().join(separator));

            // Drop leading pieces until what remains fits the overlap budget
            // and leaves room for the incoming piece.
            while total > chunk_overlap
                || (total > 0
                    && total + len + if current.is_empty() { 0 } else { separator_len }
                        > chunk_size)
            {
                let Some(first) = current.pop_front() else { break };
                total -= char_len(first) + if current.is_empty() { 0 } else { separator_len };
            }
        }

        current.push_back(piece);
        total += len + if current.len() > 1 { separator_len } else { 0 };
    }

    if !current.is_empty() {
        merged.push(current.iter().copied().collect::<Vec<_>>().join(separator));
    }

    merged
}

/// Character-based splitting with overlap.
fn split_by_size(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    if text.is_empty() || chunk_size == 0 {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let step = chunk_size.saturating_sub(chunk_overlap).max(1);
    let mut windows = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        windows.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }

    windows
}

fn into_chunks(document: &Document, texts: Vec<String>) -> Vec<Chunk> {
    texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let mut metadata = document.metadata.clone();
            metadata.insert("chunk_index".to_string(), i.to_string());
            Chunk {
                id: format!("{}_{i}", document.id),
                text,
                embedding: Vec::new(),
                metadata,
                document_id: document.id.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn doc(text: &str) -> Document {
        Document {
            id: "doc".to_string(),
            text: text.to_string(),
            metadata: HashMap::new(),
            source_uri: None,
        }
    }

    #[test]
    fn fixed_size_windows_overlap() {
        let chunks = FixedSizeChunker::new(4, 1).chunk(&doc("abcdefghij"));
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["abcd", "defg", "ghij"]);
        assert_eq!(chunks[2].id, "doc_2");
        assert_eq!(chunks[2].metadata["chunk_index"], "2");
    }

    #[test]
    fn fixed_size_handles_multibyte_text() {
        let chunks = FixedSizeChunker::new(3, 0).chunk(&doc("héllo wörld"));
        assert!(chunks.iter().all(|c| c.text.chars().count() <= 3));
        let rebuilt: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rebuilt, "héllo wörld");
    }

    #[test]
    fn character_chunker_merges_paragraphs() {
        let text = "alpha\n\nbeta\n\ngamma\n\ndelta";
        let chunks = CharacterChunker::new(12, 0).chunk(&doc(text));
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["alpha\n\nbeta", "gamma\n\ndelta"]);
    }

    #[test]
    fn character_chunker_carries_overlap() {
        let text = "aa\n\nbb\n\ncc";
        let chunks = CharacterChunker::new(6, 2).chunk(&doc(text));
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["aa\n\nbb", "bb\n\ncc"]);
    }

    #[test]
    fn character_chunker_cuts_oversized_piece() {
        let text = "x".repeat(25);
        let chunks = CharacterChunker::new(10, 2).chunk(&doc(&text));
        assert!(chunks.len() >= 3);
        assert!(chunks.iter().all(|c| c.text.chars().count() <= 10));
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(CharacterChunker::new(10, 2).chunk(&doc("")).is_empty());
        assert!(FixedSizeChunker::new(10, 2).chunk(&doc("")).is_empty());
        assert!(CharacterChunker::new(10, 2).chunk(&doc("\n\n  \n\n")).is_empty());
    }
}
