//! Property tests for chunking, indexing and retrieval.

use async_trait::async_trait;
use proptest::prelude::*;
use std::sync::Arc;
use tldw::chunking::{Chunk, Chunker, ChunkingConfig};
use tldw::embedding::Embedder;
use tldw::index::{EmbeddedChunk, VectorIndex};
use tldw::retrieval::Retriever;
use tldw::TldwError;

/// Letter-frequency embedder over a-z.
struct LetterEmbedder;

#[async_trait]
impl Embedder for LetterEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> tldw::Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut v = vec![0.0; 26];
                for c in text.chars().filter(|c| c.is_ascii_lowercase()) {
                    v[(c as u8 - b'a') as usize] += 1.0;
                }
                v
            })
            .collect())
    }

    fn dimensions(&self) -> usize {
        26
    }
}

fn chunk_at(index: usize) -> Chunk {
    Chunk {
        index,
        text: format!("chunk {}", index),
        start_offset: index * 100,
        end_offset: index * 100 + 100,
    }
}

fn index_from(vectors: Vec<Vec<f32>>) -> VectorIndex {
    let entries = vectors
        .into_iter()
        .enumerate()
        .map(|(i, v)| EmbeddedChunk::new(chunk_at(i), v))
        .collect();
    VectorIndex::build(entries).unwrap()
}

fn chunking_params() -> impl Strategy<Value = (usize, usize)> {
    (1usize..200).prop_flat_map(|size| (Just(size), 0..size))
}

fn vectors(dims: usize, max_len: usize) -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(prop::collection::vec(-1.0f32..1.0, dims), 1..max_len)
}

proptest! {
    #[test]
    fn chunks_cover_text_in_order((size, overlap) in chunking_params(), text in "\\PC{0,600}") {
        let chunker = Chunker::new(ChunkingConfig::new(size, overlap).unwrap()).unwrap();
        let chunks = chunker.chunk(&text);
        let chars: Vec<char> = text.chars().collect();

        if chars.is_empty() {
            prop_assert!(chunks.is_empty());
            return Ok(());
        }

        prop_assert_eq!(chunks[0].start_offset, 0);
        prop_assert_eq!(chunks.last().unwrap().end_offset, chars.len());

        for (i, chunk) in chunks.iter().enumerate() {
            prop_assert_eq!(chunk.index, i);
            prop_assert!(chunk.len() <= size);
            if i + 1 < chunks.len() {
                prop_assert_eq!(chunk.len(), size);
            }

            let expected: String = chars[chunk.start_offset..chunk.end_offset].iter().collect();
            prop_assert_eq!(&chunk.text, &expected);
        }

        for pair in chunks.windows(2) {
            prop_assert_eq!(pair[1].start_offset, pair[0].start_offset + size - overlap);
            prop_assert!(pair[1].start_offset <= pair[0].end_offset);
        }
    }

    #[test]
    fn chunking_is_deterministic((size, overlap) in chunking_params(), text in "\\PC{0,300}") {
        let chunker = Chunker::new(ChunkingConfig::new(size, overlap).unwrap()).unwrap();
        prop_assert_eq!(chunker.chunk(&text), chunker.chunk(&text));
    }

    #[test]
    fn search_returns_best_first_without_duplicates(
        vecs in vectors(4, 30),
        query in prop::collection::vec(-1.0f32..1.0, 4),
        k in 1usize..40,
    ) {
        let n = vecs.len();
        let index = index_from(vecs);
        let results = index.search(&query, k).unwrap();

        prop_assert_eq!(results.len(), k.min(n));

        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].chunk.index < pair[1].chunk.index);
            }
        }

        let mut seen: Vec<usize> = results.iter().map(|r| r.chunk.index).collect();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), results.len());
    }

    #[test]
    fn identical_indexes_rank_identically(
        vecs in vectors(3, 20),
        query in prop::collection::vec(-1.0f32..1.0, 3),
        k in 1usize..25,
    ) {
        let first = index_from(vecs.clone()).search(&query, k).unwrap();
        let second = index_from(vecs).search(&query, k).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn wrong_query_length_always_fails(vecs in vectors(5, 10), len in 0usize..12, k in 0usize..10) {
        prop_assume!(len != 5);
        let index = index_from(vecs);
        let query = vec![0.5; len];

        match index.search(&query, k) {
            Err(TldwError::DimensionMismatch { expected, actual }) => {
                prop_assert_eq!(expected, 5);
                prop_assert_eq!(actual, len);
            }
            other => prop_assert!(false, "expected dimension mismatch, got {:?}", other.map(|r| r.len())),
        }
    }
}

#[test]
fn test_k_larger_than_index_returns_everything() {
    let index = index_from(vec![
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![0.7, 0.7],
        vec![-1.0, 0.0],
        vec![0.9, 0.1],
    ]);

    let results = index.search(&[1.0, 0.0], 10).unwrap();
    let order: Vec<usize> = results.iter().map(|r| r.chunk.index).collect();
    assert_eq!(order, vec![0, 4, 2, 1, 3]);
}

#[test]
fn test_retriever_end_to_end() {
    tokio_test::block_on(async {
        let text = "aaaa aaaa bbbb bbbb cccc cccc dddd dddd";
        let chunker = Chunker::new(ChunkingConfig::new(10, 0).unwrap()).unwrap();
        let chunks = chunker.chunk(text);
        assert_eq!(chunks.len(), 4);

        let retriever = Retriever::new(Arc::new(LetterEmbedder));
        let index = retriever.build_index(chunks).await.unwrap();

        let result = retriever.retrieve(&index, "ccc", 2).await.unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.chunks[0].chunk.index, 2);
        assert!(result.chunks[0].chunk.text.contains("cccc"));
    });
}

#[test]
fn test_retriever_rejects_empty_input() {
    tokio_test::block_on(async {
        let retriever = Retriever::new(Arc::new(LetterEmbedder));
        let err = retriever.build_index(Vec::new()).await.unwrap_err();
        assert!(matches!(err, TldwError::EmptyIndex));
    });
}
