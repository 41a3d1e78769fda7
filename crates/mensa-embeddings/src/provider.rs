//! Deterministic feature-hashed text embedding.
//!
//! Menu entries and queries are short texts, so the vector is a signed
//! feature hash over unigrams plus adjacent-word bigrams: multi-word
//! dish names ("salsa verde", "pad thai") pull matching texts together
//! beyond plain bag-of-words overlap. The same text always produces the
//! same vector, which is the contract ingestion and query time rely on.

use std::collections::HashMap;

use mensa_core::errors::MensaResult;
use mensa_core::traits::IEmbeddingProvider;

/// Weight of a bigram feature relative to a unigram occurrence.
const BIGRAM_WEIGHT: f32 = 0.5;

/// Signed feature-hashing provider.
///
/// Not as semantically rich as neural embeddings, but deterministic and
/// always available; cosine similarity over these vectors behaves like
/// a soft phrase-aware term match.
pub struct HashedTermFrequency {
    dimensions: usize,
}

impl HashedTermFrequency {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Lowercased alphanumeric terms. Single characters and bare
    /// numbers are dropped; prices and counts in menu text carry no
    /// matching signal.
    fn terms(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.len() >= 2 && !t.bytes().all(|b| b.is_ascii_digit()))
            .map(str::to_lowercase)
            .collect()
    }

    /// 64-bit feature hash: polynomial accumulation over the bytes,
    /// then a splitmix64 finisher for bucket dispersion.
    fn feature_hash(feature: &str) -> u64 {
        let mut h = 0u64;
        for b in feature.as_bytes() {
            h = h.wrapping_mul(31).wrapping_add(u64::from(*b));
        }
        h ^= h >> 30;
        h = h.wrapping_mul(0xbf58_476d_1ce4_e5b9);
        h ^= h >> 27;
        h = h.wrapping_mul(0x94d0_49bb_1331_11eb);
        h ^ (h >> 31)
    }

    /// Bucket index and sign for one feature. The sign bit de-biases
    /// collisions: unrelated features landing in one bucket tend to
    /// cancel instead of stacking.
    fn slot(&self, feature: &str) -> (usize, f32) {
        let h = Self::feature_hash(feature);
        let bucket = (h % self.dimensions as u64) as usize;
        let sign = if h & (1 << 63) == 0 { 1.0 } else { -1.0 };
        (bucket, sign)
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let terms = Self::terms(text);
        let mut out = vec![0.0f32; self.dimensions];
        if terms.is_empty() {
            return out;
        }

        let mut counts: HashMap<&str, u32> = HashMap::new();
        for term in &terms {
            *counts.entry(term.as_str()).or_default() += 1;
        }
        // Sublinear tf keeps a repeated term from dominating short text.
        for (term, count) in counts {
            let (bucket, sign) = self.slot(term);
            out[bucket] += sign * (1.0 + (count as f32).ln());
        }
        for pair in terms.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            let (bucket, sign) = self.slot(&bigram);
            out[bucket] += sign * BIGRAM_WEIGHT;
        }

        // Unit norm so dot product equals cosine similarity.
        let norm = out.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for x in &mut out {
                *x /= norm;
            }
        }
        out
    }
}

impl IEmbeddingProvider for HashedTermFrequency {
    fn embed(&self, text: &str) -> MensaResult<Vec<f32>> {
        Ok(self.vector(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-term-frequency"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dot(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn empty_text_returns_zero_vector() {
        let p = HashedTermFrequency::new(128);
        let v = p.embed("").unwrap();
        assert_eq!(v.len(), 128);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn produces_requested_dimensions() {
        let p = HashedTermFrequency::new(384);
        let v = p.embed("vegan tacos with guacamole").unwrap();
        assert_eq!(v.len(), 384);
    }

    #[test]
    fn different_texts_differ() {
        let p = HashedTermFrequency::new(384);
        let a = p.embed("vegan tacos").unwrap();
        let b = p.embed("pepperoni pizza").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn bare_numbers_carry_no_signal() {
        let p = HashedTermFrequency::new(256);
        assert_eq!(
            p.embed("tacos under 15").unwrap(),
            p.embed("tacos under").unwrap()
        );
        let priced_only = p.embed("15 99 2024").unwrap();
        assert!(priced_only.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn word_order_distinguishes_phrases() {
        // Same unigrams, different bigrams.
        let p = HashedTermFrequency::new(384);
        assert_ne!(
            p.embed("salsa verde").unwrap(),
            p.embed("verde salsa").unwrap()
        );
    }

    #[test]
    fn shared_terms_produce_positive_similarity() {
        let p = HashedTermFrequency::new(384);
        let query = p.embed("vegan jackfruit taco").unwrap();
        let doc = p.embed("vegan jackfruit with salsa verde").unwrap();
        let unrelated = p.embed("slow braised pork shoulder").unwrap();
        assert!(dot(&query, &doc) > 0.0);
        assert!(dot(&query, &doc) > dot(&query, &unrelated));
    }

    #[test]
    fn batch_matches_single() {
        let p = HashedTermFrequency::new(64);
        let texts = vec!["one taco".to_string(), "two tacos".to_string()];
        let batch = p.embed_batch(&texts).unwrap();
        assert_eq!(batch[0], p.embed("one taco").unwrap());
        assert_eq!(batch[1], p.embed("two tacos").unwrap());
    }

    proptest! {
        #[test]
        fn deterministic_for_any_text(text in ".{0,200}") {
            let p = HashedTermFrequency::new(384);
            prop_assert_eq!(p.embed(&text).unwrap(), p.embed(&text).unwrap());
        }

        #[test]
        fn unit_norm_or_zero(text in ".{0,200}") {
            let p = HashedTermFrequency::new(384);
            let v = p.embed(&text).unwrap();
            prop_assert_eq!(v.len(), 384);
            let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            prop_assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-3);
        }
    }
}
