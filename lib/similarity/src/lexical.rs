//! Character-level lexical similarity
//!
//! Ratcliff/Obershelp "gestalt" matching: find the longest common block,
//! recurse on the unmatched pieces left and right of it, and score
//! `2 * matched / (len(a) + len(b))`.

use crate::explain::{Signal, SignalScore};
use crate::scorer::SignalScorer;
use ahash::AHashMap;
use taxon_core::text;

#[derive(Debug, Clone, Copy)]
struct Block {
    a: usize,
    b: usize,
    size: usize,
}

struct Matcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of every char in `b`, ascending
    b2j: AHashMap<char, Vec<usize>>,
}

impl<'a> Matcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: AHashMap<char, Vec<usize>> = AHashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }
        Self { a, b, b2j }
    }

    /// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`.
    /// Earliest in `a`, then earliest in `b`, on ties.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Block {
        let mut best = Block {
            a: alo,
            b: blo,
            size: 0,
        };
        let mut j2len: AHashMap<usize, usize> = AHashMap::new();

        for i in alo..ahi {
            let mut next_j2len = AHashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = if j > 0 {
                        j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                    } else {
                        1
                    };
                    next_j2len.insert(j, k);
                    if k > best.size {
                        best = Block {
                            a: i + 1 - k,
                            b: j + 1 - k,
                            size: k,
                        };
                    }
                }
            }
            j2len = next_j2len;
        }

        best
    }

    /// Total size of all matching blocks
    fn matched(&self) -> usize {
        let mut total = 0;
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let block = self.longest_match(alo, ahi, blo, bhi);
            if block.size == 0 {
                continue;
            }
            total += block.size;
            if alo < block.a && blo < block.b {
                queue.push((alo, block.a, blo, block.b));
            }
            if block.a + block.size < ahi && block.b + block.size < bhi {
                queue.push((block.a + block.size, ahi, block.b + block.size, bhi));
            }
        }

        total
    }
}

/// Ratcliff/Obershelp ratio of two strings, in [0, 1].
/// Both empty is a perfect match; one empty is no match.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = Matcher::new(&a, &b).matched();
    2.0 * matched as f64 / total as f64
}

/// Lexical signal between normalized text and normalized label
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalSimilarity;

impl LexicalSimilarity {
    pub fn new() -> Self {
        Self
    }
}

impl SignalScorer for LexicalSimilarity {
    fn signal(&self) -> Signal {
        Signal::WordMatch
    }

    fn evaluate(&self, text: &str, label: &str) -> SignalScore {
        let a = text::normalize(text);
        let b = text::normalize(label);
        // The block search is order sensitive; take the better direction
        let value = ratio(&a, &b).max(ratio(&b, &a));
        SignalScore::computed(value.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_known_values() {
        assert_eq!(ratio("abcd", "abcd"), 1.0);
        assert_eq!(ratio("abcd", "wxyz"), 0.0);
        // "ab" + "d" matched: 2 * 3 / 8
        assert!((ratio("abcd", "abxd") - 0.75).abs() < 1e-12);
        assert!((ratio("customer id", "customer") - 16.0 / 19.0).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_empty() {
        assert_eq!(ratio("", ""), 1.0);
        assert_eq!(ratio("abc", ""), 0.0);
        assert_eq!(ratio("", "abc"), 0.0);
    }

    #[test]
    fn test_identity_scores_one() {
        let lexical = LexicalSimilarity::new();
        for text in ["customer_id", "PK", "Email Address", "a"] {
            assert_eq!(lexical.score(text, text), 1.0);
        }
    }

    #[test]
    fn test_score_is_symmetric_and_normalized() {
        let lexical = LexicalSimilarity::new();
        let pairs = [("user_id", "pk"), ("customer-name", "pii"), ("order", "ORDER_ID")];
        for (a, b) in pairs {
            let s = lexical.score(a, b);
            assert_eq!(s, lexical.score(b, a));
            assert!((0.0..=1.0).contains(&s));
        }
        // normalization makes separators and case irrelevant
        assert_eq!(lexical.score("ORDER_ID", "order id"), 1.0);
    }

    #[test]
    fn test_signal_kind() {
        assert_eq!(LexicalSimilarity::new().signal(), Signal::WordMatch);
        assert!(LexicalSimilarity::new().evaluate("a", "b").diagnostic.is_none());
    }
}
