//! Approximate token matching for query terms that miss the index.
//!
//! Similarity is the Ratcliff/Obershelp ratio `2·M / T`, where `T` is the
//! combined length of both strings and `M` the number of characters covered by
//! matching blocks. Blocks are found by taking the longest common run
//! (earliest in the first string, then earliest in the second) and recursing on
//! the unmatched text to either side of it.

/// Default similarity a key needs to count as a close match.
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Similarity ratio in `0.0..=1.0`. Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Upper bound on [`similarity`] from lengths alone.
fn length_bound(a_len: usize, b_len: usize) -> f64 {
    let total = a_len + b_len;
    if total == 0 {
        return 1.0;
    }
    2.0 * a_len.min(b_len) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, len)`.
fn longest_match(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    let width = bhi - blo + 1;
    // run[s] = length of the run ending at the previous a-char and b[blo + s - 1]
    let mut prev = vec![0usize; width];
    let mut cur = vec![0usize; width];
    for i in alo..ahi {
        for j in blo..bhi {
            let slot = j - blo + 1;
            if a[i] == b[j] {
                let k = prev[slot - 1] + 1;
                cur[slot] = k;
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            } else {
                cur[slot] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    (best_i, best_j, best_k)
}

#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    cutoff: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self { Self { cutoff: DEFAULT_CUTOFF } }
}

impl FuzzyMatcher {
    pub fn new(cutoff: f64) -> Self { Self { cutoff } }

    /// True when `key` is at least `cutoff` similar to `term`.
    pub fn is_close(&self, term: &str, key: &str) -> bool {
        if length_bound(term.chars().count(), key.chars().count()) < self.cutoff {
            return false;
        }
        similarity(key, term) >= self.cutoff
    }
}
