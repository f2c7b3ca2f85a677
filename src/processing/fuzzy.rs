//! String similarity scores on a 0-100 scale.
//!
//! `ratio` is the normalized indel similarity `200 * lcs / (len_a + len_b)`,
//! where `lcs` is the longest common subsequence in characters. `partial_ratio`
//! is the best `ratio` of the shorter string against any same-length window of
//! the longer one, including windows clipped at either end. Both operate on
//! `char`s, so Devanagari text is scored per code point.

/// Length of the longest common subsequence of two character slices.
fn lcs_length(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_length(a, b) as f64 / total as f64
}

/// Similarity of two whole strings.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Similarity of the shorter string to its best-aligned substring of the
/// longer one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let n = short.len();
    let m = long.len();
    let mut best = 0.0f64;

    // Windows clipped at the left edge.
    for end in 1..n {
        best = best.max(ratio_chars(&short, &long[..end]));
    }
    for start in 0..=(m - n) {
        let score = ratio_chars(&short, &long[start..start + n]);
        if score >= 100.0 {
            return 100.0;
        }
        best = best.max(score);
    }
    // Windows clipped at the right edge.
    for start in (m - n + 1)..m {
        best = best.max(ratio_chars(&short, &long[start..]));
    }

    best
}
