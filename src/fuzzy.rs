//! Approximate similarity scoring for the last database-backed tier.
//!
//! Ranking is normalized Levenshtein (via `strsim`), made position-independent
//! by scoring the pattern against every token-aligned window of the candidate
//! as well as the whole string: a truncated or mid-name pattern still scores
//! against the part of the reference name it actually overlaps.

/// Patterns must be longer than this (chars) to enter approximate search.
pub(crate) const MIN_PATTERN_LEN: usize = 10;

/// Similarity floor for accepting an approximate match.
pub(crate) const SIMILARITY_THRESHOLD: f64 = 0.85;

/// Windows longer than `pattern × WINDOW_GROWTH_LIMIT` cannot clear the
/// threshold and are skipped.
const WINDOW_GROWTH_LIMIT: usize = 2;

/// Best normalized-Levenshtein similarity of `pattern` against `candidate`,
/// taken over the whole string and every contiguous token window.
///
/// Both inputs are expected lower-cased; this function does no case folding.
pub fn best_similarity(pattern: &str, candidate: &str) -> f64 {
    let mut best = strsim::normalized_levenshtein(pattern, candidate);

    let pattern_len = pattern.chars().count();
    let tokens: Vec<&str> = candidate.split_whitespace().collect();
    if tokens.len() > 1 {
        for start in 0..tokens.len() {
            let mut window = String::new();
            for token in &tokens[start..] {
                if !window.is_empty() {
                    window.push(' ');
                }
                window.push_str(token);
                if window.chars().count() > pattern_len * WINDOW_GROWTH_LIMIT {
                    break;
                }
                let score = strsim::normalized_levenshtein(pattern, &window);
                if score > best {
                    best = score;
                }
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(best_similarity("saldiha college", "saldiha college"), 1.0);
    }

    #[test]
    fn close_variants_clear_threshold() {
        let score = best_similarity("saldiha colege", "saldiha college");
        assert!(score >= SIMILARITY_THRESHOLD, "score was {score}");
    }

    #[test]
    fn window_match_inside_longer_name() {
        // The pattern covers only the tail of the reference name.
        let score = best_similarity(
            "smriti mahavidyalaya",
            "bhupendra nath dutta smriti mahavidyalaya",
        );
        assert!(score >= SIMILARITY_THRESHOLD, "score was {score}");
    }

    #[test]
    fn unrelated_strings_score_low() {
        let score = best_similarity("suspension report", "saldiha college");
        assert!(score < SIMILARITY_THRESHOLD, "score was {score}");
    }

    #[test]
    fn empty_candidate() {
        assert!(best_similarity("saldiha college", "") < SIMILARITY_THRESHOLD);
    }
}
