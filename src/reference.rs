//! The reference index: the caller-supplied set of known institution names
//! and the lookup algorithms over it.
//!
//! Built once, immutable afterwards: construction precomputes the lowered,
//! normalized, and tokenized form of every entry, plus its acronym, so that
//! per-email lookups touch no mutable state and the index can be shared
//! freely across threads. Lookups behave exactly as if each form were
//! recomputed per comparison.
//!
//! Four algorithms, each the core of one match strategy:
//!
//! - [`longest_containment_match`](ReferenceIndex::longest_containment_match):
//!   four-way raw/normalized substring containment, longest entry wins
//! - [`partial_word_alignment`](ReferenceIndex::partial_word_alignment):
//!   consecutive token alignment tolerating truncated words
//! - [`acronym_or_domain_match`](ReferenceIndex::acronym_or_domain_match):
//!   first-letter acronyms and word-overlap against a domain label
//! - [`approximate_search`](ReferenceIndex::approximate_search):
//!   edit-distance ranking with a strict floor

use crate::fuzzy;
use crate::normalize::normalize;

// ── Tuning constants ────────────────────────────────────────────────────
//
// The numeric weights below are empirically tuned on field data and encode
// precision/recall tradeoffs. Do not retune without a calibration corpus.

/// Words shorter than this never contribute an acronym letter.
const ACRONYM_MIN_WORD_LEN: usize = 3;

/// Connectives excluded from acronym derivation.
const ACRONYM_STOP_WORDS: &[&str] = &["and", "the", "for", "of"];

/// Minimum significant words before an acronym is derived at all.
const ACRONYM_MIN_WORDS: usize = 2;

/// Minimum word length for the domain word-overlap fallback.
const DOMAIN_WORD_MIN_LEN: usize = 4;

/// Word-overlap fallback accepts at this many contained words.
const DOMAIN_WORD_MIN_MATCHES: usize = 2;

/// Partial alignment needs `min(4, entry_tokens - 1)` consecutive matches...
const PARTIAL_REQUIRED_TOKENS: usize = 4;

/// ...and coverage of at least this fraction of the entry's tokens.
const PARTIAL_COVERAGE: f64 = 0.7;

/// Score weight per aligned token.
const PARTIAL_TOKEN_WEIGHT: usize = 10;

/// Minimum text tokens left at a start offset for alignment to be attempted.
const PARTIAL_MIN_WINDOW: usize = 3;

// ── Entry ───────────────────────────────────────────────────────────────

/// One reference name with its precomputed comparison forms.
#[derive(Debug, Clone)]
struct Entry {
    raw: String,
    lower: String,
    normalized: String,
    lower_tokens: Vec<String>,
    /// First letters of the significant words, when there are enough of them.
    acronym: Option<String>,
    /// Significant words for the domain word-overlap fallback.
    domain_words: Vec<String>,
}

impl Entry {
    fn new(raw: String) -> Self {
        let lower = raw.to_lowercase();
        let normalized = normalize(&raw);
        let lower_tokens: Vec<String> = lower.split_whitespace().map(str::to_string).collect();

        // Drop punctuation and digits entirely so "xavier's" stays one word.
        let letters_only: String = lower
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
            .collect();
        let acronym_words: Vec<&str> = letters_only
            .split_whitespace()
            .filter(|w| w.len() >= ACRONYM_MIN_WORD_LEN && !ACRONYM_STOP_WORDS.contains(w))
            .collect();
        let acronym = (acronym_words.len() >= ACRONYM_MIN_WORDS).then(|| {
            acronym_words
                .iter()
                .filter_map(|w| w.chars().next())
                .collect()
        });

        let domain_words: Vec<String> = letters_only
            .split_whitespace()
            .filter(|w| w.len() >= DOMAIN_WORD_MIN_LEN)
            .map(str::to_string)
            .collect();

        Self {
            raw,
            lower,
            normalized,
            lower_tokens,
            acronym,
            domain_words,
        }
    }
}

// ── DomainMatchKind ─────────────────────────────────────────────────────

/// How a domain token matched a reference entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainMatchKind {
    /// The token matched the entry's first-letter acronym.
    Acronym,
    /// The token contained enough of the entry's significant words.
    WordOverlap,
}

// ── ReferenceIndex ──────────────────────────────────────────────────────

/// Immutable index over the known institution names.
#[derive(Debug, Clone)]
pub struct ReferenceIndex {
    entries: Vec<Entry>,
}

impl ReferenceIndex {
    /// Build the index from caller-supplied names. Order is preserved:
    /// ties everywhere break toward the first-seen entry.
    pub fn new<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let entries = names.into_iter().map(|n| Entry::new(n.into())).collect();
        Self { entries }
    }

    /// Number of reference names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no names at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the raw reference names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.raw.as_str())
    }

    /// Four-way containment: raw and normalized needle against raw and
    /// normalized haystack, tolerating punctuation variants on either side.
    pub fn contains_substring(needle: &str, haystack: &str) -> bool {
        let needle_lower = needle.to_lowercase();
        let needle_norm = normalize(needle);
        let hay_lower = haystack.to_lowercase();
        let hay_norm = normalize(haystack);
        hay_lower.contains(&needle_lower)
            || hay_norm.contains(&needle_norm)
            || hay_lower.contains(&needle_norm)
            || hay_norm.contains(&needle_lower)
    }

    /// The longest reference name contained verbatim (raw or normalized,
    /// either side) in `text`. Longer names are more specific: a full
    /// institution name outranks a generic fragment that also happens to
    /// match.
    pub fn longest_containment_match(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        let normalized = normalize(text);

        let mut best: Option<&Entry> = None;
        let mut best_len = 0usize;
        for entry in &self.entries {
            let contained = lower.contains(&entry.lower)
                || normalized.contains(&entry.normalized)
                || lower.contains(&entry.normalized)
                || normalized.contains(&entry.lower);
            if contained {
                let len = entry.lower.chars().count();
                if len > best_len {
                    best = Some(entry);
                    best_len = len;
                }
            }
        }
        best.map(|e| e.raw.as_str())
    }

    /// Align consecutive text tokens against each reference name's tokens,
    /// where two tokens match if equal or one is a prefix of the other.
    /// The prefix rule is what lets `"... Smriti Maha"` find
    /// `"... Smriti Mahavidyalaya"`. Accepts an alignment covering at least
    /// `min(4, entry_tokens - 1)` tokens and 70% of the entry; the best
    /// token count across all start offsets and entries wins.
    pub fn partial_word_alignment(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        let text_tokens: Vec<&str> = lower.split_whitespace().collect();
        if text_tokens.len() < PARTIAL_MIN_WINDOW {
            return None;
        }

        let mut best: Option<&Entry> = None;
        let mut best_score = 0usize;
        for entry in &self.entries {
            let entry_tokens = &entry.lower_tokens;
            if entry_tokens.is_empty() {
                continue;
            }

            for start in 0..=(text_tokens.len() - PARTIAL_MIN_WINDOW) {
                let mut matched = 0usize;
                while matched < entry_tokens.len() && start + matched < text_tokens.len() {
                    let text_word = text_tokens[start + matched];
                    let entry_word = entry_tokens[matched].as_str();
                    if text_word == entry_word
                        || entry_word.starts_with(text_word)
                        || text_word.starts_with(entry_word)
                    {
                        matched += 1;
                    } else {
                        break;
                    }
                }

                let required = PARTIAL_REQUIRED_TOKENS.min(entry_tokens.len().saturating_sub(1));
                if matched >= required
                    && matched as f64 >= entry_tokens.len() as f64 * PARTIAL_COVERAGE
                {
                    let score = matched * PARTIAL_TOKEN_WEIGHT;
                    if score > best_score {
                        best = Some(entry);
                        best_score = score;
                    }
                }
            }
        }
        best.map(|e| e.raw.as_str())
    }

    /// Match a cleaned domain token against entry acronyms, falling back to
    /// counting significant entry words contained in the token. First
    /// matching entry wins within each pass; the acronym pass runs over the
    /// whole list before word-overlap is tried at all.
    pub fn acronym_or_domain_match(&self, domain_token: &str) -> Option<(&str, DomainMatchKind)> {
        let token = domain_token.to_lowercase();
        if token.is_empty() {
            return None;
        }

        for entry in &self.entries {
            if let Some(acronym) = &entry.acronym {
                if token == *acronym || token.contains(acronym.as_str()) || acronym.contains(&token)
                {
                    return Some((entry.raw.as_str(), DomainMatchKind::Acronym));
                }
            }
        }

        for entry in &self.entries {
            if entry.domain_words.len() >= DOMAIN_WORD_MIN_MATCHES {
                let contained = entry
                    .domain_words
                    .iter()
                    .filter(|w| token.contains(w.as_str()))
                    .count();
                if contained >= DOMAIN_WORD_MIN_MATCHES {
                    return Some((entry.raw.as_str(), DomainMatchKind::WordOverlap));
                }
            }
        }

        None
    }

    /// Approximate search over the reference list. Only patterns longer than
    /// ten characters are considered; the best-scoring entry is returned only
    /// if it clears the 85% similarity floor.
    pub fn approximate_search(&self, pattern: &str) -> Option<&str> {
        if pattern.chars().count() <= fuzzy::MIN_PATTERN_LEN {
            return None;
        }
        let pattern_lower = pattern.to_lowercase();

        let mut best: Option<&Entry> = None;
        let mut best_score = 0f64;
        for entry in &self.entries {
            let score = fuzzy::best_similarity(&pattern_lower, &entry.lower);
            if score > best_score {
                best = Some(entry);
                best_score = score;
            }
        }

        if best_score >= fuzzy::SIMILARITY_THRESHOLD {
            best.map(|e| e.raw.as_str())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> ReferenceIndex {
        ReferenceIndex::new([
            "Saldiha College",
            "Bhupendra Nath Dutta Smriti Mahavidyalaya",
            "Government College Of Engineering And Textile Technology",
            "Narasinha Dutt College",
            "Jangipur College",
        ])
    }

    // ── Containment ─────────────────────────────────────────────────

    #[test]
    fn containment_finds_entry_in_text() {
        let index = sample_index();
        assert_eq!(
            index.longest_containment_match("Grievance from Saldiha College, Bankura"),
            Some("Saldiha College")
        );
    }

    #[test]
    fn containment_is_case_insensitive() {
        let index = sample_index();
        assert_eq!(
            index.longest_containment_match("from SALDIHA COLLEGE today"),
            Some("Saldiha College")
        );
    }

    #[test]
    fn containment_prefers_longest() {
        let index = ReferenceIndex::new(["Dutt College", "Narasinha Dutt College"]);
        assert_eq!(
            index.longest_containment_match("office of Narasinha Dutt College"),
            Some("Narasinha Dutt College")
        );
    }

    #[test]
    fn containment_matches_normalized_forms() {
        // "Govt." in the text, "Government" in the reference list.
        let index = ReferenceIndex::new(["Government General Degree College"]);
        assert_eq!(
            index.longest_containment_match("Govt. General Degree College, Chapra"),
            Some("Government General Degree College")
        );
    }

    #[test]
    fn containment_none_on_miss() {
        let index = sample_index();
        assert_eq!(index.longest_containment_match("completely unrelated text"), None);
    }

    #[test]
    fn containment_empty_text() {
        let index = sample_index();
        assert_eq!(index.longest_containment_match(""), None);
    }

    // ── Partial alignment ───────────────────────────────────────────

    #[test]
    fn partial_matches_truncated_name() {
        let index = sample_index();
        assert_eq!(
            index.partial_word_alignment("Bhupendra Nath Dutta Smriti Maha"),
            Some("Bhupendra Nath Dutta Smriti Mahavidyalaya")
        );
    }

    #[test]
    fn partial_matches_with_offset() {
        let index = sample_index();
        assert_eq!(
            index.partial_word_alignment("Principal Bhupendra Nath Dutta Smriti Maha"),
            Some("Bhupendra Nath Dutta Smriti Mahavidyalaya")
        );
    }

    #[test]
    fn partial_requires_enough_tokens() {
        let index = sample_index();
        // Two leading words of a five-word name: below both thresholds.
        assert_eq!(index.partial_word_alignment("Bhupendra Nath and others"), None);
    }

    #[test]
    fn partial_short_text_is_skipped() {
        let index = sample_index();
        assert_eq!(index.partial_word_alignment("Bhupendra Nath"), None);
    }

    // ── Acronym / domain ────────────────────────────────────────────

    #[test]
    fn acronym_matches_domain_token() {
        let index = sample_index();
        // government, college, engineering, textile, technology → "gcett"
        let (name, kind) = index.acronym_or_domain_match("gcett").unwrap();
        assert_eq!(name, "Government College Of Engineering And Textile Technology");
        assert_eq!(kind, DomainMatchKind::Acronym);
    }

    #[test]
    fn acronym_matches_when_token_contains_it() {
        let index = sample_index();
        // Campus-qualified domains keep the acronym as a prefix.
        let (name, kind) = index.acronym_or_domain_match("gcettb").unwrap();
        assert_eq!(name, "Government College Of Engineering And Textile Technology");
        assert_eq!(kind, DomainMatchKind::Acronym);
    }

    #[test]
    fn word_overlap_fallback() {
        let index = sample_index();
        let (name, kind) = index.acronym_or_domain_match("narasinhaduttcollege").unwrap();
        assert_eq!(name, "Narasinha Dutt College");
        assert_eq!(kind, DomainMatchKind::WordOverlap);
    }

    #[test]
    fn domain_match_none_for_unrelated_token() {
        let index = sample_index();
        assert_eq!(index.acronym_or_domain_match("zzqqy"), None);
        assert_eq!(index.acronym_or_domain_match(""), None);
    }

    // ── Approximate ─────────────────────────────────────────────────

    #[test]
    fn approximate_matches_misspelling() {
        let index = sample_index();
        assert_eq!(
            index.approximate_search("Narasinha Dut College"),
            Some("Narasinha Dutt College")
        );
    }

    #[test]
    fn approximate_requires_long_pattern() {
        let index = sample_index();
        assert_eq!(index.approximate_search("Saldiha"), None);
    }

    #[test]
    fn approximate_rejects_below_threshold() {
        let index = sample_index();
        assert_eq!(index.approximate_search("Completely Different Name"), None);
    }

    // ── Construction ────────────────────────────────────────────────

    #[test]
    fn empty_index_returns_none_everywhere() {
        let index = ReferenceIndex::new(Vec::<String>::new());
        assert!(index.is_empty());
        assert_eq!(index.longest_containment_match("Saldiha College"), None);
        assert_eq!(index.partial_word_alignment("Saldiha College Bankura"), None);
        assert_eq!(index.acronym_or_domain_match("gcett"), None);
        assert_eq!(index.approximate_search("Saldiha College Bankura"), None);
    }

    #[test]
    fn contains_substring_four_way() {
        assert!(ReferenceIndex::contains_substring(
            "Govt. College",
            "government college of engineering"
        ));
        assert!(ReferenceIndex::contains_substring(
            "Government College",
            "mail from govt. college today"
        ));
        assert!(!ReferenceIndex::contains_substring("Saldiha College", "unrelated"));
    }

    #[test]
    fn duplicates_are_harmless() {
        let index = ReferenceIndex::new(["Saldiha College", "Saldiha College"]);
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.longest_containment_match("Saldiha College"),
            Some("Saldiha College")
        );
    }
}
