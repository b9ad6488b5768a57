//! Candidate gates: keep subject lines, boilerplate, and sentence fragments
//! from ever being returned as institution names.
//!
//! Two gates with different strictness:
//!
//! - [`is_plausible_name`] guards every tier of the resolution pipeline. It
//!   rejects short strings and anything matching the reject-pattern set
//!   (subject-line markers, grievance boilerplate, leading function words).
//! - [`is_extractable_name`] additionally guards the pattern-extraction
//!   fallback, where candidates are built from raw text instead of the
//!   reference list and need a much harder look: casing, stop-word openers,
//!   narrative verbs, address delimiters.
//!
//! The false positive (a wrong or unrelated institution) is the one defect
//! class this engine treats seriously, and these tables are where that
//! suppression lives.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum plausible institution name length (chars).
const MIN_NAME_LEN: usize = 5;

/// Maximum length accepted by the strict extraction gate (chars).
const MAX_NAME_LEN: usize = 100;

// ── Reject patterns (lenient gate) ──────────────────────────────────────

/// Subject-line boilerplate and sentence fragments, matched anywhere unless
/// anchored. Carried over from field data; extend with care, since every
/// addition
/// can suppress a real institution containing the word.
const REJECT_PATTERN_SOURCES: &[&str] = &[
    r"(?i)^(no case|nil|none|zero|null|na|n/a)",
    r"(?i)suspension",
    r"(?i)suspended",
    r"(?i)intimation",
    r"(?i)information",
    r"(?i)regarding",
    r"(?i)report",
    r"(?i)submission",
    r"(?i)attached",
    r"(?i)details",
    r"(?i)data",
    r"(?i)re:",
    r"(?i)fwd:",
    r"(?i)sub:",
    r"(?i)subject:",
    r"(?i)\bcase\b",
    r"(?i)\bofficial\b",
    r"(?i)\bemployee\b",
    r"(?i)^in our ",
    r"(?i)^from ",
    r"(?i)^the ",
];

static REJECT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    REJECT_PATTERN_SOURCES
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

// ── Stop words ──────────────────────────────────────────────────────────

/// Words that terminate backward extraction and disqualify a leading token.
/// Shared by the strict gate and the pattern extractor.
pub(crate) const STOP_WORDS: &[&str] = &[
    "from",
    "principal",
    "teacher",
    "your",
    "kind",
    "attention",
    "dear",
    "sir",
    "madam",
    "report",
    "suspension",
    "status",
    "details",
    "information",
    "regards",
    "thanking",
    "submission",
    "attached",
    "forwarded",
    "fwd",
    "re:",
    "subject",
    "professor",
    "dr",
    "assistant",
    "dpi",
    "director",
    "officer",
    "office",
    "section",
    "updated",
    "regarding",
    "respect",
    "reference",
];

// ── Strict-gate patterns ────────────────────────────────────────────────

static RE_STARTS_UPPER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z0-9]").unwrap());

const STRICT_REJECT_SOURCES: &[&str] = &[
    // Reflexive pronouns: a sentence fragment, not a name.
    r"(?i)ourselves|yourself|himself|herself|themselves",
    // Narrative verbs from grievance prose.
    r"(?i)stuck|loop|blame|shifting|received|updated|regarding",
    // A lone short token before the institution keyword ("Sri College").
    r"(?i)^\w{1,3}\s+(college|mahavidyalaya)",
    // Address delimiters: the extractor grabbed part of a header.
    r"[@<>]",
    r"(?i)^(from|for|at|by|with|the|in|of|and|or|your|kind|attention)\s+",
];

static STRICT_REJECT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    STRICT_REJECT_SOURCES
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

// ── Name cleanup ────────────────────────────────────────────────────────

static RE_LEADING_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(principal|assistant professor|professor|dr\.?|teacher|librarian|superintendent|office|section|dpi|director|officer|tic)\s*[,/\-]?\s*",
    )
    .unwrap()
});

static RE_TRAILING_ROLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*[,\-]\s*(principal|assistant|professor|teacher).*$").unwrap()
});

// ── Gates ───────────────────────────────────────────────────────────────

/// Lenient gate applied to every candidate the pipeline produces.
pub fn is_plausible_name(text: &str) -> bool {
    if text.chars().count() < MIN_NAME_LEN {
        return false;
    }
    !REJECT_PATTERNS.iter().any(|re| re.is_match(text))
}

/// Strict gate for pattern-extracted candidates.
pub fn is_extractable_name(name: &str) -> bool {
    let len = name.chars().count();
    if len < MIN_NAME_LEN || len > MAX_NAME_LEN {
        return false;
    }
    if !RE_STARTS_UPPER.is_match(name) {
        return false;
    }
    let first_word = name
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_lowercase();
    if STOP_WORDS.contains(&first_word.as_str()) {
        return false;
    }
    !STRICT_REJECT_PATTERNS.iter().any(|re| re.is_match(name))
}

/// Strip job titles from either end of a candidate name
/// (`"Principal, Saldiha College"` → `"Saldiha College"`).
pub fn clean_institution_name(name: &str) -> String {
    let cleaned = RE_LEADING_TITLE.replace(name, "");
    RE_TRAILING_ROLE.replace(&cleaned, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Lenient gate ────────────────────────────────────────────────

    #[test]
    fn accepts_real_names() {
        assert!(is_plausible_name("Saldiha College"));
        assert!(is_plausible_name("Bhupendra Nath Dutta Smriti Mahavidyalaya"));
        assert!(is_plausible_name("Government College Of Engineering And Textile Technology"));
    }

    #[test]
    fn rejects_short_strings() {
        assert!(!is_plausible_name(""));
        assert!(!is_plausible_name("abc"));
        assert!(!is_plausible_name("NDC"));
    }

    #[test]
    fn rejects_subject_line_boilerplate() {
        assert!(!is_plausible_name("Re: Suspension Report"));
        assert!(!is_plausible_name("Fwd: Intimation regarding exam"));
        assert!(!is_plausible_name("No case pending in our college"));
        assert!(!is_plausible_name("Submission of enquiry report"));
        assert!(!is_plausible_name("Subject: College Data"));
    }

    #[test]
    fn rejects_leading_function_words() {
        assert!(!is_plausible_name("The institution at Bankura"));
        assert!(!is_plausible_name("From the principal's desk"));
        assert!(!is_plausible_name("In our college campus"));
    }

    #[test]
    fn rejects_word_boundary_patterns() {
        assert!(!is_plausible_name("Disciplinary case file"));
        assert!(!is_plausible_name("Official communication"));
        // "case" only rejects as a whole word.
        assert!(is_plausible_name("Casement Memorial College"));
    }

    // ── Strict gate ─────────────────────────────────────────────────

    #[test]
    fn strict_accepts_real_names() {
        assert!(is_extractable_name("Saldiha College"));
        assert!(is_extractable_name("Netaji Mahavidyalaya"));
    }

    #[test]
    fn strict_requires_uppercase_or_digit_start() {
        assert!(!is_extractable_name("saldiha college"));
        assert!(is_extractable_name("24 Parganas College"));
    }

    #[test]
    fn strict_rejects_stop_word_openers() {
        assert!(!is_extractable_name("Dear Saldiha College"));
        assert!(!is_extractable_name("Principal Saldiha College"));
    }

    #[test]
    fn strict_rejects_narrative_fragments() {
        assert!(!is_extractable_name("Blame Shifting College"));
        assert!(!is_extractable_name("We Received Your College"));
        assert!(!is_extractable_name("Ourselves At College"));
    }

    #[test]
    fn strict_rejects_address_delimiters() {
        assert!(!is_extractable_name("Saldiha College <office@x.in>"));
        assert!(!is_extractable_name("x@y College"));
    }

    #[test]
    fn strict_rejects_short_token_before_keyword() {
        assert!(!is_extractable_name("Sri College"));
        assert!(!is_extractable_name("New Mahavidyalaya"));
        assert!(is_extractable_name("Saldiha College"));
    }

    #[test]
    fn strict_rejects_overlong() {
        let long = "A".repeat(101);
        assert!(!is_extractable_name(&long));
    }

    // ── Cleanup ─────────────────────────────────────────────────────

    #[test]
    fn strips_leading_titles() {
        assert_eq!(clean_institution_name("Principal, Saldiha College"), "Saldiha College");
        assert_eq!(clean_institution_name("Dr. Saldiha College"), "Saldiha College");
        assert_eq!(
            clean_institution_name("Assistant Professor / Netaji Mahavidyalaya"),
            "Netaji Mahavidyalaya"
        );
        assert_eq!(clean_institution_name("TIC, Jangipur College"), "Jangipur College");
    }

    #[test]
    fn strips_trailing_roles() {
        assert_eq!(
            clean_institution_name("Saldiha College, Principal in charge"),
            "Saldiha College"
        );
        assert_eq!(clean_institution_name("Jangipur College - Teacher"), "Jangipur College");
    }

    #[test]
    fn cleanup_is_noop_on_clean_names() {
        assert_eq!(clean_institution_name("Saldiha College"), "Saldiha College");
    }
}
