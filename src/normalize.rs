//! Text canonicalization ahead of any reference comparison.
//!
//! `normalize()` is the single entry point every matching tier funnels text
//! through: NFC unicode normalization, lower-casing, and expansion of the
//! fixed abbreviation set seen in grievance mail from the field
//! (`govt.` → `government`, `r.s.` → the spelled-out founder name, etc.).
//! No stemming, no punctuation stripping beyond what the abbreviation rules
//! imply. Pure and idempotent: `normalize(normalize(x)) == normalize(x)`.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

// ── Abbreviation rules ──────────────────────────────────────────────────

static RE_GOVT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bgovt\b\.?").unwrap());

static RE_DR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bdr\b\.?").unwrap());

static RE_ST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bst\b\.?").unwrap());

static RE_PROF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bprof\b\.?").unwrap());

static RE_BED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bb\.\s*ed\.?").unwrap());

static RE_RS_DOTTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\br\.s\.?").unwrap());

static RE_RS_SPACED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\br\s+s\b").unwrap());

/// One abbreviation expansion: pattern over lower-cased text → long form.
struct AbbreviationRule {
    pattern: &'static LazyLock<Regex>,
    expansion: &'static str,
}

/// The fixed abbreviation set. Expansions must not themselves contain any
/// pattern from this table, or idempotence breaks.
const ABBREVIATION_RULES: &[AbbreviationRule] = &[
    AbbreviationRule { pattern: &RE_GOVT, expansion: "government" },
    AbbreviationRule { pattern: &RE_DR, expansion: "doctor" },
    AbbreviationRule { pattern: &RE_ST, expansion: "saint" },
    AbbreviationRule { pattern: &RE_PROF, expansion: "professor" },
    AbbreviationRule { pattern: &RE_BED, expansion: "bed" },
    AbbreviationRule { pattern: &RE_RS_DOTTED, expansion: "rabindra satabarsiki" },
    AbbreviationRule { pattern: &RE_RS_SPACED, expansion: "rabindra satabarsiki" },
];

// ── normalize ───────────────────────────────────────────────────────────

/// Canonicalize `text` for comparison: NFC, lower-case, expand abbreviations.
pub fn normalize(text: &str) -> String {
    let mut out: String = text.nfc().collect::<String>().to_lowercase();
    for rule in ABBREVIATION_RULES {
        if rule.pattern.is_match(&out) {
            out = rule.pattern.replace_all(&out, rule.expansion).into_owned();
        }
    }
    out
}
