//! Pattern extraction: the fallback when no database tier matches, plus the
//! candidate harvest feeding approximate search.
//!
//! Two related passes over the same raw material:
//!
//! - [`harvest_patterns`] collects loosely plausible name candidates from the
//!   sender field and keyword-adjacent runs in the body. These are *not*
//!   returned to callers; they are scored against the reference list by the
//!   approximate tier.
//! - [`extract_fallback`] builds one best-effort name directly from the text:
//!   locate an institution keyword, walk backward through the preceding
//!   capitalized tokens, stop at the first stop word. Its output faces the
//!   strict validator before anything downstream sees it.

use std::sync::LazyLock;

use regex::Regex;

use crate::header::{self, parse_sender};
use crate::validate::{STOP_WORDS, is_extractable_name};

/// How far (chars) before a keyword the capitalized-run search looks.
const EXTRACT_WINDOW_CHARS: usize = 150;

/// Harvested sender candidates must exceed this length (chars).
const HARVEST_MIN_SENDER_LEN: usize = 5;

/// Harvested content candidates must exceed this length (chars).
const HARVEST_MIN_CONTENT_LEN: usize = 8;

/// Keywords anchoring the backward capitalized-token walk in body text.
const EXTRACTION_KEYWORDS: &[&str] = &[
    "mahavidyalaya",
    "college",
    "university",
    "institute",
    "vidyalaya",
    "vidyabhaban",
];

/// Wider keyword set for the harvest pass.
const HARVEST_KEYWORDS: &[&str] = &[
    "mahavidyalaya",
    "college",
    "university",
    "institute",
    "vidyalaya",
    "vidyabhaban",
    "mahavidyamandir",
    "mahavidyapith",
];

// ── Regexes ─────────────────────────────────────────────────────────────

static RE_HARVEST_SENDER_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(mahavidyalaya|college|university|institute|vidyalaya|vidyabhaban|mahavidyamandir|mahila|mahavidyapith)\b",
    )
    .unwrap()
});

static RE_FALLBACK_SENDER_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(mahavidyalaya|college|university|institute|vidyalaya|vidyabhaban|mission)\b")
        .unwrap()
});

static RE_READABLE_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(college|university|institute)\b").unwrap());

static RE_TITLE_COMMA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(principal|assistant|professor|dr|teacher|librarian|superintendent|office|section|dpi|director|officer|tic)\s*[,/]\s*",
    )
    .unwrap()
});

static RE_HARVEST_TITLE_COMMA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(principal|assistant|professor|dr|teacher|librarian|superintendent|office|director|officer|tic)\s*[,/]\s*",
    )
    .unwrap()
});

static RE_HARVEST_TITLE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(principal|from|teacher|assistant|your|kind|attention|dr\.?|prof\.?)\s+")
        .unwrap()
});

static RE_ANGLE_ADDRESS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static RE_TRAILING_ROLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*[-,]\s*(principal|assistant|professor|teacher).*$").unwrap()
});

static RE_LEADING_FILLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(The|From|For|At|By|Your|Kind|Attention)\s+").unwrap());

static RE_LEADING_THE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^The\s+").unwrap());

/// Capitalized run immediately before a keyword. Case-sensitive on purpose:
/// the fallback only trusts properly cased names.
static RE_CAPITAL_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][a-zA-Z.']+(?:\s+[A-Z][a-zA-Z.']+){0,8})\s*$").unwrap());

static STOP_WORD_PREFIXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    STOP_WORDS
        .iter()
        .map(|sw| Regex::new(&format!(r"(?i)^{}\s+", regex::escape(sw))).unwrap())
        .collect()
});

static HARVEST_CONTENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    HARVEST_KEYWORDS
        .iter()
        .map(|kw| {
            // Under (?i) the character classes accept any casing; the harvest
            // pass is deliberately looser than the fallback walk.
            Regex::new(&format!(
                r"(?i)\b([A-Z][a-zA-Z.']+(?:\s+[A-Z][a-zA-Z.']+){{1,8}})\s+{kw}\b"
            ))
            .unwrap()
        })
        .collect()
});

static EXTRACTION_KEYWORD_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    EXTRACTION_KEYWORDS
        .iter()
        .map(|kw| Regex::new(&format!(r"(?i)\b{kw}\b")).unwrap())
        .collect()
});

// ── Harvest ─────────────────────────────────────────────────────────────

/// Collect candidate name patterns from the sender field and body for the
/// approximate tier. Loose by design; every pattern is re-scored against the
/// reference list before anything is accepted.
pub fn harvest_patterns(sender: &str, content: &str) -> Vec<String> {
    let mut patterns = Vec::new();

    // Sender field, with or without angle brackets.
    let parts = parse_sender(sender);
    // A bare address may still carry name words; use it whole.
    let sender_name = parts
        .display_name
        .unwrap_or_else(|| sender.trim().to_string());

    if !sender_name.is_empty() {
        if RE_HARVEST_SENDER_KEYWORD.is_match(&sender_name) {
            let cleaned = RE_HARVEST_TITLE_COMMA.replace(&sender_name, "");
            let cleaned = RE_HARVEST_TITLE_PREFIX.replace(&cleaned, "");
            let cleaned = RE_ANGLE_ADDRESS.replace_all(&cleaned, "");
            let cleaned = cleaned.trim();
            if cleaned.chars().count() > HARVEST_MIN_SENDER_LEN {
                patterns.push(cleaned.to_string());
            }
        }

        if !sender_name.contains('@') && sender_name.chars().count() > HARVEST_MIN_SENDER_LEN {
            patterns.push(sender_name.trim().to_string());
        }
    }

    // Word runs before institution keywords in the body.
    for pattern in HARVEST_CONTENT_PATTERNS.iter() {
        for m in pattern.find_iter(content) {
            let extracted = RE_LEADING_FILLER.replace(m.as_str(), "");
            let extracted = extracted.trim();
            if extracted.chars().count() > HARVEST_MIN_CONTENT_LEN {
                patterns.push(extracted.to_string());
            }
        }
    }

    patterns
}

// ── Fallback extraction ─────────────────────────────────────────────────

/// Extract one institution name directly from the text, without the
/// reference list. Tries the sender display name, then the domain, then a
/// backward walk from body keywords. Every result has passed the strict
/// validator; `None` means nothing survived it.
pub fn extract_fallback(sender: &str, content: &str) -> Option<String> {
    let parts = parse_sender(sender);

    // Sender display name carrying an institution keyword.
    if let Some(display) = &parts.display_name {
        if RE_FALLBACK_SENDER_KEYWORD.is_match(display) {
            let mut name = RE_TITLE_COMMA.replace(display, "").into_owned();
            for prefix in STOP_WORD_PREFIXES.iter() {
                name = prefix.replace(&name, "").into_owned();
            }
            let name = RE_TRAILING_ROLE.replace(&name, "");
            let name = name.trim();
            if is_extractable_name(name) {
                return Some(name.to_string());
            }
        }
    }

    // Institutional domain, reconstructed as a readable name.
    if let Some(domain) = &parts.domain {
        let clean = header::strip_tld(domain);
        if !clean.is_empty() && !header::is_free_mail(&clean) {
            let readable = header::titlecase_label(header::leading_label(&clean));
            if is_extractable_name(&readable) && RE_READABLE_KEYWORD.is_match(&readable) {
                return Some(readable);
            }
        }
    }

    // Backward walk from each keyword occurrence in the body.
    for pattern in EXTRACTION_KEYWORD_PATTERNS.iter() {
        for m in pattern.find_iter(content) {
            let window_start = content[..m.start()]
                .char_indices()
                .rev()
                .nth(EXTRACT_WINDOW_CHARS - 1)
                .map(|(i, _)| i)
                .unwrap_or(0);
            let before = &content[window_start..m.start()];

            let Some(caps) = RE_CAPITAL_RUN.captures(before) else {
                continue;
            };
            let run = caps.get(1).map(|g| g.as_str()).unwrap_or("");

            // Walk backward, stop at the first stop word.
            let words: Vec<&str> = run.split_whitespace().collect();
            let mut kept: Vec<&str> = Vec::new();
            for &word in words.iter().rev() {
                let bare: String = word
                    .to_lowercase()
                    .chars()
                    .filter(|c| *c != '.' && *c != '\'')
                    .collect();
                if STOP_WORDS.contains(&bare.as_str()) {
                    break;
                }
                kept.insert(0, word);
            }
            if kept.is_empty() {
                continue;
            }

            let candidate = format!("{} {}", kept.join(" "), m.as_str());
            let candidate = RE_LEADING_THE.replace(&candidate, "");
            let candidate = candidate.trim();
            if is_extractable_name(candidate) {
                return Some(candidate.to_string());
            }
        }
    }

    None
}
