//! Sender ("From") header dissection.
//!
//! Input is the raw header value as stored upstream, either
//! `"Display Name" <user@domain>` or a bare address. Parsing is defensive
//! throughout: missing angle brackets, missing `@`, or empty strings yield
//! `None` fields rather than errors.

use std::sync::LazyLock;

use regex::Regex;

/// Free-mail providers whose domains never identify an institution.
pub const FREE_MAIL_PROVIDERS: &[&str] = &["gmail", "yahoo", "outlook", "hotmail", "rediffmail"];

static RE_TLD_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(com|org|edu|ac\.in|in|gov|co\.in)$").unwrap());

static RE_EDU_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\.(edu)$").unwrap());

// ── SenderParts ─────────────────────────────────────────────────────────

/// The dissected pieces of a From header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenderParts {
    /// Display name before the angle bracket, quotes stripped.
    pub display_name: Option<String>,
    /// Bare address, from inside `<...>` or the whole header if it holds `@`.
    pub address: Option<String>,
    /// Domain after `@`, lower-cased.
    pub domain: Option<String>,
}

/// Split a raw From header into display name, address, and domain.
pub fn parse_sender(sender: &str) -> SenderParts {
    let trimmed = sender.trim();
    if trimmed.is_empty() {
        return SenderParts::default();
    }

    let (display_name, address) = match trimmed.find('<') {
        Some(lt) => {
            let name = trimmed[..lt].trim().trim_matches(['"', '\'']).trim();
            let rest = &trimmed[lt + 1..];
            let addr = match rest.find('>') {
                Some(gt) => rest[..gt].trim(),
                // Unclosed bracket: take everything after '<'.
                None => rest.trim(),
            };
            (
                (!name.is_empty()).then(|| name.to_string()),
                (!addr.is_empty()).then(|| addr.to_string()),
            )
        }
        None if trimmed.contains('@') => (None, Some(trimmed.to_string())),
        None => ((!trimmed.is_empty()).then(|| trimmed.to_string()), None),
    };

    let domain = address
        .as_deref()
        .and_then(|a| a.rsplit_once('@'))
        .map(|(_, d)| d.to_lowercase())
        .filter(|d| !d.is_empty());

    SenderParts {
        display_name,
        address,
        domain,
    }
}

// ── Domain helpers ──────────────────────────────────────────────────────

/// Strip the generic TLD/country suffix, then a residual `.edu`
/// (handles `xyz.edu.in` in two steps).
pub fn strip_tld(domain: &str) -> String {
    let once = RE_TLD_SUFFIX.replace(domain, "");
    RE_EDU_SUFFIX.replace(&once, "").into_owned()
}

/// Whether a cleaned domain belongs to a free-mail provider.
pub fn is_free_mail(clean_domain: &str) -> bool {
    FREE_MAIL_PROVIDERS.contains(&clean_domain)
}

/// The label before the first dot (`"gcettb.ac.in"` → `"gcettb"`).
pub fn leading_label(domain: &str) -> &str {
    domain.split('.').next().unwrap_or(domain)
}

/// Title-case a domain label on `-`/`_` separators
/// (`"netaji-mahavidyalaya"` → `"Netaji Mahavidyalaya"`).
pub fn titlecase_label(label: &str) -> String {
    label
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
