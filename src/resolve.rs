//! Resolution orchestrator: ordered, short-circuiting tiers over the three
//! text sources of an email.
//!
//! # Tier order
//!
//! 1. Sender display-name heuristic (keyword + title stripping)
//! 2. Sender via reference index (subject first when its match is long)
//! 3. Domain heuristic (acronym / word overlap / readable reconstruction)
//! 4. Content scan, first 1000 chars only
//! 5. Subject scan
//! 6. Approximate search over harvested patterns
//! 7. Pattern-extraction fallback, strictly validated
//!
//! Sender outranks content because a forwarded grievance email's body often
//! references a *different* institution than the one the sender represents;
//! the bounded content scan further limits that risk. Every candidate from
//! every tier passes the validator. No tier fabricates: an unresolved email
//! yields `None`, which callers must treat as a legitimate outcome.

use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ResolverConfig;
use crate::extract::{extract_fallback, harvest_patterns};
use crate::header::{self, parse_sender};
use crate::reference::ReferenceIndex;
use crate::strategy::{
    AcronymDomain, ApproximateSearch, ExactContainment, MatchKind, MatchStrategy, run_in_order,
    text_strategies,
};
use crate::validate::{clean_institution_name, is_plausible_name};

/// Sender-heuristic and fallback names must exceed this length (chars).
const MIN_ACCEPTED_NAME_LEN: usize = 5;

// ── Keyword regexes ─────────────────────────────────────────────────────

/// The full institution keyword alternation for sender display names,
/// including spelling variants seen in the wild.
static RE_SENDER_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(bed college|b\.ed|mahavidyal[aey]+[ay]*|college|university|institute|vidyal[aey]+[ay]*|vidyabhaban|mahavidyamandir|mahavidyapith|mission)\b",
    )
    .unwrap()
});

/// Keywords a reconstructed domain name must carry to be believed.
static RE_DOMAIN_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(college|university|institute)\b").unwrap());

/// Keywords a fallback-extracted name must carry to be believed.
static RE_FALLBACK_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(college|mahavidyalaya|university|institute|vidyabhaban)\b").unwrap()
});

// ── Types ───────────────────────────────────────────────────────────────

/// Which text source a resolution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceTier {
    Sender,
    Domain,
    Content,
    Subject,
    Pattern,
}

impl std::fmt::Display for SourceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sender => write!(f, "sender"),
            Self::Domain => write!(f, "domain"),
            Self::Content => write!(f, "content"),
            Self::Subject => write!(f, "subject"),
            Self::Pattern => write!(f, "pattern"),
        }
    }
}

/// A resolved institution name and how it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// The institution name.
    pub name: String,
    /// Which algorithm produced the match.
    pub kind: MatchKind,
    /// Which text source it came from.
    pub tier: SourceTier,
}

/// One email's metadata, as handed over by the ingestion side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailInput {
    /// Raw "From" header: `"Display Name" <user@domain>` or a bare address.
    pub sender: String,
    /// Subject line, possibly empty.
    #[serde(default)]
    pub subject: String,
    /// Plain-text body, possibly empty.
    #[serde(default)]
    pub content: String,
}

// ── Resolver ────────────────────────────────────────────────────────────

/// The resolution engine: an immutable reference index plus tier logic.
///
/// Stateless per call: resolving different emails from multiple threads
/// needs no locking, only a shared `&Resolver`.
#[derive(Debug, Clone)]
pub struct Resolver {
    index: ReferenceIndex,
    config: ResolverConfig,
}

impl Resolver {
    /// Build a resolver with default configuration.
    pub fn new(index: ReferenceIndex) -> Self {
        Self::with_config(index, ResolverConfig::default())
    }

    /// Build a resolver with explicit configuration.
    pub fn with_config(index: ReferenceIndex, config: ResolverConfig) -> Self {
        Self { index, config }
    }

    /// The underlying reference index.
    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    /// Resolve one email to its issuing institution, or `None`.
    pub fn resolve(&self, email: &EmailInput) -> Option<Resolution> {
        self.resolve_parts(&email.sender, &email.subject, &email.content)
    }

    /// Resolve from the raw parts. All inputs may be empty or malformed;
    /// this never panics and never errors.
    pub fn resolve_parts(&self, sender: &str, subject: &str, content: &str) -> Option<Resolution> {
        if self.index.is_empty() {
            return None;
        }

        let parts = parse_sender(sender);

        // Tier 1: sender display name that is itself an institution name.
        if let Some(display) = &parts.display_name {
            if RE_SENDER_KEYWORD.is_match(display) {
                let cleaned = clean_institution_name(display);
                if is_plausible_name(&cleaned)
                    && cleaned.chars().count() > MIN_ACCEPTED_NAME_LEN
                {
                    debug!(name = %cleaned, "resolved via sender heuristic");
                    return Some(Resolution {
                        name: cleaned,
                        kind: MatchKind::Heuristic,
                        tier: SourceTier::Sender,
                    });
                }
            }
        }

        // Tier 2: sender display name against the reference index. A subject
        // match is preferred first, but only when its resolved name is long
        // enough to be specific.
        if let Some(display) = &parts.display_name {
            if !subject.is_empty() {
                if let Some((name, kind)) = run_in_order(text_strategies(), &self.index, subject) {
                    if name.chars().count() > self.config.subject_priority_min_len
                        && is_plausible_name(&name)
                    {
                        debug!(name = %name, %kind, "resolved via long subject match");
                        return Some(Resolution {
                            name: clean_institution_name(&name),
                            kind,
                            tier: SourceTier::Subject,
                        });
                    }
                }
            }

            if let Some((name, kind)) = run_in_order(text_strategies(), &self.index, display) {
                if is_plausible_name(&name) {
                    debug!(name = %name, %kind, "resolved via sender index match");
                    return Some(Resolution {
                        name: clean_institution_name(&name),
                        kind,
                        tier: SourceTier::Sender,
                    });
                }
            }
        }

        // Tier 3: email domain.
        if let Some(resolution) = self.resolve_domain(&parts) {
            return Some(resolution);
        }

        // Tier 4: body text, first `content_scan_limit` chars only.
        let preview = truncate_chars(content, self.config.content_scan_limit);
        if let Some((name, kind)) = ExactContainment.attempt(&self.index, preview) {
            if is_plausible_name(&name) {
                debug!(name = %name, "resolved via content scan");
                return Some(Resolution {
                    name: clean_institution_name(&name),
                    kind,
                    tier: SourceTier::Content,
                });
            }
        }

        // Tier 5: subject line, last database-backed containment attempt.
        if !subject.is_empty() {
            if let Some((name, kind)) = ExactContainment.attempt(&self.index, subject) {
                if is_plausible_name(&name) {
                    debug!(name = %name, "resolved via subject scan");
                    return Some(Resolution {
                        name: clean_institution_name(&name),
                        kind,
                        tier: SourceTier::Subject,
                    });
                }
            }
        }

        // Tier 6: approximate search over harvested candidate patterns.
        for pattern in harvest_patterns(sender, content) {
            if let Some((name, kind)) = ApproximateSearch.attempt(&self.index, &pattern) {
                if is_plausible_name(&name) {
                    debug!(name = %name, %pattern, "resolved via approximate search");
                    return Some(Resolution {
                        name: clean_institution_name(&name),
                        kind,
                        tier: SourceTier::Pattern,
                    });
                }
            }
        }

        // Tier 7: pattern-extraction fallback, strictly validated.
        if let Some(extracted) = extract_fallback(sender, content) {
            if extracted.chars().count() > MIN_ACCEPTED_NAME_LEN && is_plausible_name(&extracted) {
                let cleaned = clean_institution_name(&extracted);
                if cleaned.chars().count() > MIN_ACCEPTED_NAME_LEN
                    && RE_FALLBACK_KEYWORD.is_match(&cleaned)
                {
                    debug!(name = %cleaned, "resolved via pattern fallback");
                    return Some(Resolution {
                        name: cleaned,
                        kind: MatchKind::Heuristic,
                        tier: SourceTier::Pattern,
                    });
                }
            }
        }

        None
    }

    /// Resolve many emails in parallel. Order is preserved; results are
    /// identical to calling [`resolve`](Self::resolve) sequentially.
    pub fn resolve_batch(&self, emails: &[EmailInput]) -> Vec<Option<Resolution>> {
        emails.par_iter().map(|email| self.resolve(email)).collect()
    }

    /// Tier 3: acronym and word-overlap matching on the cleaned domain, then
    /// its leading label; finally a title-cased reconstruction accepted only
    /// when it reads like an institution.
    fn resolve_domain(&self, parts: &header::SenderParts) -> Option<Resolution> {
        let domain = parts.domain.as_deref()?;
        let clean = header::strip_tld(domain);
        if clean.is_empty() || header::is_free_mail(&clean) {
            return None;
        }

        if let Some((name, kind)) = AcronymDomain.attempt(&self.index, &clean) {
            if is_plausible_name(&name) {
                debug!(name = %name, domain = %clean, "resolved via domain match");
                return Some(Resolution {
                    name: clean_institution_name(&name),
                    kind,
                    tier: SourceTier::Domain,
                });
            }
        }

        let label = header::leading_label(&clean);
        if label != clean {
            if let Some((name, kind)) = AcronymDomain.attempt(&self.index, label) {
                if is_plausible_name(&name) {
                    debug!(name = %name, domain = %label, "resolved via domain label match");
                    return Some(Resolution {
                        name: clean_institution_name(&name),
                        kind,
                        tier: SourceTier::Domain,
                    });
                }
            }
        }

        let readable = header::titlecase_label(label);
        if RE_DOMAIN_KEYWORD.is_match(&readable) && is_plausible_name(&readable) {
            debug!(name = %readable, "resolved via domain reconstruction");
            return Some(Resolution {
                name: clean_institution_name(&readable),
                kind: MatchKind::Heuristic,
                tier: SourceTier::Domain,
            });
        }

        None
    }
}

/// First `limit` chars of `text`, on a char boundary.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
