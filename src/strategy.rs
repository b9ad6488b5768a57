//! Match strategies: the independent algorithms over the reference index,
//! dispatched in a fixed priority list.
//!
//! The original heuristic logic was nested conditionals across four loosely
//! related tactics; here each tactic is a [`MatchStrategy`] so it can be
//! tested in isolation and the orchestrator's priority order is data, not
//! control flow.

use serde::{Deserialize, Serialize};

use crate::reference::{DomainMatchKind, ReferenceIndex};

// ── MatchKind ───────────────────────────────────────────────────────────

/// Which algorithm produced a resolved name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchKind {
    /// Verbatim substring containment of a reference name.
    Exact,
    /// Consecutive-token alignment against a truncated name.
    Partial,
    /// Domain token matched a reference name's acronym.
    Acronym,
    /// Domain token contained enough reference name words.
    DomainToken,
    /// Edit-distance match above the similarity floor.
    Approximate,
    /// Accepted text that is not itself a reference entry (sender keyword
    /// heuristic, domain reconstruction, pattern fallback).
    Heuristic,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Partial => write!(f, "partial"),
            Self::Acronym => write!(f, "acronym"),
            Self::DomainToken => write!(f, "domain-token"),
            Self::Approximate => write!(f, "approximate"),
            Self::Heuristic => write!(f, "heuristic"),
        }
    }
}

impl From<DomainMatchKind> for MatchKind {
    fn from(kind: DomainMatchKind) -> Self {
        match kind {
            DomainMatchKind::Acronym => Self::Acronym,
            DomainMatchKind::WordOverlap => Self::DomainToken,
        }
    }
}

// ── MatchStrategy ───────────────────────────────────────────────────────

/// A single matching tactic over the reference index.
pub trait MatchStrategy: Sync {
    /// Short name for tracing.
    fn name(&self) -> &'static str;

    /// Attempt to match `text` against the index.
    fn attempt(&self, index: &ReferenceIndex, text: &str) -> Option<(String, MatchKind)>;
}

/// Exact substring containment, longest reference name first.
pub struct ExactContainment;

impl MatchStrategy for ExactContainment {
    fn name(&self) -> &'static str {
        "exact-containment"
    }

    fn attempt(&self, index: &ReferenceIndex, text: &str) -> Option<(String, MatchKind)> {
        index
            .longest_containment_match(text)
            .map(|name| (name.to_string(), MatchKind::Exact))
    }
}

/// Truncated-name alignment over consecutive tokens.
pub struct PartialAlignment;

impl MatchStrategy for PartialAlignment {
    fn name(&self) -> &'static str {
        "partial-alignment"
    }

    fn attempt(&self, index: &ReferenceIndex, text: &str) -> Option<(String, MatchKind)> {
        index
            .partial_word_alignment(text)
            .map(|name| (name.to_string(), MatchKind::Partial))
    }
}

/// Acronym and word-overlap matching for domain tokens.
pub struct AcronymDomain;

impl MatchStrategy for AcronymDomain {
    fn name(&self) -> &'static str {
        "acronym-domain"
    }

    fn attempt(&self, index: &ReferenceIndex, text: &str) -> Option<(String, MatchKind)> {
        index
            .acronym_or_domain_match(text)
            .map(|(name, kind)| (name.to_string(), kind.into()))
    }
}

/// Edit-distance search with the strict similarity floor.
pub struct ApproximateSearch;

impl MatchStrategy for ApproximateSearch {
    fn name(&self) -> &'static str {
        "approximate-search"
    }

    fn attempt(&self, index: &ReferenceIndex, text: &str) -> Option<(String, MatchKind)> {
        index
            .approximate_search(text)
            .map(|name| (name.to_string(), MatchKind::Approximate))
    }
}

// ── Dispatch ────────────────────────────────────────────────────────────

/// The strategies tried against free text (sender, subject), in priority
/// order: containment is more specific than alignment, so it goes first.
pub fn text_strategies() -> &'static [&'static dyn MatchStrategy] {
    static STRATEGIES: [&(dyn MatchStrategy); 2] = [&ExactContainment, &PartialAlignment];
    &STRATEGIES
}

/// Run strategies in order, returning the first hit.
pub fn run_in_order(
    strategies: &[&dyn MatchStrategy],
    index: &ReferenceIndex,
    text: &str,
) -> Option<(String, MatchKind)> {
    for strategy in strategies {
        if let Some(hit) = strategy.attempt(index, text) {
            tracing::trace!(strategy = strategy.name(), name = %hit.0, "strategy hit");
            return Some(hit);
        }
    }
    None
}
