//! # nivaran
//!
//! Institution name resolution for grievance email triage: given an email's
//! `(sender, subject, content)` and a reference list of known institution
//! names, find which institution sent it, or say "unresolved" rather than
//! guess.
//!
//! ## Architecture
//!
//! - **Normalizer** (`normalize`): lower-casing + fixed abbreviation expansion
//! - **Reference index** (`reference`): containment, partial-alignment,
//!   acronym, and approximate lookups over the known names
//! - **Validator** (`validate`): the rejection gates that keep subject lines
//!   and sentence fragments from masquerading as institutions
//! - **Strategies** (`strategy`): the matching algorithms as independently
//!   testable units in a fixed priority list
//! - **Orchestrator** (`resolve`): seven short-circuiting tiers across
//!   sender, domain, content, and subject
//! - **Pattern extractor** (`extract`): keyword-anchored fallback when the
//!   reference list has nothing to offer
//!
//! The engine is a pure function of its inputs plus the immutable reference
//! index: no I/O, no locks, no errors at resolution time. Batch resolution
//! fans out across threads with identical results.
//!
//! ## Library usage
//!
//! ```
//! use nivaran::reference::ReferenceIndex;
//! use nivaran::resolve::{EmailInput, Resolver};
//!
//! let index = ReferenceIndex::new(["Narasinha Dutt College"]);
//! let resolver = Resolver::new(index);
//!
//! let email = EmailInput {
//!     sender: "\"Principal, Narasinha Dutt College\" <principal@ndc.ac.in>".into(),
//!     subject: "Enrollment data".into(),
//!     content: String::new(),
//! };
//! let resolution = resolver.resolve(&email).unwrap();
//! assert_eq!(resolution.name, "Narasinha Dutt College");
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod fuzzy;
pub mod header;
pub mod normalize;
pub mod reference;
pub mod resolve;
pub mod strategy;
pub mod validate;

pub use config::ResolverConfig;
pub use error::{ConfigError, InputError, NivaranError, NivaranResult, ReferenceError};
pub use reference::ReferenceIndex;
pub use resolve::{EmailInput, Resolution, Resolver, SourceTier};
pub use strategy::MatchKind;
