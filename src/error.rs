//! Rich diagnostic error types for the nivaran loading boundary.
//!
//! Resolution itself never errors: malformed headers, missing `@`, empty
//! strings all degrade to "no match" at the relevant tier. Errors exist only
//! where data enters the process: reference list files, configuration files,
//! and batch input streams. Each error carries a miette `#[diagnostic]` with
//! an error code and help text so users know exactly what went wrong and how
//! to fix it.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the nivaran CLI and loaders.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum NivaranError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Input(#[from] InputError),
}

/// Convenience alias for loading operations.
pub type NivaranResult<T> = std::result::Result<T, NivaranError>;

// ---------------------------------------------------------------------------
// Reference list errors
// ---------------------------------------------------------------------------

/// Errors raised while loading the reference list of institution names.
#[derive(Debug, Error, Diagnostic)]
pub enum ReferenceError {
    #[error("cannot read reference list {}: {message}", path.display())]
    #[diagnostic(
        code(nivaran::reference::read),
        help(
            "Check that the file exists and is readable. The reference list is \
             either newline-separated institution names or a JSON document of \
             the form {{\"colleges\": [\"...\"]}}."
        )
    )]
    Read { path: PathBuf, message: String },

    #[error("cannot parse reference list {}: {message}", path.display())]
    #[diagnostic(
        code(nivaran::reference::parse),
        help(
            "A file starting with '{{' is parsed as JSON and must contain a \
             top-level \"colleges\" array of strings. Anything else is read as \
             one institution name per line."
        )
    )]
    Parse { path: PathBuf, message: String },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors raised while loading or validating resolver configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("cannot read config {}: {message}", path.display())]
    #[diagnostic(
        code(nivaran::config::read),
        help("Check that the TOML config file exists and is readable.")
    )]
    Read { path: PathBuf, message: String },

    #[error("cannot parse config {}: {message}", path.display())]
    #[diagnostic(
        code(nivaran::config::parse),
        help(
            "The config file must be TOML. Recognized keys: content_scan_limit, \
             subject_priority_min_len."
        )
    )]
    Parse { path: PathBuf, message: String },

    #[error("invalid configuration: {message}")]
    #[diagnostic(
        code(nivaran::config::invalid),
        help("Both content_scan_limit and subject_priority_min_len must be non-zero.")
    )]
    Invalid { message: String },

    #[error("missing required argument: {what}")]
    #[diagnostic(
        code(nivaran::config::missing),
        help("Pass --reference <FILE> pointing at the institution name list.")
    )]
    Missing { what: String },
}

// ---------------------------------------------------------------------------
// Batch input errors
// ---------------------------------------------------------------------------

/// Errors raised while reading or writing batch email streams.
#[derive(Debug, Error, Diagnostic)]
pub enum InputError {
    #[error("cannot read input {}: {message}", path.display())]
    #[diagnostic(
        code(nivaran::input::read),
        help("Check that the JSONL input file exists and is readable.")
    )]
    Read { path: PathBuf, message: String },

    #[error("malformed email record on line {line}: {message}")]
    #[diagnostic(
        code(nivaran::input::malformed),
        help(
            "Each input line must be a JSON object with a \"sender\" field and \
             optional \"subject\" and \"content\" fields."
        )
    )]
    Malformed { line: usize, message: String },

    #[error("cannot write output {}: {message}", path.display())]
    #[diagnostic(
        code(nivaran::input::write),
        help("Check that the output location is writable.")
    )]
    Write { path: PathBuf, message: String },
}
