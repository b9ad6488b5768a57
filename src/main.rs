//! nivaran CLI: resolve issuing institutions from email metadata.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde::Deserialize;

use nivaran::config::ResolverConfig;
use nivaran::error::{ConfigError, InputError, ReferenceError};
use nivaran::reference::ReferenceIndex;
use nivaran::resolve::{EmailInput, Resolution, Resolver};

#[derive(Parser)]
#[command(name = "nivaran", version, about = "Institution name resolution for grievance email triage")]
struct Cli {
    /// Reference list: newline-separated names, or JSON {"colleges": [...]}.
    #[arg(long, global = true)]
    reference: Option<PathBuf>,

    /// Resolver configuration (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a single email given on the command line.
    Resolve {
        /// Raw "From" header.
        #[arg(long)]
        sender: String,

        /// Subject line.
        #[arg(long, default_value = "")]
        subject: String,

        /// Plain-text body.
        #[arg(long, default_value = "")]
        content: String,

        /// Read the body from a file instead of --content.
        #[arg(long, conflicts_with = "content")]
        content_file: Option<PathBuf>,

        /// Emit the resolution as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Resolve a JSONL stream of emails, in parallel.
    Batch {
        /// Input file: one JSON email object per line.
        #[arg(long)]
        input: PathBuf,

        /// Output file (default: stdout).
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show reference list statistics.
    Info,
}

/// JSON shape of the upstream reference endpoint.
#[derive(Deserialize)]
struct ReferenceFile {
    colleges: Vec<String>,
}

/// One line of batch output.
#[derive(serde::Serialize)]
struct BatchRecord<'a> {
    sender: &'a str,
    subject: &'a str,
    institution: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<nivaran::MatchKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tier: Option<nivaran::SourceTier>,
}

fn load_reference(path: &Path) -> Result<Vec<String>, ReferenceError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ReferenceError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if raw.trim_start().starts_with('{') {
        let parsed: ReferenceFile =
            serde_json::from_str(&raw).map_err(|e| ReferenceError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(parsed.colleges)
    } else {
        Ok(raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }
}

fn load_emails(path: &Path) -> Result<Vec<EmailInput>, InputError> {
    let raw = std::fs::read_to_string(path).map_err(|e| InputError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| InputError::Malformed {
                line: i + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

fn build_resolver(cli: &Cli) -> Result<Resolver> {
    let reference_path = cli.reference.as_deref().ok_or_else(|| ConfigError::Missing {
        what: "--reference".to_string(),
    })?;
    let names = load_reference(reference_path)?;
    tracing::info!(count = names.len(), "reference list loaded");

    let config = match &cli.config {
        Some(path) => ResolverConfig::from_toml_path(path)?,
        None => ResolverConfig::default(),
    };

    Ok(Resolver::with_config(ReferenceIndex::new(names), config))
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Resolve {
            sender,
            subject,
            content,
            content_file,
            json,
        } => {
            let resolver = build_resolver(&cli)?;
            let body = match content_file {
                Some(path) => std::fs::read_to_string(path)
                    .map_err(|e| InputError::Read {
                        path: path.clone(),
                        message: e.to_string(),
                    })?,
                None => content.clone(),
            };

            let resolution = resolver.resolve_parts(sender, subject, &body);
            if *json {
                println!("{}", serde_json::to_string(&resolution).into_diagnostic()?);
            } else {
                match resolution {
                    Some(Resolution { name, kind, tier }) => {
                        println!("{name}  [{kind} via {tier}]");
                    }
                    None => println!("(unresolved)"),
                }
            }
        }

        Commands::Batch { input, output } => {
            let resolver = build_resolver(&cli)?;
            let emails = load_emails(input)?;
            let resolutions = resolver.resolve_batch(&emails);

            let mut out: Box<dyn Write> = match output {
                Some(path) => Box::new(std::fs::File::create(path).map_err(|e| {
                    InputError::Write {
                        path: path.clone(),
                        message: e.to_string(),
                    }
                })?),
                None => Box::new(std::io::stdout().lock()),
            };

            let mut resolved = 0usize;
            for (email, resolution) in emails.iter().zip(&resolutions) {
                if resolution.is_some() {
                    resolved += 1;
                }
                let record = BatchRecord {
                    sender: &email.sender,
                    subject: &email.subject,
                    institution: resolution.as_ref().map(|r| r.name.as_str()),
                    kind: resolution.as_ref().map(|r| r.kind),
                    tier: resolution.as_ref().map(|r| r.tier),
                };
                let line = serde_json::to_string(&record).into_diagnostic()?;
                writeln!(out, "{line}").into_diagnostic()?;
            }
            tracing::info!(total = emails.len(), resolved, "batch complete");
        }

        Commands::Info => {
            let resolver = build_resolver(&cli)?;
            let index = resolver.index();
            println!("reference names: {}", index.len());
            if let Some(longest) = index.names().max_by_key(|n| n.chars().count()) {
                println!("longest entry:   {longest}");
            }
        }
    }

    Ok(())
}
