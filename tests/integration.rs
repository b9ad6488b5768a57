//! End-to-end tests for the resolution pipeline.
//!
//! These exercise the full tier ordering with a realistic reference list,
//! validating the properties the engine is built around: sender priority,
//! the bounded content window, acronym domains, truncated-name alignment,
//! and, above all, that boilerplate never comes back as an institution.

use nivaran::normalize::normalize;
use nivaran::reference::ReferenceIndex;
use nivaran::resolve::{EmailInput, Resolver, SourceTier};
use nivaran::strategy::MatchKind;

fn reference_names() -> Vec<String> {
    [
        "Saldiha College",
        "Bhupendra Nath Dutta Smriti Mahavidyalaya",
        "Government College Of Engineering And Textile Technology",
        "Narasinha Dutt College",
        "Jangipur College",
        "Nistarini College",
        "Bidhannagar Academy",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn resolver() -> Resolver {
    Resolver::new(ReferenceIndex::new(reference_names()))
}

fn email(sender: &str, subject: &str, content: &str) -> EmailInput {
    EmailInput {
        sender: sender.to_string(),
        subject: subject.to_string(),
        content: content.to_string(),
    }
}

#[test]
fn normalize_is_idempotent_over_the_reference_list() {
    for name in reference_names() {
        let once = normalize(&name);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn exact_sender_display_name_resolves_to_entry() {
    let r = resolver();
    let res = r
        .resolve(&email("Nistarini College <principal@gmail.com>", "", ""))
        .unwrap();
    assert_eq!(res.name, "Nistarini College");
    assert_eq!(res.tier, SourceTier::Sender);
}

#[test]
fn content_window_bounds_the_scan() {
    let r = resolver();

    // The entry carries no institution keyword, so neither the harvest pass
    // nor the fallback extractor can reach it: the content tier is the only
    // road, and the window closes it.
    let filler = "routine administrative correspondence follows below. ".repeat(25);
    assert!(filler.chars().count() > 1000);

    let late = format!("{filler}Bidhannagar Academy");
    assert_eq!(r.resolve(&email("clerk <x@gmail.com>", "", &late)), None);

    // Control: the same entry inside the window resolves via content.
    let early = format!("Bidhannagar Academy. {filler}");
    let res = r.resolve(&email("clerk <x@gmail.com>", "", &early)).unwrap();
    assert_eq!(res.name, "Bidhannagar Academy");
    assert_eq!(res.tier, SourceTier::Content);
}

#[test]
fn acronym_domain_resolves_without_containment() {
    let r = resolver();
    // government college engineering textile technology → "gcett"; the
    // campus-qualified mail domain keeps it as a prefix.
    let res = r
        .resolve(&email("registrar <registrar@gcettb.ac.in>", "", ""))
        .unwrap();
    assert_eq!(
        res.name,
        "Government College Of Engineering And Textile Technology"
    );
    assert_eq!(res.kind, MatchKind::Acronym);
    assert_eq!(res.tier, SourceTier::Domain);
}

#[test]
fn truncated_sender_aligns_to_full_name() {
    let r = resolver();
    let res = r
        .resolve(&email(
            "Bhupendra Nath Dutta Smriti Maha <bndsm.office@gmail.com>",
            "",
            "",
        ))
        .unwrap();
    assert_eq!(res.name, "Bhupendra Nath Dutta Smriti Mahavidyalaya");
    assert_eq!(res.kind, MatchKind::Partial);
}

#[test]
fn subject_boilerplate_is_never_an_institution() {
    let r = resolver();
    let res = r.resolve(&email(
        "clerk <x@gmail.com>",
        "Re: Suspension Report — No Case Pending",
        "",
    ));
    assert_eq!(res, None);
}

#[test]
fn empty_reference_list_is_always_unresolved() {
    let r = Resolver::new(ReferenceIndex::new(Vec::<String>::new()));
    let probes = [
        email("Jangipur College <office@jangipurcollege.ac.in>", "", ""),
        email("x <x@gcettb.ac.in>", "Saldiha College", "Saldiha College"),
        email("", "", ""),
    ];
    for probe in &probes {
        assert_eq!(r.resolve(probe), None);
    }
}

#[test]
fn sender_match_beats_conflicting_content_match() {
    let r = resolver();
    // The forwarded body names a different institution; the sender wins.
    let res = r
        .resolve(&email(
            "Saldiha College <office@gmail.com>",
            "Fwd: complaint",
            "Forwarded grievance originally raised against Narasinha Dutt College.",
        ))
        .unwrap();
    assert_eq!(res.name, "Saldiha College");
    assert_eq!(res.tier, SourceTier::Sender);
}

#[test]
fn free_mail_domains_never_identify_institutions() {
    let r = resolver();
    for provider in ["gmail.com", "yahoo.in", "outlook.com", "hotmail.com", "rediffmail.com"] {
        let sender = format!("clerk <clerk@{provider}>");
        assert_eq!(
            r.resolve(&email(&sender, "", "no names in this body")),
            None,
            "provider {provider} must not resolve"
        );
    }
}

#[test]
fn abbreviated_text_matches_normalized_entry() {
    let r = Resolver::new(ReferenceIndex::new(["Government General Degree College"]));
    // "Govt." in the body, "Government" in the reference list: only the
    // normalized containment forms line up.
    let res = r
        .resolve(&email(
            "clerk <x@gmail.com>",
            "",
            "Enclosed find the papers from Govt. General Degree College, Chapra.",
        ))
        .unwrap();
    assert_eq!(res.name, "Government General Degree College");
    assert_eq!(res.tier, SourceTier::Content);
}

#[test]
fn unlisted_institution_comes_from_pattern_fallback() {
    let r = resolver();
    let res = r
        .resolve(&email(
            "clerk <clerk@gmail.com>",
            "",
            "Kindly note the enquiry raised by Chandidas Mahavidyalaya last week.",
        ))
        .unwrap();
    assert_eq!(res.name, "Chandidas Mahavidyalaya");
    assert_eq!(res.kind, MatchKind::Heuristic);
    assert_eq!(res.tier, SourceTier::Pattern);
}

#[test]
fn batch_resolution_equals_sequential() {
    let r = resolver();
    let emails: Vec<EmailInput> = vec![
        email("Nistarini College <p@gmail.com>", "", ""),
        email("clerk <x@gcettb.ac.in>", "", ""),
        email("clerk <x@gmail.com>", "Re: Suspension Report", ""),
        email("", "", ""),
        email(
            "Bhupendra Nath Dutta Smriti Maha <b@gmail.com>",
            "",
            "follow-up",
        ),
    ];
    let batch = r.resolve_batch(&emails);
    let sequential: Vec<_> = emails.iter().map(|e| r.resolve(e)).collect();
    assert_eq!(batch, sequential);
}
