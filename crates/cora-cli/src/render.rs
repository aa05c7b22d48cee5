//! Rendering of answers, candidate tables and the catalogue listing

use std::fmt::Write;

use colored::*;

use cora_core::{CourseRecord, Freshness, QueryContextBundle, VolatileField};

/// Print the synthesized answer.
pub fn render_answer(answer: &str) {
    println!();
    println!("{answer}");
    println!();
}

/// Print the matched-programme table beneath an answer.
pub fn render_candidates(bundle: &QueryContextBundle) {
    if bundle.is_empty() {
        return;
    }
    println!("{}", "Matched programmes:".bold());
    print!("{}", format_candidates(bundle));
}

/// Print the full catalogue listing.
pub fn render_catalog(records: &[CourseRecord]) {
    println!(
        "{} {} programmes in the catalogue",
        "📚".cyan(),
        records.len()
    );
    print!("{}", format_catalog(records));
}

/// The candidate table as plain text (markers included, no colour).
pub fn format_candidates(bundle: &QueryContextBundle) -> String {
    let mut out = String::new();
    for (i, candidate) in bundle.candidates.iter().enumerate() {
        let course = &candidate.course;
        let _ = writeln!(
            out,
            "  {}. {} (relevance {:.2})",
            i + 1,
            course.title,
            candidate.score
        );

        if let Some(duration) = &course.duration {
            let _ = writeln!(out, "     Duration: {duration}");
        }
        if let Some(fee) = &course.volatile.fee.value {
            let _ = writeln!(
                out,
                "     Fee: {} {:.2} {}",
                fee.currency,
                fee.amount,
                freshness_marker(&course.volatile.fee)
            );
        }
        if let Some(intake) = &course.volatile.next_intake.value {
            let _ = writeln!(
                out,
                "     Next intake: {} {}",
                intake.format("%-d %B %Y"),
                freshness_marker(&course.volatile.next_intake)
            );
        }
        if let Some(requirements) = &course.volatile.entry_requirements.value {
            let _ = writeln!(
                out,
                "     Entry requirements: {requirements} {}",
                freshness_marker(&course.volatile.entry_requirements)
            );
        }
        if let Some(url) = &course.url {
            let _ = writeln!(out, "     {url}");
        }
    }
    out
}

/// The catalogue listing as plain text.
pub fn format_catalog(records: &[CourseRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let _ = write!(out, "  {}  {}", record.id, record.title);
        if let Some(duration) = &record.duration {
            let _ = write!(out, " — {duration}");
        }
        if let Some(category) = &record.category {
            let _ = write!(out, " [{category}]");
        }
        out.push('\n');
    }
    out
}

fn freshness_marker<T>(field: &VolatileField<T>) -> &'static str {
    match field.freshness {
        Freshness::LiveConfirmed => "(✓ checked live)",
        Freshness::LiveFailed => "(⚠ may be outdated)",
        Freshness::StaticOnly => "(from catalogue)",
    }
}
