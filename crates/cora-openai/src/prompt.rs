//! Prompt construction for answer synthesis
//!
//! Two prompt shapes, chosen by what the question is after: a strict
//! detail-extraction prompt for fee/schedule/requirements questions, and a
//! numbered-recommendation prompt for everything else.

use std::fmt::Write;

use cora_core::{Freshness, QueryContextBundle, RankedCourse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuestionFocus {
    Fees,
    Schedule,
    Requirements,
    General,
}

const FEE_KEYWORDS: [&str; 4] = ["fee", "cost", "price", "charge"];
const SCHEDULE_KEYWORDS: [&str; 5] = ["schedule", "intake", "start date", "course date", "when does"];
const REQUIREMENT_KEYWORDS: [&str; 4] = ["entry requirement", "requirements", "prerequisite", "admission"];

pub(crate) fn detect_focus(question: &str) -> QuestionFocus {
    let lowered = question.to_lowercase();
    if FEE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        QuestionFocus::Fees
    } else if SCHEDULE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        QuestionFocus::Schedule
    } else if REQUIREMENT_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        QuestionFocus::Requirements
    } else {
        QuestionFocus::General
    }
}

pub(crate) fn system_prompt(question: &str, bundle: &QueryContextBundle) -> String {
    let context = render_context(bundle);

    match detect_focus(question) {
        QuestionFocus::General => format!(
            "You are a helpful advisor for a catalogue of educational programmes.\n\
             Recommend the most relevant programmes for the user's question as a \
             numbered list, one short paragraph each, naming the programme and \
             why it fits. Use only the context below; do not invent programmes.\n\
             End with the programme page link for each recommendation.\n\n\
             Context:\n{context}"
        ),
        focus => {
            let wanted = match focus {
                QuestionFocus::Fees => "the course fee",
                QuestionFocus::Schedule => "the schedule and next intake date",
                QuestionFocus::Requirements => "the entry requirements",
                QuestionFocus::General => unreachable!(),
            };
            format!(
                "You are a data extraction assistant for a catalogue of educational \
                 programmes. Find {wanted} for the programme(s) the user asks about, \
                 using only the context below.\n\
                 Answer concisely with the exact values. If a value is marked as \
                 unconfirmed, say it may be outdated. If the information is not in \
                 the context, say it is not available and point to the programme \
                 page instead. Always end with the programme page link.\n\n\
                 Context:\n{context}"
            )
        }
    }
}

fn render_context(bundle: &QueryContextBundle) -> String {
    let mut out = String::new();
    for (i, candidate) in bundle.candidates.iter().enumerate() {
        let _ = write!(out, "{}", render_candidate(i + 1, candidate));
        out.push('\n');
    }
    out
}

fn render_candidate(position: usize, candidate: &RankedCourse) -> String {
    let course = &candidate.course;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{position}. {} (id {}, relevance {:.2})",
        course.title, course.id, candidate.score
    );
    let _ = writeln!(out, "   {}", course.description);
    if let Some(duration) = &course.duration {
        let _ = writeln!(out, "   Duration: {duration}");
    }
    if let Some(mode) = &course.delivery_mode {
        let _ = writeln!(out, "   Delivery: {mode}");
    }
    if let Some(category) = &course.category {
        let _ = writeln!(out, "   Category: {category}");
    }

    let fee = &course.volatile.fee;
    if let Some(value) = &fee.value {
        let _ = writeln!(
            out,
            "   Fee: {} {:.2}{}",
            value.currency,
            value.amount,
            freshness_note(fee.freshness)
        );
    }
    let intake = &course.volatile.next_intake;
    if let Some(value) = &intake.value {
        let _ = writeln!(
            out,
            "   Next intake: {}{}",
            value.format("%-d %B %Y"),
            freshness_note(intake.freshness)
        );
    }
    let requirements = &course.volatile.entry_requirements;
    if let Some(value) = &requirements.value {
        let _ = writeln!(
            out,
            "   Entry requirements: {value}{}",
            freshness_note(requirements.freshness)
        );
    }

    if let Some(url) = &course.url {
        let _ = writeln!(out, "   Page: {url}");
    }

    out
}

fn freshness_note(freshness: Freshness) -> &'static str {
    match freshness {
        Freshness::LiveConfirmed => " (confirmed live)",
        Freshness::LiveFailed => " (unconfirmed, may be outdated)",
        Freshness::StaticOnly => "",
    }
}
