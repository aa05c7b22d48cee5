//! Request-scoped context bundle handed to answer synthesis

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::{CourseRecord, Freshness};

/// Per-candidate counts of volatile fields by freshness flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreshnessSummary {
    pub live_confirmed: usize,
    pub live_failed: usize,
    pub static_only: usize,
}

impl FreshnessSummary {
    pub fn of(record: &CourseRecord) -> Self {
        let mut summary = Self::default();
        for flag in record.volatile.flags() {
            match flag {
                Freshness::StaticOnly => summary.static_only += 1,
                Freshness::LiveConfirmed => summary.live_confirmed += 1,
                Freshness::LiveFailed => summary.live_failed += 1,
            }
        }
        summary
    }

    /// True when at least one field missed its live refresh.
    pub fn degraded(&self) -> bool {
        self.live_failed > 0
    }
}

/// A retrieved course with its relevance score and freshness summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCourse {
    pub course: CourseRecord,
    pub score: f32,
    pub freshness: FreshnessSummary,
}

/// The finalized, ordered candidate set for one question.
///
/// Ordering is by descending relevance score, ties broken by ascending course
/// id so identical questions always yield identical orderings. The bundle is
/// created per request and discarded once the synthesizer has consumed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryContextBundle {
    pub question: String,
    pub candidates: Vec<RankedCourse>,
}

impl QueryContextBundle {
    /// A bundle signalling "no relevant course found", not an error.
    pub fn empty(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            candidates: Vec::new(),
        }
    }

    pub fn new(question: impl Into<String>, mut candidates: Vec<RankedCourse>) -> Self {
        sort_candidates(&mut candidates);
        Self {
            question: question.into(),
            candidates,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }
}

/// Apply the bundle ordering rule: score descending, then id ascending.
pub fn sort_candidates(candidates: &mut [RankedCourse]) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.course.id.cmp(&b.course.id))
    });
}
