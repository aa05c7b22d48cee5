//! Read-only course index: vectors plus ordinal-aligned metadata

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use cora_core::{CourseRecord, Error, Result};

use crate::artifact::read_artifact;

/// A search hit: ordinal position into the metadata table plus similarity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredHit {
    pub ordinal: usize,
    pub score: f32,
}

/// The immutable process-wide retrieval context.
///
/// Holds the embedded course vectors and their ordinal-aligned
/// [`CourseRecord`] metadata, loaded once at startup as a single atomic
/// unit. Safe for unsynchronized concurrent reads; there is no online
/// insert or delete; rebuilding means restarting with a new artifact.
///
/// Scores returned by [`CourseIndex::search`] are cosine similarities:
/// higher means more similar, range [-1, 1].
#[derive(Debug)]
pub struct CourseIndex {
    dimension: usize,
    /// Row-major, `records.len() * dimension` values.
    vectors: Vec<f32>,
    records: Vec<CourseRecord>,
}

impl CourseIndex {
    /// Load the binary vector artifact and its companion metadata table.
    ///
    /// Fails with [`Error::CorruptIndex`] on a malformed artifact or
    /// metadata document and [`Error::IndexMetadataMismatch`] when the two
    /// disagree on entry counts. Either failure is fatal at boot: the
    /// service must not accept questions without a valid index.
    pub fn load(index_path: &Path, metadata_path: &Path) -> Result<Self> {
        let raw = read_artifact(index_path)?;

        let file = File::open(metadata_path)?;
        let records: Vec<CourseRecord> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| {
                Error::CorruptIndex(format!("{}: {e}", metadata_path.display()))
            })?;

        if records.len() != raw.count {
            return Err(Error::IndexMetadataMismatch {
                vectors: raw.count,
                records: records.len(),
            });
        }

        let mut seen = HashSet::new();
        for record in &records {
            if record.id.trim().is_empty() {
                return Err(Error::CorruptIndex(format!(
                    "{}: record \"{}\" has an empty id",
                    metadata_path.display(),
                    record.title
                )));
            }
            if !seen.insert(record.id.as_str()) {
                return Err(Error::CorruptIndex(format!(
                    "{}: duplicate course id \"{}\"",
                    metadata_path.display(),
                    record.id
                )));
            }
        }

        info!(
            courses = records.len(),
            dimension = raw.dimension,
            "course index loaded"
        );

        Ok(Self {
            dimension: raw.dimension,
            vectors: raw.data,
            records,
        })
    }

    /// Top-k nearest neighbours of `query` by cosine similarity.
    ///
    /// Results are ordered score-descending; equal scores break ties by
    /// ascending ordinal so rankings are deterministic. A query of the
    /// wrong dimension is a configuration error.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredHit>> {
        if query.len() != self.dimension {
            return Err(Error::Configuration(format!(
                "query vector has dimension {}, index expects {}",
                query.len(),
                self.dimension
            )));
        }

        let mut hits: Vec<ScoredHit> = self
            .vectors
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(ordinal, row)| ScoredHit {
                ordinal,
                score: cosine_similarity(query, row),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.ordinal.cmp(&b.ordinal))
        });
        hits.truncate(k);
        Ok(hits)
    }

    pub fn record(&self, ordinal: usize) -> Option<&CourseRecord> {
        self.records.get(ordinal)
    }

    pub fn records(&self) -> &[CourseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::write_artifact;
    use std::path::PathBuf;

    fn record(id: &str, title: &str) -> CourseRecord {
        CourseRecord {
            id: id.to_string(),
            title: title.to_string(),
            url: None,
            description: format!("{title} description"),
            duration: None,
            delivery_mode: None,
            category: None,
            volatile: Default::default(),
        }
    }

    fn write_fixture(
        dir: &tempfile::TempDir,
        vectors: &[Vec<f32>],
        records: &[CourseRecord],
    ) -> (PathBuf, PathBuf) {
        let index_path = dir.path().join("index.bin");
        let metadata_path = dir.path().join("metadata.json");
        write_artifact(&index_path, vectors).unwrap();
        std::fs::write(&metadata_path, serde_json::to_vec(records).unwrap()).unwrap();
        (index_path, metadata_path)
    }

    #[test]
    fn load_and_search() {
        let dir = tempfile::tempdir().unwrap();
        let vectors = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.9, 0.1, 0.0],
        ];
        let records = vec![
            record("sd-da", "Data Analytics"),
            record("sd-fm", "Facilities Management"),
            record("sd-bim", "BIM Management"),
        ];
        let (index_path, metadata_path) = write_fixture(&dir, &vectors, &records);

        let index = CourseIndex::load(&index_path, &metadata_path).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.dimension(), 3);

        let hits = index.search(&[1.0, 0.0, 0.0], 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].ordinal, 0);
        assert!(hits[0].score > hits[1].score);
        assert_eq!(hits[1].ordinal, 2);
    }

    #[test]
    fn equal_scores_break_ties_by_ordinal() {
        let dir = tempfile::tempdir().unwrap();
        // Two identical vectors: identical scores against any query.
        let vectors = vec![vec![1.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]];
        let records = vec![record("b", "B"), record("a", "A"), record("c", "C")];
        let (index_path, metadata_path) = write_fixture(&dir, &vectors, &records);

        let index = CourseIndex::load(&index_path, &metadata_path).unwrap();
        let hits = index.search(&[1.0, 0.0], 3).unwrap();

        assert_eq!(hits[0].ordinal, 0);
        assert_eq!(hits[1].ordinal, 1);
        assert_eq!(hits[0].score, hits[1].score);
    }

    #[test]
    fn count_mismatch_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let records = vec![record("only", "Only One")];
        let (index_path, metadata_path) = write_fixture(&dir, &vectors, &records);

        let err = CourseIndex::load(&index_path, &metadata_path).unwrap_err();
        match err {
            Error::IndexMetadataMismatch { vectors, records } => {
                assert_eq!(vectors, 2);
                assert_eq!(records, 1);
            }
            other => panic!("expected IndexMetadataMismatch, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let vectors = vec![vec![1.0], vec![0.5]];
        let records = vec![record("dup", "First"), record("dup", "Second")];
        let (index_path, metadata_path) = write_fixture(&dir, &vectors, &records);

        let err = CourseIndex::load(&index_path, &metadata_path).unwrap_err();
        assert!(matches!(err, Error::CorruptIndex(_)), "got {err:?}");
    }

    #[test]
    fn wrong_query_dimension_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let vectors = vec![vec![1.0, 0.0]];
        let records = vec![record("one", "One")];
        let (index_path, metadata_path) = write_fixture(&dir, &vectors, &records);

        let index = CourseIndex::load(&index_path, &metadata_path).unwrap();
        let err = index.search(&[1.0, 0.0, 0.0], 1).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)), "got {err:?}");
    }

    #[test]
    fn malformed_metadata_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let index_path = dir.path().join("index.bin");
        let metadata_path = dir.path().join("metadata.json");
        write_artifact(&index_path, &[vec![1.0]]).unwrap();
        std::fs::write(&metadata_path, b"not json at all").unwrap();

        let err = CourseIndex::load(&index_path, &metadata_path).unwrap_err();
        assert!(matches!(err, Error::CorruptIndex(_)), "got {err:?}");
    }
}
