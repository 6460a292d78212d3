//! Sequence windows returned by the UCSC `getData/sequence` endpoint

use crate::api::types::UcscSequenceResponse;
use genoview_common::types::{Nucleotide, SequenceRange};
use serde::{Deserialize, Serialize};

/// Message shown when UCSC returns neither DNA nor an error.
pub const MISSING_DNA_MESSAGE: &str = "No sequence data returned for this range";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceData {
    /// Uppercased nucleotides, empty on failure
    pub sequence: String,
    /// The 1-based window the caller asked for
    pub actual_range: SequenceRange,
    /// Upstream-reported failure, rendered as a field-level error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SequenceData {
    pub fn from_upstream(response: UcscSequenceResponse, range: SequenceRange) -> Self {
        match (response.error, response.dna) {
            (Some(error), _) => Self::failed(range, error),
            (None, Some(dna)) if !dna.is_empty() => Self {
                sequence: dna.to_uppercase(),
                actual_range: range,
                error: None,
            },
            (None, _) => Self::failed(range, MISSING_DNA_MESSAGE),
        }
    }

    pub fn failed(range: SequenceRange, error: impl Into<String>) -> Self {
        Self {
            sequence: String::new(),
            actual_range: range,
            error: Some(error.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Base at a 1-based chromosome position, if it lies inside this window
    pub fn base_at(&self, position: u64) -> Option<char> {
        let offset = position.checked_sub(self.actual_range.start)?;
        self.sequence.chars().nth(usize::try_from(offset).ok()?)
    }

    /// Like [`Self::base_at`] but only for the four unambiguous bases
    pub fn nucleotide_at(&self, position: u64) -> Option<Nucleotide> {
        self.base_at(position).and_then(Nucleotide::from_char)
    }

    /// Iterate `(start position, chunk)` lines of `width` bases
    pub fn lines(&self, width: usize) -> impl Iterator<Item = (u64, &str)> + '_ {
        let width = width.max(1);
        let start = self.actual_range.start;
        // Sequence is ASCII, so byte chunks are char chunks
        self.sequence
            .as_bytes()
            .chunks(width)
            .enumerate()
            .map(move |(i, chunk)| {
                let line = std::str::from_utf8(chunk).unwrap_or_default();
                (start + (i * width) as u64, line)
            })
    }
}
