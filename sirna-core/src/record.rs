//! GenBank nucleotide record handling
//!
//! Parses the XML returned by an E-utilities efetch call
//! (`retmode=xml`) just far enough to recover the origin sequence and
//! the exon features, then splices the exon regions into the coding
//! sequence the aligner consumes. Exon coordinates are 1-based and
//! inclusive on both ends.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors that can occur while parsing or splicing a record
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Record contains no origin sequence")]
    MissingSequence,

    #[error("Record sequence contains non-ASCII data")]
    NonAsciiSequence,

    #[error("Malformed exon location '{0}'")]
    MalformedLocation(String),

    #[error("Invalid exon region {start}..{end} for sequence of length {len}")]
    InvalidRegion { start: u64, end: u64, len: u64 },

    #[error("Failed to read record file: {0}")]
    Io(#[from] std::io::Error),
}

/// A coordinate-bounded exon region, 1-based inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExonRegion {
    pub start: u64,
    pub end: u64,
}

/// The parts of a GenBank record this tool cares about
#[derive(Debug, Clone)]
pub struct GenBankRecord {
    /// Accession.version identifier, when present
    pub accession: Option<String>,
    /// Origin sequence, uppercased, whitespace removed
    pub sequence: String,
    /// Exon regions in record order
    pub exons: Vec<ExonRegion>,
}

fn sequence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<GBSeq_sequence>([^<]+)</GBSeq_sequence>").expect("hard-coded regex")
    })
}

fn accession_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<GBSeq_accession-version>([^<]+)</GBSeq_accession-version>")
            .expect("hard-coded regex")
    })
}

fn feature_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<GBFeature>.*?</GBFeature>").expect("hard-coded regex"))
}

fn location_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<GBFeature_location>([^<]+)</GBFeature_location>").expect("hard-coded regex")
    })
}

impl GenBankRecord {
    /// Parse an efetch XML document.
    pub fn parse(xml: &str) -> Result<Self, RecordError> {
        let raw = sequence_re()
            .captures(xml)
            .and_then(|c| c.get(1))
            .ok_or(RecordError::MissingSequence)?
            .as_str();

        let sequence: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if sequence.is_empty() {
            return Err(RecordError::MissingSequence);
        }
        if !sequence.is_ascii() {
            return Err(RecordError::NonAsciiSequence);
        }

        let accession = accession_re()
            .captures(xml)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());

        let mut exons = Vec::new();
        for feature in feature_re().find_iter(xml) {
            let block = feature.as_str();
            if !block.contains("<GBFeature_key>exon</GBFeature_key>") {
                continue;
            }
            let location = location_re()
                .captures(block)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim())
                .ok_or_else(|| RecordError::MalformedLocation(String::new()))?;
            exons.push(parse_span(location)?);
        }

        Ok(Self {
            accession,
            sequence,
            exons,
        })
    }

    /// Parse an efetch XML document stored on disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RecordError> {
        let xml = std::fs::read_to_string(path)?;
        Self::parse(&xml)
    }

    /// Concatenate the exon regions, in record order, into the coding
    /// sequence. A record without exon features falls back to the whole
    /// origin sequence.
    pub fn coding_sequence(&self) -> Result<String, RecordError> {
        if self.exons.is_empty() {
            log::warn!(
                "Record {} has no exon features; using the full origin sequence",
                self.accession.as_deref().unwrap_or("<unknown>")
            );
            return Ok(self.sequence.clone());
        }
        splice(&self.sequence, &self.exons)
    }
}

/// Parse a `start..end` feature location span.
fn parse_span(location: &str) -> Result<ExonRegion, RecordError> {
    let malformed = || RecordError::MalformedLocation(location.to_string());
    let (start, end) = location.split_once("..").ok_or_else(malformed)?;
    let start: u64 = start.trim().parse().map_err(|_| malformed())?;
    let end: u64 = end.trim().parse().map_err(|_| malformed())?;
    Ok(ExonRegion { start, end })
}

/// Slice and concatenate exon regions out of a sequence.
///
/// Coordinates are 1-based inclusive and validated against the sequence
/// length before any slicing happens.
pub fn splice(sequence: &str, exons: &[ExonRegion]) -> Result<String, RecordError> {
    let len = sequence.len() as u64;
    let mut spliced = String::new();
    for region in exons {
        if region.start < 1 || region.start > region.end || region.end > len {
            return Err(RecordError::InvalidRegion {
                start: region.start,
                end: region.end,
                len,
            });
        }
        // Safe byte-offset slicing: the sequence is validated ASCII.
        spliced.push_str(&sequence[(region.start - 1) as usize..region.end as usize]);
    }
    Ok(spliced)
}
