//! siRNA candidate derivation
//!
//! Enumerates every contiguous window of the target gene as a candidate
//! duplex sequence. No thermodynamic or off-target scoring happens
//! here; candidates are meant to be aligned back against the gene.

use serde::{Deserialize, Serialize};

/// Parameters for candidate derivation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateParams {
    /// Window length in nucleotides
    pub length: usize,
}

impl Default for CandidateParams {
    fn default() -> Self {
        // Canonical siRNA duplex length
        Self { length: 21 }
    }
}

/// A candidate window with its 0-based offset in the gene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub offset: usize,
    pub sequence: String,
}

/// Derive candidate windows from a gene sequence.
///
/// Genes shorter than the window length yield no candidates.
pub fn derive_candidates(gene: &str, params: &CandidateParams) -> Vec<Candidate> {
    if params.length == 0 || gene.len() < params.length {
        return Vec::new();
    }
    gene.as_bytes()
        .windows(params.length)
        .enumerate()
        .map(|(offset, window)| Candidate {
            offset,
            sequence: String::from_utf8_lossy(window).into_owned(),
        })
        .collect()
}
