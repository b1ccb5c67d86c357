//! Gap-free diagonal aligner
//!
//! Finds the best-scoring ungapped alignment of a query against a
//! reference by filling a dynamic-programming table with the purely
//! diagonal recurrence `score[i][j] = score[i-1][j-1] + s(q[i-1], r[j-1])`
//! and tracing back from the best cell in the last row.
//!
//! This is deliberately NOT Smith-Waterman: the recurrence never
//! consults the horizontal or vertical neighbors (no gaps inside the
//! aligned region) and running scores are not clamped at zero, so they
//! can go arbitrarily negative. Do not "fix" either property; the
//! traceback's stop condition depends on them.

use crate::alphabet::{self, EncodingPolicy, AlphabetError, DECODE, GAP};
use crate::scoring::{ScoringMatrix, ScoringParams};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during alignment
#[derive(Debug, Error)]
pub enum AlignError {
    #[error("Empty {0} sequence after encoding")]
    EmptySequence(&'static str),

    #[error("No alignment computed yet")]
    NotComputed,

    #[error(transparent)]
    Alphabet(#[from] AlphabetError),
}

pub type AlignResult<T> = Result<T, AlignError>;

/// Result of a diagonal alignment
///
/// Pairs are ordered from alignment start to end; each pair is
/// `(top, bottom)` where the top symbol comes from the reference and
/// the bottom from the query. Where the traceback stopped before
/// consuming the query's prefix, the top side carries the `'_'` gap
/// placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub pairs: Vec<(char, char)>,
    pub top_strand: String,
    pub bottom_strand: String,
    pub mismatches: u32,
}

impl Alignment {
    /// The best-matching subsequence reported by the aligner: the top
    /// strand, gap placeholders included.
    pub fn matched(&self) -> &str {
        &self.top_strand
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.top_strand)?;
        writeln!(f, "{}", self.bottom_strand)?;
        write!(f, "Number of mismatches= {}", self.mismatches)
    }
}

/// Align a query against a reference with default scoring (+2/-1) and
/// the default strip-invalid encoding policy.
pub fn align(query: &str, reference: &str) -> AlignResult<Alignment> {
    align_with(
        query,
        reference,
        &ScoringParams::default(),
        EncodingPolicy::default(),
    )
}

/// Align a query against a reference with explicit scoring parameters
/// and encoding policy.
pub fn align_with(
    query: &str,
    reference: &str,
    params: &ScoringParams,
    policy: EncodingPolicy,
) -> AlignResult<Alignment> {
    let q = alphabet::encode(query, policy)?;
    let r = alphabet::encode(reference, policy)?;

    if q.is_empty() {
        return Err(AlignError::EmptySequence("query"));
    }
    if r.is_empty() {
        return Err(AlignError::EmptySequence("reference"));
    }

    let matrix = ScoringMatrix::new(params);
    let n1 = q.len();
    let n2 = r.len();

    // Row 0 and column 0 stay zero; the recurrence only ever reads the
    // upper-left diagonal neighbor.
    let mut score = vec![vec![0i32; n2 + 1]; n1 + 1];
    for i in 1..=n1 {
        for j in 1..=n2 {
            score[i][j] = score[i - 1][j - 1] + matrix.score(q[i - 1], r[j - 1]);
        }
    }

    // Best endpoint in the last row, lowest column on ties.
    let mut best_col = 0;
    let mut best_score = score[n1][0];
    for (j, &cell) in score[n1].iter().enumerate() {
        if cell > best_score {
            best_score = cell;
            best_col = j;
        }
    }

    // Diagonal walk while the running score is strictly positive.
    // Positivity implies i >= 1 and j >= 1 since the border is zero.
    let mut pairs = Vec::new();
    let mut mismatches = 0u32;
    let mut i = n1;
    let mut j = best_col;
    while score[i][j] > 0 {
        if q[i - 1] != r[j - 1] {
            mismatches += 1;
        }
        pairs.push((DECODE[r[j - 1] as usize], DECODE[q[i - 1] as usize]));
        i -= 1;
        j -= 1;
    }

    // Pad the unaligned query prefix against nothing; the reference is
    // not consumed further and mismatches are not counted here.
    while i > 0 {
        pairs.push((GAP, DECODE[q[i - 1] as usize]));
        i -= 1;
    }

    pairs.reverse();

    let top_strand: String = pairs.iter().map(|&(t, _)| t).collect();
    let bottom_strand: String = pairs.iter().map(|&(_, b)| b).collect();

    Ok(Alignment {
        pairs,
        top_strand,
        bottom_strand,
        mismatches,
    })
}

/// Two-step wrapper around [`align`] for callers that expect the
/// align-then-query protocol.
///
/// Holds the last computed result only; not meant for concurrent reuse.
#[derive(Debug, Default)]
pub struct BasicAligner {
    last: Option<Alignment>,
}

impl BasicAligner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run an alignment and return the three-line formatted report.
    pub fn align(&mut self, query: &str, reference: &str) -> AlignResult<String> {
        let alignment = align(query, reference)?;
        let report = alignment.to_string();
        self.last = Some(alignment);
        Ok(report)
    }

    /// The last matched subsequence and its mismatch count.
    pub fn best(&self) -> AlignResult<(&str, u32)> {
        self.last
            .as_ref()
            .map(|a| (a.top_strand.as_str(), a.mismatches))
            .ok_or(AlignError::NotComputed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_alignment() {
        let result = align("ACGT", "ACGT").unwrap();
        assert_eq!(result.matched(), "ACGT");
        assert_eq!(result.bottom_strand, "ACGT");
        assert_eq!(result.mismatches, 0);
    }

    #[test]
    fn test_single_substitution() {
        let result = align("ACGT", "AGGT").unwrap();
        assert_eq!(result.mismatches, 1);
        assert_eq!(result.top_strand, "AGGT");
        assert_eq!(result.bottom_strand, "ACGT");
    }

    #[test]
    fn test_fully_mismatching_is_all_padding() {
        // Every diagonal is negative, so the walk stops immediately and
        // the result is governed entirely by the padding step.
        let result = align("AAAA", "TTTT").unwrap();
        assert_eq!(result.top_strand, "____");
        assert_eq!(result.bottom_strand, "AAAA");
        assert_eq!(result.mismatches, 0);
    }

    #[test]
    fn test_empty_inputs_are_rejected() {
        assert!(matches!(
            align("", "ACGT"),
            Err(AlignError::EmptySequence("query"))
        ));
        assert!(matches!(
            align("ACGT", ""),
            Err(AlignError::EmptySequence("reference"))
        ));
        // A sequence that encodes to empty is rejected the same way.
        assert!(matches!(
            align("NNN", "ACGT"),
            Err(AlignError::EmptySequence("query"))
        ));
    }

    #[test]
    fn test_tie_breaks_to_lowest_column() {
        // Last row holds score 3 at both column 3 (mismatch at the start
        // of the diagonal) and column 6 (mismatch at the end). The lower
        // column wins: its walk stops at the leading mismatch, pads the
        // query prefix, and counts zero mismatches. Resolving the tie to
        // column 6 would instead yield "GAT" with one mismatch.
        let result = align("GAC", "TACGAT").unwrap();
        assert_eq!(result.top_strand, "_AC");
        assert_eq!(result.bottom_strand, "GAC");
        assert_eq!(result.mismatches, 0);
    }

    #[test]
    fn test_padding_preserves_query_length() {
        let query = "ACGCACGC"; // no T anywhere
        let result = align(query, "TT").unwrap();
        assert_eq!(result.len(), query.len());
        assert_eq!(result.top_strand, "________");
        assert_eq!(result.bottom_strand, query);
    }

    #[test]
    fn test_mismatch_count_bounds() {
        let cases = [
            ("ACGT", "ACGT"),
            ("ACGT", "AGGT"),
            ("AAAA", "TTTT"),
            ("ACGTACGT", "TGCA"),
            ("GAC", "TACGAT"),
        ];
        for (q, r) in cases {
            let result = align(q, r).unwrap();
            assert!(result.mismatches as usize <= q.len().min(r.len()));
        }
    }

    #[test]
    fn test_single_matching_base_still_aligns() {
        // Only the final T matches; the walk emits that one pair and the
        // rest of the query is padded.
        let result = align("AT", "GT").unwrap();
        assert_eq!(result.top_strand, "_T");
        assert_eq!(result.bottom_strand, "AT");
        assert_eq!(result.mismatches, 0);
    }

    #[test]
    fn test_scores_are_not_clamped() {
        // A long mismatching prefix drives the running score deeply
        // negative; a short match at the end must not survive the
        // negative prefix when they share a diagonal.
        let result = align("AAAAAT", "CCCCCT").unwrap();
        // Main diagonal total: 5 * -1 + 2 = -3. Every last-row cell is
        // negative, so the best endpoint is the zero at column 0 and the
        // trailing match is never reported on its own.
        assert_eq!(result.top_strand, "______");
        assert_eq!(result.bottom_strand, "AAAAAT");
        assert_eq!(result.mismatches, 0);
    }

    #[test]
    fn test_case_insensitive_input() {
        let result = align("acgt", "ACGT").unwrap();
        assert_eq!(result.mismatches, 0);
        assert_eq!(result.matched(), "ACGT");
    }

    #[test]
    fn test_report_format() {
        let report = align("ACGT", "AGGT").unwrap().to_string();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "AGGT");
        assert_eq!(lines[1], "ACGT");
        assert_eq!(lines[2], "Number of mismatches= 1");
    }

    #[test]
    fn test_wrapper_best_before_align_fails() {
        let aligner = BasicAligner::new();
        assert!(matches!(aligner.best(), Err(AlignError::NotComputed)));
    }

    #[test]
    fn test_wrapper_two_step_protocol() {
        let mut aligner = BasicAligner::new();
        let report = aligner.align("ACGT", "AGGT").unwrap();
        assert!(report.contains("Number of mismatches= 1"));
        let (matched, mismatches) = aligner.best().unwrap();
        assert_eq!(matched, "AGGT");
        assert_eq!(mismatches, 1);
    }
}
