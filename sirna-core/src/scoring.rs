//! Substitution scoring
//!
//! A fixed symmetric 4x4 matrix over the encoded alphabet: the match
//! score on the diagonal, the mismatch penalty everywhere else. Shared
//! by every alignment; built once from [`ScoringParams`].

use crate::alphabet::ALPHABET_SIZE;
use serde::{Deserialize, Serialize};

/// Parameters for substitution scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringParams {
    /// Match score
    pub match_score: i32,
    /// Mismatch penalty
    pub mismatch_penalty: i32,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            match_score: 2,
            mismatch_penalty: -1,
        }
    }
}

/// Symmetric substitution matrix indexed by encoded base codes
#[derive(Debug, Clone)]
pub struct ScoringMatrix {
    table: [[i32; ALPHABET_SIZE]; ALPHABET_SIZE],
}

impl ScoringMatrix {
    pub fn new(params: &ScoringParams) -> Self {
        let mut table = [[params.mismatch_penalty; ALPHABET_SIZE]; ALPHABET_SIZE];
        for (i, row) in table.iter_mut().enumerate() {
            row[i] = params.match_score;
        }
        Self { table }
    }

    /// Score for aligning two encoded bases. Codes must be valid
    /// alphabet codes as produced by [`crate::alphabet::encode`].
    pub fn score(&self, a: u8, b: u8) -> i32 {
        self.table[a as usize][b as usize]
    }
}

impl Default for ScoringMatrix {
    fn default() -> Self {
        Self::new(&ScoringParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scores() {
        let matrix = ScoringMatrix::default();
        for a in 0..ALPHABET_SIZE as u8 {
            for b in 0..ALPHABET_SIZE as u8 {
                let expected = if a == b { 2 } else { -1 };
                assert_eq!(matrix.score(a, b), expected);
            }
        }
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let params = ScoringParams {
            match_score: 5,
            mismatch_penalty: -3,
        };
        let matrix = ScoringMatrix::new(&params);
        for a in 0..ALPHABET_SIZE as u8 {
            for b in 0..ALPHABET_SIZE as u8 {
                assert_eq!(matrix.score(a, b), matrix.score(b, a));
            }
        }
    }
}
