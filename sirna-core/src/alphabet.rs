//! Nucleotide alphabet encoding
//!
//! Maps the four DNA symbols onto compact integer codes (A=0, C=1, G=2,
//! T=3) for use as indices into the substitution matrix. Inputs are
//! case-folded before encoding; handling of characters outside the
//! alphabet is controlled by an explicit [`EncodingPolicy`].

use thiserror::Error;

/// Number of symbols in the nucleotide alphabet
pub const ALPHABET_SIZE: usize = 4;

/// Gap placeholder used on the unaligned side of a padded pair
pub const GAP: char = '_';

/// Code-to-symbol table; the inverse of [`encode_base`]
pub const DECODE: [char; ALPHABET_SIZE] = ['A', 'C', 'G', 'T'];

/// Errors that can occur during encoding
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("Invalid nucleotide '{nucleotide}' at position {position}")]
    InvalidNucleotide { nucleotide: char, position: usize },
}

/// What to do with characters outside the A/C/G/T alphabet.
///
/// The historical behavior of this tool was to drop such characters
/// without any notice. `StripInvalid` keeps that behavior but makes it
/// observable through a warning log; `Reject` turns the first offending
/// character into an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingPolicy {
    /// Drop non-alphabet characters, logging a warning with the count
    #[default]
    StripInvalid,
    /// Fail on the first non-alphabet character
    Reject,
}

/// Encode a single uppercase base, or `None` if it is not A/C/G/T.
pub fn encode_base(base: char) -> Option<u8> {
    match base {
        'A' => Some(0),
        'C' => Some(1),
        'G' => Some(2),
        'T' => Some(3),
        _ => None,
    }
}

/// Encode a nucleotide string into integer codes.
///
/// Input is case-folded to uppercase first. The returned vector is at
/// most as long as the input; under [`EncodingPolicy::StripInvalid`] it
/// shrinks by one for every dropped character.
pub fn encode(seq: &str, policy: EncodingPolicy) -> Result<Vec<u8>, AlphabetError> {
    let mut codes = Vec::with_capacity(seq.len());
    let mut dropped = 0usize;

    for (position, ch) in seq.chars().enumerate() {
        let upper = ch.to_ascii_uppercase();
        match encode_base(upper) {
            Some(code) => codes.push(code),
            None => match policy {
                EncodingPolicy::StripInvalid => dropped += 1,
                EncodingPolicy::Reject => {
                    return Err(AlphabetError::InvalidNucleotide {
                        nucleotide: ch,
                        position,
                    })
                }
            },
        }
    }

    if dropped > 0 {
        log::warn!("Dropped {} non-ACGT character(s) during encoding", dropped);
    }

    Ok(codes)
}

/// Decode an integer code back to its nucleotide symbol.
pub fn decode_base(code: u8) -> Option<char> {
    DECODE.get(code as usize).copied()
}
