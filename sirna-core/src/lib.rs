//! siRNA Design Core Library
//!
//! Nucleotide encoding, the gap-free diagonal aligner, GenBank record
//! handling, the Entrez fetch client, and candidate-window derivation.

pub mod align;
pub mod alphabet;
pub mod candidate;
pub mod entrez;
pub mod record;
pub mod scoring;

// Re-export commonly used types and functions
pub use align::{align, align_with, AlignError, Alignment, BasicAligner};
pub use alphabet::EncodingPolicy;
pub use candidate::{derive_candidates, Candidate, CandidateParams};
pub use entrez::EntrezClient;
pub use record::{ExonRegion, GenBankRecord};
pub use scoring::{ScoringMatrix, ScoringParams};

/// Version information for the siRNA core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
