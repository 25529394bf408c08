//! Compositional pattern engine for HashSmith.
//!
//! Candidate wordlists are described as a tree of [`Pattern`] nodes. Leaves
//! (literal sets and calendar dates) feed composites (sequence, alternative,
//! repeat, interleave); every node produces a lazy, deterministic sequence of
//! strings that the generation driver filters by length and the wordlist
//! writer persists one candidate per line.

pub mod errors;
pub mod generate;
pub mod output;
pub mod pattern;
pub mod transform;

pub use errors::{GenerationError, Result};
pub use generate::{Candidates, LengthRange};
pub use output::wordlist::{WordlistStats, save_wordlist, write_wordlist};
pub use pattern::{
    Alternative, COMMON_BIRTH_YEARS, DEFAULT_DATE_FORMATS, DateFormat, DatePattern, Interleave,
    Literal, Pattern, Repeat, SUPPORTED_YEARS, Sequential,
};
pub use transform::{Alteration, CustomTransform, Transform};
