//! The submission build-orchestration pipeline and its external tool
//! boundaries: formatter, syntax checker, and file stager.
//!
//! Submissions that resolve to the same project are serialized through a
//! per-project lock so their staging directories never interleave.

pub mod check;
pub mod format;
pub mod locks;
pub mod pipeline;
pub mod stage;

pub use {
    check::{CommandChecker, SyntaxChecker},
    format::{ClangFormatter, Formatter},
    locks::ProjectLocks,
    pipeline::SubmissionPipeline,
    stage::{FileStager, HttpFileStager},
};
