//! cvrank - rank resumes against a job description by lexical similarity.
//!
//! cvrank ingests resumes from plain-text, PDF, and tabular (CSV) sources,
//! normalizes them, and scores each one against a job description using
//! TF-IDF weighting and cosine similarity. The term space is rebuilt for
//! every ranking call: IDF weights are relative to the exact corpus being
//! ranked, so results are only meaningful within a single invocation.
//!
//! # Quick start
//!
//! ```
//! use cvrank::normalize::normalize;
//! use cvrank::rank::rank_resumes;
//!
//! let job = normalize("Python backend developer");
//! let resumes: Vec<String> = [
//!     "Experienced Python backend developer",
//!     "Frontend React developer",
//!     "Chef with 10 years of experience",
//! ]
//! .iter()
//! .map(|r| normalize(r))
//! .collect();
//!
//! let ranked = rank_resumes(&job, &resumes, 2);
//! assert_eq!(ranked.len(), 2);
//! assert_eq!(ranked[0].index, 0);
//! assert!(ranked[0].score > ranked[1].score);
//! ```

pub mod error;
pub mod ingest;
pub mod normalize;
pub mod rank;
pub mod tfidf;
pub mod tokenizer;
pub mod walker;

pub use error::{Error, Result};
pub use ingest::{IngestReport, RawResume, SkipReason, SkippedSource, SourceItem, SourceKind};
pub use rank::{RankedResume, rank_resumes};
pub use tfidf::TermSpace;
