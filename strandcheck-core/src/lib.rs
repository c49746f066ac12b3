//! Core models and readers for strandcheck.
//!
//! An upstream counter writes one whitespace-delimited line per sample (or
//! per chunk of a sample) holding the number of reads assigned to each
//! strand. This crate turns those lines into [`StrandCountObservation`]s:
//!
//! ```no_run
//! use strandcheck_core::{RecordLayout, read_observations};
//!
//! let observations = read_observations("sample.counts.txt", RecordLayout::Sample).unwrap();
//! for obs in &observations {
//!     println!("{}: {} forward, {} reverse", obs.label, obs.forward, obs.reverse);
//! }
//! ```

pub mod consts;
pub mod errors;
pub mod io;
pub mod models;

// re-exports
pub use errors::RecordParseError;
pub use io::{CountRecords, RecordLayout, read_observations};
pub use models::{StrandCountObservation, Strandedness};
