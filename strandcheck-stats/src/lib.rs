//! Strand-bias statistics and strandedness classification.
//!
//! Given forward/reverse read counts for a sequencing library this crate
//! computes:
//!
//! - Proportions, fold change and relative difference of the two strands
//! - A chi-square goodness-of-fit test against an even split
//! - Effect sizes (Cohen's h, Cramér's V) and a Bayes factor that do not
//!   inflate with sequencing depth
//! - Distribution distances (epsilon, Hellinger, normalized entropy)
//!
//! and calls the library `fr-firststrand`, `fr-secondstrand`, `fr-unstranded`
//! or `insufficient-data`.
//!
//! # Example
//!
//! ```no_run
//! use strandcheck_core::{RecordLayout, read_observations};
//! use strandcheck_stats::{ClassifierVariant, StrandAnalyzer, TableStyle, format_stats_table};
//!
//! let observations = read_observations("sample.counts.txt", RecordLayout::Sample).unwrap();
//!
//! let analyzer = StrandAnalyzer::new(ClassifierVariant::UnsignedRelativeDifferenceWithRatio);
//! let stats = analyzer.analyze_all(&observations);
//!
//! println!("{}", format_stats_table(&stats, TableStyle::Full, "\t"));
//! ```

pub mod classifier;
pub mod config;
pub mod consts;
pub mod counts;
pub mod metrics;
pub mod report;
pub mod statistics;

// re-exports
pub use classifier::{
    ClassificationEvidence, ClassifierThresholds, ClassifierVariant, StrandednessClassifier,
};
pub use config::{ConfigError, StrandCheckConfig};
pub use counts::CountBasedStatistics;
pub use report::{OutputFormat, TableStyle, format_count_table, format_stats_table};
pub use statistics::{StrandAnalyzer, StrandStatistics, compute_strand_statistics};
