/// Forward proportion under the balanced (unstranded) null.
pub const NULL_PROPORTION: f64 = 0.5;

/// Added to both counts before taking the log2 fold change.
pub const DEFAULT_PSEUDOCOUNT: f64 = 0.5;

/// Lower bound on each proportion before taking its log2 in the entropy.
pub const DEFAULT_ENTROPY_FLOOR: f64 = 1e-10;

/// Libraries with this many stranded reads or fewer never get a directional call.
pub const DEFAULT_MIN_TOTAL: u64 = 3000;

/// `|signed relative difference|` at or below this is called unstranded.
pub const DEFAULT_SIGNED_UNSTRANDED_THRESHOLD: f64 = 0.07156908;

/// Unsigned relative difference at or below this is called unstranded.
pub const DEFAULT_UNSIGNED_UNSTRANDED_THRESHOLD: f64 = 1.0;

/// Significance level used by the narrative report's chi-square conclusion.
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;
