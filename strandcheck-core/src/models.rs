use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

///
/// One row of a strand count file: reads assigned to the forward and the
/// reverse strand for a single sample (or a single chunk of a sample).
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StrandCountObservation {
    pub forward: u64,
    pub reverse: u64,
    /// File name or chunk label such as `1M`.
    pub label: String,
}

impl StrandCountObservation {
    pub fn new(forward: u64, reverse: u64, label: impl Into<String>) -> Self {
        StrandCountObservation {
            forward,
            reverse,
            label: label.into(),
        }
    }

    ///
    /// Total number of stranded reads. May be zero. Saturates at `u64::MAX`.
    ///
    pub fn total(&self) -> u64 {
        self.forward.saturating_add(self.reverse)
    }

    pub fn is_empty(&self) -> bool {
        self.forward == 0 && self.reverse == 0
    }
}

impl Display for StrandCountObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.label, self.forward, self.reverse)
    }
}

/// Strandedness protocol of a sequencing library, as called from strand counts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strandedness {
    /// Reads are biased towards the forward strand.
    #[cfg_attr(feature = "serde", serde(rename = "fr-firststrand"))]
    FrFirstStrand,
    /// Reads are biased towards the reverse strand.
    #[cfg_attr(feature = "serde", serde(rename = "fr-secondstrand"))]
    FrSecondStrand,
    /// No usable strand bias.
    #[cfg_attr(feature = "serde", serde(rename = "fr-unstranded"))]
    FrUnstranded,
    /// Too few reads to make a call.
    #[cfg_attr(feature = "serde", serde(rename = "insufficient-data"))]
    InsufficientData,
}

impl Strandedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strandedness::FrFirstStrand => "fr-firststrand",
            Strandedness::FrSecondStrand => "fr-secondstrand",
            Strandedness::FrUnstranded => "fr-unstranded",
            Strandedness::InsufficientData => "insufficient-data",
        }
    }

    /// `true` for the two directional calls.
    pub fn is_stranded(&self) -> bool {
        matches!(
            self,
            Strandedness::FrFirstStrand | Strandedness::FrSecondStrand
        )
    }
}

impl Display for Strandedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Strandedness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fr-firststrand" => Ok(Strandedness::FrFirstStrand),
            "fr-secondstrand" => Ok(Strandedness::FrSecondStrand),
            "fr-unstranded" => Ok(Strandedness::FrUnstranded),
            "insufficient-data" => Ok(Strandedness::InsufficientData),
            _ => Err(format!("Invalid strandedness: {}", s)),
        }
    }
}
