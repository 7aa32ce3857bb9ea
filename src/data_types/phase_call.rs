
use serde::{Serialize, Serializer};

/// The concordance of a sample genotype with the reference genotype at one informative SNP.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum PhaseCall {
    /// Opposite homozygous calls, written as "0"
    Discordant=0,
    /// One call is heterozygous and the other is homozygous, written as "0.5"
    DiscordantHalf,
    /// Identical calls, written as "1"
    Concordant
}

impl PhaseCall {
    /// The label used in interval files.
    pub fn label(&self) -> &'static str {
        match self {
            PhaseCall::Discordant => "0",
            PhaseCall::DiscordantHalf => "0.5",
            PhaseCall::Concordant => "1"
        }
    }
}

impl std::fmt::Display for PhaseCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// the label is serialized rather than the score so "1" never turns into "1.0"
impl Serialize for PhaseCall {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// A single phase call anchored to its genomic coordinate
#[derive(Clone, Debug, PartialEq)]
pub struct PhasedSnp {
    /// the chromosome of the SNP
    pub chrom: String,
    /// the coordinate of the SNP
    pub position: u64,
    /// the phase call for the SNP
    pub call: PhaseCall
}

impl PhasedSnp {
    pub fn new(chrom: String, position: u64, call: PhaseCall) -> PhasedSnp {
        PhasedSnp {
            chrom,
            position,
            call
        }
    }
}
