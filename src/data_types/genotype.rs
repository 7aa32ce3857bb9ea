
use std::str::FromStr;

/// A diploid, bi-allelic SNP array call.
/// The discriminants are the ordinal labels used in normalized tables, they carry no quantitative meaning.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, strum_macros::EnumString)]
pub enum Genotype {
    /// AA
    #[strum(serialize = "AA", serialize = "0")]
    HomozygousReference=0,
    /// AB
    #[strum(serialize = "AB", serialize = "1")]
    Heterozygous=1,
    /// BB
    #[strum(serialize = "BB", serialize = "2")]
    HomozygousAlternate=2,
    /// NC, the assay could not make a confident call
    #[strum(serialize = "NC", serialize = "")]
    NoCall=3 // make sure NoCall is always the last one in the list
}

impl Genotype {
    /// Parses a raw genotype field from an input table, surrounding whitespace is ignored.
    /// Returns `None` if the field is not a recognized call or no-call.
    pub fn parse_field(field: &str) -> Option<Genotype> {
        Genotype::from_str(field.trim()).ok()
    }

    pub fn is_missing(&self) -> bool {
        *self == Genotype::NoCall
    }

    pub fn is_heterozygous(&self) -> bool {
        *self == Genotype::Heterozygous
    }

    /// Returns true for either homozygous call; no-calls are not homozygous.
    pub fn is_homozygous(&self) -> bool {
        match self {
            Genotype::HomozygousReference |
            Genotype::HomozygousAlternate => true,

            Genotype::Heterozygous |
            Genotype::NoCall => false
        }
    }
}
