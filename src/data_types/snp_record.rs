
use log::debug;
use rustc_hash::FxHashMap as HashMap;

use crate::data_types::genotype::Genotype;

/// Suffix on genotype column names that is dropped when building output labels
pub const GENOTYPE_SUFFIX: &str = ".GType";

/// The tracked samples of a table and which of them serves as the phase reference.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SampleSet {
    /// Column names for each tracked sample, in table order
    names: Vec<String>,
    /// The index of the reference sample within `names`
    reference_index: usize
}

impl SampleSet {
    /// Creates a new sample set
    /// # Arguments
    /// * `names` - the sample column names in table order
    /// * `reference_index` - the index of the reference sample in `names`
    /// # Panics
    /// * if `reference_index` is out of bounds
    pub fn new(names: Vec<String>, reference_index: usize) -> SampleSet {
        assert!(reference_index < names.len(), "reference index {reference_index} out of bounds for {} samples", names.len());
        SampleSet {
            names,
            reference_index
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, sample_index: usize) -> &str {
        &self.names[sample_index]
    }

    pub fn reference_index(&self) -> usize {
        self.reference_index
    }

    pub fn reference_name(&self) -> &str {
        &self.names[self.reference_index]
    }

    /// Looks up a sample by column name, with or without the genotype suffix
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter()
            .position(|n| n == name || n.strip_suffix(GENOTYPE_SUFFIX) == Some(name))
    }

    /// The label used for output files, which is the column name minus the genotype suffix.
    pub fn label(&self, sample_index: usize) -> &str {
        let name = self.name(sample_index);
        name.strip_suffix(GENOTYPE_SUFFIX).unwrap_or(name)
    }
}

/// One SNP row from the input table
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SnpRecord {
    /// The probe or SNP name
    name: String,
    /// The chromosome of the SNP
    chrom: String,
    /// The coordinate of the SNP as given in the table
    position: u64,
    /// The genotype of the mother
    maternal: Genotype,
    /// One genotype per tracked sample, ordered as the `SampleSet`
    genotypes: Vec<Genotype>
}

impl SnpRecord {
    pub fn new(name: String, chrom: String, position: u64, maternal: Genotype, genotypes: Vec<Genotype>) -> SnpRecord {
        SnpRecord {
            name,
            chrom,
            position,
            maternal,
            genotypes
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn genotype(&self, sample_index: usize) -> Genotype {
        self.genotypes[sample_index]
    }

    /// Only SNPs where the mother is heterozygous can separate her two haplotypes.
    pub fn is_informative(&self) -> bool {
        self.maternal.is_heterozygous()
    }
}

/// A fully loaded genotype table restricted to informative SNPs.
#[derive(Clone, Debug)]
pub struct GenotypeTable {
    /// The tracked samples and the reference choice
    samples: SampleSet,
    /// Informative records, sorted by chromosome (first appearance) and position
    records: Vec<SnpRecord>,
    /// The number of data rows read before filtering
    num_input_rows: usize
}

impl GenotypeTable {
    /// Builds a table from raw records.
    /// Non-informative records are dropped and the remainder are sorted so every chromosome is contiguous and ascending by position.
    /// # Arguments
    /// * `samples` - the tracked samples
    /// * `records` - all records from the input, in file order
    /// # Panics
    /// * if any record has a genotype count that does not match `samples`
    pub fn new(samples: SampleSet, mut records: Vec<SnpRecord>) -> GenotypeTable {
        assert!(records.iter().all(|r| r.genotypes.len() == samples.len()));
        let num_input_rows = records.len();
        records.retain(|r| r.is_informative());
        debug!("Retained {} / {} maternal heterozygous SNPs", records.len(), num_input_rows);

        sort_by_position(&mut records);
        GenotypeTable {
            samples,
            records,
            num_input_rows
        }
    }

    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }

    pub fn records(&self) -> &[SnpRecord] {
        &self.records
    }

    pub fn num_input_rows(&self) -> usize {
        self.num_input_rows
    }

    pub fn num_informative(&self) -> usize {
        self.records.len()
    }

    /// Returns the chromosomes in table order
    pub fn chromosomes(&self) -> Vec<&str> {
        let mut chroms: Vec<&str> = vec![];
        for record in self.records.iter() {
            if chroms.last() != Some(&record.chrom()) {
                chroms.push(record.chrom());
            }
        }
        chroms
    }
}

/// Stable sort that groups chromosomes in order of first appearance and orders each group by position.
fn sort_by_position(records: &mut [SnpRecord]) {
    let mut chrom_rank: HashMap<String, usize> = Default::default();
    for record in records.iter() {
        let next_rank = chrom_rank.len();
        chrom_rank.entry(record.chrom.clone()).or_insert(next_rank);
    }
    records.sort_by_key(|r| (chrom_rank[&r.chrom], r.position));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(chrom: &str, position: u64, maternal: Genotype) -> SnpRecord {
        SnpRecord::new(
            format!("rs{position}"), chrom.to_string(), position, maternal,
            vec![Genotype::Heterozygous, Genotype::HomozygousReference]
        )
    }

    fn samples() -> SampleSet {
        SampleSet::new(vec!["1.PB1.GType".to_string(), "1.egg.GType".to_string()], 0)
    }

    #[test]
    fn test_sample_set() {
        let samples = samples();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples.reference_name(), "1.PB1.GType");
        assert_eq!(samples.label(1), "1.egg");
        assert_eq!(samples.index_of("1.egg"), Some(1));
        assert_eq!(samples.index_of("1.egg.GType"), Some(1));
        assert_eq!(samples.index_of("2.egg"), None);
    }

    #[test]
    #[should_panic]
    fn test_bad_reference_index() {
        SampleSet::new(vec!["1.PB1.GType".to_string()], 1);
    }

    #[test]
    fn test_informative_filter() {
        let records = vec![
            record("chr1", 100, Genotype::Heterozygous),
            record("chr1", 200, Genotype::HomozygousReference),
            record("chr1", 300, Genotype::NoCall),
            record("chr1", 400, Genotype::Heterozygous),
            record("chr1", 500, Genotype::HomozygousAlternate)
        ];
        let table = GenotypeTable::new(samples(), records);
        assert_eq!(table.num_input_rows(), 5);
        assert_eq!(table.num_informative(), 2);
        let positions: Vec<u64> = table.records().iter().map(|r| r.position()).collect();
        assert_eq!(positions, vec![100, 400]);
    }

    #[test]
    fn test_sort_by_position() {
        let records = vec![
            record("chr2", 50, Genotype::Heterozygous),
            record("chr1", 300, Genotype::Heterozygous),
            record("chr2", 10, Genotype::Heterozygous),
            record("chr1", 100, Genotype::Heterozygous),
            record("chrX", 5, Genotype::Heterozygous)
        ];
        let table = GenotypeTable::new(samples(), records);
        let coordinates: Vec<(&str, u64)> = table.records().iter()
            .map(|r| (r.chrom(), r.position()))
            .collect();
        assert_eq!(coordinates, vec![
            ("chr2", 10), ("chr2", 50),
            ("chr1", 100), ("chr1", 300),
            ("chrX", 5)
        ]);
        assert_eq!(table.chromosomes(), vec!["chr2", "chr1", "chrX"]);
    }
}
