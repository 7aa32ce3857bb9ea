
use flate2::bufread::MultiGzDecoder;
use log::{debug, info, warn};
use rustc_hash::FxHashMap as HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::data_types::genotype::Genotype;
use crate::data_types::snp_record::{GenotypeTable, SampleSet, SnpRecord};

/// Column names assumed when the input has no header row: probe name, chromosome, position, maternal call, then four meioses of PB1, PB2, and egg.
pub const CANONICAL_COLUMNS: [&str; 16] = [
    "Name", "Chr", "Position", "gDNA.GType",
    "1.PB1.GType", "1.PB2.GType", "1.egg.GType",
    "2.PB1.GType", "2.PB2.GType", "2.egg.GType",
    "3.PB1.GType", "3.PB2.GType", "3.egg.GType",
    "4.PB1.GType", "4.PB2.GType", "4.egg.GType"
];

/// The number of leading columns that are not tracked samples: name, chromosome, position, maternal genotype
pub const NUM_FIXED_COLUMNS: usize = 4;

#[derive(thiserror::Error, Debug)]
pub enum TableError {
    #[error("header has {found} columns, expected at least {} (name, chromosome, position, maternal genotype, samples...)", NUM_FIXED_COLUMNS + 1)]
    TooFewColumns { found: usize },
    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount { line: u64, expected: usize, found: usize },
    #[error("line {line}: could not parse position {value:?}")]
    InvalidPosition { line: u64, value: String },
    #[error("line {line}: unrecognized genotype {value:?} in column {column:?}")]
    InvalidGenotype { line: u64, column: String, value: String },
    #[error("sample columns {first:?} and {second:?} both map to the output label {label:?}")]
    DuplicateSampleLabel { label: String, first: String, second: String },
    #[error("sample column {name:?} cannot be used as an output file name")]
    InvalidSampleLabel { name: String },
    #[error("reference sample {name:?} is not one of the sample columns")]
    UnknownReference { name: String },
    #[error("error while reading table: {0}")]
    Csv(#[from] csv::Error),
    #[error("error while opening table: {0}")]
    Io(#[from] std::io::Error)
}

/// Options that control how a genotype table is parsed
#[derive(Clone, Debug)]
pub struct TableConfig {
    /// if true, the first row holds column names
    pub has_header: bool,
    /// the sample column to phase against, defaults to the first sample column
    pub reference: Option<String>
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            has_header: true,
            reference: None
        }
    }
}

/// Loads a tab-delimited genotype table from a file, gzip is allowed.
/// # Arguments
/// * `filename` - the table to load, a `.gz` extension enables decompression
/// * `config` - header and reference options
/// # Errors
/// * if the file cannot be opened or any row fails to parse
pub fn load_genotype_table(filename: &Path, config: &TableConfig) -> Result<GenotypeTable, TableError> {
    info!("Loading {:?}...", filename);
    let table_file: File = File::open(filename)?;
    let file_reader = BufReader::new(table_file);
    let table = if filename.extension().unwrap_or_default() == "gz" {
        debug!("Detected gzip extension, loading table with MultiGzDecoder...");
        read_genotype_table(MultiGzDecoder::new(file_reader), config)?
    } else {
        debug!("Loading table as plain-text file...");
        read_genotype_table(file_reader, config)?
    };
    info!("Finished loading {} SNPs, {} are maternal heterozygous.", table.num_input_rows(), table.num_informative());
    Ok(table)
}

/// Parses a tab-delimited genotype table from any reader.
/// # Arguments
/// * `reader` - the raw table
/// * `config` - header and reference options
/// # Errors
/// * if the column count is wrong, a position is not an integer, or a genotype is unrecognized
/// * if the requested reference sample does not exist
pub fn read_genotype_table<R: Read>(reader: R, config: &TableConfig) -> Result<GenotypeTable, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(config.has_header)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let columns: Vec<String> = if config.has_header {
        csv_reader.headers()?.iter()
            .map(|h| h.trim().to_string())
            .collect()
    } else {
        CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect()
    };
    if columns.len() <= NUM_FIXED_COLUMNS {
        return Err(TableError::TooFewColumns { found: columns.len() });
    }

    let sample_names: Vec<String> = columns[NUM_FIXED_COLUMNS..].to_vec();
    let samples = SampleSet::new(sample_names, 0);
    check_sample_labels(&samples)?;
    let samples: SampleSet = match config.reference.as_ref() {
        Some(name) => {
            let reference_index = samples.index_of(name)
                .ok_or_else(|| TableError::UnknownReference { name: name.clone() })?;
            SampleSet::new(samples.names().to_vec(), reference_index)
        },
        None => samples
    };
    debug!("Tracking {} samples, reference sample is {:?}", samples.len(), samples.reference_name());

    let mut records: Vec<SnpRecord> = vec![];
    for result in csv_reader.records() {
        let row: csv::StringRecord = result?;
        let line: u64 = row.position().map(|p| p.line()).unwrap_or_default();
        if row.len() != columns.len() {
            return Err(TableError::ColumnCount { line, expected: columns.len(), found: row.len() });
        }

        let position_field = row[2].trim();
        let position: u64 = position_field.parse()
            .map_err(|_| TableError::InvalidPosition { line, value: position_field.to_string() })?;

        let parse_genotype = |column_index: usize| -> Result<Genotype, TableError> {
            Genotype::parse_field(&row[column_index]).ok_or_else(|| TableError::InvalidGenotype {
                line,
                column: columns[column_index].clone(),
                value: row[column_index].to_string()
            })
        };
        let maternal: Genotype = parse_genotype(3)?;
        let genotypes: Vec<Genotype> = (NUM_FIXED_COLUMNS..columns.len())
            .map(parse_genotype)
            .collect::<Result<_, _>>()?;

        records.push(SnpRecord::new(
            row[0].trim().to_string(),
            row[1].trim().to_string(),
            position,
            maternal,
            genotypes
        ));
    }

    if records.is_empty() {
        warn!("Genotype table contains no data rows.");
    }
    Ok(GenotypeTable::new(samples, records))
}

/// Every sample gets its own `<label>.bed`, so labels must be unique plain file names.
fn check_sample_labels(samples: &SampleSet) -> Result<(), TableError> {
    let mut seen: HashMap<&str, usize> = Default::default();
    for sample_index in 0..samples.len() {
        let label = samples.label(sample_index);
        if label.is_empty() || label == "." || label == ".." || label.contains(['/', '\\']) {
            return Err(TableError::InvalidSampleLabel { name: samples.name(sample_index).to_string() });
        }
        if let Some(&first_index) = seen.get(label) {
            return Err(TableError::DuplicateSampleLabel {
                label: label.to_string(),
                first: samples.name(first_index).to_string(),
                second: samples.name(sample_index).to_string()
            });
        }
        seen.insert(label, sample_index);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SMALL_TABLE: &str = "Name\tChr\tPosition\tgDNA.GType\tA.GType\tB.GType\n\
        rs1\tchr1\t100\tAB\tAB\tAB\n\
        rs2\tchr1\t200\tAA\tAB\tBB\n\
        rs3\tchr1\t300\tAB\tAB\tNC\n\
        rs4\tchr1\t400\tNC\tAB\tAA\n";

    #[test]
    fn test_read_with_header() {
        let table = read_genotype_table(SMALL_TABLE.as_bytes(), &TableConfig::default()).unwrap();
        assert_eq!(table.samples().names(), &["A.GType".to_string(), "B.GType".to_string()]);
        assert_eq!(table.samples().reference_index(), 0);
        assert_eq!(table.num_input_rows(), 4);

        // only maternal het rows survive
        let names: Vec<&str> = table.records().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["rs1", "rs3"]);
        assert_eq!(table.records()[1].genotype(1), Genotype::NoCall);
    }

    #[test]
    fn test_named_reference() {
        let config = TableConfig { has_header: true, reference: Some("B".to_string()) };
        let table = read_genotype_table(SMALL_TABLE.as_bytes(), &config).unwrap();
        assert_eq!(table.samples().reference_index(), 1);

        let config = TableConfig { has_header: true, reference: Some("C".to_string()) };
        let result = read_genotype_table(SMALL_TABLE.as_bytes(), &config);
        assert!(matches!(result, Err(TableError::UnknownReference { .. })));
    }

    #[test]
    fn test_read_without_header() {
        let row = "rs1\tchr1\t100\tAB\tAB\tAA\tBB\tAB\tAB\tAB\tAB\tAB\tAB\tAB\tAB\tNC\n";
        let config = TableConfig { has_header: false, reference: None };
        let table = read_genotype_table(row.as_bytes(), &config).unwrap();
        assert_eq!(table.samples().len(), 12);
        assert_eq!(table.samples().reference_name(), "1.PB1.GType");
        assert_eq!(table.samples().label(11), "4.egg");
        assert_eq!(table.records()[0].genotype(1), Genotype::HomozygousReference);
        assert_eq!(table.records()[0].genotype(11), Genotype::NoCall);
    }

    #[test]
    fn test_wrong_column_count() {
        let config = TableConfig { has_header: false, reference: None };
        let result = read_genotype_table("rs1\tchr1\t100\tAB\tAB\n".as_bytes(), &config);
        assert!(matches!(result, Err(TableError::ColumnCount { line: 1, expected: 16, found: 5 })));

        let table = "Name\tChr\tPosition\tgDNA.GType\tA.GType\nrs1\tchr1\t100\tAB\n";
        let result = read_genotype_table(table.as_bytes(), &TableConfig::default());
        assert!(matches!(result, Err(TableError::ColumnCount { line: 2, expected: 5, found: 4 })));
    }

    #[test]
    fn test_malformed_values() {
        let table = "Name\tChr\tPosition\tgDNA.GType\tA.GType\nrs1\tchr1\tabc\tAB\tAB\n";
        let result = read_genotype_table(table.as_bytes(), &TableConfig::default());
        assert!(matches!(result, Err(TableError::InvalidPosition { .. })));

        let table = "Name\tChr\tPosition\tgDNA.GType\tA.GType\nrs1\tchr1\t100\tAB\tXY\n";
        match read_genotype_table(table.as_bytes(), &TableConfig::default()) {
            Err(TableError::InvalidGenotype { line, column, value }) => {
                assert_eq!(line, 2);
                assert_eq!(column, "A.GType");
                assert_eq!(value, "XY");
            },
            other => panic!("unexpected result: {other:?}")
        };

        let table = "Name\tChr\tPosition\tgDNA.GType\n";
        let result = read_genotype_table(table.as_bytes(), &TableConfig::default());
        assert!(matches!(result, Err(TableError::TooFewColumns { found: 4 })));
    }

    #[test]
    fn test_sample_label_collisions() {
        // suffixed and bare names land on the same interval file
        let table = "Name\tChr\tPosition\tgDNA.GType\t1.egg.GType\t1.egg\nrs1\tchr1\t100\tAB\tAB\tAA\n";
        match read_genotype_table(table.as_bytes(), &TableConfig::default()) {
            Err(TableError::DuplicateSampleLabel { label, first, second }) => {
                assert_eq!(label, "1.egg");
                assert_eq!(first, "1.egg.GType");
                assert_eq!(second, "1.egg");
            },
            other => panic!("unexpected result: {other:?}")
        };

        let table = "Name\tChr\tPosition\tgDNA.GType\tA.GType\tA.GType\nrs1\tchr1\t100\tAB\tAB\tAA\n";
        let result = read_genotype_table(table.as_bytes(), &TableConfig::default());
        assert!(matches!(result, Err(TableError::DuplicateSampleLabel { .. })));

        for bad_name in ["../x.GType", "a/b", "..", ".GType"] {
            let table = format!("Name\tChr\tPosition\tgDNA.GType\tA.GType\t{bad_name}\nrs1\tchr1\t100\tAB\tAB\tAA\n");
            match read_genotype_table(table.as_bytes(), &TableConfig::default()) {
                Err(TableError::InvalidSampleLabel { name }) => assert_eq!(name, bad_name),
                other => panic!("unexpected result for {bad_name:?}: {other:?}")
            };
        }
    }

    #[test]
    fn test_quotes_are_literal() {
        let table = "Name\tChr\tPosition\tgDNA.GType\tA.GType\tB.GType\n\
            rs\"1\tchr1\t100\tAB\tAB\tAA\n\
            rs2\tchr1\t200\tAB\tAB\tBB\n";
        let table = read_genotype_table(table.as_bytes(), &TableConfig::default()).unwrap();
        assert_eq!(table.num_informative(), 2);
        assert_eq!(table.records()[0].name(), "rs\"1");
        assert_eq!(table.records()[0].genotype(1), Genotype::HomozygousReference);
    }

    #[test]
    fn test_load_files() {
        let tables = vec![
            "./test_data/meiosis_small.tsv",
            "./test_data/meiosis_small.tsv.gz"
        ];
        for &table_fn in tables.iter() {
            let table = load_genotype_table(&PathBuf::from(table_fn), &TableConfig::default()).unwrap();
            assert_eq!(table.samples().len(), 12);
            assert_eq!(table.num_input_rows(), 8);
            assert_eq!(table.num_informative(), 6);
            assert_eq!(table.chromosomes(), vec!["1", "2"]);
        }

        // the same rows without a header pick up the canonical names
        let with_header = load_genotype_table(&PathBuf::from("./test_data/meiosis_small.tsv"), &TableConfig::default()).unwrap();
        let config = TableConfig { has_header: false, reference: Some("1.PB1".to_string()) };
        let without_header = load_genotype_table(&PathBuf::from("./test_data/meiosis_small_noheader.tsv"), &config).unwrap();
        assert_eq!(with_header.samples(), without_header.samples());
        assert_eq!(with_header.records(), without_header.records());
    }
}
