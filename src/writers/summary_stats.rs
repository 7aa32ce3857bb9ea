
use log::debug;
use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::data_types::phase_call::{PhaseCall, PhasedSnp};
use crate::data_types::phase_interval::PhaseInterval;
use crate::data_types::snp_record::GenotypeTable;
use crate::pipeline::SamplePhaseResult;

/// Collects per-sample results and writes chromosome level and overall statistics
#[derive(Default)]
pub struct SummaryStatsCollector {
    /// Results that will be summarized eventually
    results: Vec<SamplePhaseResult>
}

/// Contains all the data written to each row of our summary file
#[derive(Debug, PartialEq, Serialize)]
struct SummaryRow {
    /// the sample name
    sample_name: String,
    /// The chromosome or "all"
    chromosome: String,
    /// The number of maternal heterozygous SNPs
    num_informative: usize,
    /// The number of informative SNPs with a phase call
    num_phased: usize,
    /// The number of informative SNPs without a call in the sample or reference
    num_skipped: usize,
    /// SNP counts per phase call
    num_concordant: usize,
    num_discordant_half: usize,
    num_discordant: usize,
    /// The total number of intervals
    num_intervals: usize,
    /// The number of intervals containing a single SNP
    num_singletons: usize,
    /// SNPs per interval stats
    snps_per_interval_median: usize,
    /// floor of the mean, integer division
    snps_per_interval_mean: usize,
    snps_per_interval_min: usize,
    snps_per_interval_max: usize,
    /// basepairs per interval stats
    basepairs_per_interval_median: u64,
    basepairs_per_interval_max: u64
}

impl SummaryStatsCollector {
    pub fn new() -> SummaryStatsCollector {
        Self::default()
    }

    /// Adds a sample result to our collection
    pub fn add_result(&mut self, result: SamplePhaseResult) {
        self.results.push(result);
    }

    /// Will write a row for every sample and chromosome, followed by an "all" row for the sample.
    /// # Arguments
    /// * `filename` - the filename for the output (tsv/csv)
    /// * `table` - the genotype table the results came from, used for informative SNP counts and chromosome order
    pub fn write_summary(&self, filename: &Path, table: &GenotypeTable) -> csv::Result<()> {
        // modify the delimiter to "," if it ends with .csv
        let is_csv: bool = filename.extension().unwrap_or_default() == "csv";
        let delimiter: u8 = if is_csv { b',' } else { b'\t' };
        let mut csv_writer: csv::Writer<File> = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_path(filename)?;

        for row in self.summary_rows(table).iter() {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    fn summary_rows(&self, table: &GenotypeTable) -> Vec<SummaryRow> {
        let chromosomes: Vec<&str> = table.chromosomes();
        let mut informative_by_chrom: HashMap<&str, usize> = Default::default();
        for record in table.records().iter() {
            *informative_by_chrom.entry(record.chrom()).or_insert(0) += 1;
        }

        let mut rows: Vec<SummaryRow> = vec![];
        for result in self.results.iter() {
            let mut calls_by_chrom: HashMap<&str, Vec<&PhasedSnp>> = Default::default();
            for call in result.calls.iter() {
                calls_by_chrom.entry(call.chrom.as_str()).or_default().push(call);
            }
            let mut intervals_by_chrom: HashMap<&str, Vec<&PhaseInterval>> = Default::default();
            for interval in result.intervals.iter() {
                intervals_by_chrom.entry(interval.get_chrom()).or_default().push(interval);
            }

            for &chrom in chromosomes.iter() {
                rows.push(generate_summary_row(
                    &result.sample_name,
                    chrom,
                    *informative_by_chrom.get(chrom).unwrap_or(&0),
                    calls_by_chrom.get(chrom).map(|v| v.as_slice()).unwrap_or(&[]),
                    intervals_by_chrom.get(chrom).map(|v| v.as_slice()).unwrap_or(&[])
                ));
            }

            let all_calls: Vec<&PhasedSnp> = result.calls.iter().collect();
            let all_intervals: Vec<&PhaseInterval> = result.intervals.iter().collect();
            rows.push(generate_summary_row(
                &result.sample_name,
                "all",
                table.num_informative(),
                &all_calls,
                &all_intervals
            ));
        }
        rows
    }
}

/// Utility function for building a summary row from given data.
/// # Arguments
/// * `sample_name` - pass-through sample ID
/// * `chrom` - pass-through chromosome name
/// * `num_informative` - the number of informative SNPs in the region
/// * `calls` - the phase calls for the sample in the region
/// * `intervals` - the intervals for the sample in the region
fn generate_summary_row(
    sample_name: &str, chrom: &str, num_informative: usize,
    calls: &[&PhasedSnp], intervals: &[&PhaseInterval]
) -> SummaryRow {
    let num_phased: usize = calls.len();
    assert!(num_phased <= num_informative);
    let count_call = |target: PhaseCall| calls.iter().filter(|c| c.call == target).count();

    let mut interval_snps: Vec<usize> = intervals.iter()
        .map(|i| i.get_num_snps())
        .collect();
    let mut interval_lengths: Vec<u64> = intervals.iter()
        .map(|i| i.bp_len())
        .collect();
    debug!("{} {}: {} phased SNPs in {} intervals", sample_name, chrom, num_phased, intervals.len());

    interval_snps.sort();
    interval_lengths.sort();
    SummaryRow {
        sample_name: sample_name.to_string(),
        chromosome: chrom.to_string(),
        num_informative,
        num_phased,
        num_skipped: num_informative - num_phased,
        num_concordant: count_call(PhaseCall::Concordant),
        num_discordant_half: count_call(PhaseCall::DiscordantHalf),
        num_discordant: count_call(PhaseCall::Discordant),
        num_intervals: intervals.len(),
        num_singletons: interval_snps.iter().filter(|&&n| n == 1).count(),
        snps_per_interval_median: median(&interval_snps),
        snps_per_interval_mean: if interval_snps.is_empty() { 0 } else { interval_snps.iter().sum::<usize>() / interval_snps.len() },
        snps_per_interval_min: *interval_snps.first().unwrap_or(&0),
        snps_per_interval_max: *interval_snps.last().unwrap_or(&0),
        basepairs_per_interval_median: median(&interval_lengths),
        basepairs_per_interval_max: *interval_lengths.last().unwrap_or(&0)
    }
}

/// Upper median of sorted values, 0 if empty
fn median<T: Copy + Default>(sorted_values: &[T]) -> T {
    if sorted_values.is_empty() { T::default() } else { sorted_values[sorted_values.len() / 2] }
}
