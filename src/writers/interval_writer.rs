
use log::info;
use serde::Serialize;
use simple_error::bail;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::data_types::phase_call::PhaseCall;
use crate::pipeline::SamplePhaseResult;

/// Extension for the per-sample interval files
pub const INTERVAL_EXTENSION: &str = "bed";

/// Writes one BED-like interval file per sample into an output directory
pub struct IntervalWriter {
    /// The directory that receives all interval files
    output_dir: PathBuf
}

/// Contains all the data written to each row of an interval file
#[derive(Serialize)]
struct IntervalRow<'a> {
    /// the chromosome of the interval
    chrom: &'a str,
    /// the position of the first SNP
    start: u64,
    /// the position of the last SNP
    stop: u64,
    /// the shared phase call, "0", "0.5", or "1"
    phase: PhaseCall
}

impl IntervalWriter {
    /// Creates a new writer, the output directory is created if it does not exist.
    /// # Arguments
    /// * `output_dir` - the destination directory
    /// # Errors
    /// * if the path exists but is not a directory
    /// * if the directory cannot be created
    pub fn new(output_dir: &Path) -> Result<IntervalWriter, Box<dyn std::error::Error>> {
        if !output_dir.exists() {
            info!("Output directory will be created: {:?}", output_dir);
            std::fs::create_dir_all(output_dir)?;
        } else if !output_dir.is_dir() {
            bail!("Output path exists and is not a directory: {:?}", output_dir);
        }
        Ok(IntervalWriter {
            output_dir: output_dir.to_path_buf()
        })
    }

    /// The interval file path for a given sample label
    pub fn interval_filename(&self, sample_label: &str) -> PathBuf {
        self.output_dir.join(format!("{sample_label}.{INTERVAL_EXTENSION}"))
    }

    /// Writes the intervals of one sample to `<output_dir>/<label>.bed`, replacing any existing file.
    /// There is no header; columns are chromosome, start, stop, phase.
    /// # Arguments
    /// * `result` - the phasing result for the sample
    /// # Errors
    /// * if the csv_writer has any errors
    pub fn write_sample(&self, result: &SamplePhaseResult) -> csv::Result<PathBuf> {
        let filename: PathBuf = self.interval_filename(&result.sample_label);
        let mut csv_writer: csv::Writer<File> = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_path(&filename)?;

        for interval in result.intervals.iter() {
            let row = IntervalRow {
                chrom: interval.get_chrom(),
                start: interval.get_start(),
                stop: interval.get_stop(),
                phase: interval.get_call()
            };
            csv_writer.serialize(&row)?;
        }
        csv_writer.flush()?;
        Ok(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::phase_call::PhasedSnp;
    use crate::clusterer::cluster_phase_calls;

    fn result_for(label: &str, calls: Vec<PhasedSnp>) -> SamplePhaseResult {
        SamplePhaseResult {
            sample_index: 0,
            sample_name: format!("{label}.GType"),
            sample_label: label.to_string(),
            intervals: cluster_phase_calls(&calls),
            calls,
            num_skipped: 0
        }
    }

    #[test]
    fn test_write_sample() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_dir = temp_dir.path().join("nested").join("intervals");
        let writer = IntervalWriter::new(&output_dir).unwrap();
        assert!(output_dir.is_dir());

        let calls = vec![
            PhasedSnp::new("chr1".to_string(), 100, PhaseCall::Concordant),
            PhasedSnp::new("chr1".to_string(), 200, PhaseCall::Concordant),
            PhasedSnp::new("chr1".to_string(), 300, PhaseCall::DiscordantHalf),
            PhasedSnp::new("chr1".to_string(), 400, PhaseCall::DiscordantHalf),
            PhasedSnp::new("chr1".to_string(), 500, PhaseCall::Discordant)
        ];
        let filename = writer.write_sample(&result_for("1.PB1", calls)).unwrap();
        assert_eq!(filename, output_dir.join("1.PB1.bed"));

        let contents = std::fs::read_to_string(&filename).unwrap();
        assert_eq!(contents, "chr1\t100\t200\t1\nchr1\t300\t400\t0.5\nchr1\t500\t500\t0\n");
    }

    #[test]
    fn test_empty_sample() {
        let temp_dir = tempfile::tempdir().unwrap();
        let writer = IntervalWriter::new(temp_dir.path()).unwrap();
        let filename = writer.write_sample(&result_for("4.egg", vec![])).unwrap();
        assert_eq!(std::fs::read_to_string(filename).unwrap(), "");
    }

    #[test]
    fn test_output_path_is_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("taken");
        std::fs::write(&file_path, "not a directory").unwrap();
        assert!(IntervalWriter::new(&file_path).is_err());
    }
}
