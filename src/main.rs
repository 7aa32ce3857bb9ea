use meiomap::cli::{Settings, check_settings, get_raw_settings};
use meiomap::data_types::snp_record::GenotypeTable;
use meiomap::pipeline::{SamplePhaseResult, phase_all_samples};
use meiomap::table_reader::{TableError, load_genotype_table};
use meiomap::writers::interval_writer::IntervalWriter;
use meiomap::writers::summary_stats::SummaryStatsCollector;

use log::{LevelFilter, debug, error, info};
use std::sync::Arc;
use std::time::Instant;

fn main() {
    // get the settings
    let settings: Settings = get_raw_settings();
    let filter_level: LevelFilter = match settings.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };

    // immediately setup logging first
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();

    // okay, now we can check all the other settings
    let cli_settings: Settings = check_settings(settings);
    let start_time: Instant = Instant::now();

    let table: GenotypeTable = match load_genotype_table(&cli_settings.input_filename, &cli_settings.table_config()) {
        Ok(t) => t,
        Err(e) => {
            error!("Error while loading genotype table: {}", e);
            let code = match e {
                TableError::Io(_) => exitcode::IOERR,
                TableError::UnknownReference { .. } => exitcode::USAGE,
                _ => exitcode::DATAERR
            };
            std::process::exit(code);
        }
    };
    info!("Phasing {} samples against reference {:?}...", table.samples().len(), table.samples().reference_name());

    // nothing is written until every sample is phased
    let arc_table: Arc<GenotypeTable> = Arc::new(table);
    let results: Vec<SamplePhaseResult> = match phase_all_samples(arc_table.clone(), cli_settings.threads) {
        Ok(r) => r,
        Err(e) => {
            error!("Error while phasing samples: {}", e);
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    let interval_writer: IntervalWriter = match IntervalWriter::new(&cli_settings.output_directory) {
        Ok(iw) => iw,
        Err(e) => {
            error!("Error while creating output directory {:?}: {}", cli_settings.output_directory, e);
            std::process::exit(exitcode::CANTCREAT);
        }
    };

    let mut summary_collector: SummaryStatsCollector = SummaryStatsCollector::new();
    for result in results.into_iter() {
        match interval_writer.write_sample(&result) {
            Ok(filename) => {
                debug!("Wrote {} intervals for {} to {:?}", result.intervals.len(), result.sample_name, filename);
            },
            Err(e) => {
                error!("Error while writing intervals for {}: {}", result.sample_name, e);
                std::process::exit(exitcode::IOERR);
            }
        };
        summary_collector.add_result(result);
    }

    if let Some(ref filename) = cli_settings.summary_filename {
        // this will save chromosome level stats to a csv/tsv file
        info!("Saving summary statistics to {:?}...", filename);
        match summary_collector.write_summary(filename, &arc_table) {
            Ok(()) => {},
            Err(e) => {
                error!("Error while writing summary statistics file: {}", e);
                std::process::exit(exitcode::IOERR);
            }
        };
    }

    info!("All samples finished successfully after {} seconds.", start_time.elapsed().as_secs_f64());
}
