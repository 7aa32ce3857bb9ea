
use log::{debug, info, warn};
use simple_error::bail;
use std::sync::{Arc, mpsc};
use threadpool::ThreadPool;

use crate::classifier::{PhaseSequence, phase_sequence};
use crate::clusterer::cluster_phase_calls;
use crate::data_types::phase_call::PhasedSnp;
use crate::data_types::phase_interval::PhaseInterval;
use crate::data_types::snp_record::GenotypeTable;

/// Everything produced by the classify-then-cluster pipeline for one sample
#[derive(Clone, Debug)]
pub struct SamplePhaseResult {
    /// The index of the sample in the table's `SampleSet`
    pub sample_index: usize,
    /// The column name of the sample
    pub sample_name: String,
    /// The output label of the sample
    pub sample_label: String,
    /// Per-SNP phase calls that fed the clustering
    pub calls: Vec<PhasedSnp>,
    /// The number of informative SNPs without a call for this sample
    pub num_skipped: usize,
    /// The clustered phase intervals
    pub intervals: Vec<PhaseInterval>
}

/// Runs the classifier and the clusterer for a single sample.
/// # Arguments
/// * `table` - the informative, sorted genotype table
/// * `sample_index` - the sample to phase against the table's reference
pub fn phase_sample(table: &GenotypeTable, sample_index: usize) -> SamplePhaseResult {
    let samples = table.samples();
    let PhaseSequence { calls, num_skipped } = phase_sequence(table, sample_index);
    let intervals = cluster_phase_calls(&calls);
    debug!("{}: {} phased SNPs, {} skipped, {} intervals", samples.name(sample_index), calls.len(), num_skipped, intervals.len());
    SamplePhaseResult {
        sample_index,
        sample_name: samples.name(sample_index).to_string(),
        sample_label: samples.label(sample_index).to_string(),
        calls,
        num_skipped,
        intervals
    }
}

/// Phases every tracked sample in the table, results come back in sample order.
/// Samples are independent, so with `threads > 1` each one is a separate job in a thread pool.
/// # Arguments
/// * `table` - the shared genotype table
/// * `threads` - the number of worker threads; 0 or 1 runs everything on the calling thread
/// # Errors
/// * if a worker panics or the result channel closes early
pub fn phase_all_samples(table: Arc<GenotypeTable>, threads: usize) -> Result<Vec<SamplePhaseResult>, Box<dyn std::error::Error>> {
    let num_samples: usize = table.samples().len();
    if table.num_informative() == 0 {
        if table.num_input_rows() == 0 {
            warn!("No SNPs were loaded, all interval files will be empty.");
        } else {
            warn!("None of the {} loaded SNPs are maternal heterozygous, all interval files will be empty.", table.num_input_rows());
        }
    }

    let mut results: Vec<SamplePhaseResult> = if threads <= 1 {
        (0..num_samples)
            .map(|sample_index| phase_sample(&table, sample_index))
            .collect()
    } else {
        info!("Starting job pool with {} threads...", threads);
        let pool = ThreadPool::new(threads);
        let (tx, rx) = mpsc::channel();
        for sample_index in 0..num_samples {
            let tx = tx.clone();
            let arc_table = table.clone();
            pool.execute(move || {
                let result = phase_sample(&arc_table, sample_index);
                tx.send(result).expect("channel will be there waiting for the pool");
            });
        }
        // workers hold the only senders from here on
        drop(tx);

        let mut received: Vec<SamplePhaseResult> = Vec::with_capacity(num_samples);
        while received.len() < num_samples {
            if pool.panic_count() > 0 {
                bail!("Panic detected in ThreadPool, check above for details.");
            }
            match rx.recv() {
                Ok(r) => received.push(r),
                Err(e) => bail!("Result channel closed after {} / {} samples: {}", received.len(), num_samples, e)
            };
        }
        received
    };

    // make sure output order never depends on thread scheduling
    results.sort_by_key(|r| r.sample_index);
    Ok(results)
}
