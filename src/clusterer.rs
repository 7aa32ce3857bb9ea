
use log::trace;
use rustc_hash::FxHashMap as HashMap;

use crate::data_types::phase_call::PhasedSnp;
use crate::data_types::phase_interval::PhaseInterval;

/// Collapses a sample's ordered phase calls into phase intervals.
/// Each call starts out as a point interval, which are then merged by `cluster_intervals`.
/// # Arguments
/// * `calls` - phase calls for a single sample, contiguous by chromosome and ascending by position within each
pub fn cluster_phase_calls(calls: &[PhasedSnp]) -> Vec<PhaseInterval> {
    let rows: Vec<PhaseInterval> = calls.iter()
        .map(|c| PhaseInterval::new(c.chrom.clone(), c.position, c.position, c.call, 1))
        .collect();
    cluster_intervals(&rows)
}

/// Merges consecutive rows that share a phase call, never crossing a chromosome boundary.
/// Clustering output that is already clustered returns it unchanged.
/// # Arguments
/// * `rows` - intervals contiguous by chromosome and ascending by start within each
/// # Panics
/// * if `rows` are not sorted within a chromosome, a merged start may pass its stop
pub fn cluster_intervals(rows: &[PhaseInterval]) -> Vec<PhaseInterval> {
    let mut intervals: Vec<PhaseInterval> = Vec::with_capacity(rows.len());
    let mut group_start: usize = 0;
    while group_start < rows.len() {
        let chrom = rows[group_start].get_chrom();
        let group_len = rows[group_start..].iter()
            .take_while(|r| r.get_chrom() == chrom)
            .count();
        let group = &rows[group_start..group_start+group_len];
        let mut chrom_intervals = cluster_chromosome(group);
        trace!("{}: {} rows clustered into {} intervals", chrom, group.len(), chrom_intervals.len());
        intervals.append(&mut chrom_intervals);
        group_start += group_len;
    }
    intervals
}

/// Clusters a single chromosome.
/// Starts are propagated forward through runs of equal calls, then only the last row for each distinct start is kept.
/// The kept row carries the stop and the call for its run.
fn cluster_chromosome(rows: &[PhaseInterval]) -> Vec<PhaseInterval> {
    debug_assert!(rows.windows(2).all(|w| w[0].get_start() <= w[1].get_start()), "rows must be sorted by start");

    let mut starts: Vec<u64> = Vec::with_capacity(rows.len());
    let mut last_index: HashMap<u64, usize> = Default::default();
    let mut snp_counts: HashMap<u64, usize> = Default::default();
    for (i, row) in rows.iter().enumerate() {
        let start: u64 = if i > 0 && rows[i-1].get_call() == row.get_call() {
            starts[i-1]
        } else {
            row.get_start()
        };
        starts.push(start);
        last_index.insert(start, i);
        *snp_counts.entry(start).or_insert(0) += row.get_num_snps();
    }

    rows.iter().zip(starts.iter())
        .enumerate()
        .filter(|(i, (_row, start))| last_index[*start] == *i)
        .map(|(_i, (row, &start))| {
            PhaseInterval::new(row.get_chrom().to_string(), start, row.get_stop(), row.get_call(), snp_counts[&start])
        })
        .collect()
}
