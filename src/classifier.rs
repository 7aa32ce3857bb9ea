
use log::trace;

use crate::data_types::genotype::Genotype;
use crate::data_types::phase_call::{PhaseCall, PhasedSnp};
use crate::data_types::snp_record::GenotypeTable;

/// Compares a sample genotype against the reference genotype at an informative SNP.
/// Returns `None` if either call is missing, such rows have no phase call for the sample.
/// # Arguments
/// * `sample` - the genotype of the sample being phased
/// * `reference` - the genotype of the reference sample at the same SNP
pub fn classify(sample: Genotype, reference: Genotype) -> Option<PhaseCall> {
    if sample.is_missing() || reference.is_missing() {
        return None;
    }

    let call = if sample == reference {
        PhaseCall::Concordant
    } else if (sample.is_heterozygous() && reference.is_homozygous()) ||
        (sample.is_homozygous() && reference.is_heterozygous()) {
        PhaseCall::DiscordantHalf
    } else {
        // only opposite homozygous calls are left
        PhaseCall::Discordant
    };
    Some(call)
}

/// The phase calls for one sample along with the number of rows that were excluded for missing data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhaseSequence {
    /// Calls in table order, which is sorted by chromosome and position
    pub calls: Vec<PhasedSnp>,
    /// Informative rows with a no-call in the sample or the reference
    pub num_skipped: usize
}

/// Classifies every informative SNP in the table for a single sample.
/// # Arguments
/// * `table` - the loaded genotype table, already filtered and sorted
/// * `sample_index` - the index of the sample in the table's `SampleSet`
pub fn phase_sequence(table: &GenotypeTable, sample_index: usize) -> PhaseSequence {
    let reference_index = table.samples().reference_index();
    let mut sequence = PhaseSequence::default();
    for record in table.records().iter() {
        match classify(record.genotype(sample_index), record.genotype(reference_index)) {
            Some(call) => {
                sequence.calls.push(PhasedSnp::new(record.chrom().to_string(), record.position(), call));
            },
            None => {
                trace!("Skipping {} ({}:{}) for {}, missing genotype", record.name(), record.chrom(), record.position(), table.samples().name(sample_index));
                sequence.num_skipped += 1;
            }
        }
    }
    sequence
}
