
use crate::data_types::phase_call::PhaseCall;

/// A maximal run of consecutive informative SNPs on one chromosome that share a phase call for one sample.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct PhaseInterval {
    /// The chromosome of the interval.
    chrom: String,
    /// The coordinate of the first SNP in the run, inclusive.
    start: u64,
    /// The coordinate of the last SNP in the run, inclusive.
    stop: u64,
    /// The phase call shared by every SNP in the run.
    call: PhaseCall,
    /// The number of SNPs collapsed into this interval.
    num_snps: usize
}

impl std::fmt::Debug for PhaseInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // munge the coordinates into a single string
        f.debug_struct("PhaseInterval")
            .field("coordinates", &format!("{}:{}-{}", self.chrom, self.start, self.stop))
            .field("call", &self.call)
            .field("num_snps", &self.num_snps)
            .finish()
    }
}

impl PhaseInterval {
    /// Creates a new interval
    /// # Arguments
    /// * `chrom` - the chromosome of the interval
    /// * `start` - the position of the first SNP, inclusive
    /// * `stop` - the position of the last SNP, inclusive
    /// * `call` - the shared phase call
    /// * `num_snps` - the number of SNPs in the run
    /// # Panics
    /// * if `start > stop` or `num_snps == 0`
    pub fn new(chrom: String, start: u64, stop: u64, call: PhaseCall, num_snps: usize) -> PhaseInterval {
        assert!(start <= stop, "start > stop: {start} > {stop}");
        assert!(num_snps > 0);
        PhaseInterval {
            chrom,
            start,
            stop,
            call,
            num_snps
        }
    }

    pub fn get_chrom(&self) -> &str {
        &self.chrom
    }

    pub fn get_start(&self) -> u64 {
        self.start
    }

    pub fn get_stop(&self) -> u64 {
        self.stop
    }

    pub fn get_call(&self) -> PhaseCall {
        self.call
    }

    pub fn get_num_snps(&self) -> usize {
        self.num_snps
    }

    /// Returns true if the interval is a single coordinate.
    pub fn is_point(&self) -> bool {
        self.start == self.stop
    }

    /// Returns the number of contained base pairs in the interval.
    pub fn bp_len(&self) -> u64 {
        self.stop - self.start + 1
    }

    /// Checks if a coordinate is contained in the interval (both ends inclusive)
    pub fn contains(&self, chrom: &str, position: u64) -> bool {
        self.chrom == chrom && self.start <= position && position <= self.stop
    }
}
