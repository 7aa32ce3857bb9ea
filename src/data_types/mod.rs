
/// Contains the Genotype call definition and parsing
pub mod genotype;
/// Contains the PhaseCall classification result and positioned calls
pub mod phase_call;
/// Contains the PhaseInterval type produced by clustering
pub mod phase_interval;
/// Contains SNP records, sample sets, and the in-memory genotype table
pub mod snp_record;
