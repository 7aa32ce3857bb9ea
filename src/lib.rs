
/// Phase classification of a sample genotype against the reference genotype
pub mod classifier;
/// CLI functionality and checks
pub mod cli;
/// Run-length clustering of phase calls into phase intervals
pub mod clusterer;
/// Contains multiple wrappers for useful data types in meiomap
pub mod data_types;
/// Runs classification and clustering for each sample, optionally in parallel
pub mod pipeline;
/// Loads the tab-delimited genotype table into typed records
pub mod table_reader;
/// Contains all the various output writer functionality
pub mod writers;
