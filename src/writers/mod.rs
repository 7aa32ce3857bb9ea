
/// Contains the writer for per-sample phase interval files
pub mod interval_writer;
/// Contains the collector and writer for per-sample, per-chromosome summary statistics
pub mod summary_stats;
