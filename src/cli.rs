
use clap::Parser;
use lazy_static::lazy_static;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::table_reader::TableConfig;

lazy_static! {
    /// Stores the full version string we plan to use.
    /// # Examples
    /// * `0.3.0-6bb9635-dirty` - while on a dirty branch
    /// * `0.3.0-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));
}

#[derive(Clone, Parser)]
#[clap(author,
    version = &**FULL_VERSION,
    about = "Tracks maternal haplotype phase across polar bodies and eggs.\nInput is a tab-delimited SNP array table; output is one interval file per sample:\n    chr     start   stop    phase")]
pub struct Settings {
    /// Input genotype table, tab-delimited (gzip allowed)
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_filename: PathBuf,

    /// Output directory for per-sample interval files, created if missing
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-dir")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_directory: PathBuf,

    /// The input has no header row; the canonical 16-column layout is assumed
    #[clap(long = "no-header")]
    #[clap(help_heading = Some("Input/Output"))]
    pub no_header: bool,

    /// Output summary statistics file (optional, csv/tsv)
    #[clap(long = "summary-file")]
    #[clap(value_name = "FILE")]
    #[clap(help_heading = Some("Input/Output"))]
    pub summary_filename: Option<PathBuf>,

    /// Sample column used as the phase reference (default: first sample column)
    #[clap(short = 'r')]
    #[clap(long = "reference")]
    #[clap(value_name = "SAMPLE")]
    #[clap(help_heading = Some("Phasing"))]
    pub reference_sample: Option<String>,

    /// Number of threads to use for phasing samples
    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    pub threads: usize,

    /// Enable verbose output
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8
}

/// Checks if a file exists and will otherwise exit
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
fn check_required_filename(filename: &Path, label: &str) {
    if !filename.exists() {
        error!("{} does not exist: \"{}\"", label, filename.display());
        std::process::exit(exitcode::NOINPUT);
    } else {
        info!("{}: \"{}\"", label, filename.display());
    }
}

impl Settings {
    /// Wrapper function to build the table parsing configuration from our CLI settings
    pub fn table_config(&self) -> TableConfig {
        TableConfig {
            has_header: !self.no_header,
            reference: self.reference_sample.clone()
        }
    }
}

pub fn get_raw_settings() -> Settings {
    Settings::parse()
}

/// Do some additional checks here, we may increase these as we go.
/// Also can modify settings if needed since we're passing it around.
/// # Arguments
/// * `settings` - the raw settings, nothing has been checked other than what clap does for us.
pub fn check_settings(mut settings: Settings) -> Settings {
    check_required_filename(&settings.input_filename, "Genotype table");

    if settings.output_directory.exists() && !settings.output_directory.is_dir() {
        error!("Output directory exists and is not a directory: \"{}\"", settings.output_directory.display());
        std::process::exit(exitcode::CANTCREAT);
    }
    info!("Output directory: \"{}\"", settings.output_directory.display());

    if let Some(ref filename) = settings.summary_filename {
        info!("Summary file: \"{}\"", filename.display());
    }

    // 0 doesn't make sense, so lets just error proof it up to 1
    if settings.threads == 0 {
        settings.threads = 1;
    }

    // dump stuff to the logger
    info!("Table parsing:");
    info!("\tHeader row: {}", if settings.no_header { "ABSENT" } else { "PRESENT" });
    match settings.reference_sample {
        Some(ref name) => info!("\tReference sample: {:?}", name),
        None => info!("\tReference sample: first sample column")
    };
    if settings.no_header && settings.reference_sample.is_some() {
        warn!("\tWithout a header, the reference must be one of the canonical sample names.");
    }
    info!("Processing threads: {}", settings.threads);

    //send the settings back
    settings
}
