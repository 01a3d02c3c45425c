use clap::{Parser, Subcommand};
use fingerprint_qc::types::ReportFormat;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Report format (defaults to the config file setting)
    #[arg(long, global = true, value_enum)]
    pub format: Option<ReportFormat>,

    /// Config file to use instead of the per-user one
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that a fingerprint file's digest matches its content
    Verify {
        /// Fingerprint JSON file
        fingerprint_file: String,
    },

    /// Compare two fingerprint files field by field ("-" stands for an absent side)
    Compare {
        /// First fingerprint (A)
        a_file: String,
        /// Second fingerprint (B)
        b_file: String,
    },

    /// Replay one history event (original + added - removed) against the current fingerprint
    Audit {
        /// Fingerprint before the edit
        #[arg(long)]
        original: Option<String>,
        /// Contribution of the reads added by the edit
        #[arg(long)]
        added: Option<String>,
        /// Contribution of the reads removed by the edit
        #[arg(long)]
        removed: Option<String>,
        /// Live fingerprint the replay must reproduce
        #[arg(long)]
        current: Option<String>,
    },

    /// Audit all history events of an accession from a metadata dump
    MetaAudit {
        /// JSON dump: {"<accession>": {"<metadata path>": "<xml>"}}
        #[arg(long)]
        dump: String,
        /// Accession to audit
        accession: String,
    },

    /// Recompute a fingerprint's digest and write it back out
    Rehash {
        /// Fingerprint JSON file
        fingerprint_file: String,
        /// Output file (defaults to rewriting the input)
        #[arg(short = 'o', long = "output")]
        output_file: Option<String>,
    },
}
