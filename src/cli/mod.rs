pub mod config;
pub mod preview;
pub mod process;
pub mod profiles;
mod render;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::pipeline::{reconcile, Inputs, Reconciliation};
use crate::profile::{self, ReportProfile};
use crate::settings::Settings;
use crate::summary::SummaryLayout;

#[derive(Parser)]
#[command(
    name = "claimsheet",
    version,
    about = "Reconcile claim, claim-ratio and benefit exports into one Excel report."
)]
pub struct Cli {
    /// Show debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Claim export (.csv)
    #[arg(long)]
    pub claims: String,
    /// Claim ratio workbook (.xlsx) or .csv
    #[arg(long)]
    pub ratio: String,
    /// Benefit export (.csv)
    #[arg(long)]
    pub benefits: String,
    /// Report profile key (see `claimsheet profiles`)
    #[arg(long)]
    pub profile: Option<String>,
    /// Summary layout for the claim ratio table
    #[arg(long, value_enum)]
    pub layout: Option<SummaryLayout>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process the three inputs and write the Summary/SC/Benefit workbook.
    Process {
        #[command(flatten)]
        inputs: InputArgs,
        /// Output file name without extension (default: Processed_Data)
        #[arg(long)]
        name: Option<String>,
        /// Directory for the workbook
        #[arg(long = "output-dir")]
        output_dir: Option<String>,
    },
    /// Process the inputs and print previews without writing a file.
    Preview {
        #[command(flatten)]
        inputs: InputArgs,
        /// Rows shown per table
        #[arg(long, default_value_t = 5)]
        rows: usize,
    },
    /// List report profiles.
    Profiles,
    /// Show or change saved defaults.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current settings.
    Show,
    /// Update saved defaults.
    Set {
        /// Default output directory
        #[arg(long = "output-dir")]
        output_dir: Option<String>,
        /// Default output file name
        #[arg(long)]
        name: Option<String>,
        /// Default profile key
        #[arg(long)]
        profile: Option<String>,
        /// Default summary layout
        #[arg(long, value_enum)]
        layout: Option<SummaryLayout>,
        /// Go back to each profile's own layout
        #[arg(long = "clear-layout", conflicts_with = "layout")]
        clear_layout: bool,
    },
}

/// Resolve profile and layout (flags over settings) and run the pipeline.
pub(crate) fn run_inputs(args: &InputArgs, settings: &Settings) -> Result<(Reconciliation, &'static ReportProfile)> {
    let key = args.profile.as_deref().unwrap_or(&settings.profile);
    let profile = profile::get_by_key(key)?;
    let layout = args.layout.or(settings.layout);
    let inputs = Inputs::load(
        &PathBuf::from(&args.claims),
        &PathBuf::from(&args.ratio),
        &PathBuf::from(&args.benefits),
    )?;
    Ok((reconcile(inputs, profile, layout)?, profile))
}
