use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "orcanizer - run batches of ORCA calculations and collect their properties into a table.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a batch: prepare, run and extract every identifier in order.
    Run(RunArgs),
    /// Write the input file for a single identifier without running anything.
    Prepare(PrepareArgs),
    /// Extract the property record from an existing output file.
    Extract(ExtractArgs),
    /// Summarize the success and failure logs of the working directory.
    Status(StatusArgs),
}

/// Options shared by every command that needs the batch configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a configuration file in TOML format.
    /// Defaults to `config.toml` in the platform configuration directory, if present.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory where input and output files are written and the program is run.
    #[arg(short = 'w', long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Read the ORCA recipe from a TOML file, replacing the `[recipe]` table of the config.
    #[arg(long, value_name = "PATH")]
    pub recipe: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S recipe.nprocs=4
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Identifiers (SMILES) to process, in order.
    #[arg(value_name = "IDENTIFIER", required_unless_present = "input")]
    pub identifiers: Vec<String>,

    /// Read identifiers from a file, one per line.
    /// Blank lines and lines starting with '#' are skipped; anything after the first
    /// whitespace-separated column is ignored.
    #[arg(short, long, value_name = "PATH", conflicts_with = "identifiers")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Override the external program to run.
    #[arg(short = 'e', long, value_name = "NAME_OR_PATH")]
    pub executable: Option<String>,

    /// Read pre-embedded geometries from this directory instead of running Open Babel.
    #[arg(long, value_name = "DIR")]
    pub xyz_dir: Option<PathBuf>,

    /// Override the destination of the result table.
    #[arg(short, long, value_name = "PATH", conflicts_with = "no_save")]
    pub output: Option<PathBuf>,

    /// Do not write the result table; only report it.
    #[arg(long)]
    pub no_save: bool,

    /// Rewrite the result table after every successful job.
    #[arg(long)]
    pub checkpoint: bool,
}

/// Arguments for the `prepare` subcommand.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// The identifier (SMILES) to prepare.
    #[arg(value_name = "IDENTIFIER")]
    pub identifier: String,

    /// Slot id naming the input file.
    #[arg(short, long, default_value_t = 0, value_name = "N")]
    pub slot: usize,

    /// Read the geometry from this directory instead of running Open Babel.
    #[arg(long, value_name = "DIR")]
    pub xyz_dir: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Slot id of the output file to read.
    #[arg(short, long, value_name = "N")]
    pub slot: usize,

    /// Identifier to label the record with. Defaults to the slot id.
    #[arg(long, value_name = "IDENTIFIER")]
    pub identifier: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the `status` subcommand.
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}
