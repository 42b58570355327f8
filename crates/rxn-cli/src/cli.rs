//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use rxn_ingest::ReferencePaths;
use rxn_model::{CleanOptions, ExtractOptions, RoleLimits, TableFormat};

#[derive(Parser)]
#[command(
    name = "rxnclean",
    version,
    about = "Resolve molecule roles in reaction records and clean the merged table",
    long_about = "Resolve molecule roles in raw reaction records and build one clean reaction table.\n\n\
                  `extract` turns record files into flattened per-file tables, `clean` merges\n\
                  those tables and filters them, `run` does both."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve record files into flattened reaction tables.
    Extract(ExtractArgs),

    /// Merge and clean a directory of extracted tables.
    Clean(CleanArgs),

    /// Extract then clean in one go.
    Run(RunArgs),

    /// Show the reference data in effect.
    Reference(ReferenceArgs),
}

/// Overrides for the built-in reference tables.
#[derive(Args, Clone, Default)]
pub struct ReferencePathArgs {
    /// CSV with a `smiles` column replacing the built-in solvent list.
    #[arg(long = "solvents", value_name = "CSV")]
    pub solvents: Option<PathBuf>,

    /// CSV with `raw,canonical` columns replacing the built-in replacements.
    #[arg(long = "replacements", value_name = "CSV")]
    pub replacements: Option<PathBuf>,

    /// Text file of metal symbols or molecules, one per line.
    #[arg(long = "metals", value_name = "FILE")]
    pub metals: Option<PathBuf>,

    /// Text file of names always treated as unresolved, one per line.
    #[arg(long = "force-invalid", value_name = "FILE")]
    pub force_invalid: Option<PathBuf>,
}

impl ReferencePathArgs {
    pub fn paths(&self) -> ReferencePaths {
        ReferencePaths {
            solvents: self.solvents.clone(),
            replacements: self.replacements.clone(),
            metals: self.metals.clone(),
            force_invalid: self.force_invalid.clone(),
        }
    }
}

#[derive(Args, Clone)]
pub struct ExtractOptionArgs {
    /// Keep catalysts and reagents apart instead of merging them into agents.
    #[arg(long = "trust-labelling")]
    pub trust_labelling: bool,

    /// Only read record files whose name contains this substring.
    #[arg(long = "name-contains", value_name = "TEXT")]
    pub name_contains: Option<String>,

    /// Skip files matching `--name-contains` instead of keeping only them.
    #[arg(long = "exclude-matching", requires = "name_contains")]
    pub exclude_matching: bool,

    /// Table format for written tables.
    #[arg(long = "format", value_enum, default_value = "parquet")]
    pub format: TableFormatArg,

    #[command(flatten)]
    pub reference: ReferencePathArgs,
}

impl ExtractOptionArgs {
    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            trust_labelling: self.trust_labelling,
            name_contains: self.name_contains.clone(),
            exclude_matching: self.exclude_matching,
            output_format: self.format.into(),
        }
    }
}

#[derive(Args, Clone)]
pub struct CleanOptionArgs {
    /// Maximum reactant columns.
    #[arg(long = "num-reactant", default_value_t = 5)]
    pub num_reactant: usize,

    /// Maximum product (and yield) columns.
    #[arg(long = "num-product", default_value_t = 5)]
    pub num_product: usize,

    /// Maximum solvent columns.
    #[arg(long = "num-solvent", default_value_t = 2)]
    pub num_solvent: usize,

    /// Maximum agent columns (default 3, or 0 with trusted labelling).
    #[arg(long = "num-agent")]
    pub num_agent: Option<usize>,

    /// Maximum catalyst columns (default 1 with trusted labelling, else 0).
    #[arg(long = "num-catalyst")]
    pub num_catalyst: Option<usize>,

    /// Maximum reagent columns (default 2 with trusted labelling, else 0).
    #[arg(long = "num-reagent")]
    pub num_reagent: Option<usize>,

    /// Keep reactions whose yields are out of range or sum above 100.
    #[arg(long = "no-consistent-yield")]
    pub no_consistent_yield: bool,

    /// Cutoff for the first column of each rarity-filtered role.
    #[arg(long = "min-frequency-primary", default_value_t = 15)]
    pub min_frequency_primary: usize,

    /// Cutoff for the later columns of each rarity-filtered role.
    #[arg(long = "min-frequency-secondary", default_value_t = 15)]
    pub min_frequency_secondary: usize,

    /// Remove reactions with infrequent molecules instead of rewriting them
    /// to "other".
    #[arg(long = "no-other-category")]
    pub no_other_category: bool,

    /// Frequency below which a molecule always removes its reaction.
    #[arg(long = "other-threshold", default_value_t = 3)]
    pub other_threshold: usize,

    /// Keep reactions that mention unresolved names.
    #[arg(long = "keep-unresolved")]
    pub keep_unresolved: bool,
}

impl CleanOptionArgs {
    pub fn options(&self, trust_labelling: bool) -> CleanOptions {
        let (default_agents, default_catalysts, default_reagents) =
            if trust_labelling { (0, 1, 2) } else { (3, 0, 0) };
        CleanOptions {
            limits: RoleLimits {
                reactant: self.num_reactant,
                product: self.num_product,
                solvent: self.num_solvent,
                agent: self.num_agent.unwrap_or(default_agents),
                catalyst: self.num_catalyst.unwrap_or(default_catalysts),
                reagent: self.num_reagent.unwrap_or(default_reagents),
            },
            consistent_yield: !self.no_consistent_yield,
            min_frequency_of_occurance_primary: self.min_frequency_primary,
            min_frequency_of_occurance_secondary: self.min_frequency_secondary,
            include_other_category: !self.no_other_category,
            map_rare_to_other_threshold: self.other_threshold,
            trust_labelling,
            remove_unresolved: !self.keep_unresolved,
            ..CleanOptions::default()
        }
    }
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Directory of `.json` / `.jsonl` record files.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output directory for extracted tables (default: <INPUT_DIR>/extracted).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub extract: ExtractOptionArgs,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Directory of extracted tables.
    #[arg(value_name = "TABLE_DIR")]
    pub table_dir: PathBuf,

    /// Output directory for the cleaned table (default: <TABLE_DIR>/cleaned).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Labelling used when the tables were extracted.
    #[arg(long = "trust-labelling")]
    pub trust_labelling: bool,

    /// Table format for the cleaned table.
    #[arg(long = "format", value_enum, default_value = "parquet")]
    pub format: TableFormatArg,

    /// Text file of names always treated as unresolved, one per line.
    #[arg(long = "force-invalid", value_name = "FILE")]
    pub force_invalid: Option<PathBuf>,

    #[command(flatten)]
    pub clean: CleanOptionArgs,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Directory of `.json` / `.jsonl` record files.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output directory (default: <INPUT_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub extract: ExtractOptionArgs,

    #[command(flatten)]
    pub clean: CleanOptionArgs,
}

#[derive(Parser)]
pub struct ReferenceArgs {
    /// Print every entry of one table instead of the counts.
    #[arg(long = "list", value_enum)]
    pub list: Option<ReferenceTableArg>,

    #[command(flatten)]
    pub reference: ReferencePathArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReferenceTableArg {
    Solvents,
    Metals,
    Replacements,
    ForceInvalid,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TableFormatArg {
    Parquet,
    Csv,
}

impl From<TableFormatArg> for TableFormat {
    fn from(value: TableFormatArg) -> Self {
        match value {
            TableFormatArg::Parquet => TableFormat::Parquet,
            TableFormatArg::Csv => TableFormat::Csv,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
