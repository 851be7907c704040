use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inmet-processor")]
#[command(about = "INMET station CSV to gridded NetCDF converter")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a directory of station CSV exports to NetCDF
    Convert {
        #[arg(short, long, help = "Directory containing INMET_*.CSV files")]
        input_dir: PathBuf,

        #[arg(
            short,
            long,
            help = "Filter by region code (repeatable, case-insensitive)"
        )]
        region: Vec<String>,

        #[arg(short, long, help = "Filter by UF code (repeatable, case-insensitive)")]
        uf: Vec<String>,

        #[arg(
            short,
            long,
            help = "Filter by WMO station code (repeatable, case-insensitive)"
        )]
        wmo_code: Vec<String>,

        #[arg(long, default_value = "false", help = "Convert everything, ignoring filters")]
        all_files: bool,

        #[arg(
            long,
            default_value = "false",
            help = "Re-convert files whose NetCDF output already exists"
        )]
        overwrite: bool,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(long, default_value = "false", help = "Print the batch result as JSON")]
        json: bool,
    },

    /// Display the structure of a converted NetCDF file
    Inspect {
        #[arg(short, long)]
        file: PathBuf,
    },
}
