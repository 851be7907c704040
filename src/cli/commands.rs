use std::path::Path;
use std::sync::Arc;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::processors::BatchConverter;
use crate::utils::progress::ConsoleSink;

pub async fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            input_dir,
            region,
            uf,
            wmo_code,
            all_files,
            overwrite,
            max_workers,
            json,
        } => {
            let converter = BatchConverter::new()
                .with_region_filter(region)
                .with_uf_filter(uf)
                .with_wmo_filter(wmo_code)
                .with_all_files(all_files)
                .with_skip_existing(!overwrite)
                .with_max_workers(max_workers)
                .with_event_sink(Arc::new(ConsoleSink::new(json)));

            let result = converter.convert(&input_dir)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("\n{}", result.message);
                println!("Files found:  {}", result.total_files_found);
                println!("Converted:    {}", result.converted_files);
                println!("Skipped:      {}", result.skipped_files);
                println!("Failed:       {}", result.failed_files.len());
                println!("Output:       {}", result.folder_path);

                if !result.failed_files.is_empty() {
                    println!("\nFailed files:");
                    for name in &result.failed_files {
                        println!("  - {}", name);
                    }
                }
            }

            if !result.success {
                std::process::exit(1);
            }
        }

        Commands::Inspect { file } => {
            inspect_file(&file)?;
        }
    }

    Ok(())
}

fn inspect_file(path: &Path) -> Result<()> {
    let file = netcdf::open(path)?;

    println!("File: {}", path.display());

    println!("\nDimensions:");
    for dim in file.dimensions() {
        println!("  {:<12} {}", dim.name(), dim.len());
    }

    println!("\nVariables:");
    for var in file.variables() {
        let dims: Vec<String> = var.dimensions().iter().map(|d| d.name().to_string()).collect();
        println!("  {:<48} ({})", var.name(), dims.join(", "));
    }

    println!("\nGlobal attributes:");
    for attr in file.attributes() {
        match attr.value() {
            Ok(value) => println!("  {:<20} {:?}", attr.name(), value),
            Err(e) => println!("  {:<20} <unreadable: {}>", attr.name(), e),
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("inmet_processor={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
