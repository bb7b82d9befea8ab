//! Command-line tool assembling an OpenAPI document from a controller manifest.
//!
//! # Usage
//!
//! ```bash
//! openapi-from-annotations [OPTIONS] <MANIFEST>
//! ```
//!
//! # Examples
//!
//! Print the YAML document:
//! ```bash
//! openapi-from-annotations cats.yaml
//! ```
//!
//! Write JSON plus a static Swagger UI site:
//! ```bash
//! openapi-from-annotations cats.yaml -f json -o openapi.json --site ./docs
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use openapi_from_annotations::cli;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("OpenAPI annotation assembler starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    info!("OpenAPI document generation completed successfully");

    Ok(())
}
