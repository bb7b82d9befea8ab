use crate::assembler::{swagger, ServeOptions};
use crate::manifest::Manifest;
use crate::registry::Registry;
use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// Assemble an OpenAPI document from a controller manifest
#[derive(Parser, Debug)]
#[command(name = "openapi-from-annotations")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the controller manifest (YAML or JSON)
    #[arg(value_name = "MANIFEST")]
    pub manifest_path: PathBuf,

    /// Output format (yaml or json)
    #[arg(short = 'f', long = "format", value_enum, default_value = "yaml")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Also write the Swagger UI page, init script and JSON document into this directory
    #[arg(long = "site", value_name = "DIR")]
    pub site_dir: Option<PathBuf>,

    /// Mount point the viewer page is served from
    #[arg(long = "mount", default_value = "/api-docs")]
    pub mount: String,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.manifest_path.is_file() {
        anyhow::bail!(
            "Manifest does not exist or is not a file: {}",
            args.manifest_path.display()
        );
    }

    if !args.mount.starts_with('/') {
        anyhow::bail!("Mount point must start with '/': {}", args.mount);
    }

    info!("Manifest: {}", args.manifest_path.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }
    if let Some(ref site) = args.site_dir {
        info!("Viewer site: {} (mounted at {})", site.display(), args.mount);
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    info!("Loading manifest...");
    let manifest = Manifest::load(&args.manifest_path)?;

    info!("Applying annotations...");
    let mut registry = Registry::new();
    manifest.apply(&mut registry)?;

    info!("Assembling OpenAPI document...");
    let options = ServeOptions::default().with_viewer(manifest.viewer.clone());
    let docs = swagger(
        &args.mount,
        manifest.document_builder().build(),
        &registry,
        &options,
    )?;
    let document = docs.document();

    info!("Serializing to {:?} format...", args.output_format);
    let content = match args.output_format {
        OutputFormat::Yaml => serialize_yaml(document)?,
        OutputFormat::Json => serialize_json(document)?,
    };

    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
    } else {
        println!("{}", content);
    }

    if let Some(site_dir) = &args.site_dir {
        info!("Writing viewer site to: {}", site_dir.display());
        write_to_file(docs.index_html(), &site_dir.join("index.html"))?;
        write_to_file(docs.init_script(), &site_dir.join(crate::viewer::INIT_SCRIPT))?;
        write_to_file(docs.json(), &site_dir.join("openapi.json"))?;
    }

    info!("Generation complete!");
    info!("Summary:");
    info!("  - Controllers: {}", manifest.controllers.len());
    info!("  - Paths: {}", document.paths.len());
    info!("  - Schemas: {}", document.components.schemas.len());

    Ok(())
}
