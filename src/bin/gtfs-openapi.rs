//! GTFS OpenAPI CLI
//!
//! Command-line interface for generating OpenAPI schemas from a GTFS field catalog.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use gtfs_openapi::{
    build_document, build_schemas, load_catalog_auto, render, write_document, BuildOptions,
    DocumentInfo, InlineType, NamingPolicy, OutputFormat, RegistryMode, TagTarget, VOCABULARY,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gtfs-openapi")]
#[command(about = "Generate OpenAPI schemas from a GTFS field catalog")]
#[command(version)]
struct Cli {
    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the schema document from a catalog
    Build {
        /// Catalog source: file path or URL (http:// or https://)
        catalog: String,

        /// Output file (stdout if not specified)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Reference shared types or inline them into every field
        #[arg(long, value_enum, default_value_t = Registry::Referenced)]
        registry: Registry,

        /// How asset names become schema keys
        #[arg(long, value_enum, default_value_t = Naming::Camel)]
        naming: Naming,

        /// Wrap the schemas in an OpenAPI 3.0 document
        #[arg(long)]
        openapi: bool,

        /// Document title (with --openapi)
        #[arg(long, requires = "openapi")]
        title: Option<String>,

        /// Document version (with --openapi)
        #[arg(long, requires = "openapi")]
        api_version: Option<String>,
    },

    /// List the recognized type tags
    Types,

    /// Print the shared registry schemas
    Registry {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum Registry {
    Referenced,
    Inlined,
}

#[derive(Clone, Copy, ValueEnum)]
enum Naming {
    Raw,
    Camel,
    Singular,
}

impl Format {
    fn output(self, pretty: bool) -> OutputFormat {
        match self {
            Format::Yaml => OutputFormat::Yaml,
            Format::Json => OutputFormat::Json { pretty },
        }
    }
}

struct BuildArgs {
    catalog: String,
    output: Option<PathBuf>,
    format: OutputFormat,
    options: BuildOptions,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Build {
            catalog,
            output,
            format,
            pretty,
            registry,
            naming,
            openapi,
            title,
            api_version,
        } => {
            let mut options = BuildOptions::new()
                .registry_mode(match registry {
                    Registry::Referenced => RegistryMode::Referenced,
                    Registry::Inlined => RegistryMode::Inlined,
                })
                .naming(match naming {
                    Naming::Raw => NamingPolicy::Raw,
                    Naming::Camel => NamingPolicy::Camel,
                    Naming::Singular => NamingPolicy::CamelSingular,
                });
            if openapi {
                let mut info = DocumentInfo::default();
                if let Some(title) = title {
                    info.title = title;
                }
                if let Some(version) = api_version {
                    info.version = version;
                }
                options = options.envelope(info);
            }
            run_build(BuildArgs {
                catalog,
                output,
                format: format.output(pretty),
                options,
            })
        }

        Commands::Types => {
            run_types();
            Ok(())
        }

        Commands::Registry { format, pretty } => run_registry(format.output(pretty)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "gtfs_openapi=debug,info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_build(args: BuildArgs) -> Result<(), u8> {
    let BuildArgs {
        catalog,
        output,
        format,
        options,
    } = args;

    let assets = load_catalog_auto(&catalog).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;
    info!(source = %catalog, assets = assets.len(), "loaded catalog");

    let document = build_document(&assets, &options).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    match output {
        Some(path) => {
            write_document(&document, format, &path).map_err(|e| {
                eprintln!("Error: {}", e);
                e.exit_code() as u8
            })?;
            info!(path = %path.display(), "wrote document");
        }
        None => {
            let rendered = render(&document, format).map_err(|e| {
                eprintln!("Error: {}", e);
                e.exit_code() as u8
            })?;
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(())
}

fn run_types() {
    for (tag, target) in VOCABULARY {
        let shape = match target {
            TagTarget::Registry(name) => format!("$ref {}", name),
            TagTarget::Inline(InlineType::Id) => "string".to_string(),
            TagTarget::Inline(InlineType::Enum) => "string enum".to_string(),
            TagTarget::Inline(InlineType::Float) => "number (float)".to_string(),
            TagTarget::Inline(InlineType::Integer) => "integer".to_string(),
            TagTarget::Union(names) => format!("oneOf [{}]", names.join(", ")),
        };
        println!("{:<36} {}", tag, shape);
    }
    println!("{:<36} {}", "(any tag containing \"ID\")", "string");
}

fn run_registry(format: OutputFormat) -> Result<(), u8> {
    let registry = build_schemas(&[], &BuildOptions::new()).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let rendered = render(&serde_json::Value::Object(registry), format).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;
    print!("{}", rendered);
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}
