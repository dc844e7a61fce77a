use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::info;

use routegen_core::config::{self, CONFIG_FILE_NAME, RoutegenConfig};
use routegen_core::ir::IrSpec;
use routegen_core::parse;
use routegen_core::transform::{self, TransformOptions};

#[derive(Parser)]
#[command(name = "routegen", about = "OpenAPI route IR builder", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the route IR and write it as JSON
    Generate {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file, overriding the configured one
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the route IR of an OpenAPI document
    Inspect {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,

        /// Print every route in full instead of a summary
        #[arg(long)]
        full: bool,
    },

    /// Initialize a new routegen configuration
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input, output } => cmd_generate(input, output),

        Commands::Inspect {
            input,
            format,
            full,
        } => cmd_inspect(input, format, full),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "routegen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<RoutegenConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn build_ir(path: &Path, cfg: &RoutegenConfig) -> Result<IrSpec> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let parsed = match ext {
        "json" => parse::from_json(&content)?,
        _ => parse::from_yaml(&content)?,
    };

    let options = TransformOptions::from_config(cfg);
    let ir = transform::transform_with_options(&parsed, &options)
        .with_context(|| format!("failed to build routes for {}", path.display()))?;
    Ok(ir)
}

fn cmd_generate(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    let ir = build_ir(&input, &cfg)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&ir)?;
    fs::write(&output, json).with_context(|| format!("failed to write {}", output.display()))?;

    info!("wrote {}", output.display());
    eprintln!(
        "Built {} routes ({} modules, {} extracted components) → {}",
        ir.routes.len(),
        ir.modules.len(),
        ir.components.len(),
        output.display()
    );
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat, full: bool) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let ir = build_ir(&input, &cfg)?;

    let value = if full {
        serde_json::to_value(&ir)?
    } else {
        build_inspect_summary(&ir)
    };

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&value)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&value)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(ir: &IrSpec) -> serde_json::Value {
    let routes: Vec<serde_json::Value> = ir
        .routes
        .iter()
        .map(|route| {
            serde_json::json!({
                "name": route.route_name.usage,
                "method": route.method.as_str(),
                "path": route.path,
                "namespace": route.namespace,
                "args": route.specific_args.names(),
                "success": route.response_body.success.type_expr,
                "error": route.response_body.error.type_expr,
                "security": route.security,
            })
        })
        .collect();

    let modules: Vec<serde_json::Value> = ir
        .modules
        .iter()
        .map(|module| {
            serde_json::json!({
                "name": module.name,
                "routes": ir
                    .module_routes(module)
                    .map(|r| r.route_name.usage.as_str())
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": ir.info.title,
            "version": ir.info.version,
        },
        "routes": routes,
        "modules": modules,
        "components": ir.components.iter().map(|c| &c.type_name).collect::<Vec<_>>(),
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
