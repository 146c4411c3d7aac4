use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lark_auth::config::loader::{file_to_config, resolve_parameters};
use lark_auth::node::{parse_items, ItemParameters, NodeDescription, TokenRequester};
use lark_auth::observability::metrics::get_metrics;
use lark_auth::sources::fetch::build_client;
use lark_auth::utils::constants::DEFAULT_CONFIG_PATH;
use lark_auth::utils::logging::{self, LogLevel};
use lark_auth::ServiceConfig;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "LARK_AUTH_CONFIG", default_value = DEFAULT_CONFIG_PATH, global = true)]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum, global = true)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Exchange app credentials for tenant access tokens, one per input item
    Run {
        /// JSON array of input items; `-` reads stdin
        #[arg(short, long, default_value = "-")]
        input: String,
        /// Turn failures into `{"error": ...}` items instead of aborting
        #[arg(long, env = "CONTINUE_ON_FAIL")]
        continue_on_fail: bool,
        /// Write prometheus metrics here (overrides settings.metrics.textfile)
        #[arg(long)]
        metrics_file: Option<String>,
    },
    /// Print the node descriptor
    Describe,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let args = Args::parse();
    let service_config = file_to_config(Path::new(&args.config)).await?;
    logging::run(&service_config, args.log_level);

    let description = describe(&service_config);

    match args.command {
        Command::Describe => {
            println!("{}", serde_json::to_string_pretty(&description)?);
            Ok(())
        }
        Command::Run { input, continue_on_fail, metrics_file } => {
            let continue_on_fail = continue_on_fail || service_config.node.continue_on_fail;
            let metrics_file = metrics_file.or(service_config.settings.metrics.textfile.clone());
            let result = run(&service_config, description, &input, continue_on_fail).await;

            if let Some(path) = metrics_file {
                if let Err(err) = get_metrics().await.write_textfile(Path::new(&path)).await {
                    error!("writing metrics to {} failed: {}", path, err);
                }
            }
            result
        }
    }
}

async fn run(
    service_config: &ServiceConfig,
    description: NodeDescription,
    input: &str,
    continue_on_fail: bool,
) -> Result<()> {
    // -------------------------------
    // 2. Read input items and node parameters
    // -------------------------------

    let raw = read_input(input).await?;
    let items = parse_items(&raw).context("invalid input items")?;
    let node_values = resolve_parameters(service_config)?;

    // -------------------------------
    // 3. Exchange, item by item
    // -------------------------------

    let client = build_client(&service_config.settings.request)?;
    let requester = TokenRequester::with_url(client, service_config.settings.request.url.clone())
        .with_description(description);
    let params = ItemParameters::new(&items, &node_values, requester.description());

    info!("requesting tenant tokens from {}", requester.url());
    let output = requester.process(&items, &params, continue_on_fail).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn describe(service_config: &ServiceConfig) -> NodeDescription {
    let mut description = NodeDescription::lark_authentication();
    if let Some(icon) = &service_config.node.icon {
        description = description.with_icon(icon.to_owned());
    }
    if service_config.node.declare_credentials {
        description = description.with_credentials(Vec::new());
    }
    description
}

async fn read_input(input: &str) -> Result<String> {
    let mut raw = String::new();
    if input == "-" {
        tokio::io::stdin().read_to_string(&mut raw).await?;
    } else {
        raw = tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("read input {}", input))?;
    }
    Ok(raw)
}
