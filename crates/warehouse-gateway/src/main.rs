//! warehouse-gateway — entry point.

use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use warehouse_gateway::catalog;
use warehouse_gateway::config::{self, Environment, GatewayConfig};
use warehouse_gateway::openapi;
use warehouse_gateway::registry::ProcedureRegistry;
use warehouse_gateway::server;

#[derive(Parser)]
#[command(
    name = "warehouse-gateway",
    about = "Dual-protocol gateway exposing the Solana RPC method catalog over JSON-RPC and REST/OpenAPI",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway over HTTP (default).
    Serve {
        /// Listen address (host:port).
        #[arg(long, default_value = "0.0.0.0:3000")]
        addr: String,

        /// Deployment environment. Also reads from WAREHOUSE_ENV.
        #[arg(long, value_enum)]
        environment: Option<Environment>,

        /// Public domain advertised in the OpenAPI document; required in
        /// production. Also reads from WAREHOUSE_DOMAIN.
        #[arg(long)]
        domain: Option<String>,
    },

    /// Print the generated OpenAPI document as JSON.
    Openapi {
        /// Listen address used for the development base URL.
        #[arg(long, default_value = "0.0.0.0:3000")]
        addr: String,

        /// Deployment environment. Also reads from WAREHOUSE_ENV.
        #[arg(long, value_enum)]
        environment: Option<Environment>,

        /// Public domain advertised in the OpenAPI document.
        #[arg(long)]
        domain: Option<String>,
    },

    /// Print the method catalog as JSON.
    Info,

    /// Generate shell completion scripts.
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

fn resolve_config(addr: String, environment: Option<Environment>, domain: Option<String>) -> GatewayConfig {
    GatewayConfig {
        environment: config::resolve_environment(environment),
        addr,
        domain: config::resolve_domain(domain),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve {
        addr: "0.0.0.0:3000".to_string(),
        environment: None,
        domain: None,
    }) {
        Commands::Serve {
            addr,
            environment,
            domain,
        } => {
            let config = resolve_config(addr, environment, domain);
            let registry = Arc::new(ProcedureRegistry::build(catalog::catalog())?);
            server::run(registry, &config).await?;
        }

        Commands::Openapi {
            addr,
            environment,
            domain,
        } => {
            let config = resolve_config(addr, environment, domain);
            let registry = ProcedureRegistry::build(catalog::catalog())?;
            let document = openapi::document(&registry, &config.base_url()?);
            println!("{}", serde_json::to_string_pretty(&document)?);
        }

        Commands::Info => {
            let registry = ProcedureRegistry::build(catalog::catalog())?;
            let info = serde_json::json!({
                "namespace": server::RPC_NAMESPACE,
                "methods": registry.names().collect::<Vec<_>>(),
                "method_count": registry.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "warehouse-gateway", &mut std::io::stdout());
        }
    }

    Ok(())
}
