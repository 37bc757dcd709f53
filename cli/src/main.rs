//! Parking Billing CLI
//!
//! ```sh
//! # Run the REST API with the default config (~/.config/parking-billing/config.toml)
//! parking-billing
//!
//! # Custom config path and port
//! parking-billing --config /etc/parking-billing/config.toml --port 9100
//!
//! # Print the invoices of one facility as JSON
//! parking-billing --data sessions.json invoices pf001
//!
//! # Validate config and seed data without starting
//! parking-billing --check
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use parking_billing::config::AppConfig;
use parking_billing::server::{bootstrap, init_tracing, seed_data, ServerHandle, ServerOptions};

/// Parking billing: hourly-tier pricing and per-customer invoices.
#[derive(Parser, Debug)]
#[command(
    name = "parking-billing",
    version,
    about = "Parking session billing server",
    long_about = "Prices parking sessions against per-facility hourly tiers and \
                  aggregates them into per-customer invoices.\n\n\
                  Default config: ~/.config/parking-billing/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "PARKING_BILLING_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// JSON seed file with profiles, customers and sessions.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Validate the configuration and seed data, then exit.
    #[arg(long)]
    check: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the REST API (default).
    Serve,
    /// Print invoices for a facility as JSON and exit.
    Invoices {
        facility_id: String,
        /// Only this customer's invoice.
        #[arg(long)]
        customer: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(parking_billing::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            eprintln!("Using default configuration.");
            AppConfig::default()
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(data) = cli.data {
        config.billing.data_file = Some(data);
    }

    init_tracing(&config);
    info!("Configuration: {}", config_path.display());

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        let seed = match seed_data(&config) {
            Ok(seed) => seed,
            Err(e) => {
                error!("Seed data is invalid: {}", e);
                return Err(e.into());
            }
        };
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Log level   : {}", config.logging.level);
        println!("   Policy      : {}", config.billing.invalid_session_policy);
        println!(
            "   Seed data   : {} profiles, {} customers, {} sessions",
            seed.profiles.len(),
            seed.customers.len(),
            seed.sessions.len()
        );
        return Ok(());
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let handle = ServerHandle::start(ServerOptions {
                config,
                enable_metrics: true,
            })
            .await?;

            handle.install_signal_handler();
            info!("Press Ctrl+C to shut down gracefully.");

            handle.shutdown_signal().wait().await;
            handle.wait().await;
        }
        Command::Invoices {
            facility_id,
            customer,
        } => {
            let (state, _) = bootstrap(&config).await?;
            let output = match customer {
                Some(customer_id) => {
                    let invoice = state.invoices.invoice_for(&facility_id, &customer_id).await?;
                    serde_json::to_string_pretty(&invoice)?
                }
                None => {
                    let invoices = state.invoices.invoices_for(&facility_id).await?;
                    serde_json::to_string_pretty(&invoices)?
                }
            };
            println!("{}", output);
        }
    }

    Ok(())
}
