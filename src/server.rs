//! Server runtime
//!
//! [`ServerHandle`] owns the HTTP server lifecycle: store seeding, the
//! Prometheus recorder, the REST API and graceful shutdown. The CLI's
//! one-shot commands reuse [`bootstrap`] without starting a listener.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{error, info, warn};

use crate::api::{create_api_router, ApiState};
use crate::application::InvoiceService;
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::{InMemoryRepositoryProvider, SeedData, SeedSummary};
use crate::shared::errors::{AppError, InfraError};
use crate::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};

// ── Bootstrap ──────────────────────────────────────────────────────

/// Seed data selected by the `billing` config section.
pub fn seed_data(config: &AppConfig) -> Result<SeedData, AppError> {
    let mut seed = if config.billing.seed_demo_data {
        SeedData::demo()
    } else {
        SeedData::default()
    };

    if let Some(ref path) = config.billing.data_file {
        info!("Loading seed data from {}", path.display());
        seed = seed.merge(SeedData::load(path)?);
    }

    seed.validate()?;
    Ok(seed)
}

/// Build and seed the stores and wire the services on top of them.
pub async fn bootstrap(config: &AppConfig) -> Result<(ApiState, SeedSummary), AppError> {
    let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
    let summary = seed_data(config)?.apply(repos.as_ref()).await?;

    let facilities: Vec<String> = repos
        .profiles()
        .find_all()
        .await?
        .into_iter()
        .map(|p| p.facility_id)
        .collect();
    info!(?facilities, "Facilities loaded");

    let invoices = Arc::new(InvoiceService::new(
        repos.clone(),
        config.billing.invalid_session_policy,
    ));
    info!(
        policy = %config.billing.invalid_session_policy,
        "Invoice service ready"
    );

    Ok((ApiState::new(repos, invoices), summary))
}

/// Install the global Prometheus recorder, once per process.
///
/// A restart within the same process reuses the first handle.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                error!("Failed to install Prometheus metrics recorder: {}", e);
                None
            }
        })
        .clone()
}

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Install the Prometheus recorder and mount `/metrics` (default: true).
    pub enable_metrics: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            enable_metrics: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running billing server.
///
/// ```rust,no_run
/// use parking_billing::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Stores and services behind the API.
    pub state: ApiState,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the listener is bound to.
    pub local_addr: SocketAddr,

    shutdown: ShutdownSignal,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Seed the stores, bind the listener and start serving.
    pub async fn start(opts: ServerOptions) -> Result<Self, AppError> {
        let config = opts.config;

        info!("Starting parking billing server...");

        let prometheus = if opts.enable_metrics {
            prometheus_handle()
        } else {
            None
        };

        let (state, summary) = bootstrap(&config).await?;
        info!(
            profiles = summary.profiles,
            customers = summary.customers,
            sessions = summary.sessions,
            "Stores seeded"
        );

        let router = create_api_router(state.clone(), prometheus);

        let addr = config.server.address();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| InfraError::Server(format!("Failed to bind {}: {}", addr, e)))?;
        let local_addr = listener.local_addr()?;
        info!("REST API listening on http://{}", local_addr);
        info!("OpenAPI document at http://{}/api-docs/openapi.json", local_addr);

        let shutdown = ShutdownSignal::new();
        let api_shutdown = shutdown.clone();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            state,
            config,
            local_addr,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.shutdown.clone()));
    }

    /// Trigger graceful shutdown without waiting.
    pub fn trigger_shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Wait for the server to stop, at most `server.shutdown_timeout` seconds.
    pub async fn wait(self) {
        let timeout = Duration::from_secs(self.config.server.shutdown_timeout);
        info!("Waiting for in-flight requests to complete...");

        match tokio::time::timeout(timeout, self.api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => warn!("REST API server did not stop within {:?}", timeout),
        }

        info!("Parking billing shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down parking billing server...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing from the `logging` config section.
///
/// `RUST_LOG` takes precedence over `logging.level`. Call once at startup.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
