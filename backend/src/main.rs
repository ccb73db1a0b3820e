//! Storefront entry-point: wires REST endpoints, the chosen store adapter,
//! and OpenAPI docs.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;
#[cfg(debug_assertions)]
use utoipa::OpenApi;

use shopfront::domain::catalog_service::CatalogService;
use shopfront::domain::customer_service::CustomerService;
use shopfront::domain::order_service::OrderLifecycleService;
use shopfront::domain::ports::{
    CategoryRepository, CustomerRepository, OrderRepository, ProductRepository,
};
use shopfront::inbound::http;
use shopfront::inbound::http::health::HealthState;
use shopfront::inbound::http::state::HttpState;
use shopfront::outbound::persistence::{DocumentStore, DocumentStoreConfig, InMemoryStore};
#[cfg(debug_assertions)]
use shopfront::ApiDoc;
use shopfront::Trace;

/// Which store adapter backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StoreBackend {
    /// Process-local store; state is lost on restart. Development only.
    Memory,
    /// Hosted document database reached over HTTPS.
    Remote,
}

/// Command-line and environment configuration.
#[derive(Debug, Parser)]
#[command(name = "shopfront", about = "HTTP storefront over a hosted document database")]
struct Cli {
    /// Socket address to listen on.
    #[arg(long, env = "SHOPFRONT_BIND", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// Store adapter backing the repositories.
    #[arg(long, env = "SHOPFRONT_STORE", value_enum, default_value_t = StoreBackend::Memory)]
    store: StoreBackend,

    /// Base URL of the hosted store. Required for the remote backend.
    #[arg(long, env = "SHOPFRONT_STORE_URL")]
    store_url: Option<Url>,

    /// Bearer secret for the hosted store. Required for the remote backend.
    #[arg(long, env = "SHOPFRONT_STORE_SECRET", hide_env_values = true)]
    store_secret: Option<String>,

    /// Per-request timeout against the hosted store, in seconds.
    #[arg(long, env = "SHOPFRONT_STORE_TIMEOUT_SECONDS", default_value_t = 10)]
    store_timeout_seconds: u64,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let state = match cli.store {
        StoreBackend::Memory => {
            info!("using in-memory store");
            build_state(Arc::new(InMemoryStore::new()))
        }
        StoreBackend::Remote => {
            let endpoint = cli.store_url.ok_or_else(|| {
                std::io::Error::other("SHOPFRONT_STORE_URL is required for the remote store")
            })?;
            let secret = cli.store_secret.ok_or_else(|| {
                std::io::Error::other("SHOPFRONT_STORE_SECRET is required for the remote store")
            })?;
            info!(endpoint = %endpoint, "using remote document store");
            let store = DocumentStore::new(DocumentStoreConfig {
                endpoint,
                secret,
                timeout: Duration::from_secs(cli.store_timeout_seconds),
            })
            .map_err(|e| std::io::Error::other(format!("store client init failed: {e}")))?;
            build_state(Arc::new(store))
        }
    };

    let state = web::Data::new(state);
    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .configure(http::configure);

        #[cfg(debug_assertions)]
        let app = app.route("/api-docs/openapi.json", web::get().to(openapi_json));

        app
    })
    .bind(cli.bind)?;

    health_state.mark_ready();
    server.run().await
}

/// Wire the three driving-port services over one shared store adapter.
fn build_state<R>(store: Arc<R>) -> HttpState
where
    R: OrderRepository
        + CustomerRepository
        + ProductRepository
        + CategoryRepository
        + Send
        + Sync
        + 'static,
{
    let orders = Arc::new(OrderLifecycleService::new(
        store.clone(),
        store.clone(),
        store.clone(),
    ));
    let catalog = Arc::new(CatalogService::new(store.clone(), store.clone()));
    let customers = Arc::new(CustomerService::new(store.clone(), store));
    HttpState::new(orders, catalog, customers)
}

#[cfg(debug_assertions)]
async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ApiDoc::openapi())
}
