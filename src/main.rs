use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use pugorugh::config::{LoggingSettings, Settings, StorageBackend};
use pugorugh::routes::{configure_routes, AppState};
use pugorugh::services::{AuthService, MemoryStore, PostgresClient, Store};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);
    info!("Starting Pugorugh dog matching service...");

    let store: Arc<dyn Store> = match settings.storage.backend {
        StorageBackend::Postgres => {
            let client = PostgresClient::from_settings(
                &settings.database.url,
                settings.database.max_connections,
                settings.database.min_connections,
                settings.database.acquire_timeout_secs,
                settings.database.idle_timeout_secs,
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;
            info!(
                "PostgreSQL store initialized (max: {} connections)",
                settings.database.max_connections.unwrap_or(10)
            );
            Arc::new(client)
        }
        StorageBackend::Memory => {
            warn!("Using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    if settings.auth.jwt_secret == "change-me" {
        warn!("auth.jwt_secret is the shipped placeholder; set PUGORUGH__AUTH__JWT_SECRET");
    }
    let auth = Arc::new(AuthService::new(
        &settings.auth.jwt_secret,
        settings.auth.token_ttl_secs,
    ));

    let app_state = AppState { store, auth };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
