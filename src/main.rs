use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use address_book::config::{LoggingSettings, Settings};
use address_book::core::ProximityFilter;
use address_book::routes::{self, AppState};
use address_book::services::PostgresClient;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting address book service...");

    let postgres = match PostgresClient::from_settings(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.min_connections,
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await
    {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to connect to PostgreSQL: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    info!(
        "PostgreSQL client initialized (max: {} connections)",
        settings.database.max_connections.unwrap_or(10)
    );

    let app_state = AppState {
        postgres,
        proximity: ProximityFilter::new(settings.addresses.max_nearby_results),
        addresses: settings.addresses.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(routes::configure_extractors)
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
