use actix_web::{middleware, web, App, HttpServer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use weather_form::config::{LoggingSettings, Settings};
use weather_form::{configure_routes, form_config, AppState, WeatherClient};

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
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

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_logging(&settings.logging);

    info!("Starting weather form service...");

    let weather = WeatherClient::from_settings(&settings.provider).map_err(|e| {
        error!("Failed to create weather provider client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    if settings.provider.api_key.is_empty() {
        info!("No provider credential configured; lookups will report \"City not found\"");
    }

    info!("Weather provider client initialized ({})", weather.base_url());

    let app_state = AppState::new(weather);

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(form_config())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
