use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use nepora_trip_wizard::config::AppConfig;
use nepora_trip_wizard::models::catalog::Catalog;
use nepora_trip_wizard::routes;
use nepora_trip_wizard::services::session_service::{SessionLimits, SessionStore};
use nepora_trip_wizard::services::translation_service::{
    JsonTranslations, NoTranslations, Translator,
};

fn load_translator(config: &AppConfig) -> Arc<dyn Translator> {
    match JsonTranslations::from_file(&config.translations_path) {
        Ok(translations) => {
            log::info!("Loaded translations from {}", config.translations_path.display());
            Arc::new(translations)
        }
        Err(err) => {
            log::warn!("{}; falling back to built-in messages", err);
            Arc::new(NoTranslations)
        }
    }
}

fn load_catalog(config: &AppConfig) -> std::io::Result<Catalog> {
    match &config.catalog_path {
        Some(path) => {
            let catalog = Catalog::from_file(path)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            log::info!("Loaded catalog from {}", path.display());
            Ok(catalog)
        }
        None => Ok(Catalog::egypt()),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env();
    let catalog = Arc::new(load_catalog(&config)?);
    let translator = load_translator(&config);
    let store = web::Data::new(SessionStore::new(
        catalog,
        translator,
        config.default_language,
        SessionLimits {
            idle_ttl: chrono::Duration::minutes(i64::from(config.session_idle_minutes)),
            max_sessions: config.max_sessions,
        },
    ));

    log::info!("Starting HTTP server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(store.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
