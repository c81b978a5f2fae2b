use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::models::language::{Language, UnsupportedLanguage};

pub mod catalog;
pub mod contact;
pub mod health;
pub mod wizard;

/// Register every endpoint. Shared by the server binary and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/catalog")
                        .route("/regions", web::get().to(catalog::get_regions))
                        .route(
                            "/regions/{region_id}/attractions",
                            web::get().to(catalog::get_region_attractions),
                        )
                        .route("/hotels", web::get().to(catalog::get_hotels)),
                )
                .service(
                    web::scope("/wizard")
                        .route("", web::post().to(wizard::create))
                        .route("/{id}", web::get().to(wizard::get_state))
                        .route("/{id}", web::delete().to(wizard::delete))
                        .route("/{id}/region", web::put().to(wizard::set_region))
                        .route(
                            "/{id}/attractions/{attraction_id}",
                            web::post().to(wizard::toggle_attraction),
                        )
                        .route("/{id}/hotel", web::put().to(wizard::choose_hotel))
                        .route("/{id}/hotel", web::delete().to(wizard::clear_hotel))
                        .route("/{id}/dates", web::put().to(wizard::set_dates))
                        .route("/{id}/party", web::put().to(wizard::set_party_size))
                        .route("/{id}/contact", web::put().to(wizard::set_contact))
                        .route("/{id}/language", web::put().to(wizard::set_language))
                        .route("/{id}/advance", web::post().to(wizard::advance))
                        .route("/{id}/retreat", web::post().to(wizard::retreat))
                        .route("/{id}/reset", web::post().to(wizard::reset))
                        .route("/{id}/submit", web::post().to(wizard::submit)),
                )
                .route("/contact", web::post().to(contact::submit)),
        );
}

pub(crate) fn parse_language(
    raw: Option<&str>,
    fallback: Language,
) -> Result<Language, HttpResponse> {
    match raw {
        Some(code) if !code.trim().is_empty() => {
            code.parse().map_err(|err: UnsupportedLanguage| {
                HttpResponse::BadRequest().json(json!({ "error": err.to_string() }))
            })
        }
        _ => Ok(fallback),
    }
}
