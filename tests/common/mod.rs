#![allow(dead_code)]

use actix_web::{web, App};
use std::sync::Arc;

use nepora_trip_wizard::models::catalog::Catalog;
use nepora_trip_wizard::models::language::Language;
use nepora_trip_wizard::routes;
use nepora_trip_wizard::services::session_service::{SessionLimits, SessionStore};
use nepora_trip_wizard::services::translation_service::{JsonTranslations, Translator};
use nepora_trip_wizard::services::wizard_service::WizardSession;

pub const TRANSLATIONS: &str = include_str!("../../data/translations.json");

/// Small catalog with round prices: one Giza site at 200 and a 100/night room.
pub const GIZA_CATALOG: &str = r#"{
    "regions": [
        { "id": "giza", "name": { "ar": "الجيزة", "en": "Giza" } },
        { "id": "luxor", "name": { "ar": "الأقصر", "en": "Luxor" } }
    ],
    "attractions": [
        { "id": "pyramids", "name": { "ar": "الأهرامات", "en": "Pyramids" }, "price": 200, "region": "giza" },
        { "id": "karnak", "name": { "ar": "الكرنك", "en": "Karnak" }, "price": 180, "region": "luxor" }
    ],
    "hotels": [
        {
            "id": "mena-house",
            "name": { "ar": "مينا هاوس", "en": "Mena House" },
            "star_class": "4",
            "base_nightly_price": 90,
            "amenities": ["wifi", "pool"],
            "room_options": [
                { "room_type": "double", "nightly_price": 100 },
                { "room_type": "suite", "nightly_price": 250 }
            ]
        }
    ]
}"#;

pub fn translator() -> Arc<dyn Translator> {
    Arc::new(JsonTranslations::from_json_str(TRANSLATIONS).expect("translations parse"))
}

pub fn giza_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::from_json_str(GIZA_CATALOG).expect("catalog parses"))
}

pub fn giza_session(lang: Language) -> WizardSession {
    WizardSession::new(giza_catalog(), translator(), lang)
}

pub fn test_store() -> web::Data<SessionStore> {
    web::Data::new(SessionStore::new(
        Arc::new(Catalog::egypt()),
        translator(),
        Language::En,
        SessionLimits::default(),
    ))
}

pub fn create_app(
    store: web::Data<SessionStore>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(store)
        .configure(routes::configure)
}
