use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::catalog::{Hotel, StarClass};
use crate::models::language::Language;
use crate::routes::parse_language;
use crate::services::session_service::SessionStore;

#[derive(serde::Deserialize)]
pub struct QueryParams {
    lang: Option<String>,
    class: Option<String>,
}

fn hotel_json(hotel: &Hotel, lang: Language) -> serde_json::Value {
    json!({
        "id": hotel.id,
        "name": hotel.name.get(lang),
        "star_class": hotel.star_class,
        "base_nightly_price": hotel.base_nightly_price,
        "amenities": hotel.amenities,
        "room_options": hotel.room_options,
        "image": hotel.image,
    })
}

/*
    /api/catalog/regions
*/
pub async fn get_regions(
    store: web::Data<SessionStore>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let lang = match parse_language(params.lang.as_deref(), store.default_language()) {
        Ok(lang) => lang,
        Err(resp) => return resp,
    };

    let regions: Vec<_> = store
        .catalog()
        .regions()
        .iter()
        .map(|r| json!({ "id": r.id, "name": r.name.get(lang) }))
        .collect();
    HttpResponse::Ok().json(regions)
}

/*
    /api/catalog/regions/{region_id}/attractions
*/
pub async fn get_region_attractions(
    path: web::Path<String>,
    store: web::Data<SessionStore>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let lang = match parse_language(params.lang.as_deref(), store.default_language()) {
        Ok(lang) => lang,
        Err(resp) => return resp,
    };
    let region_id = path.into_inner();
    let catalog = store.catalog();

    if catalog.region(&region_id).is_none() {
        return HttpResponse::NotFound().json(json!({ "error": "Region not found" }));
    }

    let attractions: Vec<_> = catalog
        .attractions_in(&region_id)
        .map(|a| {
            json!({
                "id": a.id,
                "name": a.name.get(lang),
                "price": a.price,
                "region": a.region,
            })
        })
        .collect();
    HttpResponse::Ok().json(attractions)
}

/*
    /api/catalog/hotels?class=4
*/
pub async fn get_hotels(
    store: web::Data<SessionStore>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let lang = match parse_language(params.lang.as_deref(), store.default_language()) {
        Ok(lang) => lang,
        Err(resp) => return resp,
    };
    let catalog = store.catalog();

    let hotels: Vec<_> = match params.class.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(raw) => {
            let class = match raw.trim().parse::<u8>().ok().and_then(StarClass::from_stars) {
                Some(class) => class,
                None => {
                    return HttpResponse::BadRequest()
                        .json(json!({ "error": format!("Invalid hotel class: {}", raw) }))
                }
            };
            catalog
                .hotels_in_class(class)
                .map(|h| hotel_json(h, lang))
                .collect()
        }
        None => catalog.hotels().iter().map(|h| hotel_json(h, lang)).collect(),
    };
    HttpResponse::Ok().json(hotels)
}
