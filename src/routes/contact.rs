use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::contact::ContactMessage;
use crate::services::contact_service::submit_contact_message;
use crate::services::session_service::SessionStore;

/*
    POST /api/contact
*/
pub async fn submit(
    store: web::Data<SessionStore>,
    input: web::Json<ContactMessage>,
) -> impl Responder {
    let message = input.into_inner();
    let lang = message.lang.unwrap_or(store.default_language());

    match submit_contact_message(&message, store.translator(), lang) {
        Ok(receipt) => HttpResponse::Ok().json(receipt),
        Err(errors) => HttpResponse::BadRequest().json(json!({ "errors": errors })),
    }
}
