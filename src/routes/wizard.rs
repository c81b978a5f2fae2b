use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::language::Language;
use crate::models::selection::SelectionError;
use crate::routes::parse_language;
use crate::services::session_service::SessionStore;
use crate::services::wizard_service::{SubmitError, WizardSession};

#[derive(Deserialize, Default)]
pub struct CreateSessionInput {
    lang: Option<String>,
}

#[derive(Deserialize)]
pub struct RegionInput {
    region: Option<String>,
}

fn default_room_count() -> u32 {
    1
}

#[derive(Deserialize)]
pub struct HotelInput {
    hotel_id: String,
    room_type: String,
    #[serde(default = "default_room_count")]
    room_count: u32,
}

#[derive(Deserialize)]
pub struct DatesInput {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct PartyInput {
    party_size: i64,
}

#[derive(Deserialize)]
pub struct ContactInput {
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
}

#[derive(Deserialize)]
pub struct LanguageInput {
    lang: String,
}

fn state_body(id: &Uuid, session: &WizardSession) -> Value {
    json!({
        "session_id": id,
        "state": session.state(),
        "summary_rows": session.summary_rows(),
    })
}

fn session_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "Wizard session not found" }))
}

fn selection_error(err: SelectionError) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": err.to_string() }))
}

/// Apply a mutation that cannot fail and answer with the new state.
fn mutate(
    store: &SessionStore,
    id: Uuid,
    f: impl FnOnce(&mut WizardSession),
) -> HttpResponse {
    match store.with_session(&id, |session| {
        f(&mut *session);
        state_body(&id, session)
    }) {
        Some(body) => HttpResponse::Ok().json(body),
        None => session_not_found(),
    }
}

/// Apply a mutation the selection may reject.
fn try_mutate(
    store: &SessionStore,
    id: Uuid,
    f: impl FnOnce(&mut WizardSession) -> Result<(), SelectionError>,
) -> HttpResponse {
    match store.with_session(&id, |session| f(&mut *session).map(|_| state_body(&id, session))) {
        Some(Ok(body)) => HttpResponse::Ok().json(body),
        Some(Err(err)) => selection_error(err),
        None => session_not_found(),
    }
}

/*
    POST /api/wizard
*/
pub async fn create(
    store: web::Data<SessionStore>,
    input: Option<web::Json<CreateSessionInput>>,
) -> impl Responder {
    let input = input.map(|i| i.into_inner()).unwrap_or_default();
    let lang = match parse_language(input.lang.as_deref(), store.default_language()) {
        Ok(lang) => lang,
        Err(resp) => return resp,
    };

    let (id, state) = store.create(Some(lang));
    HttpResponse::Created().json(json!({ "session_id": id, "state": state }))
}

/*
    GET /api/wizard/{id}
*/
pub async fn get_state(path: web::Path<Uuid>, store: web::Data<SessionStore>) -> impl Responder {
    let id = path.into_inner();
    match store.with_session(&id, |session| state_body(&id, session)) {
        Some(body) => HttpResponse::Ok().json(body),
        None => session_not_found(),
    }
}

/*
    DELETE /api/wizard/{id}
*/
pub async fn delete(path: web::Path<Uuid>, store: web::Data<SessionStore>) -> impl Responder {
    if store.remove(&path.into_inner()) {
        HttpResponse::NoContent().finish()
    } else {
        session_not_found()
    }
}

pub async fn set_region(
    path: web::Path<Uuid>,
    store: web::Data<SessionStore>,
    input: web::Json<RegionInput>,
) -> impl Responder {
    let region = input.into_inner().region.filter(|r| !r.is_empty());
    try_mutate(&store, path.into_inner(), |session| {
        session.set_region(region.as_deref())
    })
}

pub async fn toggle_attraction(
    path: web::Path<(Uuid, String)>,
    store: web::Data<SessionStore>,
) -> impl Responder {
    let (id, attraction_id) = path.into_inner();
    match store.with_session(&id, |session| {
        let toggled = session.toggle_attraction(&attraction_id);
        let mut body = state_body(&id, session);
        body["toggled"] = json!(toggled);
        body
    }) {
        Some(body) => HttpResponse::Ok().json(body),
        None => session_not_found(),
    }
}

pub async fn choose_hotel(
    path: web::Path<Uuid>,
    store: web::Data<SessionStore>,
    input: web::Json<HotelInput>,
) -> impl Responder {
    let input = input.into_inner();
    try_mutate(&store, path.into_inner(), |session| {
        session.choose_hotel(&input.hotel_id, &input.room_type, input.room_count)
    })
}

pub async fn clear_hotel(path: web::Path<Uuid>, store: web::Data<SessionStore>) -> impl Responder {
    mutate(&store, path.into_inner(), |session| session.clear_hotel())
}

pub async fn set_dates(
    path: web::Path<Uuid>,
    store: web::Data<SessionStore>,
    input: web::Json<DatesInput>,
) -> impl Responder {
    let input = input.into_inner();
    mutate(&store, path.into_inner(), |session| {
        session.set_dates(input.start_date, input.end_date)
    })
}

pub async fn set_party_size(
    path: web::Path<Uuid>,
    store: web::Data<SessionStore>,
    input: web::Json<PartyInput>,
) -> impl Responder {
    let party_size = input.party_size;
    mutate(&store, path.into_inner(), |session| {
        session.set_party_size(party_size)
    })
}

pub async fn set_contact(
    path: web::Path<Uuid>,
    store: web::Data<SessionStore>,
    input: web::Json<ContactInput>,
) -> impl Responder {
    let input = input.into_inner();
    mutate(&store, path.into_inner(), |session| {
        session.set_contact(&input.full_name, &input.email, &input.phone)
    })
}

pub async fn set_language(
    path: web::Path<Uuid>,
    store: web::Data<SessionStore>,
    input: web::Json<LanguageInput>,
) -> impl Responder {
    let lang: Language = match parse_language(Some(input.lang.as_str()), store.default_language()) {
        Ok(lang) => lang,
        Err(resp) => return resp,
    };
    mutate(&store, path.into_inner(), |session| session.set_language(lang))
}

/*
    POST /api/wizard/{id}/advance
*/
pub async fn advance(path: web::Path<Uuid>, store: web::Data<SessionStore>) -> impl Responder {
    let id = path.into_inner();
    let outcome = store.with_session(&id, |session| {
        let result = session.advance();
        let mut body = state_body(&id, session);
        body["ok"] = json!(result.is_ok());
        if let Err(errors) = &result {
            body["errors"] = json!(errors);
        }
        (result.is_ok(), body)
    });

    match outcome {
        Some((true, body)) => HttpResponse::Ok().json(body),
        Some((false, body)) => HttpResponse::UnprocessableEntity().json(body),
        None => session_not_found(),
    }
}

pub async fn retreat(path: web::Path<Uuid>, store: web::Data<SessionStore>) -> impl Responder {
    mutate(&store, path.into_inner(), |session| {
        session.retreat();
    })
}

pub async fn reset(path: web::Path<Uuid>, store: web::Data<SessionStore>) -> impl Responder {
    mutate(&store, path.into_inner(), |session| session.reset())
}

/*
    POST /api/wizard/{id}/submit
*/
pub async fn submit(path: web::Path<Uuid>, store: web::Data<SessionStore>) -> impl Responder {
    let id = path.into_inner();
    let outcome = store.with_session(&id, |session| match session.submit() {
        Ok(submission) => HttpResponse::Ok().json(submission),
        Err(err @ SubmitError::NotOnSummary(_)) => {
            HttpResponse::Conflict().json(json!({ "error": err.to_string() }))
        }
        Err(SubmitError::Incomplete { errors, .. }) => {
            let mut body = state_body(&id, session);
            body["ok"] = json!(false);
            body["errors"] = json!(errors);
            HttpResponse::UnprocessableEntity().json(body)
        }
    });

    outcome.unwrap_or_else(session_not_found)
}
