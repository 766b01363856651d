//! JSON endpoints under `/api/v1`.

use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::cards::{CreateCardForm, UpdateCardForm};
use crate::forms::issuers::CreateIssuerForm;
use crate::forms::transactions::CreateTransactionForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{blocking, error_response, json_config, query_config};
use crate::services::{cards, issuers, transactions};

type QueryPairs = web::Query<Vec<(String, String)>>;

#[get("/issuers")]
pub async fn list_issuers(
    query: QueryPairs,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let pairs = query.into_inner();
    let max_page_size = config.max_page_size;
    match blocking(move || issuers::list_issuers(repo.get_ref(), pairs, max_page_size)).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[get("/issuers/{id}")]
pub async fn get_issuer(id: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let id = id.into_inner();
    match blocking(move || issuers::get_issuer(repo.get_ref(), id)).await {
        Ok(issuer) => HttpResponse::Ok().json(issuer),
        Err(err) => error_response(err),
    }
}

#[post("/issuers")]
pub async fn create_issuer(
    form: web::Json<CreateIssuerForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let form = form.into_inner();
    match blocking(move || issuers::create_issuer(repo.get_ref(), form)).await {
        Ok(issuer) => HttpResponse::Created().json(issuer),
        Err(err) => error_response(err),
    }
}

#[get("/cards")]
pub async fn list_cards(
    query: QueryPairs,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let pairs = query.into_inner();
    let max_page_size = config.max_page_size;
    match blocking(move || cards::list_cards(repo.get_ref(), pairs, max_page_size)).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[get("/cards/{id}")]
pub async fn get_card(id: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let id = id.into_inner();
    match blocking(move || cards::get_card(repo.get_ref(), id)).await {
        Ok(card) => HttpResponse::Ok().json(card),
        Err(err) => error_response(err),
    }
}

#[post("/cards")]
pub async fn create_card(
    form: web::Json<CreateCardForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let form = form.into_inner();
    match blocking(move || cards::create_card(repo.get_ref(), form)).await {
        Ok(card) => HttpResponse::Created().json(card),
        Err(err) => error_response(err),
    }
}

#[put("/cards/{id}")]
pub async fn update_card(
    id: web::Path<i32>,
    form: web::Json<UpdateCardForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();
    let form = form.into_inner();
    match blocking(move || cards::update_card(repo.get_ref(), id, form)).await {
        Ok(card) => HttpResponse::Ok().json(card),
        Err(err) => error_response(err),
    }
}

#[delete("/cards/{id}")]
pub async fn delete_card(id: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let id = id.into_inner();
    match blocking(move || cards::delete_card(repo.get_ref(), id)).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

#[get("/transactions")]
pub async fn list_transactions(
    query: QueryPairs,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let pairs = query.into_inner();
    let max_page_size = config.max_page_size;
    match blocking(move || transactions::list_transactions(repo.get_ref(), pairs, max_page_size))
        .await
    {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[get("/transactions/{id}")]
pub async fn get_transaction(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();
    match blocking(move || transactions::get_transaction(repo.get_ref(), id)).await {
        Ok(transaction) => HttpResponse::Ok().json(transaction),
        Err(err) => error_response(err),
    }
}

#[post("/transactions")]
pub async fn create_transaction(
    form: web::Json<CreateTransactionForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let form = form.into_inner();
    match blocking(move || transactions::create_transaction(repo.get_ref(), form)).await {
        Ok(transaction) => HttpResponse::Created().json(transaction),
        Err(err) => error_response(err),
    }
}

/// Registers every `/api/v1` route and the JSON error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(json_config())
            .app_data(query_config())
            .service(list_issuers)
            .service(get_issuer)
            .service(create_issuer)
            .service(list_cards)
            .service(get_card)
            .service(create_card)
            .service(update_card)
            .service(delete_card)
            .service(list_transactions)
            .service(get_transaction)
            .service(create_transaction),
    );
}
