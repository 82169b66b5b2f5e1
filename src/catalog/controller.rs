use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;
use crate::books::dto::{BookPatch, BookUpdate};
use crate::books::factory;
use crate::books::repository::BookRepository;
use crate::books::schema::{validate_book, BookSchema};
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest, ListBooksCommandResponse};
use crate::catalog::command::patch_book_cmd::{PatchBookCommand, PatchBookCommandRequest, PatchBookCommandResponse};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest, RemoveBookCommandResponse};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest, UpdateBookCommandResponse};
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/books", get(list_books).post(add_book))
        .route("/books/:isbn",
               get(find_book_by_isbn).put(update_book).patch(patch_book).delete(remove_book))
        .with_state(state)
}

fn build_repository(state: &AppState) -> Box<dyn BookRepository> {
    factory::create_book_repository(&state.pool)
}

// parse_body accepts any JSON document, the schema decides what is valid
fn parse_body(payload: Result<Json<Value>, JsonRejection>, schema: BookSchema) -> Result<Value, ServerError> {
    let Json(body) = payload.map_err(|rejection| {
        ServerError::new(StatusCode::BAD_REQUEST, rejection.body_text().as_str())
    })?;
    validate_book(&body, schema)?;
    Ok(body)
}

pub async fn list_books(
    State(state): State<AppState>) -> Result<Json<ListBooksCommandResponse>, ServerError> {
    let res = ListBooksCommand::new(build_repository(&state)).execute(ListBooksCommandRequest::default()).await?;
    Ok(Json(res))
}

pub async fn add_book(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>) -> Result<(StatusCode, Json<AddBookCommandResponse>), ServerError> {
    let body = parse_body(payload, BookSchema::Create)?;
    let req: AddBookCommandRequest = serde_json::from_value(body).map_err(json_to_server_error)?;
    let res = AddBookCommand::new(build_repository(&state)).execute(req).await?;
    tracing::info!(isbn = %res.book.isbn, "book added");
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn find_book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    let req = GetBookCommandRequest::new(isbn);
    let res = GetBookCommand::new(build_repository(&state)).execute(req).await?;
    Ok(Json(res))
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    payload: Result<Json<Value>, JsonRejection>) -> Result<Json<UpdateBookCommandResponse>, ServerError> {
    let body = parse_body(payload, BookSchema::Update)?;
    let data: BookUpdate = serde_json::from_value(body).map_err(json_to_server_error)?;
    let req = UpdateBookCommandRequest::new(isbn.as_str(), data);
    let res = UpdateBookCommand::new(build_repository(&state)).execute(req).await?;
    tracing::info!(isbn = %isbn, "book updated");
    Ok(Json(res))
}

pub async fn patch_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    payload: Result<Json<Value>, JsonRejection>) -> Result<Json<PatchBookCommandResponse>, ServerError> {
    let body = parse_body(payload, BookSchema::Patch)?;
    let patch: BookPatch = serde_json::from_value(body).map_err(json_to_server_error)?;
    let req = PatchBookCommandRequest::new(isbn.as_str(), patch);
    let res = PatchBookCommand::new(build_repository(&state)).execute(req).await?;
    tracing::info!(isbn = %isbn, "book patched");
    Ok(Json(res))
}

pub async fn remove_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<RemoveBookCommandResponse>, ServerError> {
    let req = RemoveBookCommandRequest::new(isbn);
    tracing::info!(isbn = %req.isbn, "removing book");
    let res = RemoveBookCommand::new(build_repository(&state)).execute(req).await?;
    Ok(Json(res))
}
