use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{Html, IntoResponse, Redirect, Response},
	routing::{delete, get},
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use notarium_service::{CreateNoteRequest, CreateNoteResponse, Error as ServiceError, NoteView};

const NOTES_PAGE: &str = include_str!("../assets/notes.html");
const WRITE_PAGE: &str = include_str!("../assets/write.html");

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/", get(answer))
		.route("/health", get(health))
		.route("/notes.json", get(notes_json))
		.route("/notes", get(notes_page).post(create_note))
		.route("/notes/{id}", delete(delete_note))
		.route("/write", get(write_page))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

#[derive(Debug, Deserialize)]
struct AskParams {
	text: Option<String>,
}

async fn answer(
	State(state): State<AppState>,
	Query(params): Query<AskParams>,
) -> Result<String, ApiError> {
	let question = params.text.unwrap_or_default();
	let answer = state.service.answer(&question).await?;

	Ok(answer)
}

async fn notes_json(State(state): State<AppState>) -> Result<Json<Vec<NoteView>>, ApiError> {
	let response = state.service.list_notes().await?;

	Ok(Json(response.notes))
}

async fn notes_page() -> Html<&'static str> {
	Html(NOTES_PAGE)
}

async fn write_page() -> Html<&'static str> {
	Html(WRITE_PAGE)
}

async fn create_note(
	State(state): State<AppState>,
	Json(payload): Json<CreateNoteRequest>,
) -> Result<Json<CreateNoteResponse>, ApiError> {
	let response = state.service.create_note(payload).await?;

	Ok(Json(response))
}

async fn delete_note(
	State(state): State<AppState>,
	Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
	state.service.delete_note(id).await?;

	Ok(Redirect::to("/notes"))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let (status, error_code) = match &err {
			ServiceError::Validation { .. } => (StatusCode::BAD_REQUEST, "invalid_request"),
			ServiceError::StoreWrite { .. } | ServiceError::StoreRead { .. } =>
				(StatusCode::INTERNAL_SERVER_ERROR, "record_store_failed"),
			ServiceError::IndexWrite { .. } | ServiceError::IndexQuery { .. } =>
				(StatusCode::INTERNAL_SERVER_ERROR, "vector_index_failed"),
			ServiceError::Embedding { .. } => (StatusCode::BAD_GATEWAY, "embedding_failed"),
			ServiceError::Generation { .. } => (StatusCode::BAD_GATEWAY, "generation_failed"),
		};

		Self { status, error_code: error_code.to_string(), message: err.to_string() }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
