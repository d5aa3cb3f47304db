use axum::{
	Json, Router,
	extract::{
		Path, Query, State,
		rejection::{JsonRejection, PathRejection, QueryRejection},
	},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;

use parfum_service::{
	DeleteResponse, Error as ServiceError, LookupCreateRequest, LookupItem, LookupKind,
	NoteCreateRequest, NoteDetailResponse, NoteListItem, NoteListRequest, NoteSearchRequest,
	PageRequest, PerfumeDetailResponse, PerfumeListItem, PerfumeWriteRequest, SearchRequest,
};

use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;
type IdPath = Result<Path<i64>, PathRejection>;
type PageQuery = Result<Query<PageRequest>, QueryRejection>;
type LookupBody = Result<Json<LookupCreateRequest>, JsonRejection>;

pub fn router(state: AppState) -> Router {
	let mut router = Router::new()
		.route("/health", get(health))
		.route("/api/v1/perfumes", get(list_perfumes).post(create_perfume))
		.route("/api/v1/perfumes/search", get(search_perfumes))
		.route(
			"/api/v1/perfumes/{id}",
			get(get_perfume).put(update_perfume).delete(delete_perfume),
		)
		.route("/api/v1/notes", get(list_notes).post(create_note))
		.route("/api/v1/notes/search", get(search_notes))
		.route("/api/v1/notes/{id}", get(get_note).delete(delete_note));

	for kind in LookupKind::ALL {
		router = lookup_routes(router, kind);
	}

	router.with_state(state)
}

/// Path segment under `/api/v1` serving one lookup table.
pub fn lookup_segment(kind: LookupKind) -> &'static str {
	match kind {
		LookupKind::Brand => "brands",
		LookupKind::Country => "countries",
		LookupKind::Type => "types",
		LookupKind::Family => "families",
		LookupKind::Concentration => "concentrations",
		LookupKind::Perfumer => "perfumers",
		LookupKind::MainAccord => "main-accords",
		LookupKind::Tag => "tags",
		LookupKind::Season => "seasons",
		LookupKind::Occasion => "occasions",
		LookupKind::NoteFamily => "notes/families",
		LookupKind::NoteMood => "notes/moods",
	}
}

fn lookup_routes(router: Router<AppState>, kind: LookupKind) -> Router<AppState> {
	let base = format!("/api/v1/{}", lookup_segment(kind));

	router
		.route(
			&base,
			get(move |state: State<AppState>, query: PageQuery| list_lookups(state, kind, query))
				.post(move |state: State<AppState>, body: LookupBody| {
					create_lookup(state, kind, body)
				}),
		)
		.route(
			&format!("{base}/{{id}}"),
			get(move |state: State<AppState>, path: IdPath| get_lookup(state, kind, path))
				.delete(move |state: State<AppState>, path: IdPath| delete_lookup(state, kind, path)),
		)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn list_perfumes(
	State(state): State<AppState>,
	query: PageQuery,
) -> ApiResult<Vec<PerfumeListItem>> {
	let Query(req) = query?;
	let response = state.service.list_perfumes(req).await?;

	Ok(Json(response))
}

async fn search_perfumes(
	State(state): State<AppState>,
	query: Result<Query<SearchRequest>, QueryRejection>,
) -> ApiResult<Vec<PerfumeListItem>> {
	let Query(req) = query?;
	let response = state.service.search_perfumes(req).await?;

	Ok(Json(response))
}

async fn get_perfume(
	State(state): State<AppState>,
	path: IdPath,
) -> ApiResult<PerfumeDetailResponse> {
	let Path(id) = path?;
	let response = state.service.get_perfume(id).await?;

	Ok(Json(response))
}

async fn create_perfume(
	State(state): State<AppState>,
	payload: Result<Json<PerfumeWriteRequest>, JsonRejection>,
) -> ApiResult<PerfumeDetailResponse> {
	let Json(req) = payload?;
	let response = state.service.create_perfume(req).await?;

	Ok(Json(response))
}

async fn update_perfume(
	State(state): State<AppState>,
	path: IdPath,
	payload: Result<Json<PerfumeWriteRequest>, JsonRejection>,
) -> ApiResult<PerfumeDetailResponse> {
	let Path(id) = path?;
	let Json(req) = payload?;
	let response = state.service.update_perfume(id, req).await?;

	Ok(Json(response))
}

async fn delete_perfume(
	State(state): State<AppState>,
	path: IdPath,
) -> ApiResult<DeleteResponse> {
	let Path(id) = path?;
	let response = state.service.delete_perfume(id).await?;

	Ok(Json(response))
}

async fn list_notes(
	State(state): State<AppState>,
	query: Result<Query<NoteListRequest>, QueryRejection>,
) -> ApiResult<Vec<NoteListItem>> {
	let Query(req) = query?;
	let response = state.service.list_notes(req).await?;

	Ok(Json(response))
}

async fn search_notes(
	State(state): State<AppState>,
	query: Result<Query<NoteSearchRequest>, QueryRejection>,
) -> ApiResult<Vec<NoteListItem>> {
	let Query(req) = query?;
	let response = state.service.search_notes(req).await?;

	Ok(Json(response))
}

async fn get_note(
	State(state): State<AppState>,
	path: IdPath,
) -> ApiResult<NoteDetailResponse> {
	let Path(id) = path?;
	let response = state.service.get_note(id).await?;

	Ok(Json(response))
}

async fn create_note(
	State(state): State<AppState>,
	payload: Result<Json<NoteCreateRequest>, JsonRejection>,
) -> ApiResult<NoteDetailResponse> {
	let Json(req) = payload?;
	let response = state.service.create_note(req).await?;

	Ok(Json(response))
}

async fn delete_note(
	State(state): State<AppState>,
	path: IdPath,
) -> ApiResult<DeleteResponse> {
	let Path(id) = path?;
	let response = state.service.delete_note(id).await?;

	Ok(Json(response))
}

async fn list_lookups(
	State(state): State<AppState>,
	kind: LookupKind,
	query: PageQuery,
) -> ApiResult<Vec<LookupItem>> {
	let Query(req) = query?;
	let response = state.service.list_lookups(kind, req).await?;

	Ok(Json(response))
}

async fn get_lookup(
	State(state): State<AppState>,
	kind: LookupKind,
	path: IdPath,
) -> ApiResult<LookupItem> {
	let Path(id) = path?;
	let response = state.service.get_lookup(kind, id).await?;

	Ok(Json(response))
}

async fn create_lookup(
	State(state): State<AppState>,
	kind: LookupKind,
	payload: LookupBody,
) -> ApiResult<LookupItem> {
	let Json(req) = payload?;
	let response = state.service.create_lookup(kind, req).await?;

	Ok(Json(response))
}

async fn delete_lookup(
	State(state): State<AppState>,
	kind: LookupKind,
	path: IdPath,
) -> ApiResult<DeleteResponse> {
	let Path(id) = path?;
	let response = state.service.delete_lookup(kind, id).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}

	fn invalid_request(message: impl Into<String>) -> Self {
		Self::new(StatusCode::UNPROCESSABLE_ENTITY, "invalid_request", message, None)
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { field, message } => Self::new(
				StatusCode::UNPROCESSABLE_ENTITY,
				"invalid_request",
				message,
				field.map(|field| vec![field]),
			),
			ServiceError::NotFound { message } =>
				Self::new(StatusCode::NOT_FOUND, "not_found", message, None),
			ServiceError::Conflict { message } =>
				Self::new(StatusCode::CONFLICT, "conflict", message, None),
			ServiceError::Storage { message } => {
				tracing::error!(error = %message, "Storage operation failed.");

				Self::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"storage_error",
					"Storage operation failed.",
					None,
				)
			},
		}
	}
}
impl From<QueryRejection> for ApiError {
	fn from(rejection: QueryRejection) -> Self {
		Self::invalid_request(rejection.body_text())
	}
}
impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::invalid_request(rejection.body_text())
	}
}
impl From<PathRejection> for ApiError {
	fn from(rejection: PathRejection) -> Self {
		Self::invalid_request(rejection.body_text())
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}
