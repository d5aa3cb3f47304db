use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use parfum_domain::{Page, ids, text};
use parfum_storage::{
	lookups::{self, LookupKind},
	models::{NewNote, NoteSummary},
	notes::{self, NoteListFilter},
};

use crate::{CatalogService, DeleteResponse, Error, Result};

const DEFAULT_SEARCH_LIMIT: i64 = 10;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct NoteListRequest {
	pub family: Option<String>,
	pub mood: Option<String>,
	pub skip: Option<i64>,
	pub limit: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct NoteSearchRequest {
	pub q: Option<String>,
	pub limit: Option<i64>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NoteListItem {
	pub id: i64,
	pub name: String,
	pub image_filename: Option<String>,
}
impl From<NoteSummary> for NoteListItem {
	fn from(row: NoteSummary) -> Self {
		Self { id: row.id, name: row.name, image_filename: row.image_filename }
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NoteDetailResponse {
	pub id: i64,
	pub name: String,
	pub normalized_name: String,
	pub image_filename: Option<String>,
	pub description: Option<String>,
	pub source: Option<String>,
	pub cultural_significance: Option<String>,
	pub family: Option<String>,
	pub moods: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct NoteCreateRequest {
	pub name: String,
	pub image_filename: Option<String>,
	pub description: Option<String>,
	pub source: Option<String>,
	pub cultural_significance: Option<String>,
	pub family_id: Option<i64>,
	#[serde(default)]
	pub mood_ids: Vec<i64>,
}

impl CatalogService {
	pub async fn list_notes(&self, req: NoteListRequest) -> Result<Vec<NoteListItem>> {
		let page = Page::new(req.skip, req.limit)?;
		let filter = NoteListFilter {
			family_pattern: text::clean(req.family.as_deref()).map(text::contains_pattern),
			mood_pattern: text::clean(req.mood.as_deref()).map(text::contains_pattern),
		};
		let rows = notes::list(&self.db.pool, &filter, page).await?;

		Ok(rows.into_iter().map(NoteListItem::from).collect())
	}

	/// Case-insensitive substring search over note names.
	pub async fn search_notes(&self, req: NoteSearchRequest) -> Result<Vec<NoteListItem>> {
		let Some(q) = text::clean(req.q.as_deref()) else {
			return Err(Error::invalid_field("q", "Search text must not be empty."));
		};
		let page = Page::new(None, Some(req.limit.unwrap_or(DEFAULT_SEARCH_LIMIT)))?;
		let pattern = text::contains_pattern(&text::normalize_name(q));
		let rows = notes::search(&self.db.pool, &pattern, page.limit).await?;

		Ok(rows.into_iter().map(NoteListItem::from).collect())
	}

	pub async fn get_note(&self, id: i64) -> Result<NoteDetailResponse> {
		let mut conn = self.db.pool.acquire().await?;

		load_note(&mut conn, id).await?.ok_or_else(|| not_found(id))
	}

	/// Creates a note. A note whose lowercased name already exists is a conflict.
	pub async fn create_note(&self, req: NoteCreateRequest) -> Result<NoteDetailResponse> {
		let name = req.name.trim();

		if name.is_empty() {
			return Err(Error::invalid_field("name", "Note name must not be empty."));
		}

		let mut tx = self.db.pool.begin().await?;

		if notes::find_by_normalized_name(&mut *tx, &text::normalize_name(name)).await?.is_some() {
			return Err(Error::Conflict { message: format!("Note {name:?} already exists.") });
		}
		if let Some(family_id) = req.family_id
			&& !lookups::missing_ids(&mut *tx, LookupKind::NoteFamily, &[family_id])
				.await?
				.is_empty()
		{
			return Err(Error::invalid_field(
				"family_id",
				format!("Note family {family_id} does not exist."),
			));
		}

		let mood_ids = ids::dedupe(&req.mood_ids);

		if let Some(id) =
			lookups::missing_ids(&mut *tx, LookupKind::NoteMood, &mood_ids).await?.first()
		{
			return Err(Error::invalid_field("mood_ids", format!("Note mood {id} does not exist.")));
		}

		let note = NewNote {
			name: name.to_string(),
			image_filename: req.image_filename,
			description: req.description,
			source: req.source,
			cultural_significance: req.cultural_significance,
			family_id: req.family_id,
		};
		let id = notes::insert(&mut tx, &note).await?;

		notes::link_moods(&mut tx, id, &mood_ids).await?;

		let detail = load_note(&mut tx, id).await?.ok_or_else(|| not_found(id))?;

		tx.commit().await?;

		tracing::info!(note_id = id, "Note created.");

		Ok(detail)
	}

	pub async fn delete_note(&self, id: i64) -> Result<DeleteResponse> {
		if !notes::delete(&self.db.pool, id).await? {
			return Err(not_found(id));
		}

		Ok(DeleteResponse::deleted("Note"))
	}
}

async fn load_note(conn: &mut PgConnection, id: i64) -> Result<Option<NoteDetailResponse>> {
	let Some(row) = notes::get(&mut *conn, id).await? else {
		return Ok(None);
	};
	let moods = notes::moods_of(&mut *conn, id).await?;

	Ok(Some(NoteDetailResponse {
		id: row.id,
		name: row.name,
		normalized_name: row.normalized_name,
		image_filename: row.image_filename,
		description: row.description,
		source: row.source,
		cultural_significance: row.cultural_significance,
		family: row.family_name,
		moods,
	}))
}

fn not_found(id: i64) -> Error {
	Error::NotFound { message: format!("Note {id} not found.") }
}
