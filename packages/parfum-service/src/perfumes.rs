use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use parfum_domain::{Gender, NoteRole, ids};
use parfum_storage::{
	lookups::{self, LookupKind},
	models::{NewPerfume, PerfumeDetail},
	notes, perfumes,
};

use crate::{
	CatalogService, DeleteResponse, Error, Result, assemble,
	assemble::PerfumeDetailResponse,
	search::projection::SearchPlan,
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct PerfumeNoteInput {
	pub note_id: i64,
	pub role: NoteRole,
}

/// Body of a perfume create or full update. Association lists left out of an update keep their
/// current rows; supplied lists replace them.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PerfumeWriteRequest {
	pub name: String,
	pub brand_id: Option<i64>,
	pub type_id: Option<i64>,
	pub family_id: Option<i64>,
	pub concentration_id: Option<i64>,
	pub country_id: Option<i64>,
	pub perfumer_id: Option<i64>,
	pub gender: Option<Gender>,
	pub category: Option<String>,
	pub release_year: Option<i32>,
	pub description: Option<String>,
	pub longevity: Option<String>,
	pub sillage: Option<String>,
	pub inspiration: Option<String>,
	#[serde(default)]
	pub occasion: Vec<String>,
	#[serde(default)]
	pub season: Vec<String>,
	#[serde(alias = "local_image_path")]
	pub image_path: Option<String>,
	pub notes: Option<Vec<PerfumeNoteInput>>,
	pub main_accord_ids: Option<Vec<i64>>,
	pub tag_ids: Option<Vec<i64>>,
}

/// A write request with duplicates removed and every referenced id confirmed to exist.
struct ValidatedWrite {
	perfume: NewPerfume,
	notes: Option<Vec<(i64, NoteRole)>>,
	main_accord_ids: Option<Vec<i64>>,
	tag_ids: Option<Vec<i64>>,
}

impl CatalogService {
	pub async fn get_perfume(&self, id: i64) -> Result<PerfumeDetailResponse> {
		let mut conn = self.db.pool.acquire().await?;

		load_detail(&mut conn, id).await?.ok_or_else(|| not_found(id))
	}

	pub async fn create_perfume(&self, req: PerfumeWriteRequest) -> Result<PerfumeDetailResponse> {
		let mut tx = self.db.pool.begin().await?;
		let write = validate_write(&mut tx, req).await?;
		let id = perfumes::insert(&mut tx, &write.perfume).await?;

		replace_associations(&mut tx, id, &write).await?;

		let detail = load_detail(&mut tx, id).await?.ok_or_else(|| not_found(id))?;

		tx.commit().await?;

		tracing::info!(perfume_id = id, "Perfume created.");

		Ok(detail)
	}

	pub async fn update_perfume(
		&self,
		id: i64,
		req: PerfumeWriteRequest,
	) -> Result<PerfumeDetailResponse> {
		let mut tx = self.db.pool.begin().await?;

		if !perfumes::lock(&mut tx, id).await? {
			return Err(not_found(id));
		}

		let write = validate_write(&mut tx, req).await?;

		if !perfumes::update(&mut tx, id, &write.perfume).await? {
			return Err(not_found(id));
		}

		replace_associations(&mut tx, id, &write).await?;

		let detail = load_detail(&mut tx, id).await?.ok_or_else(|| not_found(id))?;

		tx.commit().await?;

		Ok(detail)
	}

	pub async fn delete_perfume(&self, id: i64) -> Result<DeleteResponse> {
		let mut tx = self.db.pool.begin().await?;

		if !perfumes::delete(&mut tx, id).await? {
			return Err(not_found(id));
		}

		tx.commit().await?;

		tracing::info!(perfume_id = id, "Perfume deleted.");

		Ok(DeleteResponse::deleted("Perfume"))
	}
}

/// Loads the detail projection and its collections on one connection, so a transaction sees its
/// own uncommitted writes.
pub(crate) async fn load_detail(
	conn: &mut PgConnection,
	id: i64,
) -> Result<Option<PerfumeDetailResponse>> {
	let plan = SearchPlan::detail(id);
	let mut builder = plan.build();
	let Some(row) = builder.build_query_as::<PerfumeDetail>().fetch_optional(&mut *conn).await?
	else {
		return Ok(None);
	};
	let notes = perfumes::notes_of(&mut *conn, id).await?;
	let main_accords = perfumes::main_accords_of(&mut *conn, id).await?;
	let tags = perfumes::tags_of(&mut *conn, id).await?;

	assemble::detail(row, notes, main_accords, tags).map(Some)
}

async fn validate_write(
	conn: &mut PgConnection,
	req: PerfumeWriteRequest,
) -> Result<ValidatedWrite> {
	let name = req.name.trim();

	if name.is_empty() {
		return Err(Error::invalid_field("name", "Perfume name must not be empty."));
	}

	for (field, kind, id) in [
		("brand_id", LookupKind::Brand, req.brand_id),
		("type_id", LookupKind::Type, req.type_id),
		("family_id", LookupKind::Family, req.family_id),
		("concentration_id", LookupKind::Concentration, req.concentration_id),
		("country_id", LookupKind::Country, req.country_id),
		("perfumer_id", LookupKind::Perfumer, req.perfumer_id),
	] {
		let Some(id) = id else {
			continue;
		};

		if !lookups::missing_ids(&mut *conn, kind, &[id]).await?.is_empty() {
			return Err(Error::invalid_field(
				field,
				format!("{} {id} does not exist.", kind.label()),
			));
		}
	}

	let notes = match &req.notes {
		Some(inputs) => {
			let pairs = ids::dedupe(
				&inputs.iter().map(|input| (input.note_id, input.role)).collect::<Vec<_>>(),
			);
			let note_ids =
				ids::dedupe(&pairs.iter().map(|(note_id, _)| *note_id).collect::<Vec<_>>());
			let missing = notes::missing_ids(&mut *conn, &note_ids).await?;

			if let Some(id) = missing.first() {
				return Err(Error::invalid_field("notes", format!("Note {id} does not exist.")));
			}

			Some(pairs)
		},
		None => None,
	};
	let main_accord_ids = checked_ids(
		conn,
		"main_accord_ids",
		LookupKind::MainAccord,
		req.main_accord_ids.as_deref(),
	)
	.await?;
	let tag_ids = checked_ids(conn, "tag_ids", LookupKind::Tag, req.tag_ids.as_deref()).await?;
	let perfume = NewPerfume {
		name: name.to_string(),
		brand_id: req.brand_id,
		type_id: req.type_id,
		family_id: req.family_id,
		concentration_id: req.concentration_id,
		country_id: req.country_id,
		perfumer_id: req.perfumer_id,
		gender: req.gender,
		category: req.category,
		release_year: req.release_year,
		description: req.description,
		longevity: req.longevity,
		sillage: req.sillage,
		inspiration: req.inspiration,
		occasion: req.occasion,
		season: req.season,
		local_image_path: req.image_path,
	};

	Ok(ValidatedWrite { perfume, notes, main_accord_ids, tag_ids })
}

async fn checked_ids(
	conn: &mut PgConnection,
	field: &str,
	kind: LookupKind,
	requested: Option<&[i64]>,
) -> Result<Option<Vec<i64>>> {
	let Some(requested) = requested else {
		return Ok(None);
	};
	let ids = ids::dedupe(requested);

	if let Some(id) = lookups::missing_ids(conn, kind, &ids).await?.first() {
		return Err(Error::invalid_field(field, format!("{} {id} does not exist.", kind.label())));
	}

	Ok(Some(ids))
}

async fn replace_associations(
	conn: &mut PgConnection,
	id: i64,
	write: &ValidatedWrite,
) -> Result<()> {
	if let Some(notes) = &write.notes {
		perfumes::replace_notes(&mut *conn, id, notes).await?;
	}
	if let Some(main_accord_ids) = &write.main_accord_ids {
		perfumes::replace_main_accords(&mut *conn, id, main_accord_ids).await?;
	}
	if let Some(tag_ids) = &write.tag_ids {
		perfumes::replace_tags(&mut *conn, id, tag_ids).await?;
	}

	Ok(())
}

fn not_found(id: i64) -> Error {
	Error::NotFound { message: format!("Perfume {id} not found.") }
}

#[cfg(test)]
mod tests {
	use parfum_domain::{Gender, NoteRole};

	use crate::perfumes::PerfumeWriteRequest;

	#[test]
	fn write_request_accepts_minimal_body() {
		let req: PerfumeWriteRequest =
			serde_json::from_str(r#"{"name":"Aventus"}"#).expect("Parse failed.");

		assert_eq!(req.name, "Aventus");
		assert!(req.occasion.is_empty());
		assert!(req.notes.is_none());
		assert!(req.tag_ids.is_none());
	}

	#[test]
	fn write_request_reads_typed_fields() {
		let req: PerfumeWriteRequest = serde_json::from_str(
			r#"{
				"name": "Aventus",
				"gender": "Male",
				"local_image_path": "images/aventus.jpg",
				"notes": [{"note_id": 4, "role": "base"}],
				"main_accord_ids": [1, 2]
			}"#,
		)
		.expect("Parse failed.");

		assert_eq!(req.gender, Some(Gender::Male));
		assert_eq!(req.image_path.as_deref(), Some("images/aventus.jpg"));
		assert_eq!(req.notes.as_ref().map(|notes| notes[0].role), Some(NoteRole::Base));
		assert_eq!(req.main_accord_ids, Some(vec![1, 2]));
	}

	#[test]
	fn write_request_rejects_lowercase_gender() {
		let result = serde_json::from_str::<PerfumeWriteRequest>(r#"{"name":"X","gender":"male"}"#);

		assert!(result.is_err());
	}
}
