use sqlx::{PgConnection, PgExecutor, PgPool, Postgres, QueryBuilder};

use parfum_domain::Page;

use crate::{
	Error, Result,
	error::WriteOp,
	models::{NewNote, NoteRow, NoteSummary},
};

/// `ILIKE` patterns narrowing a note listing. Mood is multi-valued and filtered with a
/// semi-join so a note never appears twice.
#[derive(Debug, Default)]
pub struct NoteListFilter {
	pub family_pattern: Option<String>,
	pub mood_pattern: Option<String>,
}

pub async fn list(pool: &PgPool, filter: &NoteListFilter, page: Page) -> Result<Vec<NoteSummary>> {
	let mut builder =
		QueryBuilder::<Postgres>::new("SELECT n.id, n.name, n.image_filename FROM notes n");

	if filter.family_pattern.is_some() {
		builder.push(" LEFT JOIN note_families nf ON nf.id = n.family_id");
	}

	builder.push(" WHERE TRUE");

	if let Some(pattern) = &filter.family_pattern {
		builder.push(" AND nf.name ILIKE ");
		builder.push_bind(pattern.as_str());
	}
	if let Some(pattern) = &filter.mood_pattern {
		builder.push(
			" AND EXISTS (SELECT 1 FROM note_mood_links nml JOIN note_moods nm ON nm.id = nml.mood_id WHERE nml.note_id = n.id AND nm.name ILIKE ",
		);
		builder.push_bind(pattern.as_str());
		builder.push(")");
	}

	builder.push(" ORDER BY n.id OFFSET ");
	builder.push_bind(page.skip);
	builder.push(" LIMIT ");
	builder.push_bind(page.limit);

	let rows = builder.build_query_as::<NoteSummary>().fetch_all(pool).await?;

	Ok(rows)
}

/// Notes whose normalized name matches `pattern`, alphabetically.
pub async fn search(pool: &PgPool, pattern: &str, limit: i64) -> Result<Vec<NoteSummary>> {
	let rows = sqlx::query_as::<_, NoteSummary>(
		"\
SELECT id, name, image_filename
FROM notes
WHERE normalized_name LIKE $1
ORDER BY normalized_name, id
LIMIT $2",
	)
	.bind(pattern)
	.bind(limit)
	.fetch_all(pool)
	.await?;

	Ok(rows)
}

pub async fn get<'e, E>(executor: E, id: i64) -> Result<Option<NoteRow>>
where
	E: PgExecutor<'e>,
{
	let row = sqlx::query_as::<_, NoteRow>(
		"\
SELECT
	n.id,
	n.name,
	n.normalized_name,
	n.image_filename,
	n.description,
	n.source,
	n.cultural_significance,
	nf.name AS family_name
FROM notes n
LEFT JOIN note_families nf ON nf.id = n.family_id
WHERE n.id = $1",
	)
	.bind(id)
	.fetch_optional(executor)
	.await?;

	Ok(row)
}

pub async fn moods_of<'e, E>(executor: E, id: i64) -> Result<Vec<String>>
where
	E: PgExecutor<'e>,
{
	let names = sqlx::query_scalar(
		"\
SELECT nm.name
FROM note_mood_links nml
JOIN note_moods nm ON nm.id = nml.mood_id
WHERE nml.note_id = $1
ORDER BY nm.name",
	)
	.bind(id)
	.fetch_all(executor)
	.await?;

	Ok(names)
}

/// The note already holding `normalized`, if any.
pub async fn find_by_normalized_name<'e, E>(executor: E, normalized: &str) -> Result<Option<i64>>
where
	E: PgExecutor<'e>,
{
	let id = sqlx::query_scalar("SELECT id FROM notes WHERE normalized_name = $1")
		.bind(normalized)
		.fetch_optional(executor)
		.await?;

	Ok(id)
}

pub async fn insert(conn: &mut PgConnection, note: &NewNote) -> Result<i64> {
	let id: i64 = sqlx::query_scalar(
		"\
INSERT INTO notes (name, image_filename, description, source, cultural_significance, family_id)
VALUES ($1, $2, $3, $4, $5, $6)
RETURNING id",
	)
	.bind(note.name.as_str())
	.bind(note.image_filename.as_deref())
	.bind(note.description.as_deref())
	.bind(note.source.as_deref())
	.bind(note.cultural_significance.as_deref())
	.bind(note.family_id)
	.fetch_one(conn)
	.await
	.map_err(|err| Error::from_write(err, WriteOp::Store, &format!("Note {:?}", note.name)))?;

	Ok(id)
}

pub async fn link_moods(conn: &mut PgConnection, note_id: i64, mood_ids: &[i64]) -> Result<()> {
	for mood_id in mood_ids {
		sqlx::query("INSERT INTO note_mood_links (note_id, mood_id) VALUES ($1, $2)")
			.bind(note_id)
			.bind(mood_id)
			.execute(&mut *conn)
			.await
			.map_err(|err| Error::from_write(err, WriteOp::Store, "Note mood"))?;
	}

	Ok(())
}

/// Deletes a note; its perfume and mood associations cascade. Returns `false` when absent.
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
	let result = sqlx::query("DELETE FROM notes WHERE id = $1")
		.bind(id)
		.execute(pool)
		.await
		.map_err(|err| Error::from_write(err, WriteOp::Delete, &format!("Note {id}")))?;

	Ok(result.rows_affected() > 0)
}

/// The subset of `ids` with no note, in input order.
pub async fn missing_ids<'e, E>(executor: E, ids: &[i64]) -> Result<Vec<i64>>
where
	E: PgExecutor<'e>,
{
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let found: Vec<i64> = sqlx::query_scalar("SELECT id FROM notes WHERE id = ANY($1)")
		.bind(ids)
		.fetch_all(executor)
		.await?;

	Ok(ids.iter().copied().filter(|id| !found.contains(id)).collect())
}
