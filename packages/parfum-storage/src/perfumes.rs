use sqlx::{PgConnection, PgExecutor};

use parfum_domain::NoteRole;

use crate::{
	Error, Result,
	error::WriteOp,
	models::{NewPerfume, PerfumeNoteName},
};

pub async fn insert(conn: &mut PgConnection, perfume: &NewPerfume) -> Result<i64> {
	let id: i64 = sqlx::query_scalar(
		"\
INSERT INTO perfumes (
	name,
	brand_id,
	type_id,
	family_id,
	concentration_id,
	country_id,
	perfumer_id,
	gender,
	category,
	release_year,
	description,
	longevity,
	sillage,
	inspiration,
	occasion,
	season,
	local_image_path
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
RETURNING id",
	)
	.bind(perfume.name.as_str())
	.bind(perfume.brand_id)
	.bind(perfume.type_id)
	.bind(perfume.family_id)
	.bind(perfume.concentration_id)
	.bind(perfume.country_id)
	.bind(perfume.perfumer_id)
	.bind(perfume.gender.map(|gender| gender.as_str()))
	.bind(perfume.category.as_deref())
	.bind(perfume.release_year)
	.bind(perfume.description.as_deref())
	.bind(perfume.longevity.as_deref())
	.bind(perfume.sillage.as_deref())
	.bind(perfume.inspiration.as_deref())
	.bind(&perfume.occasion)
	.bind(&perfume.season)
	.bind(perfume.local_image_path.as_deref())
	.fetch_one(conn)
	.await
	.map_err(|err| Error::from_write(err, WriteOp::Store, "Perfume"))?;

	Ok(id)
}

/// Replaces every scalar column. Returns `false` when the perfume does not exist.
pub async fn update(conn: &mut PgConnection, id: i64, perfume: &NewPerfume) -> Result<bool> {
	let result = sqlx::query(
		"\
UPDATE perfumes
SET
	name = $1,
	brand_id = $2,
	type_id = $3,
	family_id = $4,
	concentration_id = $5,
	country_id = $6,
	perfumer_id = $7,
	gender = $8,
	category = $9,
	release_year = $10,
	description = $11,
	longevity = $12,
	sillage = $13,
	inspiration = $14,
	occasion = $15,
	season = $16,
	local_image_path = $17,
	updated_at = now()
WHERE id = $18",
	)
	.bind(perfume.name.as_str())
	.bind(perfume.brand_id)
	.bind(perfume.type_id)
	.bind(perfume.family_id)
	.bind(perfume.concentration_id)
	.bind(perfume.country_id)
	.bind(perfume.perfumer_id)
	.bind(perfume.gender.map(|gender| gender.as_str()))
	.bind(perfume.category.as_deref())
	.bind(perfume.release_year)
	.bind(perfume.description.as_deref())
	.bind(perfume.longevity.as_deref())
	.bind(perfume.sillage.as_deref())
	.bind(perfume.inspiration.as_deref())
	.bind(&perfume.occasion)
	.bind(&perfume.season)
	.bind(perfume.local_image_path.as_deref())
	.bind(id)
	.execute(conn)
	.await
	.map_err(|err| Error::from_write(err, WriteOp::Store, "Perfume"))?;

	Ok(result.rows_affected() > 0)
}

/// Locks the perfume row for the rest of the transaction. Returns `false` when it does not exist.
pub async fn lock(conn: &mut PgConnection, id: i64) -> Result<bool> {
	let found: Option<i64> = sqlx::query_scalar("SELECT id FROM perfumes WHERE id = $1 FOR UPDATE")
		.bind(id)
		.fetch_optional(conn)
		.await?;

	Ok(found.is_some())
}

/// Replaces the note set of a perfume. Rows are inserted in slice order, which is the order they
/// are read back in within a role.
pub async fn replace_notes(
	conn: &mut PgConnection,
	perfume_id: i64,
	notes: &[(i64, NoteRole)],
) -> Result<()> {
	sqlx::query("DELETE FROM perfume_notes WHERE perfume_id = $1")
		.bind(perfume_id)
		.execute(&mut *conn)
		.await?;

	for (note_id, role) in notes {
		sqlx::query("INSERT INTO perfume_notes (perfume_id, note_id, note_type) VALUES ($1, $2, $3)")
			.bind(perfume_id)
			.bind(note_id)
			.bind(role.as_str())
			.execute(&mut *conn)
			.await
			.map_err(|err| Error::from_write(err, WriteOp::Store, "Perfume note"))?;
	}

	Ok(())
}

pub async fn replace_main_accords(
	conn: &mut PgConnection,
	perfume_id: i64,
	main_accord_ids: &[i64],
) -> Result<()> {
	sqlx::query("DELETE FROM perfume_main_accords WHERE perfume_id = $1")
		.bind(perfume_id)
		.execute(&mut *conn)
		.await?;

	for main_accord_id in main_accord_ids {
		sqlx::query(
			"INSERT INTO perfume_main_accords (perfume_id, main_accord_id) VALUES ($1, $2)",
		)
		.bind(perfume_id)
		.bind(main_accord_id)
		.execute(&mut *conn)
		.await
		.map_err(|err| Error::from_write(err, WriteOp::Store, "Perfume main accord"))?;
	}

	Ok(())
}

pub async fn replace_tags(conn: &mut PgConnection, perfume_id: i64, tag_ids: &[i64]) -> Result<()> {
	sqlx::query("DELETE FROM perfume_tags WHERE perfume_id = $1")
		.bind(perfume_id)
		.execute(&mut *conn)
		.await?;

	for tag_id in tag_ids {
		sqlx::query("INSERT INTO perfume_tags (perfume_id, tag_id) VALUES ($1, $2)")
			.bind(perfume_id)
			.bind(tag_id)
			.execute(&mut *conn)
			.await
			.map_err(|err| Error::from_write(err, WriteOp::Store, "Perfume tag"))?;
	}

	Ok(())
}

/// Deletes the perfume together with every association row it owns. Returns `false` when the
/// perfume does not exist.
pub async fn delete(conn: &mut PgConnection, id: i64) -> Result<bool> {
	for sql in [
		"DELETE FROM perfume_notes WHERE perfume_id = $1",
		"DELETE FROM perfume_main_accords WHERE perfume_id = $1",
		"DELETE FROM perfume_tags WHERE perfume_id = $1",
	] {
		sqlx::query(sql).bind(id).execute(&mut *conn).await?;
	}

	let result = sqlx::query("DELETE FROM perfumes WHERE id = $1").bind(id).execute(conn).await?;

	Ok(result.rows_affected() > 0)
}

/// Notes of a perfume in association insertion order, roles interleaved.
pub async fn notes_of<'e, E>(executor: E, perfume_id: i64) -> Result<Vec<PerfumeNoteName>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, PerfumeNoteName>(
		"\
SELECT pn.note_type, n.name
FROM perfume_notes pn
JOIN notes n ON n.id = pn.note_id
WHERE pn.perfume_id = $1
ORDER BY pn.seq",
	)
	.bind(perfume_id)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn main_accords_of<'e, E>(executor: E, perfume_id: i64) -> Result<Vec<String>>
where
	E: PgExecutor<'e>,
{
	let names = sqlx::query_scalar(
		"\
SELECT ma.name
FROM perfume_main_accords pma
JOIN main_accords ma ON ma.id = pma.main_accord_id
WHERE pma.perfume_id = $1
ORDER BY pma.seq",
	)
	.bind(perfume_id)
	.fetch_all(executor)
	.await?;

	Ok(names)
}

pub async fn tags_of<'e, E>(executor: E, perfume_id: i64) -> Result<Vec<String>>
where
	E: PgExecutor<'e>,
{
	let names = sqlx::query_scalar(
		"\
SELECT t.name
FROM perfume_tags pt
JOIN tags t ON t.id = pt.tag_id
WHERE pt.perfume_id = $1
ORDER BY pt.seq",
	)
	.bind(perfume_id)
	.fetch_all(executor)
	.await?;

	Ok(names)
}

/// Association row counts for a perfume id, used to verify ownership cleanup.
pub async fn association_count<'e, E>(executor: E, perfume_id: i64) -> Result<i64>
where
	E: PgExecutor<'e>,
{
	let count = sqlx::query_scalar(
		"\
SELECT
	(SELECT count(*) FROM perfume_notes WHERE perfume_id = $1)
	+ (SELECT count(*) FROM perfume_main_accords WHERE perfume_id = $1)
	+ (SELECT count(*) FROM perfume_tags WHERE perfume_id = $1)",
	)
	.bind(perfume_id)
	.fetch_one(executor)
	.await?;

	Ok(count)
}
