use sqlx::{PgExecutor, PgPool};

use parfum_domain::Page;

use crate::{
	Error, Result,
	error::WriteOp,
	models::Lookup,
};

/// The uniquely-named dictionary tables referenced by perfumes and notes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LookupKind {
	Brand,
	Country,
	Type,
	Family,
	Concentration,
	Perfumer,
	MainAccord,
	Tag,
	Season,
	Occasion,
	NoteFamily,
	NoteMood,
}
impl LookupKind {
	pub const ALL: [Self; 12] = [
		Self::Brand,
		Self::Country,
		Self::Type,
		Self::Family,
		Self::Concentration,
		Self::Perfumer,
		Self::MainAccord,
		Self::Tag,
		Self::Season,
		Self::Occasion,
		Self::NoteFamily,
		Self::NoteMood,
	];

	pub fn table(self) -> &'static str {
		match self {
			Self::Brand => "brands",
			Self::Country => "countries",
			Self::Type => "perfume_types",
			Self::Family => "families",
			Self::Concentration => "concentrations",
			Self::Perfumer => "perfumers",
			Self::MainAccord => "main_accords",
			Self::Tag => "tags",
			Self::Season => "seasons",
			Self::Occasion => "occasions",
			Self::NoteFamily => "note_families",
			Self::NoteMood => "note_moods",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Brand => "Brand",
			Self::Country => "Country",
			Self::Type => "Type",
			Self::Family => "Family",
			Self::Concentration => "Concentration",
			Self::Perfumer => "Perfumer",
			Self::MainAccord => "Main accord",
			Self::Tag => "Tag",
			Self::Season => "Season",
			Self::Occasion => "Occasion",
			Self::NoteFamily => "Note family",
			Self::NoteMood => "Note mood",
		}
	}
}

pub async fn list(pool: &PgPool, kind: LookupKind, page: Page) -> Result<Vec<Lookup>> {
	let sql = format!("SELECT id, name FROM {} ORDER BY id OFFSET $1 LIMIT $2", kind.table());
	let rows = sqlx::query_as::<_, Lookup>(&sql)
		.bind(page.skip)
		.bind(page.limit)
		.fetch_all(pool)
		.await?;

	Ok(rows)
}

pub async fn get<'e, E>(executor: E, kind: LookupKind, id: i64) -> Result<Option<Lookup>>
where
	E: PgExecutor<'e>,
{
	let sql = format!("SELECT id, name FROM {} WHERE id = $1", kind.table());
	let row = sqlx::query_as::<_, Lookup>(&sql).bind(id).fetch_optional(executor).await?;

	Ok(row)
}

/// Inserts a new row. An existing row with the exact same name is a conflict, including one
/// committed concurrently between any caller-side check and this insert.
pub async fn create(pool: &PgPool, kind: LookupKind, name: &str) -> Result<Lookup> {
	let sql = format!("INSERT INTO {} (name) VALUES ($1) RETURNING id, name", kind.table());

	sqlx::query_as::<_, Lookup>(&sql).bind(name).fetch_one(pool).await.map_err(|err| {
		Error::from_write(err, WriteOp::Store, &format!("{} {name:?}", kind.label()))
	})
}

/// Returns `false` when no row had the id.
pub async fn delete(pool: &PgPool, kind: LookupKind, id: i64) -> Result<bool> {
	let sql = format!("DELETE FROM {} WHERE id = $1", kind.table());
	let result = sqlx::query(&sql)
		.bind(id)
		.execute(pool)
		.await
		.map_err(|err| Error::from_write(err, WriteOp::Delete, &format!("{} {id}", kind.label())))?;

	Ok(result.rows_affected() > 0)
}

/// The subset of `ids` with no row in the table, in input order.
pub async fn missing_ids<'e, E>(executor: E, kind: LookupKind, ids: &[i64]) -> Result<Vec<i64>>
where
	E: PgExecutor<'e>,
{
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let sql = format!("SELECT id FROM {} WHERE id = ANY($1)", kind.table());
	let found: Vec<i64> = sqlx::query_scalar(&sql).bind(ids).fetch_all(executor).await?;

	Ok(ids.iter().copied().filter(|id| !found.contains(id)).collect())
}
