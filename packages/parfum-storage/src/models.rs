use time::OffsetDateTime;

use parfum_domain::Gender;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Lookup {
	pub id: i64,
	pub name: String,
}

/// The narrow row used by list and search views.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PerfumeSummary {
	pub id: i64,
	pub name: String,
	pub brand_name: Option<String>,
	pub local_image_path: Option<String>,
}

/// Scalar columns of a perfume with every to-one relation resolved to its display name.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PerfumeDetail {
	pub id: i64,
	pub name: String,
	pub brand_name: Option<String>,
	pub type_name: Option<String>,
	pub family_name: Option<String>,
	pub concentration_name: Option<String>,
	pub country_name: Option<String>,
	pub perfumer_name: Option<String>,
	pub gender: Option<String>,
	pub category: Option<String>,
	pub release_year: Option<i32>,
	pub description: Option<String>,
	pub longevity: Option<String>,
	pub sillage: Option<String>,
	pub inspiration: Option<String>,
	pub occasion: Vec<String>,
	pub season: Vec<String>,
	pub local_image_path: Option<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

/// One perfume_notes row joined to its note, in association insertion order.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PerfumeNoteName {
	pub note_type: String,
	pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct NewPerfume {
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
	pub occasion: Vec<String>,
	pub season: Vec<String>,
	pub local_image_path: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NoteSummary {
	pub id: i64,
	pub name: String,
	pub image_filename: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NoteRow {
	pub id: i64,
	pub name: String,
	pub normalized_name: String,
	pub image_filename: Option<String>,
	pub description: Option<String>,
	pub source: Option<String>,
	pub cultural_significance: Option<String>,
	pub family_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewNote {
	pub name: String,
	pub image_filename: Option<String>,
	pub description: Option<String>,
	pub source: Option<String>,
	pub cultural_significance: Option<String>,
	pub family_id: Option<i64>,
}
