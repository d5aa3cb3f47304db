use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use parfum_domain::{Gender, NoteRole};
use parfum_storage::models::{PerfumeDetail, PerfumeNoteName, PerfumeSummary};

use crate::{Error, Result};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PerfumeListItem {
	pub id: i64,
	pub name: String,
	pub brand_name: Option<String>,
	pub image_path: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct PerfumeNoteItem {
	pub role: NoteRole,
	pub name: String,
}

/// A perfume with every relation flattened to display names.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PerfumeDetailResponse {
	pub id: i64,
	pub name: String,
	pub brand: Option<String>,
	#[serde(rename = "type")]
	pub perfume_type: Option<String>,
	pub family: Option<String>,
	pub concentration: Option<String>,
	pub country: Option<String>,
	pub perfumer: Option<String>,
	pub gender: Option<Gender>,
	pub category: Option<String>,
	pub release_year: Option<i32>,
	pub description: Option<String>,
	pub longevity: Option<String>,
	pub sillage: Option<String>,
	pub inspiration: Option<String>,
	pub occasion: Vec<String>,
	pub season: Vec<String>,
	pub image_path: Option<String>,
	pub notes: Vec<PerfumeNoteItem>,
	pub main_accords: Vec<String>,
	pub tags: Vec<String>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}

pub(crate) fn list_item(row: PerfumeSummary) -> PerfumeListItem {
	PerfumeListItem {
		id: row.id,
		name: row.name,
		brand_name: row.brand_name,
		image_path: row.local_image_path,
	}
}

pub(crate) fn detail(
	row: PerfumeDetail,
	notes: Vec<PerfumeNoteName>,
	main_accords: Vec<String>,
	tags: Vec<String>,
) -> Result<PerfumeDetailResponse> {
	let gender = row.gender.as_deref().map(str::parse::<Gender>).transpose().map_err(|err| {
		Error::Storage { message: format!("Perfume {} has a corrupt gender: {err}", row.id) }
	})?;
	let notes = order_notes(notes)?;

	Ok(PerfumeDetailResponse {
		id: row.id,
		name: row.name,
		brand: row.brand_name,
		perfume_type: row.type_name,
		family: row.family_name,
		concentration: row.concentration_name,
		country: row.country_name,
		perfumer: row.perfumer_name,
		gender,
		category: row.category,
		release_year: row.release_year,
		description: row.description,
		longevity: row.longevity,
		sillage: row.sillage,
		inspiration: row.inspiration,
		occasion: row.occasion,
		season: row.season,
		image_path: row.local_image_path,
		notes,
		main_accords,
		tags,
		created_at: row.created_at,
		updated_at: row.updated_at,
	})
}

/// Groups notes top, middle, base. The sort is stable, so insertion order holds within a role.
fn order_notes(rows: Vec<PerfumeNoteName>) -> Result<Vec<PerfumeNoteItem>> {
	let mut notes = rows
		.into_iter()
		.map(|row| {
			let role = row.note_type.parse::<NoteRole>().map_err(|err| Error::Storage {
				message: format!("Note {:?} has a corrupt role: {err}", row.name),
			})?;

			Ok(PerfumeNoteItem { role, name: row.name })
		})
		.collect::<Result<Vec<_>>>()?;

	notes.sort_by_key(|note| note.role.rank());

	Ok(notes)
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use parfum_domain::{Gender, NoteRole};
	use parfum_storage::models::{PerfumeDetail, PerfumeNoteName, PerfumeSummary};

	use crate::{Error, assemble};

	fn note(role: &str, name: &str) -> PerfumeNoteName {
		PerfumeNoteName { note_type: role.to_string(), name: name.to_string() }
	}

	fn detail_row() -> PerfumeDetail {
		PerfumeDetail {
			id: 3,
			name: "Chance".to_string(),
			brand_name: Some("Chanel".to_string()),
			type_name: None,
			family_name: Some("Floral".to_string()),
			concentration_name: Some("Eau de Toilette".to_string()),
			country_name: Some("France".to_string()),
			perfumer_name: None,
			gender: Some("Female".to_string()),
			category: Some("Designer".to_string()),
			release_year: Some(2002),
			description: None,
			longevity: Some("Long".to_string()),
			sillage: None,
			inspiration: None,
			occasion: vec!["Daily".to_string()],
			season: vec!["Spring".to_string(), "Summer".to_string()],
			local_image_path: Some("images/chance.jpg".to_string()),
			created_at: datetime!(2024-01-02 03:04:05 UTC),
			updated_at: datetime!(2024-01-02 03:04:05 UTC),
		}
	}

	#[test]
	fn list_item_renames_image_path() {
		let item = assemble::list_item(PerfumeSummary {
			id: 1,
			name: "Sauvage".to_string(),
			brand_name: None,
			local_image_path: Some("images/sauvage.jpg".to_string()),
		});

		assert_eq!(item.brand_name, None);
		assert_eq!(item.image_path.as_deref(), Some("images/sauvage.jpg"));
	}

	#[test]
	fn notes_group_by_role_and_keep_insertion_order() {
		let response = assemble::detail(
			detail_row(),
			vec![
				note("base", "Vetiver"),
				note("top", "Orange"),
				note("middle", "Jasmine"),
				note("base", "Amber"),
				note("top", "Bergamot"),
			],
			Vec::new(),
			Vec::new(),
		)
		.expect("Assembly failed.");
		let ordered = response
			.notes
			.iter()
			.map(|note| (note.role, note.name.as_str()))
			.collect::<Vec<_>>();

		assert_eq!(
			ordered,
			vec![
				(NoteRole::Top, "Orange"),
				(NoteRole::Top, "Bergamot"),
				(NoteRole::Middle, "Jasmine"),
				(NoteRole::Base, "Vetiver"),
				(NoteRole::Base, "Amber"),
			]
		);
	}

	#[test]
	fn detail_serializes_flat_names() {
		let response = assemble::detail(
			detail_row(),
			vec![note("top", "Pink Pepper")],
			vec!["Citrus".to_string(), "Floral".to_string()],
			vec!["Classic".to_string()],
		)
		.expect("Assembly failed.");

		assert_eq!(response.gender, Some(Gender::Female));

		let value = serde_json::to_value(&response).expect("Serialize failed.");

		assert_eq!(value["brand"], "Chanel");
		assert_eq!(value["type"], serde_json::Value::Null);
		assert_eq!(value["gender"], "Female");
		assert_eq!(value["image_path"], "images/chance.jpg");
		assert_eq!(value["notes"][0]["role"], "top");
		assert_eq!(value["main_accords"], serde_json::json!(["Citrus", "Floral"]));
		assert_eq!(value["created_at"], "2024-01-02T03:04:05Z");
	}

	#[test]
	fn corrupt_role_is_a_storage_error() {
		let err = assemble::detail(detail_row(), vec![note("heart", "Rose")], Vec::new(), Vec::new())
			.expect_err("Expected corrupt role.");

		assert!(matches!(err, Error::Storage { .. }));
	}
}
