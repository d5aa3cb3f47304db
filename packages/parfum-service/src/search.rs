pub(crate) mod filter;
pub(crate) mod projection;

use serde::{Deserialize, Serialize};

use parfum_domain::{Gender, NoteRole, Page, text};
use parfum_storage::models::PerfumeSummary;

use crate::{
	CatalogService, PageRequest, Result, assemble,
	assemble::PerfumeListItem,
	search::{filter::PerfumeFilter, projection::SearchPlan},
};

/// Perfume search criteria exactly as received. Every field is optional and blank values count
/// as absent.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SearchRequest {
	pub q: Option<String>,
	pub country: Option<String>,
	pub gender: Option<String>,
	pub brand: Option<String>,
	#[serde(rename = "type")]
	pub perfume_type: Option<String>,
	pub family: Option<String>,
	pub category: Option<String>,
	pub concentration: Option<String>,
	pub perfumer: Option<String>,
	pub tag: Option<String>,
	pub note: Option<String>,
	pub note_type: Option<String>,
	pub accord: Option<String>,
	pub skip: Option<i64>,
	pub limit: Option<i64>,
}

/// Validated criteria: trimmed, non-empty text and parsed enums.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SearchCriteria {
	pub(crate) q: Option<String>,
	pub(crate) country: Option<String>,
	pub(crate) gender: Option<Gender>,
	pub(crate) brand: Option<String>,
	pub(crate) perfume_type: Option<String>,
	pub(crate) family: Option<String>,
	pub(crate) category: Option<String>,
	pub(crate) concentration: Option<String>,
	pub(crate) perfumer: Option<String>,
	pub(crate) tag: Option<String>,
	pub(crate) note: Option<String>,
	pub(crate) note_type: Option<NoteRole>,
	pub(crate) accord: Option<String>,
}
impl SearchCriteria {
	pub(crate) fn parse(req: &SearchRequest) -> Result<Self> {
		let cleaned = |value: &Option<String>| text::clean(value.as_deref()).map(str::to_string);
		let gender = text::clean(req.gender.as_deref()).map(str::parse::<Gender>).transpose()?;
		let note_type =
			text::clean(req.note_type.as_deref()).map(str::parse::<NoteRole>).transpose()?;

		Ok(Self {
			q: cleaned(&req.q),
			country: cleaned(&req.country),
			gender,
			brand: cleaned(&req.brand),
			perfume_type: cleaned(&req.perfume_type),
			family: cleaned(&req.family),
			category: cleaned(&req.category),
			concentration: cleaned(&req.concentration),
			perfumer: cleaned(&req.perfumer),
			tag: cleaned(&req.tag),
			note: cleaned(&req.note),
			note_type,
			accord: cleaned(&req.accord),
		})
	}
}

impl CatalogService {
	/// Filters the catalog by every supplied criterion and returns one id-ordered page.
	pub async fn search_perfumes(&self, req: SearchRequest) -> Result<Vec<PerfumeListItem>> {
		let criteria = SearchCriteria::parse(&req)?;
		let page = Page::new(req.skip, req.limit)?;

		self.run_list(PerfumeFilter::from_criteria(&criteria), page).await
	}

	pub async fn list_perfumes(&self, req: PageRequest) -> Result<Vec<PerfumeListItem>> {
		let page = req.page()?;

		self.run_list(PerfumeFilter::default(), page).await
	}

	async fn run_list(&self, filter: PerfumeFilter, page: Page) -> Result<Vec<PerfumeListItem>> {
		let plan = SearchPlan::list(filter, page);
		let mut builder = plan.build();

		tracing::debug!(sql = builder.sql(), "Running perfume list plan.");

		let rows: Vec<PerfumeSummary> = builder.build_query_as().fetch_all(&self.db.pool).await?;

		Ok(rows.into_iter().map(assemble::list_item).collect())
	}
}

#[cfg(test)]
mod tests {
	use parfum_domain::{Gender, NoteRole};

	use crate::{
		Error,
		search::{SearchCriteria, SearchRequest},
	};

	#[test]
	fn blank_criteria_are_absent() {
		let req = SearchRequest {
			q: Some("   ".to_string()),
			brand: Some("".to_string()),
			gender: Some(" ".to_string()),
			..Default::default()
		};

		assert_eq!(SearchCriteria::parse(&req).expect("Parse failed."), SearchCriteria::default());
	}

	#[test]
	fn criteria_are_trimmed_and_typed() {
		let req = SearchRequest {
			q: Some("  chan ".to_string()),
			gender: Some("Female".to_string()),
			note_type: Some("top".to_string()),
			..Default::default()
		};
		let criteria = SearchCriteria::parse(&req).expect("Parse failed.");

		assert_eq!(criteria.q.as_deref(), Some("chan"));
		assert_eq!(criteria.gender, Some(Gender::Female));
		assert_eq!(criteria.note_type, Some(NoteRole::Top));
	}

	#[test]
	fn gender_is_case_sensitive() {
		let req = SearchRequest { gender: Some("male".to_string()), ..Default::default() };
		let err = SearchCriteria::parse(&req).expect_err("Expected gender rejection.");

		match err {
			Error::InvalidRequest { field, .. } => assert_eq!(field.as_deref(), Some("gender")),
			other => panic!("Unexpected error: {other:?}"),
		}
	}

	#[test]
	fn unknown_note_type_is_rejected() {
		let req = SearchRequest { note_type: Some("heart".to_string()), ..Default::default() };

		assert!(matches!(
			SearchCriteria::parse(&req),
			Err(Error::InvalidRequest { field: Some(field), .. }) if field == "note_type"
		));
	}
}
