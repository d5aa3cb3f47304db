use std::collections::BTreeSet;

use sqlx::{Postgres, QueryBuilder};

use parfum_domain::Page;

use crate::search::filter::{self, Join, PerfumeFilter};

const LIST_COLUMNS: &str = "p.id, p.name, b.name AS brand_name, p.local_image_path";
const DETAIL_COLUMNS: &str = "\
p.id, p.name, \
b.name AS brand_name, ty.name AS type_name, f.name AS family_name, \
co.name AS concentration_name, c.name AS country_name, pf.name AS perfumer_name, \
p.gender, p.category, p.release_year, p.description, p.longevity, p.sillage, p.inspiration, \
p.occasion, p.season, p.local_image_path, p.created_at, p.updated_at";

/// Which columns a perfume query returns.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Projection {
	/// `PerfumeSummary` rows.
	List,
	/// `PerfumeDetail` rows; collections are loaded separately by id.
	Detail,
}
impl Projection {
	fn columns(self) -> &'static str {
		match self {
			Self::List => LIST_COLUMNS,
			Self::Detail => DETAIL_COLUMNS,
		}
	}

	pub(crate) fn joins(self) -> BTreeSet<Join> {
		match self {
			Self::List => BTreeSet::from([Join::Brand]),
			Self::Detail => Join::ALL.into_iter().collect(),
		}
	}
}

/// A filter paired with a projection, rendered into one statement.
#[derive(Debug)]
pub(crate) struct SearchPlan {
	projection: Projection,
	filter: PerfumeFilter,
	page: Option<Page>,
}
impl SearchPlan {
	pub(crate) fn list(filter: PerfumeFilter, page: Page) -> Self {
		Self { projection: Projection::List, filter, page: Some(page) }
	}

	pub(crate) fn detail(id: i64) -> Self {
		Self { projection: Projection::Detail, filter: PerfumeFilter::by_id(id), page: None }
	}

	pub(crate) fn build(&self) -> QueryBuilder<'static, Postgres> {
		let mut builder = QueryBuilder::new("SELECT ");

		builder.push(self.projection.columns());
		builder.push(" FROM perfumes p");

		let projection_joins = self.projection.joins();

		filter::push_joins(&mut builder, [&projection_joins, self.filter.joins()]);
		builder.push(" WHERE ");
		self.filter.push_predicate(&mut builder);
		builder.push(" ORDER BY p.id");

		if let Some(page) = self.page {
			builder.push(" OFFSET ");
			builder.push_bind(page.skip);
			builder.push(" LIMIT ");
			builder.push_bind(page.limit);
		}

		builder
	}
}

#[cfg(test)]
mod tests {
	use parfum_domain::Page;

	use crate::search::{
		SearchCriteria,
		filter::PerfumeFilter,
		projection::{Projection, SearchPlan},
	};

	#[test]
	fn list_plan_without_criteria_pages_everything() {
		let plan = SearchPlan::list(PerfumeFilter::default(), Page::default());

		assert_eq!(
			plan.build().sql(),
			"SELECT p.id, p.name, b.name AS brand_name, p.local_image_path FROM perfumes p LEFT JOIN brands b ON b.id = p.brand_id WHERE TRUE ORDER BY p.id OFFSET $1 LIMIT $2"
		);
	}

	#[test]
	fn list_plan_shares_brand_join_with_filters() {
		let criteria = SearchCriteria {
			q: Some("chan".to_string()),
			brand: Some("Chanel".to_string()),
			tag: Some("Niche".to_string()),
			..Default::default()
		};
		let sql = SearchPlan::list(PerfumeFilter::from_criteria(&criteria), Page::default())
			.build()
			.sql()
			.to_string();

		assert_eq!(sql.matches("LEFT JOIN").count(), 1);
		assert_eq!(sql.matches("EXISTS").count(), 1);
		assert!(sql.ends_with("ORDER BY p.id OFFSET $5 LIMIT $6"));
	}

	#[test]
	fn list_plan_adds_filter_joins_after_projection_joins() {
		let criteria = SearchCriteria { perfumer: Some("Sheldrake".to_string()), ..Default::default() };
		let sql = SearchPlan::list(PerfumeFilter::from_criteria(&criteria), Page::default())
			.build()
			.sql()
			.to_string();

		assert!(sql.contains(
			"FROM perfumes p LEFT JOIN brands b ON b.id = p.brand_id LEFT JOIN perfumers pf ON pf.id = p.perfumer_id WHERE"
		));
	}

	#[test]
	fn detail_plan_joins_every_relation_once_and_is_unpaged() {
		let sql = SearchPlan::detail(7).build().sql().to_string();

		assert_eq!(sql.matches("LEFT JOIN").count(), Projection::Detail.joins().len());
		assert!(sql.contains("co.name AS concentration_name"));
		assert!(sql.ends_with("WHERE p.id = $1 ORDER BY p.id"));
		assert!(!sql.contains("LIMIT"));
	}
}
