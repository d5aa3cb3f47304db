use std::collections::BTreeSet;

use sqlx::{Postgres, QueryBuilder};

use parfum_domain::{Gender, NoteRole, text};

use crate::search::SearchCriteria;

/// A to-one relation of `perfumes p` that a clause or projection reads from.
///
/// Variants are ordered so the rendered join list is stable no matter which clause asked first.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum Join {
	Brand,
	Country,
	Type,
	Family,
	Concentration,
	Perfumer,
}
impl Join {
	pub(crate) const ALL: [Self; 6] =
		[Self::Brand, Self::Country, Self::Type, Self::Family, Self::Concentration, Self::Perfumer];

	pub(crate) fn alias(self) -> &'static str {
		match self {
			Self::Brand => "b",
			Self::Country => "c",
			Self::Type => "ty",
			Self::Family => "f",
			Self::Concentration => "co",
			Self::Perfumer => "pf",
		}
	}

	fn sql(self) -> &'static str {
		match self {
			Self::Brand => " LEFT JOIN brands b ON b.id = p.brand_id",
			Self::Country => " LEFT JOIN countries c ON c.id = p.country_id",
			Self::Type => " LEFT JOIN perfume_types ty ON ty.id = p.type_id",
			Self::Family => " LEFT JOIN families f ON f.id = p.family_id",
			Self::Concentration => " LEFT JOIN concentrations co ON co.id = p.concentration_id",
			Self::Perfumer => " LEFT JOIN perfumers pf ON pf.id = p.perfumer_id",
		}
	}
}

/// One predicate over `perfumes p`. Patterns are already escaped `ILIKE` patterns.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Clause {
	Id(i64),
	/// Perfume name or brand name.
	Text(String),
	Related { join: Join, pattern: String },
	Gender(Gender),
	Category(String),
	Tag(String),
	Accord(String),
	Note { pattern: Option<String>, role: Option<NoteRole> },
}
impl Clause {
	fn join(&self) -> Option<Join> {
		match self {
			Self::Text(_) => Some(Join::Brand),
			Self::Related { join, .. } => Some(*join),
			_ => None,
		}
	}

	fn push(&self, builder: &mut QueryBuilder<'static, Postgres>) {
		match self {
			Self::Id(id) => {
				builder.push("p.id = ");
				builder.push_bind(*id);
			},
			Self::Text(pattern) => {
				builder.push("(p.name ILIKE ");
				builder.push_bind(pattern.clone());
				builder.push(" OR b.name ILIKE ");
				builder.push_bind(pattern.clone());
				builder.push(")");
			},
			Self::Related { join, pattern } => {
				builder.push(join.alias());
				builder.push(".name ILIKE ");
				builder.push_bind(pattern.clone());
			},
			Self::Gender(gender) => {
				builder.push("p.gender = ");
				builder.push_bind(gender.as_str());
			},
			Self::Category(pattern) => {
				builder.push("p.category ILIKE ");
				builder.push_bind(pattern.clone());
			},
			Self::Tag(pattern) => {
				builder.push(
					"EXISTS (SELECT 1 FROM perfume_tags pt JOIN tags t ON t.id = pt.tag_id WHERE pt.perfume_id = p.id AND t.name ILIKE ",
				);
				builder.push_bind(pattern.clone());
				builder.push(")");
			},
			Self::Accord(pattern) => {
				builder.push(
					"EXISTS (SELECT 1 FROM perfume_main_accords pma JOIN main_accords ma ON ma.id = pma.main_accord_id WHERE pma.perfume_id = p.id AND ma.name ILIKE ",
				);
				builder.push_bind(pattern.clone());
				builder.push(")");
			},
			Self::Note { pattern, role } => {
				builder.push(
					"EXISTS (SELECT 1 FROM perfume_notes pn JOIN notes n ON n.id = pn.note_id WHERE pn.perfume_id = p.id",
				);

				if let Some(pattern) = pattern {
					builder.push(" AND n.name ILIKE ");
					builder.push_bind(pattern.clone());
				}
				if let Some(role) = role {
					builder.push(" AND pn.note_type = ");
					builder.push_bind(role.as_str());
				}

				builder.push(")");
			},
		}
	}
}

/// An accumulating conjunction of clauses plus the to-one joins they need.
///
/// Each join is recorded once however many clauses read from it, and clause order is kept
/// independent of join order.
#[derive(Clone, Debug, Default)]
pub(crate) struct PerfumeFilter {
	clauses: Vec<Clause>,
	joins: BTreeSet<Join>,
}
impl PerfumeFilter {
	pub(crate) fn by_id(id: i64) -> Self {
		Self::default().with(Clause::Id(id))
	}

	pub(crate) fn from_criteria(criteria: &SearchCriteria) -> Self {
		let mut filter = Self::default();
		let pattern = |value: &Option<String>| value.as_deref().map(text::contains_pattern);

		if let Some(q) = pattern(&criteria.q) {
			filter = filter.with(Clause::Text(q));
		}

		for (join, value) in [
			(Join::Country, &criteria.country),
			(Join::Brand, &criteria.brand),
			(Join::Type, &criteria.perfume_type),
			(Join::Family, &criteria.family),
			(Join::Concentration, &criteria.concentration),
			(Join::Perfumer, &criteria.perfumer),
		] {
			if let Some(pattern) = pattern(value) {
				filter = filter.with(Clause::Related { join, pattern });
			}
		}

		if let Some(gender) = criteria.gender {
			filter = filter.with(Clause::Gender(gender));
		}
		if let Some(category) = pattern(&criteria.category) {
			filter = filter.with(Clause::Category(category));
		}
		if let Some(tag) = pattern(&criteria.tag) {
			filter = filter.with(Clause::Tag(tag));
		}
		if let Some(accord) = pattern(&criteria.accord) {
			filter = filter.with(Clause::Accord(accord));
		}
		if criteria.note.is_some() || criteria.note_type.is_some() {
			filter =
				filter.with(Clause::Note { pattern: pattern(&criteria.note), role: criteria.note_type });
		}

		filter
	}

	pub(crate) fn with(mut self, clause: Clause) -> Self {
		if let Some(join) = clause.join() {
			self.joins.insert(join);
		}

		self.clauses.push(clause);

		self
	}

	pub(crate) fn joins(&self) -> &BTreeSet<Join> {
		&self.joins
	}

	/// Pushes the `WHERE` body. No clauses render as `TRUE`.
	pub(crate) fn push_predicate(&self, builder: &mut QueryBuilder<'static, Postgres>) {
		if self.clauses.is_empty() {
			builder.push("TRUE");

			return;
		}

		for (idx, clause) in self.clauses.iter().enumerate() {
			if idx > 0 {
				builder.push(" AND ");
			}

			clause.push(builder);
		}
	}
}

/// Pushes `LEFT JOIN`s for the union of `required` sets, each at most once and in a fixed order.
pub(crate) fn push_joins<'a>(
	builder: &mut QueryBuilder<'static, Postgres>,
	required: impl IntoIterator<Item = &'a BTreeSet<Join>>,
) {
	let mut joins = BTreeSet::new();

	for set in required {
		joins.extend(set.iter().copied());
	}
	for join in joins {
		builder.push(join.sql());
	}
}
