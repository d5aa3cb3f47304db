use parfum_domain::{Error, Gender, NoteRole, Page, ids, pagination, text};

#[test]
fn page_defaults_to_first_hundred() {
	let page = Page::new(None, None).expect("Expected default page.");

	assert_eq!(page, Page { skip: 0, limit: 100 });
	assert_eq!(page, Page::default());
}

#[test]
fn page_accepts_bounds() {
	assert!(Page::new(Some(0), Some(1)).is_ok());
	assert!(Page::new(Some(10_000), Some(pagination::MAX_LIMIT)).is_ok());
}

#[test]
fn page_rejects_out_of_range_values() {
	let err = Page::new(Some(-1), None).expect_err("Expected negative skip to fail.");

	assert_eq!(err.field(), "skip");

	for limit in [0, 101, -5] {
		let err = Page::new(None, Some(limit)).expect_err("Expected limit to fail.");

		assert_eq!(err.field(), "limit");
		assert!(err.to_string().contains("between 1 and 100"), "Unexpected error: {err}");
	}
}

#[test]
fn gender_rejects_other_casing() {
	let err = "female".parse::<Gender>().expect_err("Expected lowercase gender to fail.");

	assert!(matches!(err, Error::UnknownVariant { field: "gender", .. }));
	assert_eq!(
		err.to_string(),
		"gender must be one of Male, Female, Unisex, got \"female\".".to_string()
	);
}

#[test]
fn gender_serializes_as_literal_name() {
	let value = serde_json::to_value(Gender::Unisex).expect("Failed to serialize gender.");

	assert_eq!(value, serde_json::json!("Unisex"));
	assert!(serde_json::from_value::<Gender>(serde_json::json!("unisex")).is_err());
}

#[test]
fn note_roles_order_top_to_base() {
	let mut roles = vec![NoteRole::Base, NoteRole::Top, NoteRole::Middle];

	roles.sort_by_key(|role| role.rank());

	assert_eq!(roles, NoteRole::ALL.to_vec());
	assert_eq!("middle".parse::<NoteRole>(), Ok(NoteRole::Middle));
	assert!("heart".parse::<NoteRole>().is_err());
	assert_eq!(
		serde_json::to_value(NoteRole::Base).expect("Failed to serialize role."),
		serde_json::json!("base")
	);
}

#[test]
fn clean_drops_blank_criteria() {
	assert_eq!(text::clean(Some("  Dior ")), Some("Dior"));
	assert_eq!(text::clean(Some("   ")), None);
	assert_eq!(text::clean(None), None);
}

#[test]
fn normalize_name_lowercases() {
	assert_eq!(text::normalize_name(" Bergamot"), "bergamot");
	assert_eq!(text::normalize_name("YLANG-Ylang"), "ylang-ylang");
}

#[test]
fn dedupe_keeps_first_occurrence() {
	assert_eq!(ids::dedupe(&[3_i64, 1, 3, 2, 1]), vec![3, 1, 2]);
	assert!(ids::dedupe::<i64>(&[]).is_empty());
}
