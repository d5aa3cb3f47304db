/// Trims a user-supplied criterion and drops it when nothing is left.
pub fn clean(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|value| !value.is_empty())
}

/// The case-folded form used for note de-duplication and lookups.
pub fn normalize_name(name: &str) -> String {
	name.trim().to_lowercase()
}

/// Builds an `ILIKE` pattern matching `needle` anywhere, with LIKE metacharacters taken literally.
pub fn contains_pattern(needle: &str) -> String {
	let mut pattern = String::with_capacity(needle.len() + 2);

	pattern.push('%');

	for ch in needle.chars() {
		if matches!(ch, '%' | '_' | '\\') {
			pattern.push('\\');
		}

		pattern.push(ch);
	}

	pattern.push('%');

	pattern
}

#[cfg(test)]
mod tests {
	use crate::text;

	#[test]
	fn escapes_like_metacharacters() {
		assert_eq!(text::contains_pattern("chan"), "%chan%");
		assert_eq!(text::contains_pattern("100%"), "%100\\%%");
		assert_eq!(text::contains_pattern("a_b\\c"), "%a\\_b\\\\c%");
	}
}
