use std::{collections::HashSet, hash::Hash};

/// Drops repeated entries, keeping the first occurrence and the original order.
pub fn dedupe<T>(items: &[T]) -> Vec<T>
where
	T: Copy + Eq + Hash,
{
	let mut seen = HashSet::with_capacity(items.len());

	items.iter().copied().filter(|item| seen.insert(*item)).collect()
}
