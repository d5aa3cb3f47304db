use crate::{Error, Result};

pub const DEFAULT_SKIP: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 100;

/// A validated offset/limit window.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Page {
	pub skip: i64,
	pub limit: i64,
}
impl Page {
	pub fn new(skip: Option<i64>, limit: Option<i64>) -> Result<Self> {
		let skip = skip.unwrap_or(DEFAULT_SKIP);
		let limit = limit.unwrap_or(DEFAULT_LIMIT);

		if skip < 0 {
			return Err(Error::OutOfRange {
				field: "skip",
				message: "must be zero or greater.".to_string(),
			});
		}
		if !(1..=MAX_LIMIT).contains(&limit) {
			return Err(Error::OutOfRange {
				field: "limit",
				message: format!("must be between 1 and {MAX_LIMIT}."),
			});
		}

		Ok(Self { skip, limit })
	}
}
impl Default for Page {
	fn default() -> Self {
		Self { skip: DEFAULT_SKIP, limit: DEFAULT_LIMIT }
	}
}
