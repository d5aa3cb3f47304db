const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("Conflict: {0}")]
	Conflict(String),
}
impl Error {
	/// Maps constraint violations raised by a write into the caller-facing taxonomy.
	///
	/// A unique violation always means the row already exists. A foreign-key violation means an
	/// unknown reference on insert/update, and a still-referenced row on delete.
	pub(crate) fn from_write(err: sqlx::Error, op: WriteOp, subject: &str) -> Self {
		let code = err
			.as_database_error()
			.and_then(|db_err| db_err.code())
			.map(|code| code.into_owned());

		match (code.as_deref(), op) {
			(Some(UNIQUE_VIOLATION), _) => Self::Conflict(format!("{subject} already exists.")),
			(Some(FOREIGN_KEY_VIOLATION), WriteOp::Delete) =>
				Self::Conflict(format!("{subject} is still referenced and cannot be deleted.")),
			(Some(FOREIGN_KEY_VIOLATION), WriteOp::Store) =>
				Self::InvalidArgument(format!("{subject} references a row that does not exist.")),
			_ => Self::Sqlx(err),
		}
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WriteOp {
	Store,
	Delete,
}
