pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { field: Option<String>, message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Conflict: {message}")]
	Conflict { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl Error {
	pub(crate) fn invalid_field(field: &str, message: impl Into<String>) -> Self {
		Self::InvalidRequest { field: Some(field.to_string()), message: message.into() }
	}
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<parfum_storage::Error> for Error {
	fn from(err: parfum_storage::Error) -> Self {
		match err {
			parfum_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			parfum_storage::Error::InvalidArgument(message) =>
				Self::InvalidRequest { field: None, message },
			parfum_storage::Error::Conflict(message) => Self::Conflict { message },
		}
	}
}

impl From<parfum_domain::Error> for Error {
	fn from(err: parfum_domain::Error) -> Self {
		Self::InvalidRequest { field: Some(err.field().to_string()), message: err.to_string() }
	}
}
