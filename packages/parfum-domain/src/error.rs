#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("{field} must be one of {expected}, got {value:?}.")]
	UnknownVariant { field: &'static str, expected: &'static str, value: String },
	#[error("{field} {message}")]
	OutOfRange { field: &'static str, message: String },
}
impl Error {
	pub fn field(&self) -> &'static str {
		match self {
			Self::UnknownVariant { field, .. } | Self::OutOfRange { field, .. } => field,
		}
	}
}
