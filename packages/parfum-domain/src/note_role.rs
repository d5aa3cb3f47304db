use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

pub const NOTE_ROLE_VARIANTS: &str = "top, middle, base";

/// When a note is perceived in the evolution of a fragrance.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteRole {
	Top,
	Middle,
	Base,
}
impl NoteRole {
	pub const ALL: [Self; 3] = [Self::Top, Self::Middle, Self::Base];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Top => "top",
			Self::Middle => "middle",
			Self::Base => "base",
		}
	}

	/// Position of the role in a fragrance pyramid, top first.
	pub fn rank(self) -> u8 {
		match self {
			Self::Top => 0,
			Self::Middle => 1,
			Self::Base => 2,
		}
	}
}
impl FromStr for NoteRole {
	type Err = Error;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		Self::ALL.into_iter().find(|role| role.as_str() == value).ok_or_else(|| {
			Error::UnknownVariant {
				field: "note_type",
				expected: NOTE_ROLE_VARIANTS,
				value: value.to_string(),
			}
		})
	}
}
impl fmt::Display for NoteRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
