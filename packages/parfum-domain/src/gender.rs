use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

pub const GENDER_VARIANTS: &str = "Male, Female, Unisex";

/// Target audience of a perfume. Matched case-sensitively against the literal variant names.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Gender {
	Male,
	Female,
	Unisex,
}
impl Gender {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Male => "Male",
			Self::Female => "Female",
			Self::Unisex => "Unisex",
		}
	}
}
impl FromStr for Gender {
	type Err = Error;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"Male" => Ok(Self::Male),
			"Female" => Ok(Self::Female),
			"Unisex" => Ok(Self::Unisex),
			_ => Err(Error::UnknownVariant {
				field: "gender",
				expected: GENDER_VARIANTS,
				value: value.to_string(),
			}),
		}
	}
}
impl fmt::Display for Gender {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use crate::Gender;

	#[test]
	fn parses_exact_literals_only() {
		assert_eq!("Male".parse::<Gender>(), Ok(Gender::Male));
		assert_eq!("Unisex".parse::<Gender>(), Ok(Gender::Unisex));
		assert!("male".parse::<Gender>().is_err());
		assert!("UNISEX".parse::<Gender>().is_err());
		assert!(" Female".parse::<Gender>().is_err());
	}
}
