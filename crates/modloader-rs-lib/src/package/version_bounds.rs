use serde::{Serialize, Deserialize};

/// A generic enum to describe an inclusive range of versions.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub enum VersionBounds<T>
where T: std::cmp::PartialEq + std::cmp::Ord + std::clone::Clone,
{
	#[default] Any,
	MinOnly(T),
	MaxOnly(T),
	MinMax(T, T),
}

impl<T> VersionBounds<T>
where T: std::cmp::PartialEq + std::cmp::Ord + std::clone::Clone,
{
	/// When both arguments are `None` will return `Any`
	pub fn new(min: Option<T>, max: Option<T>) -> VersionBounds<T> {
		match (min, max) {
			(None, None) => VersionBounds::Any,
			(None, Some(max)) => VersionBounds::MaxOnly(max),
			(Some(min), None) => VersionBounds::MinOnly(min),
			(Some(min), Some(max)) => VersionBounds::MinMax(min, max),
		}
	}

	pub fn min(&self) -> Option<&T> {
		match self {
			VersionBounds::MinOnly(min) | VersionBounds::MinMax(min, _) => Some(min),
			VersionBounds::Any | VersionBounds::MaxOnly(_) => None,
		}
	}

	pub fn max(&self) -> Option<&T> {
		match self {
			VersionBounds::MaxOnly(max) | VersionBounds::MinMax(_, max) => Some(max),
			VersionBounds::Any | VersionBounds::MinOnly(_) => None,
		}
	}

	/// Both bounds are inclusive. A range with `min > max` contains nothing.
	pub fn is_version_within(&self, other: &T) -> bool {
		match self {
			VersionBounds::Any => true,
			VersionBounds::MinOnly(min) => other >= min,
			VersionBounds::MaxOnly(max) => other <= max,
			VersionBounds::MinMax(min, max) => min <= other && other <= max,
		}
	}
}

impl<T> std::fmt::Display for VersionBounds<T>
where T: std::cmp::PartialEq + std::cmp::Ord + std::clone::Clone + std::fmt::Display,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			VersionBounds::Any => write!(f, "any version"),
			VersionBounds::MinOnly(min) => write!(f, ">= {}", min),
			VersionBounds::MaxOnly(max) => write!(f, "<= {}", max),
			VersionBounds::MinMax(min, max) => write!(f, "{} - {}", min, max),
		}
	}
}
