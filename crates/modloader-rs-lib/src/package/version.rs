//! Package version numbers.
//!
//! # Format
//!
//! Versions follow the format:
//!
//! `MAJOR`.`MINOR`.`BUILD`.`REVISION`
//!
//! Only `MAJOR` is required, missing components are zero so `1.2` and `1.2.0.0` are equal.
//! Manifests may also give a bare integer which is read as the major version.

use serde::{Serialize, Deserialize};
use try_map::FallibleMapExt;

/// A 4-component version, ordered component by component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
	major: u32,
	minor: u32,
	build: u32,
	revision: u32,
}

impl Version {
	/// The version given to packages that exist but don't declare one.
	pub const ZERO: Version = Version::from_parts(0, 0, 0, 0);

	pub const fn from_parts(major: u32, minor: u32, build: u32, revision: u32) -> Self {
		Version { major, minor, build, revision }
	}

	/// Create a new [`Version`] from a version string.
	///
	/// # Errors
	/// This function will return a [`Parse`](crate::Error::Parse) error in the following cases.
	/// - Input is empty.
	/// - Input has more components than the `MAJOR`.`MINOR`.`BUILD`.`REVISION` format.
	/// - The components of the version can't be parsed as integers.
	pub fn new(s: impl AsRef<str>) -> crate::Result<Self> {
		use crate::Error::Parse;

		fn component(c: &str) -> crate::Result<u32> {
			c.trim().parse::<u32>().map_err(|_| Parse(format!("version component \"{}\" can't be parsed", c)))
		}

		let s = s.as_ref().trim();
		if s.is_empty() { return Err(Parse("version string is empty".into())) }
		let components = s.split('.').collect::<Vec<_>>();
		if components.len() > 4 { return Err(Parse(format!("too many version components in \"{}\"", s))) }

		let major = component(components[0])?;
		let minor = components.get(1).try_map(|c| component(c))?.unwrap_or(0);
		let build = components.get(2).try_map(|c| component(c))?.unwrap_or(0);
		let revision = components.get(3).try_map(|c| component(c))?.unwrap_or(0);

		Ok(Version { major, minor, build, revision })
	}

	pub fn major(&self) -> u32 { self.major }
	pub fn minor(&self) -> u32 { self.minor }
	pub fn build(&self) -> u32 { self.build }
	pub fn revision(&self) -> u32 { self.revision }
}

impl From<u32> for Version {
	fn from(major: u32) -> Self {
		Version::from_parts(major, 0, 0, 0)
	}
}

impl TryFrom<&str> for Version {
	type Error = crate::Error;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl TryFrom<String> for Version {
	type Error = crate::Error;
	fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(value) }
}

impl std::str::FromStr for Version {
	type Err = crate::Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> { Self::new(s) }
}

impl From<Version> for String {
	fn from(value: Version) -> Self {
		value.to_string()
	}
}

impl std::fmt::Display for Version {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}.{}.{}", self.major, self.minor, self.build, self.revision)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test] fn version_compares_as_ints() { assert!(Version::new("1.9").unwrap() < Version::new("1.10").unwrap()) }
	#[test] fn version_missing_components_are_zero() { assert!(Version::new("1.2").unwrap() == Version::new("1.2.0.0").unwrap()) }
	#[test] fn version_short_version_is_lt() { assert!(Version::new("1.2").unwrap() < Version::new("1.2.0.1").unwrap()) }
	#[test] fn version_revision_is_compared() { assert!(Version::new("1.2.3.4").unwrap() < Version::new("1.2.3.5").unwrap()) }
	#[test] fn version_major_only() { assert_eq!(Version::new("7").unwrap(), Version::from(7)) }
	#[test] fn version_too_many_components() { assert!(Version::new("1.2.3.4.5").is_err()) }
	#[test] fn version_non_numeric() { assert!(Version::new("1.x").is_err()) }
	#[test] fn version_empty() { assert!(Version::new("  ").is_err()) }
	#[test] fn version_negative() { assert!(Version::new("-1.0").is_err()) }
	#[test] fn version_display_is_full() { assert_eq!(Version::new("4.5").unwrap().to_string(), "4.5.0.0") }
	#[test] fn zero_is_lowest() { assert!(Version::ZERO < Version::new("0.0.0.1").unwrap()) }

	#[test]
	fn version_serializes_as_string() {
		let v = Version::new("2.3.4").unwrap();
		assert_eq!(serde_json::to_string(&v).unwrap(), "\"2.3.4.0\"");
		assert_eq!(serde_json::from_str::<Version>("\"2.3.4\"").unwrap(), v);
	}
}
