//! Package identity.
//!
//! Identifiers are compared in their normalized form: trimmed, lowercased and stripped
//! of anything outside `[a-z0-9._-]`. A handful of normalized identifiers are reserved,
//! they name things a constraint can point at that are not packages.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Serialize, Deserialize};

fn disallowed_characters() -> &'static Regex {
	static DISALLOWED: OnceLock<Regex> = OnceLock::new();
	DISALLOWED.get_or_init(|| Regex::new(r"[^a-z0-9._-]").expect("pattern should compile."))
}

/// Normalizes a raw identifier.
///
/// # Errors
/// [`EmptyIdentifier`](crate::Error::EmptyIdentifier) when nothing is left after normalization.
pub fn normalize(raw: &str) -> crate::Result<String> {
	let lowered = raw.trim().to_lowercase();
	let key = disallowed_characters().replace_all(&lowered, "").into_owned();
	if key.is_empty() {
		Err(crate::Error::EmptyIdentifier(raw.to_string()))
	} else {
		Ok(key)
	}
}

/// The normalized identity of a real package.
///
/// Never empty and never one of the reserved identifiers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageKey(String);

impl PackageKey {
	/// # Errors
	/// - [`EmptyIdentifier`](crate::Error::EmptyIdentifier) see [`normalize()`].
	/// - [`ReservedIdentifier`](crate::Error::ReservedIdentifier) when `raw` normalizes to a reserved word.
	pub fn new(raw: &str) -> crate::Result<Self> {
		let key = normalize(raw)?;
		if Target::reserved(&key).is_some() {
			return Err(crate::Error::ReservedIdentifier(raw.to_string()));
		}
		Ok(PackageKey(key))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl TryFrom<String> for PackageKey {
	type Error = crate::Error;
	fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(&value) }
}

impl From<PackageKey> for String {
	fn from(value: PackageKey) -> Self { value.0 }
}

impl AsRef<str> for PackageKey {
	fn as_ref(&self) -> &str { &self.0 }
}

impl std::fmt::Display for PackageKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// Whatever a constraint names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
	/// This loader.
	Loader,
	/// The host application.
	Host,
	/// Compatibility shim standing in for the legacy loader.
	LegacyLoader,
	/// A dependency that is deliberately never present.
	Absent,
	/// A real package.
	Package(PackageKey),
}

impl Target {
	/// Normalizes `raw`, mapping reserved words to their virtual targets.
	pub fn new(raw: &str) -> crate::Result<Self> {
		let key = normalize(raw)?;
		Ok(Self::reserved(&key).unwrap_or_else(|| Target::Package(PackageKey(key))))
	}

	fn reserved(key: &str) -> Option<Self> {
		match key {
			"modloader" | "loader" => Some(Target::Loader),
			"host" | "game" => Some(Target::Host),
			"legacyloader" | "legacy-loader" | "legacy_loader" | "lml" => Some(Target::LegacyLoader),
			"none" => Some(Target::Absent),
			_ => None,
		}
	}

	pub fn is_reserved(&self) -> bool {
		!matches!(self, Target::Package(_))
	}

	pub fn as_package(&self) -> Option<&PackageKey> {
		match self {
			Target::Package(key) => Some(key),
			_ => None,
		}
	}
}

impl From<PackageKey> for Target {
	fn from(value: PackageKey) -> Self { Target::Package(value) }
}

impl std::fmt::Display for Target {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Target::Loader => f.write_str("modloader"),
			Target::Host => f.write_str("host"),
			Target::LegacyLoader => f.write_str("legacyloader"),
			Target::Absent => f.write_str("none"),
			Target::Package(key) => key.fmt(f),
		}
	}
}
