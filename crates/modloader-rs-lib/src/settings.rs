//! Per-package user overrides.
//!
//! Where overrides are stored is up to the caller, the resolver only reads them through [`SettingsStore`].

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::package::PackageKey;

/// Settings a user can force on a package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserOverride {
	pub disabled: Option<bool>,
	pub load_index: Option<i64>,
	/// Handed to the package untouched.
	pub log_level: Option<String>,
}

pub trait SettingsStore {
	fn get(&self, key: &PackageKey) -> Option<&UserOverride>;
	fn set(&mut self, key: PackageKey, value: UserOverride);
}

/// A [`SettingsStore`] held in memory.
///
/// Reads and writes JSON objects mapping package ids to overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySettings {
	overrides: BTreeMap<PackageKey, UserOverride>,
}

impl MemorySettings {
	pub fn new() -> Self {
		Default::default()
	}

	/// Ids are normalized, two ids normalizing to the same key is an error.
	pub fn from_json(s: &str) -> crate::Result<Self> {
		let raw: BTreeMap<String, UserOverride> = serde_json::from_str(s)?;
		let mut settings = MemorySettings::new();
		for (id, value) in raw {
			let key = PackageKey::new(&id)?;
			if settings.overrides.contains_key(&key) {
				return Err(crate::Error::Validation(format!("settings contain \"{}\" more than once", key)));
			}
			settings.overrides.insert(key, value);
		}
		Ok(settings)
	}

	pub fn to_json(&self) -> crate::Result<String> {
		Ok(serde_json::to_string_pretty(&self.overrides)?)
	}

	pub fn len(&self) -> usize {
		self.overrides.len()
	}

	pub fn is_empty(&self) -> bool {
		self.overrides.is_empty()
	}
}

impl SettingsStore for MemorySettings {
	fn get(&self, key: &PackageKey) -> Option<&UserOverride> {
		self.overrides.get(key)
	}

	fn set(&mut self, key: PackageKey, value: UserOverride) {
		self.overrides.insert(key, value);
	}
}
