//! Functions for reading package descriptors from manifest JSON.
//!
//! Field names are matched ignoring case. Every plural field takes an array, or a single value
//! standing in for a one element array. Empty or whitespace-only strings count as absent.

use serde_json::{Map, Value};

use super::*;
use crate::Error::Parse;

/// Looks up `key` ignoring case.
fn get_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
	obj.iter().find(|(k, _)| k.trim().eq_ignore_ascii_case(key)).map(|(_, v)| v)
}

fn non_empty_str(v: &Value) -> Option<&str> {
	v.as_str().map(str::trim).filter(|s| !s.is_empty())
}

fn get_one_or_many(v: Option<&Value>) -> Vec<&Value> {
	match v {
		None | Some(Value::Null) => Vec::new(),
		Some(Value::Array(arr)) => arr.iter().collect(),
		Some(v) => vec![v],
	}
}

fn get_string(obj: &Map<String, Value>, key: &str) -> crate::Result<Option<String>> {
	match get_field(obj, key) {
		None | Some(Value::Null) => Ok(None),
		Some(Value::String(s)) => Ok(Some(s.trim().to_string()).filter(|s| !s.is_empty())),
		Some(_) => Err(Parse(format!("{} must be a string", key))),
	}
}

pub fn version_from_json(v: &Value) -> crate::Result<Option<Version>> {
	match v {
		Value::Null => Ok(None),
		Value::String(s) if s.trim().is_empty() => Ok(None),
		Value::String(s) => Version::new(s).map(Some),
		Value::Number(n) => {
			n.as_u64()
				.and_then(|n| u32::try_from(n).ok())
				.map(|n| Some(Version::from(n)))
				.ok_or_else(|| Parse(format!("version number {} is out of range", n)))
		},
		_ => Err(Parse("version must be a string or an integer".to_string())),
	}
}

fn optional_version(obj: &Map<String, Value>, key: &str) -> crate::Result<Option<Version>> {
	get_field(obj, key).map_or(Ok(None), version_from_json)
}

/// Builds a constraint, a target id with nothing left after normalization is treated as blank.
fn new_constraint(id: &str, min: Option<Version>, max: Option<Version>) -> crate::Result<Option<VersionConstraint>> {
	match VersionConstraint::new(id, min, max) {
		Ok(constraint) => Ok(Some(constraint)),
		Err(crate::Error::EmptyIdentifier(raw)) => {
			log::warn!("Skipping constraint on \"{}\", nothing is left of the id once normalized", raw);
			Ok(None)
		},
		Err(e) => Err(e),
	}
}

/// Reads a single constraint, `None` when the value is blank.
pub fn constraint_from_json(v: &Value) -> crate::Result<Option<VersionConstraint>> {
	match v {
		Value::Null => Ok(None),
		Value::String(_) => non_empty_str(v).map_or(Ok(None), |id| new_constraint(id, None, None)),
		Value::Object(obj) => {
			let id = get_string(obj, "id")?.ok_or_else(|| Parse("constraint has no id".to_string()))?;
			let Some(mut constraint) = new_constraint(&id, optional_version(obj, "min")?, optional_version(obj, "max")?)? else {
				return Ok(None);
			};
			constraint.name = get_string(obj, "name")?;
			constraint.url = get_string(obj, "url")?;
			Ok(Some(constraint))
		},
		_ => Err(Parse("constraint must be a string or an object".to_string())),
	}
}

pub fn constraints_from_json(v: Option<&Value>) -> crate::Result<Vec<VersionConstraint>> {
	let mut constraints = Vec::<VersionConstraint>::new();
	for elem in get_one_or_many(v) {
		if let Some(constraint) = constraint_from_json(elem)? {
			constraints.push(constraint);
		}
	}
	Ok(constraints)
}

fn actions_from_json(v: Option<&Value>) -> crate::Result<Vec<Action>> {
	get_one_or_many(v).into_iter().map(|elem| {
		elem.as_object()
			.map(|obj| Action::new(obj.clone()))
			.ok_or_else(|| Parse("actions must be objects".to_string()))
	}).collect()
}

fn entry_points_from_json(v: Option<&Value>) -> crate::Result<Vec<EntryPoint>> {
	get_one_or_many(v).into_iter().map(|elem| {
		let obj = elem.as_object().ok_or_else(|| Parse("entry points must be objects".to_string()))?;
		let target = get_string(obj, "target")?.ok_or_else(|| Parse("entry point has no target".to_string()))?;
		let phase = get_string(obj, "phase")?.ok_or_else(|| Parse("entry point has no phase".to_string()))?;
		Ok(EntryPoint::new(target, phase))
	}).collect()
}

/// Reads a JSON array of manifest records, or a single record.
///
/// A record that can't be read is skipped, its error is returned alongside the packages that could be.
///
/// # Errors
/// Only when `s` isn't JSON at all.
pub fn manifests_from_str(s: &str) -> crate::Result<(Vec<PackageDescriptor>, Vec<crate::Error>)> {
	let v: Value = serde_json::from_str(s)?;
	let mut packages = Vec::<PackageDescriptor>::new();
	let mut rejected = Vec::<crate::Error>::new();
	for (i, record) in get_one_or_many(Some(&v)).into_iter().enumerate() {
		match PackageDescriptor::from_json(record) {
			Ok(package) => packages.push(package),
			Err(e) => {
				log::warn!("Skipping manifest record {}: {}", i, e);
				rejected.push(e);
			},
		}
	}
	Ok((packages, rejected))
}

impl PackageDescriptor {
	/// Reads a manifest record.
	///
	/// # Errors
	/// - [`Parse`](crate::Error::Parse) when a field has the wrong shape.
	/// - [`EmptyIdentifier`](crate::Error::EmptyIdentifier) or [`ReservedIdentifier`](crate::Error::ReservedIdentifier)
	/// when the package has an unusable id. Constraints with an empty id are skipped instead.
	pub fn from_json(v: &Value) -> crate::Result<Self> {
		let obj = v.as_object().ok_or_else(|| Parse("manifest is not an object".to_string()))?;

		let id = get_string(obj, "id")?.ok_or_else(|| crate::Error::EmptyIdentifier(String::new()))?;
		let mut package = PackageDescriptor::new(id)?;

		package.version = optional_version(obj, "version")?;
		for flag in get_one_or_many(get_field(obj, "flags")) {
			match flag {
				Value::String(s) => package.add_flag(s),
				_ => return Err(Parse("flags must be strings".to_string())),
			}
		}
		package.load_index = match get_field(obj, "loadindex") {
			None | Some(Value::Null) => 0,
			Some(v) => v.as_i64().ok_or_else(|| Parse("loadindex must be an integer".to_string()))?,
		};
		package.requires = constraints_from_json(get_field(obj, "requires"))?;
		package.avoids = constraints_from_json(get_field(obj, "avoids"))?;
		package.disables = constraints_from_json(get_field(obj, "disables"))?;
		package.actions = actions_from_json(get_field(obj, "actions"))?;
		package.entry_points = entry_points_from_json(get_field(obj, "entrypoints"))?;

		Ok(package)
	}
}
