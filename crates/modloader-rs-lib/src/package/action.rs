//! Declared actions.
//!
//! Actions are opaque field maps run by whichever installed package handles them.
//! Only [`ACTION`], [`PHASE`] and [`ON_ERROR`] mean anything here, every other field is passed through.

use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

pub const ACTION: &str = "action";
pub const PHASE: &str = "phase";
pub const ON_ERROR: &str = "onerror";

/// The `action` value marking an entry as defaults for the entries after it.
const DEFAULT_ACTION: &str = "default";

/// One entry of a package's action list. Field names are stored lowercase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Action(Map<String, Value>);

impl Action {
	pub fn new(fields: Map<String, Value>) -> Self {
		Action(fields.into_iter().map(|(k, v)| (k.trim().to_lowercase(), v)).collect())
	}

	pub fn fields(&self) -> &Map<String, Value> {
		&self.0
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// A string field, empty or whitespace-only values count as absent.
	fn text(&self, key: &str) -> Option<&str> {
		self.0.get(key)
			.and_then(Value::as_str)
			.map(str::trim)
			.filter(|s| !s.is_empty())
	}

	pub fn action(&self) -> Option<&str> {
		self.text(ACTION)
	}

	pub fn phase(&self) -> Option<&str> {
		self.text(PHASE)
	}

	/// Lowercased error policy, interpreted by whoever runs the action.
	pub fn on_error(&self) -> Option<String> {
		self.text(ON_ERROR).map(str::to_lowercase)
	}

	pub fn is_default(&self) -> bool {
		self.action().is_some_and(|a| a.eq_ignore_ascii_case(DEFAULT_ACTION))
	}

	/// Checks if this action runs in `phase`.
	///
	/// The declared phase is searched for `phase` as a substring so one field can list several phases.
	/// Actions without a phase use `fallback`.
	pub fn runs_in_phase(&self, phase: &str, fallback: &str) -> bool {
		let declared = self.phase().unwrap_or(fallback).to_lowercase();
		declared.contains(&phase.to_lowercase())
	}
}

impl From<Map<String, Value>> for Action {
	fn from(value: Map<String, Value>) -> Self { Action::new(value) }
}

impl From<Action> for Map<String, Value> {
	fn from(value: Action) -> Self { value.0 }
}

/// Folds `default` entries into the entries that follow them.
///
/// Each default entry updates a running set of defaults key by key and is dropped from the output.
/// Every other entry gets the running defaults for keys it doesn't set itself.
/// The output has no default entries left so merging it again changes nothing.
pub fn merge_defaults(actions: &[Action]) -> Vec<Action> {
	let mut defaults = Map::<String, Value>::new();
	let mut merged = Vec::<Action>::with_capacity(actions.len());

	for action in actions {
		if action.is_default() {
			for (key, value) in &action.0 {
				if key != ACTION {
					defaults.insert(key.clone(), value.clone());
				}
			}
		} else {
			let mut entry = action.clone();
			for (key, value) in &defaults {
				entry.0.entry(key.clone()).or_insert_with(|| value.clone());
			}
			merged.push(entry);
		}
	}

	merged
}
