use serde::{Serialize, Deserialize};

use super::*;

/// Why a package was disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
	/// Another package with the same identity was preferred.
	Duplicate,
	/// A requirement was not met.
	Require,
	/// The package avoids something that is present.
	Avoid,
	/// Another package disables this one.
	Disable,
	/// A library nothing depends on.
	NoDependent,
	/// Nothing to run in any phase.
	NoPhase,
	/// Only has actions and nothing is installed to run them.
	NoActionMod,
	/// Disabled by the user.
	Manual,
}

impl Reason {
	pub fn code(&self) -> &'static str {
		match self {
			Reason::Duplicate => "duplicate",
			Reason::Require => "require",
			Reason::Avoid => "avoid",
			Reason::Disable => "disable",
			Reason::NoDependent => "no_dependent",
			Reason::NoPhase => "no_phase",
			Reason::NoActionMod => "no_actionmod",
			Reason::Manual => "manual",
		}
	}
}

impl std::fmt::Display for Reason {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.code())
	}
}

/// A record explaining why a package was disabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
	pub reason: Reason,
	pub message: String,
	/// Values the message was built from, in a fixed order per reason.
	pub args: Vec<String>,
	/// The other package involved, the kept one for duplicates and the disabling one for conflicts.
	pub related: Option<PackageId>,
}

impl Notice {
	pub fn new(reason: Reason, message: String, args: Vec<String>) -> Self {
		Notice { reason, message, args, related: None }
	}

	/// args: kept id, kept version.
	pub fn duplicate(kept_id: PackageId, kept: &PackageDescriptor) -> Self {
		let version = display_version(kept.version);
		Notice {
			related: Some(kept_id),
			..Notice::new(
				Reason::Duplicate,
				format!("duplicate of \"{}\" version {} which is used instead", kept.id(), version),
				vec![kept.id().to_string(), version],
			)
		}
	}

	/// args: target, found version or `"none"`, target name, target url.
	pub fn require(target: &Target, found: Option<Version>, group: &[&VersionConstraint]) -> Self {
		let found = display_version(found);
		let wanted = group.iter().map(|c| c.bounds.to_string()).collect::<Vec<_>>().join(" or ");
		let name = group.iter().find_map(|c| c.name.clone()).unwrap_or_default();
		let url = group.iter().find_map(|c| c.url.clone()).unwrap_or_default();
		Notice::new(
			Reason::Require,
			format!("requires \"{}\" {} but found {}", target, wanted, found),
			vec![target.to_string(), found, name, url],
		)
	}

	/// args: target, found version.
	pub fn avoid(target: &Target, found: Version) -> Self {
		Notice::new(
			Reason::Avoid,
			format!("avoids \"{}\" which is present at version {}", target, found),
			vec![target.to_string(), found.to_string()],
		)
	}

	/// args: id of the disabling package.
	pub fn disable(by_id: PackageId, by: &PackageDescriptor) -> Self {
		Notice {
			related: Some(by_id),
			..Notice::new(
				Reason::Disable,
				format!("disabled by \"{}\"", by.id()),
				vec![by.id().to_string()],
			)
		}
	}

	pub fn no_dependent() -> Self {
		Notice::new(Reason::NoDependent, "library is not required by any enabled package".to_string(), Vec::new())
	}

	pub fn no_phase() -> Self {
		Notice::new(Reason::NoPhase, "has nothing to run in any phase".to_string(), Vec::new())
	}

	pub fn no_action_mod() -> Self {
		Notice::new(Reason::NoActionMod, "only has actions and no installed package handles them".to_string(), Vec::new())
	}

	pub fn manual() -> Self {
		Notice::new(Reason::Manual, "disabled by user settings".to_string(), Vec::new())
	}
}

fn display_version(version: Option<Version>) -> String {
	version.map_or_else(|| "none".to_string(), |v| v.to_string())
}
