use serde::{Serialize, Deserialize};

use super::*;

/// A version range rule pointing at another package or a virtual target.
///
/// Used for the `requires`, `avoids` and `disables` lists of a [`PackageDescriptor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionConstraint {
	pub target: Target,
	pub bounds: VersionRange,
	/// Human readable name of the target, shown when the constraint fails.
	pub name: Option<String>,
	/// Where the target can be found, shown when the constraint fails.
	pub url: Option<String>,
}

impl VersionConstraint {
	pub fn new(target_id: &str, min: Option<Version>, max: Option<Version>) -> crate::Result<Self> {
		Ok(VersionConstraint {
			target: Target::new(target_id)?,
			bounds: VersionBounds::new(min, max),
			name: None,
			url: None,
		})
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn with_url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());
		self
	}

	/// `found` is the resolved version of the target, `None` when the target wasn't found.
	pub fn is_satisfied_by(&self, found: Option<Version>) -> bool {
		found.is_some_and(|v| self.bounds.is_version_within(&v))
	}
}

/// Groups constraints sharing a target, keeping the order targets first appear in.
///
/// Constraints within a group are alternatives, every group has to hold on its own.
pub fn group_by_target(constraints: &[VersionConstraint]) -> Vec<(&Target, Vec<&VersionConstraint>)> {
	let mut groups = Vec::<(&Target, Vec<&VersionConstraint>)>::new();
	for constraint in constraints {
		match groups.iter().position(|(target, _)| *target == &constraint.target) {
			Some(i) => groups[i].1.push(constraint),
			None => groups.push((&constraint.target, vec![constraint])),
		}
	}
	groups
}
