//! Package descriptors and the types they are built from.

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};

mod identity;
pub use identity::normalize;
pub use identity::PackageKey;
pub use identity::Target;

mod version;
pub use version::Version;

mod version_bounds;
pub use version_bounds::VersionBounds;

/// Range of package versions, both ends inclusive.
pub type VersionRange = VersionBounds<Version>;

mod relationship;
pub use relationship::VersionConstraint;
pub use relationship::group_by_target;

pub mod action;
pub use action::Action;
pub use action::merge_defaults;

mod notice;
pub use notice::Notice;
pub use notice::Reason;

pub mod import;

/// The flag marking a package as only useful to other packages.
pub const LIBRARY_FLAG: &str = "library";

/// Index of a package within a resolution session.
///
/// Only meaningful for the session, and the outcome, it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackageId(usize);

impl PackageId {
	pub(crate) fn new(index: usize) -> Self {
		PackageId(index)
	}

	pub fn index(self) -> usize {
		self.0
	}
}

/// Code the package declares to run in a phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
	/// Opaque to the resolver, the execution side decides what it calls.
	pub target: String,
	/// Lowercase.
	pub phase: String,
}

impl EntryPoint {
	pub fn new(target: impl Into<String>, phase: impl AsRef<str>) -> Self {
		EntryPoint {
			target: target.into(),
			phase: phase.as_ref().trim().to_lowercase(),
		}
	}
}

/// A candidate add-on package.
///
/// Built by whatever scans for packages, after that only the resolver changes it: the disabled flag,
/// the notices and the merged action list.
/// Construction validates the identity so a descriptor always has a usable [`PackageKey`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDescriptor {
	id: String,
	key: PackageKey,
	pub version: Option<Version>,
	pub requires: Vec<VersionConstraint>,
	pub avoids: Vec<VersionConstraint>,
	pub disables: Vec<VersionConstraint>,
	/// Lowercase tags.
	pub flags: BTreeSet<String>,
	pub load_index: i64,
	pub actions: Vec<Action>,
	pub entry_points: Vec<EntryPoint>,
	pub source_timestamp: Option<std::time::SystemTime>,
	pub source_size: Option<u64>,
	/// Passed through from user settings, not used by the resolver.
	pub log_level: Option<String>,
	disabled: bool,
	notices: Vec<Notice>,
}

impl PackageDescriptor {
	/// # Errors
	/// When `id` can't be used as a [`PackageKey`].
	pub fn new(id: impl Into<String>) -> crate::Result<Self> {
		let id = id.into();
		let key = PackageKey::new(&id)?;
		Ok(PackageDescriptor {
			id: id.trim().to_string(),
			key,
			version: None,
			requires: Vec::new(),
			avoids: Vec::new(),
			disables: Vec::new(),
			flags: BTreeSet::new(),
			load_index: 0,
			actions: Vec::new(),
			entry_points: Vec::new(),
			source_timestamp: None,
			source_size: None,
			log_level: None,
			disabled: false,
			notices: Vec::new(),
		})
	}

	/// The identifier as declared.
	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn key(&self) -> &PackageKey {
		&self.key
	}

	pub fn is_library(&self) -> bool {
		self.flags.contains(LIBRARY_FLAG)
	}

	pub fn add_flag(&mut self, flag: impl AsRef<str>) {
		let flag = flag.as_ref().trim().to_lowercase();
		if !flag.is_empty() {
			self.flags.insert(flag);
		}
	}

	pub fn is_disabled(&self) -> bool {
		self.disabled
	}

	pub fn notices(&self) -> &[Notice] {
		&self.notices
	}

	/// The reason of the most recent notice, set on every disabled package.
	pub fn disabled_reason(&self) -> Option<Reason> {
		if self.disabled {
			self.notices.last().map(|n| n.reason)
		} else {
			None
		}
	}

	pub(crate) fn disable(&mut self, notice: Notice) {
		self.notices.push(notice);
		self.disabled = true;
	}

	/// Orders duplicates by preference, the greatest is kept.
	///
	/// Compares version, then source timestamp, then source size. Missing values are lowest.
	pub fn cmp_preference(&self, other: &Self) -> std::cmp::Ordering {
		self.version.cmp(&other.version)
			.then_with(|| self.source_timestamp.cmp(&other.source_timestamp))
			.then_with(|| self.source_size.cmp(&other.source_size))
	}
}

impl std::fmt::Display for PackageDescriptor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.version {
			Some(v) => write!(f, "{} {}", self.id, v),
			None => write!(f, "{}", self.id),
		}
	}
}
